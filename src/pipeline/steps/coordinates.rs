use crate::model::PomModel;
use crate::pipeline::phase_trait::ModelStep;

/// Overwrites the project's own groupId, artifactId and version
pub struct SetCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ModelStep for SetCoordinates {
    fn name(&self) -> &'static str {
        "SetCoordinates"
    }

    fn apply(&self, model: &mut PomModel) {
        model.group_id = Some(self.group_id.clone());
        model.artifact_id = Some(self.artifact_id.clone());
        model.version = Some(self.version.clone());
    }
}

/// Overwrites the parent reference's version. No-op without a parent.
pub struct OverrideParentVersion {
    pub version: String,
}

impl ModelStep for OverrideParentVersion {
    fn name(&self) -> &'static str {
        "OverrideParentVersion"
    }

    fn apply(&self, model: &mut PomModel) {
        if let Some(parent) = model.parent.as_mut() {
            parent.version = Some(self.version.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Parent;

    fn parented() -> PomModel {
        PomModel {
            parent: Some(Parent {
                group_id: "io.vertx".to_string(),
                artifact_id: "vertx-parent".to_string(),
                version: Some("12".to_string()),
                relative_path: None,
            }),
            artifact_id: Some("vertx-widget".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_coordinates() {
        let mut model = parented();
        SetCoordinates {
            group_id: "org.acme".to_string(),
            artifact_id: "widget".to_string(),
            version: "1.0-redhat".to_string(),
        }
        .apply(&mut model);

        assert_eq!(model.coordinates(), "org.acme:widget:1.0-redhat");
        assert_eq!(model.parent.unwrap().version.as_deref(), Some("12"));
    }

    #[test]
    fn test_override_parent_version_touches_only_the_version() {
        let mut model = parented();
        OverrideParentVersion {
            version: "13".to_string(),
        }
        .apply(&mut model);

        let parent = model.parent.unwrap();
        assert_eq!(parent.version.as_deref(), Some("13"));
        assert_eq!(parent.artifact_id, "vertx-parent");
        assert_eq!(model.version, None);
    }

    #[test]
    fn test_override_parent_version_without_parent() {
        let mut model = PomModel::default();
        OverrideParentVersion {
            version: "13".to_string(),
        }
        .apply(&mut model);

        assert_eq!(model, PomModel::default());
    }
}
