use crate::model::PomModel;
use crate::pipeline::phase_trait::ModelStep;
use tracing::debug;

/// Removes, for each configured artifact id, the first plugin carrying it.
/// Ids with no matching plugin are skipped.
pub struct RemovePlugins {
    pub artifact_ids: Vec<String>,
}

impl ModelStep for RemovePlugins {
    fn name(&self) -> &'static str {
        "RemovePlugins"
    }

    fn apply(&self, model: &mut PomModel) {
        let Some(build) = model.build.as_mut() else {
            return;
        };
        for id in &self.artifact_ids {
            match build.plugins.iter().position(|p| &p.artifact_id == id) {
                Some(index) => {
                    build.plugins.remove(index);
                }
                None => debug!("Plugin {} not declared, nothing to remove", id),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Build, Plugin};

    fn with_plugins(ids: &[&str]) -> PomModel {
        PomModel {
            build: Some(Build {
                plugins: ids.iter().map(|id| Plugin::new(*id)).collect(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn ids(model: &PomModel) -> Vec<&str> {
        model.plugins().iter().map(|p| p.artifact_id.as_str()).collect()
    }

    #[test]
    fn test_removes_first_match_only() {
        let mut model = with_plugins(&["old-plugin", "maven-compiler-plugin", "old-plugin"]);
        RemovePlugins {
            artifact_ids: vec!["old-plugin".to_string()],
        }
        .apply(&mut model);

        assert_eq!(ids(&model), vec!["maven-compiler-plugin", "old-plugin"]);
    }

    #[test]
    fn test_missing_plugin_is_not_an_error() {
        let mut model = with_plugins(&["maven-compiler-plugin"]);
        RemovePlugins {
            artifact_ids: vec!["maven-gpg-plugin".to_string()],
        }
        .apply(&mut model);

        assert_eq!(ids(&model), vec!["maven-compiler-plugin"]);
    }
}
