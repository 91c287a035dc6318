use super::{DirEntry, FileSystem};
use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
enum Node {
    File(String),
    Dir,
}

/// In-memory project tree for tests. Relative paths hang off `root`, and
/// adding a path creates every missing ancestor directory.
pub struct MockFileSystem {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            nodes: RwLock::new(BTreeMap::new()),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.absolute(path.as_ref());
        let mut nodes = self.write_nodes();
        if let Some(parent) = path.parent() {
            create_ancestors(&mut nodes, parent);
        }
        nodes.insert(path, Node::File(content.to_string()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.absolute(path.as_ref());
        create_ancestors(&mut self.write_nodes(), &path);
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn node(&self, path: &Path) -> Option<Node> {
        self.read_nodes().get(&self.absolute(path)).cloned()
    }

    fn read_nodes(&self) -> RwLockReadGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_nodes(&self) -> RwLockWriteGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn create_ancestors(nodes: &mut BTreeMap<PathBuf, Node>, dir: &Path) {
    for ancestor in dir.ancestors() {
        nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.node(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(Node::Dir))
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(Node::File(_)))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        match self.node(path) {
            Some(Node::File(content)) => Ok(content),
            Some(Node::Dir) => bail!("{:?} is a directory", path),
            None => bail!("No such file: {:?}", path),
        }
    }

    fn write_string(&self, path: &Path, content: &str) -> Result<()> {
        if self.is_dir(path) {
            bail!("{:?} is a directory", path);
        }
        self.add_file(path, content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let path = self.absolute(path);
        let mut nodes = self.write_nodes();
        match nodes.get(&path) {
            Some(Node::File(_)) => {
                nodes.remove(&path);
                Ok(())
            }
            Some(Node::Dir) => bail!("{:?} is a directory", path),
            None => bail!("No such file: {:?}", path),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let dir = self.absolute(path);
        let nodes = self.read_nodes();
        if !matches!(nodes.get(&dir), Some(Node::Dir)) {
            bail!("No such directory: {:?}", dir);
        }

        // BTreeMap order puts siblings in name order already
        Ok(nodes
            .iter()
            .filter(|(candidate, _)| candidate.parent() == Some(dir.as_path()))
            .map(|(candidate, node)| DirEntry {
                path: candidate.clone(),
                is_dir: matches!(node, Node::Dir),
            })
            .collect())
    }

    fn find_files(&self, root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
        let root = self.absolute(root);
        Ok(self
            .read_nodes()
            .iter()
            .filter(|(candidate, node)| {
                matches!(node, Node::File(_))
                    && candidate.starts_with(&root)
                    && candidate.file_name().and_then(|n| n.to_str()) == Some(file_name)
            })
            .map(|(candidate, _)| candidate.clone())
            .collect())
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        let absolute = self.absolute(path);
        if !self.read_nodes().contains_key(&absolute) {
            bail!("No such path: {:?}", path);
        }
        Ok(absolute)
    }
}
