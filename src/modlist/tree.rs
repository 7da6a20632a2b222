//! Install-file tree for a single archive
//!
//! Target paths are split on `/` into directory nodes with a file leaf at the
//! end. Policies:
//! - same target path twice: the later entry replaces the earlier one
//! - a segment used as both a file and a directory: the directory wins and the
//!   file is dropped with a warning, whichever came first

use std::collections::BTreeMap;

use tracing::warn;

use super::index::FileEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Directory(Directory),
    File(FileLeaf),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Directory(d) => &d.name,
            TreeNode::File(f) => &f.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    pub name: String,
    /// Keyed by segment name, so iteration is alphabetical
    pub children: BTreeMap<String, TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLeaf {
    pub name: String,
    pub target_path: String,
    pub source_path: String,
    pub size: u64,
}

impl Directory {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: BTreeMap::new(),
        }
    }

    /// Children in display order: directories first, then files, each by name
    pub fn sorted_children(&self) -> Vec<&TreeNode> {
        let dirs = self
            .children
            .values()
            .filter(|n| matches!(n, TreeNode::Directory(_)));
        let files = self
            .children
            .values()
            .filter(|n| matches!(n, TreeNode::File(_)));
        dirs.chain(files).collect()
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a FileLeaf>) {
        for node in self.children.values() {
            match node {
                TreeNode::Directory(d) => d.collect_files(out),
                TreeNode::File(f) => out.push(f),
            }
        }
    }

    /// Get (or create) the subdirectory `segment`, replacing a file of that name
    fn subdirectory(&mut self, segment: &str, target_path: &str) -> &mut Directory {
        let node = self
            .children
            .entry(segment.to_string())
            .or_insert_with(|| TreeNode::Directory(Directory::new(segment)));

        if let TreeNode::File(file) = node {
            warn!(
                "'{}' is used as a directory by {}; dropping file entry {}",
                segment, target_path, file.target_path
            );
            *node = TreeNode::Directory(Directory::new(segment));
        }

        match node {
            TreeNode::Directory(d) => d,
            TreeNode::File(_) => unreachable!("file node replaced above"),
        }
    }
}

/// Directory tree of the files one archive installs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    root: Directory,
}

impl FileTree {
    pub fn build(files: &[FileEntry]) -> Self {
        let mut tree = Self::default();
        for entry in files {
            tree.insert(entry);
        }
        tree
    }

    fn insert(&mut self, entry: &FileEntry) {
        let mut segments: Vec<&str> = entry.target_path.split('/').collect();
        // split() always yields at least one segment
        let file_name = segments.pop().unwrap_or_default();

        let mut dir = &mut self.root;
        for segment in segments {
            dir = dir.subdirectory(segment, &entry.target_path);
        }

        if let Some(TreeNode::Directory(_)) = dir.children.get(file_name) {
            warn!(
                "'{}' is already a directory; dropping file entry {}",
                file_name, entry.target_path
            );
            return;
        }

        dir.children.insert(
            file_name.to_string(),
            TreeNode::File(FileLeaf {
                name: file_name.to_string(),
                target_path: entry.target_path.clone(),
                source_path: entry.source_path.clone(),
                size: entry.size,
            }),
        );
    }

    /// Top-level directory (unnamed)
    pub fn root(&self) -> &Directory {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Find the file leaf for a target path
    pub fn lookup(&self, target_path: &str) -> Option<&FileLeaf> {
        let mut segments = target_path.split('/').peekable();
        let mut dir = &self.root;

        while let Some(segment) = segments.next() {
            let last = segments.peek().is_none();
            match dir.children.get(segment)? {
                TreeNode::Directory(d) if !last => dir = d,
                TreeNode::File(f) if last => return Some(f),
                _ => return None,
            }
        }

        None
    }

    /// All file leaves, in path order
    pub fn files(&self) -> Vec<&FileLeaf> {
        let mut out = Vec::new();
        self.root.collect_files(&mut out);
        out
    }

    pub fn file_count(&self) -> usize {
        self.files().len()
    }

    pub fn total_size(&self) -> u64 {
        self.files()
            .iter()
            .fold(0u64, |total, f| total.saturating_add(f.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(target: &str, source: &str, size: u64) -> FileEntry {
        FileEntry {
            target_path: target.to_string(),
            source_path: source.to_string(),
            size,
        }
    }

    #[test]
    fn test_directory_with_two_files() {
        let tree = FileTree::build(&[
            entry("textures/a.dds", "a.dds", 1),
            entry("textures/b.dds", "b.dds", 2),
        ]);

        let top = tree.root().sorted_children();
        assert_eq!(top.len(), 1);
        let TreeNode::Directory(textures) = top[0] else {
            panic!("expected a directory, got {:?}", top[0]);
        };
        assert_eq!(textures.name, "textures");

        let names: Vec<&str> = textures.sorted_children().iter().map(|n| n.name()).collect();
        assert_eq!(names, ["a.dds", "b.dds"]);
        assert_eq!(tree.total_size(), 3);
    }

    #[test]
    fn test_every_path_has_one_leaf() {
        let entries = [
            entry("meshes/armor/iron/cuirass.nif", "x/cuirass.nif", 10),
            entry("meshes/armor/iron/boots.nif", "x/boots.nif", 11),
            entry("plugin.esp", "plugin.esp", 12),
            entry("textures/armor/iron/cuirass.dds", "t/cuirass.dds", 13),
        ];
        let tree = FileTree::build(&entries);

        assert_eq!(tree.file_count(), entries.len());
        for e in &entries {
            let leaf = tree.lookup(&e.target_path).unwrap();
            assert_eq!(leaf.source_path, e.source_path);
            assert_eq!(leaf.size, e.size);
        }
        assert!(tree.lookup("meshes/armor").is_none());
        assert!(tree.lookup("plugin.esp/extra").is_none());
    }

    #[test]
    fn test_duplicate_target_last_write_wins() {
        let tree = FileTree::build(&[
            entry("interface/skyui.swf", "old.swf", 1),
            entry("interface/skyui.swf", "new.swf", 2),
        ]);

        assert_eq!(tree.file_count(), 1);
        let leaf = tree.lookup("interface/skyui.swf").unwrap();
        assert_eq!(leaf.source_path, "new.swf");
        assert_eq!(leaf.size, 2);
    }

    #[test]
    fn test_directory_wins_over_file() {
        // file first, then a path that needs it to be a directory
        let tree = FileTree::build(&[entry("a", "a", 1), entry("a/b", "b", 2)]);
        assert!(tree.lookup("a").is_none());
        assert!(tree.lookup("a/b").is_some());

        // directory first, file later
        let tree = FileTree::build(&[entry("a/b", "b", 2), entry("a", "a", 1)]);
        assert!(tree.lookup("a").is_none());
        assert!(tree.lookup("a/b").is_some());
        assert_eq!(tree.file_count(), 1);
    }

    #[test]
    fn test_directories_sort_before_files() {
        let tree = FileTree::build(&[
            entry("zeta.esp", "", 0),
            entry("alpha.esp", "", 0),
            entry("textures/x.dds", "", 0),
            entry("meshes/y.nif", "", 0),
        ]);

        let names: Vec<&str> = tree.root().sorted_children().iter().map(|n| n.name()).collect();
        assert_eq!(names, ["meshes", "textures", "alpha.esp", "zeta.esp"]);
    }

    #[test]
    fn test_empty_input() {
        let tree = FileTree::build(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.file_count(), 0);
        assert_eq!(tree.total_size(), 0);
    }

    #[test]
    fn test_total_size_saturates() {
        let tree = FileTree::build(&[entry("a.bin", "", u64::MAX), entry("b/c.bin", "", 1)]);
        assert_eq!(tree.file_count(), 2);
        assert_eq!(tree.total_size(), u64::MAX);
    }

    #[test]
    fn test_build_is_stable() {
        let entries = [entry("b/c", "", 1), entry("a", "", 2), entry("b/d", "", 3)];
        assert_eq!(FileTree::build(&entries), FileTree::build(&entries));
    }
}
