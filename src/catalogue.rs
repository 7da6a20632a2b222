//! Browsable view of a loaded modlist: mod rows, search, per-mod overview.

use std::collections::HashMap;
use std::fmt;

use crate::modlist::{
    resolve_links, ArchiveEntry, FileEntry, FileTree, Manifest, ModLinks, ModlistIndex,
};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Bytes as megabytes, for one-decimal display
pub fn size_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// `1234567` -> `1,234,567`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One line of the mod list
#[derive(Debug, Clone, Copy)]
pub struct ModRow<'a> {
    /// 1-based position in the manifest's archive list
    pub position: usize,
    pub archive: &'a ArchiveEntry,
}

impl ModRow<'_> {
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.archive.display_name().to_lowercase().contains(&query)
            || self.archive.author().to_lowercase().contains(&query)
            || self.archive.name.to_lowercase().contains(&query)
    }
}

impl fmt::Display for ModRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} | {} | {} | {:.1} MB",
            self.position,
            self.archive.display_name(),
            self.archive.author(),
            self.archive.version(),
            size_mb(self.archive.size)
        )
    }
}

/// Read-only view over a manifest and its index
#[derive(Debug, Clone, Copy)]
pub struct Catalogue<'a> {
    manifest: &'a Manifest,
    index: &'a ModlistIndex,
}

impl<'a> Catalogue<'a> {
    pub fn new(manifest: &'a Manifest, index: &'a ModlistIndex) -> Self {
        Self { manifest, index }
    }

    /// Every archive, in manifest order, whether or not it installs files
    pub fn rows(&self) -> Vec<ModRow<'a>> {
        self.manifest
            .archives
            .iter()
            .enumerate()
            .map(|(i, archive)| ModRow {
                position: i + 1,
                archive,
            })
            .collect()
    }

    /// Rows whose name, author or filename contain `query` (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<ModRow<'a>> {
        self.rows().into_iter().filter(|row| row.matches(query)).collect()
    }

    /// Pick a mod by 1-based row number or by archive hash
    pub fn select(&self, selector: &str) -> Option<ModRow<'a>> {
        let rows = self.rows();
        if let Ok(position) = selector.parse::<usize>() {
            if let Some(row) = position.checked_sub(1).and_then(|i| rows.get(i)) {
                return Some(*row);
            }
        }
        rows.into_iter().find(|row| row.archive.hash == selector)
    }

    pub fn overview(&self, row: ModRow<'a>) -> ModOverview<'a> {
        ModOverview {
            archive: row.archive,
            links: resolve_links(&row.archive.state),
            files: self.index.files_for(&row.archive.hash),
        }
    }

    /// Install tree for one mod
    pub fn file_tree(&self, row: ModRow<'a>) -> FileTree {
        FileTree::build(self.index.files_for(&row.archive.hash))
    }

    /// Archive count per download source, largest first
    pub fn source_counts(&self) -> Vec<(&'a str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for archive in &self.manifest.archives {
            *counts.entry(archive.state.label()).or_insert(0) += 1;
        }
        sorted_counts(counts)
    }

    /// Directive count per `$type`, largest first
    pub fn directive_counts(&self) -> Vec<(&'a str, usize)> {
        let counts = self
            .index
            .directive_counts
            .iter()
            .map(|(kind, count)| (kind.as_str(), *count))
            .collect();
        sorted_counts(counts)
    }
}

fn sorted_counts(counts: HashMap<&str, usize>) -> Vec<(&str, usize)> {
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    counts
}

/// Detail pane for one mod
#[derive(Debug, Clone)]
pub struct ModOverview<'a> {
    pub archive: &'a ArchiveEntry,
    pub links: ModLinks,
    pub files: &'a [FileEntry],
}

impl ModOverview<'_> {
    pub fn installed_size(&self) -> u64 {
        self.files
            .iter()
            .fold(0u64, |total, f| total.saturating_add(f.size))
    }
}

impl fmt::Display for ModOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let archive = self.archive;
        writeln!(f, "Mod Name: {}", archive.display_name())?;
        writeln!(f, "Filename: {}", archive.name)?;
        writeln!(f, "Author: {}", archive.author())?;
        if !archive.version().is_empty() {
            writeln!(f, "Version: {}", archive.version())?;
        }
        writeln!(f, "Archive Size: {:.1} MB", size_mb(archive.size))?;
        writeln!(f)?;

        if !archive.description().is_empty() {
            writeln!(f, "Description: {}", archive.description())?;
            writeln!(f)?;
        }

        match (&self.links.mod_page, &self.links.direct_file) {
            (Some(page), Some(file)) => {
                writeln!(f, "Mod Page: {}", page)?;
                writeln!(f, "Direct Download: {}", file)?;
            }
            (Some(page), None) => writeln!(f, "Mod Page: {}", page)?,
            (None, Some(file)) => writeln!(f, "Download: {}", file)?,
            (None, None) => writeln!(f, "Download: Direct download (link not available)")?,
        }
        writeln!(f)?;

        if self.files.is_empty() {
            write!(f, "No file details available for this mod.")
        } else {
            let total = self.installed_size();
            writeln!(f, "Files to be installed: {} files", self.files.len())?;
            write!(
                f,
                "Total file size: {} bytes ({:.1} MB)",
                format_thousands(total),
                size_mb(total)
            )
        }
    }
}
