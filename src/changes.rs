use std::collections::HashMap;

use crate::diff::{ChangeStats, count_changes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Script,
    Markup,
    Style,
    Code,
    Text,
    Image,
    Other,
}

impl FileKind {
    pub fn from_path(path: &str) -> Self {
        // Everything after the last dot of the full path; a path with no dot
        // classifies by the whole string, which never matches a known
        // extension.
        let ext = match path.rsplit_once('.') {
            Some((_, after)) => after,
            None => path,
        };
        match ext.to_ascii_lowercase().as_str() {
            "js" | "jsx" | "ts" | "tsx" => Self::Script,
            "html" | "htm" | "xml" => Self::Markup,
            "css" | "scss" | "sass" => Self::Style,
            "java" | "py" | "rb" | "php" | "c" | "cpp" | "cs" => Self::Code,
            "md" | "txt" => Self::Text,
            "jpg" | "jpeg" | "png" | "gif" | "svg" => Self::Image,
            _ => Self::Other,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Script | Self::Markup | Self::Style | Self::Code => '●',
            Self::Text => '¶',
            Self::Image => '□',
            Self::Other => '·',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub diff: String,
    pub kind: FileKind,
    pub stats: ChangeStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchTotals {
    pub files_changed: usize,
    pub additions: u32,
    pub deletions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    files: Vec<FileChange>,
}

impl ChangeSet {
    pub fn from_map(file_changes: HashMap<String, String>) -> Self {
        let mut files: Vec<FileChange> = file_changes
            .into_iter()
            .map(|(path, diff)| {
                let kind = FileKind::from_path(&path);
                let stats = count_changes(&diff);
                FileChange {
                    path,
                    diff,
                    kind,
                    stats,
                }
            })
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self { files }
    }

    pub fn files(&self) -> &[FileChange] {
        &self.files
    }

    pub fn get(&self, index: usize) -> Option<&FileChange> {
        self.files.get(index)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn position_of(&self, path: &str) -> Option<usize> {
        self.files.iter().position(|file| file.path == path)
    }

    pub fn totals(&self) -> BatchTotals {
        let mut totals = BatchTotals {
            files_changed: self.files.len(),
            ..BatchTotals::default()
        };
        for file in &self.files {
            totals.additions += file.stats.additions;
            totals.deletions += file.stats.deletions;
        }
        totals
    }
}
