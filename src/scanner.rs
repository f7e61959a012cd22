use crate::config::{CleanConfig, TargetDir};
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks and other non-regular entries; unlinked, never followed.
    Other,
}

#[derive(Debug, Clone)]
pub struct FoundEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size_bytes: u64,
}

impl FoundEntry {
    pub fn size_human(&self) -> String {
        format_size(self.size_bytes)
    }

    /// Entry name within its pic directory.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// One target directory together with its immediate entries.
#[derive(Debug, Clone)]
pub struct TargetScan {
    pub target: TargetDir,
    pub entries: Vec<FoundEntry>,
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.metadata().ok())
        .filter(|m| m.is_file())
        .map(|m| m.len())
        .sum()
}

/// Non-recursive listing of one pic directory. A listing failure
/// (directory missing or unreadable) propagates to the caller.
pub fn list_entries(dir: &Path) -> io::Result<Vec<FoundEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        // file_type() does not follow symlinks, so a link to a
        // directory stays Other and is unlinked rather than descended.
        let kind = match entry.file_type() {
            Ok(ft) if ft.is_file() => EntryKind::File,
            Ok(ft) if ft.is_dir() => EntryKind::Dir,
            _ => EntryKind::Other,
        };

        let size_bytes = match kind {
            EntryKind::File => entry.metadata().map(|m| m.len()).unwrap_or(0),
            EntryKind::Dir => dir_size(&path),
            EntryKind::Other => 0,
        };

        entries.push(FoundEntry {
            path,
            kind,
            size_bytes,
        });
    }

    Ok(entries)
}

/// List every configured target directory. Any unlistable target aborts
/// the scan; per-entry trouble is left for the cleaner to report.
pub fn scan(config: &CleanConfig) -> Result<Vec<TargetScan>> {
    let mut scans = Vec::new();

    for target in config.target_dirs() {
        let entries = list_entries(&target.path)
            .with_context(|| format!("cannot list {}", target.path.display()))?;
        scans.push(TargetScan { target, entries });
    }

    Ok(scans)
}

pub fn total_entries(scans: &[TargetScan]) -> usize {
    scans.iter().map(|s| s.entries.len()).sum()
}

pub fn total_size(scans: &[TargetScan]) -> u64 {
    scans
        .iter()
        .flat_map(|s| s.entries.iter())
        .map(|e| e.size_bytes)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_files_and_dirs_with_kinds() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"xxxx").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.png"), b"yyyyyyyy").unwrap();

        let mut entries = list_entries(dir.path()).unwrap();
        entries.sort_by_key(|e| e.name());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name(), "a.png");
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].size_bytes, 4);
        assert_eq!(entries[1].name(), "sub");
        assert_eq!(entries[1].kind, EntryKind::Dir);
        assert_eq!(entries[1].size_bytes, 8);
    }

    #[test]
    fn listing_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/inner.png"), b"z").unwrap();

        let entries = list_entries(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "sub");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_entries(&dir.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn scan_aborts_when_a_target_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        // Only gas0 exists; gas1 is absent.
        fs::create_dir_all(dir.path().join("gas0/conc/pic")).unwrap();

        let cfg = CleanConfig {
            base: dir.path().to_path_buf(),
            params: vec!["conc".into()],
            gas_count: 2,
        };
        assert!(scan(&cfg).is_err());
    }

    #[test]
    fn scan_covers_every_target() {
        let dir = tempfile::tempdir().unwrap();
        for target in [
            "gas0/conc/pic",
            "gas1/conc/pic",
            "gas0/temp/pic",
            "gas1/temp/pic",
        ] {
            fs::create_dir_all(dir.path().join(target)).unwrap();
        }
        fs::write(dir.path().join("gas0/conc/pic/a.png"), b"aa").unwrap();
        fs::write(dir.path().join("gas1/temp/pic/d.png"), b"dddd").unwrap();

        let cfg = CleanConfig {
            base: dir.path().to_path_buf(),
            params: vec!["conc".into(), "temp".into()],
            gas_count: 2,
        };
        let scans = scan(&cfg).unwrap();

        assert_eq!(scans.len(), 4);
        assert_eq!(total_entries(&scans), 2);
        assert_eq!(total_size(&scans), 6);
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}
