use crate::scanner::{EntryKind, FoundEntry};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io;

pub struct CleanResult {
    pub deleted: Vec<FoundEntry>,
    pub failed: Vec<(FoundEntry, io::Error)>,
}

impl CleanResult {
    pub fn total_cleaned(&self) -> u64 {
        self.deleted.iter().map(|e| e.size_bytes).sum()
    }
}

fn remove_entry(entry: &FoundEntry) -> io::Result<()> {
    match entry.kind {
        EntryKind::File => fs::remove_file(&entry.path),
        EntryKind::Dir => fs::remove_dir_all(&entry.path),
        // Symlinks and other non-regular entries are unlinked in place.
        EntryKind::Other => fs::remove_file(&entry.path),
    }
}

/// Delete every entry, one at a time. A failed deletion is recorded and
/// the loop moves on; nothing stops the remaining entries.
pub fn clean(entries: Vec<FoundEntry>) -> CleanResult {
    let mut deleted = Vec::new();
    let mut failed = Vec::new();

    // Hidden automatically when stderr is not a terminal.
    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:30.red} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for entry in entries {
        pb.set_message(entry.name());
        match remove_entry(&entry) {
            Ok(()) => deleted.push(entry),
            Err(e) => failed.push((entry, e)),
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    CleanResult { deleted, failed }
}
