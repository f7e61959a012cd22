use crate::scanner::{format_size, EntryKind, FoundEntry, TargetScan};
use console::{style, Key, Term};
use std::io;

#[derive(Debug, Clone)]
pub struct GroupedItem {
    pub entry: FoundEntry,
    pub selected: bool,
}

/// One pic directory and its entries, toggleable as a unit.
#[derive(Debug)]
pub struct Group {
    pub label: String,
    pub items: Vec<GroupedItem>,
    pub collapsed: bool,
}

impl Group {
    pub fn total_size(&self) -> u64 {
        self.items.iter().map(|i| i.entry.size_bytes).sum()
    }

    pub fn all_selected(&self) -> bool {
        self.items.iter().all(|i| i.selected)
    }

    pub fn none_selected(&self) -> bool {
        self.items.iter().all(|i| !i.selected)
    }

    pub fn toggle_all(&mut self) {
        let new_state = !self.all_selected();
        for item in &mut self.items {
            item.selected = new_state;
        }
    }
}

pub struct GroupedSelector {
    groups: Vec<Group>,
    cursor: usize,
    max_name_len: usize,
}

enum CursorPosition {
    GroupHeader(usize),
    Item(usize, usize),
}

fn item_display(entry: &FoundEntry) -> String {
    match entry.kind {
        EntryKind::Dir => format!("{}/", entry.name()),
        _ => entry.name(),
    }
}

impl GroupedSelector {
    /// Everything starts selected, so confirming without touching
    /// anything wipes every entry. Empty pic directories are not shown.
    pub fn new(scans: Vec<TargetScan>) -> Self {
        let max_name_len = scans
            .iter()
            .flat_map(|s| s.entries.iter())
            .map(|e| item_display(e).len())
            .max()
            .unwrap_or(30);

        let groups = scans
            .into_iter()
            .filter(|s| !s.entries.is_empty())
            .map(|s| {
                let items = s
                    .entries
                    .into_iter()
                    .map(|entry| GroupedItem {
                        entry,
                        selected: true,
                    })
                    .collect();
                Group {
                    label: s.target.label(),
                    items,
                    collapsed: false,
                }
            })
            .collect();

        Self {
            groups,
            cursor: 0,
            max_name_len,
        }
    }

    fn total_lines(&self) -> usize {
        self.groups
            .iter()
            .map(|g| {
                if g.collapsed {
                    1
                } else {
                    1 + g.items.len()
                }
            })
            .sum()
    }

    fn cursor_position(&self) -> CursorPosition {
        let mut line = 0;
        for (gi, group) in self.groups.iter().enumerate() {
            if line == self.cursor {
                return CursorPosition::GroupHeader(gi);
            }
            line += 1;
            if !group.collapsed {
                for ii in 0..group.items.len() {
                    if line == self.cursor {
                        return CursorPosition::Item(gi, ii);
                    }
                    line += 1;
                }
            }
        }
        CursorPosition::GroupHeader(0)
    }

    fn render(&self, term: &Term) -> io::Result<()> {
        let mut output = String::new();

        for (gi, group) in self.groups.iter().enumerate() {
            let is_group_cursor = matches!(self.cursor_position(), CursorPosition::GroupHeader(i) if i == gi);

            // Group header
            let checkbox = if group.all_selected() {
                style("[✓]").green()
            } else if group.none_selected() {
                style("[ ]").dim()
            } else {
                style("[~]").yellow()
            };

            let collapse_indicator = if group.collapsed { "▶" } else { "▼" };

            let header = format!(
                "{} {} {} ({} entries, {})",
                checkbox,
                collapse_indicator,
                group.label,
                group.items.len(),
                format_size(group.total_size())
            );

            if is_group_cursor {
                output.push_str(&format!("{}\n", style(header).reverse()));
            } else {
                output.push_str(&format!("{}\n", style(header).bold()));
            }

            // Items (if not collapsed)
            if !group.collapsed {
                for (ii, item) in group.items.iter().enumerate() {
                    let is_item_cursor =
                        matches!(self.cursor_position(), CursorPosition::Item(g, i) if g == gi && i == ii);

                    let checkbox = if item.selected {
                        style("  [✓]").green()
                    } else {
                        style("  [ ]").dim()
                    };

                    let line = format!(
                        "{} {:<width$}  {:>10}",
                        checkbox,
                        item_display(&item.entry),
                        item.entry.size_human(),
                        width = self.max_name_len
                    );

                    if is_item_cursor {
                        output.push_str(&format!("{}\n", style(line).reverse()));
                    } else {
                        output.push_str(&format!("{}\n", line));
                    }
                }
            }
        }

        // Instructions
        output.push_str(&format!(
            "\n{} navigate  {} toggle  {} expand/collapse  {} confirm\n",
            style("↑↓").cyan(),
            style("Space").cyan(),
            style("Tab").cyan(),
            style("Enter").cyan()
        ));

        term.clear_screen()?;
        term.write_str(&output)?;

        Ok(())
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    fn move_down(&mut self) {
        let total = self.total_lines();
        if self.cursor + 1 < total {
            self.cursor += 1;
        }
    }

    fn toggle_current(&mut self) {
        match self.cursor_position() {
            CursorPosition::GroupHeader(gi) => {
                self.groups[gi].toggle_all();
            }
            CursorPosition::Item(gi, ii) => {
                self.groups[gi].items[ii].selected = !self.groups[gi].items[ii].selected;
            }
        }
    }

    fn toggle_collapse(&mut self) {
        if let CursorPosition::GroupHeader(gi) = self.cursor_position() {
            self.groups[gi].collapsed = !self.groups[gi].collapsed;
        }
    }

    pub fn run(mut self) -> io::Result<Vec<FoundEntry>> {
        let term = Term::stderr();
        term.hide_cursor()?;

        loop {
            self.render(&term)?;

            match term.read_key()? {
                Key::ArrowUp | Key::Char('k') => self.move_up(),
                Key::ArrowDown | Key::Char('j') => self.move_down(),
                Key::Char(' ') => self.toggle_current(),
                Key::Tab => self.toggle_collapse(),
                Key::Enter => break,
                Key::Escape | Key::Char('q') => {
                    term.show_cursor()?;
                    term.clear_screen()?;
                    return Ok(Vec::new());
                }
                _ => {}
            }
        }

        term.show_cursor()?;
        term.clear_screen()?;

        let selected: Vec<FoundEntry> = self
            .groups
            .into_iter()
            .flat_map(|g| g.items)
            .filter(|i| i.selected)
            .map(|i| i.entry)
            .collect();

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(name: &str, size: u64) -> FoundEntry {
        FoundEntry {
            path: PathBuf::from(name),
            kind: EntryKind::File,
            size_bytes: size,
        }
    }

    fn group(names: &[(&str, u64)]) -> Group {
        Group {
            label: "gas0/conc/pic".into(),
            items: names
                .iter()
                .map(|&(n, s)| GroupedItem {
                    entry: entry(n, s),
                    selected: true,
                })
                .collect(),
            collapsed: false,
        }
    }

    #[test]
    fn group_toggle_flips_every_item() {
        let mut g = group(&[("a.png", 1), ("b.png", 2)]);
        assert!(g.all_selected());

        g.toggle_all();
        assert!(g.none_selected());

        g.items[0].selected = true;
        // Mixed state toggles back to everything selected.
        g.toggle_all();
        assert!(g.all_selected());
    }

    #[test]
    fn group_size_sums_items() {
        let g = group(&[("a.png", 10), ("b.png", 32)]);
        assert_eq!(g.total_size(), 42);
    }

    #[test]
    fn directories_render_with_a_trailing_slash() {
        let e = FoundEntry {
            path: PathBuf::from("sub"),
            kind: EntryKind::Dir,
            size_bytes: 0,
        };
        assert_eq!(item_display(&e), "sub/");
    }
}
