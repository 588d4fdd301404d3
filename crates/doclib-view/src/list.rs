use std::collections::BTreeMap;

use doclib_types::{Category, DocumentRecord, FileReference};
use serde::Serialize;
use tracing::debug;

use crate::admin::ViewCapabilities;
use crate::counters::CategoryCounters;

/// One visible row: its display number and the document it points at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    pub number: usize,
    pub name: String,
    pub file_reference: FileReference,
}

impl ListEntry {
    /// `"<number> - <name>"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.number, self.name)
    }
}

/// Per-row administrator control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Control {
    Rename,
    Delete,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedItem {
    pub label: String,
    pub file_reference: FileReference,
    pub controls: Vec<Control>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSection {
    pub category: Category,
    pub title: String,
    pub items: Vec<RenderedItem>,
}

/// The per-category numbered lists, plus the counters that number new rows.
#[derive(Clone, Debug, Default)]
pub struct DocumentListView {
    sections: BTreeMap<Category, Vec<ListEntry>>,
    counters: CategoryCounters,
}

impl DocumentListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a freshly fetched list.
    ///
    /// Counters are rebuilt first; rows are then appended in registry order
    /// and numbered by their position within the category.
    pub fn load(&mut self, records: &[DocumentRecord]) {
        self.counters.rebuild(records);
        self.sections.clear();
        for record in records {
            let entries = self.sections.entry(record.category).or_default();
            entries.push(ListEntry {
                number: entries.len() + 1,
                name: record.name.clone(),
                file_reference: record.file_reference.clone(),
            });
        }
    }

    /// Append a record the server has just created. Returns its number.
    pub fn apply_created(&mut self, record: &DocumentRecord) -> usize {
        let number = self.counters.increment(record.category);
        self.sections
            .entry(record.category)
            .or_default()
            .push(ListEntry {
                number,
                name: record.name.clone(),
                file_reference: record.file_reference.clone(),
            });
        number
    }

    /// Drop a row the server has just deleted and renumber its category.
    ///
    /// Numbers are re-derived from position (index + 1), not from the
    /// counter, so the category is always numbered 1..N afterwards.
    pub fn apply_removed(&mut self, reference: &FileReference) -> Option<ListEntry> {
        let (category, index) = self.position_of(reference)?;
        let entries = self.sections.get_mut(&category)?;
        let removed = entries.remove(index);
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.number = i + 1;
        }
        self.counters.set(category, entries.len());
        debug!(%category, remaining = entries.len(), "renumbered after removal");
        Some(removed)
    }

    /// Change a row's name. Numbering is untouched.
    pub fn apply_renamed(&mut self, reference: &FileReference, new_name: &str) -> bool {
        match self.position_of(reference) {
            Some((category, index)) => {
                if let Some(entry) = self
                    .sections
                    .get_mut(&category)
                    .and_then(|entries| entries.get_mut(index))
                {
                    entry.name = new_name.to_string();
                }
                true
            }
            None => false,
        }
    }

    pub fn entries(&self, category: Category) -> &[ListEntry] {
        self.sections
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn counters(&self) -> &CategoryCounters {
        &self.counters
    }

    pub fn len(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every category in display order, empty ones included.
    pub fn render(&self, capabilities: ViewCapabilities) -> Vec<RenderedSection> {
        let controls = if capabilities.admin {
            vec![Control::Rename, Control::Delete]
        } else {
            Vec::new()
        };
        Category::ALL
            .into_iter()
            .map(|category| RenderedSection {
                category,
                title: category.title().to_string(),
                items: self
                    .entries(category)
                    .iter()
                    .map(|entry| RenderedItem {
                        label: entry.label(),
                        file_reference: entry.file_reference.clone(),
                        controls: controls.clone(),
                    })
                    .collect(),
            })
            .collect()
    }

    fn position_of(&self, reference: &FileReference) -> Option<(Category, usize)> {
        self.sections.iter().find_map(|(category, entries)| {
            entries
                .iter()
                .position(|e| &e.file_reference == reference)
                .map(|i| (*category, i))
        })
    }
}
