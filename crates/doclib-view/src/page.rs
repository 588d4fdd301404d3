use doclib_types::{DocumentRecord, FileReference};
use serde::Serialize;

use crate::admin::{AdminGate, ViewCapabilities};
use crate::list::{DocumentListView, RenderedSection};
use crate::upload::UploadDraft;
use crate::viewer::PdfViewer;

/// Everything drawn for one render pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub sections: Vec<RenderedSection>,
    pub can_upload: bool,
    pub viewer: Option<FileReference>,
}

/// The whole document library screen.
///
/// Holds the list, the viewer, the upload dialog and the current
/// capabilities as component-local state. Every mutating method takes a
/// value the server has already confirmed.
#[derive(Debug, Default)]
pub struct LibraryPage {
    list: DocumentListView,
    viewer: PdfViewer,
    draft: UploadDraft,
    capabilities: ViewCapabilities,
}

impl LibraryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial load from `GET /documents`.
    pub fn load(&mut self, records: &[DocumentRecord]) {
        self.list.load(records);
    }

    /// Try the administrator password. On success the list is rebuilt from
    /// `records`, a fresh `GET /documents`, since the admin view is
    /// re-rendered from scratch. A failed attempt leaves the current
    /// capabilities as they were.
    pub fn unlock_admin(&mut self, gate: &AdminGate, attempt: &str, records: &[DocumentRecord]) -> bool {
        let granted = gate.unlock(attempt);
        if granted.admin {
            self.capabilities = granted;
            self.list.load(records);
        }
        granted.admin
    }

    pub fn capabilities(&self) -> ViewCapabilities {
        self.capabilities
    }

    /// A confirmed `POST /upload`: append the row and clear the dialog.
    pub fn upload_confirmed(&mut self, record: &DocumentRecord) {
        self.list.apply_created(record);
        self.draft.reset();
    }

    /// A confirmed `PUT /documents`.
    pub fn rename_confirmed(&mut self, record: &DocumentRecord) {
        self.list.apply_renamed(&record.file_reference, &record.name);
    }

    /// A confirmed `DELETE /documents`. Closes the viewer if it was showing
    /// the deleted document.
    pub fn delete_confirmed(&mut self, reference: &FileReference) {
        self.list.apply_removed(reference);
        if self.viewer.target() == Some(reference) {
            self.viewer.close();
        }
    }

    pub fn list(&self) -> &DocumentListView {
        &self.list
    }

    pub fn viewer_mut(&mut self) -> &mut PdfViewer {
        &mut self.viewer
    }

    pub fn draft_mut(&mut self) -> &mut UploadDraft {
        &mut self.draft
    }

    pub fn render(&self) -> RenderedPage {
        RenderedPage {
            sections: self.list.render(self.capabilities),
            can_upload: self.capabilities.admin,
            viewer: self.viewer.target().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclib_types::{Category, Timestamp};

    fn record(name: &str) -> DocumentRecord {
        DocumentRecord::new(
            name,
            Category::TouchComp,
            FileReference::new(format!("/uploads/{name}.pdf")),
            Timestamp::now(),
        )
    }

    #[test]
    fn viewer_page_has_no_admin_affordances() {
        let mut page = LibraryPage::new();
        page.load(&[record("a")]);
        let rendered = page.render();
        assert!(!rendered.can_upload);
        assert!(rendered.sections[0].items[0].controls.is_empty());
    }

    #[test]
    fn unlock_rebuilds_from_fresh_list() {
        let mut page = LibraryPage::new();
        page.load(&[record("a")]);

        let gate = AdminGate::new("pw");
        assert!(!page.unlock_admin(&gate, "nope", &[]));
        assert_eq!(page.list().len(), 1);

        let fresh = vec![record("a"), record("b")];
        assert!(page.unlock_admin(&gate, "pw", &fresh));
        let rendered = page.render();
        assert!(rendered.can_upload);
        assert_eq!(rendered.sections[0].items.len(), 2);
        assert!(!rendered.sections[0].items[1].controls.is_empty());
    }

    #[test]
    fn failed_retry_keeps_admin_view() {
        let mut page = LibraryPage::new();
        let gate = AdminGate::new("pw");
        assert!(page.unlock_admin(&gate, "pw", &[record("a")]));

        assert!(!page.unlock_admin(&gate, "typo", &[]));
        assert!(page.capabilities().admin);
        assert_eq!(page.list().len(), 1);
        assert!(page.render().can_upload);
    }

    #[test]
    fn confirmed_changes_flow_through() {
        let mut page = LibraryPage::new();
        page.load(&[record("a"), record("b")]);

        page.upload_confirmed(&record("c"));
        let mut renamed = record("b");
        renamed.rename("b2");
        page.rename_confirmed(&renamed);

        let a = FileReference::new("/uploads/a.pdf");
        page.viewer_mut().open(a.clone());
        page.delete_confirmed(&a);

        let rendered = page.render();
        let labels: Vec<_> = rendered.sections[0].items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["1 - b2", "2 - c"]);
        assert!(rendered.viewer.is_none());
    }
}
