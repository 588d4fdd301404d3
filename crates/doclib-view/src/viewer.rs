use doclib_types::FileReference;

/// The modal PDF viewer: either closed or showing one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PdfViewer {
    target: Option<FileReference>,
}

impl PdfViewer {
    pub fn open(&mut self, reference: FileReference) {
        self.target = Some(reference);
    }

    /// Close the viewer and clear its source.
    pub fn close(&mut self) {
        self.target = None;
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&FileReference> {
        self.target.as_ref()
    }
}
