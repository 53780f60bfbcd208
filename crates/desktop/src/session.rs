//! An invoice open in the editor, new or existing.

use billforge_core::{DomainResult, InvoiceId};
use billforge_invoicing::{Invoice, InvoiceCommand, InvoiceEditor};

use crate::attachments::{AttachmentError, ImageTarget, ImageUpload};
use crate::notice::Notice;

/// Whether saving should append (`New`) or replace (`Edit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    New,
    Edit,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    mode: EditMode,
    editor: InvoiceEditor,
}

impl EditSession {
    pub fn new(mode: EditMode, invoice: Invoice) -> Self {
        Self {
            mode,
            editor: InvoiceEditor::new(invoice),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn invoice(&self) -> &Invoice {
        self.editor.invoice()
    }

    pub fn id(&self) -> &InvoiceId {
        self.editor.invoice().id_typed()
    }

    /// Direct access to the field-level edit operations.
    pub fn editor_mut(&mut self) -> &mut InvoiceEditor {
        &mut self.editor
    }

    pub fn apply(&mut self, edit: &InvoiceCommand) -> DomainResult<&Invoice> {
        self.editor.execute(edit)
    }

    /// Apply an edit, reporting a rejection as a notice instead of an error.
    pub fn commit(&mut self, edit: &InvoiceCommand) -> Option<Notice> {
        match self.editor.execute(edit) {
            Ok(_) => None,
            Err(err) => Some(Notice::EditRejected(err.to_string())),
        }
    }

    /// Validate an uploaded image and store it as the logo or signature.
    pub fn attach_image(
        &mut self,
        target: ImageTarget,
        upload: &ImageUpload,
    ) -> Result<&Invoice, AttachmentError> {
        let data_url = upload.to_data_url().inspect_err(|err| {
            tracing::warn!(invoice_id = %self.id(), ?target, error = %err, "rejected image upload");
        })?;
        Ok(self.editor.set_header_field(target.header_field(), data_url))
    }

    pub(crate) fn mark_saved(&mut self) {
        self.mode = EditMode::Edit;
    }
}
