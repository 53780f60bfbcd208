//! The invoice list and the save/delete/export workflows around it.

use core::fmt;

use anyhow::Context;
use chrono::NaiveDate;

use billforge_core::{DomainError, DomainResult, InvoiceId};
use billforge_documents::{
    DocumentOptions, DocumentRenderer, HtmlRenderer, InvoiceDocument, RenderedDocument,
};
use billforge_infra::{InvoiceRepository, KeyValueStore, SqliteKeyValueStore};
use billforge_invoicing::{
    DraftDefaults, Invoice, InvoiceCommand, InvoiceNumberSequence, create_draft, create_draft_now,
    load_for_edit,
};

use crate::attachments::{ImageTarget, ImageUpload};
use crate::config::DesktopConfig;
use crate::notice::Notice;
use crate::session::{EditMode, EditSession};

/// One row of the invoice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    pub label: String,
}

impl InvoiceSummary {
    fn of(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id_typed().clone(),
            label: format!("{} - {}", invoice.invoice_no(), invoice.recipient().name),
        }
    }
}

impl fmt::Display for InvoiceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Application state for one process: storage, numbering and rendering.
pub struct InvoiceApp<S> {
    repository: InvoiceRepository<S>,
    sequence: InvoiceNumberSequence,
    defaults: DraftDefaults,
    document_options: DocumentOptions,
    renderer: HtmlRenderer,
}

impl<S> InvoiceApp<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S, config: &DesktopConfig) -> anyhow::Result<Self> {
        let renderer = HtmlRenderer::new().context("failed to load invoice template")?;
        Ok(Self {
            repository: InvoiceRepository::new(store),
            sequence: InvoiceNumberSequence::new(),
            defaults: config.draft_defaults.clone(),
            document_options: config.document_options.clone(),
            renderer,
        })
    }

    /// Replace the invoice-number sequence (e.g. to resume numbering).
    pub fn with_sequence(mut self, sequence: InvoiceNumberSequence) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn repository(&self) -> &InvoiceRepository<S> {
        &self.repository
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.repository.load()
    }

    pub fn summaries(&self) -> Vec<InvoiceSummary> {
        self.repository.load().iter().map(InvoiceSummary::of).collect()
    }

    pub fn start_new(&mut self) -> EditSession {
        let invoice = create_draft_now(&mut self.sequence, &self.defaults);
        EditSession::new(EditMode::New, invoice)
    }

    pub fn start_new_on(&mut self, today: NaiveDate) -> EditSession {
        let invoice = create_draft(&mut self.sequence, &self.defaults, today);
        EditSession::new(EditMode::New, invoice)
    }

    pub fn start_edit(&self, id: &InvoiceId) -> DomainResult<EditSession> {
        let stored = self.repository.find(id).ok_or_else(DomainError::not_found)?;
        Ok(EditSession::new(EditMode::Edit, load_for_edit(&stored)))
    }

    pub fn commit_edit(&self, session: &mut EditSession, edit: &InvoiceCommand) -> Option<Notice> {
        session.commit(edit)
    }

    /// Store an uploaded logo or signature on the session's invoice. A
    /// refused image is reported and leaves the invoice as it was.
    pub fn attach_image(
        &self,
        session: &mut EditSession,
        target: ImageTarget,
        upload: &ImageUpload,
    ) -> Option<Notice> {
        session
            .attach_image(target, upload)
            .err()
            .map(|err| Notice::AttachmentRejected(err.to_string()))
    }

    /// Persist the session's invoice. A failed write leaves the session as
    /// it was so the user can retry.
    pub fn save(&self, session: &mut EditSession) -> Notice {
        let invoice = session.invoice().clone();
        let result = match session.mode() {
            EditMode::New => self.repository.add(invoice),
            EditMode::Edit => self.repository.update(invoice),
        };

        match result {
            Ok(_) => {
                let notice = match session.mode() {
                    EditMode::New => Notice::Saved,
                    EditMode::Edit => Notice::Updated,
                };
                tracing::info!(invoice_id = %session.id(), mode = ?session.mode(), "invoice saved");
                session.mark_saved();
                notice
            }
            Err(err) => {
                tracing::error!(invoice_id = %session.id(), error = %err, "failed to save invoice");
                Notice::SaveFailed(err.to_string())
            }
        }
    }

    pub fn delete(&self, id: &InvoiceId) -> Notice {
        match self.repository.delete(id) {
            Ok(remaining) => {
                tracing::info!(invoice_id = %id, remaining = remaining.len(), "invoice deleted");
                Notice::Deleted
            }
            Err(err) => {
                tracing::error!(invoice_id = %id, error = %err, "failed to delete invoice");
                Notice::SaveFailed(err.to_string())
            }
        }
    }

    pub fn preview(&self, id: &InvoiceId) -> DomainResult<InvoiceDocument> {
        let stored = self.repository.find(id).ok_or_else(DomainError::not_found)?;
        Ok(self.document_of(&stored))
    }

    pub fn preview_session(&self, session: &EditSession) -> InvoiceDocument {
        self.document_of(session.invoice())
    }

    pub fn export(&self, id: &InvoiceId) -> Result<RenderedDocument, Notice> {
        let stored = self
            .repository
            .find(id)
            .ok_or_else(|| Notice::ExportFailed(DomainError::not_found().to_string()))?;
        self.export_invoice(&stored)
    }

    pub fn export_session(&self, session: &EditSession) -> Result<RenderedDocument, Notice> {
        self.export_invoice(session.invoice())
    }

    fn export_invoice(&self, invoice: &Invoice) -> Result<RenderedDocument, Notice> {
        self.renderer
            .render(&self.document_of(invoice))
            .map_err(|err| {
                tracing::warn!(invoice_id = %invoice.id_typed(), error = %err, "export failed");
                Notice::ExportFailed(err.to_string())
            })
    }

    fn document_of(&self, invoice: &Invoice) -> InvoiceDocument {
        InvoiceDocument::from_invoice(invoice, &self.document_options)
    }
}

/// Open the app over the SQLite store named by `config`.
pub fn open_sqlite(config: &DesktopConfig) -> anyhow::Result<InvoiceApp<SqliteKeyValueStore>> {
    let store = SqliteKeyValueStore::open(config.db_path()?)?;
    InvoiceApp::new(store, config)
}
