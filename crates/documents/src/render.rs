//! Rendering of an [`InvoiceDocument`] into a downloadable file.

use tera::{Context, Tera};
use thiserror::Error;

use crate::document::InvoiceDocument;

const INVOICE_TEMPLATE_NAME: &str = "invoice.html";
const INVOICE_TEMPLATE: &str = include_str!("../templates/invoice.html");

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The layout requires a signature image and the invoice has none.
    #[error("invoice has no signature image")]
    MissingSignature,

    #[error("template rendering failed: {0}")]
    Template(String),
}

/// A rendered file, ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Produces a file from a document projection. Never mutates the invoice.
pub trait DocumentRenderer {
    fn render(&self, document: &InvoiceDocument) -> Result<RenderedDocument, RenderError>;
}

/// Fixed-layout HTML output.
#[derive(Debug)]
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(INVOICE_TEMPLATE_NAME, INVOICE_TEMPLATE)
            .map_err(|e| RenderError::Template(e.to_string()))?;
        Ok(Self { tera })
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn render(&self, document: &InvoiceDocument) -> Result<RenderedDocument, RenderError> {
        if document.signature_url.trim().is_empty() {
            return Err(RenderError::MissingSignature);
        }

        let context = Context::from_serialize(document)
            .map_err(|e| RenderError::Template(e.to_string()))?;
        let html = self
            .tera
            .render(INVOICE_TEMPLATE_NAME, &context)
            .map_err(|e| RenderError::Template(e.to_string()))?;

        tracing::debug!(invoice_no = %document.invoice_no, bytes = html.len(), "rendered invoice document");

        Ok(RenderedDocument {
            file_name: format!("{}.html", document.invoice_no),
            content_type: "text/html; charset=utf-8",
            bytes: html.into_bytes(),
        })
    }
}
