//! `billforge-desktop`
//!
//! **Responsibility:** the session shell around the invoice engine.
//!
//! This crate provides:
//! - Environment configuration and draft defaults
//! - Edit sessions (new vs. existing invoice) with image attachments
//! - Save/update/delete/export workflows reported as [`Notice`]s
//!
//! There is no view layer here; an edit surface drives [`InvoiceApp`].

pub mod app;
pub mod attachments;
pub mod config;
pub mod input;
pub mod notice;
pub mod session;

pub use app::{InvoiceApp, InvoiceSummary, open_sqlite};
pub use attachments::{AttachmentError, ImageTarget, ImageUpload, MAX_IMAGE_BYTES};
pub use config::DesktopConfig;
pub use input::accepts_numeric_key;
pub use notice::Notice;
pub use session::{EditMode, EditSession};

/// Install logging and open the SQLite-backed app described by `config`.
pub fn bootstrap(
    config: &DesktopConfig,
) -> anyhow::Result<InvoiceApp<billforge_infra::SqliteKeyValueStore>> {
    billforge_observability::init_with_format(config.log_format);
    let app = open_sqlite(config)?;
    tracing::info!(data_dir = ?config.data_dir, "billforge desktop ready");
    Ok(app)
}
