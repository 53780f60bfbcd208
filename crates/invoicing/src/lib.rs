//! Invoice computation engine.
//!
//! Owns the in-memory invoice document, applies field-level edits to its
//! header and line items, and recomputes the derived totals after every edit.
//! Pure domain logic: no IO, no storage, no rendering.

pub mod draft;
pub mod editor;
pub mod fields;
pub mod invoice;
pub mod numeric;
pub mod sequence;

pub use draft::{DraftDefaults, create_draft, create_draft_now, load_for_edit};
pub use editor::InvoiceEditor;
pub use fields::{HeaderField, ItemField, RateField};
pub use invoice::{
    Invoice, InvoiceCommand, InvoiceEvent, InvoiceHeader, ItemChange, LineItem, Party, Totals,
};
pub use numeric::{format_amount, parse_lenient, parse_numeric};
pub use sequence::InvoiceNumberSequence;
