//! Document rendering for finished invoices.
//!
//! A pure read-only projection: nothing here mutates an invoice.

pub mod document;
pub mod render;

pub use document::{DocumentOptions, DocumentRow, InvoiceDocument, PartyLines, TotalLine};
pub use render::{DocumentRenderer, HtmlRenderer, RenderError, RenderedDocument};

#[cfg(test)]
pub(crate) mod test_support {
    use billforge_invoicing::{
        DraftDefaults, HeaderField, Invoice, InvoiceEditor, InvoiceNumberSequence, ItemField,
        Party, RateField, create_draft,
    };
    use chrono::NaiveDate;

    /// One item (2 x 10), 10% discount, 5% tax, signed, no due date.
    pub fn sample_invoice() -> Invoice {
        let mut seq = InvoiceNumberSequence::new();
        let defaults = DraftDefaults {
            company_name: "Acme Widgets".to_string(),
            from: Party::new("Acme Widgets Ltd", "1 Main St", "Lagos"),
            ..DraftDefaults::default()
        };
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();

        let mut editor = InvoiceEditor::new(create_draft(&mut seq, &defaults, today));
        editor.add_item();
        editor.update_item_field(0, ItemField::Quantity, "2").unwrap();
        editor.update_item_field(0, ItemField::Price, "10").unwrap();
        editor.update_item_field(0, ItemField::Description, "Bolts").unwrap();
        editor.set_rate_percent(RateField::Discount, "10");
        editor.set_rate_percent(RateField::Tax, "5");
        editor.set_header_field(HeaderField::SignatureUrl, "data:image/png;base64,iVBORw0KGgo=");
        editor.into_invoice()
    }
}
