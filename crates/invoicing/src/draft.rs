//! Drafts: new invoices and working copies of saved ones.

use chrono::NaiveDate;

use billforge_core::InvoiceId;

use crate::invoice::{Invoice, InvoiceHeader, Party};
use crate::sequence::InvoiceNumberSequence;

/// Caller-supplied header values for new drafts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftDefaults {
    pub company_name: String,
    pub due_date: String,
    pub from: Party,
    pub to: Party,
    pub logo_url: String,
    pub signature_url: String,
}

/// Create a new draft dated `today`.
///
/// The id is freshly generated and the invoice number comes from `sequence`,
/// so two drafts from the same sequence never share a number.
pub fn create_draft(
    sequence: &mut InvoiceNumberSequence,
    defaults: &DraftDefaults,
    today: NaiveDate,
) -> Invoice {
    let invoice_no = sequence.next_number(today);
    let id = InvoiceId::generate();

    tracing::debug!(invoice_id = %id, invoice_no = %invoice_no, "created invoice draft");

    Invoice::new(
        id,
        invoice_no,
        InvoiceHeader {
            company_name: defaults.company_name.clone(),
            invoice_date: today.format("%Y-%m-%d").to_string(),
            due_date: defaults.due_date.clone(),
            from: defaults.from.clone(),
            to: defaults.to.clone(),
            logo_url: defaults.logo_url.clone(),
            signature_url: defaults.signature_url.clone(),
        },
    )
}

/// [`create_draft`] dated with the local calendar day.
pub fn create_draft_now(sequence: &mut InvoiceNumberSequence, defaults: &DraftDefaults) -> Invoice {
    create_draft(sequence, defaults, chrono::Local::now().date_naive())
}

/// Working copy of a saved invoice.
///
/// Keeps `id` and invoice number so that saving it overwrites the stored
/// record. Derived fields are recomputed, which repairs payloads stored
/// without them.
pub fn load_for_edit(existing: &Invoice) -> Invoice {
    let mut working = existing.clone();
    working.recompute_totals();
    working
}
