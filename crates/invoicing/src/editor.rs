//! The editing session over a single invoice.

use billforge_core::{Aggregate, AggregateRoot, DomainError, DomainResult};

use crate::fields::{HeaderField, ItemField, RateField};
use crate::invoice::{Invoice, InvoiceCommand};

/// Owns one in-memory invoice and applies field-level edits to it.
///
/// Every edit runs validation, mutation and the totals recomputation to
/// completion before returning; `&mut self` rules out a second edit starting
/// in between. A rejected edit leaves the invoice untouched.
#[derive(Debug, Clone)]
pub struct InvoiceEditor {
    invoice: Invoice,
}

impl InvoiceEditor {
    pub fn new(invoice: Invoice) -> Self {
        let mut invoice = invoice;
        invoice.recompute_totals();
        Self { invoice }
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn into_invoice(self) -> Invoice {
        self.invoice
    }

    /// Apply a command and return the updated invoice.
    pub fn execute(&mut self, command: &InvoiceCommand) -> DomainResult<&Invoice> {
        self.run(command)?;
        Ok(&self.invoice)
    }

    pub fn set_header_field(&mut self, field: HeaderField, value: impl Into<String>) -> &Invoice {
        self.run_infallible(&InvoiceCommand::SetHeaderField {
            field,
            value: value.into(),
        })
    }

    /// Set discount or tax from cell text. Malformed text sets the rate to 0.
    pub fn set_rate_percent(&mut self, field: RateField, raw: &str) -> &Invoice {
        self.run_infallible(&InvoiceCommand::SetRatePercent {
            field,
            raw: raw.to_string(),
        })
    }

    pub fn add_item(&mut self) -> &Invoice {
        self.run_infallible(&InvoiceCommand::AddItem)
    }

    pub fn update_item_field(
        &mut self,
        index: usize,
        field: ItemField,
        raw: &str,
    ) -> DomainResult<&Invoice> {
        self.execute(&InvoiceCommand::UpdateItemField {
            index,
            field,
            raw: raw.to_string(),
        })
    }

    pub fn delete_item(&mut self, index: usize) -> DomainResult<&Invoice> {
        self.execute(&InvoiceCommand::DeleteItem { index })
    }

    pub fn recompute_totals(&mut self) -> &Invoice {
        self.invoice.recompute_totals();
        &self.invoice
    }

    fn run(&mut self, command: &InvoiceCommand) -> Result<(), DomainError> {
        match self.invoice.execute(command) {
            Ok(events) => {
                for event in &events {
                    tracing::debug!(
                        invoice_id = %self.invoice.id(),
                        event_type = event.event_type(),
                        version = self.invoice.version(),
                        "applied invoice edit"
                    );
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    invoice_id = %self.invoice.id(),
                    error = %err,
                    "rejected invoice edit"
                );
                Err(err)
            }
        }
    }

    /// For commands whose `handle` cannot fail.
    fn run_infallible(&mut self, command: &InvoiceCommand) -> &Invoice {
        if let Err(err) = self.run(command) {
            tracing::error!(error = %err, ?command, "infallible invoice edit failed");
        }
        &self.invoice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{DraftDefaults, create_draft};
    use crate::sequence::InvoiceNumberSequence;
    use chrono::NaiveDate;

    fn editor() -> InvoiceEditor {
        let mut seq = InvoiceNumberSequence::new();
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        InvoiceEditor::new(create_draft(&mut seq, &DraftDefaults::default(), today))
    }

    #[test]
    fn grid_edits_keep_totals_in_step() {
        let mut editor = editor();
        editor.add_item();
        editor.update_item_field(0, ItemField::Quantity, "2").unwrap();
        let invoice = editor.update_item_field(0, ItemField::Price, "10").unwrap();
        assert_eq!(invoice.items()[0].amount(), 20.0);
        assert_eq!(invoice.total(), 20.0);

        editor.set_rate_percent(RateField::Discount, "10");
        let invoice = editor.set_rate_percent(RateField::Tax, "5");
        assert!((invoice.total() - 18.9).abs() < 1e-9);
    }

    #[test]
    fn malformed_discount_text_degrades_to_zero() {
        let mut editor = editor();
        let invoice = editor.set_rate_percent(RateField::Discount, "abc");
        assert_eq!(invoice.discount(), 0.0);
        assert_eq!(invoice.total(), 0.0);
    }

    #[test]
    fn out_of_range_update_leaves_items_unchanged() {
        let mut editor = editor();
        editor.add_item();
        editor.add_item();
        let before = editor.invoice().clone();

        let err = editor.update_item_field(5, ItemField::Price, "10").unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(editor.invoice(), &before);
    }

    #[test]
    fn malformed_quantity_counts_as_zero() {
        let mut editor = editor();
        editor.add_item();
        editor.update_item_field(0, ItemField::Price, "10").unwrap();
        let invoice = editor.update_item_field(0, ItemField::Quantity, "two").unwrap();
        assert_eq!(invoice.items()[0].amount(), 0.0);
        assert_eq!(invoice.sub_total(), 0.0);
    }

    #[test]
    fn delete_recomputes_totals() {
        let mut editor = editor();
        for price in ["1", "2", "3"] {
            let index = editor.invoice().items().len();
            editor.add_item();
            editor.update_item_field(index, ItemField::Quantity, "1").unwrap();
            editor.update_item_field(index, ItemField::Price, price).unwrap();
        }
        assert_eq!(editor.invoice().sub_total(), 6.0);

        let invoice = editor.delete_item(1).unwrap();
        assert_eq!(invoice.items().len(), 2);
        assert_eq!(invoice.items()[1].price(), 3.0);
        assert_eq!(invoice.sub_total(), 4.0);
    }

    #[test]
    fn header_fields_are_set_by_name() {
        let mut editor = editor();
        let field: HeaderField = "dueDate".parse().unwrap();
        let invoice = editor.set_header_field(field, "2026-11-30");
        assert_eq!(invoice.due_date(), "2026-11-30");
    }
}
