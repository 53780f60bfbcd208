//! Read-only projection of an invoice into what a fixed-layout document shows.

use serde::Serialize;

use billforge_invoicing::{Invoice, Party, format_amount};

/// Display fallbacks used when an invoice leaves a field empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Shown when the invoice has no due date.
    pub due_date_placeholder: String,
    /// Shown when the recipient has no name.
    pub recipient_placeholder: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            due_date_placeholder: "2025-11-01".to_string(),
            recipient_placeholder: "Name".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRow {
    pub quantity: String,
    pub description: String,
    pub price: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyLines {
    pub name: String,
    pub address: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalLine {
    pub label: String,
    pub value: String,
}

/// Everything a renderer needs, with amounts already rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceDocument {
    pub company_name: String,
    pub logo_url: Option<String>,
    pub invoice_no: String,
    pub invoice_date: String,
    pub due_date: String,
    pub rows: Vec<DocumentRow>,
    pub from: PartyLines,
    pub to: PartyLines,
    pub totals: Vec<TotalLine>,
    pub signature_url: String,
}

impl InvoiceDocument {
    pub fn from_invoice(invoice: &Invoice, options: &DocumentOptions) -> Self {
        let rows = invoice
            .items()
            .iter()
            .map(|item| DocumentRow {
                quantity: item.quantity().to_string(),
                description: item.description().to_string(),
                price: item.price().to_string(),
                amount: format_amount(item.amount()),
            })
            .collect();

        let mut to = party_lines(invoice.recipient());
        if to.name.is_empty() {
            to.name = options.recipient_placeholder.clone();
        }

        Self {
            company_name: invoice.company_name().to_string(),
            logo_url: non_empty(invoice.logo_url()),
            invoice_no: invoice.invoice_no().to_string(),
            invoice_date: invoice.invoice_date().to_string(),
            due_date: non_empty(invoice.due_date())
                .unwrap_or_else(|| options.due_date_placeholder.clone()),
            rows,
            from: party_lines(invoice.sender()),
            to,
            totals: vec![
                TotalLine {
                    label: "SUB-TOTAL".to_string(),
                    value: format_amount(invoice.sub_total()),
                },
                TotalLine {
                    label: format!("DISCOUNT ({}%)", invoice.discount()),
                    value: format_amount(invoice.discount_amount()),
                },
                TotalLine {
                    label: format!("TAX ({}%)", invoice.tax()),
                    value: format_amount(invoice.tax_amount()),
                },
                TotalLine {
                    label: "TOTAL".to_string(),
                    value: format_amount(invoice.total()),
                },
            ],
            signature_url: invoice.signature_url().to_string(),
        }
    }
}

fn party_lines(party: &Party) -> PartyLines {
    PartyLines {
        name: party.name.clone(),
        address: party.address.clone(),
        state: party.state.clone(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_invoice;

    #[test]
    fn amounts_are_rounded_only_in_the_projection() {
        let invoice = sample_invoice();
        let doc = InvoiceDocument::from_invoice(&invoice, &DocumentOptions::default());

        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.rows[0].quantity, "2");
        assert_eq!(doc.rows[0].price, "10");
        assert_eq!(doc.rows[0].amount, "20.00");

        let values: Vec<&str> = doc.totals.iter().map(|l| l.value.as_str()).collect();
        assert_eq!(values, ["20.00", "2.00", "0.90", "18.90"]);
        assert_eq!(doc.totals[1].label, "DISCOUNT (10%)");
        assert_eq!(doc.totals[2].label, "TAX (5%)");

        assert!((invoice.total() - 18.9).abs() < 1e-9);
    }

    #[test]
    fn placeholders_fill_empty_fields() {
        let invoice = sample_invoice();
        let options = DocumentOptions {
            due_date_placeholder: "on receipt".to_string(),
            ..DocumentOptions::default()
        };
        let doc = InvoiceDocument::from_invoice(&invoice, &options);

        assert_eq!(doc.due_date, "on receipt");
        assert_eq!(doc.to.name, "Name");
        assert_eq!(doc.logo_url, None);
    }
}
