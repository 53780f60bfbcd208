use serde::{Deserialize, Serialize};

use billforge_core::{Aggregate, AggregateRoot, DomainError, InvoiceId, ValueObject};

use crate::fields::{HeaderField, ItemField, RateField};
use crate::numeric::{deserialize_lenient, parse_lenient};

/// One billable row on an invoice.
///
/// `amount` is derived: it is always `quantity * price` and is rewritten
/// whenever either operand changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    quantity: f64,
    #[serde(default)]
    description: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    price: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    amount: f64,
    #[serde(default)]
    name: String,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        quantity: f64,
        price: f64,
    ) -> Self {
        Self {
            quantity,
            description: description.into(),
            price,
            amount: quantity * price,
            name: name.into(),
        }
    }

    /// A freshly added grid row: zero numbers, empty text.
    pub fn blank() -> Self {
        Self::new("", "", 0.0, 0.0)
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn recompute_amount(&mut self) {
        self.amount = self.quantity * self.price;
    }
}

impl ValueObject for LineItem {}

/// Sender or recipient block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub state: String,
}

impl Party {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            state: state.into(),
        }
    }
}

impl ValueObject for Party {}

/// Derived aggregate amounts, computed together from one snapshot of
/// items, discount and tax.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub sub_total: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub total: f64,
}

impl Totals {
    /// Derive totals. Total for every numeric input; nothing is clamped
    /// except the discount, which can never exceed the subtotal.
    pub fn derive(items: &[LineItem], discount: f64, tax: f64) -> Self {
        let sub_total = items.iter().fold(0.0, |acc, item| acc + item.amount);
        // A zero rate yields a zero amount even when the subtotal overflowed.
        let discount_amount = if discount == 0.0 {
            0.0
        } else {
            (discount / 100.0 * sub_total).min(sub_total)
        };
        let taxable_amount = sub_total - discount_amount;
        let tax_amount = if tax == 0.0 {
            0.0
        } else {
            tax / 100.0 * taxable_amount
        };

        Self {
            sub_total,
            discount_amount,
            tax_amount,
            total: taxable_amount + tax_amount,
        }
    }

    pub fn taxable_amount(&self) -> f64 {
        self.sub_total - self.discount_amount
    }
}

/// Aggregate root: Invoice.
///
/// Serialized with the camelCase keys of the stored `{ "invoices": [...] }`
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    id: InvoiceId,
    #[serde(default)]
    company_name: String,
    invoice_no: String,
    #[serde(default)]
    invoice_date: String,
    #[serde(default)]
    due_date: String,
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default)]
    from: Party,
    #[serde(default)]
    to: Party,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    sub_total: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    discount: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    tax: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    discount_amount: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    tax_amount: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    total: f64,
    #[serde(default)]
    logo_url: String,
    #[serde(default)]
    signature_url: String,
    #[serde(skip)]
    version: u64,
}

/// Header values an invoice starts out with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceHeader {
    pub company_name: String,
    pub invoice_date: String,
    pub due_date: String,
    pub from: Party,
    pub to: Party,
    pub logo_url: String,
    pub signature_url: String,
}

impl Invoice {
    /// A new invoice with no items and zeroed totals.
    pub fn new(id: InvoiceId, invoice_no: impl Into<String>, header: InvoiceHeader) -> Self {
        Self {
            id,
            company_name: header.company_name,
            invoice_no: invoice_no.into(),
            invoice_date: header.invoice_date,
            due_date: header.due_date,
            items: Vec::new(),
            from: header.from,
            to: header.to,
            sub_total: 0.0,
            discount: 0.0,
            tax: 0.0,
            discount_amount: 0.0,
            tax_amount: 0.0,
            total: 0.0,
            logo_url: header.logo_url,
            signature_url: header.signature_url,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> &InvoiceId {
        &self.id
    }

    pub fn invoice_no(&self) -> &str {
        &self.invoice_no
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn invoice_date(&self) -> &str {
        &self.invoice_date
    }

    pub fn due_date(&self) -> &str {
        &self.due_date
    }

    pub fn logo_url(&self) -> &str {
        &self.logo_url
    }

    pub fn signature_url(&self) -> &str {
        &self.signature_url
    }

    /// The `from` block.
    pub fn sender(&self) -> &Party {
        &self.from
    }

    /// The `to` block.
    pub fn recipient(&self) -> &Party {
        &self.to
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn tax(&self) -> f64 {
        self.tax
    }

    pub fn sub_total(&self) -> f64 {
        self.sub_total
    }

    pub fn discount_amount(&self) -> f64 {
        self.discount_amount
    }

    pub fn taxable_amount(&self) -> f64 {
        self.totals().taxable_amount()
    }

    pub fn tax_amount(&self) -> f64 {
        self.tax_amount
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// The stored derived fields.
    pub fn totals(&self) -> Totals {
        Totals {
            sub_total: self.sub_total,
            discount_amount: self.discount_amount,
            tax_amount: self.tax_amount,
            total: self.total,
        }
    }

    /// Rewrite every derived field from the current items, discount and tax.
    ///
    /// Called as the last step of every item or rate edit. Idempotent: a
    /// second call without an intervening edit leaves the invoice unchanged.
    pub fn recompute_totals(&mut self) {
        for item in &mut self.items {
            item.recompute_amount();
        }
        let totals = Totals::derive(&self.items, self.discount, self.tax);
        self.sub_total = totals.sub_total;
        self.discount_amount = totals.discount_amount;
        self.tax_amount = totals.tax_amount;
        self.total = totals.total;
    }

    fn header_field_mut(&mut self, field: HeaderField) -> &mut String {
        match field {
            HeaderField::CompanyName => &mut self.company_name,
            HeaderField::InvoiceDate => &mut self.invoice_date,
            HeaderField::DueDate => &mut self.due_date,
            HeaderField::LogoUrl => &mut self.logo_url,
            HeaderField::SignatureUrl => &mut self.signature_url,
            HeaderField::FromName => &mut self.from.name,
            HeaderField::FromAddress => &mut self.from.address,
            HeaderField::FromState => &mut self.from.state,
            HeaderField::ToName => &mut self.to.name,
            HeaderField::ToAddress => &mut self.to.address,
            HeaderField::ToState => &mut self.to.state,
        }
    }
}

impl AggregateRoot for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Field-level edits, as issued by the edit surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InvoiceCommand {
    SetHeaderField { field: HeaderField, value: String },
    SetRatePercent { field: RateField, raw: String },
    AddItem,
    UpdateItemField { index: usize, field: ItemField, raw: String },
    DeleteItem { index: usize },
}

/// A line-item cell change, already parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemChange {
    Quantity(f64),
    Price(f64),
    Description(String),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InvoiceEvent {
    HeaderFieldSet { field: HeaderField, value: String },
    RatePercentSet { field: RateField, value: f64 },
    ItemAdded,
    ItemChanged { index: usize, change: ItemChange },
    ItemDeleted { index: usize },
}

impl InvoiceEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            InvoiceEvent::HeaderFieldSet { .. } => "invoicing.invoice.header_field_set",
            InvoiceEvent::RatePercentSet { .. } => "invoicing.invoice.rate_percent_set",
            InvoiceEvent::ItemAdded => "invoicing.invoice.item_added",
            InvoiceEvent::ItemChanged { .. } => "invoicing.invoice.item_changed",
            InvoiceEvent::ItemDeleted { .. } => "invoicing.invoice.item_deleted",
        }
    }

    /// Whether applying this event changes an input of the totals.
    pub fn affects_totals(&self) -> bool {
        !matches!(self, InvoiceEvent::HeaderFieldSet { .. })
    }
}

impl Aggregate for Invoice {
    type Command = InvoiceCommand;
    type Event = InvoiceEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InvoiceEvent::HeaderFieldSet { field, value } => {
                *self.header_field_mut(*field) = value.clone();
            }
            InvoiceEvent::RatePercentSet { field, value } => match field {
                RateField::Discount => self.discount = *value,
                RateField::Tax => self.tax = *value,
            },
            InvoiceEvent::ItemAdded => {
                self.items.push(LineItem::blank());
            }
            InvoiceEvent::ItemChanged { index, change } => {
                if let Some(item) = self.items.get_mut(*index) {
                    match change {
                        ItemChange::Quantity(q) => item.quantity = *q,
                        ItemChange::Price(p) => item.price = *p,
                        ItemChange::Description(d) => item.description = d.clone(),
                        ItemChange::Name(n) => item.name = n.clone(),
                    }
                    item.recompute_amount();
                }
            }
            InvoiceEvent::ItemDeleted { index } => {
                if *index < self.items.len() {
                    self.items.remove(*index);
                }
            }
        }

        if event.affects_totals() {
            self.recompute_totals();
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InvoiceCommand::SetHeaderField { field, value } => {
                Ok(vec![InvoiceEvent::HeaderFieldSet {
                    field: *field,
                    value: value.clone(),
                }])
            }
            InvoiceCommand::SetRatePercent { field, raw } => {
                Ok(vec![InvoiceEvent::RatePercentSet {
                    field: *field,
                    value: parse_lenient(raw),
                }])
            }
            InvoiceCommand::AddItem => Ok(vec![InvoiceEvent::ItemAdded]),
            InvoiceCommand::UpdateItemField { index, field, raw } => {
                self.handle_update_item(*index, *field, raw)
            }
            InvoiceCommand::DeleteItem { index } => {
                self.ensure_item_index(*index)?;
                Ok(vec![InvoiceEvent::ItemDeleted { index: *index }])
            }
        }
    }
}

impl Invoice {
    fn ensure_item_index(&self, index: usize) -> Result<(), DomainError> {
        if index >= self.items.len() {
            return Err(DomainError::invalid_argument(format!(
                "item index {index} out of range (len {})",
                self.items.len()
            )));
        }
        Ok(())
    }

    fn handle_update_item(
        &self,
        index: usize,
        field: ItemField,
        raw: &str,
    ) -> Result<Vec<InvoiceEvent>, DomainError> {
        self.ensure_item_index(index)?;

        let change = match field {
            ItemField::Quantity => ItemChange::Quantity(parse_lenient(raw)),
            ItemField::Price => ItemChange::Price(parse_lenient(raw)),
            ItemField::Description => ItemChange::Description(raw.to_string()),
            ItemField::Name => ItemChange::Name(raw.to_string()),
        };

        Ok(vec![InvoiceEvent::ItemChanged { index, change }])
    }
}
