//! The saved invoice collection, stored as one JSON document under a fixed key.

use serde::{Deserialize, Serialize};

use billforge_core::InvoiceId;
use billforge_invoicing::Invoice;

use crate::kv_store::{KeyValueStore, StoreError};

/// Storage key holding the whole collection.
pub const INVOICES_KEY: &str = "invoices";

#[derive(Debug, Default, Deserialize)]
struct StoredCollection {
    #[serde(default)]
    invoices: Vec<Invoice>,
}

#[derive(Serialize)]
struct CollectionRef<'a> {
    invoices: &'a [Invoice],
}

/// Load/save of the invoice collection (`{ "invoices": [...] }`).
///
/// `load` never fails and is meant for listing. The add/update/delete
/// workflows read through `try_load` and refuse to write when the stored
/// collection cannot be read. Writes replace the whole collection.
#[derive(Debug, Clone)]
pub struct InvoiceRepository<S> {
    store: S,
}

impl<S> InvoiceRepository<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The collection for display. Never fails: an unreadable store or a
    /// payload that does not parse reads as empty.
    pub fn load(&self) -> Vec<Invoice> {
        self.try_load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invoice collection unreadable; treating as empty");
            Vec::new()
        })
    }

    /// The collection as a write workflow must see it. A missing key is an
    /// empty collection; a failed read or an unparsable payload is an error,
    /// so nothing gets written over data that could not be read.
    pub fn try_load(&self) -> Result<Vec<Invoice>, StoreError> {
        let Some(raw) = self.store.get(INVOICES_KEY)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str::<StoredCollection>(&raw)
            .map(|collection| collection.invoices)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub fn save(&self, invoices: &[Invoice]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&CollectionRef { invoices })
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(INVOICES_KEY, &payload)?;

        tracing::debug!(count = invoices.len(), "saved invoice collection");
        Ok(())
    }

    pub fn find(&self, id: &InvoiceId) -> Option<Invoice> {
        self.load()
            .into_iter()
            .find(|invoice| invoice.id_typed() == id)
    }

    /// Append a new invoice and save. An invoice whose id is already stored
    /// replaces the stored one instead of creating a duplicate.
    pub fn add(&self, invoice: Invoice) -> Result<Vec<Invoice>, StoreError> {
        let mut invoices = self.try_load()?;
        match invoices
            .iter_mut()
            .find(|existing| existing.id_typed() == invoice.id_typed())
        {
            Some(existing) => {
                tracing::warn!(invoice_id = %invoice.id_typed(), "invoice already stored; replacing");
                *existing = invoice;
            }
            None => invoices.push(invoice),
        }
        self.save(&invoices)?;
        Ok(invoices)
    }

    /// Replace the stored invoice with the same id and save. Unknown ids
    /// leave the collection as it was (it is still written back).
    pub fn update(&self, invoice: Invoice) -> Result<Vec<Invoice>, StoreError> {
        let mut invoices = self.try_load()?;
        match invoices
            .iter_mut()
            .find(|existing| existing.id_typed() == invoice.id_typed())
        {
            Some(existing) => *existing = invoice,
            None => {
                tracing::warn!(invoice_id = %invoice.id_typed(), "update for unknown invoice ignored");
            }
        }
        self.save(&invoices)?;
        Ok(invoices)
    }

    pub fn delete(&self, id: &InvoiceId) -> Result<Vec<Invoice>, StoreError> {
        let mut invoices = self.try_load()?;
        invoices.retain(|invoice| invoice.id_typed() != id);
        self.save(&invoices)?;
        Ok(invoices)
    }
}
