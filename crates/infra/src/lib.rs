//! Infrastructure layer: local persistence of the invoice collection.

pub mod kv_store;
pub mod repository;

pub use kv_store::{InMemoryKeyValueStore, KeyValueStore, SqliteKeyValueStore, StoreError};
pub use repository::{INVOICES_KEY, InvoiceRepository};
