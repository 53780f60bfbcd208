//! `billforge-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no rendering).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::InvoiceId;
pub use value_object::ValueObject;
