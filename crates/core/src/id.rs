//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

const INVOICE_ID_PREFIX: &str = "INV_";

/// Identifier of an invoice.
///
/// Opaque: anything non-empty is accepted when parsing so that previously
/// stored collections keep loading. Freshly generated ids are
/// `INV_` + a UUIDv7 in simple form (current time + randomness), which makes
/// them usable as persistence keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
    /// Generate a new identifier.
    ///
    /// Prefer passing IDs explicitly in tests for determinism.
    pub fn generate() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(format!("{INVOICE_ID_PREFIX}{}", uuid.simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InvoiceId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("InvoiceId: empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<InvoiceId> for String {
    fn from(value: InvoiceId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_prefixed_and_distinct() {
        let a = InvoiceId::generate();
        let b = InvoiceId::generate();
        assert!(a.as_str().starts_with("INV_"));
        assert_eq!(a.as_str().len(), INVOICE_ID_PREFIX.len() + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn legacy_ids_parse_verbatim() {
        let id: InvoiceId = "INV_lq2x9k3f0abcd".parse().unwrap();
        assert_eq!(id.as_str(), "INV_lq2x9k3f0abcd");
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = "   ".parse::<InvoiceId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id: InvoiceId = "INV_abc".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"INV_abc\"");
    }
}
