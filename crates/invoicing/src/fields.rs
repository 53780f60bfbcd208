//! Addressable fields of an invoice, as named by the edit surface.
//!
//! Names match the keys of the stored JSON shape, so an edit surface can pass
//! the same string it uses to look the value up.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use billforge_core::DomainError;

/// Free-text header and party fields. Editing these never touches totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderField {
    CompanyName,
    InvoiceDate,
    DueDate,
    LogoUrl,
    SignatureUrl,
    FromName,
    FromAddress,
    FromState,
    ToName,
    ToAddress,
    ToState,
}

impl HeaderField {
    pub const ALL: [HeaderField; 11] = [
        HeaderField::CompanyName,
        HeaderField::InvoiceDate,
        HeaderField::DueDate,
        HeaderField::LogoUrl,
        HeaderField::SignatureUrl,
        HeaderField::FromName,
        HeaderField::FromAddress,
        HeaderField::FromState,
        HeaderField::ToName,
        HeaderField::ToAddress,
        HeaderField::ToState,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderField::CompanyName => "companyName",
            HeaderField::InvoiceDate => "invoiceDate",
            HeaderField::DueDate => "dueDate",
            HeaderField::LogoUrl => "logoUrl",
            HeaderField::SignatureUrl => "signatureUrl",
            HeaderField::FromName => "from.name",
            HeaderField::FromAddress => "from.address",
            HeaderField::FromState => "from.state",
            HeaderField::ToName => "to.name",
            HeaderField::ToAddress => "to.address",
            HeaderField::ToState => "to.state",
        }
    }
}

impl FromStr for HeaderField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeaderField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::invalid_argument(format!("unknown header field: {s}")))
    }
}

/// User-entered percentages that feed the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateField {
    Discount,
    Tax,
}

impl RateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateField::Discount => "discount",
            RateField::Tax => "tax",
        }
    }
}

impl FromStr for RateField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discount" => Ok(RateField::Discount),
            "tax" => Ok(RateField::Tax),
            other => Err(DomainError::invalid_argument(format!(
                "unknown rate field: {other}"
            ))),
        }
    }
}

/// Editable cells of a line item. `amount` is derived and deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemField {
    Quantity,
    Price,
    Description,
    Name,
}

impl ItemField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::Quantity => "quantity",
            ItemField::Price => "price",
            ItemField::Description => "description",
            ItemField::Name => "name",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ItemField::Quantity | ItemField::Price)
    }
}

impl FromStr for ItemField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quantity" => Ok(ItemField::Quantity),
            "price" => Ok(ItemField::Price),
            "description" => Ok(ItemField::Description),
            "name" => Ok(ItemField::Name),
            other => Err(DomainError::invalid_argument(format!(
                "unknown item field: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_field_names_round_trip() {
        for field in HeaderField::ALL {
            assert_eq!(field.as_str().parse::<HeaderField>().unwrap(), field);
        }
    }

    #[test]
    fn amount_is_not_an_editable_item_field() {
        let err = "amount".parse::<ItemField>().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rate_fields_parse() {
        assert_eq!("discount".parse::<RateField>().unwrap(), RateField::Discount);
        assert_eq!("tax".parse::<RateField>().unwrap(), RateField::Tax);
        assert!("vat".parse::<RateField>().is_err());
    }
}
