//! User-facing outcomes of shell actions.

use core::fmt;

/// What the edit surface should tell the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved,
    Updated,
    Deleted,
    EditRejected(String),
    AttachmentRejected(String),
    SaveFailed(String),
    ExportFailed(String),
}

impl Notice {
    pub fn is_failure(&self) -> bool {
        !matches!(self, Notice::Saved | Notice::Updated | Notice::Deleted)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Saved => f.write_str("Invoice has been saved"),
            Notice::Updated => f.write_str("Invoice Updated"),
            Notice::Deleted => f.write_str("Invoice deleted"),
            Notice::EditRejected(reason) => write!(f, "Edit not applied: {reason}"),
            Notice::AttachmentRejected(reason) => write!(f, "Image not attached: {reason}"),
            Notice::SaveFailed(reason) => write!(f, "Invoice could not be saved: {reason}"),
            Notice::ExportFailed(reason) => write!(f, "Invoice could not be exported: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_messages() {
        assert_eq!(Notice::Saved.to_string(), "Invoice has been saved");
        assert_eq!(Notice::Updated.to_string(), "Invoice Updated");
        assert!(!Notice::Deleted.is_failure());
    }

    #[test]
    fn failures_carry_their_reason() {
        let notice = Notice::SaveFailed("disk full".to_string());
        assert!(notice.is_failure());
        assert_eq!(notice.to_string(), "Invoice could not be saved: disk full");
    }
}
