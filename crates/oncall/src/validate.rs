//! Parameter validation shared by every backend.
//!
//! Validation always runs before any network call, and both backends apply
//! the same rules so error-path tests behave identically offline.

use crate::backends::ProviderError;

/// Reject an empty or whitespace-only required string.
pub(crate) fn require(name: &'static str, value: &str) -> Result<(), ProviderError> {
    if value.trim().is_empty() {
        return Err(ProviderError::InvalidParameter {
            name,
            reason: "must not be blank",
        });
    }
    Ok(())
}

/// Reject an empty list, or a list containing any blank entry.
pub(crate) fn require_all(name: &'static str, values: &[String]) -> Result<(), ProviderError> {
    if values.is_empty() {
        return Err(ProviderError::InvalidParameter {
            name,
            reason: "must not be empty",
        });
    }
    for value in values {
        if value.trim().is_empty() {
            return Err(ProviderError::InvalidParameter {
                name,
                reason: "must not contain blank entries",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank_values() {
        assert!(require("id", "").is_err());
        assert!(require("id", "   ").is_err());
        assert!(require("id", "\t\n").is_err());
        assert!(require("id", "PUHMCXV").is_ok());
        assert!(require("id", "  PUHMCXV").is_ok());
    }

    #[test]
    fn require_names_the_parameter() {
        let err = require("scheduleID", " ").unwrap_err();
        assert!(err.to_string().contains("scheduleID"));
    }

    #[test]
    fn require_all_rejects_empty_lists() {
        assert!(require_all("scheduleIDs", &[]).is_err());
    }

    #[test]
    fn require_all_rejects_blank_entries() {
        let ids = vec!["P10QVCS".to_string(), "  ".to_string()];
        assert!(require_all("scheduleIDs", &ids).is_err());
    }

    #[test]
    fn require_all_accepts_well_formed_lists() {
        let ids = vec!["PUY4P9O".to_string(), "P10QVCS".to_string()];
        assert!(require_all("scheduleIDs", &ids).is_ok());
    }
}
