//! Report fields and required-field validation

use crate::error::{ReportError, Result};
use chrono::{Local, NaiveDate};

/// The fixed set of text fields a report must carry.
///
/// `date` holds the ISO form (`YYYY-MM-DD`) as entered; the localized
/// display form is produced at serialization time. `issued_by` travels on
/// the wire under the legacy name `system`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFields {
    pub title: String,
    pub location: String,
    pub system_reference: String,
    pub date: String,
    pub issued_by: String,
}

impl Default for ReportFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            location: String::new(),
            system_reference: String::new(),
            date: today_iso(),
            issued_by: String::new(),
        }
    }
}

impl ReportFields {
    /// Check that every required field is non-empty after trimming.
    ///
    /// Fields are checked in declared order and the first empty one fails
    /// validation, so the caller can point the user at one field at a
    /// time.
    pub fn validate(&self) -> Result<()> {
        let required: [(&'static str, &str); 5] = [
            ("Title", &self.title),
            ("Location", &self.location),
            ("System", &self.system_reference),
            ("Date", &self.date),
            ("Issued by", &self.issued_by),
        ];

        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(ReportError::MissingField(label));
            }
        }
        Ok(())
    }

    /// The date in its localized display form (`DD/MM/YYYY`).
    ///
    /// A value that does not parse as an ISO date is passed through
    /// verbatim rather than dropped.
    pub fn display_date(&self) -> String {
        let trimmed = self.date.trim();
        match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => date.format("%d/%m/%Y").to_string(),
            Err(_) => trimmed.to_string(),
        }
    }
}

/// Current local date in ISO form, the default for a fresh session.
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ReportFields {
        ReportFields {
            title: "Quarterly inspection".to_string(),
            location: "North depot".to_string(),
            system_reference: "SR-114".to_string(),
            date: "2026-08-07".to_string(),
            issued_by: "Maintenance".to_string(),
        }
    }

    #[test]
    fn test_default_date_is_today() {
        let fields = ReportFields::default();
        assert_eq!(fields.date, today_iso());
        assert!(fields.title.is_empty());
    }

    #[test]
    fn test_validate_passes_when_filled() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_empty_field_in_order() {
        let mut fields = filled();
        fields.title.clear();
        fields.location.clear();

        match fields.validate() {
            Err(ReportError::MissingField(label)) => assert_eq!(label, "Title"),
            other => panic!("Expected MissingField, got {other:?}"),
        }

        fields.title = "Back".to_string();
        match fields.validate() {
            Err(ReportError::MissingField(label)) => assert_eq!(label, "Location"),
            other => panic!("Expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_trims_whitespace() {
        let mut fields = filled();
        fields.issued_by = "   ".to_string();

        match fields.validate() {
            Err(ReportError::MissingField(label)) => assert_eq!(label, "Issued by"),
            other => panic!("Expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_display_date_localizes_iso_input() {
        let mut fields = filled();
        fields.date = "2026-08-07".to_string();
        assert_eq!(fields.display_date(), "07/08/2026");
    }

    #[test]
    fn test_display_date_passes_through_unparseable_values() {
        let mut fields = filled();
        fields.date = "next Tuesday".to_string();
        assert_eq!(fields.display_date(), "next Tuesday");
    }
}
