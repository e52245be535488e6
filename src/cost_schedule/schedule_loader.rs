//! Loads management cost schedules from JSON.
//!
//! The on-disk form is an array of schedule entries:
//!
//! ```json
//! [
//!   {
//!     "propertyType": "residential",
//!     "bracket": { "minUnits": 0 },
//!     "components": [
//!       {
//!         "name": "administration",
//!         "basis": { "perResidentialUnit": 270.0 },
//!         "indexLinked": true,
//!         "ratePrecision": 2
//!       }
//!     ]
//!   }
//! ]
//! ```

use super::schedule_errors::ScheduleError;
use super::schedule_model::{ManagementCostSchedule, ScheduleEntry};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a JSON file into a validated [`ManagementCostSchedule`].
pub fn load_cost_schedule(path: impl AsRef<Path>) -> Result<ManagementCostSchedule, ScheduleError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| ScheduleError::LoadError(format!("{}: {}", path.display(), e)))?;
    let schedule = parse_cost_schedule(file)?;
    debug!(
        "Loaded cost schedule with {} entries from {}",
        schedule.entries().len(),
        path.display()
    );
    Ok(schedule)
}

/// Parses JSON content from any reader into a validated
/// [`ManagementCostSchedule`].
pub fn parse_cost_schedule<R: Read>(reader: R) -> Result<ManagementCostSchedule, ScheduleError> {
    let entries: Vec<ScheduleEntry> =
        serde_json::from_reader(reader).map_err(|e| ScheduleError::LoadError(e.to_string()))?;
    ManagementCostSchedule::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost_schedule::schedule_model::CostBasis;
    use crate::valuation::valuation_model::PropertyType;
    use rust_decimal_macros::dec;
    use std::io::Write;

    const SCHEDULE_JSON: &str = r#"
    [
        {
            "propertyType": "residential",
            "bracket": { "minUnits": 0, "maxUnits": 10 },
            "components": [
                {
                    "name": "administration",
                    "basis": { "perResidentialUnit": 270.0 },
                    "indexLinked": true,
                    "ratePrecision": 2
                },
                {
                    "name": "risk_of_rent_loss",
                    "basis": { "shareOfGrossRent": 0.02 }
                }
            ]
        },
        {
            "propertyType": "commercial",
            "bracket": { "minUnits": 0 },
            "components": [
                { "name": "administration", "basis": { "shareOfGrossRent": 0.03 } }
            ]
        }
    ]
    "#;

    #[test]
    fn test_parse_schedule_json() {
        let schedule = parse_cost_schedule(SCHEDULE_JSON.as_bytes()).unwrap();
        assert_eq!(schedule.entries().len(), 2);

        let entry = schedule.entry_for(PropertyType::Residential, 4).unwrap();
        assert_eq!(entry.bracket.max_units, Some(10));
        assert_eq!(entry.components.len(), 2);

        let admin = &entry.components[0];
        assert_eq!(admin.basis, CostBasis::PerResidentialUnit(dec!(270)));
        assert!(admin.index_linked);
        assert_eq!(admin.rate_precision, Some(2));

        // Defaults apply when the optional fields are omitted
        let risk = &entry.components[1];
        assert!(!risk.index_linked);
        assert_eq!(risk.rate_precision, None);
    }

    #[test]
    fn test_parse_rejects_invalid_rates() {
        let json = r#"
        [
            {
                "propertyType": "residential",
                "bracket": { "minUnits": 0 },
                "components": [
                    { "name": "maintenance", "basis": { "perSquareMeter": -9.0 } }
                ]
            }
        ]
        "#;
        let err = parse_cost_schedule(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidSchedule(_)));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_cost_schedule("{ not json".as_bytes()).unwrap_err();
        assert!(matches!(err, ScheduleError::LoadError(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCHEDULE_JSON.as_bytes()).unwrap();
        file.flush().unwrap();

        let schedule = load_cost_schedule(file.path()).unwrap();
        assert!(schedule.entry_for(PropertyType::Commercial, 0).is_some());
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let err = load_cost_schedule("/nonexistent/schedule.json").unwrap_err();
        assert!(matches!(err, ScheduleError::LoadError(_)));
    }
}
