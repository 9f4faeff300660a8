use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::TIMESTAMP_FORMAT;

/// A geolocated tracking point accepted by the pipeline
///
/// Constructed only after the location class passed filtering and both
/// coordinates converted successfully; a partially-converted observation is
/// never built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Observation {
    /// Originating file name; absent when provenance tagging is disabled
    pub source_file: Option<String>,

    pub tag_id: i64,

    pub location_class: String,

    /// `DD/MM/YY HH:MM:SS`, composed from the header date and time tokens
    pub timestamp: String,

    /// Verbatim hemisphere-suffixed tokens from the location line
    pub lat_raw: String,
    pub lon_raw: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Observation {
    /// Parse the timestamp string into a typed datetime
    pub fn datetime(&self) -> Result<NaiveDateTime> {
        Ok(NaiveDateTime::parse_from_str(
            &self.timestamp,
            TIMESTAMP_FORMAT,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn observation() -> Observation {
        Observation {
            source_file: Some("1997dg.txt".to_string()),
            tag_id: 1234,
            location_class: "2".to_string(),
            timestamp: "12/03/99 08:15:00".to_string(),
            lat_raw: "34.50N".to_string(),
            lon_raw: "120.25W".to_string(),
            latitude: 34.50,
            longitude: -120.25,
        }
    }

    #[test]
    fn test_observation_validation() {
        assert!(observation().validate().is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        let mut obs = observation();
        obs.latitude = 91.0;
        assert!(obs.validate().is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        let mut obs = observation();
        obs.longitude = -180.5;
        assert!(obs.validate().is_err());
    }

    #[test]
    fn test_datetime_parsing() {
        let dt = observation().datetime().unwrap();
        assert_eq!(dt.day(), 12);
        assert_eq!(dt.month(), 3);
        assert_eq!(dt.hour(), 8);
        assert_eq!(dt.minute(), 15);
    }

    #[test]
    fn test_datetime_rejects_garbage() {
        let mut obs = observation();
        obs.timestamp = "not a date".to_string();
        assert!(obs.datetime().is_err());
    }
}
