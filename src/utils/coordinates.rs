use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    LAT_NEGATIVE, LAT_POSITIVE, LON_NEGATIVE, LON_POSITIVE, MAX_LATITUDE, MAX_LONGITUDE,
    MIN_LATITUDE, MIN_LONGITUDE,
};

/// Convert a hemisphere-suffixed coordinate token to signed decimal degrees
///
/// ARGOS location lines carry coordinates as a non-negative decimal number
/// with a single trailing hemisphere letter, e.g. `34.56N` or `78.90W`.
/// The negative hemisphere code negates the value; the positive code leaves
/// it unchanged.
///
/// # Examples
/// ```
/// use argos_processor::utils::normalize_coordinate;
///
/// let lat = normalize_coordinate("34.50N", 'N', 'S').unwrap();
/// assert!((lat - 34.50).abs() < 0.000001);
///
/// let lon = normalize_coordinate("120.25W", 'E', 'W').unwrap();
/// assert!((lon - -120.25).abs() < 0.000001);
/// ```
pub fn normalize_coordinate(token: &str, positive: char, negative: char) -> Result<f64> {
    let trimmed = token.trim();

    let suffix = trimmed.chars().last().ok_or_else(|| {
        ProcessingError::InvalidCoordinate("Empty coordinate token".to_string())
    })?;

    if suffix != positive && suffix != negative {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "'{}' has no '{}' or '{}' hemisphere suffix",
            trimmed, positive, negative
        )));
    }

    let prefix = &trimmed[..trimmed.len() - suffix.len_utf8()];
    let magnitude = prefix.parse::<f64>().map_err(|_| {
        ProcessingError::InvalidCoordinate(format!(
            "Invalid numeric value '{}' in coordinate '{}'",
            prefix, trimmed
        ))
    })?;

    if magnitude < 0.0 {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Coordinate magnitude must be non-negative, got '{}'",
            trimmed
        )));
    }

    if suffix == negative {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

/// Parse a latitude token (`N`/`S` suffix) to signed decimal degrees
pub fn parse_latitude(token: &str) -> Result<f64> {
    normalize_coordinate(token, LAT_POSITIVE, LAT_NEGATIVE)
}

/// Parse a longitude token (`E`/`W` suffix) to signed decimal degrees
pub fn parse_longitude(token: &str) -> Result<f64> {
    normalize_coordinate(token, LON_POSITIVE, LON_NEGATIVE)
}

/// Validate signed decimal-degree bounds
///
/// The receivers emit coordinates unchecked, so out-of-range values do turn
/// up in the field data and are rejected here rather than passed through.
pub fn validate_position(latitude: f64, longitude: f64) -> Result<()> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Latitude {} is outside [{}, {}]",
            latitude, MIN_LATITUDE, MAX_LATITUDE
        )));
    }

    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Longitude {} is outside [{}, {}]",
            longitude, MIN_LONGITUDE, MAX_LONGITUDE
        )));
    }

    Ok(())
}
