use serde::Serialize;
use std::fmt;

use crate::utils::constants::CATEGORY_UPPER_BOUNDS;

/// The six ordinal health categories an AQI value falls into.
///
/// Bucket bounds are 50/100/150/200/300 with an open-ended sixth bucket.
/// Classification is by inclusive upper threshold, so every non-negative
/// float maps to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthySensitive,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];

    pub fn from_aqi(aqi: f64) -> Self {
        let bounds = CATEGORY_UPPER_BOUNDS;
        if aqi <= bounds[0] {
            AqiCategory::Good
        } else if aqi <= bounds[1] {
            AqiCategory::Moderate
        } else if aqi <= bounds[2] {
            AqiCategory::UnhealthySensitive
        } else if aqi <= bounds[3] {
            AqiCategory::Unhealthy
        } else if aqi <= bounds[4] {
            AqiCategory::VeryUnhealthy
        } else {
            AqiCategory::Hazardous
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "0-50",
            AqiCategory::Moderate => "51-100",
            AqiCategory::UnhealthySensitive => "101-150",
            AqiCategory::Unhealthy => "151-200",
            AqiCategory::VeryUnhealthy => "201-300",
            AqiCategory::Hazardous => "301+",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(AqiCategory::from_aqi(0.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(50.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(51.0), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(100.0), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(150.0), AqiCategory::UnhealthySensitive);
        assert_eq!(AqiCategory::from_aqi(200.0), AqiCategory::Unhealthy);
        assert_eq!(AqiCategory::from_aqi(300.0), AqiCategory::VeryUnhealthy);
        assert_eq!(AqiCategory::from_aqi(301.0), AqiCategory::Hazardous);
        assert_eq!(AqiCategory::from_aqi(10000.0), AqiCategory::Hazardous);
    }

    #[test]
    fn test_fractional_values_are_covered() {
        // Thresholds are inclusive upper bounds, so values between the
        // integer range edges still classify.
        assert_eq!(AqiCategory::from_aqi(50.5), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(200.4), AqiCategory::VeryUnhealthy);
    }

    #[test]
    fn test_labels() {
        assert_eq!(AqiCategory::Good.label(), "Good");
        assert_eq!(AqiCategory::Hazardous.range_label(), "301+");
        assert_eq!(
            AqiCategory::VeryUnhealthy.to_string(),
            "Very Unhealthy".to_string()
        );
    }
}
