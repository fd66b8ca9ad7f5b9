//! Piecewise-linear AQI scoring.
//!
//! The sub-index of a concentration in band `i` is interpolated onto the
//! bounds of band `i + 1`, not band `i` itself. This next-band output
//! indexing is the published behavior of the pipeline and is kept
//! intact; two visible consequences are that a zero concentration scores
//! the lower bound of the second band, and that the final band of each
//! table is unreachable as an input range.

use crate::aqi::breakpoints::{
    CO_BREAKPOINTS, NO2_BREAKPOINTS, O3_BREAKPOINTS, PM10_BREAKPOINTS, PM25_BREAKPOINTS,
    SO2_BREAKPOINTS,
};
use crate::models::StationDaySummary;

/// Interpolate the sub-index for one pollutant concentration.
///
/// Returns `None` when the concentration falls in no scannable band: in a
/// gap between bands, below zero, or at or beyond the final band. Callers
/// default the missing case to 0 at the reduction boundary.
pub fn sub_index(concentration: f64, breakpoints: &[(f64, f64)]) -> Option<f64> {
    let mut index = None;
    for i in 0..breakpoints.len() - 1 {
        let (c_low, c_high) = breakpoints[i];
        if c_low <= concentration && concentration <= c_high {
            let (i_low, i_high) = breakpoints[i + 1];
            index = Some((i_high - i_low) / (c_high - c_low) * (concentration - c_low) + i_low);
        }
    }
    index
}

/// Reduce the six pollutant sub-indices to a single AQI value.
///
/// Non-matching pollutants contribute 0; the maximum wins and the governing
/// pollutant is not tracked.
pub fn calculate_aqi(pm25: f64, pm10: f64, so2: f64, no2: f64, co: f64, o3: f64) -> f64 {
    let components = [
        sub_index(pm25, PM25_BREAKPOINTS),
        sub_index(pm10, PM10_BREAKPOINTS),
        sub_index(so2, SO2_BREAKPOINTS),
        sub_index(no2, NO2_BREAKPOINTS),
        sub_index(co, CO_BREAKPOINTS),
        sub_index(o3, O3_BREAKPOINTS),
    ];

    components
        .into_iter()
        .map(|component| component.unwrap_or(0.0))
        .fold(0.0, f64::max)
}

/// Second pass over the daily aggregates: fill in the AQI field of every
/// summary from its six mean concentrations.
pub fn score_summaries(summaries: &mut [StationDaySummary]) {
    for summary in summaries.iter_mut() {
        summary.aqi = Some(calculate_aqi(
            summary.pm25,
            summary.pm10,
            summary.so2,
            summary.no2,
            summary.co,
            summary.o3,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_sub_index_zero_maps_to_next_band_low() {
        // Band 0 contains 0, so the result is the lower bound of band 1.
        assert_close(sub_index(0.0, PM25_BREAKPOINTS).unwrap(), 12.1);
        assert_close(sub_index(0.0, PM10_BREAKPOINTS).unwrap(), 55.0);
        assert_close(sub_index(0.0, SO2_BREAKPOINTS).unwrap(), 36.0);
        assert_close(sub_index(0.0, NO2_BREAKPOINTS).unwrap(), 54.0);
        assert_close(sub_index(0.0, CO_BREAKPOINTS).unwrap(), 4.5);
        assert_close(sub_index(0.0, O3_BREAKPOINTS).unwrap(), 55.0);
    }

    #[test]
    fn test_sub_index_interpolates_within_band() {
        // PM2.5 = 300 sits in (250.5, 350.4); the output range is the next
        // band (350.5, 500.4).
        let expected = (500.4 - 350.5) / (350.4 - 250.5) * (300.0 - 250.5) + 350.5;
        assert_close(sub_index(300.0, PM25_BREAKPOINTS).unwrap(), expected);
        assert_close(expected, 424.77477477477476);
    }

    #[test]
    fn test_band_upper_bound_is_inclusive() {
        // PM10 = 54 falls in (0, 54), not the gap after it.
        assert_close(sub_index(54.0, PM10_BREAKPOINTS).unwrap(), 154.0);
    }

    #[test]
    fn test_gap_between_bands_has_no_index() {
        // 54 < C < 55 lies between the first two PM10 bands.
        assert!(sub_index(54.5, PM10_BREAKPOINTS).is_none());
    }

    #[test]
    fn test_final_band_is_output_only() {
        // (350.5, 500.4) is the last PM2.5 band and is never scanned as an
        // input range.
        assert!(sub_index(500.0, PM25_BREAKPOINTS).is_none());
        assert!(sub_index(604.0, SO2_BREAKPOINTS).is_none());
    }

    #[test]
    fn test_negative_and_out_of_range_have_no_index() {
        assert!(sub_index(-1.0, PM25_BREAKPOINTS).is_none());
        assert!(sub_index(5000.0, O3_BREAKPOINTS).is_none());
    }

    #[test]
    fn test_all_zero_row_scores_55() {
        // Every sub-index lands on its second band's lower bound; PM10 and
        // O3 share the maximum at 55.
        assert_close(calculate_aqi(0.0, 0.0, 0.0, 0.0, 0.0, 0.0), 55.0);
    }

    #[test]
    fn test_unmatched_pollutant_defaults_to_zero() {
        // PM2.5 = 500 has no scannable band, so the row is governed by the
        // zero-concentration sub-indices of the other pollutants.
        assert_close(calculate_aqi(500.0, 0.0, 0.0, 0.0, 0.0, 0.0), 55.0);
    }

    #[test]
    fn test_max_of_components_governs() {
        let expected_pm25 = (500.4 - 350.5) / (350.4 - 250.5) * (300.0 - 250.5) + 350.5;
        let aqi = calculate_aqi(300.0, 80.0, 10.0, 40.0, 1.0, 30.0);
        assert_close(aqi, expected_pm25);
    }

    #[test]
    fn test_score_summaries_fills_aqi() {
        let mut summaries = vec![StationDaySummary {
            date: NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
            station: "Dingling".to_string(),
            pm25: 300.0,
            pm10: 80.0,
            so2: 10.0,
            no2: 40.0,
            co: 1.0,
            o3: 30.0,
            temp: 1.0,
            pres: 1020.0,
            dewp: -8.0,
            rain: 0.0,
            wspm: 1.5,
            aqi: None,
        }];
        score_summaries(&mut summaries);
        assert_close(summaries[0].aqi.unwrap(), 424.77477477477476);
    }
}
