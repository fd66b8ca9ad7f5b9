//! Regulatory breakpoint tables, one per pollutant.
//!
//! Each table is an ordered list of inclusive concentration bands. The
//! interpolation in [`crate::aqi::sub_index`] scales a concentration inside
//! band `i` onto the bounds of band `i + 1`, so the final band of every
//! table serves only as an output range and is never matched against a
//! concentration directly.

/// PM2.5 in ug/m3
pub const PM25_BREAKPOINTS: &[(f64, f64)] = &[
    (0.0, 12.0),
    (12.1, 35.4),
    (35.5, 55.4),
    (55.5, 150.4),
    (150.5, 250.4),
    (250.5, 350.4),
    (350.5, 500.4),
];

/// PM10 in ug/m3
pub const PM10_BREAKPOINTS: &[(f64, f64)] = &[
    (0.0, 54.0),
    (55.0, 154.0),
    (155.0, 254.0),
    (255.0, 354.0),
    (355.0, 424.0),
    (425.0, 504.0),
    (505.0, 604.0),
];

/// SO2 in ug/m3
pub const SO2_BREAKPOINTS: &[(f64, f64)] = &[
    (0.0, 35.0),
    (36.0, 75.0),
    (76.0, 185.0),
    (186.0, 304.0),
    (305.0, 604.0),
];

/// NO2 in ug/m3
pub const NO2_BREAKPOINTS: &[(f64, f64)] = &[
    (0.0, 53.0),
    (54.0, 100.0),
    (101.0, 360.0),
    (361.0, 649.0),
    (650.0, 1249.0),
    (1250.0, 2049.0),
    (2050.0, 4049.0),
];

/// CO in mg/m3 (after the ingest-time division by 100)
pub const CO_BREAKPOINTS: &[(f64, f64)] = &[
    (0.0, 4.4),
    (4.5, 9.4),
    (9.5, 12.4),
    (12.5, 15.4),
    (15.5, 30.4),
    (30.5, 40.4),
    (40.5, 50.4),
];

/// O3 in ug/m3
pub const O3_BREAKPOINTS: &[(f64, f64)] = &[
    (0.0, 54.0),
    (55.0, 70.0),
    (71.0, 85.0),
    (86.0, 105.0),
    (106.0, 200.0),
];
