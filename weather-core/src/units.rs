//! Unit conversions used when displaying observations.
//!
//! All functions are total: out-of-range inputs are normalized, never rejected.

const MPH_PER_KPH: f64 = 0.621371;

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

pub fn celsius_to_fahrenheit(temp_c: f64) -> f64 {
    temp_c * 9.0 / 5.0 + 32.0
}

pub fn kph_to_mph(kph: f64) -> f64 {
    kph * MPH_PER_KPH
}

/// Maps a bearing in degrees to one of the 16 compass abbreviations.
pub fn degrees_to_cardinal(deg: f64) -> &'static str {
    let deg = deg.rem_euclid(360.0);
    // NaN and infinities fall through to index 0.
    let idx = (deg / 22.5 + 0.5).floor() as usize % COMPASS.len();
    COMPASS[idx]
}

/// Rounds half away from zero and converts to an integer for display.
pub fn round_display(value: f64) -> i64 {
    value.round() as i64
}
