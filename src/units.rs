//! Presentation-time formatting and unit conversion
//!
//! The data model is uniformly metric (Celsius, km/h, meters). Everything
//! here converts and labels values for display; nothing feeds back into the
//! stored data.

use crate::data::{SpeedUnit, TemperatureUnit};

/// Compass sector labels, clockwise from north.
const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Miles per kilometer, used for the km/h to mph display conversion.
const MPH_PER_KPH: f64 = 0.621371;

/// Formats a Celsius temperature for display in the chosen unit.
///
/// Values are rounded to the nearest integer, halves away from zero, after
/// any conversion.
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    match unit {
        TemperatureUnit::Celsius => format!("{}\u{00B0}C", celsius.round()),
        TemperatureUnit::Fahrenheit => {
            let fahrenheit = celsius * 9.0 / 5.0 + 32.0;
            format!("{}\u{00B0}F", fahrenheit.round())
        }
    }
}

/// Formats a km/h wind speed for display in the chosen unit.
pub fn format_speed(kph: f64, unit: SpeedUnit) -> String {
    match unit {
        SpeedUnit::Kph => format!("{} km/h", kph.round()),
        SpeedUnit::Mph => format!("{} mph", (kph * MPH_PER_KPH).round()),
    }
}

/// Maps a wind bearing in degrees to one of 16 compass labels.
///
/// Each sector spans 22.5 degrees centered on its label, so 0 and 359 are
/// both "N".
pub fn wind_direction_label(degrees: f64) -> &'static str {
    let index = ((degrees / 22.5).round() as usize) % 16;
    COMPASS[index]
}

/// The qualitative band for a UV index value.
///
/// Band edges are inclusive upper bounds: 2.0 is still "Low", 2.01 is
/// "Moderate".
pub fn uv_index_level(uvi: f64) -> &'static str {
    if uvi <= 2.0 {
        "Low"
    } else if uvi <= 5.0 {
        "Moderate"
    } else if uvi <= 7.0 {
        "High"
    } else if uvi <= 10.0 {
        "Very High"
    } else {
        "Extreme"
    }
}

/// The qualitative description for a visibility distance in meters.
pub fn visibility_description(meters: f64) -> &'static str {
    if meters >= 10_000.0 {
        "Excellent"
    } else if meters >= 5_000.0 {
        "Good"
    } else if meters >= 2_000.0 {
        "Moderate"
    } else if meters >= 1_000.0 {
        "Poor"
    } else {
        "Very Poor"
    }
}

/// Formats visibility as kilometers with one decimal place.
pub fn format_visibility(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_temperature_celsius_rounds() {
        assert_eq!(format_temperature(26.4, TemperatureUnit::Celsius), "26\u{00B0}C");
        assert_eq!(format_temperature(26.5, TemperatureUnit::Celsius), "27\u{00B0}C");
        assert_eq!(format_temperature(-0.5, TemperatureUnit::Celsius), "-1\u{00B0}C");
    }

    #[test]
    fn test_format_temperature_fahrenheit_converts_then_rounds() {
        assert_eq!(format_temperature(0.0, TemperatureUnit::Fahrenheit), "32\u{00B0}F");
        assert_eq!(format_temperature(100.0, TemperatureUnit::Fahrenheit), "212\u{00B0}F");
        assert_eq!(format_temperature(26.7, TemperatureUnit::Fahrenheit), "80\u{00B0}F");
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(11.2, SpeedUnit::Kph), "11 km/h");
        assert_eq!(format_speed(16.0, SpeedUnit::Mph), "10 mph");
        assert_eq!(format_speed(100.0, SpeedUnit::Mph), "62 mph");
        assert_eq!(format_speed(0.0, SpeedUnit::Mph), "0 mph");
    }

    #[test]
    fn test_wind_direction_cardinal_points() {
        assert_eq!(wind_direction_label(0.0), "N");
        assert_eq!(wind_direction_label(90.0), "E");
        assert_eq!(wind_direction_label(180.0), "S");
        assert_eq!(wind_direction_label(270.0), "W");
    }

    #[test]
    fn test_wind_direction_wraps_back_to_north() {
        assert_eq!(wind_direction_label(359.0), "N");
        assert_eq!(wind_direction_label(360.0), "N");
    }

    #[test]
    fn test_wind_direction_sector_boundaries() {
        // 11.25 is the midpoint between N and NNE; round puts it in NNE
        assert_eq!(wind_direction_label(11.24), "N");
        assert_eq!(wind_direction_label(11.3), "NNE");
        assert_eq!(wind_direction_label(22.5), "NNE");
        assert_eq!(wind_direction_label(202.5), "SSW");
    }

    #[test]
    fn test_uv_index_bands_have_inclusive_upper_edges() {
        assert_eq!(uv_index_level(0.0), "Low");
        assert_eq!(uv_index_level(2.0), "Low");
        assert_eq!(uv_index_level(2.01), "Moderate");
        assert_eq!(uv_index_level(5.0), "Moderate");
        assert_eq!(uv_index_level(6.0), "High");
        assert_eq!(uv_index_level(7.0), "High");
        assert_eq!(uv_index_level(8.0), "Very High");
        assert_eq!(uv_index_level(10.0), "Very High");
        assert_eq!(uv_index_level(11.0), "Extreme");
    }

    #[test]
    fn test_visibility_bands() {
        assert_eq!(visibility_description(10_000.0), "Excellent");
        assert_eq!(visibility_description(7_500.0), "Good");
        assert_eq!(visibility_description(3_000.0), "Moderate");
        assert_eq!(visibility_description(1_500.0), "Poor");
        assert_eq!(visibility_description(400.0), "Very Poor");
    }

    #[test]
    fn test_format_visibility() {
        assert_eq!(format_visibility(10_000.0), "10.0 km");
        assert_eq!(format_visibility(2_500.0), "2.5 km");
    }
}
