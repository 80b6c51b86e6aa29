//! Provider payload normalization
//!
//! Transforms the raw One Call response plus an optional reverse-geocode
//! result into a `WeatherSnapshot`. Total over syntactically valid payloads:
//! optional provider fields get defaults here, while structurally broken
//! payloads are rejected earlier, at deserialization.

use super::openweather::{GeoPlace, OneCallResponse, RawAlert, RawCondition};
use super::{
    AlertSeverity, CurrentConditions, DailyForecastEntry, FeelsLikeRange, HourlyForecastEntry,
    Location, Precipitation, TemperatureRange, WeatherAlert, WeatherSnapshot,
};

/// The provider reports wind in m/s under metric units; the model stores km/h.
const MS_TO_KPH: f64 = 3.6;

/// Maximum number of daily entries kept in a snapshot
const MAX_DAILY: usize = 7;

/// Maximum number of hourly entries kept in a snapshot
const MAX_HOURLY: usize = 24;

/// Builds a snapshot from the forecast payload and the resolved place.
///
/// Daily and hourly arrays are truncated to the first 7 and 24 entries in
/// provider (chronological) order. A missing geocode result yields empty
/// name/country rather than failing.
pub fn snapshot(payload: OneCallResponse, place: Option<GeoPlace>) -> WeatherSnapshot {
    let (name, country) = match place {
        Some(p) => (p.name, p.country),
        None => (String::new(), String::new()),
    };

    let location = Location {
        name,
        country,
        lat: payload.lat,
        lon: payload.lon,
    };

    let current = {
        let c = payload.current;
        let (description, icon) = primary_condition(&c.weather);
        CurrentConditions {
            temperature: c.temp,
            feels_like: c.feels_like,
            description,
            icon,
            humidity: c.humidity,
            wind_speed: c.wind_speed * MS_TO_KPH,
            wind_direction: c.wind_deg,
            pressure: c.pressure,
            uv_index: c.uvi,
            visibility: c.visibility,
            sunrise: c.sunrise,
            sunset: c.sunset,
            timezone_offset: payload.timezone_offset,
        }
    };

    let daily = payload
        .daily
        .into_iter()
        .take(MAX_DAILY)
        .map(|day| {
            let (description, icon) = primary_condition(&day.weather);
            DailyForecastEntry {
                date: day.dt,
                sunrise: day.sunrise,
                sunset: day.sunset,
                temperature: TemperatureRange {
                    min: day.temp.min,
                    max: day.temp.max,
                },
                feels_like: FeelsLikeRange {
                    day: day.feels_like.day,
                    night: day.feels_like.night,
                },
                humidity: day.humidity,
                wind_speed: day.wind_speed * MS_TO_KPH,
                wind_direction: day.wind_deg,
                description,
                icon,
                uv_index: day.uvi,
                precipitation: Precipitation {
                    probability: day.pop,
                    amount: day.rain.unwrap_or(0.0),
                },
            }
        })
        .collect();

    let hourly = payload
        .hourly
        .into_iter()
        .take(MAX_HOURLY)
        .map(|hour| {
            let (description, icon) = primary_condition(&hour.weather);
            HourlyForecastEntry {
                time: hour.dt,
                temperature: hour.temp,
                feels_like: hour.feels_like,
                humidity: hour.humidity,
                wind_speed: hour.wind_speed * MS_TO_KPH,
                wind_direction: hour.wind_deg,
                description,
                icon,
                precipitation: Precipitation {
                    probability: hour.pop,
                    amount: hour.rain.map(|r| r.one_hour).unwrap_or(0.0),
                },
            }
        })
        .collect();

    let alerts = payload.alerts.and_then(|raw| {
        if raw.is_empty() {
            None
        } else {
            Some(raw.into_iter().map(normalize_alert).collect())
        }
    });

    WeatherSnapshot {
        location,
        current,
        daily,
        hourly,
        alerts,
    }
}

/// Extracts the primary condition's description and icon.
///
/// The provider puts the leading condition at index 0; an empty array yields
/// empty strings rather than failing.
fn primary_condition(weather: &[RawCondition]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_default()
}

fn normalize_alert(alert: RawAlert) -> WeatherAlert {
    let severity = severity_from_tags(&alert.tags);
    WeatherAlert {
        sender_name: alert.sender_name,
        event: alert.event,
        start: alert.start,
        end: alert.end,
        description: alert.description,
        severity,
    }
}

/// Derives alert severity from the provider's tag list.
///
/// The most severe matching tag wins: Extreme > Severe > Moderate; anything
/// else, including an empty list, is Minor.
pub fn severity_from_tags(tags: &[String]) -> AlertSeverity {
    if tags.iter().any(|t| t == "Extreme") {
        AlertSeverity::Extreme
    } else if tags.iter().any(|t| t == "Severe") {
        AlertSeverity::Severe
    } else if tags.iter().any(|t| t == "Moderate") {
        AlertSeverity::Moderate
    } else {
        AlertSeverity::Minor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a One Call payload with the requested number of daily and
    /// hourly entries.
    fn payload_with(daily: usize, hourly: usize, alerts: Option<&str>) -> OneCallResponse {
        let day = r#"{
            "dt": 1700000000, "sunrise": 1699990000, "sunset": 1700030000,
            "temp": {"min": 14.0, "max": 24.0},
            "feels_like": {"day": 23.0, "night": 15.0},
            "humidity": 60, "wind_speed": 4.0, "wind_deg": 180,
            "uvi": 6.5, "pop": 0.2,
            "weather": [{"description": "few clouds", "icon": "02d"}]
        }"#;
        let hour = r#"{
            "dt": 1700000000, "temp": 19.5, "feels_like": 19.0, "humidity": 70,
            "wind_speed": 3.0, "wind_deg": 160, "pop": 0.1,
            "weather": [{"description": "few clouds", "icon": "02d"}]
        }"#;

        let days: Vec<&str> = std::iter::repeat(day).take(daily).collect();
        let hours: Vec<&str> = std::iter::repeat(hour).take(hourly).collect();
        let alerts_field = alerts
            .map(|a| format!(", \"alerts\": {}", a))
            .unwrap_or_default();

        let json = format!(
            r#"{{
                "lat": -0.1022, "lon": 34.7617, "timezone_offset": 10800,
                "current": {{
                    "temp": 26.4, "feels_like": 27.1, "pressure": 1012, "humidity": 62,
                    "uvi": 8.1, "visibility": 10000, "wind_speed": 3.1, "wind_deg": 140,
                    "sunrise": 1699999000, "sunset": 1700042200,
                    "weather": [{{"description": "scattered clouds", "icon": "03d"}}]
                }},
                "hourly": [{}],
                "daily": [{}]{}
            }}"#,
            hours.join(","),
            days.join(","),
            alerts_field
        );

        serde_json::from_str(&json).expect("fixture payload should parse")
    }

    #[test]
    fn test_truncates_daily_to_7_and_hourly_to_24() {
        let result = snapshot(payload_with(10, 30, None), None);
        assert_eq!(result.daily.len(), 7);
        assert_eq!(result.hourly.len(), 24);
    }

    #[test]
    fn test_keeps_short_arrays_as_is() {
        let result = snapshot(payload_with(3, 5, None), None);
        assert_eq!(result.daily.len(), 3);
        assert_eq!(result.hourly.len(), 5);
    }

    #[test]
    fn test_preserves_provider_order() {
        let mut payload = payload_with(3, 3, None);
        payload.hourly[0].dt = 100;
        payload.hourly[1].dt = 200;
        payload.hourly[2].dt = 300;
        let result = snapshot(payload, None);
        let times: Vec<i64> = result.hourly.iter().map(|h| h.time).collect();
        assert_eq!(times, vec![100, 200, 300]);
    }

    #[test]
    fn test_place_merged_into_location() {
        let place = GeoPlace {
            name: "Kisumu".to_string(),
            country: "KE".to_string(),
        };
        let result = snapshot(payload_with(1, 1, None), Some(place));
        assert_eq!(result.location.name, "Kisumu");
        assert_eq!(result.location.country, "KE");
        assert!((result.location.lat - (-0.1022)).abs() < 1e-9);
    }

    #[test]
    fn test_missing_place_defaults_to_empty_strings() {
        let result = snapshot(payload_with(1, 1, None), None);
        assert_eq!(result.location.name, "");
        assert_eq!(result.location.country, "");
    }

    #[test]
    fn test_missing_rain_defaults_to_zero() {
        let result = snapshot(payload_with(1, 1, None), None);
        assert_eq!(result.daily[0].precipitation.amount, 0.0);
        assert_eq!(result.hourly[0].precipitation.amount, 0.0);
    }

    #[test]
    fn test_wind_speed_converted_to_kph() {
        // current wind_speed is 3.1 m/s in the fixture
        let result = snapshot(payload_with(1, 1, None), None);
        assert!((result.current.wind_speed - 3.1 * 3.6).abs() < 1e-9);
    }

    #[test]
    fn test_absent_alerts_stay_absent() {
        let result = snapshot(payload_with(1, 1, None), None);
        assert!(result.alerts.is_none());
    }

    #[test]
    fn test_empty_alert_array_normalizes_to_absent() {
        let result = snapshot(payload_with(1, 1, Some("[]")), None);
        assert!(result.alerts.is_none());
    }

    #[test]
    fn test_alert_fields_and_severity() {
        let alerts = r#"[{
            "sender_name": "KMD",
            "event": "Heavy Rainfall Warning",
            "start": 1700000000, "end": 1700086400,
            "description": "Heavy rainfall expected over the lake region.",
            "tags": ["Severe", "Minor"]
        }]"#;
        let result = snapshot(payload_with(1, 1, Some(alerts)), None);
        let alerts = result.alerts.expect("alerts should be present");
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].sender_name, "KMD");
        assert_eq!(alerts[0].event, "Heavy Rainfall Warning");
        assert_eq!(alerts[0].severity, AlertSeverity::Severe);
    }

    #[test]
    fn test_severity_priority_order() {
        let tags = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            severity_from_tags(&tags(&["Moderate", "Extreme", "Severe"])),
            AlertSeverity::Extreme
        );
        assert_eq!(
            severity_from_tags(&tags(&["Severe", "Minor"])),
            AlertSeverity::Severe
        );
        assert_eq!(
            severity_from_tags(&tags(&["Moderate"])),
            AlertSeverity::Moderate
        );
        assert_eq!(severity_from_tags(&tags(&[])), AlertSeverity::Minor);
        assert_eq!(
            severity_from_tags(&tags(&["Flood", "Wind"])),
            AlertSeverity::Minor
        );
    }

    #[test]
    fn test_empty_condition_array_yields_empty_strings() {
        let mut payload = payload_with(1, 1, None);
        payload.current.weather.clear();
        let result = snapshot(payload, None);
        assert_eq!(result.current.description, "");
        assert_eq!(result.current.icon, "");
    }

    #[test]
    fn test_current_fields_carried_over() {
        let result = snapshot(payload_with(1, 1, None), None);
        let c = &result.current;
        assert!((c.temperature - 26.4).abs() < 1e-9);
        assert!((c.feels_like - 27.1).abs() < 1e-9);
        assert_eq!(c.description, "scattered clouds");
        assert_eq!(c.icon, "03d");
        assert_eq!(c.humidity, 62);
        assert!((c.pressure - 1012.0).abs() < 1e-9);
        assert!((c.uv_index - 8.1).abs() < 1e-9);
        assert!((c.visibility - 10000.0).abs() < 1e-9);
        assert_eq!(c.timezone_offset, 10800);
    }
}
