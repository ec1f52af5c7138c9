/*
 * @file info.rs
 * @brief Time, date and weather reporting
 * @author Kevin Thomas
 * @date 2025
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Live information handlers: clock, calendar and current weather.

use chrono::{Datelike, Local, NaiveDate, Timelike};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// OpenWeatherMap current-weather endpoint.
const WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Romanian weekday names indexed from Monday.
const WEEKDAYS: [&str; 7] = [
    "luni",
    "marți",
    "miercuri",
    "joi",
    "vineri",
    "sâmbătă",
    "duminică",
];

/// Romanian month names indexed from January.
const MONTHS: [&str; 12] = [
    "ianuarie",
    "februarie",
    "martie",
    "aprilie",
    "mai",
    "iunie",
    "iulie",
    "august",
    "septembrie",
    "octombrie",
    "noiembrie",
    "decembrie",
];

/// Returns the current local time as `HH:MM`.
pub fn current_time() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Returns today's date in a friendly Romanian phrasing.
pub fn current_date() -> String {
    format_date(Local::now().date_naive())
}

/// Formats a date as "Astăzi este {weekday}, {day} {month} {year}".
pub fn format_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS[date.month0() as usize];
    format!(
        "Astăzi este {}, {} {} {}",
        weekday,
        date.day(),
        month,
        date.year()
    )
}

/// Picks the startup greeting for the given local hour.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Bună dimineața!"
    } else if hour < 18 {
        "Bună ziua!"
    } else {
        "Bună seara!"
    }
}

/// Picks the startup greeting for the current local time.
pub fn greeting_now() -> &'static str {
    greeting_for_hour(Local::now().hour())
}

/// Failure kinds of one weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The HTTP request itself failed.
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status in the body.
    #[error("weather service returned status {0}")]
    Status(i64),
    /// The body did not carry the expected fields.
    #[error("malformed weather payload: {0}")]
    Payload(String),
}

/// Fields read from a successful weather response.
#[derive(Debug, Deserialize)]
struct WeatherPayload {
    weather: Vec<WeatherCondition>,
    main: WeatherMain,
    wind: WeatherWind,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct WeatherWind {
    speed: f64,
}

/// Fetches and phrases the current weather for one place.
///
/// # Arguments
/// * `client` - Shared HTTP client.
/// * `api_key` - OpenWeatherMap key; an empty key yields a status error.
/// * `place` - Locality name as spoken by the user.
///
/// # Returns
/// * `Ok(String)` - One sentence with description, temperature, humidity
///   and wind speed.
///
/// # Errors
/// Returns a [`WeatherError`] naming the failed stage; callers map it to
/// a fixed spoken message with [`weather_failure_message`].
pub async fn fetch_weather(
    client: &reqwest::Client,
    api_key: &str,
    place: &str,
) -> Result<String, WeatherError> {
    let body: Value = client
        .get(WEATHER_ENDPOINT)
        .query(&[
            ("q", place),
            ("appid", api_key),
            ("units", "metric"),
            ("lang", "ro"),
        ])
        .send()
        .await?
        .json()
        .await?;
    phrase_weather(&body, place)
}

/// Turns one weather response body into the spoken report.
pub fn phrase_weather(body: &Value, place: &str) -> Result<String, WeatherError> {
    let status = embedded_status(body)
        .ok_or_else(|| WeatherError::Payload("missing status field".to_string()))?;
    if status != 200 {
        return Err(WeatherError::Status(status));
    }
    let payload: WeatherPayload =
        serde_json::from_value(body.clone()).map_err(|err| WeatherError::Payload(err.to_string()))?;
    let description = payload
        .weather
        .first()
        .map(|condition| condition.description.as_str())
        .ok_or_else(|| WeatherError::Payload("empty conditions list".to_string()))?;
    Ok(format!(
        "În {} este acum {} cu temperatura de {} grade Celsius, \
         umiditatea este de {}%, iar viteza vântului este de {} metri pe secundă.",
        place, description, payload.main.temp, payload.main.humidity, payload.wind.speed
    ))
}

/// Maps a lookup failure to the fixed user-facing message.
pub fn weather_failure_message(err: &WeatherError) -> &'static str {
    match err {
        WeatherError::Status(_) => "Nu am putut obține date despre vreme.",
        WeatherError::Transport(_) | WeatherError::Payload(_) => {
            "Eroare la preluarea datelor meteo."
        }
    }
}

// The service encodes the status as a number on success and as a string
// on error responses.
fn embedded_status(body: &Value) -> Option<i64> {
    let cod = body.get("cod")?;
    cod.as_i64()
        .or_else(|| cod.as_str().and_then(|raw| raw.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn greeting_follows_the_hour() {
        assert_eq!(greeting_for_hour(0), "Bună dimineața!");
        assert_eq!(greeting_for_hour(11), "Bună dimineața!");
        assert_eq!(greeting_for_hour(12), "Bună ziua!");
        assert_eq!(greeting_for_hour(17), "Bună ziua!");
        assert_eq!(greeting_for_hour(18), "Bună seara!");
        assert_eq!(greeting_for_hour(23), "Bună seara!");
    }

    #[test]
    fn dates_use_romanian_names() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).expect("valid date");
        assert_eq!(format_date(date), "Astăzi este joi, 6 august 2026");
    }

    #[test]
    fn weather_report_carries_all_four_values() {
        let body = json!({
            "cod": 200,
            "weather": [{"description": "ploaie"}],
            "main": {"temp": 14.0, "humidity": 80},
            "wind": {"speed": 3.0}
        });
        let report = phrase_weather(&body, "Cluj").expect("phrase weather");
        assert_eq!(
            report,
            "În Cluj este acum ploaie cu temperatura de 14 grade Celsius, \
             umiditatea este de 80%, iar viteza vântului este de 3 metri pe secundă."
        );
    }

    #[test]
    fn non_success_status_is_not_a_crash() {
        let body = json!({"cod": "404", "message": "city not found"});
        let err = phrase_weather(&body, "Atlantida").expect_err("must fail");
        assert!(matches!(err, WeatherError::Status(404)));
        assert_eq!(
            weather_failure_message(&err),
            "Nu am putut obține date despre vreme."
        );
    }

    #[test]
    fn malformed_payload_maps_to_the_transport_message() {
        let body = json!({"cod": 200, "weather": []});
        let err = phrase_weather(&body, "Cluj").expect_err("must fail");
        assert_eq!(
            weather_failure_message(&err),
            "Eroare la preluarea datelor meteo."
        );
    }

    #[test]
    fn status_field_parses_both_encodings() {
        assert_eq!(embedded_status(&json!({"cod": 200})), Some(200));
        assert_eq!(embedded_status(&json!({"cod": "401"})), Some(401));
        assert_eq!(embedded_status(&json!({})), None);
    }
}
