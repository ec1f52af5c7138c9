/*
 * @file settings.rs
 * @brief Runtime configuration loaded from config.json
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

//! Runtime configuration with baked-in defaults and environment overrides.

use serde::Deserialize;
use std::{env, fs};

/// Path to the JSON configuration file that holds runtime defaults.
const CONFIG_PATH: &str = "config.json";

/// Strongly typed representation of `config.json`.
///
/// # Details
/// Every field has a baked-in default so the assistant starts with no
/// configuration file at all. Secrets such as the weather API key are
/// usually supplied through the environment instead of the file.
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    /// Place used for weather lookups when the user gives none.
    #[serde(default = "default_place")]
    pub default_place: String,
    /// OpenWeatherMap API key; overridable via `ASISTENT_WEATHER_KEY`.
    #[serde(default)]
    pub weather_api_key: String,
    /// Browser binary used for web search and media playback. When absent
    /// the platform default opener handles plain URLs and the WebDriver
    /// endpoint picks its own browser.
    #[serde(default)]
    pub browser_binary: Option<String>,
    /// WebDriver endpoint for the media session; overridable via
    /// `ASISTENT_WEBDRIVER_URL`.
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    /// Persistent browser profile directory used by the media session.
    #[serde(default)]
    pub browser_profile_dir: Option<String>,
    /// Path checked by the secret command.
    #[serde(default = "default_secret_path")]
    pub secret_path: String,
    /// Text-to-speech program and its fixed arguments.
    #[serde(default = "default_tts_program")]
    pub tts_program: String,
    #[serde(default = "default_tts_args")]
    pub tts_args: Vec<String>,
    /// Whisper GGML model used by the `microphone` feature.
    #[serde(default = "default_whisper_model_path")]
    pub whisper_model_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_place: default_place(),
            weather_api_key: String::new(),
            browser_binary: None,
            webdriver_url: default_webdriver_url(),
            browser_profile_dir: None,
            secret_path: default_secret_path(),
            tts_program: default_tts_program(),
            tts_args: default_tts_args(),
            whisper_model_path: default_whisper_model_path(),
        }
    }
}

impl Settings {
    /// Loads configuration from `config.json`, falling back to baked
    /// defaults when the file is missing or invalid.
    ///
    /// # Returns
    /// * `Settings` - The loaded or default configuration.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_PATH) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!("config parse error ({}): {}", CONFIG_PATH, err);
                    Self::default()
                }
            },
            Err(err) => {
                log::debug!("config load error ({}): {}", CONFIG_PATH, err);
                Self::default()
            }
        }
    }
}

/// Determines the weather API key from the environment or configuration.
///
/// # Arguments
/// * `settings` - The loaded configuration.
///
/// # Returns
/// * `String` - The key to send to the weather service; may be empty.
pub fn weather_api_key(settings: &Settings) -> String {
    env::var("ASISTENT_WEATHER_KEY").unwrap_or_else(|_| settings.weather_api_key.clone())
}

/// Determines the WebDriver endpoint from the environment or configuration.
///
/// # Arguments
/// * `settings` - The loaded configuration.
///
/// # Returns
/// * `String` - The endpoint URL for the media session.
pub fn webdriver_url(settings: &Settings) -> String {
    env::var("ASISTENT_WEBDRIVER_URL").unwrap_or_else(|_| settings.webdriver_url.clone())
}

fn default_place() -> String {
    "București".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_secret_path() -> String {
    "secret/335idream.jpg".to_string()
}

fn default_tts_program() -> String {
    if cfg!(target_os = "macos") {
        "say".to_string()
    } else {
        "espeak".to_string()
    }
}

fn default_tts_args() -> Vec<String> {
    if cfg!(target_os = "macos") {
        Vec::new()
    } else {
        vec!["-v".to_string(), "ro".to_string()]
    }
}

fn default_whisper_model_path() -> String {
    "models/ggml-base.bin".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let settings = Settings::default();
        assert_eq!(settings.default_place, "București");
        assert_eq!(settings.webdriver_url, "http://localhost:9515");
        assert!(settings.browser_binary.is_none());
        assert!(!settings.whisper_model_path.is_empty());
    }

    #[test]
    fn empty_json_deserializes_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").expect("parse empty config");
        assert_eq!(settings.default_place, Settings::default().default_place);
        assert_eq!(settings.secret_path, Settings::default().secret_path);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"default_place": "Cluj"}"#).expect("parse partial config");
        assert_eq!(settings.default_place, "Cluj");
        assert_eq!(settings.webdriver_url, default_webdriver_url());
    }
}
