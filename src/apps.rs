/*
 * @file apps.rs
 * @brief Launchable-application catalog and matching data
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

//! Launchable-application configuration.
//!
//! The catalog maps spoken keywords to external programs. It is loaded
//! from `apps.json` so machine-specific paths stay out of the code, with
//! a baked-in default set when the file is absent.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::process::Command;

/// Path to the application catalog file.
const APPS_FILE: &str = "apps.json";

/// One launchable application.
///
/// # Details
/// Keywords feed the command catalog as ordinary trigger phrases; the
/// program and arguments are handed to the process spawner untouched.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AppEntry {
    /// Display name used in spoken failure messages.
    pub name: String,
    /// Trigger phrases that select this application.
    pub keywords: Vec<String>,
    /// Program path or registered command name.
    pub program: String,
    /// Fixed arguments passed before launch.
    #[serde(default)]
    pub args: Vec<String>,
    /// Confirmation spoken right before the launch attempt.
    pub spoken: String,
}

/// Container for all configured applications.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AppCatalog {
    /// Applications in precedence order.
    pub apps: Vec<AppEntry>,
}

/// Loads the application catalog from `apps.json`.
///
/// # Details
/// Falls back to the default set when the file is missing or cannot be
/// parsed, so the assistant always has something to launch.
///
/// # Returns
/// * `AppCatalog` - Loaded or default catalog.
pub fn load_catalog() -> AppCatalog {
    load_catalog_from_file().unwrap_or_else(|err| {
        log::debug!("using default application catalog: {}", err);
        default_catalog()
    })
}

fn load_catalog_from_file() -> Result<AppCatalog> {
    let content =
        fs::read_to_string(APPS_FILE).with_context(|| format!("Failed to read {}", APPS_FILE))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", APPS_FILE))
}

/// Provides the default catalog when `apps.json` is unavailable.
///
/// # Details
/// Mirrors the household setup this assistant grew up on; paths and
/// registered names are Windows-centric and meant to be overridden
/// through `apps.json` on other machines.
///
/// # Returns
/// * `AppCatalog` - Default application set.
pub fn default_catalog() -> AppCatalog {
    AppCatalog {
        apps: vec![
            entry(
                "Calculator",
                &["deschide calculator"],
                "calc.exe",
                &[],
                "Deschid calculatorul",
            ),
            entry(
                "Word",
                &["deschide word", "word"],
                "cmd",
                &["/C", "start", "winword"],
                "Deschid Microsoft Word.",
            ),
            entry(
                "Excel",
                &["deschide excel", "excel"],
                "cmd",
                &["/C", "start", "excel"],
                "Deschid Microsoft Excel.",
            ),
            entry(
                "PowerPoint",
                &["deschide powerpoint", "powerpoint", "prezentare"],
                "cmd",
                &["/C", "start", "powerpnt"],
                "Deschid Microsoft PowerPoint.",
            ),
            entry(
                "Brave",
                &["deschide brave", "brave"],
                r"C:\Program Files\BraveSoftware\Brave-Browser\Application\brave.exe",
                &[],
                "Deschid browserul Brave.",
            ),
            entry(
                "Spotify",
                &["deschide spotify", "muzica"],
                "cmd",
                &["/C", "start", "spotify"],
                "Deschid Spotify.",
            ),
            entry(
                "Arc",
                &["deschide arc", "browser arc"],
                r"C:\Users\axeli\AppData\Local\Microsoft\WindowsApps\Arc.exe",
                &[],
                "Deschid Arc Browser.",
            ),
        ],
    }
}

fn entry(name: &str, keywords: &[&str], program: &str, args: &[&str], spoken: &str) -> AppEntry {
    AppEntry {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        program: program.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
        spoken: spoken.to_string(),
    }
}

/// Starts the given application without waiting for it.
///
/// # Arguments
/// * `app` - Catalog entry to launch.
///
/// # Errors
/// Returns the spawn error; there is no verification beyond that the
/// process started.
pub fn launch(app: &AppEntry) -> std::io::Result<()> {
    Command::new(&app.program).args(&app.args).spawn().map(|_| ())
}

/// Builds the spoken message for a failed launch.
pub fn launch_failure_message(app: &AppEntry) -> String {
    format!(
        "Nu am reușit să pornesc {}. Verifică dacă este instalat.",
        app.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_not_empty() {
        assert!(!default_catalog().apps.is_empty());
    }

    #[test]
    fn music_keyword_selects_spotify() {
        let catalog = default_catalog();
        let spotify = catalog
            .apps
            .iter()
            .find(|app| app.keywords.iter().any(|k| k == "muzica"))
            .expect("music keyword registered");
        assert_eq!(spotify.name, "Spotify");
    }

    #[test]
    fn catalog_parses_from_json() {
        let raw = r#"{"apps": [{
            "name": "Editor",
            "keywords": ["deschide editor"],
            "program": "gedit",
            "spoken": "Deschid editorul."
        }]}"#;
        let catalog: AppCatalog = serde_json::from_str(raw).expect("parse catalog");
        assert_eq!(catalog.apps.len(), 1);
        assert!(catalog.apps[0].args.is_empty());
    }

    #[test]
    fn failure_message_names_the_app() {
        let catalog = default_catalog();
        let message = launch_failure_message(&catalog.apps[0]);
        assert!(message.contains("Calculator"));
    }
}
