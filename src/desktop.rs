/*
 * @file desktop.rs
 * @brief Screen capture and the secret-file command
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

//! Desktop-level effects: screenshots and the secret-file easter egg.

use std::fs;
use std::path::Path;

use chrono::Local;
use thiserror::Error;
use xcap::Monitor;

/// Directory that accumulates screen captures.
pub const SCREENSHOT_DIR: &str = "screenshots";

/// Failure kinds of one screen capture.
#[derive(Debug, Error)]
pub enum ScreenshotError {
    /// No monitor is attached or visible to the capture backend.
    #[error("no display available")]
    NoDisplay,
    /// The capture backend failed.
    #[error("screen capture failed: {0}")]
    Capture(#[from] xcap::XCapError),
    /// The destination directory could not be created.
    #[error("screenshot directory error: {0}")]
    Io(#[from] std::io::Error),
    /// The image could not be encoded to disk.
    #[error("screenshot encode error: {0}")]
    Encode(String),
}

/// Captures the primary display into a timestamp-named PNG.
///
/// # Details
/// The destination directory is created on first use. The primary
/// monitor is preferred; any monitor serves when none is marked primary.
///
/// # Returns
/// * `Ok(String)` - The file name written under [`SCREENSHOT_DIR`].
///
/// # Errors
/// Returns a [`ScreenshotError`] naming the failed stage.
pub fn take_screenshot() -> Result<String, ScreenshotError> {
    let monitors = Monitor::all()?;
    let monitor = monitors
        .iter()
        .find(|monitor| monitor.is_primary().unwrap_or(false))
        .or_else(|| monitors.first())
        .ok_or(ScreenshotError::NoDisplay)?;
    let image = monitor.capture_image()?;
    fs::create_dir_all(SCREENSHOT_DIR)?;
    let filename = screenshot_filename(Local::now().timestamp());
    image
        .save(Path::new(SCREENSHOT_DIR).join(&filename))
        .map_err(|err| ScreenshotError::Encode(err.to_string()))?;
    Ok(filename)
}

/// Builds the capture file name for one Unix timestamp.
pub fn screenshot_filename(stamp: i64) -> String {
    format!("screenshot_{}.png", stamp)
}

/// Reports whether the secret file is present.
pub fn secret_file_exists(path: &str) -> bool {
    Path::new(path).exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_carry_the_timestamp() {
        assert_eq!(
            screenshot_filename(1_700_000_000),
            "screenshot_1700000000.png"
        );
    }

    #[test]
    fn secret_detection_follows_the_filesystem() {
        let dir = tempfile::tempdir().expect("tempdir");
        let present = dir.path().join("amintire.jpg");
        fs::write(&present, b"x").expect("write file");
        assert!(secret_file_exists(present.to_str().expect("utf8 path")));
        let absent = dir.path().join("lipsa.jpg");
        assert!(!secret_file_exists(absent.to_str().expect("utf8 path")));
    }
}
