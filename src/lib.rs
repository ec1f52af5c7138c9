/*
 * @file lib.rs
 * @brief Asistent library root
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

//! Asistent - a Romanian-language personal voice/text assistant.
//!
//! This library provides the full command pipeline behind the `asistent`
//! binary:
//! - a rule-catalog interpreter that routes one utterance to one action,
//! - action handlers for time, date, weather, application launch, web
//!   search, screenshots, translation and a secret file,
//! - a YouTube media session driven over WebDriver with an interactive
//!   playback remote,
//! - typed and spoken utterance sources, with local Whisper transcription
//!   behind the `microphone` feature.
//!
//! # Example
//! ```no_run
//! use anyhow::Result;
//! use asistent::assistant;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     dotenv::dotenv().ok();
//!     env_logger::init();
//!     assistant::run_assistant().await
//! }
//! ```

pub mod apps;
pub mod assistant;
pub mod browser;
pub mod desktop;
pub mod info;
pub mod input;
pub mod interpreter;
pub mod media;
#[cfg(feature = "microphone")]
pub mod recognizer;
pub mod settings;
pub mod speech;
pub mod translate;
