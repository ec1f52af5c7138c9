/*
 * @file media.rs
 * @brief YouTube media session and playback remote
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

//! Media playback through a WebDriver-controlled browser.
//!
//! One session per song request: search YouTube, click the first result,
//! then hand the user a voice remote that toggles playback, skips, or
//! closes the session. The session owns its browser connection for its
//! whole lifetime.

use std::time::Duration;

use serde_json::json;
use thirtyfour::error::WebDriverError;
use thirtyfour::extensions::cdp::ChromeDevTools;
use thirtyfour::prelude::*;
use thirtyfour::{ChromeCapabilities, ChromiumLikeCapabilities};
use thiserror::Error;

use crate::input::UtteranceSource;
use crate::settings::{self, Settings};
use crate::speech::Speaker;

/// Where playback sessions start.
const YOUTUBE_URL: &str = "https://www.youtube.com";

/// Name attribute of the search input on the landing page.
const SEARCH_INPUT_NAME: &str = "search_query";

/// First search-result thumbnail link.
const FIRST_RESULT_SELECTOR: &str = "ytd-video-renderer ytd-thumbnail a#thumbnail";

/// Native player controls.
const PLAY_BUTTON_CLASS: &str = "ytp-play-button";
const NEXT_BUTTON_CLASS: &str = "ytp-next-button";

/// WebDriver key code for Enter.
const ENTER_KEY: &str = "\u{e007}";

/// Upper bound on each element wait, with its polling interval.
const ELEMENT_WAIT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Prompt repeated by the playback remote.
const REMOTE_PROMPT: &str = "Spune o comandă pentru YouTube: play, pauză, skip sau închide.";

/// Apology spoken when a session cannot start or find the song.
const PLAYBACK_FAILURE: &str = "A apărut o eroare la redarea melodiei.";

/// Phrases understood by the playback remote. Play and pause intents both
/// land on the same player toggle; the control does not expose separate
/// actions. Close keeps its historical overlap with the pause phrases, so
/// "oprește" and "stop" toggle rather than close.
const PLAY_PHRASES: [&str; 4] = ["play", "porneste", "redă", "continuă"];
const PAUSE_PHRASES: [&str; 4] = ["pauză", "stop", "oprește", "pausă"];
const SKIP_PHRASES: [&str; 4] = ["skip", "următoarea", "sari", "saltă"];
const CLOSE_PHRASES: [&str; 4] = ["închide", "gata", "oprește", "stop"];

/// One decoded remote-loop utterance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RemoteCommand {
    /// Click the player's play/pause toggle.
    TogglePlayback,
    /// Click the next-track control.
    Skip,
    /// Quit the browser session and return to the outer loop.
    Close,
    /// Nothing matched; the remote re-prompts.
    Unknown,
}

/// Classifies one utterance inside the remote loop.
pub fn classify_remote(utterance: &str) -> RemoteCommand {
    let normalized = utterance.trim().to_lowercase();
    let contains_any =
        |phrases: &[&str]| phrases.iter().any(|phrase| normalized.contains(phrase));
    if contains_any(&PLAY_PHRASES) || contains_any(&PAUSE_PHRASES) {
        RemoteCommand::TogglePlayback
    } else if contains_any(&SKIP_PHRASES) {
        RemoteCommand::Skip
    } else if contains_any(&CLOSE_PHRASES) {
        RemoteCommand::Close
    } else {
        RemoteCommand::Unknown
    }
}

/// Failure kinds of one media session, by stage.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The browser session could not be created or prepared.
    #[error("browser session setup failed: {0}")]
    Session(WebDriverError),
    /// The search or first-result click failed, usually a wait timeout.
    #[error("video search failed: {0}")]
    Search(WebDriverError),
    /// A native player control could not be located or clicked.
    #[error("player control failed: {0}")]
    Control(WebDriverError),
}

/// One live browser-automation session.
pub struct MediaSession {
    driver: WebDriver,
}

impl MediaSession {
    /// Launches the controlled browser and applies the automation mask.
    ///
    /// # Details
    /// The browser binary and persistent profile directory come from the
    /// configuration. Automation switches are stripped and
    /// `navigator.webdriver` is masked through CDP before any page loads,
    /// otherwise the site degrades the player controls.
    ///
    /// # Errors
    /// Returns [`MediaError::Session`]; a half-open session is quit
    /// before the error is surfaced.
    pub async fn open(settings: &Settings) -> Result<Self, MediaError> {
        let caps = build_capabilities(settings).map_err(MediaError::Session)?;
        let driver = WebDriver::new(&settings::webdriver_url(settings), caps)
            .await
            .map_err(MediaError::Session)?;
        if let Err(err) = mask_automation(&driver).await {
            let _ = driver.clone().quit().await;
            return Err(MediaError::Session(err));
        }
        Ok(Self { driver })
    }

    /// Searches the platform and starts the first matching video.
    ///
    /// # Arguments
    /// * `query` - Song name as extracted from the utterance.
    ///
    /// # Errors
    /// Returns [`MediaError::Search`] on any navigation, wait or click
    /// failure; there is no retry.
    pub async fn play_first_result(&self, query: &str) -> Result<(), MediaError> {
        self.driver
            .goto(YOUTUBE_URL)
            .await
            .map_err(MediaError::Search)?;
        let search_box = self
            .driver
            .query(By::Name(SEARCH_INPUT_NAME))
            .wait(ELEMENT_WAIT, POLL_INTERVAL)
            .first()
            .await
            .map_err(MediaError::Search)?;
        search_box.clear().await.map_err(MediaError::Search)?;
        search_box.send_keys(query).await.map_err(MediaError::Search)?;
        search_box
            .send_keys(ENTER_KEY)
            .await
            .map_err(MediaError::Search)?;
        let first_result = self
            .driver
            .query(By::Css(FIRST_RESULT_SELECTOR))
            .wait(ELEMENT_WAIT, POLL_INTERVAL)
            .first()
            .await
            .map_err(MediaError::Search)?;
        first_result.click().await.map_err(MediaError::Search)
    }

    /// Clicks the player's play/pause toggle.
    pub async fn toggle_playback(&self) -> Result<(), MediaError> {
        self.click_control(PLAY_BUTTON_CLASS).await
    }

    /// Clicks the next-track control.
    pub async fn skip(&self) -> Result<(), MediaError> {
        self.click_control(NEXT_BUTTON_CLASS).await
    }

    async fn click_control(&self, class: &str) -> Result<(), MediaError> {
        let control = self
            .driver
            .find(By::ClassName(class))
            .await
            .map_err(MediaError::Control)?;
        control.click().await.map_err(MediaError::Control)
    }

    /// Quits the browser session.
    pub async fn close(self) -> Result<(), MediaError> {
        self.driver.quit().await.map_err(MediaError::Session)
    }

    /// Quits the browser session on a failure path, keeping the original
    /// error as the one reported.
    pub async fn abandon(self) {
        if let Err(err) = self.driver.quit().await {
            log::debug!("browser session cleanup failed: {}", err);
        }
    }
}

fn build_capabilities(settings: &Settings) -> WebDriverResult<ChromeCapabilities> {
    let mut caps = DesiredCapabilities::chrome();
    if let Some(binary) = &settings.browser_binary {
        caps.set_binary(binary)?;
    }
    if let Some(profile) = &settings.browser_profile_dir {
        caps.add_arg(&format!("--user-data-dir={}", profile))?;
    }
    caps.add_arg("--disable-blink-features=AutomationControlled")?;
    caps.add_experimental_option("excludeSwitches", ["enable-automation"])?;
    caps.add_experimental_option("useAutomationExtension", false)?;
    Ok(caps)
}

async fn mask_automation(driver: &WebDriver) -> Result<(), WebDriverError> {
    let dev_tools = ChromeDevTools::new(driver.handle.clone());
    dev_tools
        .execute_cdp_with_params(
            "Page.addScriptToEvaluateOnNewDocument",
            json!({
                "source": "Object.defineProperty(navigator, 'webdriver', { get: () => undefined })"
            }),
        )
        .await
        .map(|_| ())
}

/// Runs one full media session: search, playback, remote loop, teardown.
///
/// # Details
/// Every failure is converted into spoken feedback here; nothing
/// propagates to the outer loop. Control-stage failures keep the session
/// alive, setup and search failures end it.
pub async fn run_media_session(
    settings: &Settings,
    speaker: &Speaker,
    source: &mut UtteranceSource,
    query: &str,
) {
    let session = match MediaSession::open(settings).await {
        Ok(session) => session,
        Err(err) => {
            log::warn!("{}", err);
            speaker.speak(PLAYBACK_FAILURE);
            return;
        }
    };
    if let Err(err) = session.play_first_result(query).await {
        log::warn!("{}", err);
        speaker.speak(PLAYBACK_FAILURE);
        session.abandon().await;
        return;
    }
    speaker.speak(&format!("Redau melodia {}", query));
    remote_loop(&session, speaker, source).await;
    speaker.speak("Închid browserul.");
    if let Err(err) = session.close().await {
        log::warn!("{}", err);
    }
}

async fn remote_loop(session: &MediaSession, speaker: &Speaker, source: &mut UtteranceSource) {
    loop {
        speaker.speak(REMOTE_PROMPT);
        let command = source.next_utterance(speaker);
        if command.trim().is_empty() {
            continue;
        }
        match classify_remote(&command) {
            RemoteCommand::TogglePlayback => match session.toggle_playback().await {
                Ok(()) => speaker.speak("Am comutat play/pauză."),
                Err(err) => {
                    log::warn!("{}", err);
                    speaker.speak("Nu am putut controla play/pauză.");
                }
            },
            RemoteCommand::Skip => match session.skip().await {
                Ok(()) => speaker.speak("Am sărit la următoarea melodie."),
                Err(err) => {
                    log::warn!("{}", err);
                    speaker.speak("Nu am putut să dau skip.");
                }
            },
            RemoteCommand::Close => return,
            RemoteCommand::Unknown => {
                speaker.speak("Nu am înțeles comanda, te rog încearcă din nou.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_phrases_classify_once() {
        assert_eq!(classify_remote("sari la următoarea"), RemoteCommand::Skip);
        assert_eq!(classify_remote("skip"), RemoteCommand::Skip);
    }

    #[test]
    fn play_and_pause_both_toggle() {
        assert_eq!(classify_remote("play"), RemoteCommand::TogglePlayback);
        assert_eq!(classify_remote("pauză"), RemoteCommand::TogglePlayback);
        assert_eq!(classify_remote("continuă"), RemoteCommand::TogglePlayback);
    }

    #[test]
    fn stop_toggles_instead_of_closing() {
        // The pause phrases take precedence over the close phrases.
        assert_eq!(classify_remote("oprește"), RemoteCommand::TogglePlayback);
        assert_eq!(classify_remote("stop"), RemoteCommand::TogglePlayback);
    }

    #[test]
    fn close_phrases_end_the_session() {
        assert_eq!(classify_remote("închide"), RemoteCommand::Close);
        assert_eq!(classify_remote("gata"), RemoteCommand::Close);
    }

    #[test]
    fn unknown_phrases_leave_state_unchanged() {
        assert_eq!(classify_remote("dansează"), RemoteCommand::Unknown);
    }

    #[test]
    fn classification_normalizes_case() {
        assert_eq!(classify_remote("  SKIP  "), RemoteCommand::Skip);
    }
}
