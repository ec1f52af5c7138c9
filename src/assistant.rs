/*
 * @file assistant.rs
 * @brief Assistant runtime: greeting, mode choice and the dispatch loop
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

//! Assistant orchestration: one utterance in, one action out, until the
//! user says goodbye.

use anyhow::Result;

use crate::apps::{self, AppEntry};
use crate::browser;
use crate::desktop;
use crate::info;
use crate::input::{self, UtteranceSource};
use crate::interpreter::{Action, Interpretation, Interpreter};
use crate::media;
use crate::settings::{self, Settings};
use crate::speech::Speaker;
use crate::translate;

/// Fixed reply for utterances no rule matches.
const UNRECOGNIZED_REPLY: &str = "Îmi pare rău, nu pot să fac asta încă.";

/// Startup question for the input mode.
const MODE_PROMPT: &str = "Vrei să folosești microfonul? (da/nu): ";

/// Runs the interactive assistant loop until the user exits.
///
/// # Returns
/// `Ok(())` when the user issues an exit phrase.
///
/// # Errors
/// Reserved for fatal startup failures; everything inside the loop is
/// converted to spoken feedback instead.
pub async fn run_assistant() -> Result<()> {
    AssistantRuntime::new().run_loop().await
}

/// Runtime container that owns the HTTP client and every collaborator.
///
/// # Details
/// Holds the shared reqwest client, the configuration, the command
/// catalog interpreter, the speaker and the utterance source for the
/// whole session. The media session is the one collaborator created per
/// request instead, because its browser connection must not outlive one
/// playback handler.
struct AssistantRuntime {
    client: reqwest::Client,
    settings: Settings,
    interpreter: Interpreter,
    speaker: Speaker,
    source: UtteranceSource,
}

impl AssistantRuntime {
    /// Creates a runtime from configuration, starting in text mode.
    fn new() -> Self {
        let settings = Settings::load();
        let catalog = apps::load_catalog();
        Self {
            client: reqwest::Client::new(),
            interpreter: Interpreter::new(&catalog),
            speaker: Speaker::new(&settings),
            source: UtteranceSource::new(&settings),
            settings,
        }
    }

    /// Greets, asks for the input mode, then loops until exit.
    async fn run_loop(mut self) -> Result<()> {
        self.greet();
        if input::confirm(MODE_PROMPT) {
            if cfg!(feature = "microphone") {
                self.source.set_voice(true);
            } else {
                self.speaker
                    .speak("Modul vocal nu este disponibil în această versiune.");
            }
        }
        while self.process_iteration().await {}
        Ok(())
    }

    fn greet(&self) {
        self.speaker.speak(info::greeting_now());
        self.speaker
            .speak("Sunt asistentul tău personal. Cu ce te pot ajuta?");
    }

    /// Executes one read-interpret-dispatch iteration.
    ///
    /// # Returns
    /// `true` to keep looping, `false` after an exit command.
    async fn process_iteration(&mut self) -> bool {
        let utterance = self.source.next_utterance(&self.speaker);
        match self.interpreter.interpret(&utterance) {
            Interpretation::Empty => true,
            Interpretation::Unrecognized => {
                self.speaker.speak(UNRECOGNIZED_REPLY);
                true
            }
            Interpretation::Dispatch { action, argument } => self.dispatch(action, argument).await,
        }
    }

    /// Runs exactly one action handler.
    ///
    /// # Details
    /// Handlers convert their own failures into spoken feedback; only the
    /// exit action influences the loop.
    async fn dispatch(&mut self, action: Action, argument: Option<String>) -> bool {
        match action {
            Action::ToggleInput => self.toggle_input(),
            Action::CurrentTime => self
                .speaker
                .speak(&format!("Sunt ora {}", info::current_time())),
            Action::CurrentDate => self.speaker.speak(&info::current_date()),
            Action::Weather => self.report_weather().await,
            Action::Launch(app) => self.launch_app(&app),
            Action::OpenGoogle => self.open_google(),
            Action::WebSearch => self.web_search(argument),
            Action::PlayMedia => self.play_media(argument).await,
            Action::Secret => self.open_secret(),
            Action::Screenshot => self.capture_screen(),
            Action::Translate => self.translate(argument).await,
            Action::Exit => {
                self.speaker.speak("La revedere!");
                return false;
            }
        }
        true
    }

    fn toggle_input(&mut self) {
        if !cfg!(feature = "microphone") {
            self.speaker
                .speak("Modul vocal nu este disponibil în această versiune.");
            return;
        }
        if self.source.toggle() {
            self.speaker.speak("Am schimbat la modul vocal.");
        } else {
            self.speaker.speak("Am schimbat la modul scris.");
        }
    }

    async fn report_weather(&mut self) {
        self.speaker
            .speak("Spune localitatea pentru care vrei să știi vremea.");
        let mut place = self.source.next_utterance(&self.speaker);
        if place.trim().is_empty() {
            place = self.settings.default_place.clone();
        }
        let api_key = settings::weather_api_key(&self.settings);
        match info::fetch_weather(&self.client, &api_key, &place).await {
            Ok(report) => self.speaker.speak(&report),
            Err(err) => {
                log::warn!("weather lookup failed: {}", err);
                self.speaker.speak(info::weather_failure_message(&err));
            }
        }
    }

    fn launch_app(&self, app: &AppEntry) {
        self.speaker.speak(&app.spoken);
        if let Err(err) = apps::launch(app) {
            log::warn!("launch of {} failed: {}", app.name, err);
            self.speaker.speak(&apps::launch_failure_message(app));
        }
    }

    fn open_google(&self) {
        self.speaker.speak("Deschid Google.");
        if let Err(err) = browser::open_url(&self.settings, browser::GOOGLE_URL) {
            log::warn!("browser launch failed: {}", err);
            self.speaker.speak("Nu am reușit să deschid browserul.");
        }
    }

    fn web_search(&mut self, argument: Option<String>) {
        let Some(term) = self.resolve_argument(argument, "Spune-mi ce vrei să caut.") else {
            return;
        };
        if let Err(err) = browser::open_search(&self.settings, &term) {
            log::warn!("browser launch failed: {}", err);
            self.speaker.speak("Nu am reușit să deschid browserul.");
        }
    }

    async fn play_media(&mut self, argument: Option<String>) {
        let Some(song) = self.resolve_argument(argument, "Spune-mi ce melodie vrei să caut.")
        else {
            return;
        };
        self.speaker
            .speak(&format!("Caut pe YouTube melodia {}", song));
        media::run_media_session(&self.settings, &self.speaker, &mut self.source, &song).await;
    }

    fn open_secret(&self) {
        self.speaker.speak("Execut comanda secretă.");
        if !desktop::secret_file_exists(&self.settings.secret_path) {
            self.speaker.speak("Fișierul secret nu există.");
            return;
        }
        match browser::open_with_os(&self.settings.secret_path) {
            Ok(()) => self.speaker.speak("Am deschis fișierul secret."),
            Err(err) => {
                log::warn!("secret file open failed: {}", err);
                self.speaker.speak("Nu am reușit să deschid fișierul secret.");
            }
        }
    }

    fn capture_screen(&self) {
        match desktop::take_screenshot() {
            Ok(filename) => {
                println!("Screenshot salvat: {}", filename);
                self.speaker
                    .speak(&format!("Am salvat captura de ecran ca {}", filename));
            }
            Err(err) => {
                log::warn!("screenshot failed: {}", err);
                self.speaker.speak("Nu am reușit să fac captura de ecran.");
            }
        }
    }

    async fn translate(&mut self, argument: Option<String>) {
        let utterance = argument.unwrap_or_default();
        let Some(request) = translate::parse_request(&utterance) else {
            self.speaker.speak("Te rog spune în ce limbă să traduc.");
            return;
        };
        match translate::translate(&self.client, &request).await {
            Ok(text) => self
                .speaker
                .speak(&format!("Traducerea este: {}", text)),
            Err(err) => {
                log::warn!("translation failed: {}", err);
                self.speaker.speak("A apărut o eroare la traducere.");
            }
        }
    }

    /// Returns the extracted argument, or asks one clarifying follow-up.
    ///
    /// # Details
    /// A blank follow-up abandons the command silently; the prompt was
    /// the user-visible feedback.
    fn resolve_argument(&mut self, argument: Option<String>, prompt: &str) -> Option<String> {
        if let Some(argument) = argument {
            return Some(argument);
        }
        self.speaker.speak(prompt);
        let follow_up = self.source.next_utterance(&self.speaker);
        let follow_up = follow_up.trim();
        if follow_up.is_empty() {
            None
        } else {
            Some(follow_up.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_reply_matches_the_contract() {
        assert_eq!(UNRECOGNIZED_REPLY, "Îmi pare rău, nu pot să fac asta încă.");
    }

    #[test]
    fn runtime_builds_from_defaults() {
        let runtime = AssistantRuntime::new();
        assert!(!runtime.source.voice());
    }
}
