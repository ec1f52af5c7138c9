/*
 * @file interpreter.rs
 * @brief Utterance interpretation and command routing
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

//! Command interpretation over an ordered rule catalog.
//!
//! Matching is substring containment against trigger phrases, tested top
//! to bottom; the first satisfied rule wins and no further rules are
//! tried. Precedence between overlapping phrases is therefore a property
//! of the catalog itself: rule order plus per-rule exclusion words, not
//! an accident of handler code.

use crate::apps::{AppCatalog, AppEntry};

/// One action the assistant can perform.
///
/// # Details
/// Produced by [`Interpreter::interpret`] and consumed by the runtime
/// dispatch loop. Application launches carry their catalog entry so the
/// dispatcher needs no second lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Flip between voice and text input.
    ToggleInput,
    /// Open the configured secret file.
    Secret,
    /// Translate part of the utterance into another language.
    Translate,
    /// Speak the current time.
    CurrentTime,
    /// Speak the current date.
    CurrentDate,
    /// Fetch and speak the weather for a requested place.
    Weather,
    /// Start an external application.
    Launch(AppEntry),
    /// Open the Google landing page in a browser.
    OpenGoogle,
    /// Open a Google search for the extracted term.
    WebSearch,
    /// Search YouTube and hand the user a playback remote.
    PlayMedia,
    /// Capture the screen to a timestamped file.
    Screenshot,
    /// Stop the assistant after the current iteration.
    Exit,
}

/// How a rule's trigger phrases are compared against the utterance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatchMode {
    /// Any trigger contained anywhere in the utterance.
    Contains,
    /// The whole utterance equals one of the triggers.
    Exact,
}

/// How a matched rule extracts its argument text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArgumentSpec {
    /// The action takes no argument.
    NoArgument,
    /// Remove every occurrence of the matched trigger and trim.
    StripTrigger,
    /// Keep only the text after the last occurrence of the trigger.
    TailAfterTrigger,
    /// Hand the full utterance to the handler's own parser.
    WholeUtterance,
}

/// One entry of the command catalog.
#[derive(Clone, Debug)]
pub struct CommandRule {
    action: Action,
    mode: MatchMode,
    triggers: Vec<String>,
    excludes: Vec<String>,
    argument: ArgumentSpec,
}

impl CommandRule {
    fn matches(&self, utterance: &str) -> bool {
        match self.mode {
            MatchMode::Exact => self.triggers.iter().any(|t| utterance == t),
            MatchMode::Contains => {
                self.triggers.iter().any(|t| utterance.contains(t.as_str()))
                    && !self.excludes.iter().any(|e| utterance.contains(e.as_str()))
            }
        }
    }

    fn extract(&self, utterance: &str) -> Option<String> {
        let raw = match self.argument {
            ArgumentSpec::NoArgument => return None,
            ArgumentSpec::WholeUtterance => utterance.to_string(),
            ArgumentSpec::StripTrigger => {
                let trigger = self.matched_trigger(utterance)?;
                utterance.replace(trigger, "")
            }
            ArgumentSpec::TailAfterTrigger => {
                let trigger = self.matched_trigger(utterance)?;
                utterance.rsplit(trigger).next()?.to_string()
            }
        };
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else {
            Some(raw.to_string())
        }
    }

    fn matched_trigger(&self, utterance: &str) -> Option<&str> {
        self.triggers
            .iter()
            .map(String::as_str)
            .find(|t| utterance.contains(t))
    }
}

/// Result of interpreting one utterance.
#[derive(Clone, Debug, PartialEq)]
pub enum Interpretation {
    /// Blank input; the loop continues silently.
    Empty,
    /// Exactly one rule matched.
    Dispatch {
        action: Action,
        argument: Option<String>,
    },
    /// No rule matched; the assistant reports it cannot do that yet.
    Unrecognized,
}

/// Routes utterances through the command catalog.
pub struct Interpreter {
    rules: Vec<CommandRule>,
}

impl Interpreter {
    /// Builds the catalog, splicing the application entries into the
    /// documented precedence order.
    pub fn new(apps: &AppCatalog) -> Self {
        Self {
            rules: command_catalog(apps),
        }
    }

    /// Maps one utterance to at most one action.
    ///
    /// # Details
    /// The utterance is lowercased and trimmed first, so routing does not
    /// depend on surrounding whitespace or letter case. Blank input
    /// produces [`Interpretation::Empty`], an unmatched utterance
    /// [`Interpretation::Unrecognized`].
    ///
    /// # Arguments
    /// * `utterance` - One unit of user input, raw.
    ///
    /// # Returns
    /// * `Interpretation` - The routing decision and any extracted
    ///   argument text.
    pub fn interpret(&self, utterance: &str) -> Interpretation {
        let normalized = utterance.trim().to_lowercase();
        if normalized.is_empty() {
            return Interpretation::Empty;
        }
        for rule in &self.rules {
            if rule.matches(&normalized) {
                return Interpretation::Dispatch {
                    argument: rule.extract(&normalized),
                    action: rule.action.clone(),
                };
            }
        }
        Interpretation::Unrecognized
    }
}

fn rule(
    action: Action,
    mode: MatchMode,
    triggers: &[&str],
    excludes: &[&str],
    argument: ArgumentSpec,
) -> CommandRule {
    CommandRule {
        action,
        mode,
        triggers: triggers.iter().map(|t| t.to_string()).collect(),
        excludes: excludes.iter().map(|e| e.to_string()).collect(),
        argument,
    }
}

/// Assembles the full catalog in precedence order.
///
/// # Details
/// Exact-phrase rules come first, then the rules whose triggers are the
/// most specific substrings. Two orderings are load-bearing: application
/// entries precede the date rule, whose bare trigger "zi" is contained in
/// "muzica", and the translate rule precedes the date rule, whose trigger
/// "ziua" appears in phrases like "tradu bună ziua in engleza". The
/// search rules exclude "melodia" so song requests always reach the media
/// handler.
fn command_catalog(apps: &AppCatalog) -> Vec<CommandRule> {
    let mut rules = vec![
        rule(
            Action::ToggleInput,
            MatchMode::Exact,
            &["schimba input", "schimbă input"],
            &[],
            ArgumentSpec::NoArgument,
        ),
        rule(
            Action::Secret,
            MatchMode::Exact,
            &["cod roșu", "comanda secretă", "secret"],
            &[],
            ArgumentSpec::NoArgument,
        ),
        rule(
            Action::Translate,
            MatchMode::Contains,
            &["tradu", "traducere"],
            &[],
            ArgumentSpec::WholeUtterance,
        ),
        rule(
            Action::CurrentTime,
            MatchMode::Contains,
            &["ora"],
            &[],
            ArgumentSpec::NoArgument,
        ),
        rule(
            Action::Weather,
            MatchMode::Contains,
            &["vremea", "cum este afară"],
            &[],
            ArgumentSpec::NoArgument,
        ),
    ];
    for app in &apps.apps {
        let keywords: Vec<&str> = app.keywords.iter().map(String::as_str).collect();
        rules.push(rule(
            Action::Launch(app.clone()),
            MatchMode::Contains,
            &keywords,
            &[],
            ArgumentSpec::NoArgument,
        ));
    }
    rules.push(rule(
        Action::CurrentDate,
        MatchMode::Contains,
        &["data", "ziua", "zi"],
        &[],
        ArgumentSpec::NoArgument,
    ));
    rules.push(rule(
        Action::OpenGoogle,
        MatchMode::Contains,
        &["google"],
        &["melodia"],
        ArgumentSpec::NoArgument,
    ));
    rules.push(rule(
        Action::WebSearch,
        MatchMode::Contains,
        &["caută", "cauta"],
        &["melodia"],
        ArgumentSpec::StripTrigger,
    ));
    rules.push(rule(
        Action::PlayMedia,
        MatchMode::Contains,
        &["melodia"],
        &[],
        ArgumentSpec::TailAfterTrigger,
    ));
    rules.push(rule(
        Action::Screenshot,
        MatchMode::Contains,
        &["screenshot", "captură"],
        &[],
        ArgumentSpec::NoArgument,
    ));
    rules.push(rule(
        Action::Exit,
        MatchMode::Contains,
        &["iesi", "ieși", "închide", "stop"],
        &[],
        ArgumentSpec::NoArgument,
    ));
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps;

    fn interpreter() -> Interpreter {
        Interpreter::new(&apps::default_catalog())
    }

    fn dispatched(utterance: &str) -> (Action, Option<String>) {
        match interpreter().interpret(utterance) {
            Interpretation::Dispatch { action, argument } => (action, argument),
            other => panic!("expected dispatch for {:?}, got {:?}", utterance, other),
        }
    }

    #[test]
    fn blank_input_is_a_no_op() {
        assert_eq!(interpreter().interpret("   "), Interpretation::Empty);
        assert_eq!(interpreter().interpret(""), Interpretation::Empty);
    }

    #[test]
    fn unknown_input_is_reported_not_errored() {
        assert_eq!(
            interpreter().interpret("fă-mi o cafea"),
            Interpretation::Unrecognized
        );
    }

    #[test]
    fn routing_ignores_case_and_whitespace() {
        let (action, _) = dispatched("  Ce Ora Este  ");
        assert_eq!(action, Action::CurrentTime);
    }

    #[test]
    fn time_wins_over_date_for_time_questions() {
        let (action, _) = dispatched("ce ora este");
        assert_eq!(action, Action::CurrentTime);
    }

    #[test]
    fn date_phrases_reach_the_date_handler() {
        let (action, _) = dispatched("ce zi este azi");
        assert_eq!(action, Action::CurrentDate);
    }

    #[test]
    fn song_requests_beat_generic_search() {
        let (action, argument) = dispatched("caută pe google melodia shape of you");
        assert_eq!(action, Action::PlayMedia);
        assert_eq!(argument.as_deref(), Some("shape of you"));
    }

    #[test]
    fn plain_google_opens_the_browser() {
        let (action, _) = dispatched("deschide google");
        assert_eq!(action, Action::OpenGoogle);
    }

    #[test]
    fn search_extracts_the_term() {
        let (_, argument) = dispatched("caută rețete de sarmale");
        assert_eq!(argument.as_deref(), Some("rețete de sarmale"));
    }

    #[test]
    fn bare_song_trigger_yields_no_argument() {
        let (action, argument) = dispatched("melodia");
        assert_eq!(action, Action::PlayMedia);
        assert_eq!(argument, None);
    }

    #[test]
    fn toggle_requires_the_exact_phrase() {
        let (action, _) = dispatched("schimbă input");
        assert_eq!(action, Action::ToggleInput);
        assert_eq!(
            interpreter().interpret("schimbă inputul acum"),
            Interpretation::Unrecognized
        );
    }

    #[test]
    fn secret_requires_the_exact_phrase() {
        let (action, _) = dispatched("cod roșu");
        assert_eq!(action, Action::Secret);
    }

    #[test]
    fn exit_phrases_terminate() {
        for phrase in ["vreau sa iesi", "închide", "stop"] {
            let (action, _) = dispatched(phrase);
            assert_eq!(action, Action::Exit, "phrase {:?}", phrase);
        }
    }

    #[test]
    fn music_app_is_not_shadowed_by_the_date_trigger() {
        // "muzica" contains the bare date trigger "zi".
        let (action, _) = dispatched("deschide muzica");
        match action {
            Action::Launch(entry) => assert_eq!(entry.name, "Spotify"),
            other => panic!("expected a launch, got {:?}", other),
        }
    }

    #[test]
    fn translation_is_not_shadowed_by_the_date_trigger() {
        // "bună ziua" contains the date trigger "ziua".
        let (action, argument) = dispatched("tradu bună ziua in engleza");
        assert_eq!(action, Action::Translate);
        assert_eq!(argument.as_deref(), Some("tradu bună ziua in engleza"));
    }

    #[test]
    fn screenshot_phrases_route_to_capture() {
        let (action, _) = dispatched("fă o captură de ecran");
        assert_eq!(action, Action::Screenshot);
    }

    #[test]
    fn weather_phrases_route_to_weather() {
        for phrase in ["cum este vremea", "cum este afară"] {
            let (action, _) = dispatched(phrase);
            assert_eq!(action, Action::Weather, "phrase {:?}", phrase);
        }
    }
}
