//! Utterance sources.
//!
//! One source produces all user input: a console read in text mode, or a
//! microphone capture plus transcription in voice mode. Voice mode falls
//! back to the console whenever recognition fails.

use std::io::{self, BufRead, Write};

#[cfg(feature = "microphone")]
use crate::recognizer::Recognizer;
use crate::settings::Settings;
use crate::speech::Speaker;

/// Console prompt shown before each typed command.
const TEXT_PROMPT: &str = "Scrie comanda ta aici: ";

/// Produces one normalized utterance per call, honoring the session mode.
pub struct UtteranceSource {
    voice: bool,
    #[cfg(feature = "microphone")]
    recognizer: Recognizer,
}

impl UtteranceSource {
    /// Creates a source in text mode.
    #[cfg(feature = "microphone")]
    pub fn new(settings: &Settings) -> Self {
        Self {
            voice: false,
            recognizer: Recognizer::new(settings),
        }
    }

    /// Creates a source in text mode.
    #[cfg(not(feature = "microphone"))]
    pub fn new(_settings: &Settings) -> Self {
        Self { voice: false }
    }

    /// Reports whether the source currently listens to the microphone.
    pub fn voice(&self) -> bool {
        self.voice
    }

    /// Switches to voice mode. Ignored in builds without the
    /// `microphone` feature.
    pub fn set_voice(&mut self, voice: bool) {
        #[cfg(feature = "microphone")]
        {
            self.voice = voice;
        }
        #[cfg(not(feature = "microphone"))]
        let _ = voice;
    }

    /// Flips between voice and text mode and returns the new mode.
    pub fn toggle(&mut self) -> bool {
        #[cfg(feature = "microphone")]
        {
            self.voice = !self.voice;
        }
        self.voice
    }

    /// Blocks until one utterance is available and returns it normalized.
    ///
    /// An empty string means silence or blank input; the caller treats it
    /// as a no-op.
    pub fn next_utterance(&mut self, speaker: &Speaker) -> String {
        if self.voice {
            self.listen(speaker)
        } else {
            read_text()
        }
    }

    #[cfg(feature = "microphone")]
    fn listen(&mut self, speaker: &Speaker) -> String {
        println!("Ascult...");
        match self.recognizer.listen() {
            Ok(transcript) => {
                let utterance = normalize(&transcript);
                if !utterance.is_empty() {
                    println!("Tu ai zis: {}", utterance);
                }
                utterance
            }
            Err(err) => {
                log::warn!("speech recognition failed: {}", err);
                speaker.speak("Nu am înțeles, te rog scrie comanda.");
                read_text()
            }
        }
    }

    #[cfg(not(feature = "microphone"))]
    fn listen(&mut self, _speaker: &Speaker) -> String {
        read_text()
    }
}

/// Reads one typed command from the console.
pub fn read_text() -> String {
    print!("{}", TEXT_PROMPT);
    io::stdout().flush().ok();
    read_text_from(&mut io::stdin().lock())
}

/// Reads one line from the given reader and normalizes it.
pub fn read_text_from<R: BufRead>(reader: &mut R) -> String {
    let mut line = String::new();
    if reader.read_line(&mut line).is_err() {
        return String::new();
    }
    normalize(&line)
}

/// Asks a yes/no question on the console; only "da" confirms.
pub fn confirm(prompt: &str) -> bool {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    normalize(&line) == "da"
}

/// Lowercases and trims one raw input line.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize("  Ce Ora Este  \n"), "ce ora este");
    }

    #[test]
    fn normalize_keeps_diacritics() {
        assert_eq!(normalize("Schimbă Input"), "schimbă input");
    }

    #[test]
    fn read_text_from_consumes_one_line() {
        let mut input = "  Caută Vremea \nrest".as_bytes();
        assert_eq!(read_text_from(&mut input), "caută vremea");
    }

    #[test]
    fn read_text_from_handles_empty_reader() {
        let mut input = "".as_bytes();
        assert_eq!(read_text_from(&mut input), "");
    }
}
