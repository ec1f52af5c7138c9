//! Text-to-speech output.
//!
//! Every reply is printed to the console and handed to an external
//! synthesis program that blocks until playback completes.

use std::process::Command;
use std::sync::Mutex;

use anyhow::Result;

use crate::settings::Settings;

/// Spoken-output collaborator bound to one synthesis program.
pub struct Speaker {
    program: String,
    args: Vec<String>,
}

impl Speaker {
    /// Creates a speaker from the configured synthesis program.
    pub fn new(settings: &Settings) -> Self {
        Self {
            program: settings.tts_program.clone(),
            args: settings.tts_args.clone(),
        }
    }

    /// Prints and speaks the given text, blocking until playback finishes.
    ///
    /// Empty text is ignored. Synthesis failures are logged and never
    /// interrupt the caller; the printed transcript already carries the
    /// reply.
    pub fn speak(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        println!("Asistent: {}", text);
        if let Err(err) = self.run_synthesis(text) {
            log::warn!("TTS error: {}", err);
        }
    }

    fn run_synthesis(&self, text: &str) -> Result<()> {
        if cfg!(test) {
            if *FORCE_ERROR.lock().unwrap() {
                anyhow::bail!("Forced failure for testing");
            }
            return Ok(());
        }

        Command::new(&self.program).args(&self.args).arg(text).output()?;
        Ok(())
    }
}

#[cfg_attr(not(test), allow(dead_code))]
static FORCE_ERROR: Mutex<bool> = Mutex::new(false);

#[cfg(test)]
mod tests {
    use super::*;

    fn speaker() -> Speaker {
        Speaker::new(&Settings::default())
    }

    #[test]
    fn speak_accepts_text() {
        speaker().speak("Salut test");
    }

    #[test]
    fn synthesis_fails_when_forced() {
        *FORCE_ERROR.lock().unwrap() = true;
        let result = speaker().run_synthesis("failure case");
        *FORCE_ERROR.lock().unwrap() = false;
        assert!(result.is_err());
    }

    #[test]
    fn speak_skips_blank_text() {
        *FORCE_ERROR.lock().unwrap() = true;
        // Would log a forced synthesis failure if blank text were spoken.
        speaker().speak("   ");
        *FORCE_ERROR.lock().unwrap() = false;
    }
}
