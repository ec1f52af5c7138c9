/*
 * @file recognizer.rs
 * @brief Microphone capture and Whisper transcription
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

//! Voice capture: a fixed listen window on the default microphone,
//! transcribed in memory by a local Whisper model.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig, StreamError};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperState};

use crate::settings::Settings;

/// Sample rate for audio recording, matching Whisper's input rate.
const SAMPLE_RATE: u32 = 16_000;

/// Mono input keeps bandwidth low while remaining Whisper compatible.
const CHANNELS: u16 = 1;

/// Length of one listen window.
const RECORD_DURATION: Duration = Duration::from_secs(5);

/// Minimum RMS amplitude considered speech.
///
/// Values much above ~300 miss normal speaking levels on some
/// microphones, so the threshold leans low and Whisper filters the rest.
const SILENCE_RMS_THRESHOLD: f32 = 150.0;

/// Multilingual GGML model; the English-only variants cannot transcribe
/// Romanian.
const MODEL_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin";

/// Transcription language hint.
const LANGUAGE: &str = "ro";

/// Blocking speech-to-text collaborator.
///
/// # Details
/// The Whisper context loads lazily on the first listen so a text-mode
/// session never pays for the model. The context is kept for the life of
/// the recognizer afterwards.
pub struct Recognizer {
    model_path: String,
    ctx: Option<WhisperContext>,
}

impl Recognizer {
    /// Creates a recognizer bound to the configured model path.
    pub fn new(settings: &Settings) -> Self {
        Self {
            model_path: settings.whisper_model_path.clone(),
            ctx: None,
        }
    }

    /// Records one listen window and returns its transcript.
    ///
    /// # Returns
    /// * `Ok(String)` - The transcript; empty when only silence was
    ///   heard, which callers treat as a no-op.
    ///
    /// # Errors
    /// Returns an error when the microphone or the model is unavailable;
    /// the utterance source then falls back to typed input.
    pub fn listen(&mut self) -> Result<String> {
        let samples = record_samples()?;
        if !contains_speech(&samples) {
            return Ok(String::new());
        }
        let audio = normalize_samples(&samples);
        self.transcribe(&audio)
    }

    fn transcribe(&mut self, audio: &[f32]) -> Result<String> {
        let ctx = self.ensure_context()?;
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(LANGUAGE));
        params.set_print_progress(false);
        params.set_print_special(false);
        params.set_print_realtime(false);
        let mut state = ctx
            .create_state()
            .context("Failed to create Whisper state")?;
        state
            .full(params, audio)
            .context("Whisper transcription failed")?;
        Ok(collect_segments(&state))
    }

    fn ensure_context(&mut self) -> Result<&WhisperContext> {
        if self.ctx.is_none() {
            self.ctx = Some(init_whisper(&self.model_path)?);
        }
        self.ctx
            .as_ref()
            .context("Whisper context missing after initialization")
    }
}

/// Initializes the Whisper context, downloading the model if needed.
///
/// # Details
/// The first run downloads roughly 148 MB from Hugging Face, so the user
/// is told to expect a wait.
fn init_whisper(model_path: &str) -> Result<WhisperContext> {
    if let Some(parent) = Path::new(model_path).parent() {
        fs::create_dir_all(parent)?;
    }
    if !Path::new(model_path).exists() {
        println!("Descarc modelul de recunoaștere vocală, poate dura câteva minute...");
        download_model(model_path)?;
    }
    let mut params = WhisperContextParameters::default();
    params.use_gpu(false);
    WhisperContext::new_with_params(model_path, params).context("Failed to initialize Whisper")
}

fn download_model(model_path: &str) -> Result<()> {
    let output = std::process::Command::new("curl")
        .args(["-L", "-o", model_path, MODEL_URL])
        .output()
        .context("Failed to execute curl")?;
    if !output.status.success() {
        anyhow::bail!("Failed to download Whisper model");
    }
    Ok(())
}

/// Concatenates the text of all transcription segments.
fn collect_segments(state: &WhisperState) -> String {
    let segments = state.full_n_segments().unwrap_or(0);
    let mut text = String::new();
    for index in 0..segments {
        if let Ok(segment) = state.full_get_segment_text(index) {
            text.push_str(&segment);
            text.push(' ');
        }
    }
    text.trim().to_string()
}

/// Records from the default input device for one listen window.
fn record_samples() -> Result<Vec<i16>> {
    let device = default_input_device()?;
    let config = input_config();
    let samples = shared_samples();
    let stream = build_input_stream(&device, &config, samples.clone())?;
    stream.play()?;
    std::thread::sleep(RECORD_DURATION);
    drop(stream);
    let samples = samples.lock().unwrap().clone();
    Ok(samples)
}

fn default_input_device() -> Result<Device> {
    cpal::default_host()
        .default_input_device()
        .ok_or_else(|| anyhow::anyhow!("No input device"))
}

fn input_config() -> StreamConfig {
    StreamConfig {
        channels: CHANNELS,
        sample_rate: cpal::SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Default,
    }
}

fn shared_samples() -> Arc<Mutex<Vec<i16>>> {
    Arc::new(Mutex::new(Vec::new()))
}

fn build_input_stream(
    device: &Device,
    config: &StreamConfig,
    samples: Arc<Mutex<Vec<i16>>>,
) -> Result<Stream> {
    let shared = samples.clone();
    device
        .build_input_stream(
            config,
            move |data: &[f32], _: &_| push_samples(&shared, data),
            log_stream_error,
            None,
        )
        .map_err(|err| anyhow::anyhow!(err))
}

/// Converts floating-point frames to 16-bit PCM and appends them.
fn push_samples(buffer: &Arc<Mutex<Vec<i16>>>, data: &[f32]) {
    let mut guard = buffer.lock().unwrap();
    for &sample in data {
        guard.push((sample * i16::MAX as f32) as i16);
    }
}

fn log_stream_error(error: StreamError) {
    log::warn!("audio stream error: {}", error);
}

/// Detects whether the captured window holds speech.
///
/// # Details
/// Compares the RMS energy of the window against the silence threshold,
/// which keeps empty rooms from reaching the transcription step.
fn contains_speech(samples: &[i16]) -> bool {
    if samples.is_empty() {
        return false;
    }
    let energy = samples
        .iter()
        .map(|sample| (*sample as f32).powi(2))
        .sum::<f32>()
        / samples.len() as f32;
    energy.sqrt() >= SILENCE_RMS_THRESHOLD
}

/// Normalizes 16-bit PCM to the [-1.0, 1.0] floats Whisper expects.
fn normalize_samples(samples: &[i16]) -> Vec<f32> {
    samples.iter().map(|&s| s as f32 / 32768.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_config_matches_constants() {
        let config = input_config();
        assert_eq!(config.channels, CHANNELS);
        assert_eq!(config.sample_rate.0, SAMPLE_RATE);
    }

    #[test]
    fn shared_samples_starts_empty() {
        let samples = shared_samples();
        assert!(samples.lock().unwrap().is_empty());
    }

    #[test]
    fn push_samples_converts_floats() {
        let samples = shared_samples();
        push_samples(&samples, &[0.0, 0.5, -1.0]);
        let guard = samples.lock().unwrap();
        assert_eq!(guard.len(), 3);
        assert_eq!(guard[0], 0);
        assert!(guard[1] > 0);
        assert!(guard[2] < 0);
    }

    #[test]
    fn contains_speech_requires_energy() {
        assert!(!contains_speech(&[0_i16; 1600]));
        let loud = vec![i16::MAX / 2; 1600];
        assert!(contains_speech(&loud));
    }

    #[test]
    fn normalization_stays_in_unit_range() {
        let normalized = normalize_samples(&[i16::MIN, 0, i16::MAX]);
        assert!(normalized.iter().all(|s| (-1.0..=1.0).contains(s)));
    }
}
