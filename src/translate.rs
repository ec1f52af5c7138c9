/*
 * @file translate.rs
 * @brief Translation request parsing and the translation collaborator
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

//! Translation requests.
//!
//! Utterances follow the shape "tradu {text} in {limbă}". The connector
//! split happens on the last occurrence so translated text may itself
//! contain the word "in".

use serde_json::Value;
use thiserror::Error;

/// Public endpoint used by the translation collaborator.
const TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Language names understood by the translate command, with ISO codes.
const LANGUAGE_CODES: [(&str, &str); 15] = [
    ("engleza", "en"),
    ("romana", "ro"),
    ("franceza", "fr"),
    ("germana", "de"),
    ("spaniola", "es"),
    ("italiana", "it"),
    ("portugheza", "pt"),
    ("rusă", "ru"),
    ("chineză", "zh"),
    ("japoneză", "ja"),
    ("arabă", "ar"),
    ("turcă", "tr"),
    ("greacă", "el"),
    ("poloneză", "pl"),
    ("olandeză", "nl"),
];

/// Code used when the requested language is not in the table.
const FALLBACK_LANGUAGE: &str = "en";

/// One parsed translation request.
#[derive(Clone, Debug, PartialEq)]
pub struct TranslationRequest {
    /// Text to translate, with the verb stripped.
    pub text: String,
    /// ISO code of the target language.
    pub target: &'static str,
}

/// Failure kinds of one translation call.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The HTTP request failed or the service refused it.
    #[error("translation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response did not carry translated segments.
    #[error("malformed translation payload")]
    Payload,
}

/// Looks up the ISO code for a Romanian language name.
pub fn language_code(name: &str) -> &'static str {
    LANGUAGE_CODES
        .iter()
        .find(|(language, _)| *language == name)
        .map(|(_, code)| *code)
        .unwrap_or(FALLBACK_LANGUAGE)
}

/// Parses "tradu {text} in {limbă}" into a request.
///
/// # Details
/// Splits on the last " în "/" in " connector, strips the command verbs
/// from the head and resolves the tail against the language table.
///
/// # Returns
/// * `Some(TranslationRequest)` - When the connector is present.
/// * `None` - When the utterance names no target language; the caller
///   asks for one instead of guessing.
pub fn parse_request(utterance: &str) -> Option<TranslationRequest> {
    let (head, tail) = utterance
        .rsplit_once(" în ")
        .or_else(|| utterance.rsplit_once(" in "))?;
    let text = head
        .replace("traducere", "")
        .replace("tradu", "")
        .trim()
        .to_string();
    Some(TranslationRequest {
        text,
        target: language_code(tail.trim()),
    })
}

/// Calls the translation collaborator for one parsed request.
///
/// # Arguments
/// * `client` - Shared HTTP client.
/// * `request` - Parsed text and target language.
///
/// # Returns
/// * `Ok(String)` - The translated text.
///
/// # Errors
/// Returns a [`TranslateError`]; callers speak a fixed apology.
pub async fn translate(
    client: &reqwest::Client,
    request: &TranslationRequest,
) -> Result<String, TranslateError> {
    let body: Value = client
        .get(TRANSLATE_ENDPOINT)
        .query(&[
            ("client", "gtx"),
            ("sl", "auto"),
            ("tl", request.target),
            ("dt", "t"),
            ("q", request.text.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    extract_translation(&body).ok_or(TranslateError::Payload)
}

/// Concatenates the translated segments of one response body.
pub fn extract_translation(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let mut translated = String::new();
    for segment in segments {
        if let Some(chunk) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(chunk);
        }
    }
    if translated.is_empty() {
        None
    } else {
        Some(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_text_and_target_language() {
        let request = parse_request("tradu bună ziua in engleza").expect("parse");
        assert_eq!(request.text, "bună ziua");
        assert_eq!(request.target, "en");
    }

    #[test]
    fn parses_the_diacritic_connector() {
        let request = parse_request("tradu mulțumesc în germana").expect("parse");
        assert_eq!(request.text, "mulțumesc");
        assert_eq!(request.target, "de");
    }

    #[test]
    fn splits_on_the_last_connector() {
        let request = parse_request("tradu cred in tine in franceza").expect("parse");
        assert_eq!(request.text, "cred in tine");
        assert_eq!(request.target, "fr");
    }

    #[test]
    fn missing_connector_yields_none() {
        assert_eq!(parse_request("tradu bună ziua"), None);
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(language_code("klingoniana"), "en");
        let request = parse_request("tradu salut in klingoniana").expect("parse");
        assert_eq!(request.target, "en");
    }

    #[test]
    fn known_languages_resolve() {
        assert_eq!(language_code("olandeză"), "nl");
        assert_eq!(language_code("romana"), "ro");
    }

    #[test]
    fn extracts_concatenated_segments() {
        let body = json!([
            [["Good afternoon, ", "bună ziua, ", null], ["friend", "prietene", null]],
            null,
            "ro"
        ]);
        assert_eq!(
            extract_translation(&body).as_deref(),
            Some("Good afternoon, friend")
        );
    }

    #[test]
    fn empty_payload_yields_none() {
        assert_eq!(extract_translation(&json!([[]])), None);
        assert_eq!(extract_translation(&json!({})), None);
    }
}
