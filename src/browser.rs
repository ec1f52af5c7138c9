//! Plain browser navigation.
//!
//! Opens URLs in the configured browser binary, or through the platform
//! opener when none is configured. The interactive media session lives in
//! the `media` module; this one only fires and forgets.

use std::io;
use std::process::Command;

use url::form_urlencoded::byte_serialize;

use crate::settings::Settings;

/// Base address for web searches.
const SEARCH_BASE: &str = "https://www.google.com/search";

/// Landing page for the plain "google" command.
pub const GOOGLE_URL: &str = "https://www.google.com";

/// Opens a URL in the configured browser, or the platform default.
pub fn open_url(settings: &Settings, url: &str) -> io::Result<()> {
    match &settings.browser_binary {
        Some(binary) => Command::new(binary).arg(url).spawn().map(|_| ()),
        None => open_with_os(url),
    }
}

/// Opens a Google search for the given term.
pub fn open_search(settings: &Settings, term: &str) -> io::Result<()> {
    open_url(settings, &search_url(term))
}

/// Builds the search URL with the term form-encoded.
pub fn search_url(term: &str) -> String {
    let encoded: String = byte_serialize(term.as_bytes()).collect();
    format!("{}?q={}", SEARCH_BASE, encoded)
}

/// Hands a path or URL to the operating system's opener.
pub fn open_with_os(target: &str) -> io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(target);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", target]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(target);
        cmd
    };
    command.spawn().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_the_term() {
        assert_eq!(
            search_url("shape of you"),
            "https://www.google.com/search?q=shape+of+you"
        );
    }

    #[test]
    fn search_url_encodes_diacritics() {
        let url = search_url("rețete");
        assert!(url.starts_with("https://www.google.com/search?q="));
        assert!(!url.contains('ț'));
    }
}
