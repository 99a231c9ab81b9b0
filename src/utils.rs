// src/utils.rs
use std::io::{self, BufRead};
use url::Url;

/// Turn free-form user input (a bare domain or any URL) into a hostname.
///
/// Input without a scheme is parsed as `http://<input>`. When the URL parser
/// rejects the text or finds no host, the trimmed input is returned as is.
/// Empty or whitespace-only input yields an empty string.
pub fn extract_domain(input: &str) -> String {
    let text = input.trim();
    if text.is_empty() {
        return String::new();
    }

    let candidate = if text.contains("://") {
        text.to_string()
    } else {
        format!("http://{}", text)
    };

    match Url::parse(&candidate) {
        Ok(url) => match url.host_str() {
            Some(host) if !host.is_empty() => host.trim_start_matches('[').trim_end_matches(']').to_string(),
            _ => text.to_string(),
        },
        Err(_) => text.to_string(),
    }
}

/// Trim a certificate subject name and drop its trailing dots.
pub fn normalize_name(raw: &str) -> &str {
    raw.trim().trim_end_matches('.')
}

/// Split on every line boundary Unicode recognises, including lone `\r`,
/// vertical tab, form feed and U+2028/U+2029. Empty pieces are kept.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| {
        matches!(
            c,
            '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
        )
    })
}

/// True when `name` is `domain` itself or sits under it at a label boundary.
pub fn belongs_to_domain(name: &str, domain: &str) -> bool {
    name == domain
        || name
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// URL opened for a discovered hostname.
pub fn host_url(name: &str) -> String {
    let host = name.trim_end_matches('.').trim_end_matches('/');
    format!("https://{}", host)
}

/// Affirmative only for a literal "y", ignoring case and surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Read one line, without its line terminator. `None` on end of input.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}
