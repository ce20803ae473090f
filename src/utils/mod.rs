use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use url::Url;

/// Anything outside word characters, digits, CJK Unified Ideographs, `.`, `_` and `-`.
/// `\w` also admits zero-width joiners and connector punctuation such as `‿`;
/// those are replaced too, leaving `_` as the only connector. Combining marks stay
/// so scripts like Devanagari keep their vowel signs.
static DISALLOWED_FILENAME_CHAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\d\x{4E00}-\x{9FFF}._-]|[\p{Join_Control}\p{Pc}&&[^_]]").unwrap()
});

const FILENAME_EDGE_CHARS: &[char] = &['.', '_', '-'];

/// Sanitize a user-supplied label for safe filesystem usage
///
/// The label is NFC-normalized, every disallowed character becomes a single
/// underscore, and leading/trailing `.`, `_` and `-` are trimmed. The result
/// may be empty; callers pick their own fallback.
pub fn sanitize_filename(label: &str) -> String {
    let normalized: String = label.nfc().collect();

    DISALLOWED_FILENAME_CHAR
        .replace_all(&normalized, "_")
        .trim_matches(FILENAME_EDGE_CHARS)
        .to_string()
}

/// Extract domain from URL for display purposes
pub fn extract_domain(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Check if a command is available in PATH
pub async fn check_command_available(command: &str) -> bool {
    use tokio::process::Command;

    Command::new(command)
        .arg("--version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}
