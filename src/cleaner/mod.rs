use regex::Regex;
use std::sync::LazyLock;

/// Cue timing header such as `00:01:23.456 --> 00:01:25.789 align:start position:0%`.
/// The whole line goes, cue settings included.
static TIMESTAMP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\d{2}:\d{2}:\d{2}\.\d{3} --> \d{2}:\d{2}:\d{2}\.\d{3}.*$").unwrap()
});

/// Inline markup: `<c>`, `</c>`, `<i>`, `<00:01:23.456>` word timings and the like.
static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Clean raw subtitle text into plain readable lines.
///
/// Removes cue timestamp lines, strips inline markup while keeping the enclosed
/// text, trims every line, drops blank lines and collapses runs of identical
/// consecutive lines. Lines are joined with `\n` and there is no trailing newline.
///
/// Only *consecutive* repeats are collapsed: auto-generated captions repeat the
/// previous cue's line as each new cue scrolls in, but a phrase said twice at
/// different points in the video is kept twice.
pub fn clean_captions(text: &str) -> String {
    let without_timestamps = TIMESTAMP_LINE.replace_all(text, "");
    let without_markup = MARKUP_TAG.replace_all(&without_timestamps, "");

    let mut cleaned: Vec<&str> = Vec::new();
    for line in without_markup.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if cleaned.last() == Some(&line) {
            continue;
        }
        cleaned.push(line);
    }

    cleaned.join("\n")
}
