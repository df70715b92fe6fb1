//! Cleanup of raw model text before structured parsing.

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Positional fence strip: if `text` opens with a fence marker, drop that
/// marker and the final three characters, whatever they are.
///
/// Nothing checks that the input actually ends with a closing fence, so a
/// trailing newline or space after it leaves a stray backtick behind. Use
/// [`extract_fenced_payload`] when the input is not known to be exact.
pub fn strip_code_fence(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix(JSON_FENCE) {
        drop_last_chars(rest, FENCE.len())
    } else if let Some(rest) = text.strip_prefix(FENCE) {
        drop_last_chars(rest, FENCE.len())
    } else {
        text
    }
}

/// Delimiter-aware fence removal. Trims surrounding whitespace, drops an
/// opening fence with its optional language tag and a closing fence if
/// present. Content on the same line as the opening fence is kept.
pub fn extract_fenced_payload(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };
    let after_tag = after_open.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let body = match after_tag.find('\n') {
        Some(newline) if after_tag[..newline].trim().is_empty() => &after_tag[newline + 1..],
        _ => after_tag,
    };
    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

fn drop_last_chars(text: &str, count: usize) -> &str {
    match text.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &text[..idx],
        None => "",
    }
}
