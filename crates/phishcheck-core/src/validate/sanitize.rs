//! Making untrusted text safe to display.
//!
//! Backend responses are untrusted: their text is reduced to a single plain
//! line before it enters a verdict message, and every sink that emits markup
//! escapes it again on output.

/// Default cap on sanitized text, in characters.
pub const MAX_SANITIZED_CHARS: usize = 512;

/// Reduces untrusted text to one printable line.
///
/// - Drops control characters (including ANSI escape introducers)
/// - Collapses runs of whitespace into a single space
/// - Truncates to `max_chars` characters, marking the cut with `…`
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(input.len().min(max_chars));
    let mut pending_space = false;
    let mut count = 0usize;

    for c in input.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if c.is_control() {
            continue;
        }
        if pending_space {
            if count >= max_chars {
                out.push('…');
                return out;
            }
            out.push(' ');
            count += 1;
            pending_space = false;
        }
        if count >= max_chars {
            out.push('…');
            return out;
        }
        out.push(c);
        count += 1;
    }
    out
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}
