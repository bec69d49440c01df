//! Escaping utilities for report output.
//!
//! BOM files are user uploads: a description or part number may contain
//! markup, quotes or terminal control sequences. Every value taken from a
//! record goes through one of these helpers before it is embedded in a
//! report. CSV quoting is left to the `csv` crate.

/// Escape a string for HTML element content.
///
/// # Examples
///
/// ```
/// use bom_tools::reports::escape::escape_html;
///
/// assert_eq!(escape_html("Cap <100nF> & 'X7R'"),
///     "Cap &lt;100nF&gt; &amp; &#x27;X7R&#x27;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for an HTML attribute value.
///
/// Also encodes line breaks and tabs, which would otherwise be normalised
/// away inside attributes.
#[must_use]
pub fn escape_html_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            '\t' => result.push_str("&#9;"),
            _ => result.push_str(&escape_html(c.encode_utf8(&mut [0; 4]))),
        }
    }
    result
}

/// Make a value safe to print on a terminal.
///
/// Control characters (including ESC, so no ANSI sequences survive) are
/// replaced by `?`; line breaks and tabs become a single space.
///
/// ```
/// use bom_tools::reports::escape::escape_terminal;
///
/// assert_eq!(escape_terminal("R1\x1b[31m"), "R1?[31m");
/// assert_eq!(escape_terminal("two\nlines"), "two lines");
/// ```
#[must_use]
pub fn escape_terminal(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect()
}

/// Display helper: `-` for empty values.
#[must_use]
pub fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}
