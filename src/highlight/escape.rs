//! HTML escaping and character reference decoding

/// Escape the five HTML-significant characters
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode HTML character references back to literal characters.
///
/// Uses the full HTML5 named-reference table with text-content rules, so
/// legacy references without a semicolon (`&lt`, `&amp`) decode as a browser
/// would. Numeric references to invalid code points decode to U+FFFD and
/// unrecognized references are kept verbatim.
pub fn decode_html(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    htmlize::unescape(s).into_owned()
}
