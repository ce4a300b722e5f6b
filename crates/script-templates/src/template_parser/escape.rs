//! String-literal escaping for template bodies.
//!
//! Substitutions are applied strictly in table order. Backslashes must be
//! doubled before any later step introduces new backslashes.

/// Marker substituted for tab characters and for runs of indent-width spaces.
/// The consumer turns it back into a tab when it writes the script out.
pub const INDENT_PLACEHOLDER: &str = "_TS_";

/// Escape pipeline for template bodies, applied top to bottom.
pub const BODY_ESCAPES: [(&str, &str); 4] = [
    ("\\", "\\\\"),
    ("\"", "\\\""),
    ("\n", "\\n"),
    ("\t", INDENT_PLACEHOLDER),
];

/// Single-line header fields only need the quoting steps.
const FIELD_ESCAPES: [(&str, &str); 2] = [("\\", "\\\\"), ("\"", "\\\"")];

fn apply(input: &str, steps: &[(&str, &str)]) -> String {
    steps
        .iter()
        .fold(input.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Escape a template body for embedding in a C string literal.
pub fn escape_body(body: &str) -> String {
    apply(body, &BODY_ESCAPES)
}

/// Escape a header field (inherits, name, description).
pub fn escape_field(value: &str) -> String {
    apply(value, &FIELD_ESCAPES)
}

/// Recover script text from an escaped body, the way the editor does when it
/// installs a template: literal escapes are resolved, then every
/// [`INDENT_PLACEHOLDER`] becomes a tab.
pub fn unescape_content(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out.replace(INDENT_PLACEHOLDER, "\t")
}
