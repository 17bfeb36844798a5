//! Text synthesis for wrapping calls.

/// Syntactic position of a flagged literal; decides how the call is spliced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralContext {
    /// String value of a JSX attribute: `title="..."`.
    JsxAttribute,
    /// Text child of a JSX element.
    JsxText,
    /// Static part of a template string.
    TemplateSegment,
    /// Any other expression position.
    Expression,
}

/// Prefix and suffix placed around the literal's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperTemplate {
    pub prefix: String,
    pub suffix: String,
}

impl WrapperTemplate {
    pub fn for_context(context: LiteralContext, name: &str) -> Self {
        let (prefix, suffix) = match context {
            LiteralContext::JsxAttribute => (format!("{{{name}("), ")}"),
            LiteralContext::JsxText => (format!("{{{name}('"), "')}"),
            LiteralContext::TemplateSegment => (format!("${{{name}('"), "')}"),
            LiteralContext::Expression => (format!("{name}("), ")"),
        };
        Self {
            prefix,
            suffix: suffix.to_string(),
        }
    }

    /// Build the replacement text for `value` (the trimmed raw text).
    ///
    /// Contexts that introduce their own quotes get the value escaped for a
    /// single-quoted string.
    pub fn wrap(&self, context: LiteralContext, value: &str) -> String {
        let value = match context {
            LiteralContext::JsxText => escape_jsx_text(value),
            LiteralContext::TemplateSegment => escape_template_raw(value),
            LiteralContext::JsxAttribute | LiteralContext::Expression => value.to_string(),
        };
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

/// Trim every line and join the non-empty ones with single spaces.
pub fn flatten_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop the first and last char when the text starts with a quote character.
pub fn strip_outer_quotes(text: &str) -> &str {
    if !text.starts_with(['\'', '"', '`']) {
        return text;
    }
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// JSX text is literal: every backslash and quote must be escaped.
fn escape_jsx_text(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Template raw text is already escaped source; only bare quotes and
/// literal line breaks need escaping. Line continuations are kept.
fn escape_template_raw(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut escaped = false;
    for c in raw.chars() {
        match c {
            '\'' if !escaped => out.push_str("\\'"),
            '\n' if !escaped => out.push_str("\\n"),
            '\r' if !escaped => {}
            _ => out.push(c),
        }
        escaped = c == '\\' && !escaped;
    }
    out
}
