//! # Highlighter
//!
//! Pure text → classified spans. Backend replies are plain strings; this pass
//! picks out links, bracketed tags, `label:` prefixes and numbers so the
//! terminal can style them without changing the underlying text.
//!
//! Passes run in a fixed order and each one only looks at text that no
//! earlier pass has claimed:
//!
//! ```text
//! raw ─► url ─► email ─► [bracket] ─► label: ─► number ─► spans
//! ```
//!
//! Escaping of `&`, `<`, `>` happens on every emitted segment, so the markup
//! form (`colorize`) never carries injected structure.

use std::sync::LazyLock;

use regex_lite::Regex;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("url pattern"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)*\.[A-Za-z]{2,}").expect("email pattern")
});
static BRACKET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").expect("bracket pattern"));
static LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+:").expect("label pattern"));
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+\b").expect("number pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Link,
    Bracket,
    Label,
    Number,
}

impl SpanKind {
    /// CSS class used in the markup form. Plain text carries none.
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            SpanKind::Plain => None,
            SpanKind::Link => Some("link"),
            SpanKind::Bracket => Some("bracket"),
            SpanKind::Label => Some("label"),
            SpanKind::Number => Some("number"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    pub fn new(kind: SpanKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }

    pub fn plain(text: &str) -> Self {
        Self::new(SpanKind::Plain, text)
    }
}

/// Escapes the three HTML metacharacters. `&` goes first so the entities
/// produced for `<` and `>` are not escaped twice.
pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Classifies `raw` into spans. Concatenating the span texts yields `raw`.
pub fn highlight(raw: &str) -> Vec<Span> {
    let passes: [(&Regex, SpanKind); 5] = [
        (&URL, SpanKind::Link),
        (&EMAIL, SpanKind::Link),
        (&BRACKET, SpanKind::Bracket),
        (&LABEL, SpanKind::Label),
        (&NUMBER, SpanKind::Number),
    ];

    let mut spans = vec![Span::plain(raw)];
    for (pattern, kind) in passes {
        spans = apply_pass(spans, pattern, kind);
    }
    spans
}

/// Whitespace-sensitive text (ascii art) skips every pass.
pub fn verbatim(raw: &str) -> Vec<Span> {
    vec![Span::plain(raw)]
}

fn apply_pass(spans: Vec<Span>, pattern: &Regex, kind: SpanKind) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind != SpanKind::Plain {
            out.push(span);
            continue;
        }

        let mut last = 0;
        for m in pattern.find_iter(&span.text) {
            if m.start() > last {
                out.push(Span::plain(&span.text[last..m.start()]));
            }
            out.push(Span::new(kind, m.as_str()));
            last = m.end();
        }
        if last < span.text.len() {
            out.push(Span::plain(&span.text[last..]));
        }
    }
    out
}

/// Splits spans at newlines into display rows. A trailing newline yields a
/// trailing empty row, matching how a `<br>` would render.
pub fn split_lines(spans: &[Span]) -> Vec<Vec<Span>> {
    let mut rows: Vec<Vec<Span>> = vec![Vec::new()];
    for span in spans {
        let mut parts = span.text.split('\n');
        if let Some(first) = parts.next()
            && !first.is_empty()
            && let Some(row) = rows.last_mut()
        {
            row.push(Span::new(span.kind, first));
        }
        for part in parts {
            let mut row = Vec::new();
            if !part.is_empty() {
                row.push(Span::new(span.kind, part));
            }
            rows.push(row);
        }
    }
    rows
}

/// Renders spans as safe markup: classified spans are wrapped in
/// `<span class="…">`, newlines become `<br>`.
pub fn to_markup(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        let escaped = escape_html(&span.text);
        match span.kind.class_name() {
            Some(class) => {
                out.push_str(&format!("<span class=\"{class}\">{escaped}</span>"));
            }
            None => out.push_str(&escaped.replace('\n', "<br>")),
        }
    }
    out
}

/// `raw` → safe markup in one step.
pub fn colorize(raw: &str) -> String {
    to_markup(&highlight(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(raw: &str) -> Vec<(SpanKind, String)> {
        highlight(raw)
            .into_iter()
            .filter(|s| s.kind != SpanKind::Plain)
            .map(|s| (s.kind, s.text))
            .collect()
    }

    /// Strips the markup the highlighter itself inserts, leaving only text
    /// that came from the input.
    fn strip_inserted_markup(markup: &str) -> String {
        let mut s = markup.replace("<br>", "").replace("</span>", "");
        for class in ["link", "bracket", "label", "number"] {
            s = s.replace(&format!("<span class=\"{class}\">"), "");
        }
        s
    }

    #[test]
    fn test_escape_html_strips_tags() {
        let out = escape_html("<script>alert('x')</script>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_escape_ampersand_first() {
        assert_eq!(escape_html("a & <b>"), "a &amp; &lt;b&gt;");
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_colorize_escapes_before_highlighting() {
        let out = colorize("<img src=x onerror=alert('xss')>");
        assert!(!out.contains("<img"));
        assert!(out.contains("&lt;img src=x onerror=alert('xss')&gt;"));
    }

    #[test]
    fn test_colorize_never_leaks_metacharacters() {
        let inputs = [
            "<b>bold</b> & co",
            "see https://example.com/?a=1&b=<2>",
            "[<tag>] name: 42 & more",
            "mail <me@example.org>",
            "&&&<<<>>>",
            "line1\n<line2>\n",
        ];
        for input in inputs {
            let stripped = strip_inserted_markup(&colorize(input));
            assert!(!stripped.contains('<'), "raw < leaked for {input:?}: {stripped}");
            assert!(!stripped.contains('>'), "raw > leaked for {input:?}: {stripped}");
            let without_entities = stripped
                .replace("&amp;", "")
                .replace("&lt;", "")
                .replace("&gt;", "");
            assert!(!without_entities.contains('&'), "raw & leaked for {input:?}");
        }
    }

    #[test]
    fn test_bracket_spans_count_and_text() {
        assert!(kinds("no brackets here").is_empty());

        assert_eq!(
            kinds("status [ok]"),
            vec![(SpanKind::Bracket, "[ok]".to_string())]
        );

        let found = kinds("[1] first [two] second [three words]");
        assert_eq!(
            found,
            vec![
                (SpanKind::Bracket, "[1]".to_string()),
                (SpanKind::Bracket, "[two]".to_string()),
                (SpanKind::Bracket, "[three words]".to_string()),
            ]
        );
    }

    #[test]
    fn test_bracket_is_non_greedy() {
        let found = kinds("[a] and [b]");
        assert_eq!(found.len(), 2);
        assert_eq!(colorize("[a]"), "<span class=\"bracket\">[a]</span>");
    }

    #[test]
    fn test_url_claims_scheme_before_label_pass() {
        let found = kinds("Repo: https://github.com/me/vita");
        assert_eq!(
            found,
            vec![
                (SpanKind::Label, "Repo:".to_string()),
                (SpanKind::Link, "https://github.com/me/vita".to_string()),
            ]
        );
    }

    #[test]
    fn test_email_is_link() {
        let found = kinds("contact me@example.com today");
        assert_eq!(found, vec![(SpanKind::Link, "me@example.com".to_string())]);
        // single-letter TLD is not an email
        assert!(kinds("x@y.z").iter().all(|(k, _)| *k != SpanKind::Link));
    }

    #[test]
    fn test_standalone_numbers_only() {
        let found = kinds("page 2 of 10, v2 build");
        assert_eq!(
            found,
            vec![
                (SpanKind::Number, "2".to_string()),
                (SpanKind::Number, "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_spans_reassemble_input() {
        let raw = "Name: Vita [1] see http://a.b/c or a@b.io, 7 items\nnext";
        let joined: String = highlight(raw).into_iter().map(|s| s.text).collect();
        assert_eq!(joined, raw);
    }

    #[test]
    fn test_newline_becomes_break() {
        assert_eq!(colorize("a\nb"), "a<br>b");
    }

    #[test]
    fn test_split_lines_keeps_kinds() {
        let rows = split_lines(&highlight("Role: dev\n3 years"));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Span::new(SpanKind::Label, "Role:"));
        assert_eq!(rows[1][0], Span::new(SpanKind::Number, "3"));
    }

    #[test]
    fn test_verbatim_is_single_plain_span() {
        let art = "  /\\_/\\ \n ( o.o ) [x]: 1";
        assert_eq!(verbatim(art), vec![Span::plain(art)]);
    }
}
