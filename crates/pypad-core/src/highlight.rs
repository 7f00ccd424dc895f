//! Regex-driven syntax highlighting.
//!
//! One generic engine parameterized by an ordered rule table. Rules are
//! applied per line in table order; where matches overlap, the later rule's
//! style wins the painted result. The engine keeps no state between lines.

use std::ops::Range;

use anyhow::{Context, Result};
use regex::Regex;

/// Display attributes for a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightStyle {
    /// Foreground color as RGB.
    pub color: (u8, u8, u8),
    pub bold: bool,
}

impl HighlightStyle {
    pub const fn plain(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: (r, g, b),
            bold: false,
        }
    }

    pub const fn bold(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: (r, g, b),
            bold: true,
        }
    }
}

/// One pattern/style pair. Immutable once constructed.
///
/// When the pattern contains a capture group, group 1 is the highlighted
/// span; otherwise the whole match is. The scan always advances past the
/// whole match, so a group never causes rescanning of its surroundings.
#[derive(Debug)]
pub struct HighlightRule {
    pattern: Regex,
    style: HighlightStyle,
}

impl HighlightRule {
    pub fn new(pattern: &str, style: HighlightStyle) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("invalid highlight pattern: {pattern}"))?;
        Ok(Self { pattern, style })
    }

    pub fn style(&self) -> HighlightStyle {
        self.style
    }
}

/// A styled byte range within one line, tagged with the index of the rule
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub rule: usize,
}

/// A highlighter over an ordered rule table.
#[derive(Debug)]
pub struct RuleHighlighter {
    rules: Vec<HighlightRule>,
}

impl RuleHighlighter {
    pub fn new(rules: Vec<HighlightRule>) -> Self {
        Self { rules }
    }

    /// The Python rule table: keywords, `self`/`cls` references, numeric
    /// literals, decorator tokens, string literals, comments. Comments come
    /// last so they paint over anything they contain.
    pub fn python() -> Self {
        let rules = vec![
            rule(
                r"\b(?:False|None|True|and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield)\b",
                HighlightStyle::bold(86, 156, 214),
            ),
            rule(r"\b(?:self|cls)\b", HighlightStyle::plain(197, 134, 192)),
            rule(
                r"\b[0-9]+(?:\.[0-9]+)?\b",
                HighlightStyle::plain(181, 206, 168),
            ),
            rule(
                r"@[A-Za-z_][A-Za-z0-9_.]*",
                HighlightStyle::plain(220, 220, 170),
            ),
            rule(
                r#""[^"\n]*"|'[^'\n]*'"#,
                HighlightStyle::plain(206, 145, 120),
            ),
            rule(r"#[^\n]*", HighlightStyle::plain(106, 153, 85)),
        ];
        Self::new(rules)
    }

    /// The JSON rule table: numeric values, quoted keys followed by a colon,
    /// quoted string values. Key and value rules come after the numeric rule
    /// so digits inside quoted text resolve to the string styles.
    pub fn json() -> Self {
        let rules = vec![
            rule(
                r"-?\b[0-9]+(?:\.[0-9]+)?\b",
                HighlightStyle::bold(181, 206, 168),
            ),
            rule(r#"("[^"]*")\s*:"#, HighlightStyle::bold(156, 220, 254)),
            rule(r#":\s*("[^"]*")"#, HighlightStyle::plain(206, 145, 120)),
        ];
        Self::new(rules)
    }

    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    /// Collects all rule matches for one line, in rule-table order.
    ///
    /// For each rule the line is scanned left to right; every match emits a
    /// span and the scan resumes after the whole match. A zero-length match
    /// advances the scan by one character so the loop always terminates.
    pub fn highlight(&self, line: &str) -> Vec<HighlightSpan> {
        let mut spans = Vec::new();
        for (idx, rule) in self.rules.iter().enumerate() {
            let mut at = 0usize;
            while at <= line.len() {
                let Some(caps) = rule.pattern.captures_at(line, at) else {
                    break;
                };
                let Some(whole) = caps.get(0) else {
                    break;
                };
                let target = caps.get(1).unwrap_or(whole);
                if target.end() > target.start() {
                    spans.push(HighlightSpan {
                        start: target.start(),
                        end: target.end(),
                        rule: idx,
                    });
                }
                at = if whole.end() > whole.start() {
                    whole.end()
                } else {
                    advance_one_char(line, whole.end())
                };
            }
        }
        spans
    }

    /// Flattens the spans of [`highlight`](Self::highlight) into
    /// non-overlapping styled runs, later rules winning where spans overlap.
    /// Runs come back in left-to-right order; unmatched stretches are simply
    /// absent.
    pub fn style_runs(&self, line: &str) -> Vec<(Range<usize>, HighlightStyle)> {
        let spans = self.highlight(line);
        if spans.is_empty() {
            return Vec::new();
        }

        // Per-byte rule ownership; later spans overwrite earlier ones.
        let mut owner: Vec<Option<usize>> = vec![None; line.len()];
        for span in &spans {
            for slot in &mut owner[span.start..span.end] {
                *slot = Some(span.rule);
            }
        }

        let mut runs = Vec::new();
        let mut i = 0usize;
        while i < owner.len() {
            match owner[i] {
                None => i += 1,
                Some(rule) => {
                    let start = i;
                    while i < owner.len() && owner[i] == Some(rule) {
                        i += 1;
                    }
                    runs.push((start..i, self.rules[rule].style()));
                }
            }
        }
        runs
    }
}

fn rule(pattern: &str, style: HighlightStyle) -> HighlightRule {
    // Table patterns are fixed strings; a compile failure is a programming
    // error caught by the table tests below.
    HighlightRule::new(pattern, style).unwrap_or_else(|e| panic!("{e:#}"))
}

/// Advances a byte offset past one character, or past the end of the line.
fn advance_one_char(line: &str, at: usize) -> usize {
    match line[at..].chars().next() {
        Some(c) => at + c.len_utf8(),
        None => line.len() + 1,
    }
}
