//! Line lexer for quiz markup.
//!
//! Classifies each body line into a [`Token`]. Fenced code is consumed as a
//! single token so that `#` comments inside code never look like headings.

use crate::error::{Diagnostic, DiagnosticKind};

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Blank,
    Heading {
        text: String,
    },
    /// `> text`, with the indentation of the `>` marker.
    Quote {
        text: String,
        indent: usize,
    },
    /// A list item. `checkbox` is `Some(checked)` for `[ ]` / `[x]` items.
    Item {
        ordered: bool,
        checkbox: Option<bool>,
        text: String,
        raw: String,
    },
    Image {
        alt: String,
        url: String,
    },
    Fence {
        lang: Option<String>,
        source: String,
    },
    Text {
        text: String,
        indent: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TokenWithLine {
    pub token: Token,
    /// 1-based line number of the first source line of the token.
    pub line: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub(crate) struct Lexer<'s> {
    lines: Vec<&'s str>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'s> Lexer<'s> {
    pub fn new(lines: Vec<&'s str>) -> Self {
        Self {
            lines,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize all lines. `base` is the number of source lines that precede
    /// the first lexed line, so reported line numbers match the full source.
    pub fn tokenize(mut self, base: usize) -> (Vec<TokenWithLine>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        while self.pos < self.lines.len() {
            let line = base + self.pos + 1;
            let token = self.next_token(base);
            tokens.push(TokenWithLine { token, line });
        }
        (tokens, self.diagnostics)
    }

    fn next_token(&mut self, base: usize) -> Token {
        let raw = self.lines[self.pos];
        let indent = indent_width(raw);
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            self.pos += 1;
            return Token::Blank;
        }

        if let Some((marker, lang)) = fence_open(trimmed) {
            return self.fence(marker, lang, indent, base);
        }

        self.pos += 1;

        if indent < 4 {
            if let Some(text) = heading_text(trimmed) {
                return Token::Heading { text };
            }
        }

        if let Some(rest) = trimmed.strip_prefix('>') {
            let text = rest.strip_prefix(' ').unwrap_or(rest).trim_end();
            return Token::Quote {
                text: text.to_string(),
                indent,
            };
        }

        if let Some(token) = list_item(trimmed) {
            return token;
        }

        if let Some((alt, url)) = image(trimmed) {
            return Token::Image { alt, url };
        }

        Token::Text {
            text: trimmed.to_string(),
            indent,
        }
    }

    /// Consume a fenced block starting at the current line.
    ///
    /// A fence is unterminated when no closing marker follows, or when another
    /// fence with an info string opens first. It then ends at the next heading
    /// (or, before such an opener, the last heading ahead of it) and is
    /// reported once.
    fn fence(&mut self, marker: String, lang: Option<String>, indent: usize, base: usize) -> Token {
        let open = self.pos;
        let mut close = None;
        let mut limit = self.lines.len();
        for i in open + 1..self.lines.len() {
            if fence_closes(self.lines[i], &marker) {
                close = Some(i);
                break;
            }
            if matches!(fence_open(self.lines[i].trim()), Some((_, Some(_)))) {
                limit = i;
                break;
            }
        }

        let (end, next) = match close {
            Some(close) => (close, close + 1),
            None => {
                self.diagnostics.push(Diagnostic::new(
                    base + open + 1,
                    DiagnosticKind::UnterminatedCodeFence,
                ));
                let lines = &self.lines;
                let is_heading =
                    |i: &usize| indent_width(lines[*i]) < 4 && heading_text(lines[*i].trim()).is_some();
                let end = if limit == lines.len() {
                    (open + 1..limit).find(is_heading)
                } else {
                    (open + 1..limit).rev().find(is_heading)
                }
                .unwrap_or(limit);
                (end, end)
            }
        };

        let source = self.lines[open + 1..end]
            .iter()
            .map(|l| strip_indent(l, indent))
            .collect::<Vec<_>>()
            .join("\n");

        self.pos = next;
        Token::Fence { lang, source }
    }
}

// ── Line classification helpers ───────────────────────────────────────────

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn strip_indent(line: &str, indent: usize) -> &str {
    let mut taken = 0;
    for (i, c) in line.char_indices() {
        if taken >= indent || !(c == ' ' || c == '\t') {
            return &line[i..];
        }
        taken += if c == '\t' { 4 } else { 1 };
    }
    ""
}

/// `#` to `######` followed by a space (or nothing).
pub(crate) fn heading_text(trimmed: &str) -> Option<String> {
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t')) {
        return None;
    }
    let text = rest.trim().trim_end_matches('#').trim_end();
    Some(text.to_string())
}

/// Returns the fence marker (three or more backticks or tildes) and language.
fn fence_open(trimmed: &str) -> Option<(String, Option<String>)> {
    let ch = trimmed.chars().next()?;
    if ch != '`' && ch != '~' {
        return None;
    }
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    if len < 3 {
        return None;
    }
    let info = trimmed[len..].trim();
    if ch == '`' && info.contains('`') {
        return None;
    }
    let lang = info.split_whitespace().next().map(str::to_string);
    Some((trimmed[..len].to_string(), lang))
}

fn fence_closes(line: &str, marker: &str) -> bool {
    let trimmed = line.trim();
    let Some(ch) = marker.chars().next() else {
        return false;
    };
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    len >= marker.len() && trimmed[len..].trim().is_empty()
}

fn list_item(trimmed: &str) -> Option<Token> {
    let (ordered, rest) = if let Some(rest) = ["- ", "* ", "+ "]
        .iter()
        .find_map(|m| trimmed.strip_prefix(m))
    {
        (false, rest)
    } else {
        let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 || digits > 9 {
            return None;
        }
        let after = &trimmed[digits..];
        let rest = after
            .strip_prefix(". ")
            .or_else(|| after.strip_prefix(") "))?;
        (true, rest)
    };

    let rest = rest.trim_start();
    let (checkbox, text) = match checkbox(rest) {
        Some((checked, text)) => (Some(checked), text),
        None => (None, rest),
    };

    Some(Token::Item {
        ordered,
        checkbox,
        text: text.trim().to_string(),
        raw: trimmed.to_string(),
    })
}

fn checkbox(rest: &str) -> Option<(bool, &str)> {
    let checked = if rest.starts_with("[ ]") {
        false
    } else if rest.starts_with("[x]") || rest.starts_with("[X]") {
        true
    } else {
        return None;
    };
    let after = &rest[3..];
    if after.is_empty() || after.starts_with(' ') || after.starts_with('\t') {
        Some((checked, after))
    } else {
        None
    }
}

/// `![alt](url "title")` on a line of its own.
fn image(trimmed: &str) -> Option<(String, String)> {
    let inner = trimmed.strip_prefix("![")?.strip_suffix(')')?;
    let (alt, target) = inner.split_once("](")?;
    let url = target.split_whitespace().next()?;
    Some((alt.to_string(), url.to_string()))
}
