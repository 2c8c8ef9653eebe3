//! YAML-like front matter of a quiz.
//!
//! Only flat `key: value` lines are understood. Every field is applied on its
//! own, so one bad value never discards the rest of the block.

use crate::error::{Diagnostic, DiagnosticKind};
use crate::model::QuizConfig;

/// Result of splitting front matter off a quiz source.
#[derive(Debug)]
pub(crate) struct FrontMatter<'s> {
    pub config: QuizConfig,
    /// Lines after the front matter block.
    pub body: Vec<&'s str>,
    /// Number of source lines consumed before `body`.
    pub body_offset: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Split the front matter off `source` and apply it on top of `base`.
pub(crate) fn split_front_matter<'s>(source: &'s str, base: &QuizConfig) -> FrontMatter<'s> {
    let lines: Vec<&str> = source.lines().collect();
    let mut config = base.clone();
    let mut diagnostics = Vec::new();

    let Some(open) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return FrontMatter {
            config,
            body: lines,
            body_offset: 0,
            diagnostics,
        };
    };

    if lines[open].trim() != "---" {
        return FrontMatter {
            config,
            body: lines,
            body_offset: 0,
            diagnostics,
        };
    }

    let Some(close) = (open + 1..lines.len()).find(|&i| lines[i].trim() == "---") else {
        diagnostics.push(Diagnostic::new(
            open + 1,
            DiagnosticKind::UnterminatedFrontMatter,
        ));
        return FrontMatter {
            config,
            body: lines[open + 1..].to_vec(),
            body_offset: open + 1,
            diagnostics,
        };
    };

    for (i, line) in lines.iter().enumerate().take(close).skip(open + 1) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            diagnostics.push(Diagnostic::new(
                i + 1,
                DiagnosticKind::FrontMatterSyntax(trimmed.to_string()),
            ));
            continue;
        };
        if let Some(kind) = apply_field(&mut config, key.trim(), unquote(value.trim())) {
            diagnostics.push(Diagnostic::new(i + 1, kind));
        }
    }

    FrontMatter {
        config,
        body: lines[close + 1..].to_vec(),
        body_offset: close + 1,
        diagnostics,
    }
}

/// Apply one field. Returns a diagnostic when the field is left unchanged.
fn apply_field(config: &mut QuizConfig, key: &str, value: &str) -> Option<DiagnosticKind> {
    let malformed = || DiagnosticKind::MalformedFrontMatter {
        key: key.to_string(),
        value: value.to_string(),
    };

    match key {
        "primaryColor" | "secondaryColor" | "textColor" | "locale" => {
            if value.is_empty() || value == "null" || value == "~" {
                return Some(malformed());
            }
            let slot = match key {
                "primaryColor" => &mut config.primary_color,
                "secondaryColor" => &mut config.secondary_color,
                "textColor" => &mut config.text_color,
                _ => &mut config.locale,
            };
            *slot = value.to_string();
        }
        "shuffleQuestions" => match parse_bool(value) {
            Some(b) => config.shuffle_questions = b,
            None => return Some(malformed()),
        },
        "shuffleAnswers" => match parse_bool(value) {
            Some(b) => config.shuffle_answers = b,
            None => return Some(malformed()),
        },
        "nQuestions" => match value.parse::<usize>() {
            Ok(n) if n > 0 => config.n_questions = Some(n),
            _ => return Some(malformed()),
        },
        other => return Some(DiagnosticKind::UnknownFrontMatterKey(other.to_string())),
    }
    None
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_all_known_fields() {
        let src = "---\nprimaryColor: steelblue\nsecondaryColor: '#e8e8e8'\ntextColor: black\nshuffleQuestions: true\nshuffleAnswers: no\nnQuestions: 3\nlocale: de\n---\n# Q";
        let fm = split_front_matter(src, &QuizConfig::default());
        assert!(fm.diagnostics.is_empty(), "{:?}", fm.diagnostics);
        assert_eq!(fm.config.secondary_color, "#e8e8e8");
        assert_eq!(fm.config.text_color, "black");
        assert!(fm.config.shuffle_questions);
        assert!(!fm.config.shuffle_answers);
        assert_eq!(fm.config.n_questions, Some(3));
        assert_eq!(fm.config.locale, "de");
        assert_eq!(fm.body, vec!["# Q"]);
        assert_eq!(fm.body_offset, 9);
    }

    #[test]
    fn malformed_fields_keep_defaults() {
        let src = "---\nshuffleAnswers: maybe\nnQuestions: 0\ntextColor:\nbogus: 1\njust text\n---\n";
        let fm = split_front_matter(src, &QuizConfig::default());
        assert_eq!(fm.config, QuizConfig::default());
        assert_eq!(fm.diagnostics.len(), 5);
        assert_eq!(fm.diagnostics[0].line, 2);
        assert!(matches!(
            fm.diagnostics[3].kind,
            DiagnosticKind::UnknownFrontMatterKey(ref k) if k == "bogus"
        ));
        assert!(matches!(
            fm.diagnostics[4].kind,
            DiagnosticKind::FrontMatterSyntax(_)
        ));
    }

    #[test]
    fn unterminated_block_is_ignored() {
        let src = "---\nshuffleAnswers: false\n# Q";
        let fm = split_front_matter(src, &QuizConfig::default());
        assert!(fm.config.shuffle_answers);
        assert_eq!(fm.diagnostics[0].kind, DiagnosticKind::UnterminatedFrontMatter);
        assert_eq!(fm.body_offset, 1);
    }

    #[test]
    fn no_front_matter_keeps_base() {
        let base = QuizConfig {
            locale: "fr".into(),
            ..QuizConfig::default()
        };
        let fm = split_front_matter("# Q\n- [x] a", &base);
        assert_eq!(fm.config.locale, "fr");
        assert_eq!(fm.body.len(), 2);
        assert_eq!(fm.body_offset, 0);
    }
}
