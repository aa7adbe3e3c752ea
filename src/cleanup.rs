//! Optional text cleanup applied before pagination.
//!
//! The pipeline works line by line so that the page layout still follows the source lines.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Options for text cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Drop characters outside ASCII alphanumerics, Japanese scripts, CJK ideographs,
    /// whitespace and common punctuation.
    pub strip_unsupported: bool,

    /// Collapse runs of horizontal whitespace and trim every line.
    pub collapse_whitespace: bool,

    /// Remove whitespace in front of punctuation.
    pub tighten_punctuation: bool,

    /// Normalize Unicode to NFKC form.
    pub normalize_unicode: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

impl CleanupOptions {
    /// Every cleanup step enabled.
    pub fn standard() -> Self {
        Self {
            strip_unsupported: true,
            collapse_whitespace: true,
            tighten_punctuation: true,
            normalize_unicode: true,
        }
    }

    /// Unicode normalization only.
    pub fn minimal() -> Self {
        Self {
            strip_unsupported: false,
            collapse_whitespace: false,
            tighten_punctuation: false,
            normalize_unicode: true,
        }
    }
}

fn unsupported_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"[^a-zA-Z0-9\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{4E00}-\x{9FFF}\x{3000}-\x{303F}\s.,!?:;'"()\[\]{}]"#,
        )
        .expect("valid regex")
    })
}

fn horizontal_whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\S\n]+").expect("valid regex"))
}

fn space_before_punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\S\n]+([^\w\s])").expect("valid regex"))
}

/// Applies the enabled cleanup steps to `text`, keeping its line structure.
pub fn clean_text(text: &str, options: &CleanupOptions) -> String {
    let mut result = if options.strip_unsupported {
        unsupported_chars().replace_all(text, "").into_owned()
    } else {
        text.to_owned()
    };

    if options.collapse_whitespace {
        result = result
            .split('\n')
            .map(|line| horizontal_whitespace().replace_all(line, " ").trim().to_owned())
            .collect::<Vec<_>>()
            .join("\n");
    }

    if options.tighten_punctuation {
        result = space_before_punctuation()
            .replace_all(&result, "$1")
            .into_owned();
    }

    if options.normalize_unicode {
        result = result.nfkc().collect();
    }

    result
}
