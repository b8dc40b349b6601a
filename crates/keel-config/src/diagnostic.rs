// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment reports what went wrong and where in the key path; this module
//! turns that into [`ConfigError`] values miette can render, pointing at the
//! offending line of the TOML file when the file is known and suggesting the
//! closest valid key for typos.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a valid key must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(keel::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: Vec<String>,
        #[label("not a {section} setting")]
        span: Option<SourceSpan>,
        section: String,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(keel::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A value outside an enumerated set, e.g. an unknown `start_type`.
    #[error("invalid value for key `{key}`: {detail}")]
    #[diagnostic(code(keel::config::invalid_value))]
    InvalidValue { key: String, detail: String },

    #[error("missing required key `{key}`")]
    #[diagnostic(code(keel::config::missing_key))]
    MissingKey { key: String },

    /// A semantic check failed after the file parsed cleanly.
    #[error("validation error: {message}")]
    #[diagnostic(code(keel::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(keel::config::other))]
    Other(String),
}

impl ConfigError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Split a (possibly aggregated) figment error into diagnostics.
    pub fn from_figment(err: figment::Error, sources: &[SourceFile]) -> Vec<Self> {
        err.into_iter()
            .map(|error| Self::from_single(&error, sources))
            .collect()
    }

    fn from_single(error: &figment::Error, sources: &[SourceFile]) -> Self {
        let key = error.path.join(".");
        match &error.kind {
            Kind::UnknownField(field, expected) => {
                let section = error.path.first().cloned().unwrap_or_default();
                let located = SourceFile::for_error(error, sources)
                    .and_then(|file| file.locate(&section, field));
                let (span, src) = match located {
                    Some((span, src)) => (Some(span), Some(src)),
                    None => (None, None),
                };
                Self::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.iter().map(|k| k.to_string()).collect(),
                    span,
                    section: if section.is_empty() {
                        "top-level".to_string()
                    } else {
                        format!("[{section}]")
                    },
                    src,
                }
            }
            Kind::UnknownVariant(variant, expected) => Self::InvalidValue {
                key,
                detail: format!("`{variant}` is not one of: {}", expected.join(", ")),
            },
            Kind::MissingField(field) => Self::MissingKey {
                key: field.to_string(),
            },
            Kind::InvalidType(actual, expected) => Self::InvalidType {
                key,
                detail: format!("found {actual}"),
                expected: expected.clone(),
            },
            _ => Self::Other(error.to_string()),
        }
    }
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &[String]) -> String {
    let valid = valid_keys.join(", ");
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid}"),
        None => format!("valid keys: {valid}"),
    }
}

/// A TOML file that fed the configuration, kept for span lookup.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// The file an error came from. Inline strings carry no file metadata,
    /// so a lone source is assumed to be the culprit.
    fn for_error<'a>(error: &figment::Error, sources: &'a [SourceFile]) -> Option<&'a SourceFile> {
        let origin = error.metadata.as_ref().and_then(|m| m.source.as_ref());
        match origin {
            Some(figment::Source::File(path)) => {
                let path = path.display().to_string();
                sources.iter().find(|s| s.name == path)
            }
            _ if sources.len() == 1 => sources.first(),
            _ => None,
        }
    }

    fn locate(&self, section: &str, key: &str) -> Option<(SourceSpan, NamedSource<String>)> {
        let offset = find_key_offset(&self.content, section, key)?;
        Some((
            SourceSpan::new(offset.into(), key.len()),
            NamedSource::new(&self.name, self.content.clone()),
        ))
    }
}

/// Byte offset of `key` as written in `content`.
///
/// With a non-empty `section`, only lines after its `[section]` header are
/// searched. Matches must be followed by whitespace or `=`, so `name` does
/// not match `display_name` or `name_suffix`.
pub fn find_key_offset(content: &str, section: &str, key: &str) -> Option<usize> {
    let start = if section.is_empty() {
        0
    } else {
        let header = format!("[{section}]");
        content.find(&header)? + header.len()
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let rest = &line[indent..];
        if rest
            .strip_prefix(key)
            .is_some_and(|after| after.starts_with([' ', '\t', '=']))
        {
            return Some(offset + indent);
        }
        offset += line.len();
    }
    None
}

/// Closest valid key by Jaro-Winkler similarity, if any is close enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Print every diagnostic to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_name_for_naem() {
        let valid = ["name", "display_name", "description"];
        assert_eq!(suggest_key("naem", &valid).as_deref(), Some("name"));
    }

    #[test]
    fn suggests_command_key_for_typo() {
        let valid = ["usr1_command", "usr2_command", "pause_on_sigtstp"];
        assert_eq!(
            suggest_key("usr1_comand", &valid).as_deref(),
            Some("usr1_command")
        );
    }

    #[test]
    fn distant_typo_gets_no_suggestion() {
        assert_eq!(suggest_key("zzzzzz", &["level"]), None);
    }

    #[test]
    fn key_found_inside_its_section() {
        let content = "[logging]\nlevel = \"info\"\n[service]\nnaem = \"test\"\n";
        let o = find_key_offset(content, "service", "naem").unwrap();
        assert_eq!(&content[o..o + 4], "naem");
    }

    #[test]
    fn key_offset_handles_crlf_and_indent() {
        let content = "[service]\r\n  naem = \"test\"\r\n";
        let o = find_key_offset(content, "service", "naem").unwrap();
        assert_eq!(&content[o..o + 4], "naem");
    }

    #[test]
    fn prefix_of_longer_key_is_not_a_match() {
        let content = "[service]\ndisplay_name = \"x\"\nname_suffix = 1\nname=\"y\"\n";
        let o = find_key_offset(content, "service", "name").unwrap();
        assert!(content[o..].starts_with("name=\"y\""));
    }

    #[test]
    fn missing_section_has_no_offset() {
        assert_eq!(find_key_offset("[service]\nname = \"x\"\n", "host", "name"), None);
    }

    #[test]
    fn help_lists_valid_keys() {
        let keys = vec!["level".to_string()];
        assert_eq!(
            unknown_key_help(Some("level"), &keys),
            "did you mean `level`? Valid keys: level"
        );
        assert_eq!(unknown_key_help(None, &keys), "valid keys: level");
    }
}
