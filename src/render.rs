//! Emphasis rendering for model output.
//!
//! Text is split on the delimiter and fragments alternate plain/emphasized by
//! position. Delimiters are not paired by content: an odd count leaves the
//! trailing fragment emphasized.

use std::fmt::Write as _;

use crossterm::style::{Stylize, style};

use crate::ai::EMPHASIS_DELIMITER;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub emphasized: bool,
}

impl Span {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    #[must_use]
    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Splits `text` into spans. Fragments at odd positions are emphasized.
/// Empty fragments (adjacent or edge delimiters) produce no span but still
/// count towards parity.
#[must_use]
pub fn render(text: &str) -> Vec<Span> {
    text.split(EMPHASIS_DELIMITER)
        .enumerate()
        .filter(|(_, fragment)| !fragment.is_empty())
        .map(|(index, fragment)| Span {
            text: fragment.to_string(),
            emphasized: index % 2 == 1,
        })
        .collect()
}

/// Spans for a terminal, emphasized ones in bold.
#[must_use]
pub fn to_terminal(spans: &[Span]) -> String {
    spans.iter().fold(String::new(), |mut out, span| {
        if span.emphasized {
            let _ = write!(out, "{}", style(&span.text).bold());
        } else {
            out.push_str(&span.text);
        }
        out
    })
}
