use crate::core::models::LengthTier;

/// Character the model is told to wrap key phrases in.
pub const EMPHASIS_DELIMITER: char = '*';

/// Strips control characters that PDF and OCR output tend to carry (form
/// feeds, NULs) while keeping line structure.
#[must_use]
pub fn sanitize_document_text(raw: &str) -> String {
    raw.chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect()
}

/// Builds the summarization instruction. Pure in `(text, tier)`.
#[must_use]
pub fn build_prompt(text: &str, tier: LengthTier) -> String {
    format!(
        "Summarize the following text in a {tier} format. \
         Identify the key points and main ideas, and wrap the most important phrases \
         or sentences in asterisks ({d}like this{d}). \
         Do not use any other markdown. Text: \"{text}\"",
        d = EMPHASIS_DELIMITER,
    )
}
