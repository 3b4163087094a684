use super::Sentiment;

pub const NO_EXPLANATION: &str = "No explanation available.";

pub fn classification_prompt(text: &str) -> String {
    format!(
        r#"You are a sentiment classification engine. Analyze the following text and respond
with ONLY one word: 'Positive', 'Negative', or 'Neutral'.

If the text contains no meaningful language (e.g., numbers, symbols, codes),
respond with 'Neutral'.

Text:
"""
{text}
"""

Sentiment:"#
    )
}

pub fn explanation_prompt(text: &str, sentiment: Sentiment) -> String {
    format!(
        r#"Explain in one short sentence why the following text might be considered {sentiment} in sentiment.
Focus on tone, words, or context that support this label.

Text:
"""
{text}
"""

Explanation:"#
    )
}

/// Cuts model output down to its first sentence.
///
/// Splits on the first `.` only, so abbreviations such as "U.S." end the sentence
/// early. Output without a period is kept whole. The result always ends in `.`.
pub fn first_sentence(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NO_EXPLANATION.to_string();
    }

    let head = trimmed.split('.').next().unwrap_or(trimmed).trim();
    format!("{}.", head)
}
