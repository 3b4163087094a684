use crate::sentiment::Sentiment;
use std::fmt::Write;

pub const NO_LETTERS_WARNING: &str = "Input contains no letters. Sentiment analysis works best with natural language (e.g., sentences). Results may be neutral by default.";

/// What one render of the page needs.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub input_text: &'a str,
    pub sentiment: Option<Sentiment>,
    pub explanation: Option<&'a str>,
    pub notice: Option<&'a str>,
    pub can_clear: bool,
}

pub fn marker(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "🟢",
        Sentiment::Negative => "🔴",
        Sentiment::Neutral => "🟡",
    }
}

/// True when the text is non-empty and has no ASCII letter.
pub fn lacks_letters(text: &str) -> bool {
    !text.is_empty() && !text.chars().any(|c| c.is_ascii_alphabetic())
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut body = String::new();

    body.push_str(
        "<h1>🎭 Sentiment Analyzer</h1>\n\
         <p>Powered by a local model via Ollama. Classify text as <b>Positive</b>, \
         <b>Negative</b>, or <b>Neutral</b>; no data leaves your machine.</p>\n\
         <p>⏳ <b>Be patient</b>: analysis takes 5 to 60 seconds, depending on input length.</p>\n",
    );

    let _ = write!(
        body,
        r#"<form method="post" action="/analyze" onsubmit="this.querySelector('button').disabled=true;document.getElementById('busy').hidden=false;">
<h3>Enter text to analyze:</h3>
<textarea name="text" rows="6" cols="70" maxlength="2000" placeholder="I love this product! It works perfectly." oninput="document.getElementById('count').textContent=this.value.trim().length;">{text}</textarea>
<p class="count">Characters: <span id="count">{count}</span></p>
<button type="submit">🔍 Analyze Sentiment</button>
<span id="busy" hidden>🧠 Analyzing…</span>
</form>
"#,
        text = escape_html(view.input_text),
        count = view.input_text.chars().count(),
    );

    if lacks_letters(view.input_text) {
        let _ = writeln!(
            body,
            r#"<p class="warning">⚠️ {}</p>"#,
            escape_html(NO_LETTERS_WARNING)
        );
    }

    if let Some(notice) = view.notice {
        let _ = writeln!(body, r#"<p class="error">❌ {}</p>"#, escape_html(notice));
    }

    if let Some(sentiment) = view.sentiment {
        let _ = writeln!(
            body,
            "<h2>{} Predicted Sentiment: <b>{}</b></h2>",
            marker(sentiment),
            sentiment
        );
        if let Some(explanation) = view.explanation {
            let _ = writeln!(
                body,
                "<h4>🔍 Why?</h4>\n<p class=\"explanation\">{}</p>",
                escape_html(explanation)
            );
        }
    }

    if view.can_clear {
        body.push_str(
            "<form method=\"post\" action=\"/clear\">\
             <button type=\"submit\">🗑️ Clear Input &amp; Result</button></form>\n",
        );
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Sentiment Analyzer</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n{body}</body>\n</html>\n"
    )
}

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;}\
.count{text-align:right;color:#666;font-size:0.9em;}\
.warning{color:#8a6d00;}.error{color:#b00020;}";

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
