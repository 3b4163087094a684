mod label;
pub mod prompt;
mod service;

pub use label::{Sentiment, normalize_label};
pub use service::{
    EXPLANATION_FAILED, EXPLANATION_TIMED_OUT, EXPLANATION_UNREACHABLE, SentimentService,
};
