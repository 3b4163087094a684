use crate::{Error, Result, sentiment::Sentiment};
use chrono::{DateTime, Utc};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingSentiment,
    AwaitingExplanation,
    Complete,
}

// Session events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Submit,
    SentimentReceived,
    AnalysisFailed,
    ExplanationReceived,
    Clear,
}

/// Everything the UI remembers for one browser session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    state: SessionState,
    pub input_text: String,
    pub sentiment_result: Option<Sentiment>,
    pub explanation: Option<String>,
    notice: Option<String>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            input_text: String::new(),
            sentiment_result: None,
            explanation: None,
            notice: None,
        }
    }

    pub fn current_state(&self) -> SessionState {
        self.state
    }

    pub fn transition(&mut self, event: SessionEvent) -> Result<()> {
        use SessionEvent as E;
        use SessionState as S;

        let old_state = self.state;
        let new_state = match (old_state, event) {
            (_, E::Submit) => S::AwaitingSentiment,
            (S::AwaitingSentiment, E::SentimentReceived) => S::AwaitingExplanation,
            (S::AwaitingSentiment, E::AnalysisFailed) => S::Idle,
            (S::AwaitingExplanation, E::ExplanationReceived) => S::Complete,
            (_, E::Clear) => S::Idle,
            _ => {
                warn!(
                    "Invalid session transition from {:?} with event {:?}",
                    old_state, event
                );
                return Err(Error::internal(format!(
                    "Invalid session transition from {:?} with event {:?}",
                    old_state, event
                )));
            }
        };

        debug!(
            "Session transition: {:?} -> {:?} (event: {:?})",
            old_state, new_state, event
        );
        self.state = new_state;
        Ok(())
    }

    /// Stores the submitted text without starting an analysis.
    pub fn set_input(&mut self, text: &str) {
        self.input_text = text.to_string();
    }

    pub fn begin_analysis(&mut self, text: &str) -> Result<()> {
        self.transition(SessionEvent::Submit)?;
        self.input_text = text.to_string();
        self.sentiment_result = None;
        self.explanation = None;
        Ok(())
    }

    pub fn record_sentiment(&mut self, sentiment: Sentiment) -> Result<()> {
        self.transition(SessionEvent::SentimentReceived)?;
        self.sentiment_result = Some(sentiment);
        Ok(())
    }

    pub fn record_failure(&mut self, message: impl Into<String>) -> Result<()> {
        self.transition(SessionEvent::AnalysisFailed)?;
        self.notice = Some(message.into());
        Ok(())
    }

    /// Stores the explanation. Fails if one is already stored for this sentiment.
    pub fn record_explanation(&mut self, explanation: impl Into<String>) -> Result<()> {
        self.transition(SessionEvent::ExplanationReceived)?;
        self.explanation = Some(explanation.into());
        Ok(())
    }

    /// Resets input text, sentiment and explanation.
    pub fn clear(&mut self) -> Result<()> {
        self.transition(SessionEvent::Clear)?;
        self.input_text.clear();
        self.sentiment_result = None;
        self.explanation = None;
        self.notice = None;
        Ok(())
    }

    pub fn needs_explanation(&self) -> bool {
        self.state == SessionState::AwaitingExplanation && self.sentiment_result.is_some()
    }

    pub fn can_clear(&self) -> bool {
        self.sentiment_result.is_some() && !self.input_text.is_empty()
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    /// Notices are shown on exactly one render.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

struct SessionEntry {
    context: Arc<Mutex<SessionContext>>,
    last_seen: DateTime<Utc>,
}

/// A session looked up (or created) for one request.
pub struct SessionHandle {
    pub id: Uuid,
    pub context: Arc<Mutex<SessionContext>>,
    pub created: bool,
}

/// In-memory sessions keyed by cookie id.
///
/// The map lock only covers lookup; each session has its own lock, held by the
/// handler across backend calls for that session.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn get_or_create(&self, id: Option<Uuid>) -> SessionHandle {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;
        self.prune_expired(&mut sessions, now);

        if let Some(id) = id {
            if let Some(entry) = sessions.get_mut(&id) {
                entry.last_seen = now;
                return SessionHandle {
                    id,
                    context: entry.context.clone(),
                    created: false,
                };
            }
        }

        let id = Uuid::new_v4();
        let context = Arc::new(Mutex::new(SessionContext::new()));
        sessions.insert(
            id,
            SessionEntry {
                context: context.clone(),
                last_seen: now,
            },
        );
        info!("Created session {}", id);

        SessionHandle {
            id,
            context,
            created: true,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn prune_expired(&self, sessions: &mut HashMap<Uuid, SessionEntry>, now: DateTime<Utc>) {
        let Ok(ttl) = chrono::Duration::from_std(self.ttl) else {
            return;
        };

        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= ttl);
        let pruned = before - sessions.len();
        if pruned > 0 {
            debug!("Pruned {} idle sessions", pruned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_flow() {
        let mut ctx = SessionContext::new();
        assert_eq!(ctx.current_state(), SessionState::Idle);

        ctx.begin_analysis("I love this!").unwrap();
        assert_eq!(ctx.current_state(), SessionState::AwaitingSentiment);

        ctx.record_sentiment(Sentiment::Positive).unwrap();
        assert!(ctx.needs_explanation());

        ctx.record_explanation("Love is upbeat.").unwrap();
        assert_eq!(ctx.current_state(), SessionState::Complete);
        assert!(!ctx.needs_explanation());
        assert_eq!(ctx.explanation.as_deref(), Some("Love is upbeat."));
    }

    #[test]
    fn test_explanation_stored_only_once() {
        let mut ctx = SessionContext::new();
        ctx.begin_analysis("fine").unwrap();
        ctx.record_sentiment(Sentiment::Neutral).unwrap();
        ctx.record_explanation("first.").unwrap();

        assert!(ctx.record_explanation("second.").is_err());
        assert_eq!(ctx.explanation.as_deref(), Some("first."));
    }

    #[test]
    fn test_new_submission_resets_results() {
        let mut ctx = SessionContext::new();
        ctx.begin_analysis("good day").unwrap();
        ctx.record_sentiment(Sentiment::Positive).unwrap();
        ctx.record_explanation("Good is positive.").unwrap();

        ctx.begin_analysis("bad day").unwrap();
        assert_eq!(ctx.input_text, "bad day");
        assert_eq!(ctx.sentiment_result, None);
        assert_eq!(ctx.explanation, None);
    }

    #[test]
    fn test_failure_returns_to_idle_with_notice() {
        let mut ctx = SessionContext::new();
        ctx.begin_analysis("hello").unwrap();
        ctx.record_failure("Request timed out. Try shorter text.").unwrap();

        assert_eq!(ctx.current_state(), SessionState::Idle);
        assert_eq!(ctx.sentiment_result, None);
        assert_eq!(
            ctx.take_notice().as_deref(),
            Some("Request timed out. Try shorter text.")
        );
        assert_eq!(ctx.take_notice(), None);
    }

    #[test]
    fn test_clear_resets_all_fields() {
        let mut ctx = SessionContext::new();
        ctx.begin_analysis("meh").unwrap();
        ctx.record_sentiment(Sentiment::Neutral).unwrap();
        assert!(ctx.can_clear());

        ctx.clear().unwrap();
        assert_eq!(ctx.current_state(), SessionState::Idle);
        assert!(ctx.input_text.is_empty());
        assert_eq!(ctx.sentiment_result, None);
        assert_eq!(ctx.explanation, None);
        assert!(!ctx.can_clear());
    }

    #[test]
    fn test_invalid_transitions() {
        let mut ctx = SessionContext::new();
        assert!(ctx.record_sentiment(Sentiment::Positive).is_err());
        assert!(ctx.record_explanation("nope.").is_err());
        assert!(ctx.record_failure("nope").is_err());
        assert_eq!(ctx.current_state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_store_reuses_known_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));

        let first = store.get_or_create(None).await;
        assert!(first.created);

        let again = store.get_or_create(Some(first.id)).await;
        assert!(!again.created);
        assert_eq!(again.id, first.id);
        assert!(Arc::ptr_eq(&first.context, &again.context));

        let unknown = store.get_or_create(Some(Uuid::new_v4())).await;
        assert!(unknown.created);
        assert_ne!(unknown.id, first.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_store_prunes_idle_sessions() {
        let store = SessionStore::new(Duration::ZERO);
        let first = store.get_or_create(None).await;

        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = store.get_or_create(Some(first.id)).await;

        assert!(second.created);
        assert_eq!(store.len().await, 1);
    }
}
