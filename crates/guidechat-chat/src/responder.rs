//! Offline keyword responder.
//!
//! Answers visitor questions from an intents document without any network
//! round trip. Classification runs on the trimmed, lowercased query:
//!
//! 1. Direct phrases: the first intent (document order) with a phrase
//!    contained in the query wins.
//! 2. Scored patterns: +1 per pattern contained whole, +0.5 per pattern
//!    only partially present (any of its words). Best positive score wins;
//!    ties keep the earlier intent.
//!
//! Anything else is answered by the `fallback` intent.

use std::path::Path;

use async_trait::async_trait;
use guidechat_core::content::ContentBlock;
use guidechat_core::message::ChatReply;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::service::ConversationService;

const BUILTIN_INTENTS: &str = include_str!("../assets/intents.json");

pub const FALLBACK_TAG: &str = "fallback";
const FALLBACK_TEXT: &str = "I'd be happy to help you learn about Bale Mountains National Park! \
You can ask me about park information, how to get there, accommodations, activities, \
best times to visit, or park fees.";

const PHRASE_CONFIDENCE: f64 = 0.95;
const PATTERN_CONFIDENCE: f64 = 0.85;
const FALLBACK_CONFIDENCE: f64 = 0.5;

// =============================================================================
// Intents document
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentsDocument {
    pub intents: Vec<IntentDefinition>,
}

/// One answerable topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDefinition {
    pub tag: String,
    /// Whole phrases that answer this intent directly.
    #[serde(default)]
    pub phrases: Vec<String>,
    /// Keywords scored against the query when no phrase matches.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Candidate replies; the first one is always used.
    #[serde(default)]
    pub responses: Vec<Vec<ContentBlock>>,
}

impl IntentsDocument {
    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        serde_json::from_str(json).map_err(|e| ServiceError::Intents(e.to_string()))
    }

    pub fn find(&self, tag: &str) -> Option<&IntentDefinition> {
        self.intents.iter().find(|intent| intent.tag == tag)
    }
}

/// Outcome of classifying one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification<'a> {
    pub intent: &'a IntentDefinition,
    pub confidence: f64,
}

// =============================================================================
// KeywordResponder
// =============================================================================

/// [`ConversationService`] backed by an in-memory intents document.
#[derive(Debug, Clone)]
pub struct KeywordResponder {
    document: IntentsDocument,
}

impl KeywordResponder {
    pub fn new(document: IntentsDocument) -> Self {
        Self { document }
    }

    /// Responder over the intents document shipped with the crate.
    pub fn builtin() -> Result<Self, ServiceError> {
        IntentsDocument::from_json(BUILTIN_INTENTS).map(Self::new)
    }

    /// Load a custom intents document from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ServiceError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ServiceError::Intents(format!("failed to read {}: {}", path.display(), e))
        })?;
        let document = IntentsDocument::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            intents = document.intents.len(),
            "Loaded intents document"
        );
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &IntentsDocument {
        &self.document
    }

    /// Pick the intent answering `query`, if any beats the fallback.
    pub fn classify(&self, query: &str) -> Option<Classification<'_>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        let candidates = || {
            self.document
                .intents
                .iter()
                .filter(|intent| intent.tag != FALLBACK_TAG)
        };

        if let Some(intent) = candidates().find(|intent| {
            intent
                .phrases
                .iter()
                .any(|phrase| query.contains(&phrase.to_lowercase()))
        }) {
            return Some(Classification {
                intent,
                confidence: PHRASE_CONFIDENCE,
            });
        }

        let mut best: Option<(&IntentDefinition, f64)> = None;
        for intent in candidates() {
            let score = pattern_score(&query, &intent.patterns);
            // Strict comparison keeps the earlier intent on ties.
            if score > 0.0 && best.map_or(true, |(_, top)| score > top) {
                best = Some((intent, score));
            }
        }

        best.map(|(intent, _)| Classification {
            intent,
            confidence: PATTERN_CONFIDENCE,
        })
    }

    /// Build the reply for `query`.
    pub fn respond(&self, query: &str) -> ChatReply {
        if let Some(found) = self.classify(query) {
            if let Some(parts) = found.intent.responses.first() {
                tracing::debug!(
                    intent = %found.intent.tag,
                    confidence = found.confidence,
                    "Matched intent"
                );
                return ChatReply::parts(parts.clone())
                    .with_intent(found.intent.tag.clone(), found.confidence);
            }
            tracing::warn!(intent = %found.intent.tag, "Matched intent has no responses");
        }
        self.fallback()
    }

    fn fallback(&self) -> ChatReply {
        let parts = self
            .document
            .find(FALLBACK_TAG)
            .and_then(|intent| intent.responses.first())
            .cloned()
            .unwrap_or_else(|| vec![ContentBlock::Text(FALLBACK_TEXT.to_string())]);
        ChatReply::parts(parts).with_intent(FALLBACK_TAG, FALLBACK_CONFIDENCE)
    }
}

#[async_trait]
impl ConversationService for KeywordResponder {
    async fn ask(&self, message: &str) -> Result<ChatReply, ServiceError> {
        Ok(self.respond(message))
    }
}

fn pattern_score(query: &str, patterns: &[String]) -> f64 {
    patterns
        .iter()
        .map(|pattern| {
            let pattern = pattern.to_lowercase();
            if query.contains(&pattern) {
                1.0
            } else if pattern.split_whitespace().any(|word| query.contains(word)) {
                0.5
            } else {
                0.0
            }
        })
        .sum()
}

// =============================================================================
// Tests
// =============================================================================
