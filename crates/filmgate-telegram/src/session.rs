//! Per-chat pending-request state.
//!
//! A [`PendingRequest`] is the session-scoped remainder of one
//! conversational turn: the content code a denied request is waiting to
//! resume, and/or a marker that the next plain message should be read as a
//! code. Entries live in memory only, are consumed exactly once, and are
//! superseded by a newer request from the same chat.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// What a chat's current turn is still waiting on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingRequest {
    /// Code requested before the membership gate denied release. Survives
    /// the join-prompt round trip so a granted re-check resumes delivery
    /// without the user resending the link.
    pub code: Option<String>,
    /// Whether the next plain text message should be interpreted as a
    /// content-code request.
    pub awaiting_free_text: bool,
}

impl PendingRequest {
    fn is_empty(&self) -> bool {
        self.code.is_none() && !self.awaiting_free_text
    }
}

/// In-memory pending-request map, keyed by chat id.
#[derive(Debug, Default)]
pub struct SessionMap {
    inner: RwLock<HashMap<i64, PendingRequest>>,
}

impl SessionMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers the code of a gate-denied request, superseding any prior
    /// pending state for the chat.
    pub async fn remember_code(&self, chat_id: i64, code: String) {
        let mut map = self.inner.write().await;
        map.insert(
            chat_id,
            PendingRequest {
                code: Some(code),
                awaiting_free_text: false,
            },
        );
    }

    /// Marks the chat as expecting a free-text code next, superseding any
    /// prior pending state.
    pub async fn await_free_text(&self, chat_id: i64) {
        let mut map = self.inner.write().await;
        map.insert(
            chat_id,
            PendingRequest {
                code: None,
                awaiting_free_text: true,
            },
        );
    }

    /// Reads the pending code without consuming it. The code is only
    /// cleared once a re-check is granted and delivery proceeds.
    pub async fn pending_code(&self, chat_id: i64) -> Option<String> {
        let map = self.inner.read().await;
        map.get(&chat_id).and_then(|p| p.code.clone())
    }

    /// Consumes the awaiting-free-text marker. Returns `true` at most once
    /// per [`await_free_text`](Self::await_free_text) call.
    pub async fn take_awaiting(&self, chat_id: i64) -> bool {
        let mut map = self.inner.write().await;
        match map.get_mut(&chat_id) {
            Some(pending) if pending.awaiting_free_text => {
                pending.awaiting_free_text = false;
                if pending.is_empty() {
                    map.remove(&chat_id);
                }
                true
            }
            _ => false,
        }
    }

    /// Clears all pending state for the chat.
    pub async fn clear(&self, chat_id: i64) {
        let mut map = self.inner.write().await;
        map.remove(&chat_id);
    }
}
