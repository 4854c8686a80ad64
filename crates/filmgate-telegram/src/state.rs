//! Shared state for the Telegram bot.

use std::path::Path;
use std::sync::Arc;

use filmgate_core::Settings;
use filmgate_models::{ContentItem, MembershipStatus, UserProfile};
use filmgate_persistence::{ContentStore, Result as StoreResult, UserStore};
use tokio::sync::RwLock;
use tracing::warn;

use crate::resolver::{self, Resolution};
use crate::session::SessionMap;
use crate::texts::Texts;

/// Shared state, accessible across all handlers.
///
/// The two stores are the only shared mutable resources: writes go through
/// the lock's write half, reads run concurrently. No network call is ever
/// made while a store lock is held.
pub struct BotState {
    /// Immutable runtime settings.
    settings: Settings,
    /// Immutable user-facing texts.
    texts: Texts,
    /// Content registry (code -> item).
    content: RwLock<ContentStore>,
    /// Audit log of users who contacted the bot.
    users: RwLock<UserStore>,
    /// Per-chat pending-request state.
    sessions: SessionMap,
}

impl BotState {
    /// Creates state rooted at the given directory.
    pub fn new(settings: Settings, state_dir: &Path) -> Self {
        Self {
            settings,
            texts: Texts::default(),
            content: RwLock::new(ContentStore::new(state_dir)),
            users: RwLock::new(UserStore::new(state_dir)),
            sessions: SessionMap::new(),
        }
    }

    /// Runtime settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// User-facing texts.
    pub fn texts(&self) -> &Texts {
        &self.texts
    }

    /// Pending-request state.
    pub fn sessions(&self) -> &SessionMap {
        &self.sessions
    }

    /// Registers (or fully replaces) a content item.
    pub async fn upsert_content(&self, item: ContentItem) -> StoreResult<()> {
        let content = self.content.write().await;
        content.upsert(item)
    }

    /// The most recent items for the browsing view, bounded by settings.
    pub async fn list_content(&self) -> StoreResult<Vec<ContentItem>> {
        let content = self.content.read().await;
        content.list(self.settings.list_limit)
    }

    /// Resolves a request against the registry under a read lock.
    pub async fn resolve_request(
        &self,
        membership: MembershipStatus,
        requested: Option<&str>,
    ) -> Resolution {
        let content = self.content.read().await;
        resolver::resolve(membership, requested, &content)
    }

    /// Records a user contact in the audit store.
    ///
    /// Audit-only: a failure here is logged and never blocks delivery.
    pub async fn record_contact(&self, profile: UserProfile) {
        let users = self.users.write().await;
        if let Err(e) = users.upsert(profile) {
            warn!(error = %e, "failed to record user contact");
        }
    }

    /// Every known user id, for the broadcast command.
    pub async fn broadcast_targets(&self) -> StoreResult<Vec<i64>> {
        let users = self.users.read().await;
        users.all_ids()
    }
}

/// Creates the shared state used by all handlers.
pub fn create_shared_state(settings: Settings, state_dir: &Path) -> Arc<BotState> {
    Arc::new(BotState::new(settings, state_dir))
}
