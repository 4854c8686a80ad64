//! Delivery resolution: turning a request into an outcome.
//!
//! The decision core is a pure function over the membership outcome, the
//! requested code and the registry, so the whole state machine can be
//! exercised in tests without a live bot. The async half only relays an
//! already-decided delivery.

use filmgate_models::{ContentItem, ContentKind, MembershipStatus};
use filmgate_persistence::ContentStore;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, InputFile};
use teloxide::RequestError;
use tracing::error;

/// Outcome of resolving one user request.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Browsing entry with no code: serve the welcome menu.
    Welcome,
    /// Gate passed and the code is registered: relay the item.
    Deliver(ContentItem),
    /// Gate passed but the code has no registry entry. Terminal.
    NotFound { code: String },
    /// Gate denied (or inconclusive, which fails closed): prompt the user
    /// to join. Recoverable only through an explicit re-check.
    PromptJoin,
}

/// Resolves a request against the gate outcome and the registry.
///
/// The gate is consulted before the registry, so an unregistered code never
/// leaks its absence to non-members. A registry read failure is reported to
/// the caller as not-found rather than exposing storage internals.
pub fn resolve(
    membership: MembershipStatus,
    requested: Option<&str>,
    store: &ContentStore,
) -> Resolution {
    let Some(code) = requested else {
        return Resolution::Welcome;
    };

    if !membership.is_member() {
        return Resolution::PromptJoin;
    }

    match store.get(code) {
        Ok(Some(item)) => Resolution::Deliver(item),
        Ok(None) => Resolution::NotFound {
            code: code.to_lowercase(),
        },
        Err(e) => {
            error!(code = %code, error = %e, "registry read failed");
            Resolution::NotFound {
                code: code.to_lowercase(),
            }
        }
    }
}

/// Relays a registered item to the chat.
///
/// The send operation is chosen from the kind recorded at ingestion time.
/// Errors are returned to the caller, which reports a non-retryable
/// failure to the user; the resolver never re-attempts on its own.
pub async fn deliver(
    bot: &Bot,
    chat_id: ChatId,
    item: &ContentItem,
    menu: InlineKeyboardMarkup,
) -> Result<(), RequestError> {
    let caption = item.delivery_caption().to_string();
    let payload = InputFile::file_id(item.handle.clone());

    match item.kind {
        ContentKind::Video => {
            bot.send_video(chat_id, payload)
                .caption(caption)
                .reply_markup(menu)
                .await?;
        }
        ContentKind::Document => {
            bot.send_document(chat_id, payload)
                .caption(caption)
                .reply_markup(menu)
                .await?;
        }
    }

    Ok(())
}
