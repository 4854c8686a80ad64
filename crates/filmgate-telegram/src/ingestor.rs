//! Feed ingestion: channel posts into the content registry.

use std::sync::Arc;

use filmgate_core::ingest;
use filmgate_models::{ContentItem, ContentKind};
use teloxide::prelude::*;
use tracing::{debug, error, info, warn};

use crate::state::BotState;

/// Handles one post from the moderated feed channel.
///
/// Anything that cannot be registered is dropped where it stands: posts
/// from other chats, posts without a media payload, captions without a
/// code, and registry write failures. Nothing is queued or retried.
pub async fn handle_channel_post(msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    if msg.chat.id.0 != state.settings().feed_channel {
        debug!(chat_id = %msg.chat.id, "ignoring post from non-feed chat");
        return Ok(());
    }

    let Some((handle, kind)) = media_handle(&msg) else {
        debug!(chat_id = %msg.chat.id, "ignoring feed post without media payload");
        return Ok(());
    };

    let caption = msg.caption().unwrap_or("");
    let Some(code) = ingest::extract_code(caption) else {
        warn!(caption = %caption, "no content code in feed caption, post dropped");
        return Ok(());
    };

    let title = ingest::derive_title(caption, &code);
    let item = ContentItem::new(code.clone(), handle, kind, title, caption);

    match state.upsert_content(item).await {
        Ok(()) => info!(code = %code, kind = ?kind, "content registered"),
        Err(e) => error!(code = %code, error = %e, "failed to register content, post dropped"),
    }

    Ok(())
}

/// Extracts the platform file handle and records the payload kind.
fn media_handle(msg: &Message) -> Option<(String, ContentKind)> {
    if let Some(video) = msg.video() {
        Some((video.file.id.clone(), ContentKind::Video))
    } else {
        msg.document()
            .map(|doc| (doc.file.id.clone(), ContentKind::Document))
    }
}
