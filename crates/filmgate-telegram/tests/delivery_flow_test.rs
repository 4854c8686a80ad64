//! Integration tests for the request-resolution flow.
//!
//! These drive the decision core and the pending-request state the way the
//! handlers do, with the gate outcome supplied directly; only the final
//! network relay is outside their reach.

use filmgate_models::{ContentItem, ContentKind, MembershipStatus};
use filmgate_persistence::ContentStore;
use filmgate_telegram::resolver::{resolve, Resolution};
use filmgate_telegram::SessionMap;
use tempfile::tempdir;

fn seeded_store(dir: &std::path::Path) -> ContentStore {
    let store = ContentStore::new(dir);
    store
        .upsert(ContentItem::new(
            "film042",
            "BAADcafe",
            ContentKind::Video,
            "FILM042",
            "FILM042\nAction movie 2024",
        ))
        .unwrap();
    store
}

#[test]
fn member_requesting_unregistered_code_gets_not_found() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path());

    let outcome = resolve(MembershipStatus::Member, Some("film777"), &store);
    assert_eq!(
        outcome,
        Resolution::NotFound {
            code: "film777".to_string()
        }
    );
}

#[tokio::test]
async fn denied_request_resumes_after_join() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path());
    let sessions = SessionMap::new();
    let chat = 42;

    // Deep link arrives while the user is not a member: the gate denies
    // and the requested code is retained.
    let first = resolve(MembershipStatus::NotMember, Some("film042"), &store);
    assert_eq!(first, Resolution::PromptJoin);
    sessions.remember_code(chat, "film042".to_string()).await;

    // A first confirmation press still finds the user outside the channel;
    // the pending code must survive the denial.
    let pending = sessions.pending_code(chat).await;
    let retry = resolve(MembershipStatus::NotMember, pending.as_deref(), &store);
    assert_eq!(retry, Resolution::PromptJoin);
    assert_eq!(sessions.pending_code(chat).await.as_deref(), Some("film042"));

    // The user joins and presses the button again: the original code is
    // delivered without being resent.
    let pending = sessions.pending_code(chat).await;
    let granted = resolve(MembershipStatus::Member, pending.as_deref(), &store);
    match granted {
        Resolution::Deliver(item) => {
            assert_eq!(item.code, "film042");
            assert_eq!(item.handle, "BAADcafe");
        }
        other => panic!("expected delivery, got {other:?}"),
    }

    // Consumed exactly once: a later confirmation has nothing pending and
    // resolves to the welcome path.
    sessions.clear(chat).await;
    let pending = sessions.pending_code(chat).await;
    assert_eq!(pending, None);
    assert_eq!(
        resolve(MembershipStatus::Member, pending.as_deref(), &store),
        Resolution::Welcome
    );
}

#[tokio::test]
async fn inconclusive_gate_never_releases_content() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path());
    let sessions = SessionMap::new();

    let outcome = resolve(MembershipStatus::Unknown, Some("film042"), &store);
    assert_eq!(outcome, Resolution::PromptJoin);

    // The retained code keeps the request recoverable once the directory
    // answers conclusively.
    sessions.remember_code(7, "film042".to_string()).await;
    let pending = sessions.pending_code(7).await;
    assert!(matches!(
        resolve(MembershipStatus::Member, pending.as_deref(), &store),
        Resolution::Deliver(_)
    ));
}

#[test]
fn replaced_registration_is_what_gets_delivered() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path());

    // The feed re-posts the same code with a fresh upload.
    store
        .upsert(ContentItem::new(
            "film042",
            "BAADnew",
            ContentKind::Document,
            "FILM042 remastered",
            "FILM042 remastered",
        ))
        .unwrap();

    match resolve(MembershipStatus::Member, Some("film042"), &store) {
        Resolution::Deliver(item) => {
            assert_eq!(item.handle, "BAADnew");
            assert_eq!(item.kind, ContentKind::Document);
        }
        other => panic!("expected delivery, got {other:?}"),
    }
}
