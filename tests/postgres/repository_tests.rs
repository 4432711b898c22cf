//! Repository behaviour against a real `PostgreSQL` database.

use crate::postgres::helpers::{fresh_user, message, repository};
use mockable::DefaultClock;
use postbox::direct_message::{
    adapters::postgres::PostgresMessageRepository,
    error::StorageError,
    ports::MessageRepository,
    services::{AppendMessageRequest, MessageStoreService},
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn append_round_trips_all_fields(repository: Option<PostgresMessageRepository>) {
    let Some(repo) = repository else { return };
    let (alice, bob) = (fresh_user(), fresh_user());
    let stored = message(&alice, &bob, "hello there", 0);

    repo.append(&stored).await.expect("append");

    let conversation = repo
        .conversation_between(&alice, &bob)
        .await
        .expect("query");
    assert_eq!(conversation, vec![stored.clone()]);

    let all = repo.list_all().await.expect("list");
    assert_eq!(all.iter().filter(|m| m.id() == stored.id()).count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn appended_messages_match_what_is_read_back(
    repository: Option<PostgresMessageRepository>,
) {
    let Some(repo) = repository else { return };
    let store = MessageStoreService::new(Arc::new(repo), Arc::new(DefaultClock));
    let (alice, bob) = (fresh_user(), fresh_user());

    let mut appended = Vec::new();
    for text in ["first", "second", "third"] {
        let request = AppendMessageRequest::new(alice.as_str(), bob.as_str(), text);
        appended.push(store.append(request).await.expect("append"));
    }

    let conversation = store
        .conversation_between(alice.as_str(), bob.as_str())
        .await
        .expect("query");
    assert_eq!(conversation, appended);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_identifier_is_rejected(repository: Option<PostgresMessageRepository>) {
    let Some(repo) = repository else { return };
    let stored = message(&fresh_user(), &fresh_user(), "once", 0);

    repo.append(&stored).await.expect("first append");
    let result = repo.append(&stored).await;

    assert!(matches!(result, Err(StorageError::DuplicateMessage(id)) if id == stored.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conversation_is_symmetric_and_time_ordered(
    repository: Option<PostgresMessageRepository>,
) {
    let Some(repo) = repository else { return };
    let (alice, bob, carol) = (fresh_user(), fresh_user(), fresh_user());
    let late = message(&alice, &bob, "late", 30);
    let early = message(&bob, &alice, "early", 10);
    let tied = message(&alice, &bob, "tied with early", 10);
    let unrelated = message(&alice, &carol, "elsewhere", 20);
    for m in [&late, &early, &tied, &unrelated] {
        repo.append(m).await.expect("append");
    }

    let forward = repo
        .conversation_between(&alice, &bob)
        .await
        .expect("query");
    let backward = repo
        .conversation_between(&bob, &alice)
        .await
        .expect("query");

    assert_eq!(forward, vec![early, tied, late]);
    assert_eq!(forward, backward);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_read_updates_one_direction_once(repository: Option<PostgresMessageRepository>) {
    let Some(repo) = repository else { return };
    let (alice, bob) = (fresh_user(), fresh_user());
    for m in [
        message(&alice, &bob, "a", 0),
        message(&alice, &bob, "b", 1),
        message(&bob, &alice, "c", 2),
    ] {
        repo.append(&m).await.expect("append");
    }

    assert_eq!(repo.mark_read(&alice, &bob).await.expect("mark"), 2);
    assert_eq!(repo.mark_read(&alice, &bob).await.expect("mark"), 0);

    let to_alice = repo.unread_counts_for(&alice).await.expect("counts");
    assert_eq!(to_alice.get(&bob), 1);
    let to_bob = repo.unread_counts_for(&bob).await.expect("counts");
    assert!(to_bob.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unread_counts_group_by_sender(repository: Option<PostgresMessageRepository>) {
    let Some(repo) = repository else { return };
    let (alice, bob, carol) = (fresh_user(), fresh_user(), fresh_user());
    for m in [
        message(&alice, &bob, "a1", 0),
        message(&alice, &bob, "a2", 1),
        message(&carol, &bob, "c1", 2),
    ] {
        repo.append(&m).await.expect("append");
    }

    let counts = repo.unread_counts_for(&bob).await.expect("counts");
    assert_eq!(counts.len(), 2);
    assert_eq!(counts.get(&alice), 2);
    assert_eq!(counts.get(&carol), 1);
    assert_eq!(counts.total(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_mark_read_never_double_counts(repository: Option<PostgresMessageRepository>) {
    let Some(repo) = repository else { return };
    let (alice, bob) = (fresh_user(), fresh_user());
    for n in 0..10 {
        repo.append(&message(&alice, &bob, "burst", n))
            .await
            .expect("append");
    }

    let mut handles = Vec::new();
    for _ in 0..4 {
        let (worker, sender, receiver) = (repo.clone(), alice.clone(), bob.clone());
        handles.push(tokio::spawn(async move {
            worker.mark_read(&sender, &receiver).await.expect("mark")
        }));
    }

    let mut total = 0;
    for handle in handles {
        total += handle.await.expect("task should not panic");
    }
    assert_eq!(total, 10);
}
