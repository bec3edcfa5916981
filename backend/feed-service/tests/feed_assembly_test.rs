//! Feed assembly: ordering, enrichment and degradation behavior.
mod common;

use common::{post, MockDirectory, MockPostStore};
use std::sync::Arc;
use uuid::Uuid;

use feed_service::error::AppError;
use feed_service::services::FeedService;

#[tokio::test]
async fn feed_preserves_store_order_and_degrades_missing_authors() {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    // newest → oldest; alice posted twice, bob is unknown to the directory
    let posts = vec![
        post(alice, "😀", 10),
        post(bob, "🎉", 20),
        post(alice, "🚀", 30),
    ];

    let store = Arc::new(MockPostStore::new(posts.clone()));
    let directory = Arc::new(MockDirectory::new(vec![(alice, "alice")]));
    let service = FeedService::new(store, directory.clone());

    let entries = service.get_feed(10).await.unwrap();

    assert_eq!(entries.len(), 3, "no post may be dropped on a directory miss");
    for (entry, expected) in entries.iter().zip(&posts) {
        assert_eq!(entry.post.id, expected.id, "join must not reorder posts");
    }

    assert_eq!(entries[0].author.as_ref().unwrap().display_name, "alice");
    assert!(entries[1].author.is_none());
    assert_eq!(entries[2].author.as_ref().unwrap().display_name, "alice");
}

#[tokio::test]
async fn one_batch_call_with_deduplicated_ids() {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let posts = vec![
        post(alice, "😀", 1),
        post(bob, "🌮", 2),
        post(alice, "🥕", 3),
        post(alice, "🍩", 4),
    ];

    let store = Arc::new(MockPostStore::new(posts));
    let directory = Arc::new(MockDirectory::new(vec![(alice, "alice"), (bob, "bob")]));
    let service = FeedService::new(store, directory.clone());

    service.get_feed(10).await.unwrap();

    assert_eq!(directory.batch_call_count(), 1);
    let batch = directory.last_batch();
    assert_eq!(batch, vec![alice, bob], "ids deduplicated, first-seen order");
    assert!(batch.len() <= 4);
}

#[tokio::test]
async fn empty_store_skips_the_directory() {
    let store = Arc::new(MockPostStore::empty());
    let directory = Arc::new(MockDirectory::empty());
    let service = FeedService::new(store, directory.clone());

    let entries = service.get_feed(10).await.unwrap();

    assert!(entries.is_empty());
    assert_eq!(directory.batch_call_count(), 0);
}

#[tokio::test]
async fn limit_bounds_the_feed() {
    let author = Uuid::new_v4();
    let posts = (0..5).map(|i| post(author, "🎈", i)).collect();

    let store = Arc::new(MockPostStore::new(posts));
    let directory = Arc::new(MockDirectory::new(vec![(author, "carol")]));
    let service = FeedService::new(store, directory);

    let entries = service.get_feed(3).await.unwrap();
    assert_eq!(entries.len(), 3);
}

#[tokio::test]
async fn directory_outage_serves_the_feed_without_authors() {
    let author = Uuid::new_v4();
    let posts = vec![post(author, "😀", 1), post(author, "🎉", 2)];

    let store = Arc::new(MockPostStore::new(posts));
    let directory = Arc::new(MockDirectory::new(vec![(author, "dave")]));
    directory.set_unavailable(true);
    let service = FeedService::new(store, directory.clone());

    let entries = service.get_feed(10).await.unwrap();

    assert_eq!(entries.len(), 2, "an outage must not fail or shrink the read");
    assert!(entries.iter().all(|entry| entry.author.is_none()));
    assert_eq!(directory.batch_call_count(), 1);
}

#[tokio::test]
async fn store_outage_is_a_retryable_error() {
    let store = Arc::new(MockPostStore::empty());
    store.set_unavailable(true);
    let directory = Arc::new(MockDirectory::empty());
    let service = FeedService::new(store, directory.clone());

    let err = service.get_feed(10).await.unwrap_err();
    assert!(matches!(err, AppError::StoreUnavailable(_)));
    assert_eq!(directory.batch_call_count(), 0);
}
