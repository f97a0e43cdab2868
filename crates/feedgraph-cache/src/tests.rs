//! Cache behavior against real normalization passes

use super::*;
use feedgraph_normalize::{Asset, Comment, Envelope, Normalizer, Post, User};
use serde_json::json;
use std::sync::Arc;

fn page() -> Envelope {
    Envelope::from_value(json!({
        "data": [
            {
                "id": "p1",
                "author": {"id": "u1", "name": "Ann", "avatar": {"id": "a1"}},
                "assets": [{"id": "a2"}, {"id": "gone-missing"}, {"id": "a3"}],
                "comments": [{"id": "m1", "author": {"id": "u1"}}],
            },
            {"id": "p2", "author": {"id": "u1"}},
        ],
        "next": "n",
    }))
}

fn populated() -> (RecordCache, Vec<Post>) {
    let cache = RecordCache::new();
    let (_, posts) = Normalizer::standard()
        .parse_many::<Post>(page(), &cache)
        .unwrap();
    (cache, posts)
}

#[test]
fn test_posts_resolve_their_author() {
    let (cache, posts) = populated();
    let author = posts[0].author.as_ref().unwrap();
    let user: User = cache.resolve_as(author).expect("author cached");
    assert_eq!(user.name.as_deref(), Some("Ann"));

    let avatar: Asset = cache.resolve_as(user.avatar.as_ref().unwrap()).unwrap();
    assert_eq!(avatar.id, "a1");

    assert_eq!(posts[1].author, posts[0].author);
}

#[test]
fn test_resolve_all_skips_missing_ids() {
    let (cache, posts) = populated();
    let assets = posts[0].assets.as_ref().unwrap();
    cache.remove(&Identifier::new("gone-missing", TableName::Assets));

    let resolved: Vec<Asset> = cache.resolve_all(assets);
    let ids: Vec<_> = resolved.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a2", "a3"]);
}

#[test]
fn test_resolve_rejects_mismatched_types() {
    let (cache, posts) = populated();
    let author = posts[0].author.as_ref().unwrap();
    assert!(cache.resolve_as::<Asset>(author).is_none());
    assert!(cache.resolve(author).is_some());

    let comments = posts[0].comments.as_ref().unwrap();
    assert!(cache.resolve_all::<User>(comments).is_empty());
    assert_eq!(cache.resolve_all::<Comment>(comments).len(), 1);
}

#[test]
fn test_table_counts_and_snapshot() {
    let (cache, _) = populated();
    let counts = cache.table_counts();
    assert_eq!(counts.get(&TableName::Posts), Some(&2));
    assert_eq!(counts.get(&TableName::Users), Some(&1));
    assert_eq!(counts.get(&TableName::Assets), Some(&4));
    assert_eq!(counts.get(&TableName::Comments), Some(&1));

    let snapshot = cache.snapshot();
    assert_eq!(snapshot.records.len(), cache.len());
    assert_eq!(snapshot.records[0].identifier(), Identifier::new("p1", TableName::Posts));

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: CacheSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn test_later_pass_replaces_record() {
    let cache = RecordCache::new();
    let normalizer = Normalizer::standard();
    normalizer
        .parse_one::<User>(
            Envelope::from_value(json!({"data": {"id": "u1", "name": "old"}})),
            &cache,
        )
        .unwrap();
    normalizer
        .parse_one::<User>(
            Envelope::from_value(json!({"data": {"id": "u1", "name": "new"}})),
            &cache,
        )
        .unwrap();

    let user: User = cache.get_as("u1").unwrap();
    assert_eq!(user.name.as_deref(), Some("new"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_concurrent_passes_share_one_cache() {
    let cache = Arc::new(RecordCache::new());
    let normalizer = Arc::new(Normalizer::standard());

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let cache = Arc::clone(&cache);
            let normalizer = Arc::clone(&normalizer);
            std::thread::spawn(move || {
                let envelope = Envelope::from_value(json!({
                    "data": [{"id": format!("p{n}"), "author": {"id": "shared"}}],
                }));
                normalizer.parse_many::<Post>(envelope, &cache).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let counts = cache.table_counts();
    assert_eq!(counts.get(&TableName::Posts), Some(&4));
    assert_eq!(counts.get(&TableName::Users), Some(&1));
    cache.clear();
    assert!(cache.is_empty());
}
