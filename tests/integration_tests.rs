//! Integration tests for the complete feedgraph pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - Envelope → Normalizer → RecordCache
//! - Paging through several responses into one shared cache
//! - Resolving references after the pass has finished
//!
//! Run with: cargo test --test integration_tests

use feedgraph_cache::RecordCache;
use feedgraph_normalize::{
    Asset, Category, Comment, Envelope, NormalizeError, Normalizer, Post, TableName, User,
};
use serde_json::json;

// ============================================================================
// Single page
// ============================================================================

fn discover_page() -> Envelope {
    r#"{
        "data": [
            {
                "id": 101,
                "token": "a1b2",
                "summary": "sunset study",
                "createdAt": "2024-05-01T10:00:00Z",
                "author": {
                    "id": 7,
                    "username": "ann",
                    "avatar": {"id": "av7", "url": "https://cdn/av7.png", "width": 80, "height": 80}
                },
                "category": {"slug": "painting", "name": "Painting", "tileImage": {"id": "t1"}},
                "assets": [
                    {"id": "img1", "url": "https://cdn/img1.jpg", "width": 1200, "height": 800},
                    {"url": "https://cdn/no-id.jpg"}
                ],
                "comments": [
                    {"id": "c9", "content": "love it", "author": {"id": 8, "username": "bob"}}
                ]
            },
            {
                "id": 102,
                "summary": "repost",
                "author": {"id": 8, "name": "Bob"},
                "repostAuthor": {"id": 7, "bio": "paints"},
                "repostedPost": {"id": 101, "viewsCount": 55}
            },
            {"summary": "no id, dropped"}
        ],
        "next": "page-2",
        "isLastPage": false
    }"#
    .parse()
    .expect("valid envelope")
}

#[test]
fn test_page_lands_in_cache_deduplicated() {
    let cache = RecordCache::new();
    let (page, posts) = Normalizer::standard()
        .parse_many::<Post>(discover_page(), &cache)
        .expect("page parses");

    assert!(page.has_more());
    let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["101", "102"]);

    let counts = cache.table_counts();
    assert_eq!(counts.get(&TableName::Posts), Some(&2));
    assert_eq!(counts.get(&TableName::Users), Some(&2));
    assert_eq!(counts.get(&TableName::Categories), Some(&1));
    assert_eq!(counts.get(&TableName::Comments), Some(&1));
    // av7, t1, img1
    assert_eq!(counts.get(&TableName::Assets), Some(&3));
}

#[test]
fn test_references_resolve_through_cache() {
    let cache = RecordCache::new();
    let (_, posts) = Normalizer::standard()
        .parse_many::<Post>(discover_page(), &cache)
        .unwrap();
    let first = &posts[0];

    let author: User = cache.resolve_as(first.author.as_ref().unwrap()).unwrap();
    assert_eq!(author.username.as_deref(), Some("ann"));
    // Enriched by the repost's second embed of the same user.
    assert_eq!(author.bio.as_deref(), Some("paints"));

    let avatar: Asset = cache.resolve_as(author.avatar.as_ref().unwrap()).unwrap();
    assert_eq!(avatar.aspect_ratio(), Some(1.0));

    let category: Category = cache.resolve_as(first.category.as_ref().unwrap()).unwrap();
    assert_eq!(category.id, "painting");
    assert!(category.tile_image.is_some());

    let images: Vec<Asset> = cache.resolve_all(first.assets.as_ref().unwrap());
    assert_eq!(images.len(), 1);

    let comments: Vec<Comment> = cache.resolve_all(first.comments.as_ref().unwrap());
    let commenter: User = cache.resolve_as(comments[0].author.as_ref().unwrap()).unwrap();
    assert_eq!(commenter.name.as_deref(), Some("Bob"));

    let original: Post = cache.get_as("101").unwrap();
    assert_eq!(original.views_count, Some(55));
    assert_eq!(original.token.as_deref(), Some("a1b2"));
}

// ============================================================================
// Paging
// ============================================================================

#[test]
fn test_pages_share_a_cache() {
    let cache = RecordCache::new();
    let normalizer = Normalizer::standard();

    let (first, _) = normalizer
        .parse_many::<Post>(discover_page(), &cache)
        .unwrap();
    assert_eq!(first.next.as_deref(), Some("page-2"));

    let second = Envelope::from_value(json!({
        "data": [{"id": 103, "author": {"id": 7, "followersCount": 3}}],
        "isLastPage": true,
    }));
    let (last, posts) = normalizer.parse_many::<Post>(second, &cache).unwrap();
    assert!(!last.has_more());
    assert_eq!(posts.len(), 1);

    assert_eq!(cache.table_counts().get(&TableName::Posts), Some(&3));
    // The cache replaces whole records per publish; merging only happens
    // within one pass.
    let ann: User = cache.get_as("7").unwrap();
    assert_eq!(ann.followers_count, Some(3));
    assert_eq!(ann.username, None);
}

// ============================================================================
// Shape errors
// ============================================================================

#[test]
fn test_shape_errors_return_no_partial_result() {
    let cache = RecordCache::new();
    let normalizer = Normalizer::standard();

    let err = normalizer
        .parse_many::<Post>(Envelope::from_value(json!({"data": {"id": 1}})), &cache)
        .unwrap_err();
    assert!(matches!(err, NormalizeError::NotAnArray { .. }));

    let err = normalizer
        .parse_one::<User>(Envelope::from_value(json!({"data": {"username": "x"}})), &cache)
        .unwrap_err();
    assert!(matches!(err, NormalizeError::NotIdentifiable { .. }));
    assert!(cache.is_empty());
}
