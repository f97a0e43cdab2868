use feedgraph_normalize::{
    Envelope, FlattenContext, Identifier, Normalizer, ParserRegistry, Post, Record, RecordSink,
    TableName,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Default)]
struct Published(RefCell<Vec<Identifier>>);

impl RecordSink for Published {
    fn publish(&self, id: Identifier, _record: Record) {
        self.0.borrow_mut().push(id);
    }
}

#[derive(Debug, Clone)]
struct GenPost {
    id: Option<u8>,
    author: Option<u8>,
    assets: Vec<Option<u8>>,
    repost_of: Option<u8>,
}

fn gen_post() -> impl Strategy<Value = GenPost> {
    (
        proptest::option::weighted(0.85, 0u8..12),
        proptest::option::of(0u8..4),
        proptest::collection::vec(proptest::option::weighted(0.8, 0u8..6), 0..4),
        proptest::option::weighted(0.2, 0u8..12),
    )
        .prop_map(|(id, author, assets, repost_of)| GenPost {
            id,
            author,
            assets,
            repost_of,
        })
}

impl GenPost {
    fn to_json(&self) -> Value {
        let mut post = serde_json::Map::new();
        if let Some(id) = self.id {
            post.insert("id".into(), json!(format!("p{id}")));
        }
        post.insert("summary".into(), json!("generated"));
        if let Some(author) = self.author {
            post.insert(
                "author".into(),
                json!({"id": format!("u{author}"), "avatar": {"id": format!("a{author}")}}),
            );
        }
        let assets: Vec<Value> = self
            .assets
            .iter()
            .map(|a| match a {
                Some(a) => json!({"id": format!("a{a}")}),
                None => json!({"url": "anonymous"}),
            })
            .collect();
        post.insert("assets".into(), Value::Array(assets));
        if let Some(orig) = self.repost_of {
            post.insert("repostedPost".into(), json!({"id": format!("p{orig}")}));
        }
        Value::Object(post)
    }
}

fn feed_envelope(posts: &[GenPost]) -> Envelope {
    let data: Vec<Value> = posts.iter().map(GenPost::to_json).collect();
    Envelope::from_value(json!({ "data": data }))
}

proptest! {
    #[test]
    fn parse_many_keeps_identifiable_roots_in_order(posts in proptest::collection::vec(gen_post(), 0..8)) {
        let sink = Published::default();
        let (_, parsed) = Normalizer::standard()
            .parse_many::<Post>(feed_envelope(&posts), &sink)
            .unwrap();

        let expected: Vec<String> = posts
            .iter()
            .filter_map(|p| p.id.map(|id| format!("p{id}")))
            .collect();
        let got: Vec<String> = parsed.into_iter().map(|p| p.id).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn every_identifier_is_published_exactly_once(posts in proptest::collection::vec(gen_post(), 0..8)) {
        let sink = Published::default();
        Normalizer::standard()
            .parse_many::<Post>(feed_envelope(&posts), &sink)
            .unwrap();

        let mut counts: BTreeMap<Identifier, usize> = BTreeMap::new();
        for id in sink.0.borrow().iter() {
            *counts.entry(id.clone()).or_default() += 1;
        }
        prop_assert!(counts.values().all(|&n| n == 1));

        for post in posts.iter().filter(|p| p.id.is_some()) {
            if let Some(author) = post.author {
                let id = Identifier::new(format!("u{author}"), TableName::Users);
                prop_assert!(counts.contains_key(&id));
            }
            for asset in post.assets.iter().flatten() {
                let id = Identifier::new(format!("a{asset}"), TableName::Assets);
                prop_assert!(counts.contains_key(&id));
            }
        }
    }

    #[test]
    fn pending_store_never_holds_inline_link_fragments(posts in proptest::collection::vec(gen_post(), 0..8)) {
        let registry = ParserRegistry::standard();
        let mut ctx = FlattenContext::new(&registry);
        for post in &posts {
            ctx.flatten_value(TableName::Posts, post.to_json());
        }

        for (id, fragment) in ctx.pending().iter() {
            let parser = registry.get(id.table).unwrap();
            for link in parser.links() {
                if link.fragment_field != link.reference_field {
                    prop_assert!(!fragment.contains(&link.fragment_field));
                }
                if let Some(value) = fragment.get(&link.reference_field) {
                    let is_descriptor = fragment.object_ref(&link.reference_field).is_some()
                        || fragment.array_ref(&link.reference_field).is_some();
                    prop_assert!(is_descriptor, "{} holds {} at {}", id, value, link.reference_field);
                }
            }
            prop_assert!(!fragment.contains("repostedPost"));
        }
    }
}
