//! End-to-end paging over the in-memory store.

use chrono::{Duration, TimeZone, Utc};
use triage_core::{
    Filters, Pager, PagerStatus, Platform, Post, PostId, QueryService, Status, Store, Tag,
};
use triage_store::MemoryStore;

fn dataset() -> MemoryStore {
    let base = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
    let platforms = [Platform::Twitter, Platform::Reddit, Platform::Tiktok];
    let posts = (0..25)
        .map(|i| {
            // Every third post shares a timestamp with its neighbour to exercise the id tiebreak.
            let minutes = i - i % 3;
            let tags: Vec<Tag> = if i % 2 == 0 {
                vec![Tag::new("spam").unwrap()]
            } else {
                vec![]
            };
            Post::new(
                PostId::new(format!("p{:02}", i)).unwrap(),
                platforms[(i as usize) % platforms.len()],
                format!("post number {}", i),
                Status::Flagged,
                base + Duration::minutes(minutes),
            )
            .with_tags(tags)
        })
        .collect();
    MemoryStore::from_posts(posts).unwrap()
}

fn sorted_ids(store: &MemoryStore, keep: impl Fn(&Post) -> bool) -> Vec<String> {
    let mut posts: Vec<Post> = store.list().unwrap().iter().filter(|p| keep(*p)).cloned().collect();
    triage_core::query::sort_posts(&mut posts);
    posts.into_iter().map(|p| p.id.to_string()).collect()
}

async fn drain(pager: &Pager<QueryService<MemoryStore>>) -> Vec<String> {
    pager.load_first().await;
    while pager.has_more() {
        pager.load_more().await;
    }
    assert_eq!(pager.status(), PagerStatus::Idle);
    pager.items().into_iter().map(|p| p.id.to_string()).collect()
}

#[tokio::test]
async fn pager_walks_the_whole_collection() {
    let store = dataset();
    let expected = sorted_ids(&store, |_| true);

    for page_size in [1, 2, 7, 25, 100] {
        let pager = Pager::new(QueryService::new(store.clone()), page_size);
        assert_eq!(drain(&pager).await, expected, "page size {}", page_size);
    }
}

#[tokio::test]
async fn pager_walks_a_filtered_collection() {
    let store = dataset();
    let expected = sorted_ids(&store, |p| p.platform == Platform::Reddit && p.has_tag("spam"));
    assert!(!expected.is_empty());

    let pager = Pager::new(QueryService::new(store), 2);
    pager
        .set_filters(Filters::new().with_platform("Reddit").with_tag("SPAM"))
        .await;
    let mut seen: Vec<String> = pager.items().into_iter().map(|p| p.id.to_string()).collect();
    while pager.has_more() {
        pager.load_more().await;
        seen = pager.items().into_iter().map(|p| p.id.to_string()).collect();
    }
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn mutations_show_up_on_refresh() {
    let store = dataset();
    let service = QueryService::new(store.clone());
    let pager = Pager::with_filters(service, Filters::new().with_status("dismissed"), 10);

    assert!(drain(&pager).await.is_empty());

    store.set_status("p03", Status::Dismissed).unwrap();
    pager.refresh().await;
    assert_eq!(
        pager.items().into_iter().map(|p| p.id.to_string()).collect::<Vec<_>>(),
        vec!["p03"]
    );
}
