mod common;

use common::{PAGE_SIZE, ScriptedBackend};
use eah_controller::{AuctionFeed, FeedStatus, Resolution};
use eah_core::models::AuctionFilter;
use rstest::{fixture, rstest};

#[fixture]
fn pune_flats() -> AuctionFilter {
    AuctionFilter::new("7", "1")
}

#[rstest]
#[case::one_partial_page(3)]
#[case::one_full_page(10)]
#[case::just_over(11)]
#[case::several(47)]
#[test_log::test(tokio::test)]
async fn page_never_passes_last_page(pune_flats: AuctionFilter, #[case] count: usize) {
    let backend = ScriptedBackend::with_auctions(&pune_flats, count);
    let mut feed = AuctionFeed::new(pune_flats);

    feed.initialize(&backend).await;
    for _ in 0..10 {
        feed.load_more(&backend).await;
        assert!(feed.state().page <= feed.state().last_page);
    }

    assert_eq!(feed.items().len(), count);
    assert_eq!(feed.status(), FeedStatus::Exhausted);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn last_page_bounds_the_number_of_fetches(pune_flats: AuctionFilter) {
    let backend = ScriptedBackend::with_auctions(&pune_flats, 4 * PAGE_SIZE);
    let mut feed = AuctionFeed::new(pune_flats);

    let first = feed.initialize(&backend).await;
    assert_eq!(first, Resolution::Applied { received: PAGE_SIZE });
    assert_eq!(feed.state().last_page, 4);

    for _ in 0..3 {
        assert!(feed.load_more(&backend).await.is_some());
    }
    assert_eq!(feed.items().len(), 4 * PAGE_SIZE);

    // nothing left to fetch
    assert!(feed.load_more(&backend).await.is_none());
    assert_eq!(backend.pages_requested(), vec![1, 2, 3, 4]);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn refresh_replaces_the_list(pune_flats: AuctionFilter) {
    let backend = ScriptedBackend::with_auctions(&pune_flats, 25);
    let mut feed = AuctionFeed::new(pune_flats);

    feed.initialize(&backend).await;
    feed.load_more(&backend).await;
    assert_eq!(feed.items().len(), 20);

    let resolution = feed.refresh(&backend).await;
    assert_eq!(resolution, Resolution::Applied { received: PAGE_SIZE });
    assert_eq!(feed.items().len(), PAGE_SIZE);
    assert_eq!(feed.state().page, 1);
    assert!(!feed.is_refreshing());

    // pagination resumes from the top
    feed.load_more(&backend).await;
    assert_eq!(backend.pages_requested(), vec![1, 2, 1, 2]);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn filter_change_drops_previous_records(pune_flats: AuctionFilter) {
    let nashik_land = AuctionFilter::new("12", "3");
    let mut backend = ScriptedBackend::with_auctions(&pune_flats, 30);
    backend.add_auctions(&nashik_land, 4);

    let mut feed = AuctionFeed::new(pune_flats.clone());
    feed.initialize(&backend).await;
    feed.load_more(&backend).await;

    let resolution = feed.change_filter(&backend, nashik_land.clone()).await;
    assert_eq!(resolution, Some(Resolution::Applied { received: 4 }));
    assert_eq!(feed.items().len(), 4);
    assert!(feed.items().iter().all(|r| r.city == "city 12"));
    assert!(feed.items().iter().all(|r| !r.asset_type.is_flat()));
    assert_eq!(feed.state().last_page, 1);

    // setting the same pair again does not fetch
    assert!(feed.change_filter(&backend, nashik_land).await.is_none());
    assert_eq!(backend.pages_requested(), vec![1, 2, 1]);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn failed_page_is_fetched_again(pune_flats: AuctionFilter) {
    let backend = ScriptedBackend::with_auctions(&pune_flats, 30);
    backend.fail_page(2);
    let mut feed = AuctionFeed::new(pune_flats);

    feed.initialize(&backend).await;
    let failed = feed.load_more(&backend).await;
    assert_eq!(failed, Some(Resolution::Failed("connection reset".into())));
    assert!(!feed.is_loading());
    assert_eq!(feed.items().len(), PAGE_SIZE);

    feed.load_more(&backend).await;
    assert_eq!(feed.items().len(), 2 * PAGE_SIZE);
    assert_eq!(backend.pages_requested(), vec![1, 2, 2]);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn unknown_filter_is_rejected(pune_flats: AuctionFilter) {
    let backend = ScriptedBackend::default();
    let mut feed = AuctionFeed::new(pune_flats);

    let resolution = feed.initialize(&backend).await;
    let Resolution::Rejected(err) = resolution else {
        panic!("expected a rejection, got {resolution:?}");
    };
    assert_eq!(err.status_code, 404);
    assert!(feed.items().is_empty());
    assert_eq!(feed.status(), FeedStatus::Empty);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn only_one_request_is_outstanding(pune_flats: AuctionFilter) {
    let backend = ScriptedBackend::with_auctions(&pune_flats, 30);
    let mut feed = AuctionFeed::new(pune_flats);
    feed.initialize(&backend).await;

    let ticket = feed.begin_load_more().expect("page 2 is available");
    assert!(feed.is_loading());
    assert!(feed.begin_load_more().is_none());

    let outcome = {
        use eah_core::ports::AuctionRepository as _;
        backend.search_auctions(ticket.query()).await
    };
    feed.resolve(ticket, outcome);
    assert!(!feed.is_loading());
    assert_eq!(backend.pages_requested(), vec![1, 2]);
}
