use std::sync::Arc;
use std::time::Duration;

use slideshow_engine::engine::Regions;
use slideshow_engine::view::headless::HeadlessView;
use slideshow_engine::{Catalog, Error, ImageRecord, ShowRegistry, Slideshow, SlideshowOptions};

fn sync_options() -> SlideshowOptions {
    // Zero-duration fades complete inline, making transitions synchronous.
    SlideshowOptions {
        transition_duration: Duration::ZERO,
        ..SlideshowOptions::default()
    }
}

fn build(
    records: Vec<ImageRecord>,
    options: SlideshowOptions,
) -> (Arc<HeadlessView>, Regions, ShowRegistry, Arc<Slideshow>) {
    let view = HeadlessView::new();
    let regions = Regions {
        image: view.region("image"),
        carousel: Some(view.region("carousel")),
        title: Some(view.region("title")),
        caption: Some(view.region("caption")),
    };
    let registry = ShowRegistry::new();
    let show = Slideshow::new(
        Arc::new(Catalog::new(records)),
        regions,
        options,
        view.clone(),
        &registry,
    )
    .expect("engine construction");
    (view, regions, registry, show)
}

fn three_slides() -> Vec<ImageRecord> {
    vec![
        ImageRecord::new("a.jpg").with_title("A"),
        ImageRecord::new("b.jpg").with_title("B"),
        ImageRecord::new("c.jpg").with_title("C"),
    ]
}

#[tokio::test]
async fn first_slide_shown_on_construction() {
    let (view, regions, _registry, show) = build(three_slides(), sync_options());
    assert_eq!(show.current_index(), Some(0));
    assert_eq!(view.displayed_image(regions.image).as_deref(), Some("a.jpg"));
    assert_eq!(view.opacity(regions.image), 1.0);
}

#[tokio::test]
async fn show_image_settles_current_regardless_of_animate() {
    let (_view, _regions, _registry, show) = build(three_slides(), sync_options());
    assert!(show.show_image(1, true));
    assert_eq!(show.current_index(), Some(1));
    assert!(show.show_image(2, false));
    assert_eq!(show.current_index(), Some(2));
    assert_eq!(show.current_record().unwrap().image, "c.jpg");
}

#[tokio::test]
async fn repeated_next_cycles_back_to_first() {
    let (view, regions, _registry, show) = build(three_slides(), sync_options());
    let mut seen = Vec::new();
    for _ in 0..3 {
        assert!(show.show_next_image());
        seen.push(show.current_index().unwrap());
    }
    assert_eq!(seen, vec![1, 2, 0]);
    assert_eq!(view.displayed_image(regions.image).as_deref(), Some("a.jpg"));
}

#[tokio::test]
async fn next_skips_adjacent_duplicate_url() {
    let records = vec![
        ImageRecord::new("a.jpg"),
        ImageRecord::new("a.jpg"),
        ImageRecord::new("b.jpg"),
    ];
    let (_view, _regions, _registry, show) = build(records, sync_options());
    assert_eq!(show.current_index(), Some(0));
    show.show_next_image();
    // Entry 1 repeats a.jpg, so the advance lands on 2.
    assert_eq!(show.current_index(), Some(2));
}

#[tokio::test]
async fn duplicate_skip_is_wrap_safe() {
    let records = vec![
        ImageRecord::new("a.jpg"),
        ImageRecord::new("b.jpg"),
        ImageRecord::new("a.jpg"),
    ];
    let (_view, _regions, _registry, show) = build(records, sync_options());
    show.show_image(2, false);
    show.show_next_image();
    // Entry 0 repeats the image shown at entry 2; skip lands on 1.
    assert_eq!(show.current_index(), Some(1));
}

#[tokio::test]
async fn out_of_range_navigation_is_tolerated() {
    let (_view, _regions, _registry, show) = build(three_slides(), sync_options());
    assert!(!show.show_image(7, true));
    assert_eq!(show.current_index(), Some(0));
}

#[tokio::test]
async fn empty_catalog_navigation_returns_sentinel() {
    let options = SlideshowOptions {
        auto_show_first_slide: false,
        ..sync_options()
    };
    let (_view, _regions, _registry, show) = build(Vec::new(), options);
    assert_eq!(show.current_index(), None);
    assert!(!show.show_next_image());
    assert!(!show.show_image(0, true));
    assert_eq!(show.current_record(), None);
}

#[tokio::test]
async fn auto_show_first_requires_nonempty_catalog() {
    let view = HeadlessView::new();
    let regions = Regions {
        image: view.region("image"),
        carousel: None,
        title: None,
        caption: None,
    };
    let registry = ShowRegistry::new();
    let err = Slideshow::new(
        Arc::new(Catalog::default()),
        regions,
        sync_options(),
        view.clone(),
        &registry,
    );
    assert!(matches!(err, Err(Error::EmptyCatalog)));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn keep_initial_slide_suppresses_first_render() {
    let options = SlideshowOptions {
        keep_initial_slide: true,
        ..sync_options()
    };
    let (view, regions, _registry, show) = build(three_slides(), options);
    assert_eq!(view.displayed_image(regions.image), None);
    assert_eq!(view.insert_count(regions.image), 0);
    // No engine render and no carousel marker either.
    assert_eq!(show.current_index(), None);
}

#[tokio::test]
async fn current_falls_back_to_carousel_marker() {
    let options = SlideshowOptions {
        keep_initial_slide: true,
        ..sync_options()
    };
    let (view, _regions, _registry, show) = build(three_slides(), options);
    let entries: Vec<_> = show.carousel().unwrap().entries().to_vec();
    view.add_class(entries[1], "active");
    assert_eq!(show.current_index(), Some(1));
    assert_eq!(show.current_record().unwrap().image, "b.jpg");
}

#[tokio::test]
async fn every_image_is_preloaded_on_construction() {
    let (view, _regions, _registry, _show) = build(three_slides(), sync_options());
    assert_eq!(view.preloaded(), vec!["a.jpg", "b.jpg", "c.jpg"]);
}

#[tokio::test]
async fn linked_record_wraps_image_in_link() {
    let records = vec![
        ImageRecord::new("a.jpg"),
        ImageRecord::new("b.jpg").with_link("https://example.net/b"),
    ];
    let (view, regions, _registry, show) = build(records, sync_options());
    assert_eq!(view.displayed_link(regions.image), None);
    show.show_image(1, false);
    assert_eq!(
        view.displayed_link(regions.image).as_deref(),
        Some("https://example.net/b")
    );
}

#[tokio::test(start_paused = true)]
async fn transition_settles_asynchronously() {
    let options = SlideshowOptions {
        transition_duration: Duration::from_millis(50),
        ..SlideshowOptions::default()
    };
    let (view, regions, _registry, show) = build(three_slides(), options);
    assert_eq!(show.current_index(), Some(0));

    show.show_image(1, true);
    assert!(show.transition_in_flight());
    assert_eq!(show.current_index(), Some(0));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!show.transition_in_flight());
    assert_eq!(show.current_index(), Some(1));
    assert_eq!(view.displayed_image(regions.image).as_deref(), Some("b.jpg"));
}

#[tokio::test(start_paused = true)]
async fn overlapping_requests_last_one_wins() {
    let options = SlideshowOptions {
        transition_duration: Duration::from_millis(50),
        ..SlideshowOptions::default()
    };
    let (view, regions, _registry, show) = build(three_slides(), options);
    let baseline = view.insert_count(regions.image);

    show.show_image(1, true);
    show.show_image(2, true);
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(show.current_index(), Some(2));
    assert_eq!(view.displayed_image(regions.image).as_deref(), Some("c.jpg"));
    // The superseded request never inserted.
    assert_eq!(view.insert_count(regions.image), baseline + 1);
}
