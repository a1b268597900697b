use slideshow_engine::{Catalog, ImageRecord};

fn catalog(urls: &[&str]) -> Catalog {
    Catalog::new(urls.iter().map(|url| ImageRecord::new(*url)).collect())
}

#[test]
fn next_wraps_at_end() {
    let cat = catalog(&["a.jpg", "b.jpg", "c.jpg"]);
    assert_eq!(cat.next(0), 1);
    assert_eq!(cat.next(1), 2);
    assert_eq!(cat.next(2), 0);
}

#[test]
fn single_entry_next_is_itself() {
    let cat = catalog(&["only.jpg"]);
    assert_eq!(cat.next(0), 0);
}

#[test]
fn get_out_of_range_is_none() {
    let cat = catalog(&["a.jpg"]);
    assert!(cat.get(0).is_some());
    assert!(cat.get(1).is_none());
}

#[test]
fn empty_catalog_reports_empty() {
    let cat = Catalog::default();
    assert!(cat.is_empty());
    assert_eq!(cat.len(), 0);
}

#[test]
fn builder_fills_optional_fields() {
    let record = ImageRecord::new("a.jpg")
        .with_thumbnail("a_t.jpg")
        .with_title("A")
        .with_caption("First slide")
        .with_link("https://example.net/a");
    assert_eq!(record.thumbnail.as_deref(), Some("a_t.jpg"));
    assert_eq!(record.title.as_deref(), Some("A"));
    assert_eq!(record.caption.as_deref(), Some("First slide"));
    assert_eq!(record.link.as_deref(), Some("https://example.net/a"));
}
