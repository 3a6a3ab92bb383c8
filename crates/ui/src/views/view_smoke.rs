use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn coach_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Coach, "Hi!");
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("What are we studying today?"),
        "missing empty-state prompt in {html}"
    );
    assert!(
        html.contains("Help me cram for a test"),
        "missing suggestion chip in {html}"
    );
    assert!(html.contains("Send"), "missing send button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn coach_view_smoke_disables_clear_without_history() {
    let mut harness = setup_view_harness(ViewKind::Coach, "Hi!");
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("New conversation"),
        "missing clear button in {html}"
    );
    assert!(html.contains("disabled"), "clear should start disabled");
}

#[tokio::test(flavor = "current_thread")]
async fn library_view_smoke_renders_catalog_cards() {
    let mut harness = setup_view_harness(ViewKind::Library, "Hi!");
    harness.rebuild();
    let html = harness.render();
    // First page of the catalog is three sets.
    assert!(
        html.contains("Biology: Cell Structure"),
        "missing first catalog set in {html}"
    );
    assert!(
        html.contains("World History: World War II"),
        "missing third catalog set in {html}"
    );
    assert!(
        !html.contains("Spanish: Common Verbs"),
        "fourth set should wait for see-more"
    );
    assert!(html.contains("See more"), "missing see-more in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn library_view_smoke_shows_term_counts() {
    let mut harness = setup_view_harness(ViewKind::Library, "Hi!");
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("4 terms"), "missing term count in {html}");
    assert!(
        html.contains("214 studiers today"),
        "missing studier count in {html}"
    );
}
