//! End-to-end scenarios exercising parsing and layout together.

use chipline_core::{
    Axis, Effect, HeightPolicy, LayoutController, LayoutEffect, LayoutOptions, TagCollection,
    TagInputConfig,
};

fn changed(effects: &[Effect<String>]) -> Option<Vec<String>> {
    effects.iter().find_map(|e| match e {
        Effect::Change(v) => Some(v.clone()),
        _ => None,
    })
}

#[test]
fn typing_a_separator_commits_and_resizes() {
    let config = TagInputConfig::default().with_separators(&[',', ' ']);
    let mut collection: TagCollection<String> = TagCollection::new(&config).unwrap();
    let mut layout = LayoutController::new(config.layout.clone());

    layout.on_wrapper_resize(400.0);
    collection.set_value(vec!["a".to_string()]);
    layout.on_tag_count_changed(1);

    collection.on_text_changed("b");
    layout.on_pending_text(false);

    let effects = collection.on_text_changed("b,");
    let next = changed(&effects).unwrap();
    assert_eq!(next, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(collection.pending_text(), "");

    // The commit flows back into the layout as a count change plus the
    // chip re-measurement.
    layout.on_tag_count_changed(next.len());
    layout.on_pending_text(true);
    layout.on_last_chip_measured(120.0);
    // Empty pending text keeps the compact default footprint.
    assert_eq!(layout.input_width(), Some(90.0));
}

#[test]
fn email_extraction_round_trip() {
    let config = TagInputConfig::default().with_pattern(r"[^\s,;]+@[^\s,;]+");
    let mut collection: TagCollection<String> = TagCollection::new(&config).unwrap();

    collection.set_pending_text("x@y.com z@y.com,");
    let effects = collection.parse();
    assert_eq!(
        changed(&effects),
        Some(vec!["x@y.com".to_string(), "z@y.com".to_string()])
    );

    // Parsing again with no intervening change is a no-op.
    assert!(collection.parse().is_empty());
}

#[test]
fn backspace_chain_empties_the_sequence() {
    let config = TagInputConfig::default();
    let mut collection: TagCollection<String> = TagCollection::new(&config).unwrap();
    collection.set_value(vec!["a".to_string(), "b".to_string(), "c".to_string()]);

    for expected_len in [2usize, 1, 0] {
        let effects = collection.on_backspace();
        assert_eq!(changed(&effects).unwrap().len(), expected_len);
    }
    assert!(collection.on_backspace().is_empty());
}

#[test]
fn line_growth_switches_to_scroll_at_the_cap() {
    let opts = LayoutOptions {
        height_policy: HeightPolicy::LineCount { number_of_lines: 2 },
        ..LayoutOptions::default()
    };
    let mut layout = LayoutController::new(opts);
    layout.on_wrapper_resize(300.0);
    layout.on_pending_text(false);

    // Chips keep landing near the right edge; each measurement below the
    // threshold consumes a line.
    layout.on_tag_count_changed(2);
    layout.on_last_chip_measured(280.0);
    assert_eq!(layout.lines(), 2);
    assert!(layout.on_layout_committed().is_empty());

    layout.on_tag_count_changed(4);
    layout.on_last_chip_measured(290.0);
    assert_eq!(layout.lines(), 2);
    assert_eq!(
        layout.on_layout_committed(),
        vec![LayoutEffect::ScrollToBottom]
    );
}

#[test]
fn horizontal_variant_scrolls_to_end() {
    let opts = LayoutOptions {
        axis: Axis::Horizontal,
        ..LayoutOptions::default()
    };
    let mut layout = LayoutController::new(opts);
    layout.on_wrapper_resize(200.0);
    layout.on_viewport_resize(200.0);

    layout.on_content_size(350.0);
    assert_eq!(layout.on_layout_committed(), vec![LayoutEffect::ScrollToEnd]);
}

#[test]
fn detached_layout_never_scrolls() {
    let mut layout = LayoutController::new(LayoutOptions::default());
    layout.on_wrapper_resize(200.0);
    layout.on_viewport_resize(50.0);
    layout.on_content_size(300.0);

    layout.detach();
    assert!(layout.on_layout_committed().is_empty());
    // Further events remain inert.
    layout.on_content_size(400.0);
    assert!(layout.on_layout_committed().is_empty());
}

#[test]
fn max_tags_scenario() {
    let config = TagInputConfig::default().with_max_tags(2);
    let mut collection: TagCollection<String> = TagCollection::new(&config).unwrap();
    collection.set_value(vec!["a".to_string(), "b".to_string()]);
    assert!(collection.is_full());

    // A full collection accepts no more tags through any path.
    collection.set_pending_text("c,");
    assert!(collection.parse().is_empty() || !collection.value().contains(&"c".to_string()));
    assert!(collection.add_custom_tag("d".to_string()).is_empty());
}
