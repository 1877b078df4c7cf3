use super::*;

#[test]
fn literal_backslash_n_becomes_hard_break() {
    let spec = CaptionSpec::new("top\\nline").with_bottom_text("a\\nb");
    assert_eq!(spec.top_text, "top\nline");
    assert_eq!(spec.bottom_text.as_deref(), Some("a\nb"));
}

#[test]
fn empty_bottom_text_reads_as_absent() {
    let spec = CaptionSpec::new("top").with_bottom_text("");
    assert_eq!(spec.bottom_text(), None);

    let spec = CaptionSpec::new("top").with_bottom_text("hi");
    assert_eq!(spec.bottom_text(), Some("hi"));
}

#[test]
fn defaults_match_reference_behavior() {
    let spec = CaptionSpec::new("top");
    assert_eq!(spec.top_font_color, Rgb::BLACK);
    assert_eq!(spec.bottom_font_color, Rgb::BLACK);
    assert_eq!(spec.top_background, None);
    assert_eq!(spec.separator, None);
    assert_eq!(spec.bottom_mode, BottomMode::Boxed);
    assert!(!spec.bold);
    assert!(!spec.italic);
}

#[test]
fn deserializes_with_defaults_from_minimal_json() {
    let spec: CaptionSpec = serde_json::from_str(r#"{ "top_text": "hello" }"#).unwrap();
    assert_eq!(spec.top_text, "hello");
    assert_eq!(spec.bottom_text, None);
    assert_eq!(spec.bottom_mode, BottomMode::Boxed);

    let spec: CaptionSpec = serde_json::from_str(
        r#"{ "top_text": "t", "bottom_mode": "overlay", "separator": { "r": 1, "g": 2, "b": 3 } }"#,
    )
    .unwrap();
    assert_eq!(spec.bottom_mode, BottomMode::Overlay);
    assert_eq!(spec.separator, Some(Rgb::new(1, 2, 3)));
}
