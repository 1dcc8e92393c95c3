use super::*;

#[test]
fn defaults_match_product_defaults() {
    let o = RenderOptions::default();
    assert_eq!(o.watermark_opacity, 0.8);
    assert!(o.show_watermark && o.use_logo && o.logo_white);
    assert_eq!(o.watermark_label, DEFAULT_WATERMARK_LABEL);
    assert!(o.validate().is_ok());
}

#[test]
fn header_joins_store_and_location() {
    let mut o = RenderOptions {
        store_name: " 맛집 ".to_string(),
        location: "강남".to_string(),
        ..RenderOptions::default()
    };
    assert_eq!(o.header_text(), "맛집 - 강남");
    o.location = "  ".to_string();
    assert_eq!(o.header_text(), "맛집");
}

#[test]
fn eight_digit_dates_are_formatted() {
    assert_eq!(normalize_date("20250918"), "2025.09.18");
    assert_eq!(normalize_date("2025-09-18"), "2025.09.18");
    assert_eq!(normalize_date("2025.9.18"), "2025.9.18");
    assert_eq!(normalize_date("어제"), "어제");
    assert_eq!(normalize_date(""), "");
}

#[test]
fn content_opacity_is_clamped() {
    let mut o = RenderOptions::default();
    o.watermark_opacity = 0.1;
    assert_eq!(o.content_opacity(), 0.5);
    o.watermark_opacity = 0.9;
    assert_eq!(o.content_opacity(), 0.9);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut o = RenderOptions::default();
    o.watermark_opacity = 1.5;
    assert!(o.validate().is_err());
    o.watermark_opacity = 0.5;
    o.override_body_font_size = Some(0.0);
    assert!(o.validate().is_err());
    o.override_body_font_size = Some(f32::INFINITY);
    assert!(o.validate().is_err());
    o.override_body_font_size = Some(30.0);
    assert!(o.validate().is_ok());
}

#[test]
fn deserializes_partial_json_with_defaults() {
    let o: RenderOptions =
        serde_json::from_str(r#"{ "store_name": "가게", "show_watermark": false }"#).unwrap();
    assert_eq!(o.store_name, "가게");
    assert!(!o.show_watermark);
    assert_eq!(o.watermark_opacity, 0.8);
}
