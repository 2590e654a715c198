use super::*;

#[test]
fn style_rejects_empty_font_and_bad_size() {
    assert!(TextStyle::new(Vec::new(), 12.0).is_err());
    assert!(TextStyle::new(vec![0u8; 4], 0.0).is_err());
    assert!(TextStyle::new(vec![0u8; 4], f32::NAN).is_err());
    assert!(TextStyle::new(vec![0u8; 4], 12.0).is_ok());
}

#[test]
fn style_debug_hides_font_bytes() {
    let s = TextStyle::new(vec![1u8, 2, 3], 9.0).unwrap();
    let dbg = format!("{s:?}");
    assert!(dbg.contains("3 bytes"));
    assert!(!dbg.contains("[1, 2, 3]"));
}

#[test]
fn missing_font_file_is_a_validation_error() {
    let err = TextStyle::from_path("/definitely/not/here.ttf", 12.0).unwrap_err();
    assert!(matches!(err, KinescopeError::Validation(_)));
}

#[test]
fn brush_is_opaque() {
    let b = TextBrush::from(Rgb8::new(1, 2, 3));
    assert_eq!((b.r, b.g, b.b, b.a), (1, 2, 3, 255));
}

#[test]
fn garbage_font_bytes_register_no_family() {
    let style = TextStyle::new(vec![0u8; 64], 12.0).unwrap();
    assert!(TextLayoutEngine::new(&style).is_err());
}
