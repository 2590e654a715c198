use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(100, 50).unwrap();
    assert_eq!(c.full_rect(), PixelRect::new(0.0, 0.0, 100.0, 50.0));
}

#[test]
fn colors_and_rects_use_array_json_form() {
    let c: Rgb8 = serde_json::from_str("[245, 245, 220]").unwrap();
    assert_eq!(c, Rgb8::BEIGE);
    assert_eq!(serde_json::to_string(&Rgb8::GRAY).unwrap(), "[200,200,200]");

    let r: PixelRect = serde_json::from_str("[0, 100, 500, 600]").unwrap();
    assert_eq!(r.width(), 500.0);
    assert_eq!(r.height(), 500.0);
}

#[test]
fn rgba8_is_opaque() {
    assert_eq!(Rgb8::new(1, 2, 3).to_rgba8(), [1, 2, 3, 255]);
}
