use super::*;
use crate::foundation::core::{PixelPoint, PixelRect};
use crate::foundation::error::KinescopeError;
use crate::render::record::{DrawCommand, RecordingSurface};
use crate::scene::transform::ViewRect;

fn unit_square_transform() -> ViewTransform {
    // internal [-1, 1]² (y up) on a 100x100 canvas
    ViewTransform::derive(
        ViewRect::new(-1.0, 1.0, 1.0, -1.0),
        PixelRect::new(0.0, 0.0, 100.0, 100.0),
    )
    .unwrap()
}

#[test]
fn circle_maps_center_and_scales_radius_per_axis() {
    let t = ViewTransform::derive(
        ViewRect::new(-1.0, 1.0, 1.0, -1.0),
        PixelRect::new(0.0, 0.0, 200.0, 100.0),
    )
    .unwrap();
    let mut s = RecordingSurface::new();
    Circle::new(Point::new(0.0, 0.0), 0.1, Rgb8::BLACK)
        .draw(&mut s, &t)
        .unwrap();

    assert_eq!(
        s.commands(),
        &[DrawCommand::Ellipse {
            bounds: Rect::new(90.0, 45.0, 110.0, 55.0),
            color: Rgb8::BLACK,
        }]
    );
}

#[test]
fn line_width_rounds_up_to_whole_pixels() {
    let t = unit_square_transform();
    let mut s = RecordingSurface::new();
    Line::new(Point::new(-1.0, 0.0), Point::new(1.0, 0.0), 0.01, Rgb8::GRAY)
        .draw(&mut s, &t)
        .unwrap();
    Line::new(Point::new(0.0, -1.0), Point::new(0.0, 1.0), 0.0, Rgb8::GRAY)
        .draw(&mut s, &t)
        .unwrap();

    let cmds = s.into_commands();
    assert_eq!(
        cmds[0],
        DrawCommand::Line {
            from: PixelPoint::new(0.0, 50.0),
            to: PixelPoint::new(100.0, 50.0),
            width: 1,
            color: Rgb8::GRAY,
        }
    );
    let DrawCommand::Line { width, from, to, .. } = cmds[1] else {
        panic!("expected a line");
    };
    assert_eq!(width, 0);
    assert_eq!(from, PixelPoint::new(50.0, 100.0));
    assert_eq!(to, PixelPoint::new(50.0, 0.0));
}

#[test]
fn rectangle_bounds_are_normalized_after_flip() {
    let t = unit_square_transform();
    let mut s = RecordingSurface::new();
    Rectangle::new(Point::new(-0.1, 0.1), Point::new(0.1, 0.0), Rgb8::BLACK)
        .draw(&mut s, &t)
        .unwrap();

    let [DrawCommand::Rect { bounds, .. }] = s.commands() else {
        panic!("expected a single rect");
    };
    assert!((bounds.x0 - 45.0).abs() < 1e-9);
    assert!((bounds.y0 - 45.0).abs() < 1e-9);
    assert!((bounds.x1 - 55.0).abs() < 1e-9);
    assert!((bounds.y1 - 50.0).abs() < 1e-9);
}

#[test]
fn text_resolves_deferred_string() {
    let t = unit_square_transform();
    let mut s = RecordingSurface::new();
    let text = Text::new(
        Point::new(-1.0, 1.0),
        Field::resolver(|| Ok(format!("{:.2} s", 1.5))),
        Rgb8::new(0, 0, 170),
    );
    Drawable::from(text).draw(&mut s, &t).unwrap();

    assert_eq!(
        s.commands(),
        &[DrawCommand::Text {
            anchor: PixelPoint::new(0.0, 0.0),
            text: "1.50 s".to_string(),
            color: Rgb8::new(0, 0, 170),
        }]
    );
}

#[test]
fn failing_field_aborts_draw_without_surface_call() {
    let t = unit_square_transform();
    let mut s = RecordingSurface::new();
    let c = Circle::new(
        Field::resolver(|| Err(KinescopeError::evaluation("no bob"))),
        0.05,
        Rgb8::BLACK,
    );
    let err = c.draw(&mut s, &t).unwrap_err();
    assert!(err.to_string().contains("no bob"));
    assert!(s.commands().is_empty());
}
