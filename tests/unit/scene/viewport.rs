use super::*;
use crate::foundation::core::PixelRect;
use crate::render::record::{DrawCommand, RecordingSurface};

fn square(half: f64) -> ViewRect {
    ViewRect::new(-half, half, half, -half)
}

fn lines(vp: &Viewport) -> Vec<&Line> {
    vp.objects()
        .iter()
        .filter_map(|d| match d {
            Drawable::Line(l) => Some(l),
            _ => None,
        })
        .collect()
}

#[test]
fn background_is_first_drawable() {
    let vp = Viewport::new(square(3.0), Some(Rgb8::BEIGE)).unwrap();
    assert_eq!(vp.objects().len(), 1);
    let Drawable::Rectangle(bg) = &vp.objects()[0] else {
        panic!("background must be a rectangle");
    };
    assert_eq!(bg.top_left.resolve().unwrap(), Point::new(-3.0, 3.0));
    assert_eq!(bg.bottom_right.resolve().unwrap(), Point::new(3.0, -3.0));
    assert_eq!(bg.color.resolve().unwrap(), Rgb8::BEIGE);

    let plain = Viewport::new(square(3.0), None).unwrap();
    assert!(plain.objects().is_empty());
}

#[test]
fn degenerate_internal_rect_is_rejected() {
    assert!(Viewport::new(ViewRect::new(0.0, 1.0, 0.0, -1.0), None).is_err());
}

#[test]
fn axis_emits_main_lines_and_both_tick_densities() {
    let mut vp = Viewport::new(square(3.0), None).unwrap();
    vp.add_axis(1.0, 2.0, Rgb8::GRAY).unwrap();

    // 2 axis lines, 16 small ticks (4 per half-axis), 8 large ticks (2 per half-axis)
    let ls = lines(&vp);
    assert_eq!(ls.len(), 26);

    assert_eq!(ls[0].start.resolve().unwrap(), Point::new(0.0, 3.0));
    assert_eq!(ls[0].end.resolve().unwrap(), Point::new(0.0, -3.0));
    assert_eq!(ls[1].start.resolve().unwrap(), Point::new(-3.0, 0.0));
    assert_eq!(ls[1].end.resolve().unwrap(), Point::new(3.0, 0.0));

    // first small tick crosses the x axis at the origin with half-height step/4
    assert_eq!(ls[2].start.resolve().unwrap(), Point::new(0.0, -0.25));
    assert_eq!(ls[2].end.resolve().unwrap(), Point::new(0.0, 0.25));
    // last small x tick toward -3 sits on the edge
    assert_eq!(ls[5].start.resolve().unwrap().x, -3.0);

    // large ticks are taller crossbars
    let large = ls[18];
    assert_eq!(large.start.resolve().unwrap(), Point::new(0.0, -0.5));
    assert_eq!(large.end.resolve().unwrap(), Point::new(0.0, 0.5));
}

#[test]
fn axis_ticks_never_overshoot_edges() {
    let mut vp = Viewport::new(ViewRect::new(-4.0, 1.9, 8.0, -0.5), None).unwrap();
    vp.add_axis(0.5, 1.0, Rgb8::GRAY).unwrap();
    let r = vp.rect();
    for l in lines(&vp).iter().skip(2) {
        let p = l.start.resolve().unwrap();
        let q = l.end.resolve().unwrap();
        if p.x == q.x {
            assert!(p.x >= r.x1 && p.x <= r.x2, "x tick {p:?} outside");
        } else {
            assert!(p.y >= r.y2 && p.y <= r.y1, "y tick {p:?} outside");
        }
    }
}

#[test]
fn axis_rejects_non_positive_steps() {
    let mut vp = Viewport::new(square(1.0), None).unwrap();
    assert!(vp.add_axis(0.0, 1.0, Rgb8::GRAY).is_err());
    assert!(vp.add_axis(0.1, -1.0, Rgb8::GRAY).is_err());
    assert!(vp.objects().is_empty());
}

#[test]
fn axis_rejects_steps_with_too_many_ticks() {
    let mut vp = Viewport::new(square(3.0), None).unwrap();
    assert!(vp.add_axis(1e-18, 1.0, Rgb8::GRAY).is_err());
    assert!(vp.add_axis(0.5, 1e-9, Rgb8::GRAY).is_err());
    assert!(vp.add_axis(1e-4, 1.0, Rgb8::GRAY).is_err());
    assert!(vp.objects().is_empty());
    vp.add_axis(0.001, 1.0, Rgb8::GRAY).unwrap();
}

#[test]
fn visualization_runs_immediately_against_viewport() {
    let mut vp = Viewport::new(square(1.0), None).unwrap();
    vp.add_visualization(|v| {
        v.add_circle(Point::ORIGIN, 0.05, Rgb8::BLACK);
        v.add_text(Point::new(0.5, 0.5), "label", Rgb8::BLACK);
        Ok(())
    })
    .unwrap();
    assert_eq!(vp.objects().len(), 2);
}

#[test]
fn draw_preserves_paint_order() {
    let mut vp = Viewport::new(square(1.0), None).unwrap();
    let red = Rgb8::new(255, 0, 0);
    let green = Rgb8::new(0, 255, 0);
    let blue = Rgb8::new(0, 0, 255);
    vp.add_rectangle(Point::new(-0.5, 0.5), Point::new(0.5, -0.5), red);
    vp.add_circle(Point::ORIGIN, 0.4, green);
    vp.add_rectangle(Point::new(-0.2, 0.2), Point::new(0.2, -0.2), blue);

    let t = ViewTransform::derive(vp.rect(), PixelRect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    let mut s = RecordingSurface::new();
    vp.draw(&mut s, &t).unwrap();

    let colors: Vec<Rgb8> = s
        .commands()
        .iter()
        .map(|c| match c {
            DrawCommand::Rect { color, .. } | DrawCommand::Ellipse { color, .. } => *color,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(colors, vec![red, green, blue]);
}
