use super::*;
use crate::foundation::core::{PixelPoint, Rect};
use crate::geometry::point::Point;
use crate::geometry::vector::Vector;
use crate::machine::pendulum::Pendulum;
use crate::machine::timer::Timer;
use crate::render::record::{DrawCommand, RecordingSurface};
use crate::scene::field::Field;
use crate::scene::transform::ViewRect;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn close_rect(a: Rect, b: Rect) -> bool {
    close(a.x0, b.x0) && close(a.y0, b.y0) && close(a.x1, b.x1) && close(a.y1, b.y1)
}

fn unit_viewport() -> Viewport {
    Viewport::new(ViewRect::new(-1.0, 1.0, 1.0, -1.0), None).unwrap()
}

#[test]
fn zero_canvas_is_rejected() {
    assert!(World::new(0, 10, Rgb8::WHITE).is_err());
    assert!(World::new(10, 0, Rgb8::WHITE).is_err());
}

#[test]
fn degenerate_target_is_rejected() {
    let mut w = World::new(10, 10, Rgb8::WHITE).unwrap();
    let err = w
        .add_viewport(unit_viewport(), PixelRect::new(5.0, 0.0, 5.0, 10.0))
        .unwrap_err();
    assert!(matches!(err, KinescopeError::Validation(_)));
    assert!(w.viewports().is_empty());
}

#[test]
fn set_time_reaches_every_machine() {
    let mut w = World::new(10, 10, Rgb8::WHITE).unwrap();
    let p = w.add_machine(Pendulum::new(Point::ORIGIN, Vector::new(1.0, 0.0)).unwrap());
    let t = w.add_machine(Timer::new(Point::ORIGIN));
    assert_eq!(w.machine_count(), 2);

    w.set_time(1.25).unwrap();
    assert_eq!(w.time(), 1.25);
    assert_eq!(p.borrow().time(), 1.25);
    assert_eq!(t.borrow().display_text(), "1.25 s");

    assert!(w.set_time(f64::NAN).is_err());
    assert_eq!(w.time(), 1.25);
}

#[test]
fn set_time_reports_a_borrowed_machine() {
    let mut w = World::new(10, 10, Rgb8::WHITE).unwrap();
    let t = w.add_machine(Timer::new(Point::ORIGIN));
    let _guard = t.borrow();
    assert!(matches!(
        w.set_time(1.0),
        Err(KinescopeError::Evaluation(_))
    ));
}

#[test]
fn end_to_end_pendulum_on_full_canvas() {
    let mut w = World::new(100, 100, Rgb8::WHITE).unwrap();
    let p = w.add_machine(Pendulum::new(Point::ORIGIN, Vector::new(1.0, 0.0)).unwrap());
    let mut vp = unit_viewport();
    vp.add_visualization(Pendulum::visualize_basic(&p)).unwrap();
    w.add_viewport(vp, w.canvas().full_rect()).unwrap();
    w.set_time(0.0).unwrap();

    let mut s = RecordingSurface::new();
    w.draw(&mut s).unwrap();
    let cmds = s.commands();
    assert_eq!(cmds.len(), 4);

    // rod from the pivot pixel to the bob pixel
    assert_eq!(
        cmds[0],
        DrawCommand::Line {
            from: PixelPoint::new(50.0, 50.0),
            to: PixelPoint::new(100.0, 50.0),
            width: 1,
            color: Rgb8::BLACK,
        }
    );
    let DrawCommand::Rect { bounds, .. } = cmds[1] else {
        panic!("expected pivot block, got {:?}", cmds[1]);
    };
    assert!(close_rect(bounds, Rect::new(45.0, 45.0, 55.0, 50.0)));
    let DrawCommand::Ellipse { bounds, .. } = cmds[2] else {
        panic!("expected bob, got {:?}", cmds[2]);
    };
    assert!(close_rect(bounds, Rect::new(97.5, 47.5, 102.5, 52.5)));
    let DrawCommand::Text { anchor, text, .. } = &cmds[3] else {
        panic!("expected label, got {:?}", cmds[3]);
    };
    assert!(close(anchor.x, 75.0) && close(anchor.y, 60.0));
    assert_eq!(text, "(1.000, 0.000)");

    // a quarter period later the bob hangs straight below the pivot
    let quarter = p.borrow().period() / 4.0;
    w.set_time(quarter).unwrap();
    let mut s = RecordingSurface::new();
    w.draw(&mut s).unwrap();
    let DrawCommand::Line { to, .. } = s.commands()[0] else {
        panic!("expected rod");
    };
    assert!(close(to.x, 50.0) && close(to.y, 100.0));
}

#[test]
fn get_frame_paints_background_then_viewports_in_order() {
    let red = Rgb8::new(255, 0, 0);
    let blue = Rgb8::new(0, 0, 255);
    let mut w = World::new(40, 20, Rgb8::WHITE).unwrap();
    w.add_viewport(
        Viewport::new(ViewRect::new(0.0, 1.0, 1.0, 0.0), Some(red)).unwrap(),
        PixelRect::new(0.0, 0.0, 30.0, 20.0),
    )
    .unwrap();
    w.add_viewport(
        Viewport::new(ViewRect::new(0.0, 1.0, 1.0, 0.0), Some(blue)).unwrap(),
        PixelRect::new(20.0, 0.0, 40.0, 20.0),
    )
    .unwrap();

    let frame = w.get_frame().unwrap();
    assert_eq!(frame.rgb(5, 10), Some(red));
    assert_eq!(frame.rgb(25, 10), Some(blue));
    assert_eq!(frame.rgb(35, 10), Some(blue));
}

#[test]
fn get_frame_propagates_field_errors() {
    let mut w = World::new(10, 10, Rgb8::WHITE).unwrap();
    let mut vp = unit_viewport();
    vp.add_circle(
        Field::resolver(|| Err(KinescopeError::evaluation("boom"))),
        0.1,
        Rgb8::BLACK,
    );
    w.add_viewport(vp, w.canvas().full_rect()).unwrap();

    let err = w.get_frame().unwrap_err();
    assert!(matches!(err, KinescopeError::Evaluation(ref m) if m == "boom"));
}
