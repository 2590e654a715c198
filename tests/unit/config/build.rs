use super::*;
use crate::render::record::{DrawCommand, RecordingSurface};

fn base() -> SceneDef {
    SceneDef {
        canvas: Canvas {
            width: 100,
            height: 100,
        },
        background: Rgb8::WHITE,
        viewports: vec![ViewportDef {
            id: "main".to_owned(),
            rect: ViewRect::new(-1.0, 1.0, 1.0, -1.0),
            target: PixelRect::new(0.0, 0.0, 100.0, 100.0),
            background: None,
            axis: None,
        }],
        machines: vec![MachineDef::Pendulum(PendulumDef {
            pivot: Point::ORIGIN,
            length: Some(1.0),
            period: None,
            angle_deg: 0.0,
            visualizations: vec![VisualizationDef {
                viewport: "main".to_owned(),
                style: VisualizationStyle::Basic,
            }],
        })],
        animation: AnimationDef {
            step: 0.1,
            duration: 1.0,
            blur: None,
            fps: None,
        },
    }
}

fn pendulum_mut(def: &mut SceneDef) -> &mut PendulumDef {
    match &mut def.machines[0] {
        MachineDef::Pendulum(p) => p,
        MachineDef::Timer(_) => panic!("expected pendulum"),
    }
}

#[test]
fn builds_world_matching_definition() {
    let mut scene = base().build().unwrap();
    assert_eq!(scene.world.machine_count(), 1);
    assert_eq!(scene.world.viewports().len(), 1);
    assert_eq!(scene.blur.factor(), 1);
    assert_eq!(scene.duration, 1.0);

    scene.world.set_time(0.0).unwrap();
    let mut s = RecordingSurface::new();
    scene.world.draw(&mut s).unwrap();
    let DrawCommand::Line { from, to, .. } = s.commands()[0] else {
        panic!("expected rod");
    };
    assert_eq!((from.x, from.y), (50.0, 50.0));
    assert_eq!((to.x, to.y), (100.0, 50.0));
}

#[test]
fn period_sets_arm_length() {
    let mut def = base();
    let p = pendulum_mut(&mut def);
    p.length = None;
    p.period = Some(2.0);
    let r = p.arm_length().unwrap();
    assert!((crate::foundation::math::pendulum_period(r) - 2.0).abs() < 1e-12);
    def.validate().unwrap();
}

#[test]
fn pendulum_needs_exactly_one_size() {
    let mut def = base();
    pendulum_mut(&mut def).period = Some(2.0);
    assert!(def.validate().is_err());

    let mut def = base();
    pendulum_mut(&mut def).length = None;
    assert!(def.validate().is_err());

    let mut def = base();
    pendulum_mut(&mut def).length = Some(0.0);
    let err = def.validate().unwrap_err();
    assert!(err.to_string().contains("machine 0 (pendulum)"));
}

#[test]
fn unknown_and_duplicate_viewports_are_rejected() {
    let mut def = base();
    pendulum_mut(&mut def).visualizations[0].viewport = "nope".to_owned();
    assert!(def.build().is_err());

    let mut def = base();
    let dup = def.viewports[0].clone();
    def.viewports.push(dup);
    let err = def.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate viewport id 'main'"));
}

#[test]
fn velocity_style_is_pendulum_only() {
    let mut def = base();
    def.machines.push(MachineDef::Timer(TimerDef {
        position: Point::ORIGIN,
        visualizations: vec![VisualizationDef {
            viewport: "main".to_owned(),
            style: VisualizationStyle::Velocity,
        }],
    }));
    assert!(def.validate().is_err());
}

#[test]
fn degenerate_rectangles_and_canvas_are_rejected() {
    let mut def = base();
    def.viewports[0].target = PixelRect::new(0.0, 0.0, 0.0, 100.0);
    let err = def.validate().unwrap_err();
    assert!(err.to_string().contains("viewport 'main'"));

    let mut def = base();
    def.canvas.width = 0;
    assert!(def.validate().is_err());
}

#[test]
fn animation_rules() {
    let mut def = base();
    def.animation.blur = Some(2);
    def.animation.fps = Some(40.0);
    assert!(def.validate().is_err());

    def.animation.blur = None;
    assert_eq!(def.animation.motion_blur().unwrap().factor(), 4);

    def.animation.fps = None;
    def.animation.duration = -1.0;
    assert!(def.validate().is_err());

    def.animation.duration = 1.0;
    def.animation.step = 0.0;
    assert!(def.validate().is_err());
}

#[test]
fn tiny_axis_step_fails_validation() {
    let mut def = base();
    def.viewports[0].axis = Some(AxisDef {
        small_step: 1e-18,
        large_step: 1.0,
        color: Rgb8::GRAY,
    });
    let err = def.validate().unwrap_err();
    assert!(err.to_string().contains("viewport 'main'"), "{err}");
    assert!(def.build().is_err());
}

#[test]
fn oversized_frame_sequence_is_rejected() {
    let mut def = base();
    def.animation.step = 1e-10;
    def.animation.duration = 1e10;
    let err = def.validate().unwrap_err();
    assert!(err.to_string().contains("frames"), "{err}");
    assert!(def.build().is_err());
}

#[test]
fn demo_scene_builds() {
    let def = SceneDef::pendulum_demo();
    def.validate().unwrap();
    let mut scene = def.build().unwrap();
    assert_eq!(scene.world.machine_count(), 3);
    assert_eq!(scene.world.viewports().len(), 2);
    assert_eq!(scene.blur.factor(), 2);
    assert_eq!(scene.blur.frame_count(scene.duration).unwrap(), 81);

    scene.world.set_time(0.5).unwrap();
    let mut s = RecordingSurface::new();
    scene.world.draw(&mut s).unwrap();
    let texts: Vec<&str> = s
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[2], "0.50 s");
}

#[test]
fn scene_render_streams_every_frame() {
    let mut def = base();
    def.animation.duration = 0.3;
    let mut scene = def.build().unwrap();
    let mut sink = crate::encode::sink::InMemorySink::new();
    let stats = scene.render(&mut sink).unwrap();
    assert_eq!(stats.frames, 4);
    assert_eq!(sink.frames().len(), 4);
    assert!((scene.world.time() - 0.3).abs() < 1e-12);
}
