use super::*;
use crate::render::surface::{DrawCommand, RecordingSurface};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn rectangle_fills_then_outlines() {
    let mut rect = Shape::rectangle((10.0, 20.0), 30.0, 40.0);
    let mut surface = RecordingSurface::new();
    rect.draw(&mut surface).unwrap();
    assert_eq!(
        surface.commands(),
        &[
            DrawCommand::SetTransform(Affine::IDENTITY),
            DrawCommand::MoveTo(pt(10.0, 20.0)),
            DrawCommand::LineTo(pt(40.0, 20.0)),
            DrawCommand::LineTo(pt(40.0, 60.0)),
            DrawCommand::LineTo(pt(10.0, 60.0)),
            DrawCommand::ClosePath,
            DrawCommand::Fill(Paint::solid(Color::BLACK, 1.0)),
            DrawCommand::Stroke {
                color: Color::WHITE,
                alpha: 1.0,
                width: 1.0,
            },
            DrawCommand::SetTransform(Affine::IDENTITY),
        ]
    );
}

#[test]
fn outline_only_shapes_skip_fill() {
    let mut circle = Shape::circle((5.0, 5.0), 2.0).with_fill(None, 1.0);
    let mut surface = RecordingSurface::new();
    circle.draw(&mut surface).unwrap();
    assert!(!surface
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::Fill(_))));
    assert_eq!(surface.stroke_count(), 1);
    assert!(matches!(
        surface.commands()[1],
        DrawCommand::Arc { radius, .. } if radius == 2.0
    ));
}

#[test]
fn triangle_moves_with_translate() {
    let mut tri = Shape::triangle([pt(0.0, 0.0), pt(4.0, 0.0), pt(0.0, 3.0)]);
    tri.translate(Vec2::new(10.0, 1.0));
    let mut surface = RecordingSurface::new();
    tri.draw(&mut surface).unwrap();
    let cmds = surface.commands();
    assert_eq!(cmds[1], DrawCommand::MoveTo(pt(10.0, 1.0)));
    assert_eq!(cmds[2], DrawCommand::LineTo(pt(14.0, 1.0)));
    assert_eq!(cmds[3], DrawCommand::LineTo(pt(10.0, 4.0)));
    assert_eq!(cmds[4], DrawCommand::LineTo(pt(10.0, 1.0)));
}

#[test]
fn polygon_edges_are_relative_to_start() {
    let mut poly = Shape::polygon((1.0, 1.0))
        .line_to((5.0, 1.0))
        .unwrap()
        .curve_to((6.0, 2.0), (6.0, 4.0), (5.0, 5.0))
        .unwrap();
    poly.translate(Vec2::new(1.0, 0.0));
    let mut surface = RecordingSurface::new();
    poly.draw(&mut surface).unwrap();
    let cmds = surface.commands();
    assert_eq!(cmds[1], DrawCommand::MoveTo(pt(2.0, 1.0)));
    assert_eq!(cmds[2], DrawCommand::LineTo(pt(6.0, 1.0)));
    assert_eq!(
        cmds[3],
        DrawCommand::CurveTo(pt(7.0, 2.0), pt(7.0, 4.0), pt(6.0, 5.0))
    );
    assert_eq!(cmds[4], DrawCommand::ClosePath);
}

#[test]
fn edges_only_attach_to_polygons() {
    let err = Shape::circle((0.0, 0.0), 1.0).line_to((1.0, 1.0)).unwrap_err();
    assert!(matches!(err, MinimalError::Type(_)));
}

#[test]
fn gradient_starts_at_fill_and_follows_position() {
    let mut rect = Shape::rectangle((0.0, 0.0), 10.0, 10.0).with_fill(Some(Color::WHITE), 0.5);
    rect.linear_gradient(pt(0.0, 0.0), pt(10.0, 0.0), Color::BLACK, 1.0, 1.0);
    rect.linear_gradient(pt(99.0, 99.0), pt(0.0, 0.0), Color::WHITE, 1.0, 0.5);
    rect.translate(Vec2::new(5.0, 5.0));

    let g = rect.gradient().unwrap();
    assert_eq!(
        g.kind,
        GradientKind::Linear {
            from: pt(5.0, 5.0),
            to: pt(15.0, 5.0)
        }
    );
    let offsets: Vec<f64> = g.stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    assert_eq!((g.stops[0].color, g.stops[0].alpha), (Color::WHITE, 0.5));

    let mut surface = RecordingSurface::new();
    rect.draw(&mut surface).unwrap();
    assert!(surface
        .commands()
        .iter()
        .any(|c| *c == DrawCommand::Fill(Paint::Gradient(g.clone()))));
}

#[test]
fn text_shows_in_fill_color() {
    let mut text = Shape::text((3.0, 4.0), "hi", 12.0)
        .with_fill(Some(Color::rgb(1.0, 0.0, 0.0)), 0.8)
        .with_font(Some("Serif".into()), FontSlant::Italic, FontWeight::Bold);
    let mut surface = RecordingSurface::new();
    text.draw(&mut surface).unwrap();
    let DrawCommand::Text(run) = &surface.commands()[1] else {
        panic!("expected text, got {:?}", surface.commands()[1]);
    };
    assert_eq!(run.origin, pt(3.0, 4.0));
    assert_eq!(run.text, "hi");
    assert_eq!(run.color, Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(run.alpha, 0.8);
    assert_eq!(run.slant, FontSlant::Italic);
    assert_eq!(run.font.as_deref(), Some("Serif"));
    assert_eq!(surface.stroke_count(), 0);
}

#[test]
fn scale_and_rotation_wrap_the_draw() {
    let mut rect = Shape::rectangle((0.0, 0.0), 1.0, 1.0)
        .with_scale(2.0, 3.0)
        .with_rotation(0.5);
    let mut surface = RecordingSurface::new();
    rect.draw(&mut surface).unwrap();
    let cmds = surface.commands();
    assert_eq!(
        cmds[0],
        DrawCommand::SetTransform(Affine::scale_non_uniform(2.0, 3.0) * Affine::rotate(0.5))
    );
    assert_eq!(cmds[cmds.len() - 1], DrawCommand::SetTransform(Affine::IDENTITY));
}

#[test]
fn tracks_advance_after_each_draw() {
    let mut circle = Shape::circle((0.0, 0.0), 1.0);
    circle
        .animate(Field::Radius, vec![2.0.into(), 3.0.into()], AtEnd::Stop)
        .unwrap();
    circle
        .animate_named("x", vec![10.0.into(), 20.0.into()], "restart")
        .unwrap();

    let mut surface = RecordingSurface::new();
    let mut radii = Vec::new();
    let mut xs = Vec::new();
    for _ in 0..4 {
        circle.draw(&mut surface).unwrap();
        if let ShapeKind::Circle { radius, .. } = circle.kind() {
            radii.push(*radius);
        }
        xs.push(circle.position().x);
    }
    assert_eq!(radii, vec![2.0, 3.0, 3.0, 3.0]);
    assert_eq!(xs, vec![10.0, 20.0, 10.0, 20.0]);
}

#[test]
fn animating_foreign_fields_is_rejected() {
    let mut circle = Shape::circle((0.0, 0.0), 1.0);
    let err = circle
        .animate(Field::Width, vec![1.0.into()], AtEnd::Restart)
        .unwrap_err();
    assert!(matches!(err, MinimalError::InvalidAttribute(_)));
    assert!(err.to_string().contains("'radius'"));
    assert!(!err.to_string().contains("'height'"));

    let err = circle
        .animate(Field::Radius, vec!["big".into()], AtEnd::Restart)
        .unwrap_err();
    assert!(matches!(err, MinimalError::Validation(_)));

    assert!(circle.animate(Field::Radius, Vec::new(), AtEnd::Restart).is_err());
    assert!(circle.animate_named("radius", vec![1.0.into()], "loop").is_err());
}

#[test]
fn labels_are_kept() {
    let shape = Shape::circle((0.0, 0.0), 1.0).with_label("sun");
    assert_eq!(shape.label(), Some("sun"));
}
