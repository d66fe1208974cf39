use kurbo::ParamCurve;

use super::*;
use crate::render::paint::Paint;

#[test]
fn recording_keeps_call_order() {
    let mut s = RecordingSurface::new();
    s.move_to(Point::new(0.0, 0.0));
    s.line_to(Point::new(1.0, 0.0));
    s.close_path();
    s.fill(&Paint::solid(Color::WHITE, 0.5));
    s.stroke(Color::BLACK, 1.0, 2.0);
    assert_eq!(
        s.commands(),
        &[
            DrawCommand::MoveTo(Point::new(0.0, 0.0)),
            DrawCommand::LineTo(Point::new(1.0, 0.0)),
            DrawCommand::ClosePath,
            DrawCommand::Fill(Paint::solid(Color::WHITE, 0.5)),
            DrawCommand::Stroke {
                color: Color::BLACK,
                alpha: 1.0,
                width: 2.0,
            },
        ]
    );
    assert_eq!(s.stroke_count(), 1);
}

#[test]
fn take_empties_the_recording() {
    let mut s = RecordingSurface::new();
    s.move_to(Point::ORIGIN);
    let taken = s.take();
    assert_eq!(taken.len(), 1);
    assert!(s.commands().is_empty());
}

#[test]
fn images_are_recorded_by_placement() {
    let img = Image::from_rgba(2, 3, vec![0; 24]).unwrap().at((4.0, 5.0));
    let mut s = RecordingSurface::new();
    s.draw_image(&img).unwrap();
    assert_eq!(
        s.commands()[0],
        DrawCommand::Image {
            position: Point::new(4.0, 5.0),
            width: 2,
            height: 3,
        }
    );
}

#[test]
fn arc_on_empty_path_moves_to_start() {
    let mut path = BezPath::new();
    append_arc(&mut path, Point::new(10.0, 10.0), 5.0, 0.0, std::f64::consts::PI, 0.01);
    let els = path.elements();
    assert_eq!(els[0], kurbo::PathEl::MoveTo(Point::new(15.0, 10.0)));
    let end = path.segments().last().unwrap().end();
    assert!((end.x - 5.0).abs() < 1e-9 && (end.y - 10.0).abs() < 1e-9);
}

#[test]
fn arc_after_a_point_joins_with_a_line() {
    let mut path = BezPath::new();
    path.move_to(Point::ORIGIN);
    append_arc(&mut path, Point::ORIGIN, 1.0, 0.0, 1.0, 0.01);
    assert_eq!(path.elements()[1], kurbo::PathEl::LineTo(Point::new(1.0, 0.0)));
}

#[test]
fn arc_end_below_start_wraps_forward() {
    use kurbo::Shape as _;
    let mut path = BezPath::new();
    let half = std::f64::consts::PI;
    // pi .. -pi/2 becomes pi .. 3pi/2: the lower-left quadrant.
    append_arc(&mut path, Point::ORIGIN, 1.0, half, -half / 2.0, 0.001);
    let bounds = path.bounding_box();
    assert!(bounds.x0 < -0.99 && bounds.y0 < -0.99);
    assert!(bounds.x1 < 0.01 && bounds.y1 < 0.01);
}
