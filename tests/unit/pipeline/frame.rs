use super::*;
use crate::render::surface::{DrawCommand, RecordingSurface};
use crate::foundation::core::Point;

fn facing_camera() -> Triangle {
    // normal (0, 0, -1), toward a camera at the origin
    Triangle::new([0.0, 0.0, 5.0], [0.0, 1.0, 5.0], [1.0, 1.0, 5.0])
}

fn facing_away() -> Triangle {
    let [a, b, c] = facing_camera().0;
    Triangle([a, c, b])
}

#[test]
fn frame_never_mutates_template() {
    let mesh = Mesh::unit_cube();
    let before = mesh.triangles().to_vec();
    let placed = mesh
        .frame()
        .rotate(Axis::Z, 0.7)
        .translate(Vec3::new(0.0, 0.0, 8.0), TranslateOp::Add)
        .unwrap();
    assert_ne!(placed.triangles(), before);
    assert_eq!(mesh.triangles(), before.as_slice());
    assert_eq!(mesh.frame().triangles(), before);
}

#[test]
fn rotations_compose_and_invert() {
    let mesh = Mesh::unit_cube();
    let back = mesh
        .frame()
        .rotate(Axis::X, 0.4)
        .rotate(Axis::X, -0.4)
        .triangles();
    for (a, b) in back.iter().zip(mesh.triangles()) {
        for (p, q) in a.0.iter().zip(b.0.iter()) {
            assert!((*p - *q).length() < 1e-9);
        }
    }
}

#[test]
fn translate_ops_apply_componentwise() {
    let mesh = Mesh::new(vec![Triangle::new(
        [1.0, 2.0, 3.0],
        [2.0, 4.0, 6.0],
        [0.0, 0.0, 0.0],
    )]);
    let frame = mesh
        .frame()
        .translate(Vec3::new(1.0, 1.0, 1.0), TranslateOp::Sub)
        .unwrap()
        .translate(Vec3::new(2.0, 2.0, 2.0), TranslateOp::Mul)
        .unwrap()
        .translate(Vec3::new(2.0, 4.0, 8.0), TranslateOp::Div)
        .unwrap();
    assert_eq!(frame.triangles()[0].0[1], Vec3::new(1.0, 1.5, 1.25));
}

#[test]
fn translate_div_by_zero_is_arithmetic_error() {
    let err = Mesh::unit_cube()
        .frame()
        .translate(Vec3::new(1.0, 0.0, 1.0), TranslateOp::Div)
        .unwrap_err();
    assert!(matches!(err, MinimalError::Arithmetic(_)));
}

#[test]
fn translate_op_parses_known_names_only() {
    assert_eq!("mul".parse::<TranslateOp>().unwrap(), TranslateOp::Mul);
    let err = "pow".parse::<TranslateOp>().unwrap_err();
    assert!(matches!(err, MinimalError::InvalidArgument(_)));
    assert!(err.to_string().contains("'add'"));
    assert!(err.to_string().contains("'div'"));
}

#[test]
fn cull_keeps_faces_toward_camera() {
    let mesh = Mesh::new(vec![facing_away(), facing_camera()]);
    let culled = mesh.frame().cull(Vec3::ZERO);
    assert_eq!(culled.visibility_mask(), Some(&[false, true][..]));
    assert_eq!(culled.triangles(), vec![facing_camera()]);
}

#[test]
fn backface_mask_is_idempotent() {
    let tris = Mesh::unit_cube()
        .frame()
        .rotate(Axis::Y, 0.5)
        .rotate(Axis::X, 0.3)
        .translate(Vec3::new(0.0, 0.0, 6.0), TranslateOp::Add)
        .unwrap()
        .triangles();
    let camera = Vec3::ZERO;
    let first = backface_mask(&tris, camera);
    let kept: Vec<Triangle> = tris
        .iter()
        .zip(&first)
        .filter(|(_, v)| **v)
        .map(|(t, _)| *t)
        .collect();
    assert!(!kept.is_empty());
    assert!(backface_mask(&kept, camera).iter().all(|v| *v));
}

#[test]
fn illuminate_is_binary_and_unclamped() {
    let mesh = Mesh::new(vec![facing_camera(), facing_away()]);
    let shading = FlatShading::default();
    let lit = mesh.frame().illuminate(Vec3::new(0.0, 0.0, -3.0), &shading);
    assert_eq!(lit.light_levels(), Some(vec![1.0, -1.0]));
    assert_eq!(lit.shades(), Some(vec![shading.lit, shading.unlit]));
}

#[test]
fn unlit_frames_report_no_shades() {
    let frame = Mesh::unit_cube().frame();
    assert_eq!(frame.shades(), None);
    assert_eq!(frame.light_levels(), None);
    assert_eq!(frame.visibility_mask(), None);
}

#[test]
fn viewport_maps_unit_square_to_pixels() {
    let mesh = Mesh::new(vec![Triangle::new(
        [-1.0, -1.0, 0.25],
        [1.0, 1.0, 0.5],
        [0.0, 0.0, 0.75],
    )]);
    let screen = mesh
        .frame()
        .project(&Mat4::IDENTITY)
        .viewport(Viewport::new(800, 600));
    let [a, b, c] = screen.triangles()[0].0;
    assert_eq!(a, Vec3::new(0.0, 0.0, 0.25));
    assert_eq!(b, Vec3::new(800.0, 600.0, 0.5));
    assert_eq!(c, Vec3::new(400.0, 300.0, 0.75));
}

#[test]
fn sort_is_ascending_and_stable() {
    let at = |z: f64, tag: f64| Triangle::new([tag, 0.0, z], [0.0, tag, z], [0.0, 0.0, z]);
    let mesh = Mesh::new(vec![at(3.0, 1.0), at(1.0, 2.0), at(3.0, 3.0), at(2.0, 4.0)]);
    let sorted = mesh
        .frame()
        .project(&Mat4::IDENTITY)
        .viewport(Viewport::new(2, 2))
        .sort();
    let depths = sorted.depths();
    assert!(depths.windows(2).all(|w| w[0] <= w[1]));
    let tags: Vec<f64> = sorted.triangles().iter().map(|t| t.0[0].x).collect();
    // tag 1 -> x 2, tag 3 -> x 4 after the viewport mapping; equal depths keep input order
    assert_eq!(tags, vec![3.0, 5.0, 2.0, 4.0]);
}

#[test]
fn wireframe_strokes_edges_in_winding_order() {
    let mesh = Mesh::new(vec![Triangle::new(
        [-1.0, -1.0, 0.0],
        [1.0, -1.0, 0.0],
        [-1.0, 1.0, 0.0],
    )]);
    let sorted = mesh
        .frame()
        .project(&Mat4::IDENTITY)
        .viewport(Viewport::new(10, 10))
        .sort();
    let mut surface = RecordingSurface::new();
    let style = RasterStyle::default();
    assert_eq!(sorted.rasterize(&mut surface, &style), 3);

    let p = |x, y| Point::new(x, y);
    let stroke = DrawCommand::Stroke {
        color: style.color,
        alpha: style.alpha,
        width: style.width,
    };
    assert_eq!(
        surface.commands(),
        &[
            DrawCommand::MoveTo(p(0.0, 0.0)),
            DrawCommand::LineTo(p(10.0, 0.0)),
            stroke.clone(),
            DrawCommand::MoveTo(p(10.0, 0.0)),
            DrawCommand::LineTo(p(0.0, 10.0)),
            stroke.clone(),
            DrawCommand::MoveTo(p(0.0, 10.0)),
            DrawCommand::LineTo(p(0.0, 0.0)),
            stroke,
        ]
    );
}

#[test]
fn filled_mode_uses_lit_shade() {
    let mesh = Mesh::new(vec![facing_camera()]).with_mode(RenderMode::Filled);
    let shading = FlatShading::default().with_lit(Color::rgb(1.0, 0.0, 0.0));
    let sorted = mesh
        .frame()
        .cull(Vec3::ZERO)
        .illuminate(Vec3::new(0.0, 0.0, -1.0), &shading)
        .project(&Mat4::IDENTITY)
        .viewport(Viewport::new(100, 100))
        .sort();
    let mut surface = RecordingSurface::new();
    let strokes = sorted.rasterize(&mut surface, &RasterStyle::default());
    assert!(strokes > 0);
    assert_eq!(surface.stroke_count(), strokes);
    assert!(surface.commands().iter().all(|c| match c {
        DrawCommand::Stroke { color, .. } => *color == Color::rgb(1.0, 0.0, 0.0),
        _ => true,
    }));
}
