use super::*;

#[test]
fn unit_cube_has_twelve_triangles() {
    let cube = Mesh::unit_cube();
    assert_eq!(cube.len(), 12);
    assert_eq!(cube.mode(), RenderMode::Wireframe);
    assert!(!cube.is_empty());
    assert!(Mesh::default().is_empty());
}

#[test]
fn centered_moves_bounds_to_origin() {
    let cube = Mesh::unit_cube().with_mode(RenderMode::Filled).centered();
    assert_eq!(cube.mode(), RenderMode::Filled);
    for v in cube.triangles().iter().flat_map(|t| t.vertices()) {
        for c in v.to_array() {
            assert_eq!(c.abs(), 0.5);
        }
    }
    assert_eq!(cube.triangles()[0].vertices()[0], Vec3::new(-0.5, -0.5, -0.5));
    assert!(Mesh::default().centered().is_empty());
}

#[test]
fn obj_text_builds_a_mesh() {
    let mesh = Mesh::from_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
    assert_eq!(mesh.len(), 1);
}
