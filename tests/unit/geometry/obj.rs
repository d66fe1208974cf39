use super::*;

const QUAD: &str = "\
# a unit quad
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vn 0 0 1
usemtl none
f 1/1/1 2/1/1 3/1/1 4/1/1
";

#[test]
fn quad_is_fan_triangulated() {
    let tris = parse_obj(QUAD).unwrap();
    assert_eq!(tris.len(), 2);
    assert_eq!(tris[0].0[0], Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(tris[0].0[2], Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(tris[1].0[1], Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(tris[1].0[2], Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn relative_indices_count_back_from_the_last_vertex() {
    let tris = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
    assert_eq!(
        tris,
        vec![Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])]
    );
}

#[test]
fn out_of_range_index_is_rejected() {
    let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2 9\n").unwrap_err();
    assert!(matches!(err, MinimalError::Validation(_)));
}

#[test]
fn bad_coordinates_are_rejected() {
    assert!(matches!(
        parse_obj("v 0 zero 0\n"),
        Err(MinimalError::Validation(_))
    ));
}

#[test]
fn load_obj_reads_files_and_reports_missing_ones() {
    let path = std::env::temp_dir().join(format!("minimal_quad_{}.obj", std::process::id()));
    std::fs::write(&path, QUAD).unwrap();
    assert_eq!(load_obj(&path).unwrap().len(), 2);
    std::fs::remove_file(&path).unwrap();

    let err = load_obj("/definitely/not/here.obj").unwrap_err();
    assert!(err.to_string().contains("read obj"));
}
