use super::*;

#[test]
fn normal_follows_winding() {
    let ccw = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    assert_eq!(ccw.normal(), Vec3::new(0.0, 0.0, 1.0));

    let [a, b, c] = ccw.0;
    let cw = Triangle([a, c, b]);
    assert_eq!(cw.normal(), Vec3::new(0.0, 0.0, -1.0));
}

#[test]
fn degenerate_normal_is_zero() {
    let flat = Triangle::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]);
    assert_eq!(flat.normal(), Vec3::ZERO);
}

#[test]
fn edge_lengths_ignore_depth() {
    let t = Triangle::new([0.0, 0.0, 5.0], [3.0, 0.0, -2.0], [3.0, 4.0, 9.0]);
    assert_eq!(t.edge_lengths(), [3.0, 4.0, 5.0]);
}

#[test]
fn map_keeps_order_and_mean_z() {
    let t = Triangle::new([0.0, 0.0, 1.0], [1.0, 0.0, 2.0], [0.0, 1.0, 3.0]);
    let moved = t.map(|v| v + Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(moved.0[0].z, 2.0);
    assert_eq!(moved.0[2].z, 4.0);
    assert!((moved.mean_z() - 3.0).abs() < 1e-12);
}
