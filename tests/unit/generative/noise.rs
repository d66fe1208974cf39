use super::*;

#[test]
fn same_seed_same_field() {
    let a = SimplexNoise::new(42);
    let b = SimplexNoise::new(42);
    for i in 0..20 {
        let t = i as f64 * 0.37;
        assert_eq!(a.noise3(t, -t, 0.5), b.noise3(t, -t, 0.5));
    }
}

#[test]
fn seeds_change_the_field() {
    let a = SimplexNoise::new(1);
    let b = SimplexNoise::new(2);
    let differs = (0..20).any(|i| {
        let t = i as f64 * 0.53 + 0.1;
        a.noise3(t, t * 0.5, 1.3) != b.noise3(t, t * 0.5, 1.3)
    });
    assert!(differs);
}

#[test]
fn output_is_bounded_and_finite() {
    let n = SimplexNoise::default();
    for i in -50..50 {
        for j in -5..5 {
            let v = n.noise3(i as f64 * 0.173, j as f64 * 0.911, -3.7);
            assert!(v.is_finite());
            assert!(v.abs() <= 1.0, "{v}");
        }
    }
}

#[test]
fn field_is_continuous() {
    let n = SimplexNoise::new(9);
    let a = n.noise3(0.5, 0.25, 0.125);
    let b = n.noise3(0.5 + 1e-6, 0.25, 0.125);
    assert!((a - b).abs() < 1e-3);
}
