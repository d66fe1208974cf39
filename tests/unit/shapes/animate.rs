use super::*;

fn numbers(track: &mut Track, n: usize) -> Vec<f64> {
    track
        .take(n)
        .map(|v| match v {
            FieldValue::Number(x) => x,
            other => panic!("unexpected {other:?}"),
        })
        .collect()
}

fn track(at_end: AtEnd) -> Track {
    Track::new(vec![1.0.into(), 2.0.into(), 3.0.into()], at_end)
}

#[test]
fn restart_cycles() {
    assert_eq!(
        numbers(&mut track(AtEnd::Restart), 7),
        vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0]
    );
}

#[test]
fn reverse_ping_pongs_without_repeating_ends() {
    assert_eq!(
        numbers(&mut track(AtEnd::Reverse), 9),
        vec![1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0]
    );
    let mut single = Track::new(vec![4.0.into()], AtEnd::Reverse);
    assert_eq!(numbers(&mut single, 3), vec![4.0, 4.0, 4.0]);
}

#[test]
fn stop_holds_last_value() {
    assert_eq!(
        numbers(&mut track(AtEnd::Stop), 5),
        vec![1.0, 2.0, 3.0, 3.0, 3.0]
    );
}

#[test]
fn at_end_parses_known_names_only() {
    assert_eq!("reverse".parse::<AtEnd>().unwrap(), AtEnd::Reverse);
    let err = "bounce".parse::<AtEnd>().unwrap_err();
    assert!(matches!(err, MinimalError::InvalidArgument(_)));
    assert!(err.to_string().contains("'restart'"));
}

#[test]
fn field_names_round_trip() {
    for field in Field::ALL {
        assert_eq!(field.name().parse::<Field>().unwrap(), field);
    }
    let err = "opacity".parse::<Field>().unwrap_err();
    assert!(matches!(err, MinimalError::InvalidAttribute(_)));
    assert!(err.to_string().contains("'fill_alpha'"));
}

#[test]
fn field_checks_value_type() {
    assert!(Field::X.check(&FieldValue::Number(1.0)).is_ok());
    assert!(Field::X.check(&"1".into()).is_err());
    assert!(Field::FillColor.check(&Color::WHITE.into()).is_ok());
    assert!(Field::FontSlant.check(&"Italic".into()).is_ok());
    assert!(Field::FontSlant.check(&"sideways".into()).is_err());
    assert!(Field::FontWeight.check(&"bold".into()).is_ok());
}
