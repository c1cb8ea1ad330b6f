use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    assert_eq!(Ease::In.apply(-3.0), 0.0);
    assert_eq!(Ease::Out.apply(7.0), 1.0);
}

#[test]
fn parses_names() {
    assert_eq!("in-out".parse::<Ease>().unwrap(), Ease::InOut);
    assert_eq!("Smoothstep".parse::<Ease>().unwrap(), Ease::InOut);
    assert_eq!("ease_out".parse::<Ease>().unwrap(), Ease::Out);
    assert!("bounce".parse::<Ease>().is_err());
}

#[test]
fn symmetric_curves_pass_through_the_midpoint() {
    for ease in [Ease::Linear, Ease::InOut, Ease::Sine] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12, "{ease:?}");
    }
    assert!(Ease::In.apply(0.5) < 0.5);
    assert!(Ease::Out.apply(0.5) > 0.5);
}
