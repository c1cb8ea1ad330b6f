use super::*;

#[test]
fn corner_formulas() {
    let (w, h) = (4, 3);
    assert_eq!(Origin::TopLeft.to_local(1, 0, w, h), (1, 0));
    assert_eq!(Origin::TopRight.to_local(1, 0, w, h), (2, 0));
    assert_eq!(Origin::BottomLeft.to_local(1, 0, w, h), (1, 2));
    assert_eq!(Origin::BottomRight.to_local(1, 0, w, h), (2, 2));
}

#[test]
fn forward_then_inverse_is_identity() {
    for origin in Origin::ALL {
        for (w, h) in [(1, 1), (4, 3), (10, 21)] {
            let mut seen = std::collections::HashSet::new();
            for y in 0..h {
                for x in 0..w {
                    let (lx, ly) = origin.to_local(x, y, w, h);
                    assert!(lx < w && ly < h);
                    assert!(seen.insert((lx, ly)), "{origin:?} not injective");
                    assert_eq!(origin.to_logical(lx, ly, w, h), (x, y));
                }
            }
        }
    }
}

#[test]
fn parses_config_spellings() {
    assert_eq!("bottom-left".parse::<Origin>().unwrap(), Origin::BottomLeft);
    assert_eq!("TOP_RIGHT".parse::<Origin>().unwrap(), Origin::TopRight);
    assert!("middle".parse::<Origin>().is_err());
}
