use super::*;
use crate::color::model::Color;

#[test]
fn combine_matches_mode_semantics() {
    let dst = Color::rgb(200, 100, 0);
    let src = Color::rgb(100, 200, 50);
    assert_eq!(dst.blend(&src, BlendMode::Replace).unwrap(), src);
    assert_eq!(
        dst.blend(&src, BlendMode::Average).unwrap(),
        Color::rgb(150, 150, 25)
    );
    assert_eq!(
        dst.blend(&src, BlendMode::Add).unwrap(),
        Color::rgb(255, 255, 50)
    );
    assert_eq!(
        dst.blend(&src, BlendMode::Subtract).unwrap(),
        Color::rgb(100, 0, 0)
    );
}

#[test]
fn mix_is_weighted_by_factor() {
    let dst = Color::rgb(100, 100, 100);
    let src = Color::rgb(100, 50, 200);
    assert_eq!(
        dst.mix(&src, 0.5, BlendMode::Add).unwrap(),
        Color::rgb(150, 125, 200)
    );
    assert_eq!(
        dst.mix(&src, 0.5, BlendMode::Subtract).unwrap(),
        Color::rgb(50, 75, 0)
    );
    assert_eq!(
        dst.mix(&src, 0.5, BlendMode::Average).unwrap(),
        Color::rgb(100, 75, 150)
    );
    assert_eq!(dst.mix(&src, 0.1, BlendMode::Replace).unwrap(), src);
}

#[test]
fn parses_names_and_aliases() {
    assert_eq!("AVERAGE".parse::<BlendMode>().unwrap(), BlendMode::Average);
    assert_eq!("sub".parse::<BlendMode>().unwrap(), BlendMode::Subtract);
    assert!("multiply".parse::<BlendMode>().is_err());
}
