use super::*;
use crate::color::model::{Color, ColorLayout};

fn solid(v: u8) -> Frame {
    Frame::new(1, 1, Color::rgb(v, 0, 0))
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn first_and_last_descend_through_nesting() {
    let mut inner = Sequence::new(ms(10));
    inner.push(solid(2)).push(solid(3));
    let mut outer = Sequence::new(ms(20));
    outer
        .push(Sequence::new(ms(5)))
        .push(inner)
        .push(Sequence::new(ms(5)));

    assert_eq!(outer.first_frame(), Some(&solid(2)));
    assert_eq!(outer.last_frame(), Some(&solid(3)));
    assert_eq!(Sequence::default().first_frame(), None);
}

#[test]
fn frames_resolve_holds_from_nearest_sequence() {
    let mut inner = Sequence::new(ms(10));
    inner.push(solid(2)).push(solid(3).with_hold(ms(99)));
    let mut outer = Sequence::new(ms(20));
    outer.push(solid(1)).push(inner);

    let holds: Vec<_> = outer.frames().into_iter().map(|(_, h)| h).collect();
    assert_eq!(holds, vec![ms(20), ms(10), ms(99)]);
}

#[test]
fn append_keeps_holds_of_the_appended_sequence() {
    let mut a = Sequence::new(ms(20));
    a.push(solid(1));
    let mut b = Sequence::new(ms(7));
    b.push(solid(2));
    a.append(b);
    assert_eq!(a.len(), 2);
    assert_eq!(a.frames()[1].1, ms(7));
}

#[test]
fn scrolling_banner_moves_in_scrolls_and_moves_out() {
    let (a, b, c) = (Color::rgb(1, 0, 0), Color::rgb(2, 0, 0), Color::rgb(3, 0, 0));
    let banner = Frame::from_cells(3, 1, vec![a, b, c]).unwrap();
    let seq = Sequence::scrolling_banner(&banner, 2, 1, ms(50)).unwrap();

    let black = Color::black(ColorLayout::Rgb);
    let rows: Vec<Vec<Color>> = seq
        .frames()
        .into_iter()
        .map(|(f, _)| f.cells().to_vec())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec![black, a],
            vec![a, b],
            vec![b, c],
            vec![c, black],
            vec![black, black],
        ]
    );
    assert!(seq.frames().iter().all(|(_, h)| *h == ms(50)));
}

#[test]
fn scrolling_banner_rejects_empty_target() {
    assert!(Sequence::scrolling_banner(&solid(1), 0, 1, ms(1)).is_err());
}
