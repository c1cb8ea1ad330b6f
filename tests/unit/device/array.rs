use super::*;
use crate::color::model::ColorLayout;
use crate::device::origin::Origin;
use crate::device::sink::InMemorySink;

fn spec(addr: &str, w: u32, h: u32, origin: Origin) -> DeviceSpec {
    DeviceSpec::new(addr, w, h, origin)
}

fn boxed(sink: &InMemorySink) -> Box<dyn DeviceSink> {
    Box::new(sink.clone())
}

#[test]
fn extent_is_sum_of_columns_and_rows() {
    let s = InMemorySink::new();
    let array = Array::from_columns(vec![
        vec![
            (spec("a", 3, 2, Origin::TopLeft), boxed(&s)),
            (spec("b", 3, 4, Origin::BottomRight), boxed(&s)),
        ],
        vec![
            (spec("c", 5, 2, Origin::TopRight), boxed(&s)),
            (spec("d", 5, 4, Origin::BottomLeft), boxed(&s)),
        ],
    ])
    .unwrap();
    assert_eq!((array.width(), array.height()), (8, 6));
    assert_eq!(array.device_count(), 4);

    assert_eq!(array.locate(0, 0), Some((0, 0, 0)));
    assert_eq!(array.locate(0, 2), Some((1, 2, 3)));
    assert_eq!(array.locate(3, 0), Some((2, 4, 0)));
    assert_eq!(array.locate(7, 5), Some((3, 4, 0)));
    assert_eq!(array.locate(8, 0), None);
}

#[test]
fn device_frame_follows_origin() {
    let s = InMemorySink::new();
    let array = Array::from_columns(vec![
        vec![(spec("left", 2, 2, Origin::TopLeft), boxed(&s))],
        vec![(spec("right", 2, 2, Origin::BottomRight), boxed(&s))],
    ])
    .unwrap();

    let mut frame = array.blank_frame(ColorLayout::Rgb);
    let marker = Color::rgb(9, 9, 9);
    frame.set(2, 0, marker);

    let left = array.device_frame(&frame, 0).unwrap();
    assert!(left.cells().iter().all(Color::is_black));

    let right = array.device_frame(&frame, 1).unwrap();
    assert_eq!(right.get(1, 1), marker);
    assert!(array.device_frame(&frame, 2).is_err());
}

#[test]
fn realtime_mode_is_set_once_per_device() {
    let s = InMemorySink::new();
    let array = Array::single(spec("a", 1, 1, Origin::TopLeft), boxed(&s)).unwrap();
    array.show_color(Color::rgb(1, 2, 3)).unwrap().into_result().unwrap();
    array.show_color(Color::rgb(4, 5, 6)).unwrap().into_result().unwrap();
    assert_eq!(s.realtime_calls(), 1);
    assert_eq!(s.frames(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
}

#[test]
fn mismatched_frame_extent_is_rejected() {
    let s = InMemorySink::new();
    let array = Array::single(spec("a", 2, 2, Origin::TopLeft), boxed(&s)).unwrap();
    let err = array
        .show_realtime_frame(&Frame::black(3, 2, ColorLayout::Rgb))
        .unwrap_err();
    assert!(matches!(err, LedError::InvalidArgument(_)));
    assert_eq!(s.frame_count(), 0);
}

#[test]
fn enter_realtime_is_eager() {
    let s = InMemorySink::new();
    let array = Array::single(spec("a", 1, 1, Origin::TopLeft), boxed(&s)).unwrap();
    assert!(array.enter_realtime().is_complete());
    array.show_color(Color::rgb(0, 0, 0)).unwrap();
    assert_eq!(s.realtime_calls(), 1);
}
