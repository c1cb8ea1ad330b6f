use super::*;

fn red() -> Color {
    Color::rgb(255, 0, 0)
}

#[test]
fn new_initializes_every_cell() {
    let f = Frame::new(3, 2, red());
    assert_eq!(f.cells().len(), 6);
    assert!(f.cells().iter().all(|c| *c == red()));
    assert_eq!(f.layout(), ColorLayout::Rgb);
}

#[test]
fn out_of_range_reads_black_and_writes_are_dropped() {
    let mut f = Frame::black(2, 2, ColorLayout::Rgb);
    f.set(-1, 0, red());
    f.set(2, 0, red());
    f.set(0, 5, red());
    assert!(f.cells().iter().all(Color::is_black));
    assert!(f.get(-3, 7).is_black());
}

#[test]
fn set_converts_to_frame_layout() {
    let mut f = Frame::black(1, 1, ColorLayout::Rgbw);
    f.set(0, 0, Color::rgb(255, 255, 255));
    assert_eq!(f.get(0, 0), Color::rgbw(0, 0, 0, 255));
}

#[test]
fn sub_frame_pads_with_black() {
    let mut f = Frame::black(3, 3, ColorLayout::Rgb);
    f.set(2, 2, red());
    let s = f.sub_frame(1, 1, 3, 3);
    assert_eq!((s.width(), s.height()), (3, 3));
    assert_eq!(s.get(1, 1), red());
    assert!(s.get(2, 2).is_black());
    assert!(s.get(0, 0).is_black());
}

#[test]
fn replace_sub_frame_clips_off_canvas_cells() {
    let mut dst = Frame::black(4, 4, ColorLayout::Rgb);
    let sprite = Frame::new(3, 3, red());
    dst.replace_sub_frame(&sprite, -1, 2, BlendMode::Replace)
        .unwrap();
    let lit: Vec<_> = (0..4)
        .flat_map(|y| (0..4).map(move |x| (x, y)))
        .filter(|&(x, y)| dst.get(x, y) == red())
        .collect();
    assert_eq!(lit, vec![(0, 2), (1, 2), (0, 3), (1, 3)]);
}

#[test]
fn replace_sub_frame_blends() {
    let mut dst = Frame::new(1, 1, Color::rgb(100, 100, 100));
    let src = Frame::new(1, 1, Color::rgb(200, 0, 100));
    dst.replace_sub_frame(&src, 0, 0, BlendMode::Average).unwrap();
    assert_eq!(dst.get(0, 0), Color::rgb(150, 50, 100));
    dst.replace_sub_frame(&src, 0, 0, BlendMode::Add).unwrap();
    assert_eq!(dst.get(0, 0), Color::rgb(255, 50, 200));
}

#[test]
fn replace_sub_frame_rejects_layout_mismatch() {
    let mut dst = Frame::black(2, 2, ColorLayout::Rgb);
    let src = Frame::black(1, 1, ColorLayout::Rgbw);
    let err = dst
        .replace_sub_frame(&src, 0, 0, BlendMode::Replace)
        .unwrap_err();
    assert!(matches!(err, LedError::InvalidArgument(_)));
}

#[test]
fn fill_rect_is_clipped() {
    let mut f = Frame::black(3, 3, ColorLayout::Rgb);
    f.fill_rect(1, 1, 10, 10, red());
    assert_eq!(f.cells().iter().filter(|c| **c == red()).count(), 4);
    f.fill(Color::rgb(0, 0, 1));
    assert!(f.cells().iter().all(|c| *c == Color::rgb(0, 0, 1)));
}

#[test]
fn draw_line_covers_endpoints() {
    let mut f = Frame::black(5, 5, ColorLayout::Rgb);
    f.draw_line(0, 0, 4, 4, red());
    for i in 0..5 {
        assert_eq!(f.get(i, i), red());
    }
    assert_eq!(f.cells().iter().filter(|c| **c == red()).count(), 5);
}

#[test]
fn fade_checks_extent_before_blending() {
    let a = Frame::black(2, 2, ColorLayout::Rgb);
    let b = Frame::new(2, 2, Color::rgb(200, 100, 0));
    assert_eq!(a.fade(&b, 0.5).unwrap().get(1, 1), Color::rgb(100, 50, 0));
    assert!(a.fade(&Frame::black(3, 2, ColorLayout::Rgb), 0.5).is_err());
    assert!(a.fade(&Frame::black(2, 2, ColorLayout::Rgbw), 0.5).is_err());
}

#[test]
fn bytes_row_and_column_major() {
    let mut f = Frame::black(2, 2, ColorLayout::Rgb);
    f.set(1, 0, Color::rgb(1, 2, 3));
    f.set(0, 1, Color::rgb(4, 5, 6));

    let row = f.to_bytes(&PixelEncoding::RGB_ROW_MAJOR);
    assert_eq!(row, vec![0, 0, 0, 1, 2, 3, 4, 5, 6, 0, 0, 0]);

    let col = f.to_bytes(&PixelEncoding {
        channels: ChannelOrder::Rgb,
        scan: ScanOrder::ColumnMajor,
    });
    assert_eq!(col, vec![0, 0, 0, 4, 5, 6, 1, 2, 3, 0, 0, 0]);
}

#[test]
fn bytes_wrgb_puts_white_first() {
    let f = Frame::new(1, 1, Color::rgb(255, 128, 128));
    let bytes = f.to_bytes(&PixelEncoding {
        channels: ChannelOrder::Wrgb,
        scan: ScanOrder::RowMajor,
    });
    assert_eq!(bytes, vec![128, 127, 0, 0]);
}

#[test]
fn from_cells_validates_length() {
    assert!(Frame::from_cells(2, 2, vec![red(); 3]).is_err());
    let f = Frame::from_cells(1, 2, vec![red(), Color::rgb(0, 1, 0)]).unwrap();
    assert_eq!(f.get(0, 1), Color::rgb(0, 1, 0));
}

#[test]
fn from_bytes_inverts_column_major_wrgb() {
    let mut f = Frame::black(3, 2, ColorLayout::Rgbw);
    f.set(2, 0, Color::rgbw(150, 0, 205, 50));
    f.set(0, 1, Color::rgbw(1, 2, 3, 0));
    let enc = PixelEncoding {
        channels: ChannelOrder::Wrgb,
        scan: ScanOrder::ColumnMajor,
    };
    let back = Frame::from_bytes(3, 2, &enc, &f.to_bytes(&enc)).unwrap();
    assert_eq!(back, f);
    assert!(Frame::from_bytes(3, 2, &enc, &[0; 5]).is_err());
}
