use super::*;

#[test]
fn clones_share_capture() {
    let handle = InMemorySink::new();
    let mut boxed: Box<dyn DeviceSink> = Box::new(handle.clone());
    boxed.set_realtime_mode().unwrap();
    boxed.push_frame(&[1, 2, 3]).unwrap();
    boxed.push_frame(&[4, 5, 6]).unwrap();

    assert_eq!(handle.realtime_calls(), 1);
    assert_eq!(handle.frame_count(), 2);
    assert_eq!(handle.last_frame(), Some(vec![4, 5, 6]));
    assert_eq!(handle.frames()[0], vec![1, 2, 3]);
}
