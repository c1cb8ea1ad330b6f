use super::*;

#[test]
fn token_clones_share_state() {
    let a = CancelToken::new();
    let b = a.clone();
    assert!(!b.is_cancelled());
    a.cancel();
    assert!(b.is_cancelled());
}

#[test]
fn sliced_sleep_returns_early_on_cancel() {
    let token = CancelToken::new();
    assert!(token.sleep_unless_cancelled(Duration::from_millis(5), Duration::from_millis(1)));

    token.cancel();
    let start = Instant::now();
    assert!(!token.sleep_unless_cancelled(Duration::from_secs(10), Duration::from_millis(1)));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn handle_stops_and_joins() {
    let handle = PlaybackHandle::spawn("test-worker", |token| {
        let mut spins = 0u32;
        while !token.is_cancelled() {
            spins += 1;
            std::thread::sleep(Duration::from_millis(1));
        }
        Ok(spins)
    })
    .unwrap();

    handle.stop();
    assert!(handle.token().is_cancelled());
    let _spins = handle.join().unwrap();
}

#[test]
fn join_surfaces_task_errors() {
    let handle = PlaybackHandle::<()>::spawn("failing", |_| {
        Err(LedError::invalid_argument("nope"))
    })
    .unwrap();
    assert!(matches!(handle.join(), Err(LedError::InvalidArgument(_))));
}
