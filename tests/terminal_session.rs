//! End-to-end: terminal mouse reports through the decoder into bound widgets.
//!
//! Run with: cargo test --test terminal_session -- --nocapture

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use spark_tui_pointer::{
    bind, route, Buttons, MouseEvent, MouseMsg, MouseOptions, MouseOutcome, MouseParser,
    MouseResult, PointerTarget, RawPointerEvent, WidgetGeometry,
};

type Log = Rc<RefCell<Vec<MouseEvent>>>;

fn recorder(log: &Log) -> impl FnMut(MouseMsg, &MouseEvent) -> MouseResult {
    let log = log.clone();
    move |_msg: MouseMsg, event: &MouseEvent| {
        log.borrow_mut().push(*event);
        MouseResult::handled()
    }
}

/// X10 encoding: each value offset by 32.
fn x10(cb: u8, x: u8, y: u8) -> [u8; 6] {
    [0x1b, b'[', b'M', cb + 32, x + 32, y + 32]
}

fn decode(parser: &mut MouseParser, bytes: &[u8], now: Instant) -> RawPointerEvent {
    match parser.parse(bytes, now) {
        Ok(decoded) => decoded.event,
        Err(err) => panic!("decode failed: {err}"),
    }
}

#[test_log::test]
fn test_x10_click_is_reconciled() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut widget = bind(
        WidgetGeometry::new(10, 5, 20, 3),
        MouseOptions::default(),
        recorder(&log),
    );
    let mut parser = MouseParser::new();
    let now = Instant::now();

    // Right press at (15, 7), then an X10 release that names no button.
    let press = decode(&mut parser, &x10(2, 15, 7), now);
    let release = decode(&mut parser, &x10(3, 15, 7), now);
    assert!(release.buttons.is_empty());

    assert_eq!(widget.translate(&press), MouseOutcome::Normal);
    assert_eq!(widget.translate(&release), MouseOutcome::Normal);

    let log = log.borrow();
    let msgs: Vec<MouseMsg> = log.iter().map(|e| e.msg).collect();
    assert_eq!(msgs, vec![MouseMsg::Down, MouseMsg::Up, MouseMsg::Click]);
    assert!(log.iter().all(|e| e.buttons == Buttons::RIGHT));
    assert!(log.iter().all(|e| (e.x, e.y) == (4, 1)));
}

#[test_log::test]
fn test_sgr_drag_session() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut canvas = bind(
        WidgetGeometry::new(0, 0, 10, 10),
        MouseOptions::default(),
        recorder(&log),
    );
    let mut parser = MouseParser::new();
    let now = Instant::now();

    let reports: [&[u8]; 5] = [
        b"\x1b[<35;3;3M", // hover
        b"\x1b[<0;3;3M",  // press
        b"\x1b[<32;6;4M", // drag
        b"\x1b[<32;40;4M", // drag off the canvas
        b"\x1b[<0;40;4m", // release off the canvas
    ];
    for bytes in reports {
        let raw = decode(&mut parser, bytes, now);
        assert!(canvas.translate(&raw).is_handled());
    }

    let msgs: Vec<MouseMsg> = log.borrow().iter().map(|e| e.msg).collect();
    assert_eq!(
        msgs,
        vec![
            MouseMsg::Move,
            MouseMsg::Down,
            MouseMsg::Drag,
            MouseMsg::Drag,
            MouseMsg::Up,
        ]
    );
    assert!(!canvas.is_captured());

    // Nothing captured any more: further drags are dropped.
    let late = decode(&mut parser, b"\x1b[<32;5;5M", now);
    assert_eq!(canvas.translate(&late), MouseOutcome::Unhandled);
}

#[test_log::test]
fn test_double_click_reaches_widget() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut list = bind(
        WidgetGeometry::new(0, 0, 30, 10),
        MouseOptions::default(),
        recorder(&log),
    );
    let mut parser = MouseParser::new();
    let t0 = Instant::now();
    let later = t0 + Duration::from_millis(120);

    for (bytes, at) in [
        (&b"\x1b[<0;2;2M"[..], t0),
        (&b"\x1b[<0;2;2m"[..], t0),
        (&b"\x1b[<0;2;2M"[..], later),
        (&b"\x1b[<0;2;2m"[..], later),
    ] {
        let raw = decode(&mut parser, bytes, at);
        list.translate(&raw);
    }

    let log = log.borrow();
    let downs: Vec<&MouseEvent> = log.iter().filter(|e| e.msg == MouseMsg::Down).collect();
    assert_eq!(downs.len(), 2);
    assert!(!downs[0].is_double());
    assert!(downs[1].is_double());
}

#[test_log::test]
fn test_wheel_routes_to_widget_under_pointer() {
    let top_log: Log = Rc::new(RefCell::new(Vec::new()));
    let bottom_log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut top = bind(
        WidgetGeometry::new(0, 0, 80, 12),
        MouseOptions::default(),
        recorder(&top_log),
    );
    let mut bottom = bind(
        WidgetGeometry::new(0, 12, 80, 12),
        MouseOptions::default(),
        recorder(&bottom_log),
    );
    let mut parser = MouseParser::new();

    let wheel = decode(&mut parser, b"\x1b[<65;10;20M", Instant::now());
    let outcome = route(
        &mut [&mut top as &mut dyn PointerTarget, &mut bottom],
        &wheel,
    );

    assert_eq!(outcome, MouseOutcome::Normal);
    assert!(top_log.borrow().is_empty());
    assert_eq!(bottom_log.borrow()[0].msg, MouseMsg::ScrollDown);
    assert!(!bottom.is_captured());
}
