use std::cell::RefCell;
use std::rc::Rc;

use framestat_core::error::FramestatError;
use framestat_core::roi::{PointerEvent, Roi, RoiSelector, SelectionRect, SelectionState};

fn drag(selector: &mut RoiSelector, from: (u32, u32), to: (u32, u32)) {
    selector.handle(PointerEvent::Down {
        x: from.0,
        y: from.1,
    });
    selector.handle(PointerEvent::Move {
        x: to.0,
        y: to.1,
        button_held: true,
    });
    selector.handle(PointerEvent::Up { x: to.0, y: to.1 });
}

#[test]
fn test_drag_normalizes_corners() {
    let mut selector = RoiSelector::new();
    drag(&mut selector, (10, 10), (50, 5));
    assert!(selector.selection_made());

    let roi = selector.confirm().unwrap();
    assert_eq!(roi, Roi::new(10, 5, 50, 10).unwrap());
    assert_eq!(roi.width(), 40);
    assert_eq!(roi.height(), 5);
    assert_eq!(selector.confirmed(), Some(roi));
}

#[test]
fn test_live_rect_follows_pointer() {
    let mut selector = RoiSelector::new();
    selector.handle(PointerEvent::Down { x: 20, y: 20 });
    let rect = selector
        .handle(PointerEvent::Move {
            x: 5,
            y: 30,
            button_held: true,
        })
        .unwrap();
    assert_eq!(
        rect,
        SelectionRect {
            min_x: 5,
            min_y: 20,
            max_x: 20,
            max_y: 30
        }
    );
    assert!(!selector.selection_made());
}

#[test]
fn test_release_detected_by_move_without_button() {
    let mut selector = RoiSelector::new();
    selector.handle(PointerEvent::Down { x: 0, y: 0 });
    selector.handle(PointerEvent::Move {
        x: 8,
        y: 6,
        button_held: true,
    });
    selector.handle(PointerEvent::Move {
        x: 100,
        y: 100,
        button_held: false,
    });
    assert!(selector.selection_made());
    assert_eq!(selector.confirm().unwrap(), Roi::new(0, 0, 8, 6).unwrap());
}

#[test]
fn test_click_without_drag_is_rejected() {
    let mut selector = RoiSelector::new();
    selector.handle(PointerEvent::Down { x: 7, y: 7 });
    selector.handle(PointerEvent::Up { x: 7, y: 7 });

    let err = selector.confirm().unwrap_err();
    assert!(matches!(err, FramestatError::InvalidRoi(_)));
    assert_eq!(selector.state(), SelectionState::Idle);
    assert_eq!(selector.confirmed(), None);
}

#[test]
fn test_confirm_without_selection_fails() {
    let mut selector = RoiSelector::new();
    assert!(selector.confirm().is_err());
}

#[test]
fn test_cancel_discards_pending_selection() {
    let mut selector = RoiSelector::new();
    drag(&mut selector, (1, 1), (9, 9));
    selector.cancel();
    assert_eq!(selector.state(), SelectionState::Idle);
    assert!(selector.live_rect().is_none());
}

#[test]
fn test_cancel_keeps_confirmed_roi_until_reset() {
    let mut selector = RoiSelector::new();
    drag(&mut selector, (1, 1), (9, 9));
    selector.confirm().unwrap();

    selector.cancel();
    assert!(selector.confirmed().is_some());

    selector.reset();
    assert!(selector.confirmed().is_none());
}

#[test]
fn test_new_press_restarts_selection() {
    let mut selector = RoiSelector::new();
    drag(&mut selector, (1, 1), (9, 9));
    selector.confirm().unwrap();

    selector.handle(PointerEvent::Down { x: 3, y: 3 });
    assert!(matches!(selector.state(), SelectionState::Dragging { .. }));
    assert!(selector.confirmed().is_none());
}

#[test]
fn test_pointer_clamped_to_bounds() {
    let mut selector = RoiSelector::with_bounds(32, 24);
    drag(&mut selector, (10, 10), (500, 500));
    assert_eq!(selector.confirm().unwrap(), Roi::new(10, 10, 32, 24).unwrap());
}

#[test]
fn test_subscribers_receive_confirmed_roi() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut selector = RoiSelector::new();
    let sink = Rc::clone(&seen);
    selector.subscribe(move |roi| sink.borrow_mut().push(roi));

    drag(&mut selector, (2, 4), (12, 14));
    selector.confirm().unwrap();
    drag(&mut selector, (0, 0), (0, 5));
    let _ = selector.confirm();

    assert_eq!(*seen.borrow(), vec![Roi::new(2, 4, 12, 14).unwrap()]);
}

#[test]
fn test_roi_parse() {
    let roi: Roi = "10, 5,50,10".parse().unwrap();
    assert_eq!(roi, Roi::new(10, 5, 50, 10).unwrap());
    assert_eq!(roi.to_string(), "10,5,50,10");
}

#[test]
fn test_roi_parse_rejects_bad_input() {
    assert!("1.5,0,10,10".parse::<Roi>().is_err());
    assert!("-1,0,10,10".parse::<Roi>().is_err());
    assert!("0,0,10".parse::<Roi>().is_err());
    assert!("10,0,5,10".parse::<Roi>().is_err());
}

#[test]
fn test_roi_check_within() {
    let roi = Roi::new(0, 0, 16, 16).unwrap();
    assert!(roi.check_within(16, 16).is_ok());
    assert!(roi.check_within(15, 16).is_err());
    assert!(roi.contains(15, 15));
    assert!(!roi.contains(16, 0));
}
