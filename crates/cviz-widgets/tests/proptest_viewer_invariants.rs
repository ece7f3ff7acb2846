//! Property-based invariant tests for the focused-item viewer and the
//! strip visibility function.
//!
//! 1. next() then previous() restores the selection.
//! 2. next() applied n times returns to the start.
//! 3. Content that fits the viewport shows no navigation at any offset;
//!    overflowing content shows only forward at the start and only
//!    backward at the end.
//! 4. close() twice has the same effect as once.
//! 5. Left from the first item wraps to the last, Right wraps back.
//! 6. Repeated open/close leaves the page unlocked with one restore per cycle.

use cviz_core::event::{Event, KeyCode, KeyEvent};
use cviz_core::page::{Page, PageChannel};
use cviz_widgets::scroll_strip::compute_visibility;
use cviz_widgets::viewer::{FocusedItemViewer, ViewerAction};
use proptest::prelude::*;

fn opened(count: usize, start: usize) -> (Page, FocusedItemViewer) {
    let page = Page::new();
    let mut viewer = FocusedItemViewer::new(page.clone(), count);
    viewer.open(start);
    (page, viewer)
}

proptest! {
    #[test]
    fn next_then_previous_restores(count in 2usize..40, start in 0usize..40) {
        let start = start % count;
        let (_page, mut viewer) = opened(count, start);
        viewer.next();
        viewer.previous();
        prop_assert_eq!(viewer.selected(), Some(start));
    }
}

proptest! {
    #[test]
    fn next_n_times_cycles(count in 1usize..40, start in 0usize..40) {
        let start = start % count;
        let (_page, mut viewer) = opened(count, start);
        for _ in 0..count {
            viewer.next();
        }
        prop_assert_eq!(viewer.selected(), Some(start));
    }
}

proptest! {
    #[test]
    fn fitting_content_hides_both_controls(
        content in 0.0f32..500.0,
        slack in 0.0f32..500.0,
        offset in 0.0f32..500.0,
    ) {
        let visibility = compute_visibility(offset, content, content + slack);
        prop_assert!(!visibility.backward);
        prop_assert!(!visibility.forward);
    }
}

proptest! {
    #[test]
    fn overflow_at_start_only_shows_forward(viewport in 1.0f32..200.0, excess in 2.0f32..200.0) {
        let visibility = compute_visibility(0.0, viewport + excess, viewport);
        prop_assert!(!visibility.backward);
        prop_assert!(visibility.forward);
        let at_end = compute_visibility(excess, viewport + excess, viewport);
        prop_assert!(at_end.backward);
        prop_assert!(!at_end.forward);
    }
}

proptest! {
    #[test]
    fn double_close_is_single_close(count in 1usize..20) {
        let (page, mut viewer) = opened(count, 0);
        viewer.close();
        let restores = page.restore_count();
        viewer.close();
        prop_assert!(!viewer.is_open());
        prop_assert!(!page.is_scroll_locked());
        prop_assert_eq!(page.restore_count(), restores);
        prop_assert!(!page.has_listener(PageChannel::KeyDown));
    }
}

proptest! {
    #[test]
    fn open_close_cycles_balance(count in 1usize..20, cycles in 1u64..15) {
        let page = Page::new();
        let mut viewer = FocusedItemViewer::new(page.clone(), count);
        for i in 0..cycles {
            viewer.open(i as usize);
            prop_assert!(page.is_scroll_locked());
            viewer.close();
            prop_assert!(!page.is_scroll_locked());
        }
        prop_assert_eq!(page.lock_count(), cycles);
        prop_assert_eq!(page.restore_count(), cycles);
    }
}

#[test]
fn arrow_keys_wrap_around() {
    let (_page, mut viewer) = opened(4, 0);
    let left = Event::Key(KeyEvent::new(KeyCode::Left));
    let right = Event::Key(KeyEvent::new(KeyCode::Right));
    assert_eq!(viewer.handle_event(&left, None), Some(ViewerAction::Selected(3)));
    assert_eq!(viewer.handle_event(&right, None), Some(ViewerAction::Selected(0)));
}
