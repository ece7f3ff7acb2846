//! Guards handed out by the page outlive nothing: every exit path, including
//! dropping the owner mid-flight, hands the page back.

use cviz_core::page::{Page, PageChannel};

struct Overlay {
    _lock: cviz_core::page::ScrollLock,
    _keys: cviz_core::observe::Subscription,
}

impl Overlay {
    fn open(page: &Page) -> Self {
        Self {
            _lock: page.lock_scroll(),
            _keys: page.listen(PageChannel::KeyDown),
        }
    }
}

#[test]
fn nested_overlays_restore_once() {
    let page = Page::new();
    let outer = Overlay::open(&page);
    let inner = Overlay::open(&page);
    assert_eq!(page.listener_count(PageChannel::KeyDown), 2);
    assert_eq!(page.lock_count(), 1);

    drop(outer);
    assert!(page.is_scroll_locked());
    drop(inner);
    assert!(!page.is_scroll_locked());
    assert!(!page.has_listener(PageChannel::KeyDown));
    assert_eq!(page.restore_count(), 1);
}

#[test]
fn clones_share_one_page() {
    let page = Page::new();
    let view = page.clone();
    let overlay = Overlay::open(&view);
    assert!(page.is_scroll_locked());
    drop(overlay);
    assert_eq!(page.restore_count(), 1);
}

#[test]
fn cancel_releases_only_its_own_listener() {
    let page = Page::new();
    let first = page.listen(PageChannel::KeyDown);
    let second = page.listen(PageChannel::KeyDown);
    first.cancel();
    assert_eq!(page.listener_count(PageChannel::KeyDown), 1);
    drop(second);
    assert!(!page.has_listener(PageChannel::KeyDown));
}
