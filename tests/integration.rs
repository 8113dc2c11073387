//! Integration tests for toastkit.
//!
//! These tests exercise the public API from outside the crate, verifying that
//! notifications, widgets, the scheduler and the testing helpers work
//! together.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pretty_assertions::assert_eq;

use toastkit::app::{App, AppConfig};
use toastkit::dom::markup::contains_element;
use toastkit::locale::{CookieLocale, Locale};
use toastkit::notification::{Corner, NotificationProps};
use toastkit::testing::{node_to_string, Pilot};
use toastkit::widgets::KvPair;

fn counter() -> (Rc<Cell<u32>>, impl Fn(&App) + 'static) {
    let hits = Rc::new(Cell::new(0));
    let inner = Rc::clone(&hits);
    (hits, move |_: &App| inner.set(inner.get() + 1))
}

fn attached_roots(app: &App) -> usize {
    app.document().query_by_class("notification").len()
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_default_notification_is_shown_bottom_right() {
    let pilot = Pilot::new();
    let toast = pilot.notify(NotificationProps::new().content("Saved"));
    pilot.advance(10.0);

    let app = pilot.app();
    assert_eq!(toast.identity(), 1);
    assert_eq!(app.identities(), vec![1]);
    let doc = app.document();
    let root = toast.root();
    assert_eq!(doc.style(root, "display"), Some("flex"));
    assert_eq!(doc.style(root, "bottom"), Some("25px"));
    assert_eq!(doc.style(root, "right"), Some("25px"));
    assert!(toast.progress_bar().is_none());
    assert!(toast.confirm_button().is_none());
    assert!(toast.cancel_button().is_none());
    assert!(doc.query_by_class("notification-actions").is_empty());
    assert!(doc.query_by_class("notification-progress").is_empty());
}

#[test]
fn test_destroy_all_clears_document_and_identities() {
    let pilot = Pilot::new();
    pilot.notify(NotificationProps::new());
    pilot.notify(NotificationProps::new().progress(true));
    pilot.app().destroy_all();

    assert_eq!(pilot.app().live_count(), 0);
    assert!(pilot.app().document().children(pilot.app().document().body()).is_empty());
    assert_eq!(pilot.html(), "");
    // Stale countdown frames of the destroyed toast must not touch anything.
    pilot.run_for(100.0, 16.0);

    let next = pilot.notify(NotificationProps::new());
    assert_eq!(next.identity(), 1);
    assert_eq!(pilot.app().live_count(), 1);
}

#[test]
fn test_progress_countdown_removes_once() {
    let pilot = Pilot::new();
    let toast = pilot.notify(NotificationProps::new().progress(true).duration_ms(1000));
    let bar = toast.progress_bar().expect("progress bar");

    pilot.run_for(500.0, 16.0);
    assert!(toast.is_live());
    assert_eq!(pilot.app().document().style(bar, "width"), Some("50%"));

    pilot.run_for(500.0, 16.0);
    assert!(!toast.is_live());
    assert_eq!(toast.fraction(), 1.0);
    assert!(!pilot.app().document().contains(bar));
    assert_eq!(pilot.app().live_count(), 0);

    pilot.run_for(200.0, 16.0);
    assert!(!pilot.app().has_pending_work());
    assert_eq!(toast.fraction(), 1.0);
}

#[test]
fn test_confirm_toggle_preserves_fraction() {
    let (confirmed, on_confirm) = counter();
    let pilot = Pilot::new();
    let toast = pilot.notify(
        NotificationProps::new()
            .confirm("Go")
            .on_confirm(on_confirm)
            .progress(true)
            .duration_ms(1000),
    );
    let button = toast.confirm_button().expect("confirm button");
    let label = |pilot: &Pilot| pilot.app().document().text_content(button);

    assert!(pilot.click(button));
    assert!(!toast.is_paused());
    assert!(pilot.app().has_pending_work());
    assert_eq!(label(&pilot), "pause");

    pilot.advance(300.0);
    assert_eq!(toast.fraction(), 0.3);

    pilot.click(button);
    assert!(toast.is_paused());
    assert_eq!(label(&pilot), "Go");
    // The pending frame samples once more, then the session stops.
    pilot.advance(100.0);
    let paused_at = toast.fraction();
    assert_eq!(paused_at, 0.4);
    pilot.advance(5000.0);
    assert_eq!(toast.fraction(), paused_at);
    assert!(!pilot.app().has_pending_work());

    pilot.click(button);
    assert_eq!(label(&pilot), "pause");
    pilot.advance(100.0);
    assert_eq!(toast.fraction(), 0.5);
    assert!(toast.is_live());

    pilot.run_for(600.0, 50.0);
    assert!(!toast.is_live());
    assert_eq!(confirmed.get(), 1);
}

#[test]
fn test_kv_editor_values() {
    let app = App::new_headless();
    let editor = app.kv_pairs("headers");
    editor.set_data(&[KvPair::new("a", "1")]);
    assert_eq!(editor.get_values(), vec![KvPair::new("a", "1")]);

    editor.add_pair("b", "");
    assert_eq!(editor.rows().len(), 2);
    assert_eq!(editor.get_values(), vec![KvPair::new("a", "1")]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn test_identities_strictly_increase() {
    let app = App::new_headless();
    let ids: Vec<u64> = (0..20)
        .map(|_| app.notify(NotificationProps::new()).identity())
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids.first(), Some(&1));
}

#[test]
fn test_registry_matches_attached_roots() {
    let (_, on_cancel) = counter();
    let on_cancel = Rc::new(on_cancel);
    let app = App::new_headless();
    let mut handles = Vec::new();
    for i in 0..6 {
        let cb = Rc::clone(&on_cancel);
        let props = NotificationProps::new()
            .cancel("x")
            .on_cancel(move |app: &App| cb(app))
            .progress(i % 2 == 0)
            .duration_ms(100 * (i + 1));
        handles.push(app.notify(props));
        assert_eq!(app.live_count(), attached_roots(&app));
    }

    app.click(handles[1].cancel_button().expect("cancel"));
    assert_eq!(app.live_count(), attached_roots(&app));
    handles[3].remove();
    handles[3].remove();
    assert_eq!(app.live_count(), attached_roots(&app));
    app.advance(150.0);
    assert_eq!(app.live_count(), attached_roots(&app));
    app.advance(1000.0);
    app.advance(16.0);
    assert_eq!(app.live_count(), attached_roots(&app));
    app.destroy_all();
    assert_eq!(app.live_count(), attached_roots(&app));
    app.destroy_all();
    assert_eq!(app.live_count(), 0);
    assert_eq!(attached_roots(&app), 0);
}

#[test]
fn test_progress_is_monotonic_and_bounded() {
    let pilot = Pilot::new();
    let toast = pilot.notify(NotificationProps::new().progress(true).duration_ms(1000));
    let mut samples = Vec::new();
    let mut elapsed = 0.0;
    while toast.is_live() && elapsed < 2000.0 {
        pilot.advance(16.0);
        elapsed += 16.0;
        samples.push(toast.fraction());
    }
    assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    assert!(samples.iter().all(|f| (0.0..=1.0).contains(f)));
    assert_eq!(samples.last(), Some(&1.0));
    assert!(elapsed <= 1000.0 + 16.0);
}

#[test]
fn test_pause_continuity_counts_unpaused_time_only() {
    let pilot = Pilot::new();
    let toast = pilot.notify(NotificationProps::new().progress(true).duration_ms(1000));

    pilot.run_for(200.0, 20.0);
    toast.hold();
    pilot.advance(20.0);
    assert_eq!(toast.fraction(), 0.22);
    pilot.advance(10_000.0);
    assert_eq!(toast.fraction(), 0.22);

    toast.release();
    pilot.run_for(280.0, 20.0);
    assert_eq!(toast.fraction(), 0.5);
    pilot.run_for(500.0, 20.0);
    assert!(!toast.is_live());
}

#[test]
fn test_completion_fires_once() {
    let (confirmed, on_confirm) = counter();
    let pilot = Pilot::new();
    let toast = pilot.notify(
        NotificationProps::new()
            .confirm("Go")
            .on_confirm(on_confirm)
            .duration_ms(100),
    );
    pilot.click(toast.confirm_button().expect("confirm"));
    pilot.run_for(1000.0, 16.0);
    assert_eq!(confirmed.get(), 1);
    assert!(!toast.is_live());
    // Clicking the detached button does nothing.
    assert!(!pilot.click(toast.confirm_button().expect("confirm")));
    assert_eq!(confirmed.get(), 1);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn test_title_markup_and_cancel_callback_order() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&order);
    let pilot = Pilot::new();
    let toast = pilot.notify(
        NotificationProps::new()
            .position(Corner::TopLeft)
            .title("<i>Build</i>")
            .no_content()
            .cancel("Dismiss")
            .on_cancel(move |app: &App| log.borrow_mut().push(app.live_count())),
    );
    {
        let doc = pilot.app().document();
        let title = toast.nodes().title.expect("title");
        insta::assert_snapshot!(node_to_string(&doc, title), @r###"
        <div class="notification-title">
          <i>Build</i>
          <span class="notification-close">X</span>
        </div>
        "###);
        assert_eq!(doc.style(toast.root(), "left"), Some("-100%"));
    }
    pilot.click_class("notification-cancel");
    // The callback runs while the toast is still registered.
    assert_eq!(*order.borrow(), vec![1]);
    assert_eq!(pilot.app().live_count(), 0);
}

#[test]
fn test_unknown_corner_is_left_unplaced() {
    let pilot = Pilot::new();
    let toast = pilot.notify(NotificationProps::new().position_name("middle"));
    pilot.advance(10.0);
    let doc = pilot.app().document();
    for edge in ["top", "right", "bottom", "left"] {
        assert_eq!(doc.style(toast.root(), edge), None, "{edge}");
    }
    assert_eq!(doc.style(toast.root(), "display"), Some("flex"));
}

#[test]
fn test_chinese_locale_from_cookie() {
    let app = App::new(AppConfig::new(), &CookieLocale::new("session=1; locale=zh"));
    assert_eq!(app.locale(), Locale::ZH);
    let (_, on_confirm) = counter();
    let toast = app.notify(
        NotificationProps::new()
            .no_title()
            .content("Saved")
            .localized_content("已保存")
            .confirm("Go")
            .localized_confirm("开始")
            .on_confirm(on_confirm),
    );
    let button = toast.confirm_button().expect("confirm");
    assert_eq!(app.document().text_content(toast.nodes().content.expect("content")), "已保存");
    app.click(button);
    assert_eq!(app.document().text_content(button), "暂停");
    app.click(button);
    assert_eq!(app.document().text_content(button), "开始");
}

#[test]
fn test_markup_classification() {
    assert!(contains_element("<b>bold</b>"));
    assert!(contains_element("text <br> more"));
    assert!(!contains_element("5 < 6 and 7 > 3"));
    assert!(!contains_element("<!-- note -->"));
    assert!(!contains_element("plain"));
    assert!(!contains_element("</b>"));
}

#[test]
fn test_info_bubble_mounts_link() {
    let app = App::new_headless();
    let bubble = app.info_bubble("https://example.com");
    let doc = app.document();
    assert_eq!(doc.attribute(bubble.link(), "href"), Some("https://example.com"));
    assert_eq!(doc.query_by_class("info-bubble"), vec![bubble.root()]);
}

// ---------------------------------------------------------------------------
// Async driver
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_run_returns_once_idle() {
    let app = App::new(AppConfig::new().with_fps(250), &CookieLocale::default());
    let toast = app.notify(NotificationProps::new().progress(true).duration_ms(30));
    app.run().await;
    assert!(!toast.is_live());
    assert!(!app.has_pending_work());
}

#[test]
fn test_run_with_tokio_test_block_on() {
    let app = App::new_headless();
    app.notify(NotificationProps::new());
    tokio_test::block_on(app.run());
    assert_eq!(app.live_count(), 1);
    let doc = app.document();
    let root = doc.query_by_class("notification")[0];
    assert_eq!(doc.style(root, "display"), Some("flex"));
}
