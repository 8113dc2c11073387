//! A single toast: rendering, buttons, removal.
//!
//! ```text
//! div.notification
//!  ├── div.notification-title
//!  │    ├── div.notification-title-text | raw markup
//!  │    └── span.notification-close
//!  ├── div.notification-content
//!  ├── div.notification-actions
//!  │    ├── button.notification-btn.notification-confirm
//!  │    └── button.notification-btn.notification-cancel
//!  └── div.notification-progress
//! ```
//!
//! Every block is optional. Without a title the close control sits directly
//! under the root.

use std::cell::RefCell;
use std::rc::Rc;

use super::config::{Callback, NotificationConfig};
use super::position::Corner;
use super::progress::ProgressAnimator;
use super::registry::LiveInstance;
use crate::app::App;
use crate::dom::markup::contains_element;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Document;
use crate::geometry::Placement;
use crate::locale::Locale;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Mutable state shared by a notification's handle, its click handlers and
/// its progress animators.
pub(crate) struct InstanceState {
    pub identity: u64,
    pub root: NodeId,
    pub duration_ms: f64,
    pub progress_bar: Option<NodeId>,
    pub confirm_button: Option<NodeId>,
    /// Confirm label as displayed in the current locale.
    pub confirm_label: String,
    pub pause_label: String,
    /// `true` while no countdown is advancing.
    pub paused: bool,
    /// Set when [`NotificationHandle::hold`] paused a running countdown.
    pub held: bool,
    /// Elapsed countdown time carried across pauses.
    pub carry_ms: f64,
    /// Whether an animator is still rescheduling itself.
    pub session_live: bool,
    /// Last fraction sampled by a tick.
    pub fraction: f64,
    pub on_confirm: Option<Callback>,
    pub on_cancel: Option<Callback>,
    /// Completion callback of the most recent countdown session.
    pub countdown: Option<Callback>,
}

impl InstanceState {
    pub fn live_instance(&self) -> LiveInstance {
        LiveInstance {
            identity: self.identity,
            root: self.root,
        }
    }
}

/// Node ids of a rendered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceNodes {
    pub root: NodeId,
    pub title: Option<NodeId>,
    pub close: Option<NodeId>,
    pub content: Option<NodeId>,
    pub actions: Option<NodeId>,
    pub confirm: Option<NodeId>,
    pub cancel: Option<NodeId>,
    pub progress: Option<NodeId>,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Write every edge of `placement` into `node`'s inline style.
pub fn apply_placement(doc: &mut Document, node: NodeId, placement: &Placement) {
    for (edge, length) in placement.iter() {
        doc.set_style(node, edge.property(), length.to_string());
    }
}

/// Fill `block` with `text`, as markup when it contains an element.
/// Plain text goes into a fresh `text_class` child when one is given.
fn fill(doc: &mut Document, block: NodeId, text: &str, text_class: Option<&str>) {
    if contains_element(text) {
        doc.set_inner_markup(block, text);
        return;
    }
    match text_class {
        Some(class) => {
            let inner = doc.create_element(NodeData::element("div").with_class(class));
            doc.set_text(inner, text);
            doc.append_child(block, inner);
        }
        None => {
            doc.set_text(block, text);
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn display<'a>(locale: Locale, value: &'a str, localized: &'a Option<String>) -> &'a str {
    locale.pick(value, localized.as_deref())
}

fn build_nodes(doc: &mut Document, root: NodeId, config: &NotificationConfig, locale: Locale) -> InstanceNodes {
    let mut nodes = InstanceNodes {
        root,
        title: None,
        close: None,
        content: None,
        actions: None,
        confirm: None,
        cancel: None,
        progress: None,
    };

    if let Some(title) = non_empty(&config.title) {
        let block = doc.create_element(NodeData::element("div").with_class("notification-title"));
        fill(
            doc,
            block,
            display(locale, title, &config.localized_title),
            Some("notification-title-text"),
        );
        doc.append_child(root, block);
        nodes.title = Some(block);
    }

    if config.close_enabled {
        let close = doc.create_element(NodeData::element("span").with_class("notification-close"));
        doc.set_text(close, "X");
        doc.append_child(nodes.title.unwrap_or(root), close);
        nodes.close = Some(close);
    }

    if let Some(content) = non_empty(&config.content) {
        let block = doc.create_element(NodeData::element("div").with_class("notification-content"));
        fill(doc, block, display(locale, content, &config.localized_content), None);
        doc.append_child(root, block);
        nodes.content = Some(block);
    }

    let confirm = non_empty(&config.confirm_label);
    let cancel = non_empty(&config.cancel_label);
    if confirm.is_some() || cancel.is_some() {
        let row = doc.create_element(NodeData::element("div").with_class("notification-actions"));
        if let Some(label) = confirm {
            let button = doc.create_element(
                NodeData::element("button").with_classes(["notification-btn", "notification-confirm"]),
            );
            doc.set_text(button, display(locale, label, &config.localized_confirm_label));
            doc.append_child(row, button);
            nodes.confirm = Some(button);
        }
        if let Some(label) = cancel {
            let button = doc.create_element(
                NodeData::element("button").with_classes(["notification-btn", "notification-cancel"]),
            );
            doc.set_text(button, display(locale, label, &config.localized_cancel_label));
            doc.append_child(row, button);
            nodes.cancel = Some(button);
        }
        doc.append_child(root, row);
        nodes.actions = Some(row);
    }

    if config.progress_enabled {
        let bar = doc.create_element(
            NodeData::element("div")
                .with_class("notification-progress")
                .with_style("width", "100%"),
        );
        doc.append_child(root, bar);
        nodes.progress = Some(bar);
    }

    nodes
}

/// Construct, render and register a notification.
pub(crate) fn create(app: &App, config: NotificationConfig) -> NotificationHandle {
    let (instance, nodes, confirm_label, pause_label) = {
        let mut guard = app.state_mut();
        let shared = &mut *guard;
        let locale = shared.locale;

        let identity = shared.registry.next_identity();
        let root = shared
            .document
            .create_element(NodeData::element("div").with_class("notification"));
        let instance = LiveInstance { identity, root };
        shared.registry.register(instance);

        let doc = &mut shared.document;
        let nodes = build_nodes(doc, root, &config, locale);

        if let Some(corner) = config.position {
            apply_placement(doc, root, &shared.policy.offscreen(corner));
        }
        doc.append_child(doc.body(), root);

        let confirm_label = non_empty(&config.confirm_label)
            .map(|label| display(locale, label, &config.localized_confirm_label).to_owned())
            .unwrap_or_default();
        let pause_label = locale
            .pick(
                &shared.config.pause_label,
                Some(shared.config.localized_pause_label.as_str()),
            )
            .to_owned();
        (instance, nodes, confirm_label, pause_label)
    };

    let state = Rc::new(RefCell::new(InstanceState {
        identity: instance.identity,
        root: instance.root,
        duration_ms: f64::from(config.duration_ms),
        progress_bar: nodes.progress,
        confirm_button: nodes.confirm,
        confirm_label,
        pause_label,
        paused: true,
        held: false,
        carry_ms: 0.0,
        session_live: false,
        fraction: 0.0,
        on_confirm: config.on_confirm.clone(),
        on_cancel: config.on_cancel.clone(),
        countdown: None,
    }));

    install_handlers(app, &nodes, &state);

    let delay = app.config().entrance_delay_ms;
    let corner = config.position;
    app.set_timeout(
        delay,
        Box::new(move |app: &App| show(app, instance.root, corner)),
    );

    if config.progress_enabled && config.on_confirm.is_none() {
        state.borrow_mut().paused = false;
        let dismiss: Callback = Rc::new(|_: &App| {});
        ProgressAnimator::start(app, Rc::clone(&state), dismiss);
    }

    NotificationHandle {
        app: app.clone(),
        state,
        nodes,
    }
}

fn install_handlers(app: &App, nodes: &InstanceNodes, state: &Rc<RefCell<InstanceState>>) {
    let mut shared = app.state_mut();
    let doc = &mut shared.document;
    if let Some(close) = nodes.close {
        doc.on_click(close, Rc::new(|app: &App| app.destroy_all()));
    }
    if let Some(button) = nodes.cancel {
        let state = Rc::clone(state);
        doc.on_click(button, Rc::new(move |app: &App| cancel(app, &state)));
    }
    if let Some(button) = nodes.confirm {
        let state = Rc::clone(state);
        doc.on_click(button, Rc::new(move |app: &App| toggle_confirm(app, &state)));
    }
}

/// The deferred enter transition. A no-op once the root is gone.
fn show(app: &App, root: NodeId, corner: Option<Corner>) {
    let mut guard = app.state_mut();
    let shared = &mut *guard;
    if !shared.document.set_style(root, "display", "flex") {
        return;
    }
    if let Some(corner) = corner {
        apply_placement(&mut shared.document, root, &shared.policy.onscreen(corner));
    }
}

// ---------------------------------------------------------------------------
// Button behavior
// ---------------------------------------------------------------------------

fn cancel(app: &App, state: &Rc<RefCell<InstanceState>>) {
    let (on_cancel, instance) = {
        let st = state.borrow();
        (st.on_cancel.clone(), st.live_instance())
    };
    let Some(on_cancel) = on_cancel else {
        return;
    };
    on_cancel(app);
    app.remove_instance(instance);
}

/// First click starts (or resumes) the countdown and shows the pause label;
/// the next click pauses it and restores the confirm label.
///
/// A held countdown counts as running: clicking pause turns the hold into a
/// real pause, and a later [`release`](NotificationHandle::release) does
/// not resume it.
fn toggle_confirm(app: &App, state: &Rc<RefCell<InstanceState>>) {
    let Some(on_confirm) = state.borrow().on_confirm.clone() else {
        return;
    };
    let (start, button, label) = {
        let mut st = state.borrow_mut();
        if st.held {
            st.held = false;
        } else {
            st.paused = !st.paused;
        }
        if st.paused {
            (false, st.confirm_button, st.confirm_label.clone())
        } else {
            (!st.session_live, st.confirm_button, st.pause_label.clone())
        }
    };
    if let Some(button) = button {
        app.state_mut().document.set_text(button, &label);
    }
    if start {
        ProgressAnimator::start(app, Rc::clone(state), on_confirm);
    }
}

// ---------------------------------------------------------------------------
// NotificationHandle
// ---------------------------------------------------------------------------

/// Caller-side handle to a notification.
///
/// Dropping the handle does not dismiss the toast.
#[derive(Clone)]
pub struct NotificationHandle {
    app: App,
    state: Rc<RefCell<InstanceState>>,
    nodes: InstanceNodes,
}

impl NotificationHandle {
    /// Registry identity.
    pub fn identity(&self) -> u64 {
        self.state.borrow().identity
    }

    /// Root node.
    pub fn root(&self) -> NodeId {
        self.nodes.root
    }

    /// All rendered node ids.
    pub fn nodes(&self) -> InstanceNodes {
        self.nodes
    }

    /// Confirm button, if rendered.
    pub fn confirm_button(&self) -> Option<NodeId> {
        self.nodes.confirm
    }

    /// Cancel button, if rendered.
    pub fn cancel_button(&self) -> Option<NodeId> {
        self.nodes.cancel
    }

    /// Close control, if rendered.
    pub fn close_button(&self) -> Option<NodeId> {
        self.nodes.close
    }

    /// Progress track, if rendered.
    pub fn progress_bar(&self) -> Option<NodeId> {
        self.nodes.progress
    }

    /// Whether the notification is still registered and visible.
    pub fn is_live(&self) -> bool {
        self.app.is_registered(self.state.borrow().live_instance())
    }

    /// Whether the countdown is not advancing.
    pub fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    /// Fraction of the countdown sampled by the most recent tick.
    pub fn fraction(&self) -> f64 {
        self.state.borrow().fraction
    }

    /// Countdown time carried across pauses, in milliseconds.
    pub fn carry_ms(&self) -> f64 {
        self.state.borrow().carry_ms
    }

    /// Pause a running countdown, e.g. while the pointer hovers the toast.
    pub fn hold(&self) {
        let mut st = self.state.borrow_mut();
        if !st.paused {
            st.paused = true;
            st.held = true;
        }
    }

    /// Resume a countdown paused by [`hold`](Self::hold). Does nothing
    /// otherwise.
    pub fn release(&self) {
        let restart = {
            let mut st = self.state.borrow_mut();
            if !st.held {
                return;
            }
            st.held = false;
            st.paused = false;
            if st.session_live {
                None
            } else {
                st.countdown.clone()
            }
        };
        if let Some(on_complete) = restart {
            ProgressAnimator::start(&self.app, Rc::clone(&self.state), on_complete);
        }
    }

    /// Unregister and remove this notification. Safe to call repeatedly.
    pub fn remove(&self) {
        let instance = self.state.borrow().live_instance();
        self.app.remove_instance(instance);
    }
}

impl std::fmt::Debug for NotificationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.state.borrow();
        f.debug_struct("NotificationHandle")
            .field("identity", &st.identity)
            .field("root", &st.root)
            .field("paused", &st.paused)
            .field("fraction", &st.fraction)
            .finish_non_exhaustive()
    }
}
