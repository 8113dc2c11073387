//! KvPairs widget: an editable list of key/value rows.
//!
//! ```text
//! div.kv-pairs[kv-name]
//!  ├── div.kv-container
//!  │    └── div.kv-pair*
//!  │         ├── input.kv-key[k-name=k-<name>]
//!  │         ├── input.kv-value[v-name=v-<name>]
//!  │         └── button.remove-btn
//!  └── button.kv-add
//! ```
//!
//! Input values live in each input's `value` attribute, which is what
//! [`App::input`] writes.

use std::rc::Rc;

use crate::app::App;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Document;
use crate::event::message::{Envelope, PairDeleted};

/// One key/value entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvPair {
    pub key: String,
    pub value: String,
}

impl KvPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Node ids of one rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KvRow {
    pub row: NodeId,
    pub key_input: NodeId,
    pub value_input: NodeId,
    pub remove_button: NodeId,
}

impl KvRow {
    fn resolve(doc: &Document, row: NodeId) -> Option<Self> {
        Some(Self {
            row,
            key_input: doc.find_class_within(row, "kv-key")?,
            value_input: doc.find_class_within(row, "kv-value")?,
            remove_button: doc.find_class_within(row, "remove-btn")?,
        })
    }
}

/// What click handlers need to find their editor again.
#[derive(Clone)]
struct Editor {
    name: Rc<str>,
    host: NodeId,
    container: NodeId,
}

impl Editor {
    fn rows(&self, doc: &Document) -> Vec<KvRow> {
        doc.children(self.container)
            .iter()
            .filter_map(|&row| KvRow::resolve(doc, row))
            .collect()
    }

    fn add_pair(&self, app: &App, key: &str, value: &str) -> Option<KvRow> {
        let locale = app.locale();
        let row = {
            let mut state = app.state_mut();
            let doc = &mut state.document;
            if !doc.contains(self.container) {
                return None;
            }
            let row = doc.create_element(NodeData::element("div").with_class("kv-pair"));
            let key_input = doc.create_element(
                NodeData::element("input")
                    .with_class("kv-key")
                    .with_attribute("type", "text")
                    .with_attribute("placeholder", locale.pick("key", Some("键")))
                    .with_attribute("k-name", format!("k-{}", self.name))
                    .with_attribute("value", key),
            );
            let value_input = doc.create_element(
                NodeData::element("input")
                    .with_class("kv-value")
                    .with_attribute("type", "text")
                    .with_attribute("placeholder", locale.pick("value", Some("值")))
                    .with_attribute("v-name", format!("v-{}", self.name))
                    .with_attribute("value", value),
            );
            let remove_button =
                doc.create_element(NodeData::element("button").with_class("remove-btn"));
            doc.set_text(remove_button, locale.pick("delete", Some("删除")));
            doc.append_child(row, key_input);
            doc.append_child(row, value_input);
            doc.append_child(row, remove_button);
            doc.append_child(self.container, row);

            let editor = self.clone();
            doc.on_click(
                remove_button,
                Rc::new(move |app: &App| {
                    editor.remove_pair(app, row);
                }),
            );
            KvRow {
                row,
                key_input,
                value_input,
                remove_button,
            }
        };
        self.refresh_remove_buttons(&mut app.state_mut().document);
        Some(row)
    }

    fn remove_pair(&self, app: &App, row: NodeId) -> bool {
        let mut state = app.state_mut();
        let doc = &mut state.document;
        if doc.parent(row) != Some(self.container) || doc.remove(row).is_none() {
            return false;
        }
        self.refresh_remove_buttons(doc);
        doc.dispatch(Envelope::new(
            PairDeleted {
                editor: self.name.to_string(),
            },
            self.host,
        ));
        tracing::debug!(editor = %self.name, "pair deleted");
        true
    }

    /// Hide the only remaining remove control; show them all otherwise.
    fn refresh_remove_buttons(&self, doc: &mut Document) {
        let rows = self.rows(doc);
        let display = if rows.len() == 1 { "none" } else { "inline-block" };
        for row in rows {
            doc.set_style(row.remove_button, "display", display);
        }
    }
}

/// Handle to a mounted key-value editor.
#[derive(Clone)]
pub struct KvPairs {
    app: App,
    editor: Editor,
    add_button: NodeId,
}

impl KvPairs {
    /// Mount an editor named `name` under the body, with one empty row.
    pub fn mount(app: &App, name: &str) -> Self {
        let label = app.locale().pick("Add", Some("添加"));
        let editor = {
            let mut state = app.state_mut();
            let doc = &mut state.document;
            let host = doc.create_element(
                NodeData::element("div")
                    .with_class("kv-pairs")
                    .with_attribute("kv-name", name),
            );
            let container = doc.create_element(NodeData::element("div").with_class("kv-container"));
            doc.append_child(host, container);
            doc.append_child(doc.body(), host);
            Editor {
                name: Rc::from(name),
                host,
                container,
            }
        };
        let add_button = {
            let mut state = app.state_mut();
            let doc = &mut state.document;
            let button = doc.create_element(NodeData::element("button").with_class("kv-add"));
            doc.set_text(button, label);
            doc.append_child(editor.host, button);
            let handler_editor = editor.clone();
            doc.on_click(
                button,
                Rc::new(move |app: &App| {
                    handler_editor.add_pair(app, "", "");
                }),
            );
            button
        };
        editor.add_pair(app, "", "");
        Self {
            app: app.clone(),
            editor,
            add_button,
        }
    }

    /// The editor's `kv-name`.
    pub fn name(&self) -> &str {
        &self.editor.name
    }

    /// The `div.kv-pairs` host node.
    pub fn host(&self) -> NodeId {
        self.editor.host
    }

    /// The add button.
    pub fn add_button(&self) -> NodeId {
        self.add_button
    }

    /// Rendered rows in order.
    pub fn rows(&self) -> Vec<KvRow> {
        self.editor.rows(&self.app.document())
    }

    /// Append a row. `None` once the editor has been removed from the document.
    pub fn add_pair(&self, key: &str, value: &str) -> Option<KvRow> {
        self.editor.add_pair(&self.app, key, value)
    }

    /// Delete `row` and emit [`PairDeleted`]. `false` if the row is not part
    /// of this editor.
    pub fn remove_pair(&self, row: NodeId) -> bool {
        self.editor.remove_pair(&self.app, row)
    }

    /// Pairs whose key and value are both non-empty, in row order.
    pub fn get_values(&self) -> Vec<KvPair> {
        let doc = self.app.document();
        self.editor
            .rows(&doc)
            .into_iter()
            .filter_map(|row| {
                let key = doc.attribute(row.key_input, "value").unwrap_or_default();
                let value = doc.attribute(row.value_input, "value").unwrap_or_default();
                (!key.is_empty() && !value.is_empty()).then(|| KvPair::new(key, value))
            })
            .collect()
    }

    /// Replace every row with `data`.
    pub fn set_data(&self, data: &[KvPair]) {
        self.app.state_mut().document.clear_children(self.editor.container);
        for pair in data {
            self.editor.add_pair(&self.app, &pair.key, &pair.value);
        }
    }

    /// Type into the key input of row `index`.
    pub fn set_key(&self, index: usize, key: &str) -> bool {
        match self.rows().get(index) {
            Some(row) => self.app.input(row.key_input, key),
            None => false,
        }
    }

    /// Type into the value input of row `index`.
    pub fn set_value(&self, index: usize, value: &str) -> bool {
        match self.rows().get(index) {
            Some(row) => self.app.input(row.value_input, value),
            None => false,
        }
    }
}

impl std::fmt::Debug for KvPairs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvPairs")
            .field("name", &self.editor.name)
            .field("host", &self.editor.host)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::locale::Locale;

    fn displays(editor: &KvPairs) -> Vec<Option<String>> {
        let doc = editor.app.document();
        editor
            .rows()
            .iter()
            .map(|row| doc.style(row.remove_button, "display").map(str::to_owned))
            .collect()
    }

    #[test]
    fn starts_with_one_empty_row() {
        let app = App::new_headless();
        let editor = app.kv_pairs("headers");
        let rows = editor.rows();
        assert_eq!(rows.len(), 1);
        assert!(editor.get_values().is_empty());
        assert_eq!(displays(&editor), vec![Some("none".to_owned())]);
        let doc = app.document();
        assert_eq!(doc.attribute(editor.host(), "kv-name"), Some("headers"));
        assert_eq!(doc.attribute(rows[0].key_input, "k-name"), Some("k-headers"));
        assert_eq!(doc.text_content(editor.add_button()), "Add");
    }

    #[test]
    fn add_button_appends_rows_and_shows_remove() {
        let app = App::new_headless();
        let editor = app.kv_pairs("env");
        assert!(app.click(editor.add_button()));
        assert_eq!(editor.rows().len(), 2);
        assert_eq!(
            displays(&editor),
            vec![Some("inline-block".to_owned()), Some("inline-block".to_owned())]
        );
    }

    #[test]
    fn get_values_skips_incomplete_pairs() {
        let app = App::new_headless();
        let editor = app.kv_pairs("env");
        editor.add_pair("b", "");
        editor.add_pair("", "c");
        editor.add_pair("d", "4");
        editor.set_key(0, "a");
        editor.set_value(0, "1");
        assert_eq!(editor.get_values(), vec![KvPair::new("a", "1"), KvPair::new("d", "4")]);
    }

    #[test]
    fn remove_click_deletes_row_and_emits_event() {
        let app = App::new_headless();
        let editor = app.kv_pairs("env");
        editor.add_pair("x", "1");
        let rows = editor.rows();
        assert!(app.click(rows[0].remove_button));

        assert_eq!(editor.rows(), vec![rows[1]]);
        assert_eq!(displays(&editor), vec![Some("none".to_owned())]);
        let events = app.drain_events();
        assert_eq!(events.len(), 1);
        let deleted = events[0].downcast_ref::<PairDeleted>();
        assert_eq!(deleted.map(|e| e.editor.as_str()), Some("env"));
        assert_eq!(deleted.map(PairDeleted::detail), Some("delete"));
        assert_eq!(events[0].sender, editor.host());
    }

    #[test]
    fn remove_pair_rejects_foreign_rows() {
        let app = App::new_headless();
        let first = app.kv_pairs("a");
        let second = app.kv_pairs("b");
        let foreign = second.rows()[0].row;
        assert!(!first.remove_pair(foreign));
        assert_eq!(second.rows().len(), 1);
        assert!(app.drain_events().is_empty());
    }

    #[test]
    fn set_data_replaces_rows() {
        let app = App::new_headless();
        let editor = app.kv_pairs("env");
        editor.set_key(0, "stale");
        editor.set_value(0, "stale");
        let data = vec![KvPair::new("k1", "v1"), KvPair::new("k2", "v2")];
        editor.set_data(&data);
        assert_eq!(editor.rows().len(), 2);
        assert_eq!(editor.get_values(), data);
    }

    #[test]
    fn set_data_empty_leaves_no_rows() {
        let app = App::new_headless();
        let editor = app.kv_pairs("env");
        editor.set_data(&[]);
        assert!(editor.rows().is_empty());
        assert!(!editor.set_key(0, "x"));
    }

    #[test]
    fn chinese_labels() {
        let app = App::with_locale(Locale::ZH);
        let editor = app.kv_pairs("env");
        let row = editor.rows()[0];
        let doc = app.document();
        assert_eq!(doc.text_content(editor.add_button()), "添加");
        assert_eq!(doc.text_content(row.remove_button), "删除");
    }

    #[test]
    fn add_after_host_removed_is_none() {
        let app = App::new_headless();
        let editor = app.kv_pairs("env");
        app.state_mut().document.remove(editor.host());
        assert!(editor.add_pair("a", "b").is_none());
        assert!(editor.rows().is_empty());
    }
}
