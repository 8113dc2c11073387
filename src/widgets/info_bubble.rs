//! InfoBubble widget: a `?` marker that expands into a help link.

use crate::app::App;
use crate::dom::node::{NodeData, NodeId};

/// A mounted tooltip. Carries no state beyond its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoBubble {
    root: NodeId,
    link: NodeId,
}

impl InfoBubble {
    /// Mount a tooltip pointing at `url` under the body, worded for the
    /// app's locale.
    pub fn mount(app: &App, url: &str) -> Self {
        let (before, after) = if app.locale().is_alternate() {
            ("访问 ", " 获取API Key并开通相应模型/服务。")
        } else {
            (
                "Visit ",
                " to get an API key and activate the corresponding model/service.",
            )
        };

        let mut state = app.state_mut();
        let doc = &mut state.document;
        let root = doc.create_element(NodeData::element("div").with_class("info-bubble"));
        let inner = doc.create_element(NodeData::element("div").with_class("inner"));
        let marker = doc.create_element(NodeData::element("span"));
        doc.set_text(marker, "?");

        let paragraph = doc.create_element(NodeData::element("p"));
        let link = doc.create_element(
            NodeData::element("a")
                .with_attribute("href", url)
                .with_attribute("target", "_blank"),
        );
        doc.set_text(link, url);
        let lead = doc.create_text(before);
        let tail = doc.create_text(after);
        doc.append_child(paragraph, lead);
        doc.append_child(paragraph, link);
        doc.append_child(paragraph, tail);

        doc.append_child(inner, marker);
        doc.append_child(inner, paragraph);
        doc.append_child(root, inner);
        doc.append_child(doc.body(), root);
        Self { root, link }
    }

    /// The `div.info-bubble` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The anchor node.
    pub fn link(&self) -> NodeId {
        self.link
    }
}
