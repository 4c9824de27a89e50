//! Headless page model.
//!
//! An arena-backed element tree standing in for the browser DOM. Elements
//! are addressed by [`ElementId`]; every mutator silently ignores ids that
//! do not belong to this document so a stale handle can never panic.

use std::collections::BTreeMap;

use crate::sanitize::{escape_html, strip_tags};

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// Content held directly by an element (before its children).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    Empty,
    /// Plain text; escaped when rendered.
    Text(String),
    /// Already-sanitized markup; rendered verbatim.
    Html(String),
}

/// A single element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub styles: BTreeMap<String, String>,
    pub content: Content,
    /// Current value of form controls.
    pub value: String,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    /// Whether this element is a text-entry control that takes a placeholder.
    pub fn is_text_input(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea")
    }
}

/// The page: an `<html>` root with a `<body>`.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: ElementId,
    body: ElementId,
    focused: Option<ElementId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Element::new("html")],
            root: ElementId(0),
            body: ElementId(0),
            focused: None,
        };
        let body = doc.create_element("body");
        doc.append_child(doc.root, body);
        doc.body = body;
        doc
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    // --- Tree construction ---

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Element::new(tag));
        ElementId(self.nodes.len() - 1)
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || !self.contains_id(parent) || !self.contains_id(child) {
            return;
        }
        if self.is_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Detach an element (and its subtree) from the tree.
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root || !self.contains_id(id) {
            return;
        }
        self.detach(id);
        if self.focused.is_some_and(|f| f == id || self.is_ancestor(id, f)) {
            self.focused = None;
        }
    }

    /// Whether the element is reachable from the root.
    pub fn is_attached(&self, id: ElementId) -> bool {
        if !self.contains_id(id) {
            return false;
        }
        id == self.root || self.is_ancestor(self.root, id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(|el| el.parent)
    }

    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.element(id)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    // --- Queries (document order, attached elements only) ---

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&e| self.attr(e, "id") == Some(id))
    }

    pub fn select_by_attr(&self, name: &str) -> Vec<ElementId> {
        self.select_within(self.root, |el| el.attrs.contains_key(name))
    }

    pub fn select_by_attr_value(&self, name: &str, value: &str) -> Vec<ElementId> {
        self.select_within(self.root, |el| el.attrs.get(name).is_some_and(|v| v == value))
    }

    pub fn select_by_class(&self, class: &str) -> Vec<ElementId> {
        self.select_by_class_within(self.root, class)
    }

    pub fn select_by_class_within(&self, scope: ElementId, class: &str) -> Vec<ElementId> {
        self.select_within(scope, |el| el.classes.iter().any(|c| c == class))
    }

    /// First descendant of `scope` with the given tag.
    pub fn first_by_tag_within(&self, scope: ElementId, tag: &str) -> Option<ElementId> {
        self.select_within(scope, |el| el.tag == tag).into_iter().next()
    }

    fn select_within(&self, scope: ElementId, pred: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        if !self.is_attached(scope) {
            return Vec::new();
        }
        self.descendants(scope)
            .into_iter()
            .filter(|&e| pred(&self.nodes[e.0]))
            .collect()
    }

    /// All descendants of `scope` (excluding `scope`), depth-first.
    fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    // --- Attributes ---

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id)?.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(el) = self.nodes.get_mut(id.0) {
            el.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        if let Some(el) = self.nodes.get_mut(id.0) {
            el.attrs.remove(name);
        }
    }

    // --- Classes ---

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.nodes.get_mut(id.0) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.nodes.get_mut(id.0) {
            el.classes.retain(|c| c != class);
        }
    }

    pub fn set_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// Flip a class; returns whether it is now present.
    pub fn toggle_class(&mut self, id: ElementId, class: &str) -> bool {
        let on = !self.has_class(id, class);
        self.set_class(id, class, on);
        on
    }

    // --- Inline styles ---

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.element(id)?.styles.get(property).map(String::as_str)
    }

    /// Set an inline style; an empty value removes it.
    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(el) = self.nodes.get_mut(id.0) {
            if value.is_empty() {
                el.styles.remove(property);
            } else {
                el.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    /// Show (`display: <value>`) or hide (`display: none`).
    pub fn set_displayed(&mut self, id: ElementId, shown: bool, display: &str) {
        self.set_style(id, "display", if shown { display } else { "none" });
    }

    /// False only when the element is explicitly `display: none`.
    pub fn is_displayed(&self, id: ElementId) -> bool {
        self.style(id, "display") != Some("none")
    }

    // --- Content ---

    /// Replace the element's own content with escaped text.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(el) = self.nodes.get_mut(id.0) {
            el.content = Content::Text(text.to_string());
        }
    }

    /// Replace the element's own content with already-sanitized markup.
    pub fn set_inner_html(&mut self, id: ElementId, html: &str) {
        if let Some(el) = self.nodes.get_mut(id.0) {
            el.content = Content::Html(html.to_string());
        }
    }

    /// Visible text of the element and its subtree.
    pub fn text_content(&self, id: ElementId) -> String {
        let Some(el) = self.element(id) else {
            return String::new();
        };
        let mut text = match &el.content {
            Content::Empty => String::new(),
            Content::Text(t) => t.clone(),
            Content::Html(h) => strip_tags(h),
        };
        for child in &el.children {
            text.push_str(&self.text_content(*child));
        }
        text
    }

    pub fn value(&self, id: ElementId) -> String {
        self.element(id).map(|el| el.value.clone()).unwrap_or_default()
    }

    pub fn set_value(&mut self, id: ElementId, value: &str) {
        if let Some(el) = self.nodes.get_mut(id.0) {
            el.value = value.to_string();
        }
    }

    // --- Focus and document language ---

    pub fn focus(&mut self, id: ElementId) {
        if self.is_attached(id) {
            self.focused = Some(id);
        }
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// The `lang` attribute of the root element.
    pub fn lang(&self) -> Option<&str> {
        self.attr(self.root, "lang")
    }

    pub fn set_lang(&mut self, lang: &str) {
        let root = self.root;
        self.set_attr(root, "lang", lang);
    }

    // --- Serialisation ---

    /// Serialise the attached tree to HTML.
    pub fn render(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        self.render_into(self.root, 0, &mut out);
        out
    }

    fn render_into(&self, id: ElementId, depth: usize, out: &mut String) {
        let el = &self.nodes[id.0];
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&el.tag);
        if !el.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_html(&el.classes.join(" "))));
        }
        for (name, value) in &el.attrs {
            out.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
        }
        if !el.styles.is_empty() {
            let style: Vec<String> = el.styles.iter().map(|(k, v)| format!("{k}: {v}")).collect();
            out.push_str(&format!(" style=\"{}\"", escape_html(&style.join("; "))));
        }
        if el.is_text_input() && !el.value.is_empty() {
            out.push_str(&format!(" value=\"{}\"", escape_html(&el.value)));
        }
        out.push('>');

        match &el.content {
            Content::Empty => {}
            Content::Text(t) => out.push_str(&escape_html(t)),
            Content::Html(h) => out.push_str(h),
        }
        if el.tag == "input" {
            out.push('\n');
            return;
        }
        if !el.children.is_empty() {
            out.push('\n');
            for child in &el.children {
                self.render_into(*child, depth + 1, out);
            }
            out.push_str(&indent);
        }
        out.push_str(&format!("</{}>\n", el.tag));
    }

    // --- Internals ---

    fn contains_id(&self, id: ElementId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Whether `ancestor` is a proper ancestor of `id`.
    fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }
}

/// Small builder for page fixtures and dynamically created elements.
pub struct ElementBuilder<'a> {
    doc: &'a mut Document,
    id: ElementId,
}

impl<'a> ElementBuilder<'a> {
    pub fn new(doc: &'a mut Document, tag: &str) -> Self {
        let id = doc.create_element(tag);
        Self { doc, id }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        for c in class.split_whitespace() {
            self.doc.add_class(self.id, c);
        }
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.doc.set_attr(self.id, name, value);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.doc.set_text(self.id, text);
        self
    }

    pub fn style(self, property: &str, value: &str) -> Self {
        self.doc.set_style(self.id, property, value);
        self
    }

    /// Append to `parent` and return the new element's id.
    pub fn append_to(self, parent: ElementId) -> ElementId {
        self.doc.append_child(parent, self.id);
        self.id
    }
}
