//! In-memory page
//!
//! Elements live in an arena and are addressed by [`NodeId`]. Positions are
//! document-relative; `viewport_top` subtracts the current scroll offset the
//! way `getBoundingClientRect().top` does in a browser.
//!
//! Selector queries render the attached tree to markup, tagging every
//! element with [`NODE_ATTR`], and let `scraper` do the matching. Inner
//! markup set through `set_inner_html` is not part of that rendering, so only
//! arena elements can be matched.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::rc::Rc;

use scraper::{Html, Selector};
use wisata_core::host::Handler;
use wisata_core::{EventKind, EventOutcome, Page, Scheduler, Subscription, Target};

use crate::clock::ManualClock;

/// Attribute carrying the arena index in rendered markup.
pub const NODE_ATTR: &str = "data-fake-node";

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Builder for elements placed into a [`FakeHost`].
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    inner_html: String,
    value: String,
    top: f64,
    height: f64,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn html(mut self, html: &str) -> Self {
        self.inner_html = html.to_string();
        self
    }

    /// Initial value for a form control.
    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Document-relative top edge, in pixels.
    pub fn top(mut self, top: f64) -> Self {
        self.top = top;
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }
}

#[derive(Debug)]
struct Node {
    spec: ElementSpec,
    text: String,
    style: BTreeMap<String, String>,
    disabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn has_class(&self, class: &str) -> bool {
        self.spec.classes.iter().any(|c| c == class)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.spec.attrs.get(name).map(String::as_str)
    }

    /// Opening tag with id, classes, attributes and the arena index.
    fn write_open_tag(&self, index: usize, out: &mut String) {
        let _ = write!(out, "<{}", self.spec.tag);
        if let Some(id) = &self.spec.id {
            let _ = write!(out, " id=\"{}\"", escape_attr(id));
        }
        if !self.spec.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_attr(&self.spec.classes.join(" ")));
        }
        for (name, value) in &self.spec.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
        }
        let _ = write!(out, " {NODE_ATTR}=\"{index}\">");
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerTarget {
    Window,
    Document,
    Node(NodeId),
}

struct Listener {
    id: u64,
    target: ListenerTarget,
    event: EventKind,
    handler: Rc<dyn Fn() -> EventOutcome>,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<Listener>,
}

/// In-memory implementation of [`Page`] and [`Scheduler`].
pub struct FakeHost {
    nodes: RefCell<Vec<Node>>,
    body: NodeId,
    listeners: Rc<RefCell<Listeners>>,
    clock: ManualClock,
    scroll_y: Cell<f64>,
    viewport_height: Cell<f64>,
    complete: Cell<bool>,
    scroll_requests: RefCell<Vec<f64>>,
}

impl FakeHost {
    /// An empty `<body>` in an 800px tall viewport, scrolled to the top,
    /// with the `load` event not yet fired.
    pub fn new() -> Rc<Self> {
        let body = Node {
            spec: ElementSpec::new("body"),
            text: String::new(),
            style: BTreeMap::new(),
            disabled: false,
            parent: None,
            children: Vec::new(),
        };
        Rc::new(Self {
            nodes: RefCell::new(vec![body]),
            body: NodeId(0),
            listeners: Rc::default(),
            clock: ManualClock::new(),
            scroll_y: Cell::new(0.0),
            viewport_height: Cell::new(800.0),
            complete: Cell::new(false),
            scroll_requests: RefCell::default(),
        })
    }

    pub fn body_id(&self) -> NodeId {
        self.body
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Shorthand for `clock().advance(ms)`.
    pub fn advance(&self, ms: u64) {
        self.clock.advance(ms);
    }

    // -- building the page --

    pub fn insert(&self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = self.alloc(spec);
        self.attach(parent, id);
        id
    }

    pub fn insert_into_body(&self, spec: ElementSpec) -> NodeId {
        self.insert(self.body, spec)
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.viewport_height.set(height);
    }

    /// Move an element, e.g. after content above it changed size.
    pub fn set_top(&self, node: NodeId, top: f64) {
        self.nodes.borrow_mut()[node.0].spec.top = top;
    }

    // -- driving events --

    /// Dispatch `event` to listeners on `target`. Returns `PreventDefault`
    /// if any handler asked for it.
    pub fn dispatch(&self, target: Target<'_, NodeId>, event: EventKind) -> EventOutcome {
        let target = match target {
            Target::Window => ListenerTarget::Window,
            Target::Document => ListenerTarget::Document,
            Target::Element(node) => ListenerTarget::Node(*node),
        };
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .filter(|l| l.target == target && l.event == event)
            .map(|l| Rc::clone(&l.handler))
            .collect();

        let mut outcome = EventOutcome::Continue;
        for handler in handlers {
            if handler() == EventOutcome::PreventDefault {
                outcome = EventOutcome::PreventDefault;
            }
        }
        outcome
    }

    pub fn click(&self, node: NodeId) -> EventOutcome {
        self.dispatch(Target::Element(&node), EventKind::Click)
    }

    pub fn submit(&self, form: NodeId) -> EventOutcome {
        self.dispatch(Target::Element(&form), EventKind::Submit)
    }

    /// Set the window scroll offset and fire `scroll`.
    pub fn scroll_window(&self, y: f64) {
        self.scroll_y.set(y);
        self.dispatch(Target::Window, EventKind::Scroll);
    }

    /// Mark the document complete and fire `load`.
    pub fn fire_load(&self) {
        self.complete.set(true);
        self.dispatch(Target::Window, EventKind::Load);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    // -- inspection --

    /// Every `scroll_to` target requested so far.
    pub fn scroll_requests(&self) -> Vec<f64> {
        self.scroll_requests.borrow().clone()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[node.0].style.get(property).cloned()
    }

    pub fn text(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].text.clone()
    }

    pub fn value(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].spec.value.clone()
    }

    pub fn set_value(&self, node: NodeId, value: &str) {
        self.nodes.borrow_mut()[node.0].spec.value = value.to_string();
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.nodes.borrow()[node.0].disabled
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    /// Reachable from `<body>`.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.body {
                return true;
            }
            current = nodes[id.0].parent;
        }
        false
    }

    // -- internals --

    fn alloc(&self, spec: ElementSpec) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            spec,
            text: String::new(),
            style: BTreeMap::new(),
            disabled: false,
            parent: None,
            children: Vec::new(),
        });
        NodeId(nodes.len() - 1)
    }

    fn attach(&self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(parent);
        nodes[parent.0].children.push(child);
    }

    fn detach(&self, node: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Descendants of `root` in document order, excluding `root`.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes[root.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    /// Topmost ancestor of `node`; `<body>` for anything attached.
    fn tree_root(&self, node: NodeId) -> NodeId {
        let nodes = self.nodes.borrow();
        let mut current = node;
        while let Some(parent) = nodes[current.0].parent {
            current = parent;
        }
        current
    }

    /// Markup for the subtree under `node`.
    fn render(&self, node: NodeId, out: &mut String) {
        let children = {
            let nodes = self.nodes.borrow();
            let el = &nodes[node.0];
            el.write_open_tag(node.0, out);
            if VOID_TAGS.contains(&el.spec.tag.as_str()) {
                return;
            }
            el.children.clone()
        };
        for child in children {
            self.render(child, out);
        }
        let _ = write!(out, "</{}>", self.nodes.borrow()[node.0].spec.tag);
    }

    /// Descendants of `root` matching `selector`, in document order. An
    /// unparsable selector matches nothing.
    fn select(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };

        let mut markup = String::from("<!DOCTYPE html>");
        self.render(self.tree_root(root), &mut markup);
        let document = Html::parse_document(&markup);

        let scope = format!("[{NODE_ATTR}=\"{}\"]", root.0);
        let Some(scope) = Selector::parse(&scope)
            .ok()
            .and_then(|scope| document.select(&scope).next())
        else {
            return Vec::new();
        };

        scope
            .select(&selector)
            .filter_map(|el| el.value().attr(NODE_ATTR)?.parse::<usize>().ok())
            .map(NodeId)
            .filter(|id| *id != root)
            .collect()
    }

    fn with_node<R>(&self, node: NodeId, f: impl FnOnce(&mut Node) -> R) -> R {
        f(&mut self.nodes.borrow_mut()[node.0])
    }
}

impl Page for FakeHost {
    type Element = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.select(self.body, selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.body, selector)
    }

    fn query_within(&self, parent: &NodeId, selector: &str) -> Vec<NodeId> {
        self.select(*parent, selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let candidates = self.descendants(self.body);
        let nodes = self.nodes.borrow();
        candidates
            .into_iter()
            .find(|n| nodes[n.0].spec.id.as_deref() == Some(id))
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.alloc(ElementSpec::new(tag)))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.attach(*parent, *child);
    }

    fn remove(&self, element: &NodeId) {
        self.detach(*element);
    }

    fn add_class(&self, element: &NodeId, class: &str) {
        self.with_node(*element, |n| {
            if !n.has_class(class) {
                n.spec.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, element: &NodeId, class: &str) {
        self.with_node(*element, |n| n.spec.classes.retain(|c| c != class));
    }

    fn toggle_class(&self, element: &NodeId, class: &str) -> bool {
        if self.has_class(element, class) {
            self.remove_class(element, class);
            false
        } else {
            self.add_class(element, class);
            true
        }
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[element.0].has_class(class)
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[element.0].attr(name).map(str::to_string)
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) {
        self.with_node(*element, |n| {
            n.style.insert(property.to_string(), value.to_string());
        });
    }

    fn inner_html(&self, element: &NodeId) -> String {
        self.nodes.borrow()[element.0].spec.inner_html.clone()
    }

    fn set_inner_html(&self, element: &NodeId, html: &str) {
        self.with_node(*element, |n| n.spec.inner_html = html.to_string());
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        self.with_node(*element, |n| {
            n.text = text.to_string();
            n.spec.inner_html.clear();
        });
    }

    fn set_disabled(&self, element: &NodeId, disabled: bool) {
        self.with_node(*element, |n| n.disabled = disabled);
    }

    fn form_value(&self, form: &NodeId, field: &str) -> Option<String> {
        let candidates = self.descendants(*form);
        let nodes = self.nodes.borrow();
        candidates
            .into_iter()
            .find(|id| nodes[id.0].attr("name") == Some(field))
            .map(|id| nodes[id.0].spec.value.clone())
    }

    fn reset_form(&self, form: &NodeId) {
        for id in self.descendants(*form) {
            self.with_node(id, |n| {
                if n.attr("name").is_some() {
                    n.spec.value.clear();
                }
            });
        }
    }

    fn viewport_top(&self, element: &NodeId) -> f64 {
        self.nodes.borrow()[element.0].spec.top - self.scroll_y.get()
    }

    fn offset_height(&self, element: &NodeId) -> f64 {
        self.nodes.borrow()[element.0].spec.height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height.get()
    }

    fn scroll_to(&self, top: f64) {
        self.scroll_requests.borrow_mut().push(top);
        self.scroll_y.set(top.max(0.0));
    }

    fn document_complete(&self) -> bool {
        self.complete.get()
    }

    fn listen(
        &self,
        target: Target<'_, NodeId>,
        event: EventKind,
        handler: Handler,
    ) -> Subscription {
        let target = match target {
            Target::Window => ListenerTarget::Window,
            Target::Document => ListenerTarget::Document,
            Target::Element(node) => ListenerTarget::Node(*node),
        };
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push(Listener {
                id,
                target,
                event,
                handler: Rc::from(handler),
            });
            id
        };
        let listeners = Rc::clone(&self.listeners);
        Subscription::new(move || listeners.borrow_mut().entries.retain(|l| l.id != id))
    }
}

impl Scheduler for FakeHost {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Subscription {
        self.clock.schedule_once(delay_ms, callback)
    }

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Subscription {
        self.clock.schedule_repeat(period_ms, callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_in_document_order() {
        let host = FakeHost::new();
        let a = host.insert_into_body(ElementSpec::new("div").class("card"));
        let wrapper = host.insert_into_body(ElementSpec::new("div"));
        let b = host.insert(wrapper, ElementSpec::new("div").class("card"));

        assert_eq!(host.query_all(".card"), vec![a, b]);
        assert_eq!(host.query_within(&wrapper, ".card"), vec![b]);
    }

    #[test]
    fn test_removed_elements_are_not_found() {
        let host = FakeHost::new();
        let el = host.insert_into_body(ElementSpec::new("div").id("x"));
        host.remove(&el);
        host.remove(&el);

        assert!(!host.is_attached(el));
        assert!(host.element_by_id("x").is_none());
    }

    #[test]
    fn test_cancelled_listener_is_not_called() {
        let host = FakeHost::new();
        let el = host.insert_into_body(ElementSpec::new("button"));
        let sub = host.listen(
            Target::Element(&el),
            EventKind::Click,
            Box::new(|| EventOutcome::PreventDefault),
        );
        assert_eq!(host.click(el), EventOutcome::PreventDefault);

        sub.cancel();
        assert_eq!(host.click(el), EventOutcome::Continue);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_combinators_match_like_a_browser() {
        let host = FakeHost::new();
        let slider = host.insert_into_body(ElementSpec::new("div").class("image-slider"));
        let slides: Vec<_> = (0..3)
            .map(|_| host.insert(slider, ElementSpec::new("img").class("image")))
            .collect();
        let nested = host.insert(slider, ElementSpec::new("figure"));
        let deep = host.insert(nested, ElementSpec::new("img").class("image"));

        let mut all = slides.clone();
        all.push(deep);
        assert_eq!(host.query_all(".image-slider .image"), all);
        assert_eq!(host.query_all(".image-slider > .image"), slides);
        assert_eq!(host.query_all("div.image-slider > img.image + img").len(), 2);
    }

    #[test]
    fn test_scoped_query_sees_outer_ancestors() {
        let host = FakeHost::new();
        let form = host.insert_into_body(ElementSpec::new("form").id("contactForm"));
        let button = host.insert(form, ElementSpec::new("button").attr("type", "submit"));

        assert_eq!(host.query_within(&form, "#contactForm button"), vec![button]);
        assert_eq!(host.query_within(&form, r#"button[type="submit"]"#), vec![button]);
        assert!(host.query_within(&form, "form").is_empty());
    }

    #[test]
    fn test_attribute_selectors() {
        let host = FakeHost::new();
        let anchor = host.insert_into_body(ElementSpec::new("a").attr("href", "#top"));
        host.insert_into_body(ElementSpec::new("a").attr("href", "/bali.html"));
        let quoted = host.insert_into_body(
            ElementSpec::new("a").attr("href", "#a\"b&c").attr("title", "x"),
        );

        assert_eq!(host.query_all(r##"a[href^="#"]"##), vec![anchor, quoted]);
        assert_eq!(host.query_all("[title]"), vec![quoted]);
        assert_eq!(host.query_all(".fade-in, [title]"), vec![quoted]);
    }

    #[test]
    fn test_unparsable_selector_matches_nothing() {
        let host = FakeHost::new();
        host.insert_into_body(ElementSpec::new("div").class("card"));
        assert!(host.query_all("div[").is_empty());
        assert!(host.query(">>").is_none());
    }

    #[test]
    fn test_detached_subtree_is_queryable_from_its_root() {
        let host = FakeHost::new();
        let alert = host.create_element("div").unwrap();
        let close = host.create_element("button").unwrap();
        host.add_class(&close, "alert-close");
        host.append_child(&alert, &close);

        assert_eq!(host.query_within(&alert, ".alert-close"), vec![close]);
        assert!(host.query_all(".alert-close").is_empty());
    }

    #[test]
    fn test_viewport_top_tracks_scroll() {
        let host = FakeHost::new();
        let el = host.insert_into_body(ElementSpec::new("section").top(1200.0));
        host.scroll_window(500.0);
        assert_eq!(host.viewport_top(&el), 700.0);

        host.set_top(el, 900.0);
        assert_eq!(host.viewport_top(&el), 400.0);
    }
}
