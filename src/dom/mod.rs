//! Owned page document model
//!
//! Skeletons and fragments are parsed once with `scraper` and converted into
//! a plain element tree that the binder and the widgets mutate directly. The
//! tree serializes back to HTML with text and attribute escaping.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// A child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Markup injected verbatim; serialized without escaping.
    Markup(String),
}

/// An element with its attributes split into id/attrs, classes and inline style
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.attrs.insert("id".to_string(), id.into());
        self
    }

    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Sets an attribute. `class` and `style` are routed into the class list
    /// and the style map.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match name {
            "class" => {
                self.classes.clear();
                for class in value.split_whitespace() {
                    self.add_class(class);
                }
            }
            "style" => {
                self.style.clear();
                for declaration in value.split(';') {
                    if let Some((property, val)) = declaration.split_once(':') {
                        let property = property.trim();
                        if !property.is_empty() {
                            self.style
                                .insert(property.to_ascii_lowercase(), val.trim().to_string());
                        }
                    }
                }
            }
            _ => {
                self.attrs.insert(name.to_ascii_lowercase(), value);
            }
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.remove(name);
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Flips `class` and reports whether it is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.style.insert(property.to_string(), value.into());
    }

    pub fn remove_style(&mut self, property: &str) {
        self.style.remove(property);
    }

    /// Hidden through the `hidden` class, the `hidden` attribute or `display: none`.
    pub fn is_hidden(&self) -> bool {
        self.has_class("hidden")
            || self.attrs.contains_key("hidden")
            || self.style("display") == Some("none")
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn append_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.children.extend(nodes);
    }

    /// Replaces the children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Replaces the children with verbatim markup.
    pub fn set_markup(&mut self, markup: impl Into<String>) {
        self.children = vec![Node::Markup(markup.into())];
    }

    /// Concatenated text of the subtree, whitespace-trimmed.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) | Node::Markup(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) => element.find_mut(id),
            _ => None,
        })
    }

    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find_tag(tag))
    }

    pub fn find_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) => element.find_tag_mut(tag),
            _ => None,
        })
    }

    /// Every element of the subtree (self included) carrying `class`.
    pub fn find_all_with_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |element| {
            if element.has_class(class) {
                found.push(element);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in self.child_elements() {
            child.walk(visit);
        }
    }

    /// Applies `f` to every element of the subtree carrying `class`.
    pub fn for_each_with_class_mut(&mut self, class: &str, f: &mut impl FnMut(&mut Element)) {
        if self.has_class(class) {
            f(self);
        }
        for node in &mut self.children {
            if let Node::Element(element) = node {
                element.for_each_with_class_mut(class, f);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            push_attr(out, name, value);
        }
        if !self.classes.is_empty() {
            push_attr(out, "class", &self.classes.join(" "));
        }
        if !self.style.is_empty() {
            let style = self
                .style
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            push_attr(out, "style", &style);
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        let raw_text = RAW_TEXT_ELEMENTS.contains(&self.tag.as_str());
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_html(out),
                Node::Text(text) if raw_text => out.push_str(text),
                Node::Text(text) => out.push_str(&escape_text(text)),
                Node::Markup(markup) => out.push_str(markup),
            }
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;").replace('\'', "&#39;")
}

/// A whole page: the `<html>` element and everything below it
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        Self {
            root: convert(parsed.root_element()),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.root.find(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn first_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.root.find_tag_mut(tag)
    }

    pub fn elements_with_class(&self, class: &str) -> Vec<&Element> {
        self.root.find_all_with_class(class)
    }

    pub fn for_each_with_class_mut(&mut self, class: &str, mut f: impl FnMut(&mut Element)) {
        self.root.for_each_with_class_mut(class, &mut f);
    }

    pub fn title(&self) -> String {
        self.root
            .find_tag("title")
            .map(Element::text_content)
            .unwrap_or_default()
    }

    /// Sets `<title>`, creating it inside `<head>` when the skeleton has none.
    pub fn set_title(&mut self, title: &str) {
        if let Some(element) = self.root.find_tag_mut("title") {
            element.set_text(title);
            return;
        }
        let element = Element::new("title").with_text(title);
        match self.root.find_tag_mut("head") {
            Some(head) => head.append(element),
            None => self.root.append(element),
        }
    }

    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>{}", self.root.to_html())
    }
}

/// Parses an HTML fragment into nodes ready to be appended to a container.
pub fn parse_fragment(html: &str) -> Vec<Node> {
    let parsed = Html::parse_fragment(html);
    convert(parsed.root_element()).children
}

fn convert(source: ElementRef<'_>) -> Element {
    let value = source.value();
    let mut element = Element::new(value.name());
    for (name, attr) in value.attrs() {
        element.set_attr(name, attr);
    }
    for child in source.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            element.append(convert(child_element));
        } else if let scraper::Node::Text(text) = child.value() {
            element.children.push(Node::Text(String::from(&**text)));
        }
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKELETON: &str = r#"<!DOCTYPE html>
<html><head><title>Loading</title></head>
<body>
  <h1 id="product-title" class="text-2xl font-bold">Product name</h1>
  <p id="product-brand" style="display: block">Brand</p>
  <ul id="features-list"><li>placeholder</li></ul>
  <img id="carousel-image" src="placeholder.jpg" alt="">
  <script>if (a < b) { run(); }</script>
</body></html>"#;

    #[test]
    fn parses_ids_classes_and_styles() {
        let doc = Document::parse(SKELETON);
        assert_eq!(doc.title(), "Loading");
        let title = doc.get("product-title").unwrap();
        assert_eq!(title.tag(), "h1");
        assert!(title.has_class("font-bold"));
        assert_eq!(title.text_content(), "Product name");
        assert_eq!(doc.get("product-brand").unwrap().style("display"), Some("block"));
        assert_eq!(doc.get("carousel-image").unwrap().attr("src"), Some("placeholder.jpg"));
        assert!(doc.get("missing").is_none());
    }

    #[test]
    fn serializes_with_escaping_and_void_elements() {
        let mut doc = Document::parse(SKELETON);
        doc.get_mut("product-title")
            .unwrap()
            .set_text("Pumps & <Valves>");
        doc.get_mut("carousel-image")
            .unwrap()
            .set_attr("alt", "a \"quoted\" alt");

        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html><html>"));
        assert!(html.contains("Pumps &amp; &lt;Valves&gt;"));
        assert!(html.contains("alt=\"a &quot;quoted&quot; alt\""));
        assert!(!html.contains("</img>"));
        assert!(html.contains("if (a < b)"));
    }

    #[test]
    fn class_and_style_mutation() {
        let mut el = Element::new("div").with_class("a b");
        assert!(!el.toggle_class("a"));
        assert!(el.toggle_class("hidden"));
        assert!(el.is_hidden());
        el.remove_class("hidden");
        el.set_style("display", "none");
        assert!(el.is_hidden());
        el.remove_style("display");
        assert!(!el.is_hidden());
        assert_eq!(el.classes(), ["b"]);
    }

    #[test]
    fn set_title_creates_missing_element() {
        let mut doc = Document::parse("<html><head></head><body></body></html>");
        doc.set_title("Pump 42");
        assert_eq!(doc.title(), "Pump 42");
        assert!(doc.to_html().contains("<title>Pump 42</title>"));
    }

    #[test]
    fn fragments_become_nodes() {
        let nodes = parse_fragment(r#"<header id="site-header"><nav>Menu</nav></header>"#);
        let mut container = Element::new("div").with_id("header-container");
        container.append_nodes(nodes);
        assert_eq!(container.find("site-header").unwrap().text_content(), "Menu");
    }

    #[test]
    fn class_queries_cover_descendants() {
        let mut root = Element::new("div")
            .with_child(Element::new("button").with_class("tab x"))
            .with_child(Element::new("div").with_child(Element::new("button").with_class("tab")));
        assert_eq!(root.find_all_with_class("tab").len(), 2);
        root.for_each_with_class_mut("tab", &mut |el| el.add_class("seen"));
        assert_eq!(root.find_all_with_class("seen").len(), 2);
    }
}
