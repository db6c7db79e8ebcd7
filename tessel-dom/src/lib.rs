//! Template tree shared by the markup parser and the renderer.
//!
//! A [`Document`] owns its nodes outright. Nothing in the workspace mutates a
//! parsed document; rendering walks it by reference, so one parse can be
//! rendered any number of times and a subtree copy is just `Clone`.

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element {
        tag: String,
        attrs: Attrs,
        children: Vec<Node>,
        self_closing: bool,
    },
    Text(String),
}

impl Node {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            Node::Text(_) => None,
        }
    }

    pub fn attrs(&self) -> Option<&Attrs> {
        match self {
            Node::Element { attrs, .. } => Some(attrs),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text(_) => &[],
        }
    }

    /// True for text nodes holding only whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }
}

/// A single attribute. `value` is `None` for bare attributes like `disabled`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
}

/// Attributes in source order. Lookups are linear; elements rarely carry
/// more than a handful.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attrs {
    list: Vec<Attr>,
}

impl Attrs {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    pub fn set(mut self, k: impl Into<String>, v: impl Into<String>) -> Self {
        self.insert(k, Some(v.into()));
        self
    }

    pub fn flag(mut self, k: impl Into<String>) -> Self {
        self.insert(k, None);
        self
    }

    /// Set `name`, keeping its original position if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.list.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.list.push(Attr { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Attr> {
        self.list.iter().find(|a| a.name == name)
    }

    /// Value of `name`; bare attributes read as `""`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<Attr> {
        let pos = self.list.iter().position(|a| a.name == name)?;
        Some(self.list.remove(pos))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attr> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attrs {
    type Item = &'a Attr;
    type IntoIter = std::slice::Iter<'a, Attr>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Allow concise attrs creation
impl From<()> for Attrs {
    fn from(_: ()) -> Self {
        Attrs::default()
    }
}
impl From<Vec<(&str, &str)>> for Attrs {
    fn from(v: Vec<(&str, &str)>) -> Self {
        let mut a = Attrs::new();
        for (k, v) in v {
            a.insert(k, Some(v.to_string()));
        }
        a
    }
}
impl From<Vec<Attr>> for Attrs {
    fn from(v: Vec<Attr>) -> Self {
        let mut a = Attrs::new();
        for attr in v {
            a.insert(attr.name, attr.value);
        }
        a
    }
}

/// Root of a parsed template: an ordered list of top-level nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl From<Node> for Document {
    fn from(node: Node) -> Self {
        Document::new(vec![node])
    }
}

pub fn h(tag: impl Into<String>, attrs: impl Into<Attrs>, children: Vec<Node>) -> Node {
    Node::Element {
        tag: tag.into(),
        attrs: attrs.into(),
        children,
        self_closing: false,
    }
}

/// A childless element written as `<tag/>`.
pub fn empty(tag: impl Into<String>, attrs: impl Into<Attrs>) -> Node {
    Node::Element {
        tag: tag.into(),
        attrs: attrs.into(),
        children: Vec::new(),
        self_closing: true,
    }
}

pub fn text(t: impl Into<String>) -> Node {
    Node::Text(t.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_tree() {
        let node = h(
            "div",
            vec![("class", "app")],
            vec![text("hello"), h("span", (), vec![text("world")])],
        );
        if let Node::Element {
            tag,
            attrs,
            children,
            self_closing,
        } = node
        {
            assert_eq!(tag, "div");
            assert_eq!(attrs.value("class"), Some("app"));
            assert_eq!(children.len(), 2);
            assert!(!self_closing);
        } else {
            panic!("expected element");
        }
    }

    #[test]
    fn insert_keeps_position() {
        let mut attrs = Attrs::new().set("a", "1").set("b", "2").set("c", "3");
        attrs.insert("a", Some("9".into()));
        let names: Vec<_> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(attrs.value("a"), Some("9"));
    }

    #[test]
    fn remove_and_bare_values() {
        let mut attrs = Attrs::new().flag("hidden").set("t:if", "true");
        assert_eq!(attrs.value("hidden"), Some(""));
        assert_eq!(attrs.remove("t:if").and_then(|a| a.value), Some("true".into()));
        assert!(!attrs.contains("t:if"));
        assert!(attrs.remove("missing").is_none());
        assert_eq!(attrs.len(), 1);
    }
}
