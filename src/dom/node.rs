use html5ever::{LocalName, Namespace, QualName};

pub(crate) const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// A single element attribute: a qualified name and a literal value.
///
/// Attribute order is preserved from the source markup and is significant
/// when comparing nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: QualName,
    pub value: String,
}

impl Attr {
    /// An attribute in the null namespace, the common case for plain HTML.
    #[must_use]
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
            value: value.to_owned(),
        }
    }
}

/// Closed set of node kinds the engine models.
///
/// `Error` absorbs markup constructs with no counterpart here (processing
/// instructions); such nodes never compare equal to anything and render to
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Document,
    Element { name: QualName, attrs: Vec<Attr> },
    Text { content: String },
    Comment { content: String },
    Doctype { name: String, public_id: String, system_id: String },
    Error,
}

impl NodeKind {
    pub(crate) fn element(tag: &str) -> Self {
        NodeKind::Element {
            name: QualName::new(None, Namespace::from(HTML_NS), LocalName::from(tag)),
            attrs: Vec::new(),
        }
    }

    pub(crate) fn element_with_attrs(tag: &str, attrs: Vec<Attr>) -> Self {
        NodeKind::Element {
            name: QualName::new(None, Namespace::from(HTML_NS), LocalName::from(tag)),
            attrs,
        }
    }

    pub(crate) fn is_element(&self) -> bool { matches!(self, NodeKind::Element { .. }) }

    pub(crate) fn is_text(&self) -> bool { matches!(self, NodeKind::Text { .. }) }

    /// True for an HTML-namespace element with the given tag name.
    pub(crate) fn is_tag(&self, tag: &str) -> bool {
        match self {
            NodeKind::Element { name, .. } => {
                name.local.as_ref() == tag && name.ns.as_ref() == HTML_NS
            }
            _ => false,
        }
    }
}

/// Order-sensitive comparison of attribute lists as (namespace, key, value)
/// triples.
pub(crate) fn attrs_equal(base: &[Attr], comp: &[Attr]) -> bool {
    base.len() == comp.len()
        && base.iter().zip(comp).all(|(a, b)| {
            a.name.local == b.name.local && a.name.ns == b.name.ns && a.value == b.value
        })
}

/// Structural equality ignoring text content: same kind, and for elements the
/// same qualified name and attribute list. Comments and doctypes still compare
/// their payload.
pub(crate) fn shape_equal(base: &NodeKind, comp: &NodeKind) -> bool {
    match (base, comp) {
        (NodeKind::Document, NodeKind::Document) => true,
        (
            NodeKind::Element { name: na, attrs: aa },
            NodeKind::Element { name: nb, attrs: ab },
        ) => na.local == nb.local && na.ns == nb.ns && attrs_equal(aa, ab),
        (NodeKind::Text { .. }, NodeKind::Text { .. }) => true,
        (NodeKind::Comment { content: a }, NodeKind::Comment { content: b }) => a == b,
        (
            NodeKind::Doctype { name: na, public_id: pa, system_id: sa },
            NodeKind::Doctype { name: nb, public_id: pb, system_id: sb },
        ) => na == nb && pa == pb && sa == sb,
        _ => false,
    }
}

/// Full structural equality: [`shape_equal`] plus text content.
pub(crate) fn node_equal(base: &NodeKind, comp: &NodeKind) -> bool {
    if let (NodeKind::Text { content: a }, NodeKind::Text { content: b }) = (base, comp) {
        return a == b;
    }
    shape_equal(base, comp)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn attrs_compare_in_order() {
        let a = vec![Attr::new("style", "color:red;"), Attr::new("id", "x")];
        let b = vec![Attr::new("style", "color:red;"), Attr::new("id", "x")];
        let swapped = vec![Attr::new("id", "x"), Attr::new("style", "color:red;")];
        assert!(attrs_equal(&a, &b));
        assert!(!attrs_equal(&a, &swapped));
        assert!(!attrs_equal(&a, &a[..1].to_vec()));
    }

    #[test]
    fn shape_ignores_text_content() {
        let a = NodeKind::Text { content: "abc".to_owned() };
        let b = NodeKind::Text { content: "xyz".to_owned() };
        assert!(shape_equal(&a, &b));
        assert!(!node_equal(&a, &b));
        assert!(node_equal(&a, &a.clone()));
    }

    #[test]
    fn elements_compare_by_name_and_attrs() {
        let td = NodeKind::element("td");
        let td2 = NodeKind::element("td");
        let th = NodeKind::element("th");
        let styled = NodeKind::element_with_attrs("td", vec![Attr::new("colspan", "2")]);
        assert!(shape_equal(&td, &td2));
        assert!(!shape_equal(&td, &th));
        assert!(!shape_equal(&td, &styled));
        assert!(td.is_tag("td"));
        assert!(!td.is_tag("tr"));
    }

    #[test]
    fn error_nodes_never_match() {
        assert!(!shape_equal(&NodeKind::Error, &NodeKind::Error));
    }
}
