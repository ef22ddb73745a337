use super::node::NodeKind;
use super::tree::{NodeId, Tree};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Render a tree back to markup.
///
/// A tree parsed from a fragment (or built by the replayer) renders with the
/// exact `<html><head></head><body>` … `</body></html>` shell the orchestrator
/// strips; anything else trips the render-contract check upstream.
pub(crate) fn render(tree: &Tree) -> String {
    let mut out = String::new();
    render_node(tree, tree.root(), &mut out);
    out
}

fn render_node(tree: &Tree, id: NodeId, out: &mut String) {
    match tree.kind(id) {
        NodeKind::Document => {
            for &child in tree.children(id) {
                render_node(tree, child, out);
            }
        }
        NodeKind::Element { name, attrs } => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                out.push(' ');
                out.push_str(attr.name.local.as_ref());
                out.push_str("=\"");
                escape_attr(&attr.value, out);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&tag) {
                return;
            }
            for &child in tree.children(id) {
                render_node(tree, child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeKind::Text { content } => escape_text(content, out),
        NodeKind::Comment { content } => {
            out.push_str("<!--");
            out.push_str(content);
            out.push_str("-->");
        }
        NodeKind::Doctype { name, .. } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeKind::Error => {}
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::node::Attr;
    use super::*;

    #[test]
    fn renders_elements_text_and_attrs() {
        let (mut tree, body) = Tree::synthetic();
        let p = tree.orphan(NodeKind::element_with_attrs("p", vec![Attr::new("id", "a\"b")]));
        tree.append_child(body, p);
        let text = tree.orphan(NodeKind::Text { content: "1 < 2 & 3".to_owned() });
        tree.append_child(p, text);

        assert_eq!(
            render(&tree),
            "<html><head></head><body><p id=\"a&quot;b\">1 &lt; 2 &amp; 3</p></body></html>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let (mut tree, body) = Tree::synthetic();
        let img = tree.orphan(NodeKind::element_with_attrs("img", vec![Attr::new("src", "x.png")]));
        tree.append_child(body, img);
        let br = tree.orphan(NodeKind::element("br"));
        tree.append_child(body, br);

        assert_eq!(
            render(&tree),
            "<html><head></head><body><img src=\"x.png\"><br></body></html>"
        );
    }

    #[test]
    fn renders_comments() {
        let (mut tree, body) = Tree::synthetic();
        let comment = tree.orphan(NodeKind::Comment { content: " note ".to_owned() });
        tree.append_child(body, comment);
        assert_eq!(render(&tree), "<html><head></head><body><!-- note --></body></html>");
    }
}
