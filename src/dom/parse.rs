use std::io;

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::node::{Attr, NodeKind};
use super::tree::{NodeId, Tree};
use crate::config::Config;

/// Parse one raw fragment into an arena [`Tree`] and clean it in place.
///
/// html5ever wraps the fragment in a full `<html><head></head><body>` document
/// and normalizes character references as a side effect, so two versions that
/// only differ in entity spelling compare equal afterwards.
pub(crate) fn parse_fragment(raw: &str, config: &Config) -> io::Result<Tree> {
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut raw.as_bytes())?;

    let mut tree = Tree::new();
    let root = tree.root();
    convert_children(&mut tree, root, &dom.document);
    clean(&mut tree, config);
    Ok(tree)
}

fn convert_children(tree: &mut Tree, parent: NodeId, handle: &Handle) {
    for child in handle.children.borrow().iter() {
        let kind = match &child.data {
            NodeData::Document => continue,
            NodeData::Element { name, attrs, .. } => NodeKind::Element {
                name: name.clone(),
                attrs: attrs
                    .borrow()
                    .iter()
                    .map(|a| Attr { name: a.name.clone(), value: a.value.to_string() })
                    .collect(),
            },
            NodeData::Text { contents } => {
                NodeKind::Text { content: contents.borrow().to_string() }
            }
            NodeData::Comment { contents } => NodeKind::Comment { content: contents.to_string() },
            NodeData::Doctype { name, public_id, system_id } => NodeKind::Doctype {
                name: name.to_string(),
                public_id: public_id.to_string(),
                system_id: system_id.to_string(),
            },
            NodeData::ProcessingInstruction { .. } => NodeKind::Error,
        };
        let id = tree.orphan(kind);
        tree.append_child(parent, id);
        convert_children(tree, id, child);
    }
}

/// Normalize the parsed tree before diffing: drop empty `style` attributes,
/// canonicalize non-empty `style` values, drop the redundant `colspan="1"` on
/// table cells, and strip every element whose tag is listed in
/// `Config::clean_tags`.
fn clean(tree: &mut Tree, config: &Config) {
    let ids: Vec<NodeId> = tree.descendants(tree.root()).collect();
    for id in ids {
        let strip = match tree.kind(id) {
            NodeKind::Element { name, .. } => {
                config.clean_tags.iter().any(|tag| *tag == name.local.as_ref())
            }
            _ => false,
        };
        if strip {
            tree.detach(id);
            continue;
        }
        let is_td = tree.is_tag(id, "td");
        if let NodeKind::Element { attrs, .. } = tree.kind_mut(id) {
            attrs.retain_mut(|attr| {
                let key = attr.name.local.as_ref();
                if key.eq_ignore_ascii_case("style") {
                    if attr.value.trim().is_empty() {
                        return false;
                    }
                    attr.value = normalize_style(&attr.value);
                } else if is_td
                    && key.eq_ignore_ascii_case("colspan")
                    && attr.value.trim() == "1"
                {
                    return false;
                }
                true
            });
        }
    }
}

/// Strip insignificant spaces and guarantee a trailing `;` so equivalent
/// inline styles from different editors compare equal.
fn normalize_style(value: &str) -> String {
    let mut out: String = value.chars().filter(|c| *c != ' ').collect();
    if !out.ends_with(';') {
        out.push(';');
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::super::render;
    use super::*;

    fn parse(raw: &str) -> Tree { parse_fragment(raw, &Config::default()).unwrap() }

    #[test]
    fn wraps_fragment_in_document_shell() {
        let tree = parse("<p>hi</p>");
        assert_eq!(render(&tree), "<html><head></head><body><p>hi</p></body></html>");
    }

    #[test]
    fn normalizes_entities() {
        let tree = parse("a&#160;b");
        assert_eq!(render(&tree), "<html><head></head><body>a\u{a0}b</body></html>");
    }

    #[test_case(r#"<p style="">x</p>"#, "<p>x</p>"; "empty style dropped")]
    #[test_case(
        r#"<div style="padding-left: 30px; text-indent: -10px">x</div>"#,
        r#"<div style="padding-left:30px;text-indent:-10px;">x</div>"#;
        "style canonicalized"
    )]
    #[test_case(
        r#"<table><tr><td colspan="1">x</td></tr></table>"#,
        "<table><tbody><tr><td>x</td></tr></tbody></table>";
        "colspan one dropped"
    )]
    #[test_case(
        r#"<table><tr><td colspan="2">x</td></tr></table>"#,
        r#"<table><tbody><tr><td colspan="2">x</td></tr></tbody></table>"#;
        "other colspan kept"
    )]
    fn cleaning(raw: &str, body: &str) {
        let tree = parse(raw);
        assert_eq!(render(&tree), format!("<html><head></head><body>{body}</body></html>"));
    }

    #[test]
    fn clean_tags_strip_whole_subtrees() {
        let config = Config { clean_tags: vec!["junk".to_owned()], ..Config::default() };
        let tree = parse_fragment("a<junk>gone<b>too</b></junk>b", &config).unwrap();
        assert_eq!(render(&tree), "<html><head></head><body>ab</body></html>");
    }
}
