use super::node::NodeKind;

/// Stable index of a node within one [`Tree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// A rooted, ordered tree of parsed or synthesized markup.
///
/// Node 0 is always the document root. Nodes are never deallocated
/// individually; detaching a subtree just unlinks it from its parent, and the
/// whole arena is dropped with the tree.
#[derive(Debug)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            nodes: vec![Node { kind: NodeKind::Document, parent: None, children: Vec::new() }],
        }
    }

    /// An empty `<html><head></head><body></body></html>` shell, the target
    /// skeleton the merge replayer grows into. Returns the tree and its body.
    pub fn synthetic() -> (Self, NodeId) {
        let mut tree = Tree::new();
        let html = tree.orphan(NodeKind::element("html"));
        tree.append_child(tree.root(), html);
        let head = tree.orphan(NodeKind::element("head"));
        tree.append_child(html, head);
        let body = tree.orphan(NodeKind::element("body"));
        tree.append_child(html, body);
        (tree, body)
    }

    pub fn root(&self) -> NodeId { NodeId(0) }

    pub fn kind(&self, id: NodeId) -> &NodeKind { &self.nodes[id.0].kind }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind { &mut self.nodes[id.0].kind }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> { self.nodes[id.0].parent }

    pub fn children(&self, id: NodeId) -> &[NodeId] { &self.nodes[id.0].children }

    pub fn is_leaf(&self, id: NodeId) -> bool { self.nodes[id.0].children.is_empty() }

    pub fn is_element(&self, id: NodeId) -> bool { self.kind(id).is_element() }

    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool { self.kind(id).is_tag(tag) }

    /// Allocate a node without linking it anywhere yet.
    pub fn orphan(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, parent: None, children: Vec::new() });
        id
    }

    /// Append `child` as the last child of `parent`. The child must be
    /// detached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none(), "child is already attached");
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Unlink `child` from its parent, leaving the subtree orphaned in the
    /// arena.
    pub fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != child);
        }
    }

    /// Shallow-copy the kind of `src_id` in `src` into this arena as a new
    /// detached node.
    pub fn adopt_shape(&mut self, src: &Tree, src_id: NodeId) -> NodeId {
        self.orphan(src.kind(src_id).clone())
    }

    /// First `<body>` element in document order, if any.
    pub fn body(&self) -> Option<NodeId> {
        self.descendants(self.root()).find(|&id| self.is_tag(id, "body"))
    }

    /// The rightmost frontier: the path from the root down through last
    /// children, deepest node first. These are the graft candidates for
    /// non-insert appends.
    pub fn frontier(&self) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cur = Some(self.root());
        while let Some(id) = cur {
            chain.push(id);
            cur = self.children(id).last().copied();
        }
        chain.reverse();
        chain
    }

    /// Pre-order traversal of `from` and everything below it.
    pub fn descendants(&self, from: NodeId) -> Descendants<'_> {
        Descendants { tree: self, stack: vec![from] }
    }
}

pub(crate) struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}

impl std::fmt::Debug for Descendants<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Descendants").field("stack", &self.stack).finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn synthetic_shell_has_head_and_body() {
        let (tree, body) = Tree::synthetic();
        let html = tree.children(tree.root())[0];
        assert!(tree.is_tag(html, "html"));
        assert_eq!(tree.children(html).len(), 2);
        assert!(tree.is_tag(tree.children(html)[0], "head"));
        assert_eq!(tree.children(html)[1], body);
        assert_eq!(tree.body(), Some(body));
    }

    #[test]
    fn frontier_walks_last_children() {
        let (mut tree, body) = Tree::synthetic();
        let ul = tree.orphan(NodeKind::element("ul"));
        tree.append_child(body, ul);
        let li_a = tree.orphan(NodeKind::element("li"));
        tree.append_child(ul, li_a);
        let li_b = tree.orphan(NodeKind::element("li"));
        tree.append_child(ul, li_b);

        let frontier = tree.frontier();
        assert_eq!(frontier[0], li_b);
        assert_eq!(frontier[1], ul);
        assert_eq!(frontier[2], body);
        assert_eq!(*frontier.last().unwrap(), tree.root());
    }

    #[test]
    fn detach_unlinks_subtree() {
        let (mut tree, body) = Tree::synthetic();
        let p = tree.orphan(NodeKind::element("p"));
        tree.append_child(body, p);
        let text = tree.orphan(NodeKind::Text { content: "x".to_owned() });
        tree.append_child(p, text);

        assert_eq!(tree.children(body), &[p]);
        tree.detach(p);
        assert!(tree.children(body).is_empty());
        assert_eq!(tree.parent(p), None);
        assert_eq!(tree.parent(text), Some(p));
    }
}
