use study_core::model::ConceptNode;

/// Deepest level rendered; the root sits at depth 1.
pub const MAX_MIND_MAP_DEPTH: usize = 64;

/// A rendered concept block: its label and the blocks of its children, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MindMapNodeVm {
    pub label: String,
    pub children: Vec<MindMapNodeVm>,
    /// Children existed below the depth ceiling and were not rendered.
    pub truncated: bool,
}

impl MindMapNodeVm {
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

struct Frame<'a> {
    node: &'a ConceptNode,
    depth: usize,
    next_child: usize,
    children: Vec<MindMapNodeVm>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a ConceptNode, depth: usize) -> Self {
        Self {
            node,
            depth,
            next_child: 0,
            children: Vec::with_capacity(node.children().len()),
        }
    }

    fn can_descend(&self) -> bool {
        self.depth < MAX_MIND_MAP_DEPTH && self.next_child < self.node.children().len()
    }
}

/// Build the block tree for `root` without recursing.
///
/// `None` renders nothing. Subtrees deeper than `MAX_MIND_MAP_DEPTH` are cut and
/// their parent is flagged as truncated.
#[must_use]
pub fn build_mind_map_vm(root: Option<&ConceptNode>) -> Option<MindMapNodeVm> {
    let mut stack = vec![Frame::new(root?, 1)];

    loop {
        let top = stack.last_mut()?;
        if top.can_descend() {
            let node = top.node;
            let child = &node.children()[top.next_child];
            top.next_child += 1;
            let depth = top.depth + 1;
            stack.push(Frame::new(child, depth));
            continue;
        }

        let frame = stack.pop()?;
        let block = MindMapNodeVm {
            label: frame.node.name().to_string(),
            truncated: frame.next_child < frame.node.children().len(),
            children: frame.children,
        };
        match stack.last_mut() {
            Some(parent) => parent.children.push(block),
            None => return Some(block),
        }
    }
}
