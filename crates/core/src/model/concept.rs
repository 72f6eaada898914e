use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

//
// ─── CONCEPT TREE ──────────────────────────────────────────────────────────────
//

/// One labeled vertex of a generated mind map.
///
/// Nodes own their children; there is no parent link and no sharing. Generated
/// payloads are not trusted: a missing or non-array `children` field reads as a
/// leaf, and a missing or non-string `name` reads as an empty label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConceptNode {
    #[serde(default, deserialize_with = "label_or_empty")]
    name: String,
    #[serde(default, deserialize_with = "children_or_empty")]
    children: Vec<ConceptNode>,
}

impl ConceptNode {
    #[must_use]
    pub fn new(name: impl Into<String>, children: Vec<ConceptNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn children(&self) -> &[ConceptNode] {
        &self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in the subtree rooted here, counted without recursion.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// Mind map response body: either a bare node or `{ "root": node }`.
///
/// The wrapped form wins when `root` holds a node, otherwise the object itself is
/// read as the root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MindMapPayload {
    Wrapped { root: ConceptNode },
    Bare(ConceptNode),
}

impl MindMapPayload {
    #[must_use]
    pub fn into_root(self) -> ConceptNode {
        match self {
            MindMapPayload::Wrapped { root } | MindMapPayload::Bare(root) => root,
        }
    }
}

fn label_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Label::deserialize(deserializer)? {
        Label::Text(text) => text,
        Label::Other(_) => String::new(),
    })
}

fn children_or_empty<'de, D>(deserializer: D) -> Result<Vec<ConceptNode>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Child {
        Node(ConceptNode),
        Other(IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Children {
        List(Vec<Child>),
        Other(IgnoredAny),
    }

    // Non-object entries are dropped one by one; their siblings survive.
    Ok(match Children::deserialize(deserializer)? {
        Children::List(children) => children
            .into_iter()
            .filter_map(|child| match child {
                Child::Node(node) => Some(node),
                Child::Other(_) => None,
            })
            .collect(),
        Children::Other(_) => Vec::new(),
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
