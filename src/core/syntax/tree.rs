//! Arena-backed syntax tree consumed by the rules.
//!
//! Nodes are stored in a flat `Vec` in document (pre-)order and refer to their
//! parent by index. Only the node kinds the rules care about carry structured
//! fields; every other syntactic construct is an [`NodeKind::Other`] node so that
//! "what is my immediate parent" questions still have the right answer.

use std::ops::Range;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Byte range into the file text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Two ranges conflict when they share at least one byte, or when both are
    /// insertions at the same offset.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        if self.is_empty() && other.is_empty() {
            return self.start == other.start;
        }
        self.start < other.end && other.start < self.end
    }
}

/// A single specifier of an `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSpecifier {
    /// `import { imported as local } from "..."`
    Named { local: String, imported: String },
    /// `import local from "..."`
    Default { local: String },
    /// `import * as local from "..."`
    Namespace { local: String },
}

/// Payload fields are informational; rules read the literal through
/// [`SyntaxTree::text`] so that ranges and quoting stay exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    ImportDeclaration {
        source: String,
        specifiers: Vec<ImportSpecifier>,
    },
    StringLiteral {
        value: String,
    },
    JsxText {
        value: String,
    },
    /// JSX element or fragment.
    JsxElement,
    JsxAttribute {
        name: String,
    },
    Template,
    TemplateSegment {
        raw: String,
    },
    CallExpression {
        /// Set only when the callee is a bare identifier.
        callee: Option<String>,
        arguments: Vec<NodeId>,
    },
    ObjectLiteral,
    ObjectProperty {
        key: Option<String>,
    },
    Other,
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<SyntaxNode>,
    body: Vec<NodeId>,
}

impl SyntaxTree {
    /// Create a tree holding only the `Program` root spanning the whole text.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let root = SyntaxNode {
            kind: NodeKind::Program,
            parent: None,
            range: TextRange::new(0, source.len()),
        };
        Self {
            source,
            nodes: vec![root],
            body: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn push(&mut self, kind: NodeKind, parent: NodeId, range: TextRange) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            kind,
            parent: Some(parent),
            range,
        });
        if parent == self.root() {
            self.body.push(id);
        }
        id
    }

    pub fn set_call_arguments(&mut self, call: NodeId, args: Vec<NodeId>) {
        if let NodeKind::CallExpression { arguments, .. } = &mut self.nodes[call.index()].kind {
            *arguments = args;
        }
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.node(id).range
    }

    /// Raw source text of a node. Empty if the range does not fall on char
    /// boundaries of the file text.
    pub fn text(&self, id: NodeId) -> &str {
        self.source.get(self.range(id).as_range()).unwrap_or("")
    }

    /// Top-level statements in document order.
    pub fn body(&self) -> &[NodeId] {
        &self.body
    }

    /// All nodes except the root, in document order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SyntaxNode)> {
        self.nodes
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, node)| (NodeId(i as u32), node))
    }
}
