//! Syntax tree nodes
//!
//! Every constructor and mutator checks the schema first; a node that
//! violates it is never built. Children are owned by their parent, so a
//! replaced subnode is handed back to the caller rather than shared.

use smol_str::SmolStr;
use std::fmt;
use thiserror::Error;

use super::node_type::AstNodeType;
use super::schema::{Shape, shape};

/// Why a node could not be built or modified
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("{node_type} cannot be built as a {kind} node")]
    InvalidNodeType {
        node_type: AstNodeType,
        kind: &'static str,
    },

    #[error("{node_type} cannot have {count} subnodes")]
    SubnodeCount { node_type: AstNodeType, count: usize },

    #[error("{found} is not allowed at index {index} of {node_type}")]
    SubnodeType {
        node_type: AstNodeType,
        index: usize,
        found: AstNodeType,
    },

    #[error("{node_type} has no subnode or value at index {index}")]
    IndexOutOfRange { node_type: AstNodeType, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    None,
    Subnodes(Vec<AstNode>),
    Values(Vec<SmolStr>),
}

/// A node of the syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    node_type: AstNodeType,
    content: Content,
}

impl Default for AstNode {
    fn default() -> Self {
        Self::empty()
    }
}

impl AstNode {
    /// The empty node, used for absent optional parts
    pub const fn empty() -> Self {
        Self {
            node_type: AstNodeType::EMPTY,
            content: Content::None,
        }
    }

    /// Build a fixed-arity branch node
    pub fn new_branch(node_type: AstNodeType, subnodes: Vec<AstNode>) -> Result<Self, NodeError> {
        if !matches!(shape(node_type), Shape::Branch(_)) {
            return Err(NodeError::InvalidNodeType {
                node_type,
                kind: "branch",
            });
        }
        check_subnodes(node_type, &subnodes)?;
        Ok(Self {
            node_type,
            content: Content::Subnodes(subnodes),
        })
    }

    /// Build an open-ended list node
    pub fn new_list(node_type: AstNodeType, subnodes: Vec<AstNode>) -> Result<Self, NodeError> {
        if !node_type.is_list() {
            return Err(NodeError::InvalidNodeType {
                node_type,
                kind: "list",
            });
        }
        check_subnodes(node_type, &subnodes)?;
        Ok(Self {
            node_type,
            content: Content::Subnodes(subnodes),
        })
    }

    /// Build a terminal node holding one value
    pub fn new_terminal(
        node_type: AstNodeType,
        value: impl Into<SmolStr>,
    ) -> Result<Self, NodeError> {
        if !matches!(shape(node_type), Shape::Terminal) {
            return Err(NodeError::InvalidNodeType {
                node_type,
                kind: "terminal",
            });
        }
        Ok(Self {
            node_type,
            content: Content::Values(vec![value.into()]),
        })
    }

    /// Build a terminal node holding an ordered list of values
    pub fn new_terminal_list(
        node_type: AstNodeType,
        values: Vec<SmolStr>,
    ) -> Result<Self, NodeError> {
        if !matches!(shape(node_type), Shape::TerminalList { .. }) {
            return Err(NodeError::InvalidNodeType {
                node_type,
                kind: "terminal list",
            });
        }
        if !node_type.is_legal_subnode_count(values.len()) {
            return Err(NodeError::SubnodeCount {
                node_type,
                count: values.len(),
            });
        }
        Ok(Self {
            node_type,
            content: Content::Values(values),
        })
    }

    pub fn node_type(&self) -> AstNodeType {
        self.node_type
    }

    pub fn is_empty(&self) -> bool {
        self.node_type == AstNodeType::EMPTY
    }

    /// Number of subnodes, or of values for terminal nodes
    pub fn subnode_count(&self) -> usize {
        match &self.content {
            Content::None => 0,
            Content::Subnodes(subnodes) => subnodes.len(),
            Content::Values(values) => values.len(),
        }
    }

    pub fn subnodes(&self) -> &[AstNode] {
        match &self.content {
            Content::Subnodes(subnodes) => subnodes,
            _ => &[],
        }
    }

    /// The subnode at `index`; `None` when there is none, never `EMPTY`
    /// in place of an absent subnode
    pub fn subnode(&self, index: usize) -> Option<&AstNode> {
        self.subnodes().get(index)
    }

    pub fn values(&self) -> &[SmolStr] {
        match &self.content {
            Content::Values(values) => values,
            _ => &[],
        }
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values().get(index).map(SmolStr::as_str)
    }

    /// The first value of a terminal node
    pub fn value(&self) -> Option<&str> {
        self.value_at(0)
    }

    /// Replace the subnode at `index`, returning the displaced subnode.
    ///
    /// The node is left untouched when the replacement would violate the
    /// schema.
    pub fn replace_subnode(
        &mut self,
        index: usize,
        subnode: AstNode,
    ) -> Result<AstNode, NodeError> {
        let node_type = self.node_type;
        let Content::Subnodes(subnodes) = &mut self.content else {
            return Err(NodeError::IndexOutOfRange { node_type, index });
        };
        let slot = subnodes
            .get_mut(index)
            .ok_or(NodeError::IndexOutOfRange { node_type, index })?;
        if !node_type.is_legal_subnode_type(subnode.node_type, index) {
            return Err(NodeError::SubnodeType {
                node_type,
                index,
                found: subnode.node_type,
            });
        }
        Ok(std::mem::replace(slot, subnode))
    }

    /// Replace the value at `index`, returning the displaced value
    pub fn replace_value(
        &mut self,
        index: usize,
        value: impl Into<SmolStr>,
    ) -> Result<SmolStr, NodeError> {
        let node_type = self.node_type;
        let slot = match &mut self.content {
            Content::Values(values) => values.get_mut(index),
            _ => None,
        }
        .ok_or(NodeError::IndexOutOfRange { node_type, index })?;
        Ok(std::mem::replace(slot, value.into()))
    }

    /// Walk the tree depth first, parents before children
    pub fn walk(&self) -> impl Iterator<Item = &AstNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.subnodes().iter().rev());
            Some(node)
        })
    }
}

fn check_subnodes(node_type: AstNodeType, subnodes: &[AstNode]) -> Result<(), NodeError> {
    if !node_type.is_legal_subnode_count(subnodes.len()) {
        return Err(NodeError::SubnodeCount {
            node_type,
            count: subnodes.len(),
        });
    }
    for (index, subnode) in subnodes.iter().enumerate() {
        if !node_type.is_legal_subnode_type(subnode.node_type, index) {
            return Err(NodeError::SubnodeType {
                node_type,
                index,
                found: subnode.node_type,
            });
        }
    }
    Ok(())
}

/// S-expression rendering, e.g. `(CONSTDEF (IDENT "n") (INTVAL "1"))`
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            Content::None => f.write_str("EMPTY"),
            Content::Subnodes(subnodes) => {
                write!(f, "({}", self.node_type)?;
                for subnode in subnodes {
                    write!(f, " {}", subnode)?;
                }
                f.write_str(")")
            }
            Content::Values(values) => {
                write!(f, "({}", self.node_type)?;
                for value in values {
                    write!(f, " {:?}", value.as_str())?;
                }
                f.write_str(")")
            }
        }
    }
}
