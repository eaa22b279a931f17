//! Ordered node sequences.

use tracing::debug;

use super::{CustomSql, Node, SqlObject};
use crate::context::SqlContext;
use crate::convert::{Converter, SqlInput};
use crate::error::Result;
use crate::validate::ValidationContext;

/// Separator used between list elements unless another one is set.
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Stable handle to an element of a [`NodeList`].
///
/// Elements are never removed from a list, so a handle keeps addressing the
/// same position for the lifetime of the list it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);

impl NodeHandle {
    /// Returns the position the handle addresses.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// An ordered, mutable sequence of nodes rendered as a delimited list.
///
/// Insertion order is rendering order. Emptiness of the list (no elements)
/// is distinct from emptiness of its text: a list may hold only blank
/// elements and still not be empty.
#[derive(Debug, Clone)]
pub struct NodeList {
    nodes: Vec<Node>,
    separator: &'static str,
}

impl Default for NodeList {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeList {
    /// Creates an empty list joined by `", "`.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Creates an empty list joined by the given separator.
    #[must_use]
    pub const fn with_separator(separator: &'static str) -> Self {
        Self {
            nodes: Vec::new(),
            separator,
        }
    }

    /// Appends a node and returns its handle.
    pub fn push(&mut self, node: impl Into<Node>) -> NodeHandle {
        self.nodes.push(node.into());
        NodeHandle(self.nodes.len() - 1)
    }

    /// Appends every node, preserving order.
    pub fn extend<I, T>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Node>,
    {
        self.nodes.extend(nodes.into_iter().map(Into::into));
    }

    /// Converts `input` with `rule` and appends the result.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBuilderError::UnsupportedInput`](crate::SqlBuilderError::UnsupportedInput)
    /// when the rule does not accept the input; the list is left unchanged.
    pub fn push_input(&mut self, rule: Converter, input: SqlInput) -> Result<NodeHandle> {
        let node = rule.convert(input)?;
        Ok(self.push(node))
    }

    /// Converts every input with `rule` and appends the results in order.
    ///
    /// Either every input is appended or none is.
    ///
    /// # Errors
    ///
    /// Returns the first conversion error; the list is left unchanged.
    pub fn extend_inputs<I>(&mut self, rule: Converter, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = SqlInput>,
    {
        let nodes = rule.convert_all(inputs)?;
        self.nodes.extend(nodes);
        Ok(())
    }

    /// Returns the node at `handle`.
    #[must_use]
    pub fn get(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle.0)
    }

    /// Replaces the node at `handle` with `f(old)`, keeping its position.
    ///
    /// Returns false when the handle is out of range.
    pub fn replace(&mut self, handle: NodeHandle, f: impl FnOnce(Node) -> Node) -> bool {
        let Some(slot) = self.nodes.get_mut(handle.0) else {
            debug!(index = handle.0, len = self.nodes.len(), "node handle out of range");
            return false;
        };
        let old = std::mem::replace(slot, Node::Custom(CustomSql::default()));
        *slot = f(old);
        true
    }

    /// Replaces the first node matching `predicate` with `f(old)`, keeping
    /// its position, and returns its handle.
    pub fn replace_first(
        &mut self,
        predicate: impl Fn(&Node) -> bool,
        f: impl FnOnce(Node) -> Node,
    ) -> Option<NodeHandle> {
        let handle = NodeHandle(self.nodes.iter().position(predicate)?);
        self.replace(handle, f);
        Some(handle)
    }

    /// Returns true when the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Returns the separator placed between elements.
    #[must_use]
    pub const fn separator(&self) -> &'static str {
        self.separator
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl SqlObject for NodeList {
    fn write_sql(&self, out: &mut String, ctx: SqlContext) {
        let mut first = true;
        for node in self.nodes.iter().filter(|n| !n.is_blank()) {
            if !first {
                out.push_str(self.separator);
            }
            node.write_sql(out, ctx);
            first = false;
        }
    }

    fn collect_schema_objects(&self, vctx: &mut ValidationContext) {
        for node in &self.nodes {
            node.collect_schema_objects(vctx);
        }
    }

    fn is_blank(&self) -> bool {
        self.nodes.iter().all(SqlObject::is_blank)
    }
}
