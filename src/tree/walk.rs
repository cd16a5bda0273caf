//! Depth-first traversal over component forests.
//!
//! Every consumer of a parsed tree goes through [`walk`]: the composition
//! validator checks rules on [`Visitor::enter`] (pre-order, parent before child)
//! and the render simulation resolves assets on [`Visitor::leave`] (children
//! before parent, the order in which a host's post-render hook fires).

use crate::tree::ComponentNode;

/// Callbacks for [`walk`]. Both methods default to doing nothing.
pub trait Visitor {
    /// Called before any of `node`'s children are visited.
    fn enter(&mut self, _node: &ComponentNode, _depth: usize) {}

    /// Called after all of `node`'s children have been visited.
    fn leave(&mut self, _node: &ComponentNode, _depth: usize) {}
}

/// Visit every node of `nodes` exactly once, in document order.
///
/// The walk always descends into children; a visitor cannot prune a subtree.
/// Root nodes have depth 0.
pub fn walk<V: Visitor + ?Sized>(nodes: &[ComponentNode], visitor: &mut V) {
    for node in nodes {
        walk_node(node, 0, visitor);
    }
}

fn walk_node<V: Visitor + ?Sized>(node: &ComponentNode, depth: usize, visitor: &mut V) {
    visitor.enter(node, depth);
    for child in &node.children {
        walk_node(child, depth + 1, visitor);
    }
    visitor.leave(node, depth);
}
