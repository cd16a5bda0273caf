//! Render-cycle simulation.
//!
//! Component markup rendering belongs to the host; the resolver only needs the
//! markup each instance produced. [`ComponentRenderer`] is that seam.

use super::LoadInstruction;
use crate::tree::{ComponentNode, Visitor};

/// Produces the rendered markup of one component instance.
pub trait ComponentRenderer {
    /// Markup for `node`, including the markup of its children.
    fn render(&self, node: &ComponentNode) -> String;
}

/// Uses the stored source text of each node as its rendered markup.
///
/// Good enough for class-name sniffing, since stored block markup already
/// contains the saved HTML of static components.
#[derive(Debug, Clone, Copy)]
pub struct StoredMarkupRenderer<'a> {
    source: &'a str,
}

impl<'a> StoredMarkupRenderer<'a> {
    /// Render nodes parsed from `source`.
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }
}

impl ComponentRenderer for StoredMarkupRenderer<'_> {
    fn render(&self, node: &ComponentNode) -> String {
        node.source_text(self.source)
            .or(node.raw_markup.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

/// Invokes a resolve step when a node finishes rendering and collects the output.
pub(crate) struct RenderPass<F> {
    on_rendered: F,
    instructions: Vec<LoadInstruction>,
}

impl<F> RenderPass<F>
where
    F: FnMut(&ComponentNode) -> Vec<LoadInstruction>,
{
    pub(crate) fn new(on_rendered: F) -> Self {
        Self {
            on_rendered,
            instructions: Vec::new(),
        }
    }

    pub(crate) fn into_instructions(self) -> Vec<LoadInstruction> {
        self.instructions
    }
}

impl<F> Visitor for RenderPass<F>
where
    F: FnMut(&ComponentNode) -> Vec<LoadInstruction>,
{
    fn leave(&mut self, node: &ComponentNode, _depth: usize) {
        let emitted = (self.on_rendered)(node);
        self.instructions.extend(emitted);
    }
}
