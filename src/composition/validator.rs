//! Single-pass grammar checker.

use super::Category;
use crate::tree::{ComponentNode, Visitor, walk};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The tree breaks the grammar
    Error,
}

/// Grammar rule a violation breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// An atom has children
    AtomNoChildren,
    /// A molecule has a child that is not an atom
    MoleculeChildrenAtomsOnly,
    /// An organism has a child that is neither a molecule nor an atom
    OrganismChildrenMoleculesOrAtoms,
    /// Raw HTML component present
    NoCoreHtml,
}

impl Rule {
    /// Stable rule identifier, as persisted.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AtomNoChildren => "atom_no_children",
            Self::MoleculeChildrenAtomsOnly => "molecule_children_atoms_only",
            Self::OrganismChildrenMoleculesOrAtoms => "organism_children_molecules_or_atoms",
            Self::NoCoreHtml => "no_core_html",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One grammar breach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Always [`Severity::Error`] today
    pub severity: Severity,
    /// Broken rule
    pub rule: Rule,
    /// Human-readable description
    pub message: String,
    /// Component the rule was checked on
    pub block_name: String,
    /// Offending child, for containment rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
}

impl Violation {
    fn error(rule: Rule, message: &str, block_name: &str, child_name: Option<&str>) -> Self {
        Self {
            severity: Severity::Error,
            rule,
            message: message.to_string(),
            block_name: block_name.to_string(),
            child_name: child_name.map(str::to_string),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({}", self.rule, self.message, self.block_name)?;
        if let Some(child) = &self.child_name {
            write!(f, " -> {child}")?;
        }
        write!(f, ")")
    }
}

/// Visitor that accumulates violations during a pre-order walk.
///
/// Raw markup nodes are content, not components, and are ignored.
#[derive(Debug, Default)]
pub struct CompositionValidator {
    violations: Vec<Violation>,
}

impl CompositionValidator {
    /// A validator with no findings yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Findings so far, in traversal order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the validator and return its findings.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    fn check_children(&mut self, node: &ComponentNode, category: Category) {
        let (rule, message, html_message) = match category {
            Category::Composite => (
                Rule::MoleculeChildrenAtomsOnly,
                "Molecule contains a child that is not an atom",
                "Raw HTML inside a molecule",
            ),
            Category::Compound => (
                Rule::OrganismChildrenMoleculesOrAtoms,
                "Organism contains a child that is neither a molecule nor an atom",
                "Raw HTML inside an organism",
            ),
            _ => return,
        };

        for child in node.children.iter().filter(|c| !c.is_raw()) {
            let child_category = Category::of(&child.name);
            if !child_category.allowed_in(category) {
                self.violations
                    .push(Violation::error(rule, message, &node.name, Some(&child.name)));
            }
            if child_category == Category::RawHtml {
                self.violations.push(Violation::error(
                    Rule::NoCoreHtml,
                    html_message,
                    &node.name,
                    Some(&child.name),
                ));
            }
        }
    }
}

impl Visitor for CompositionValidator {
    fn enter(&mut self, node: &ComponentNode, _depth: usize) {
        if node.is_raw() {
            return;
        }

        let category = Category::of(&node.name);

        if category == Category::Atomic && node.children.iter().any(|c| !c.is_raw()) {
            self.violations.push(Violation::error(
                Rule::AtomNoChildren,
                "Atom contains inner components",
                &node.name,
                None,
            ));
        }

        self.check_children(node, category);

        if category == Category::RawHtml {
            self.violations.push(Violation::error(
                Rule::NoCoreHtml,
                "Raw HTML in content",
                &node.name,
                None,
            ));
        }
    }
}

/// Check `nodes` against the composition grammar.
///
/// Every node is visited once, parents before children, and a violation never
/// stops the walk from descending.
pub fn validate_tree(nodes: &[ComponentNode]) -> Vec<Violation> {
    let mut validator = CompositionValidator::new();
    walk(nodes, &mut validator);
    validator.into_violations()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str) -> ComponentNode {
        ComponentNode::new(name)
    }

    fn rules(violations: &[Violation]) -> Vec<Rule> {
        violations.iter().map(|v| v.rule).collect()
    }

    #[test]
    fn test_valid_tree_has_no_violations() {
        let tree = vec![
            node("img2html/organism-hero").with_children([
                node("img2html/molecule-card")
                    .with_children([node("img2html/atom-button"), node("img2html/atom-badge")]),
                node("img2html/atom-link"),
            ]),
            node("core/group").with_children([node("img2html/organism-footer"), node("core/paragraph")]),
            ComponentNode::raw("<p>free text</p>"),
        ];
        assert!(validate_tree(&tree).is_empty());
    }

    #[test]
    fn test_atom_with_children() {
        let tree = vec![node("img2html/atom-button").with_children([node("core/paragraph")])];
        let violations = validate_tree(&tree);
        assert_eq!(rules(&violations), vec![Rule::AtomNoChildren]);
        assert_eq!(violations[0].block_name, "img2html/atom-button");
        assert_eq!(violations[0].child_name, None);
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn test_molecule_with_organism_child_names_both() {
        let tree = vec![node("img2html/molecule-card").with_children([node("img2html/organism-hero")])];
        let violations = validate_tree(&tree);
        assert_eq!(rules(&violations), vec![Rule::MoleculeChildrenAtomsOnly]);
        assert_eq!(violations[0].block_name, "img2html/molecule-card");
        assert_eq!(violations[0].child_name.as_deref(), Some("img2html/organism-hero"));
    }

    #[test]
    fn test_raw_html_child_reported_at_parent_and_node() {
        let tree = vec![node("img2html/molecule-card").with_children([node("core/html")])];
        let violations = validate_tree(&tree);
        assert_eq!(
            rules(&violations),
            vec![Rule::MoleculeChildrenAtomsOnly, Rule::NoCoreHtml, Rule::NoCoreHtml]
        );
        assert_eq!(violations[1].block_name, "img2html/molecule-card");
        assert_eq!(violations[2].block_name, "core/html");

        let tree = vec![node("img2html/organism-hero").with_children([node("core/html")])];
        assert_eq!(
            rules(&validate_tree(&tree)),
            vec![Rule::OrganismChildrenMoleculesOrAtoms, Rule::NoCoreHtml, Rule::NoCoreHtml]
        );
    }

    #[test]
    fn test_raw_html_anywhere() {
        let tree = vec![node("core/columns").with_children([node("core/column").with_children([node("core/html")])])];
        let violations = validate_tree(&tree);
        assert_eq!(rules(&violations), vec![Rule::NoCoreHtml]);
        assert_eq!(violations[0].message, "Raw HTML in content");
    }

    #[test]
    fn test_violations_do_not_prune_and_keep_preorder() {
        let tree = vec![
            node("img2html/organism-hero").with_children([
                node("img2html/organism-nested")
                    .with_children([node("img2html/atom-icon").with_children([node("img2html/atom-x")])]),
            ]),
            node("img2html/molecule-tail").with_children([node("core/image")]),
        ];
        let violations = validate_tree(&tree);
        assert_eq!(
            rules(&violations),
            vec![
                Rule::OrganismChildrenMoleculesOrAtoms,
                Rule::AtomNoChildren,
                Rule::MoleculeChildrenAtomsOnly,
            ]
        );
        assert_eq!(violations[1].block_name, "img2html/atom-icon");
    }

    #[test]
    fn test_violation_serialization() {
        let tree = vec![node("img2html/molecule-card").with_children([node("core/image")])];
        let value = serde_json::to_value(&validate_tree(&tree)[0]).unwrap();
        assert_eq!(value["rule"], "molecule_children_atoms_only");
        assert_eq!(value["severity"], "error");
        assert_eq!(value["blockName"], "img2html/molecule-card");
        assert_eq!(value["childName"], "core/image");
        assert_eq!(
            validate_tree(&tree)[0].to_string(),
            "[molecule_children_atoms_only] Molecule contains a child that is not an atom (img2html/molecule-card -> core/image)"
        );
    }
}
