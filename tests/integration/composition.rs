use blockwright::composition::{Rule, load_report, validate_composition, validate_tree};
use blockwright::store::{JsonFileStore, OptionStore, composition_report_key};
use blockwright::test_utils::{PageFixture, ThemeFixture};
use blockwright::tree::{ComponentNode, parse_document};

/// A tree that follows every nesting rule produces no violations.
#[test]
fn test_well_formed_tree_is_clean() {
    let tree = vec![
        ComponentNode::new("img2html/organism-hero").with_children([
            ComponentNode::new("img2html/molecule-card").with_children([
                ComponentNode::new("img2html/atom-badge"),
                ComponentNode::new("img2html/atom-button"),
            ]),
            ComponentNode::new("img2html/atom-paragraph"),
        ]),
        ComponentNode::new("core/group").with_children([ComponentNode::new("img2html/organism-footer")]),
        ComponentNode::new("img2html/molecule-empty"),
    ];

    assert!(validate_tree(&tree).is_empty());
}

/// An organism inside a molecule is reported with both identifiers.
#[test]
fn test_compound_inside_composite_reported() {
    let content = PageFixture::wrapped(
        "img2html/molecule-card",
        "img2html-card",
        &PageFixture::void("img2html/organism-hero"),
    );
    let violations = validate_tree(&parse_document(&content).unwrap());

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, Rule::MoleculeChildrenAtomsOnly);
    assert_eq!(violations[0].block_name, "img2html/molecule-card");
    assert_eq!(violations[0].child_name.as_deref(), Some("img2html/organism-hero"));
}

/// Violations keep coming after the first one, in document order.
#[test]
fn test_every_breach_reported_in_order() {
    let content = PageFixture::page(&[
        PageFixture::wrapped("img2html/atom-button", "b", &PageFixture::void("img2html/atom-icon")),
        PageFixture::wrapped(
            "img2html/organism-hero",
            "h",
            &PageFixture::wrapped("core/group", "g", &PageFixture::void("core/html")),
        ),
    ]);
    let violations = validate_tree(&parse_document(&content).unwrap());
    let rules: Vec<Rule> = violations.iter().map(|v| v.rule).collect();

    assert_eq!(
        rules,
        vec![
            Rule::AtomNoChildren,
            Rule::OrganismChildrenMoleculesOrAtoms,
            Rule::NoCoreHtml,
        ]
    );
}

/// Validating a page persists its report under the page key, replacing the previous one.
#[test]
fn test_report_persisted_and_overwritten() {
    let theme = ThemeFixture::new().unwrap();
    let store = JsonFileStore::new(theme.path(".blockwright"));

    let bad = PageFixture::wrapped("img2html/molecule-card", "c", &PageFixture::void("core/html"));
    let report = validate_composition("42", &bad, &store);
    assert!(!report.ok);
    assert_eq!(report.count, 3);

    let stored = load_report(&store, "42").unwrap().unwrap();
    assert_eq!(stored.count, 3);
    assert_eq!(stored.violations[0].rule, Rule::MoleculeChildrenAtomsOnly);
    assert_eq!(stored.violations[1].rule, Rule::NoCoreHtml);
    assert_eq!(stored.violations[2].child_name, None);

    let good = PageFixture::void("img2html/atom-button");
    validate_composition("42", &good, &store);
    let stored = load_report(&store, "42").unwrap().unwrap();
    assert!(stored.ok);
    assert!(stored.violations.is_empty());

    let raw = store.get(&composition_report_key("42")).unwrap().unwrap();
    assert_eq!(raw["pageId"], "42");
    assert_eq!(raw["ok"], true);
}

/// Content that does not parse is a clean page, not an error.
#[test]
fn test_unparseable_page_is_clean() {
    let theme = ThemeFixture::new().unwrap();
    let store = JsonFileStore::new(theme.path(".blockwright"));

    let report = validate_composition("7", "<!-- wp:img2html/molecule-card -->", &store);
    assert!(report.ok);
    assert_eq!(report.count, 0);
}

/// Nested page ids and look-alike flat ids keep separate reports.
#[test]
fn test_nested_page_ids_do_not_collide() {
    let theme = ThemeFixture::new().unwrap();
    let store = JsonFileStore::new(theme.path(".blockwright"));

    let bad = PageFixture::wrapped("img2html/molecule-card", "c", &PageFixture::void("core/html"));
    validate_composition("blog/first", &bad, &store);
    validate_composition("blog__first", &PageFixture::void("img2html/atom-button"), &store);

    let nested = load_report(&store, "blog/first").unwrap().unwrap();
    assert_eq!(nested.page_id, "blog/first");
    assert!(!nested.ok);
    assert!(nested.count > 0);

    let flat = load_report(&store, "blog__first").unwrap().unwrap();
    assert_eq!(flat.page_id, "blog__first");
    assert!(flat.ok);
}
