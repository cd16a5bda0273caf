use blockwright::assets::{
    AssetKind, AssetOrigin, AssetResolver, EnqueuedAssetSet, ResolverSettings, StoredMarkupRenderer, ThemeFiles,
};
use blockwright::config::EngineConfig;
use blockwright::manifest::ComponentManifest;
use blockwright::test_utils::{PageFixture, ThemeFixture, init_test_logging};
use blockwright::tree::{ComponentNode, parse_document};

const THEME_URI: &str = "https://example.test/theme";

fn resolver_for(theme: &ThemeFixture, config: &EngineConfig) -> AssetResolver {
    AssetResolver::new(ThemeFiles::new(theme.root(), THEME_URI), ResolverSettings::from(config))
}

fn manifest_for(theme: &ThemeFixture) -> Option<ComponentManifest> {
    ComponentManifest::load_optional(&theme.path("blocks-manifest.json"))
}

/// A class used many times across a page loads its shared stylesheet and script once.
#[test]
fn test_shared_component_loaded_once_per_request() {
    init_test_logging(None);
    let theme = ThemeFixture::new().unwrap();
    theme.manifest("{}").unwrap();
    theme.write("assets/components/img2html-badge.css", ".b{}").unwrap();
    theme.write("assets/components/img2html-badge.js", "").unwrap();

    let badge = PageFixture::wrapped("core/paragraph", "img2html-badge img2html-badge--large", "New");
    let page = PageFixture::page(&[badge.clone(), badge.clone(), PageFixture::wrapped("core/group", "x", &badge)]);
    let nodes = parse_document(&page).unwrap();

    let config = EngineConfig::default();
    let resolver = resolver_for(&theme, &config);
    let manifest = manifest_for(&theme);
    let mut enqueued = EnqueuedAssetSet::new();
    let instructions =
        resolver.resolve_page(&nodes, manifest.as_ref(), &StoredMarkupRenderer::new(&page), &mut enqueued);

    assert_eq!(instructions.len(), 2);
    assert_eq!(instructions[0].kind, AssetKind::Style);
    assert_eq!(instructions[0].uri, format!("{THEME_URI}/assets/components/img2html-badge.css"));
    assert_eq!(instructions[1].kind, AssetKind::Script);
    assert!(instructions[1].in_footer);
    assert_eq!(enqueued.base_count(), 1);

    // A second render in the same request adds nothing
    let again =
        resolver.resolve_page(&nodes, manifest.as_ref(), &StoredMarkupRenderer::new(&page), &mut enqueued);
    assert!(again.is_empty());

    // A new request starts over
    enqueued.reset();
    let fresh =
        resolver.resolve_page(&nodes, manifest.as_ref(), &StoredMarkupRenderer::new(&page), &mut enqueued);
    assert_eq!(fresh.len(), 2);
}

/// A re-prefixed class falls back to the file shipped under the default prefix.
#[test]
fn test_fallback_prefix_resolution() {
    let theme = ThemeFixture::new().unwrap();
    theme.manifest("{}").unwrap();
    theme.write("assets/components/img2html-card.css", ".card{}").unwrap();

    let config = EngineConfig {
        naming_prefix: "customprefix".to_string(),
        ..EngineConfig::default()
    };
    let resolver = resolver_for(&theme, &config);
    let node = ComponentNode::new("core/group").with_attr("className", "customprefix-card");
    let mut enqueued = EnqueuedAssetSet::new();

    let instructions = resolver.resolve_on_render("<div></div>", &node, manifest_for(&theme).as_ref(), &mut enqueued);

    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].path, "assets/components/img2html-card.css");
    assert_eq!(
        instructions[0].origin,
        AssetOrigin::SharedComponent {
            base: "customprefix-card".to_string()
        }
    );
}

/// A newer minified sibling wins and its modification time is the version.
#[test]
fn test_minified_sibling_preferred() {
    let theme = ThemeFixture::new().unwrap();
    theme.manifest("{}").unwrap();
    theme.write_with_mtime("assets/components/img2html-card.css", ".card { }", 1_000).unwrap();
    theme.write_with_mtime("assets/components/img2html-card.min.css", ".card{}", 2_000).unwrap();

    let resolver = resolver_for(&theme, &EngineConfig::default());
    let node = ComponentNode::new("core/group");
    let mut enqueued = EnqueuedAssetSet::new();
    let instructions = resolver.resolve_on_render(
        r#"<div class="img2html-card__body"></div>"#,
        &node,
        manifest_for(&theme).as_ref(),
        &mut enqueued,
    );

    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].uri, format!("{THEME_URI}/assets/components/img2html-card.min.css"));
    assert_eq!(instructions[0].version, "2000");
}

/// Manifest assets load for the component that declares them, with its hints and deps.
#[test]
fn test_manifest_entry_on_render() {
    let theme = ThemeFixture::new().unwrap();
    theme
        .manifest(
            r#"{
                "img2html/molecule-card": {
                    "style": ["blocks/card/style.css"],
                    "script": "blocks/card/view.js",
                    "deps_script": ["wp-dom-ready"],
                    "version": "1.2.0",
                    "defer": true
                }
            }"#,
        )
        .unwrap();
    theme.write("blocks/card/style.css", "").unwrap();
    theme.write("blocks/card/view.js", "").unwrap();

    let resolver = resolver_for(&theme, &EngineConfig::default());
    let manifest = manifest_for(&theme);
    let node = ComponentNode::new("img2html/molecule-card").with_attr("className", "img2html-card");
    let mut enqueued = EnqueuedAssetSet::new();
    let instructions = resolver.resolve_on_render("", &node, manifest.as_ref(), &mut enqueued);

    // img2html-card is covered by the card's own stylesheet
    assert_eq!(instructions.len(), 2);
    let script = &instructions[1];
    assert_eq!(script.kind, AssetKind::Script);
    assert_eq!(script.deps, vec!["wp-dom-ready".to_string()]);
    assert_eq!(script.version, "1.2.0");
    assert!(script.load_deferred);
    assert!(!script.load_async);
    assert!(!instructions[0].load_deferred);
}

/// The editor gets every manifest entry plus every shared component file.
#[test]
fn test_editor_context_loads_everything() {
    let theme = ThemeFixture::new().unwrap();
    theme.manifest(r#"{"img2html/atom-button": {"style": "blocks/button.css"}}"#).unwrap();
    theme.write("blocks/button.css", "").unwrap();
    theme.write("assets/components/img2html-card.css", "").unwrap();
    theme.write("assets/components/img2html-card.min.css", "").unwrap();
    theme.write("assets/components/img2html-grid.js", "").unwrap();

    let resolver = resolver_for(&theme, &EngineConfig::default());
    let instructions = resolver.resolve_for_editor_context(manifest_for(&theme).as_ref());

    let paths: Vec<&str> = instructions.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(paths.len(), 3);
    assert_eq!(paths[0], "blocks/button.css");
    assert!(paths.contains(&"assets/components/img2html-grid.js"));
    assert!(paths.iter().any(|p| p.starts_with("assets/components/img2html-card")));
}

/// Only components mentioned in the document are resolved.
#[test]
fn test_document_context_filters_by_mention() {
    let theme = ThemeFixture::new().unwrap();
    theme
        .manifest(
            r#"{
                "img2html/atom-button": {"style": "blocks/button.css"},
                "img2html/organism-hero": {"style": "blocks/hero.css"}
            }"#,
        )
        .unwrap();
    theme.write("blocks/button.css", "").unwrap();
    theme.write("blocks/hero.css", "").unwrap();

    let resolver = resolver_for(&theme, &EngineConfig::default());
    let document = PageFixture::void("img2html/organism-hero");
    let instructions = resolver.resolve_for_document_context(manifest_for(&theme).as_ref(), &document);

    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].path, "blocks/hero.css");
}

/// A manifest that is not a mapping turns every context into a no-op.
#[test]
fn test_malformed_manifest_is_noop() {
    let theme = ThemeFixture::new().unwrap();
    theme.manifest(r#"["not", "a", "mapping"]"#).unwrap();
    theme.write("assets/components/img2html-card.css", "").unwrap();

    let resolver = resolver_for(&theme, &EngineConfig::default());
    let manifest = manifest_for(&theme);
    assert!(manifest.is_none());

    let node = ComponentNode::new("core/group").with_attr("className", "img2html-card");
    let mut enqueued = EnqueuedAssetSet::new();
    assert!(resolver.resolve_for_editor_context(manifest.as_ref()).is_empty());
    assert!(resolver.resolve_for_document_context(manifest.as_ref(), "").is_empty());
    assert!(resolver.resolve_on_render("", &node, manifest.as_ref(), &mut enqueued).is_empty());
}
