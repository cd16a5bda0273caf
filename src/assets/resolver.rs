//! The asset resolver: manifest lookups, class sniffing and the per-request dedup.

use super::classes::{candidate_classes, component_base};
use super::lookup::{BaseLookup, ConventionLookup, FallbackPrefixLookup, is_minified, prefer_minified};
use super::render::{ComponentRenderer, RenderPass};
use super::source::{AssetSource, ThemeFiles};
use super::{AssetKind, AssetOrigin, EnqueuedAssetSet, LoadInstruction, asset_handle};
use crate::config::EngineConfig;
use crate::manifest::{ComponentManifest, ManifestEntry};
use crate::tree::{ComponentNode, document_mentions, walk};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Naming and layout settings the resolver needs from the engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Shared components directory, relative to the theme root
    pub components_dir: String,
    /// Active class-name prefix
    pub naming_prefix: String,
    /// Prefix the shared files ship under; also used for handles
    pub default_prefix: String,
    /// Component identifier → class prefixes never resolved as shared components
    /// while rendering that component
    pub skip_bases: BTreeMap<String, Vec<String>>,
}

impl From<&EngineConfig> for ResolverSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            components_dir: config.components_dir.trim_end_matches('/').to_string(),
            naming_prefix: config.naming_prefix.clone(),
            default_prefix: config.default_prefix.clone(),
            skip_bases: config.skip_bases.clone(),
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

/// Decides which stylesheets and scripts a rendering context needs.
///
/// The resolver itself is immutable; all request-scoped state lives in the
/// [`EnqueuedAssetSet`] passed to the render-time operations.
pub struct AssetResolver<S: AssetSource = ThemeFiles> {
    source: S,
    settings: ResolverSettings,
    lookups: Vec<Box<dyn BaseLookup>>,
}

impl<S: AssetSource> AssetResolver<S> {
    /// A resolver with the standard lookup chain: convention, then fallback prefix.
    pub fn new(source: S, settings: ResolverSettings) -> Self {
        let lookups: Vec<Box<dyn BaseLookup>> = vec![
            Box::new(ConventionLookup::new(settings.components_dir.clone())),
            Box::new(FallbackPrefixLookup::new(
                settings.components_dir.clone(),
                settings.default_prefix.clone(),
            )),
        ];
        Self {
            source,
            settings,
            lookups,
        }
    }

    /// Replace the lookup chain used for shared-component bases.
    #[must_use]
    pub fn with_lookups(mut self, lookups: Vec<Box<dyn BaseLookup>>) -> Self {
        self.lookups = lookups;
        self
    }

    /// The asset source files are resolved against.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Active settings.
    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Everything the editor may need: every manifest entry plus every file in
    /// the shared components directory. No content is inspected.
    pub fn resolve_for_editor_context(&self, manifest: Option<&ComponentManifest>) -> Vec<LoadInstruction> {
        let Some(manifest) = manifest else {
            debug!("No component manifest, skipping editor assets");
            return Vec::new();
        };

        let mut instructions: Vec<LoadInstruction> = manifest
            .iter()
            .flat_map(|(component, entry)| self.manifest_instructions(component, entry))
            .collect();

        for kind in [AssetKind::Style, AssetKind::Script] {
            for rel in self.source.list(&self.settings.components_dir, kind.extension()) {
                if is_minified(&rel, kind) {
                    continue;
                }
                let base = file_stem(&rel, kind).to_string();
                if let Some(instruction) = self.shared_instruction(&base, &rel, kind) {
                    instructions.push(instruction);
                }
            }
        }

        debug!("Editor context resolved {} assets", instructions.len());
        instructions
    }

    /// Manifest assets of the components `document` mentions.
    pub fn resolve_for_document_context(
        &self,
        manifest: Option<&ComponentManifest>,
        document: &str,
    ) -> Vec<LoadInstruction> {
        let Some(manifest) = manifest else {
            debug!("No component manifest, skipping document assets");
            return Vec::new();
        };

        let instructions: Vec<LoadInstruction> = manifest
            .iter()
            .filter(|(component, _)| document_mentions(document, component))
            .flat_map(|(component, entry)| self.manifest_instructions(component, entry))
            .collect();

        debug!("Document context resolved {} assets", instructions.len());
        instructions
    }

    /// Assets for one rendered component instance.
    ///
    /// Call once per instance in render order, with the same `enqueued` set for
    /// the whole request. Returns only instructions not emitted earlier in the
    /// request.
    pub fn resolve_on_render(
        &self,
        rendered: &str,
        node: &ComponentNode,
        manifest: Option<&ComponentManifest>,
        enqueued: &mut EnqueuedAssetSet,
    ) -> Vec<LoadInstruction> {
        let Some(manifest) = manifest else {
            return Vec::new();
        };

        let mut instructions = Vec::new();

        if !node.is_raw()
            && let Some(entry) = manifest.get(&node.name)
        {
            for instruction in self.manifest_instructions(&node.name, entry) {
                if enqueued.claim_handle(&instruction.handle) {
                    instructions.push(instruction);
                }
            }
        }

        let prefixes = [self.settings.naming_prefix.as_str(), self.settings.default_prefix.as_str()];
        let skip = self.settings.skip_bases.get(&node.name);

        for class in candidate_classes(node.class_name(), rendered, &prefixes) {
            if skip.is_some_and(|bases| bases.iter().any(|b| class.starts_with(b.as_str()))) {
                trace!("{} covers {} itself", node.name, class);
                continue;
            }

            let base = component_base(&class);
            if enqueued.contains_base(base) {
                continue;
            }

            for kind in [AssetKind::Style, AssetKind::Script] {
                if let Some(instruction) = self.resolve_shared(base, kind)
                    && enqueued.claim_handle(&instruction.handle)
                {
                    instructions.push(instruction);
                }
            }
            enqueued.mark_base(base);
        }

        if !instructions.is_empty() {
            debug!(
                "Render of {} enqueued {} assets",
                if node.is_raw() { "<raw>" } else { node.name.as_str() },
                instructions.len()
            );
        }
        instructions
    }

    /// Simulate one render cycle over a parsed page.
    ///
    /// Nodes are rendered depth-first with children before their parent, and
    /// [`resolve_on_render`](Self::resolve_on_render) is invoked for each
    /// instance with the markup `renderer` produces for it.
    pub fn resolve_page(
        &self,
        nodes: &[ComponentNode],
        manifest: Option<&ComponentManifest>,
        renderer: &dyn ComponentRenderer,
        enqueued: &mut EnqueuedAssetSet,
    ) -> Vec<LoadInstruction> {
        if manifest.is_none() {
            return Vec::new();
        }

        let mut pass = RenderPass::new(|node: &ComponentNode| {
            let rendered = renderer.render(node);
            self.resolve_on_render(&rendered, node, manifest, enqueued)
        });
        walk(nodes, &mut pass);
        pass.into_instructions()
    }

    fn resolve_shared(&self, base: &str, kind: AssetKind) -> Option<LoadInstruction> {
        for lookup in &self.lookups {
            let Some(candidate) = lookup.candidate(base, kind) else {
                continue;
            };
            if let Some(instruction) = self.shared_instruction(base, &candidate, kind) {
                trace!("{} {} resolved by {} lookup", base, kind, lookup.name());
                return Some(instruction);
            }
        }
        trace!("No {} for shared component {}", kind, base);
        None
    }

    fn shared_instruction(&self, base: &str, rel: &str, kind: AssetKind) -> Option<LoadInstruction> {
        let (path, mtime) = prefer_minified(&self.source, rel, kind)?;
        Some(LoadInstruction {
            kind,
            handle: asset_handle(&self.settings.default_prefix, "component", base, &path),
            uri: self.source.uri(&path),
            path,
            deps: Vec::new(),
            version: mtime.to_string(),
            in_footer: kind == AssetKind::Script,
            load_async: false,
            load_deferred: false,
            origin: AssetOrigin::SharedComponent {
                base: base.to_string(),
            },
        })
    }

    fn manifest_instructions(&self, component: &str, entry: &ManifestEntry) -> Vec<LoadInstruction> {
        let declared = entry
            .style
            .iter()
            .map(|rel| (AssetKind::Style, rel))
            .chain(entry.script.iter().map(|rel| (AssetKind::Script, rel)));

        declared
            .filter_map(|(kind, rel)| {
                let Some((path, mtime)) = prefer_minified(&self.source, rel, kind) else {
                    trace!("Declared asset {} of {} not found", rel, component);
                    return None;
                };
                let is_script = kind == AssetKind::Script;
                Some(LoadInstruction {
                    kind,
                    handle: asset_handle(&self.settings.default_prefix, "block", component, &path),
                    uri: self.source.uri(&path),
                    deps: if is_script {
                        entry.deps_script.clone()
                    } else {
                        entry.deps_style.clone()
                    },
                    version: entry.version.clone().unwrap_or_else(|| mtime.to_string()),
                    in_footer: is_script,
                    load_async: is_script && entry.load_async,
                    load_deferred: is_script && entry.load_deferred,
                    origin: AssetOrigin::Manifest {
                        component: component.to_string(),
                    },
                    path,
                })
            })
            .collect()
    }
}

fn file_stem(rel: &str, kind: AssetKind) -> &str {
    let name = rel.rsplit('/').next().unwrap_or(rel);
    name.strip_suffix(&format!(".{}", kind.extension())).unwrap_or(name)
}
