//! Structural signatures and their frequency counts.
//!
//! Two kinds of signature identify a structural idiom:
//!
//! - `seq:a|b|c`: consecutive root-level components of a page
//! - `grp:container:a|b`: a container component and its direct children
//!
//! Raw markup nodes never contribute a name.

use crate::tree::ComponentNode;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

const SEQUENCE_TAG: &str = "seq";
const GROUP_TAG: &str = "grp";
const MAX_SLUG_LEN: usize = 120;

/// Which kind of idiom a signature describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureKind {
    /// Run of sibling components at the page root
    Sequence,
    /// Container plus its children
    Group,
}

impl SignatureKind {
    /// Tag prefix used in signature strings.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Sequence => SEQUENCE_TAG,
            Self::Group => GROUP_TAG,
        }
    }

    /// Kind of a signature string, from its tag.
    pub fn of(signature: &str) -> Option<Self> {
        match signature.split_once(':')?.0 {
            SEQUENCE_TAG => Some(Self::Sequence),
            GROUP_TAG => Some(Self::Group),
            _ => None,
        }
    }
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// `seq:` signature of a run of components.
pub fn sequence_signature(nodes: &[&ComponentNode]) -> String {
    let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
    format!("{SEQUENCE_TAG}:{}", names.join("|"))
}

/// `grp:` signature of a container and its typed children.
pub fn group_signature(container: &ComponentNode) -> String {
    format!("{GROUP_TAG}:{}:{}", container.name, container.child_names().join("|"))
}

/// File-system safe identifier for a signature: `auto-<kind>-<names>`.
///
/// Component names are joined with `--` and their `/` becomes `-`, so
/// `seq:core/a|core/b` reads `auto-seq-core-a--core-b`. When a name has
/// characters that would be dropped or folded, or the slug is too long, the
/// readable part is suffixed with a hash of the full signature so distinct
/// signatures never share a slug.
pub fn slug_for(signature: &str) -> String {
    let (tag, body) = signature.split_once(':').unwrap_or(("", signature));
    let parts: Vec<&str> = body.split(['|', ':']).filter(|part| !part.is_empty()).collect();

    let rendered: Vec<String> = parts.iter().map(|part| slug_part(part)).collect();
    let slug = format!("auto-{}-{}", slug_part(tag), rendered.join("--"));
    let slug = slug.trim_end_matches('-');

    if slug.len() <= MAX_SLUG_LEN && is_clean(signature, body, &parts) {
        return slug.to_string();
    }
    let digest = hex::encode(Sha256::digest(signature.as_bytes()));
    let keep = slug.len().min(MAX_SLUG_LEN - 10);
    format!("{}--{}", slug[..keep].trim_end_matches('-'), &digest[..8])
}

fn slug_part(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            '/' => Some('-'),
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            '_' | '-' => Some(c),
            _ => None,
        })
        .collect()
}

/// Whether the readable slug alone identifies the signature.
fn is_clean(signature: &str, body: &str, parts: &[&str]) -> bool {
    let word = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
    let name = |part: &str| match part.split_once('/') {
        Some((namespace, kind)) => word(namespace) && kind.split('-').all(word),
        None => false,
    };
    let rebuilt = match SignatureKind::of(signature) {
        Some(SignatureKind::Sequence) => parts.join("|"),
        Some(SignatureKind::Group) => match parts.split_first() {
            Some((container, children)) => format!("{container}:{}", children.join("|")),
            None => return false,
        },
        None => return false,
    };
    rebuilt == body && parts.iter().all(|part| name(part))
}

/// Display title for a signature: component names as capitalized words.
///
/// ```rust
/// use blockwright::mining::signature::title_for;
///
/// assert_eq!(
///     title_for("seq:img2html/organism-hero|core/columns"),
///     "Img2html Organism Hero Columns"
/// );
/// ```
pub fn title_for(signature: &str) -> String {
    let body = signature.split_once(':').map_or(signature, |(_, rest)| rest);
    body.split(['|', ':'])
        .filter(|name| !name.is_empty())
        .map(|name| name.strip_prefix("core/").unwrap_or(name))
        .flat_map(|name| name.split(['/', '-', '_']))
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Occurrences of one signature plus the first sample seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureEntry {
    /// Times the signature occurred
    pub count: usize,
    /// Verbatim markup of the first occurrence
    pub sample: Option<String>,
}

/// Frequency table of one signature kind, built fresh for every mining run.
#[derive(Debug, Clone, Default)]
pub struct SignatureCounts {
    entries: BTreeMap<String, SignatureEntry>,
}

impl SignatureCounts {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `signature`.
    ///
    /// `sample` is only evaluated the first time a signature is seen; later
    /// occurrences never replace it.
    pub fn record(&mut self, signature: String, sample: impl FnOnce() -> Option<String>) {
        self.entries
            .entry(signature)
            .and_modify(|entry| entry.count += 1)
            .or_insert_with(|| SignatureEntry {
                count: 1,
                sample: sample(),
            });
    }

    /// Entry for `signature`.
    pub fn get(&self, signature: &str) -> Option<&SignatureEntry> {
        self.entries.get(signature)
    }

    /// Occurrence count of `signature`, zero when never seen.
    pub fn count(&self, signature: &str) -> usize {
        self.get(signature).map_or(0, |entry| entry.count)
    }

    /// Number of distinct signatures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Signatures ordered by count descending, then signature ascending.
    pub fn ranked(&self) -> Vec<(&str, &SignatureEntry)> {
        let mut ranked: Vec<(&str, &SignatureEntry)> =
            self.entries.iter().map(|(sig, entry)| (sig.as_str(), entry)).collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
