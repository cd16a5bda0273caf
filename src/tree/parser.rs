//! Block-markup parser.
//!
//! Stored pages use comment-delimited block markup:
//!
//! ```text
//! <!-- wp:img2html/organism-hero {"className":"img2html-hero"} -->
//! <section class="img2html-hero">
//!   <!-- wp:img2html/atom-button {"label":"Go"} /-->
//! </section>
//! <!-- /wp:img2html/organism-hero -->
//! ```
//!
//! - Openers are `<!-- wp:NAME [JSON] -->`, closers `<!-- /wp:NAME -->`, and
//!   self-closing blocks `<!-- wp:NAME [JSON] /-->`
//! - A name without a namespace belongs to `core/` (`wp:group` is `core/group`)
//! - Attribute JSON, when present, must be an object
//! - Markup between top-level blocks becomes a raw node unless it is only whitespace;
//!   markup inside a block is that block's own HTML and produces no node
//! - Ordinary HTML comments are plain markup
//!
//! Parsing is strict: unbalanced delimiters and bad attribute JSON are reported as
//! [`BlockwrightError::MarkupParseError`]. Callers in the engine turn that error
//! into an empty tree.

use crate::core::BlockwrightError;
use crate::tree::ComponentNode;
use serde_json::{Map, Value};
use tracing::trace;

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";
const CORE_NAMESPACE: &str = "core/";

/// A block delimiter found in the content.
#[derive(Debug)]
enum Delimiter {
    Opener {
        name: String,
        attributes: Map<String, Value>,
        void: bool,
    },
    Closer {
        name: String,
    },
}

/// A block whose closer has not been seen yet.
struct OpenBlock {
    node: ComponentNode,
    start: usize,
}

/// Parse stored page content into its top-level component nodes.
///
/// # Errors
///
/// Returns [`BlockwrightError::MarkupParseError`] when a closer does not match the
/// innermost open block, a block is never closed, or attribute JSON is invalid.
pub fn parse_document(content: &str) -> Result<Vec<ComponentNode>, BlockwrightError> {
    let mut roots: Vec<ComponentNode> = Vec::new();
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut cursor = 0;
    let mut search_from = 0;

    while let Some(found) = content[search_from..].find(COMMENT_OPEN) {
        let start = search_from + found;
        let Some(close) = content[start..].find(COMMENT_CLOSE) else {
            break;
        };
        let end = start + close + COMMENT_CLOSE.len();
        let body = &content[start + COMMENT_OPEN.len()..start + close];

        let Some(delimiter) = parse_delimiter(body, start)? else {
            // An ordinary HTML comment; keep scanning after it
            search_from = end;
            continue;
        };

        if stack.is_empty() {
            push_raw(&mut roots, content, cursor..start);
        }

        match delimiter {
            Delimiter::Opener {
                name,
                attributes,
                void: true,
            } => {
                trace!("void block {} at {}", name, start);
                let node = ComponentNode {
                    name,
                    attributes,
                    span: Some(start..end),
                    ..ComponentNode::default()
                };
                attach(&mut stack, &mut roots, node);
            }
            Delimiter::Opener {
                name, attributes, ..
            } => {
                trace!("open block {} at {}", name, start);
                stack.push(OpenBlock {
                    node: ComponentNode {
                        name,
                        attributes,
                        ..ComponentNode::default()
                    },
                    start,
                });
            }
            Delimiter::Closer { name } => {
                let Some(mut open) = stack.pop() else {
                    return Err(BlockwrightError::MarkupParseError {
                        offset: start,
                        reason: format!("closer for '{name}' without a matching opener"),
                    });
                };
                if open.node.name != name {
                    return Err(BlockwrightError::MarkupParseError {
                        offset: start,
                        reason: format!(
                            "closer for '{name}' does not match open block '{}'",
                            open.node.name
                        ),
                    });
                }
                open.node.span = Some(open.start..end);
                attach(&mut stack, &mut roots, open.node);
            }
        }

        cursor = end;
        search_from = end;
    }

    if let Some(open) = stack.last() {
        return Err(BlockwrightError::MarkupParseError {
            offset: open.start,
            reason: format!("block '{}' is never closed", open.node.name),
        });
    }

    push_raw(&mut roots, content, cursor..content.len());
    Ok(roots)
}

/// Fast check whether `content` contains at least one instance of component `name`.
///
/// Only block openers are considered; the tree is not parsed. `core/` components
/// are matched in both their short (`wp:group`) and qualified (`wp:core/group`) forms.
pub fn document_mentions(content: &str, name: &str) -> bool {
    let mentions = |serialized: &str| {
        // An opener is followed by whitespace before attributes or the comment end
        content.contains(&format!("<!-- wp:{serialized} "))
    };

    match name.strip_prefix(CORE_NAMESPACE) {
        Some(short) => mentions(short) || mentions(name),
        None => mentions(name),
    }
}

fn attach(stack: &mut [OpenBlock], roots: &mut Vec<ComponentNode>, node: ComponentNode) {
    match stack.last_mut() {
        Some(parent) => parent.node.children.push(node),
        None => roots.push(node),
    }
}

fn push_raw(roots: &mut Vec<ComponentNode>, content: &str, range: std::ops::Range<usize>) {
    let text = &content[range.clone()];
    if !text.trim().is_empty() {
        let mut node = ComponentNode::raw(text);
        node.span = Some(range);
        roots.push(node);
    }
}

/// Interpret the inside of an HTML comment. `Ok(None)` means it is not a block delimiter.
fn parse_delimiter(body: &str, offset: usize) -> Result<Option<Delimiter>, BlockwrightError> {
    let trimmed = body.trim();

    let (is_closer, rest) = if let Some(rest) = trimmed.strip_prefix("/wp:") {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix("wp:") {
        (false, rest)
    } else {
        return Ok(None);
    };

    let (rest, void) = match rest.strip_suffix('/') {
        Some(stripped) if !is_closer => (stripped.trim_end(), true),
        _ => (rest, false),
    };

    let (raw_name, raw_attrs) = match rest.find(char::is_whitespace) {
        Some(split) => (&rest[..split], rest[split..].trim()),
        None => (rest, ""),
    };

    if !is_valid_name(raw_name) {
        // Not something the block grammar would produce, e.g. `<!-- wp:Foo -->`
        return Ok(None);
    }
    let name = qualify(raw_name);

    if is_closer {
        return Ok(Some(Delimiter::Closer { name }));
    }

    let attributes = if raw_attrs.is_empty() {
        Map::new()
    } else {
        match serde_json::from_str::<Value>(raw_attrs) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(BlockwrightError::MarkupParseError {
                    offset,
                    reason: format!("attributes of '{name}' must be an object, got {other}"),
                });
            }
            Err(e) => {
                return Err(BlockwrightError::MarkupParseError {
                    offset,
                    reason: format!("invalid attributes for '{name}': {e}"),
                });
            }
        }
    };

    Ok(Some(Delimiter::Opener {
        name,
        attributes,
        void,
    }))
}

fn qualify(name: &str) -> String {
    if name.contains('/') { name.to_string() } else { format!("{CORE_NAMESPACE}{name}") }
}

fn is_valid_name(name: &str) -> bool {
    let segment_ok = |segment: &str| {
        let mut chars = segment.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    };

    match name.split_once('/') {
        Some((namespace, kind)) => segment_ok(namespace) && segment_ok(kind),
        None => segment_ok(name),
    }
}
