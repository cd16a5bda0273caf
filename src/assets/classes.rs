//! Class-name sniffing for shared-component bases.

use regex::Regex;
use std::sync::LazyLock;

static CLASS_ATTR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"class\s*=\s*(?:"([^"]*)"|'([^']*)')"#).ok());

/// Class tokens that start with one of `prefixes` followed by `-`, from the
/// component's own class attribute and every `class` attribute in `markup`.
///
/// Tokens keep their first-seen order and appear once.
pub fn candidate_classes(class_attr: Option<&str>, markup: &str, prefixes: &[&str]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut push = |token: &str| {
        let matches = prefixes.iter().any(|prefix| {
            token
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('-'))
        });
        if matches && !found.iter().any(|seen| seen == token) {
            found.push(token.to_string());
        }
    };

    if let Some(attr) = class_attr {
        attr.split_whitespace().for_each(&mut push);
    }

    if let Some(re) = CLASS_ATTR.as_ref() {
        for caps in re.captures_iter(markup) {
            if let Some(value) = caps.get(1).or_else(|| caps.get(2)) {
                value.as_str().split_whitespace().for_each(&mut push);
            }
        }
    }

    found
}

/// The class stem with any BEM element (`__x`) or modifier (`--x`) suffix removed.
///
/// ```rust
/// use blockwright::assets::classes::component_base;
///
/// assert_eq!(component_base("img2html-card__title"), "img2html-card");
/// assert_eq!(component_base("img2html-button--primary"), "img2html-button");
/// assert_eq!(component_base("img2html-hero"), "img2html-hero");
/// ```
pub fn component_base(class: &str) -> &str {
    let cut = [class.find("__"), class.find("--")].into_iter().flatten().min();
    match cut {
        Some(index) => &class[..index],
        None => class,
    }
}
