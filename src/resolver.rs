use crate::config::MergeConfig;
use crate::groups::{self, GroupMatch};
use std::collections::HashSet;

/// Resolves conflicts between utility classes.
///
/// Receives the ordered token sequence produced by normalization and returns a
/// single space-joined class string. Within a conflict group only the last
/// class survives; classes the resolver does not recognize pass through.
///
/// Any `Fn(&[String]) -> String + Send + Sync` closure is a resolver, which
/// lets callers plug in an external implementation.
pub trait ConflictResolver: Send + Sync {
    fn merge(&self, tokens: &[String]) -> String;
}

impl<F> ConflictResolver for F
where
    F: Fn(&[String]) -> String + Send + Sync,
{
    fn merge(&self, tokens: &[String]) -> String {
        self(tokens)
    }
}

/// Outcome of a merge: surviving classes and the classes they overrode, both
/// in their original relative order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub kept: Vec<String>,
    pub overridden: Vec<String>,
}

impl Resolution {
    /// The surviving classes joined by single spaces
    pub fn merged(&self) -> String {
        self.kept.join(" ")
    }
}

/// Default resolver for Tailwind utility classes
#[derive(Debug, Clone, Default)]
pub struct TailwindMerger {
    config: MergeConfig,
}

/// A class split into its conflict-relevant parts
struct ParsedClass<'a> {
    variants: Vec<&'a str>,
    important: bool,
    base: &'a str,
}

impl TailwindMerger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Resolve conflicts, reporting which classes were overridden.
    ///
    /// Tokens may contain several whitespace-separated classes.
    pub fn resolve(&self, tokens: &[String]) -> Resolution {
        let classes: Vec<&str> = tokens.iter().flat_map(|t| t.split_whitespace()).collect();

        if !self.config.enabled {
            return Resolution {
                kept: classes.iter().map(|c| c.to_string()).collect(),
                overridden: Vec::new(),
            };
        }

        let mut claimed: HashSet<String> = HashSet::new();
        let mut seen_unknown: HashSet<&str> = HashSet::new();
        let mut keep = vec![false; classes.len()];

        // Later classes win, so walk backwards and let each survivor claim its groups
        for (i, class) in classes.iter().enumerate().rev() {
            match self.conflict_key(class) {
                Some((scope, matched)) => {
                    let id = format!("{}{}", scope, matched.group);
                    if claimed.contains(&id) {
                        continue;
                    }
                    keep[i] = true;
                    claimed.insert(id);
                    for conflict in matched.conflicts {
                        claimed.insert(format!("{}{}", scope, conflict));
                    }
                }
                None => {
                    if seen_unknown.insert(*class) {
                        keep[i] = true;
                    }
                }
            }
        }

        let mut resolution = Resolution::default();
        for (class, kept) in classes.into_iter().zip(keep) {
            if kept {
                resolution.kept.push(class.to_string());
            } else {
                resolution.overridden.push(class.to_string());
            }
        }

        if !resolution.overridden.is_empty() {
            tracing::debug!(
                kept = resolution.kept.len(),
                overridden = ?resolution.overridden,
                "resolved class conflicts"
            );
        }

        resolution
    }

    /// Variant scope plus conflict group for a recognized class
    fn conflict_key(&self, class: &str) -> Option<(String, GroupMatch)> {
        let parsed = self.parse(class)?;
        let matched = groups::classify(parsed.base)?;

        let variants = sort_variants(parsed.variants);
        let scope = format!(
            "{}{}|",
            variants.join(":"),
            if parsed.important { "!" } else { "" }
        );
        Some((scope, matched))
    }

    /// Split a class into variants, important marker and utility base.
    ///
    /// Returns `None` when a prefix is configured and the class lacks it.
    fn parse<'a>(&self, class: &'a str) -> Option<ParsedClass<'a>> {
        let (variants, base) = split_variants(class, &self.config.separator);

        let (base, important) = if let Some(rest) = base.strip_prefix('!') {
            (rest, true)
        } else if let Some(rest) = base.strip_suffix('!') {
            (rest, true)
        } else {
            (base, false)
        };

        // Negative values share a group with their positive counterpart
        let base = base.strip_prefix('-').unwrap_or(base);

        let base = match self.config.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => base.strip_prefix(prefix)?,
            _ => base,
        };

        Some(ParsedClass {
            variants,
            important,
            base,
        })
    }
}

impl ConflictResolver for TailwindMerger {
    fn merge(&self, tokens: &[String]) -> String {
        self.resolve(tokens).merged()
    }
}

/// Split on the variant separator, ignoring separators inside brackets or parentheses
fn split_variants<'a>(class: &'a str, separator: &str) -> (Vec<&'a str>, &'a str) {
    let mut variants = Vec::new();
    if separator.is_empty() {
        return (variants, class);
    }

    let bytes = class.as_bytes();
    let sep = separator.as_bytes();
    let mut depth = 0i32;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if depth == 0 && bytes[i..].starts_with(sep) {
            variants.push(&class[start..i]);
            i += sep.len();
            start = i;
            continue;
        }
        match bytes[i] {
            b'[' | b'(' => depth += 1,
            b']' | b')' => depth -= 1,
            _ => {}
        }
        i += 1;
    }

    (variants, &class[start..])
}

/// Sort variants so `hover:md:` and `md:hover:` match. Arbitrary variants
/// (`[&>*]:`) are order-sensitive and stay in place.
fn sort_variants<'a>(variants: Vec<&'a str>) -> Vec<&'a str> {
    let mut sorted = Vec::with_capacity(variants.len());
    let mut run: Vec<&str> = Vec::new();

    for variant in variants {
        if variant.starts_with('[') {
            run.sort_unstable();
            sorted.append(&mut run);
            sorted.push(variant);
        } else {
            run.push(variant);
        }
    }
    run.sort_unstable();
    sorted.append(&mut run);
    sorted
}
