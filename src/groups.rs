//! Tailwind utility conflict groups.
//!
//! Each utility base (the class without variants, important marker, prefix or
//! negative sign) maps to at most one group. Two classes conflict when they
//! share a group, or when the later one's group lists the earlier one's group
//! in its `conflicts`. Groups are matched in table order, so narrower patterns
//! come before the catch-all ones (`text-sm` before `text-{color}`).

use once_cell::sync::Lazy;
use regex::Regex;

/// A single conflict group
#[derive(Debug)]
pub struct ClassGroup {
    /// Stable group identifier
    pub id: String,

    pattern: Regex,

    /// Groups overridden by a class in this group
    pub conflicts: Vec<String>,
}

/// Result of classifying a utility base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatch {
    pub group: String,
    pub conflicts: &'static [String],
}

const SIDES: [&str; 8] = ["x", "y", "s", "e", "t", "r", "b", "l"];
const CORNERS: [&str; 4] = ["tl", "tr", "br", "bl"];
const ARBITRARY: &str = r"\[[^\]]+\]";
const DISPLAY: &str = "block|inline-block|inline|flex|inline-flex|table|inline-table|table-caption|table-cell|table-column|table-column-group|table-footer-group|table-header-group|table-row-group|table-row|flow-root|grid|inline-grid|contents|list-item|hidden";

static GROUPS: Lazy<Vec<ClassGroup>> = Lazy::new(build_groups);

/// Classify a utility base, returning `None` for classes outside the table
pub fn classify(base: &str) -> Option<GroupMatch> {
    static EMPTY: Vec<String> = Vec::new();

    // Arbitrary property, e.g. `[mask-type:luminance]`
    if let Some(inner) = base.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        let (property, _) = inner.split_once(':')?;
        return Some(GroupMatch {
            group: format!("[{}]", property),
            conflicts: &EMPTY,
        });
    }

    GROUPS
        .iter()
        .find(|g| g.pattern.is_match(base))
        .map(|g| GroupMatch {
            group: g.id.clone(),
            conflicts: &g.conflicts,
        })
}

/// Number of groups in the table
pub fn group_count() -> usize {
    GROUPS.len()
}

struct TableBuilder {
    groups: Vec<ClassGroup>,
}

impl TableBuilder {
    fn group(&mut self, id: &str, pattern: &str, conflicts: &[&str]) {
        let pattern = format!("^(?:{})$", pattern);
        // Patterns are compile-time constants covered by tests
        let pattern = Regex::new(&pattern)
            .unwrap_or_else(|e| panic!("invalid pattern for group {}: {}", id, e));
        self.groups.push(ClassGroup {
            id: id.to_string(),
            pattern,
            conflicts: conflicts.iter().map(|c| c.to_string()).collect(),
        });
    }

    /// `p`, `px`, `py`, `pt`, ... where the plain utility overrides every side
    /// and `x`/`y` override their two sides
    fn sided(&mut self, name: &str, value: &str) {
        for side in SIDES {
            let id = format!("{}{}", name, side);
            let conflicts = side_conflicts(name, side);
            let conflicts: Vec<&str> = conflicts.iter().map(String::as_str).collect();
            self.group(&id, &format!("{}{}-{}", name, side, value), &conflicts);
        }
        let all: Vec<String> = SIDES.iter().map(|s| format!("{}{}", name, s)).collect();
        let all: Vec<&str> = all.iter().map(String::as_str).collect();
        self.group(name, &format!("{}-{}", name, value), &all);
    }

    fn build(self) -> Vec<ClassGroup> {
        self.groups
    }
}

fn side_conflicts(name: &str, side: &str) -> Vec<String> {
    match side {
        "x" => vec![format!("{}r", name), format!("{}l", name)],
        "y" => vec![format!("{}t", name), format!("{}b", name)],
        _ => Vec::new(),
    }
}

fn build_groups() -> Vec<ClassGroup> {
    let mut t = TableBuilder { groups: Vec::new() };
    let any = ".+";
    let length = format!(r"\d+(?:\.\d+)?|px|{}", ARBITRARY);

    // Layout
    t.group("display", DISPLAY, &[]);
    t.group("position", "static|fixed|absolute|relative|sticky", &[]);
    t.group("visibility", "visible|invisible|collapse", &[]);
    t.group("box-sizing", "box-border|box-content", &[]);
    t.group("float", "float-(?:right|left|start|end|none)", &[]);
    t.group("clear", "clear-(?:left|right|both|none|start|end)", &[]);
    t.group("object-fit", "object-(?:contain|cover|fill|none|scale-down)", &[]);
    t.group("object-position", "object-.+", &[]);
    t.group("overflow-x", "overflow-x-(?:auto|hidden|clip|visible|scroll)", &[]);
    t.group("overflow-y", "overflow-y-(?:auto|hidden|clip|visible|scroll)", &[]);
    t.group("overflow", "overflow-(?:auto|hidden|clip|visible|scroll)", &["overflow-x", "overflow-y"]);
    t.group("z", &format!(r"z-(?:\d+|auto|{})", ARBITRARY), &[]);
    t.group("aspect", "aspect-.+", &[]);

    t.group("inset-x", "inset-x-.+", &["right", "left"]);
    t.group("inset-y", "inset-y-.+", &["top", "bottom"]);
    t.group("inset", "inset-.+", &["inset-x", "inset-y", "start", "end", "top", "right", "bottom", "left"]);
    for side in ["start", "end", "top", "right", "bottom", "left"] {
        t.group(side, &format!("{}-.+", side), &[]);
    }

    // Flexbox and grid
    t.group("flex-direction", "flex-(?:row|row-reverse|col|col-reverse)", &[]);
    t.group("flex-wrap", "flex-(?:wrap|wrap-reverse|nowrap)", &[]);
    t.group("flex", &format!("flex-(?:1|auto|initial|none|{})", ARBITRARY), &[]);
    t.group("grow", &format!("grow(?:-\\d+|-{})?", ARBITRARY), &[]);
    t.group("shrink", &format!("shrink(?:-\\d+|-{})?", ARBITRARY), &[]);
    t.group("basis", "basis-.+", &[]);
    t.group("order", "order-.+", &[]);
    t.group("grid-cols", "grid-cols-.+", &[]);
    t.group("grid-rows", "grid-rows-.+", &[]);
    t.group("grid-flow", "grid-flow-.+", &[]);
    t.group("col-start-end", "col-(?:auto|span-.+)", &[]);
    t.group("row-start-end", "row-(?:auto|span-.+)", &[]);
    t.group("gap-x", "gap-x-.+", &[]);
    t.group("gap-y", "gap-y-.+", &[]);
    t.group("gap", "gap-.+", &["gap-x", "gap-y"]);
    t.group("justify-items", "justify-items-.+", &[]);
    t.group("justify-self", "justify-self-.+", &[]);
    t.group("justify-content", "justify-(?:normal|start|end|center|between|around|evenly|stretch)", &[]);
    t.group("align-items", "items-(?:start|end|center|baseline|stretch)", &[]);
    t.group("align-content", "content-(?:normal|center|start|end|between|around|evenly|baseline|stretch)", &[]);
    t.group("align-self", "self-(?:auto|start|end|center|stretch|baseline)", &[]);
    t.group("place-content", "place-content-.+", &[]);
    t.group("place-items", "place-items-.+", &[]);
    t.group("place-self", "place-self-.+", &[]);

    // Spacing
    t.sided("p", any);
    t.sided("m", any);
    t.group("space-x-reverse", "space-x-reverse", &[]);
    t.group("space-y-reverse", "space-y-reverse", &[]);
    t.group("space-x", &format!("space-x-(?:{})", length), &[]);
    t.group("space-y", &format!("space-y-(?:{})", length), &[]);

    // Sizing
    t.group("size", "size-.+", &["w", "h"]);
    t.group("min-w", "min-w-.+", &[]);
    t.group("max-w", "max-w-.+", &[]);
    t.group("min-h", "min-h-.+", &[]);
    t.group("max-h", "max-h-.+", &[]);
    t.group("w", "w-.+", &[]);
    t.group("h", "h-.+", &[]);

    // Typography
    t.group(
        "font-size",
        r"text-(?:xs|sm|base|lg|xl|[2-9]xl|\[(?:length:)?[\d.][^\]]*\])(?:/\S+)?",
        &["leading"],
    );
    t.group("text-align", "text-(?:left|center|right|justify|start|end)", &[]);
    t.group("text-overflow", "truncate|text-ellipsis|text-clip", &[]);
    t.group("text-wrap", "text-(?:wrap|nowrap|balance|pretty)", &[]);
    t.group("text-color", "text-.+", &[]);
    t.group(
        "font-weight",
        r"font-(?:thin|extralight|light|normal|medium|semibold|bold|extrabold|black|\[(?:weight:)?\d+\])",
        &[],
    );
    t.group("font-family", "font-.+", &[]);
    t.group("font-style", "italic|not-italic", &[]);
    t.group("text-decoration", "underline|overline|line-through|no-underline", &[]);
    t.group("text-transform", "uppercase|lowercase|capitalize|normal-case", &[]);
    t.group("leading", "leading-.+", &[]);
    t.group("tracking", "tracking-.+", &[]);
    t.group("whitespace", "whitespace-.+", &[]);
    t.group("break", "break-(?:normal|words|all|keep)", &[]);

    // Backgrounds
    t.group("bg-attachment", "bg-(?:fixed|local|scroll)", &[]);
    t.group("bg-position", "bg-(?:bottom|center|left|left-bottom|left-top|right|right-bottom|right-top|top)", &[]);
    t.group("bg-repeat", "bg-(?:repeat|no-repeat|repeat-x|repeat-y|repeat-round|repeat-space)", &[]);
    t.group("bg-size", "bg-(?:auto|cover|contain)", &[]);
    t.group("bg-clip", "bg-clip-(?:border|padding|content|text)", &[]);
    t.group("bg-origin", "bg-origin-(?:border|padding|content)", &[]);
    t.group("bg-blend", "bg-blend-.+", &[]);
    t.group(
        "bg-image",
        r"bg-(?:none|gradient-to-(?:t|tr|r|br|b|bl|l|tl)|\[(?:image:|url\().+\])",
        &[],
    );
    t.group("bg-color", "bg-.+", &[]);

    // Borders
    let corner_ids: Vec<String> = CORNERS.iter().map(|c| format!("rounded-{}", c)).collect();
    let radius = format!("none|sm|md|lg|xl|2xl|3xl|full|{}", ARBITRARY);
    for corner in CORNERS {
        t.group(&format!("rounded-{}", corner), &format!("rounded-{}(?:-(?:{}))?", corner, radius), &[]);
    }
    for side in ["t", "r", "b", "l", "s", "e"] {
        let corners: &[&str] = match side {
            "t" => &["rounded-tl", "rounded-tr"],
            "r" | "e" => &["rounded-tr", "rounded-br"],
            "b" => &["rounded-br", "rounded-bl"],
            _ => &["rounded-tl", "rounded-bl"],
        };
        t.group(&format!("rounded-{}", side), &format!("rounded-{}(?:-(?:{}))?", side, radius), corners);
    }
    let mut rounded_all: Vec<String> = ["t", "r", "b", "l", "s", "e"].iter().map(|s| format!("rounded-{}", s)).collect();
    rounded_all.extend(corner_ids.iter().cloned());
    let rounded_all: Vec<&str> = rounded_all.iter().map(String::as_str).collect();
    t.group("rounded", &format!("rounded(?:-(?:{}))?", radius), &rounded_all);

    t.group("border-collapse", "border-(?:collapse|separate)", &[]);
    t.group("border-spacing-x", "border-spacing-x-.+", &[]);
    t.group("border-spacing-y", "border-spacing-y-.+", &[]);
    t.group("border-spacing", "border-spacing-.+", &["border-spacing-x", "border-spacing-y"]);
    t.group("border-style", "border-(?:solid|dashed|dotted|double|hidden|none)", &[]);
    let width = r"\d+|\[(?:length:)?[\d.][^\]]*\]";
    for side in SIDES {
        let conflicts = side_conflicts("border-w-", side);
        let conflicts: Vec<&str> = conflicts.iter().map(String::as_str).collect();
        t.group(&format!("border-w-{}", side), &format!("border-{}(?:-(?:{}))?", side, width), &conflicts);
    }
    let all_widths: Vec<String> = SIDES.iter().map(|s| format!("border-w-{}", s)).collect();
    let all_widths: Vec<&str> = all_widths.iter().map(String::as_str).collect();
    t.group("border-w", &format!("border(?:-(?:{}))?", width), &all_widths);
    for side in SIDES {
        let conflicts = side_conflicts("border-color-", side);
        let conflicts: Vec<&str> = conflicts.iter().map(String::as_str).collect();
        t.group(&format!("border-color-{}", side), &format!("border-{}-.+", side), &conflicts);
    }
    let all_colors: Vec<String> = SIDES.iter().map(|s| format!("border-color-{}", s)).collect();
    let all_colors: Vec<&str> = all_colors.iter().map(String::as_str).collect();
    t.group("border-color", "border-.+", &all_colors);

    // Effects
    t.group("shadow", &format!("shadow(?:-(?:sm|md|lg|xl|2xl|inner|none|{}))?", ARBITRARY), &[]);
    t.group("shadow-color", "shadow-.+", &[]);
    t.group("opacity", "opacity-.+", &[]);
    t.group("ring-inset", "ring-inset", &[]);
    t.group("ring-w", &format!("ring(?:-(?:{}))?", width), &[]);
    t.group("ring-offset-w", &format!("ring-offset-(?:{})", width), &[]);
    t.group("ring-offset-color", "ring-offset-.+", &[]);
    t.group("ring-color", "ring-.+", &[]);
    t.group("outline-style", "outline(?:-(?:none|dashed|dotted|double))?", &[]);

    // Interactivity and transitions
    t.group("cursor", "cursor-.+", &[]);
    t.group("pointer-events", "pointer-events-(?:none|auto)", &[]);
    t.group("select", "select-(?:none|text|all|auto)", &[]);
    t.group("transition", "transition(?:-(?:none|all|colors|opacity|shadow|transform))?", &[]);
    t.group("duration", "duration-.+", &[]);
    t.group("ease", "ease-.+", &[]);
    t.group("delay", "delay-.+", &[]);

    t.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_of(base: &str) -> Option<String> {
        classify(base).map(|m| m.group)
    }

    #[test]
    fn test_table_compiles() {
        assert!(group_count() > 100);
    }

    #[test]
    fn test_spacing_groups() {
        assert_eq!(group_of("p-4").as_deref(), Some("p"));
        assert_eq!(group_of("px-2").as_deref(), Some("px"));
        assert_eq!(group_of("pt-[3px]").as_deref(), Some("pt"));
        assert_eq!(group_of("my-3").as_deref(), Some("my"));
        assert_eq!(group_of("m-auto").as_deref(), Some("m"));
    }

    #[test]
    fn test_padding_overrides_sides() {
        let p = classify("p-3").unwrap();
        assert!(p.conflicts.iter().any(|c| c == "px"));
        assert!(p.conflicts.iter().any(|c| c == "pl"));

        let px = classify("px-3").unwrap();
        assert_eq!(px.conflicts, &["pr".to_string(), "pl".to_string()][..]);
    }

    #[test]
    fn test_text_disambiguation() {
        assert_eq!(group_of("text-sm").as_deref(), Some("font-size"));
        assert_eq!(group_of("text-2xl").as_deref(), Some("font-size"));
        assert_eq!(group_of("text-[14px]").as_deref(), Some("font-size"));
        assert_eq!(group_of("text-center").as_deref(), Some("text-align"));
        assert_eq!(group_of("text-white").as_deref(), Some("text-color"));
        assert_eq!(group_of("text-[#fff]").as_deref(), Some("text-color"));
        assert_eq!(group_of("text-ellipsis").as_deref(), Some("text-overflow"));
    }

    #[test]
    fn test_border_disambiguation() {
        assert_eq!(group_of("border").as_deref(), Some("border-w"));
        assert_eq!(group_of("border-3").as_deref(), Some("border-w"));
        assert_eq!(group_of("border-b").as_deref(), Some("border-w-b"));
        assert_eq!(group_of("border-x-2").as_deref(), Some("border-w-x"));
        assert_eq!(group_of("border-dashed").as_deref(), Some("border-style"));
        assert_eq!(group_of("border-red-500").as_deref(), Some("border-color"));
        assert_eq!(group_of("border-t-red-500").as_deref(), Some("border-color-t"));
    }

    #[test]
    fn test_utilities_sharing_a_color_prefix() {
        assert_eq!(group_of("border-collapse").as_deref(), Some("border-collapse"));
        assert_eq!(group_of("border-separate").as_deref(), Some("border-collapse"));
        assert_eq!(group_of("border-spacing-2").as_deref(), Some("border-spacing"));
        assert_eq!(group_of("border-spacing-x-1").as_deref(), Some("border-spacing-x"));
        assert_eq!(group_of("ring-offset-2").as_deref(), Some("ring-offset-w"));
        assert_eq!(group_of("ring-offset-white").as_deref(), Some("ring-offset-color"));
        assert_eq!(group_of("bg-clip-text").as_deref(), Some("bg-clip"));
        assert_eq!(group_of("bg-origin-border").as_deref(), Some("bg-origin"));
        assert_eq!(group_of("bg-blend-multiply").as_deref(), Some("bg-blend"));
        assert_eq!(group_of("bg-[url(/a.png)]").as_deref(), Some("bg-image"));
        assert_eq!(group_of("bg-[#fafafa]").as_deref(), Some("bg-color"));
    }

    #[test]
    fn test_font_arbitrary_values() {
        assert_eq!(group_of("font-[600]").as_deref(), Some("font-weight"));
        assert_eq!(group_of("font-[Inter]").as_deref(), Some("font-family"));
    }

    #[test]
    fn test_rounded_groups() {
        assert_eq!(group_of("rounded").as_deref(), Some("rounded"));
        assert_eq!(group_of("rounded-lg").as_deref(), Some("rounded"));
        assert_eq!(group_of("rounded-t-lg").as_deref(), Some("rounded-t"));
        assert_eq!(group_of("rounded-tl").as_deref(), Some("rounded-tl"));

        let top = classify("rounded-t").unwrap();
        assert!(top.conflicts.iter().any(|c| c == "rounded-tl"));
        assert!(top.conflicts.iter().any(|c| c == "rounded-tr"));
        assert!(!top.conflicts.iter().any(|c| c == "rounded-bl"));
    }

    #[test]
    fn test_layout_groups() {
        assert_eq!(group_of("grid").as_deref(), Some("display"));
        assert_eq!(group_of("hidden").as_deref(), Some("display"));
        assert_eq!(group_of("flex").as_deref(), Some("display"));
        assert_eq!(group_of("flex-col").as_deref(), Some("flex-direction"));
        assert_eq!(group_of("flex-1").as_deref(), Some("flex"));
        assert_eq!(group_of("inset-x-0").as_deref(), Some("inset-x"));
        assert_eq!(group_of("gap-3").as_deref(), Some("gap"));
        assert_eq!(group_of("bg-white").as_deref(), Some("bg-color"));
        assert_eq!(group_of("bg-cover").as_deref(), Some("bg-size"));
    }

    #[test]
    fn test_arbitrary_property() {
        let m = classify("[mask-type:luminance]").unwrap();
        assert_eq!(m.group, "[mask-type]");
        assert!(m.conflicts.is_empty());
        assert!(classify("[not-a-property]").is_none());
    }

    #[test]
    fn test_unknown_classes() {
        assert!(group_of("card-header").is_none());
        assert!(group_of("btn").is_none());
    }
}
