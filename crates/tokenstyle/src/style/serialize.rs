//! CSS text serialization for [`Interpolation`]s.

use super::{CssNode, CssObject, Interpolation};
use crate::token::TokenValue;

/// Properties whose numeric values never take a `px` unit.
pub const UNITLESS_PROPERTIES: &[&str] = &[
    "animation-iteration-count",
    "aspect-ratio",
    "column-count",
    "columns",
    "fill-opacity",
    "flex",
    "flex-grow",
    "flex-shrink",
    "font-weight",
    "grid-column",
    "grid-row",
    "line-clamp",
    "line-height",
    "opacity",
    "order",
    "orphans",
    "stroke-opacity",
    "stroke-width",
    "tab-size",
    "widows",
    "z-index",
    "zoom",
];

pub(super) fn write_interpolation(interpolation: &Interpolation, out: &mut String) {
    match interpolation {
        Interpolation::Empty => {}
        Interpolation::Object(obj) => write_block(obj, "", out),
        Interpolation::List(items) => {
            for item in items {
                write_interpolation(item, out);
            }
        }
        Interpolation::Raw(raw) => out.push_str(raw),
    }
}

fn write_block(obj: &CssObject, selector: &str, out: &mut String) {
    let declarations: String = obj
        .entries()
        .iter()
        .filter_map(|(name, node)| match node {
            CssNode::Value(value) => {
                let property = property_name(name);
                Some(format!("{}:{};", property, property_value(&property, value)))
            }
            CssNode::Block(_) => None,
        })
        .collect();
    if !declarations.is_empty() {
        if selector.is_empty() {
            out.push_str(&declarations);
        } else {
            out.push_str(&format!("{}{{{}}}", selector, declarations));
        }
    }

    for (key, node) in obj.entries() {
        if let CssNode::Block(child) = node {
            if key.starts_with('@') {
                out.push_str(key);
                out.push('{');
                write_block(child, selector, out);
                out.push('}');
            } else {
                write_block(child, &combine_selectors(selector, key), out);
            }
        }
    }
}

fn combine_selectors(parent: &str, key: &str) -> String {
    let parents: Vec<&str> = parent.split(',').map(str::trim).collect();
    let mut combined = Vec::new();
    for part in key.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        for parent in &parents {
            let selector = if part.contains('&') {
                part.replace('&', parent)
            } else if parent.is_empty() {
                part.to_string()
            } else {
                format!("{} {}", parent, part)
            };
            combined.push(selector.trim().to_string());
        }
    }
    combined.join(",")
}

fn property_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn property_value(property: &str, value: &TokenValue) -> String {
    match value {
        TokenValue::Number(n)
            if *n != 0.0 && !property.starts_with("--") && !UNITLESS_PROPERTIES.contains(&property) =>
        {
            format!("{}px", n)
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn css(obj: CssObject) -> String {
        Interpolation::from(obj).to_css()
    }

    #[test]
    fn test_property_names() {
        assert_eq!(property_name("backgroundColor"), "background-color");
        assert_eq!(property_name("WebkitTransition"), "-webkit-transition");
        assert_eq!(property_name("--ant-color"), "--ant-color");
    }

    #[test]
    fn test_units() {
        let out = css(CssObject::new().nest(
            ".a",
            CssObject::new()
                .prop("zIndex", 1000)
                .prop("margin", 0)
                .prop("width", 10)
                .prop("lineHeight", 1.5),
        ));
        assert_eq!(out, ".a{z-index:1000;margin:0;width:10px;line-height:1.5;}");
    }

    #[test]
    fn test_descendant_and_parent_reference() {
        let out = css(CssObject::new().nest(
            ".btn",
            CssObject::new()
                .nest(".icon", CssObject::new().prop("color", "red"))
                .nest("&-primary", CssObject::new().prop("color", "blue")),
        ));
        assert_eq!(out, ".btn .icon{color:red;}.btn-primary{color:blue;}");
    }

    #[test]
    fn test_selector_lists_expand() {
        let out = css(CssObject::new().nest(
            ".a, .b",
            CssObject::new().nest("&:hover", CssObject::new().prop("color", "red")),
        ));
        assert_eq!(out, ".a:hover,.b:hover{color:red;}");
    }

    #[test]
    fn test_media_query_keeps_selector() {
        let out = css(CssObject::new().nest(
            ".a",
            CssObject::new().nest("@media (max-width: 575px)", CssObject::new().prop("display", "none")),
        ));
        assert_eq!(out, "@media (max-width: 575px){.a{display:none;}}");
    }

    #[test]
    fn test_list_and_raw() {
        let list = Interpolation::List(vec![
            Interpolation::Raw(".r{}".into()),
            Interpolation::Empty,
            Interpolation::from(CssObject::new().nest(".x", CssObject::new().prop("top", 1))),
        ]);
        assert_eq!(list.to_css(), ".r{}.x{top:1px;}");
    }
}
