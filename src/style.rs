//! Inline CSS declaration lists (`style="fill: red; stroke: none"`)

use indexmap::IndexMap;

/// Parse a `;`-separated declaration list into property → value
///
/// Declarations are split on their first `:` and trimmed. When a property
/// repeats, the first occurrence wins.
pub fn parse_style(text: &str) -> IndexMap<String, String> {
    let mut style = IndexMap::new();

    for declaration in text.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        style
            .entry(name.to_string())
            .or_insert_with(|| value.trim().to_string());
    }

    style
}
