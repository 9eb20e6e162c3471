//! # Theme resolution
//!
//! A per-document keyed attribute store. Each style key has a built-in
//! default attribute dictionary and may be overridden wholesale by the
//! document's theme; unspecified keys fall back to the defaults. There is no
//! inheritance or cascading between keys: every key resolves independently
//! and totally.
//!
//! The key space is a closed enumeration rather than a dynamic dictionary:
//! a variant owns exactly the key(s) it resolves through (a heading owns one
//! of five fixed keys selected by its level).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::node::HeadingTag;

/// A recognized style key, owned by one node variant (and sub-tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleKey {
    Root,
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Text,
}

/// One rendering attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleProp {
    FontSize,
    FontFamily,
    Bold,
    Italic,
}

/// A rendering attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f32),
    Text(String),
    Flag(bool),
}

/// Ordered mapping from style property to value, as handed to layout.
pub type AttributeDict = BTreeMap<StyleProp, StyleValue>;

const DEFAULT_FONT_FAMILY: &str = "Helvetica";
const DEFAULT_FONT_SIZE: f32 = 15.0;

/// Per-document theme: overrides layered over built-in defaults.
///
/// Overriding a key replaces that key's dictionary wholesale; node data is
/// never touched by theme changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    overrides: HashMap<StyleKey, AttributeDict>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the attribute dictionary for one style key.
    pub fn set(&mut self, key: StyleKey, attributes: AttributeDict) {
        self.overrides.insert(key, attributes);
    }

    /// Drop an override, restoring the built-in default for the key.
    pub fn reset(&mut self, key: StyleKey) {
        self.overrides.remove(&key);
    }

    /// Resolve the attribute dictionary for a style key.
    ///
    /// Total: every key yields a dictionary, either the document's override
    /// or the built-in default.
    pub fn attributes(&self, key: StyleKey) -> AttributeDict {
        match self.overrides.get(&key) {
            Some(dict) => dict.clone(),
            None => Self::defaults(key),
        }
    }

    /// Built-in default attributes for a style key.
    fn defaults(key: StyleKey) -> AttributeDict {
        let mut dict = AttributeDict::new();
        match key {
            StyleKey::Root => {
                dict.insert(
                    StyleProp::FontFamily,
                    StyleValue::Text(DEFAULT_FONT_FAMILY.to_string()),
                );
                dict.insert(StyleProp::FontSize, StyleValue::Number(DEFAULT_FONT_SIZE));
            }
            StyleKey::Paragraph | StyleKey::Text => {}
            StyleKey::Heading1 => heading_default(&mut dict, HeadingTag::H1),
            StyleKey::Heading2 => heading_default(&mut dict, HeadingTag::H2),
            StyleKey::Heading3 => heading_default(&mut dict, HeadingTag::H3),
            StyleKey::Heading4 => heading_default(&mut dict, HeadingTag::H4),
            StyleKey::Heading5 => heading_default(&mut dict, HeadingTag::H5),
        }
        dict
    }
}

fn heading_default(dict: &mut AttributeDict, tag: HeadingTag) {
    dict.insert(
        StyleProp::FontSize,
        StyleValue::Number(tag.default_font_size()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_defaults_by_level() {
        let theme = Theme::new();
        let dict = theme.attributes(StyleKey::Heading3);
        assert_eq!(
            dict.get(&StyleProp::FontSize),
            Some(&StyleValue::Number(28.0))
        );
    }

    #[test]
    fn test_override_replaces_default() {
        let mut theme = Theme::new();
        let mut dict = AttributeDict::new();
        dict.insert(StyleProp::FontSize, StyleValue::Number(44.0));
        dict.insert(StyleProp::Bold, StyleValue::Flag(true));
        theme.set(StyleKey::Heading3, dict.clone());

        assert_eq!(theme.attributes(StyleKey::Heading3), dict);

        // Other keys still fall back to their own defaults.
        assert_eq!(
            theme.attributes(StyleKey::Heading1).get(&StyleProp::FontSize),
            Some(&StyleValue::Number(36.0))
        );
    }

    #[test]
    fn test_reset_restores_default() {
        let mut theme = Theme::new();
        theme.set(StyleKey::Root, AttributeDict::new());
        assert!(theme.attributes(StyleKey::Root).is_empty());

        theme.reset(StyleKey::Root);
        assert_eq!(
            theme.attributes(StyleKey::Root).get(&StyleProp::FontSize),
            Some(&StyleValue::Number(15.0))
        );
    }

    #[test]
    fn test_every_key_is_total() {
        let theme = Theme::new();
        for key in [
            StyleKey::Root,
            StyleKey::Paragraph,
            StyleKey::Heading1,
            StyleKey::Heading2,
            StyleKey::Heading3,
            StyleKey::Heading4,
            StyleKey::Heading5,
            StyleKey::Text,
        ] {
            // Resolvable for every key; empty dictionaries are valid.
            let _ = theme.attributes(key);
        }
    }
}
