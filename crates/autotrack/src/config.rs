//! Text resolution configuration

use serde::{Deserialize, Serialize};

/// Options for accessible text resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Skip `aria-hidden="true"` subtrees and non-rendered tags
    /// (`script`, `style`, `template`, `noscript`) in composite walks
    pub skip_hidden: bool,

    /// Truncate the resolved element name to this many chars
    pub max_name_length: Option<usize>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            skip_hidden: true,
            max_name_length: None,
        }
    }
}

impl TextConfig {
    /// Apply `max_name_length` to a resolved name
    pub fn truncate(&self, name: String) -> String {
        match self.max_name_length {
            Some(max) if name.chars().count() > max => name.chars().take(max).collect(),
            _ => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TextConfig::default();
        assert!(config.skip_hidden);
        assert_eq!(config.max_name_length, None);
        assert_eq!(config.truncate("abc".to_string()), "abc");
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        let config = TextConfig { max_name_length: Some(3), ..Default::default() };
        assert_eq!(config.truncate("h\u{e9}llo".to_string()), "h\u{e9}l");
        assert_eq!(config.truncate("hi".to_string()), "hi");
    }

    #[test]
    fn test_partial_json() {
        let config: TextConfig = serde_json::from_str(r#"{"max_name_length": 40}"#).unwrap();
        assert!(config.skip_hidden);
        assert_eq!(config.max_name_length, Some(40));
    }
}
