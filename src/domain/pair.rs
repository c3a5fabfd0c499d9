use serde::{Deserialize, Serialize};

use crate::config::dashboard::CatalogEntry;

/// A tradable instrument offered in the pair selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupportedPair {
    pub identifier: String,
    pub icon: String,
}

impl SupportedPair {
    pub fn new(identifier: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            icon: icon.into(),
        }
    }

    pub fn label(&self) -> String {
        if self.icon.is_empty() {
            self.identifier.clone()
        } else {
            format!("{} {}", self.icon, self.identifier)
        }
    }
}

impl From<&CatalogEntry> for SupportedPair {
    fn from((identifier, icon): &CatalogEntry) -> Self {
        SupportedPair::new(*identifier, *icon)
    }
}

/// Parse a pairs file: one pair per line, optional `,icon` suffix.
/// Blank lines and `#` comments are skipped, identifiers are upper-cased, duplicates dropped.
pub fn parse_pairs(content: &str) -> Vec<SupportedPair> {
    let mut pairs: Vec<SupportedPair> = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (identifier, icon) = match line.split_once(',') {
            Some((id, icon)) => (id.trim().to_uppercase(), icon.trim().to_string()),
            None => (line.to_uppercase(), String::new()),
        };
        if identifier.is_empty() || pairs.iter().any(|p| p.identifier == identifier) {
            continue;
        }
        pairs.push(SupportedPair { identifier, icon });
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lines_icons_and_comments() {
        let content = "# majors\nbtcusdt, ₿\n\n ethusdt \nBTCUSDT\nsolusdt,◎\n";
        let pairs = parse_pairs(content);
        assert_eq!(
            pairs,
            vec![
                SupportedPair::new("BTCUSDT", "₿"),
                SupportedPair::new("ETHUSDT", ""),
                SupportedPair::new("SOLUSDT", "◎"),
            ]
        );
    }

    #[test]
    fn label_includes_icon_when_present() {
        assert_eq!(SupportedPair::new("BTCUSDT", "₿").label(), "₿ BTCUSDT");
        assert_eq!(SupportedPair::new("ETHUSDT", "").label(), "ETHUSDT");
    }
}
