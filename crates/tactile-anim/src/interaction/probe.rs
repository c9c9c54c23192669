//! Native cursor style lookup.
//!
//! The interaction machine only needs to know which cursor keyword would apply
//! at a hovered element. How that is resolved (computed styles, a toolkit
//! query, a lookup table) belongs to the host, behind [`CursorProbe`].

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::input::TargetId;

/// CSS cursor keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CursorKeyword {
    #[default]
    Default,
    Auto,
    None,
    Pointer,
    /// Any other keyword (`text`, `grab`, `wait`, ...), kept verbatim.
    Other(String),
}

impl CursorKeyword {
    /// `default`, `auto` and `none`: no affordance of their own.
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Default | Self::Auto | Self::None)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Auto => "auto",
            Self::None => "none",
            Self::Pointer => "pointer",
            Self::Other(keyword) => keyword,
        }
    }
}

impl FromStr for CursorKeyword {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "default" => Self::Default,
            "auto" => Self::Auto,
            "none" => Self::None,
            "pointer" => Self::Pointer,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for CursorKeyword {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(keyword) => keyword,
            Err(never) => match never {},
        }
    }
}

impl From<CursorKeyword> for String {
    fn from(keyword: CursorKeyword) -> Self {
        keyword.as_str().to_string()
    }
}

impl fmt::Display for CursorKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the native cursor keyword at an element.
///
/// Called synchronously, at most once per hover event. Implementations that
/// toggle global style state to take the measurement must restore it before
/// returning.
pub trait CursorProbe {
    fn probe(&mut self, target: &TargetId) -> CursorKeyword;
}

impl<F> CursorProbe for F
where
    F: FnMut(&TargetId) -> CursorKeyword,
{
    fn probe(&mut self, target: &TargetId) -> CursorKeyword {
        self(target)
    }
}

/// Map-backed probe: each known target has a fixed keyword, everything else
/// reports `auto`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTable {
    styles: HashMap<TargetId, CursorKeyword>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, target: impl Into<String>, keyword: CursorKeyword) -> Self {
        self.insert(target, keyword);
        self
    }

    pub fn insert(&mut self, target: impl Into<String>, keyword: CursorKeyword) {
        self.styles.insert(TargetId::new(target), keyword);
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl CursorProbe for StyleTable {
    fn probe(&mut self, target: &TargetId) -> CursorKeyword {
        self.styles
            .get(target)
            .cloned()
            .unwrap_or(CursorKeyword::Auto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_parse_and_display() {
        assert_eq!("pointer".parse::<CursorKeyword>(), Ok(CursorKeyword::Pointer));
        assert_eq!(" none ".parse::<CursorKeyword>(), Ok(CursorKeyword::None));
        let grab: CursorKeyword = "grab".parse().unwrap();
        assert_eq!(grab, CursorKeyword::Other("grab".to_string()));
        assert_eq!(grab.to_string(), "grab");
        assert_eq!(CursorKeyword::default().to_string(), "default");
    }

    #[test]
    fn test_plain_keywords() {
        assert!(CursorKeyword::Default.is_plain());
        assert!(CursorKeyword::Auto.is_plain());
        assert!(CursorKeyword::None.is_plain());
        assert!(!CursorKeyword::Pointer.is_plain());
        assert!(!CursorKeyword::Other("text".into()).is_plain());
    }

    #[test]
    fn test_style_table_fallback() {
        let mut table = StyleTable::new().with("button", CursorKeyword::Pointer);
        assert_eq!(table.probe(&TargetId::new("button")), CursorKeyword::Pointer);
        assert_eq!(table.probe(&TargetId::new("body")), CursorKeyword::Auto);
    }

    #[test]
    fn test_style_table_from_json() {
        let mut table: StyleTable =
            serde_json::from_str(r#"{"link":"pointer","input":"text"}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.probe(&TargetId::new("link")), CursorKeyword::Pointer);
        assert_eq!(
            table.probe(&TargetId::new("input")),
            CursorKeyword::Other("text".to_string())
        );
    }

    #[test]
    fn test_closure_probe() {
        let mut calls = 0;
        let mut probe = |_: &TargetId| {
            calls += 1;
            CursorKeyword::Pointer
        };
        assert_eq!(probe.probe(&TargetId::new("x")), CursorKeyword::Pointer);
        assert_eq!(calls, 1);
    }
}
