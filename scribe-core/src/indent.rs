//! Indentation configuration for generated code.

use serde::{Deserialize, Deserializer, de};

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation (Java convention).
    pub const JAVA: Self = Self::Spaces(4);

    /// 2-space indentation.
    pub const COMPACT: Self = Self::Spaces(2);

    /// Render one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(width) => " ".repeat(usize::from(*width)),
            Self::Tab => "\t".to_string(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::JAVA
    }
}

// Accepts `indent = 4` or `indent = "tab"` in configuration files.
impl<'de> Deserialize<'de> for Indent {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Width(u8),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Width(0) => Err(de::Error::custom("indent width must be at least 1")),
            Raw::Width(width) => Ok(Self::Spaces(width)),
            Raw::Name(name) if name.eq_ignore_ascii_case("tab") => Ok(Self::Tab),
            Raw::Name(name) => Err(de::Error::custom(format!(
                "unknown indent style '{name}', expected a width or \"tab\""
            ))),
        }
    }
}
