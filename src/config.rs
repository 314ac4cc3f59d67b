//! Parser configuration: grammar profile and nesting limit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default nesting limit. Must fit in a 2 MiB thread stack in debug builds.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Which grammar the parser accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarProfile {
    /// The complete grammar
    #[default]
    Full,
    /// The reduced subset without interfaces, macros, async and rich types
    Core,
}

/// Constructs that only exist in the full grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    InterfaceDecl,
    ImplDecl,
    ExtensionDecl,
    MacroDecl,
    MacroCall,
    Async,
    Await,
    Generics,
    UnionType,
    OptionalType,
}

impl Feature {
    pub fn description(self) -> &'static str {
        match self {
            Feature::InterfaceDecl => "interface declaration",
            Feature::ImplDecl => "impl declaration",
            Feature::ExtensionDecl => "extension declaration",
            Feature::MacroDecl => "macro declaration",
            Feature::MacroCall => "macro call",
            Feature::Async => "async expression",
            Feature::Await => "await expression",
            Feature::Generics => "generic parameters",
            Feature::UnionType => "union type",
            Feature::OptionalType => "optional type",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl GrammarProfile {
    pub fn allows(self, _feature: Feature) -> bool {
        match self {
            GrammarProfile::Full => true,
            GrammarProfile::Core => false,
        }
    }
}

impl fmt::Display for GrammarProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarProfile::Full => f.write_str("full"),
            GrammarProfile::Core => f.write_str("core"),
        }
    }
}

/// Settings shared by full parses and incremental reparses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub profile: GrammarProfile,
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            profile: GrammarProfile::Full,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn with_profile(mut self, profile: GrammarProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_rejects_full_only_features() {
        assert!(GrammarProfile::Full.allows(Feature::MacroCall));
        assert!(!GrammarProfile::Core.allows(Feature::UnionType));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ParserConfig = serde_json::from_str(r#"{"profile": "core"}"#).unwrap();
        assert_eq!(config.profile, GrammarProfile::Core);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }
}
