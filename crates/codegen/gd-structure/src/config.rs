//! Code generation settings

use serde::{Deserialize, Serialize};

/// Property values a piece template starts from before its literal is applied
///
/// Passed by value into template construction; changing a configuration never
/// affects templates that were already built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceDefaults {
    /// How many copies of a piece may be placed; `u32::MAX` is unbounded
    pub limit: u32,
    /// Whether the piece may capture
    pub capture: bool,
    /// Whether the piece may be placed during the game
    pub placeable: bool,
    /// Whether the piece may jump over others
    pub can_jump: bool,
}

impl Default for PieceDefaults {
    fn default() -> Self {
        Self {
            limit: u32::MAX,
            capture: false,
            placeable: true,
            can_jump: false,
        }
    }
}

/// Game section settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Iterations of the stand-in game loop used until a win condition is supplied
    pub placeholder_rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            placeholder_rounds: 5,
        }
    }
}

/// Settings for one compilation, usually read from `griddy.toml`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Defaults for piece templates, the `[pieces]` table
    #[serde(rename = "pieces")]
    pub piece_defaults: PieceDefaults,
    /// The `[game]` table
    pub game: GameConfig,
}

impl CodegenConfig {
    /// Parse a TOML document; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed documents or mistyped values.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = CodegenConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, CodegenConfig::default());
        assert_eq!(config.piece_defaults.limit, u32::MAX);
        assert!(config.piece_defaults.placeable);
        assert_eq!(config.game.placeholder_rounds, 5);
    }

    #[test]
    fn test_partial_override() {
        let config = CodegenConfig::from_toml_str(
            "[pieces]\nlimit = 8\ncan_jump = true\n\n[game]\nplaceholder_rounds = 2\n",
        )
        .expect("valid config");
        assert_eq!(config.piece_defaults.limit, 8);
        assert!(config.piece_defaults.can_jump);
        assert!(!config.piece_defaults.capture);
        assert_eq!(config.game.placeholder_rounds, 2);
    }

    #[test]
    fn test_mistyped_value_is_rejected() {
        assert!(CodegenConfig::from_toml_str("[pieces]\nlimit = \"lots\"\n").is_err());
    }
}
