//! Engine configuration
//!
//! All tunables of a round: board size, gravity interval, lock delay, the
//! lock-reset policy, and optional replacements for piece shapes. Loaded from
//! JSON; every field is optional and defaults to the reference instance.
//!
//! ```
//! use blockfall_core::config::{EngineConfig, LockResetPolicy};
//!
//! let config = EngineConfig::from_json_str(r#"{ "board_width": 10, "lock_reset_policy": { "limited": 15 } }"#).unwrap();
//! assert_eq!(config.board_width, 10);
//! assert_eq!(config.board_height, 20);
//! assert_eq!(config.lock_reset_policy, LockResetPolicy::Limited(15));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pieces::{Shape, ShapeTable};
pub use crate::timing::LockResetPolicy;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_MS, LOCK_DELAY_MS};

/// Smallest accepted board side (an I piece must fit across)
pub const MIN_BOARD_SIDE: u8 = 4;

/// Largest accepted board side
pub const MAX_BOARD_SIDE: u8 = 64;

/// Replacement spawn shape for one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeOverride {
    pub kind: PieceKind,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub board_width: u8,
    pub board_height: u8,
    pub fall_interval_ms: u32,
    pub lock_delay_ms: u32,
    pub lock_reset_policy: LockResetPolicy,
    pub shapes: Vec<ShapeOverride>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            fall_interval_ms: DROP_INTERVAL_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            lock_reset_policy: LockResetPolicy::Unlimited,
            shapes: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
        ] {
            if !(MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&value) {
                return Err(ConfigError::Dimension { name, value });
            }
        }
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("fall_interval_ms"));
        }
        self.shape_table().map(|_| ())
    }

    /// Canonical shapes with this config's overrides applied
    pub fn shape_table(&self) -> Result<ShapeTable, ConfigError> {
        let mut table = ShapeTable::default();
        for entry in &self.shapes {
            let shape = Shape::from_rows(&entry.rows).ok_or(ConfigError::Shape {
                kind: entry.kind,
                reason: "rows must form a non-empty square grid of side 2 to 4 with a single cell value",
            })?;
            if shape.tag() != entry.kind.cell() {
                return Err(ConfigError::Shape {
                    kind: entry.kind,
                    reason: "occupied cells must carry the kind's own cell value",
                });
            }
            if shape.size() > self.board_width as usize {
                return Err(ConfigError::Shape {
                    kind: entry.kind,
                    reason: "shape is wider than the board",
                });
            }
            table.set(entry.kind, shape);
        }
        Ok(table)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document is not valid JSON for [`EngineConfig`]
    Parse(serde_json::Error),
    /// A board side is outside `MIN_BOARD_SIDE..=MAX_BOARD_SIDE`
    Dimension { name: &'static str, value: u8 },
    ZeroInterval(&'static str),
    /// A shape override is malformed
    Shape {
        kind: PieceKind,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, .. } => write!(f, "failed to read config file {}", path.display()),
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Dimension { name, value } => write!(
                f,
                "{name} is {value}, expected {MIN_BOARD_SIDE}..={MAX_BOARD_SIDE}"
            ),
            Self::ZeroInterval(name) => write!(f, "{name} must be greater than zero"),
            Self::Shape { kind, reason } => {
                write!(f, "invalid shape for piece {}: {reason}", kind.as_str())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_shape;

    #[test]
    fn test_default_matches_reference_instance() {
        let config = EngineConfig::default();
        assert_eq!(config.board_width, 12);
        assert_eq!(config.board_height, 20);
        assert_eq!(config.fall_interval_ms, 1000);
        assert_eq!(config.lock_delay_ms, 500);
        assert_eq!(config.lock_reset_policy, LockResetPolicy::Unlimited);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = EngineConfig::from_json_str(r#"{ "gravity": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_dimension_bounds() {
        let err = EngineConfig::from_json_str(r#"{ "board_width": 3 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Dimension {
                name: "board_width",
                value: 3
            }
        ));
        let err = EngineConfig::from_json_str(r#"{ "board_height": 65 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Dimension { name: "board_height", .. }));
    }

    #[test]
    fn test_zero_fall_interval_rejected() {
        let err = EngineConfig::from_json_str(r#"{ "fall_interval_ms": 0 }"#).unwrap_err();
        assert_eq!(err.to_string(), "fall_interval_ms must be greater than zero");
    }

    #[test]
    fn test_shape_override_applied() {
        let config = EngineConfig::from_json_str(
            r#"{ "shapes": [ { "kind": "O", "rows": [[0, 0, 0], [0, 2, 0], [0, 0, 0]] } ] }"#,
        )
        .unwrap();
        let table = config.shape_table().unwrap();
        assert_eq!(table.get(PieceKind::O).occupied().as_slice(), &[(1, 1)]);
        assert_eq!(table.get(PieceKind::T), get_shape(PieceKind::T));
    }

    #[test]
    fn test_shape_override_with_wrong_tag_rejected() {
        let err = EngineConfig::from_json_str(
            r#"{ "shapes": [ { "kind": "T", "rows": [[2, 2], [2, 2]] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Shape { kind: PieceKind::T, .. }));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = EngineConfig::load("/nonexistent/blockfall.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/blockfall.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
