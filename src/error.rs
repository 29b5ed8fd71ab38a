use thiserror::Error;

use crate::terrain::TerrainKind;
use crate::Coordinate;

/// Problems with a terrain table. These are configuration errors and are raised when the
/// [TerrainCatalog](crate::TerrainCatalog) is built, never during a search.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("no terrain properties registered for {0:?}")]
    MissingTerrain(TerrainKind),

    #[error("terrain properties for {0:?} registered more than once")]
    DuplicateTerrain(TerrainKind),

    #[error("unknown terrain kind {0:?}")]
    UnknownTerrain(String),

    #[error(
        "move speed modifier of {kind:?} must be finite, positive and keep step costs within \
         MAX_STEP_COST, got {modifier}"
    )]
    InvalidSpeedModifier { kind: TerrainKind, modifier: f32 },

    #[cfg(feature = "serde")]
    #[error("failed to parse terrain catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[cfg(feature = "serde")]
    #[error("failed to read terrain catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Caller errors reported by the pathfinder. An unreachable goal is not an error, it is an
/// empty path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathfindingError {
    #[error("no tile at {coordinate}")]
    TileNotFound { coordinate: Coordinate },
}

/// Errors from parsing an ASCII [TileMap](crate::TileMap).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapParseError {
    #[error("map contains no rows")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown terrain symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: usize, y: usize },
}
