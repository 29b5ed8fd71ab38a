//! # tile_pathfinding
//!
//! Shortest-cost paths on a tile grid where every tile has a terrain kind. Implements
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with 8-directional movement, an
//! integer octile heuristic and step costs scaled by the speed modifier of the terrain being
//! entered. Grid storage is abstracted behind [TileGrid]; a dense [TileMap] and sparse
//! [HashMap](std::collections::HashMap) grids are provided. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) on demand to
//! answer reachability queries without searching.
//!
//! ```
//! use tile_pathfinding::{find_path, Coordinate, TerrainCatalog, TerrainKind, TileMap};
//!
//! let map = TileMap::new(3, 3, TerrainKind::Grass);
//! let catalog = TerrainCatalog::default();
//! let path = find_path(&map, &catalog, Coordinate::new(0, 0), Coordinate::new(2, 2)).unwrap();
//! assert_eq!(path, vec![Coordinate::new(1, 1), Coordinate::new(2, 2)]);
//! ```
pub mod components;
pub mod error;
pub mod grid;
pub mod pathfinder;
pub mod search;
pub mod terrain;

use grid_util::point::Point;

pub use components::ComponentIndex;
pub use error::{CatalogError, MapParseError, PathfindingError};
pub use grid::{Tile, TileGrid, TileMap, NEIGHBOR_OFFSETS};
pub use pathfinder::{cost_between, distance, find_path, Pathfinder, SearchConfig};
pub use terrain::{TerrainCatalog, TerrainKind, TerrainProperties};

/// Identifies a tile within a grid.
pub type Coordinate = Point;

/// Tiles to step onto in order, excluding the start and ending with the goal.
pub type Path = Vec<Coordinate>;

/// Cost of a cardinal step.
pub const C: i32 = 10;
/// Cost of a diagonal step, approximately `C * sqrt(2)`.
pub const D: i32 = 14;
/// Largest cost of a single step. Catalogs whose slowest terrain would exceed it are rejected.
pub const MAX_STEP_COST: i32 = 1 << 20;

/// Inline capacity of neighbour lists; a tile has at most eight neighbours.
pub const N_SMALLVEC_SIZE: usize = 8;
