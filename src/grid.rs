use core::fmt;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::MapParseError;
use crate::terrain::TerrainKind;
use crate::{Coordinate, N_SMALLVEC_SIZE};

/// Offsets visited by [TileGrid::neighbors_of], in order: N, W, E, S, NW, NE, SW, SE, with north
/// being `+y`. Among neighbours of equal cost discovered in the same expansion, the one earlier in
/// this list is expanded first.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (-1, 0),
    (1, 0),
    (0, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
];

pub type Neighbors = SmallVec<[Tile; N_SMALLVEC_SIZE]>;

/// A single cell of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub coordinate: Coordinate,
    pub terrain: TerrainKind,
}

impl Tile {
    pub fn new(coordinate: Coordinate, terrain: TerrainKind) -> Tile {
        Tile {
            coordinate,
            terrain,
        }
    }
}

/// Tile storage as seen by the pathfinder. Implementations only need to answer lookups; absence
/// of a tile is an ordinary boundary condition.
pub trait TileGrid {
    /// Returns the tile at `coordinate`, or [None] outside the populated region.
    fn tile_at(&self, coordinate: Coordinate) -> Option<Tile>;

    /// Returns the existing tiles around `coordinate` in [NEIGHBOR_OFFSETS] order.
    fn neighbors_of(&self, coordinate: Coordinate) -> Neighbors {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                self.tile_at(Coordinate::new(coordinate.x + dx, coordinate.y + dy))
            })
            .collect()
    }
}

impl<G: TileGrid + ?Sized> TileGrid for &G {
    fn tile_at(&self, coordinate: Coordinate) -> Option<Tile> {
        (**self).tile_at(coordinate)
    }
    fn neighbors_of(&self, coordinate: Coordinate) -> Neighbors {
        (**self).neighbors_of(coordinate)
    }
}

/// Sparse grids: every key is a populated tile.
impl<S: BuildHasher> TileGrid for HashMap<Coordinate, TerrainKind, S> {
    fn tile_at(&self, coordinate: Coordinate) -> Option<Tile> {
        self.get(&coordinate).map(|&kind| Tile::new(coordinate, kind))
    }
}

/// Extent of a dense grid covering `0..width` by `0..height`, and its row-major indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub width: usize,
    pub height: usize,
}

impl Bounds {
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x >= 0
            && coordinate.y >= 0
            && (coordinate.x as usize) < self.width
            && (coordinate.y as usize) < self.height
    }
    /// Row-major index of an in-bounds coordinate.
    pub fn get_ix(&self, coordinate: Coordinate) -> usize {
        coordinate.y as usize * self.width + coordinate.x as usize
    }
    /// Row-major index of `coordinate`, or [None] when it lies outside.
    pub fn checked_ix(&self, coordinate: Coordinate) -> Option<usize> {
        self.contains(coordinate).then(|| self.get_ix(coordinate))
    }
    pub fn coordinate_of(&self, ix: usize) -> Coordinate {
        Coordinate::new((ix % self.width) as i32, (ix / self.width) as i32)
    }
}

/// Dense rectangular grid covering `0..width` by `0..height`, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    bounds: Bounds,
    terrain: Vec<TerrainKind>,
}

impl TileMap {
    pub fn new(width: usize, height: usize, fill: TerrainKind) -> TileMap {
        TileMap {
            bounds: Bounds { width, height },
            terrain: vec![fill; width * height],
        }
    }
    pub fn width(&self) -> usize {
        self.bounds.width
    }
    pub fn height(&self) -> usize {
        self.bounds.height
    }
    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }
    pub fn in_bounds(&self, coordinate: Coordinate) -> bool {
        self.bounds.contains(coordinate)
    }
    pub fn terrain(&self, coordinate: Coordinate) -> Option<TerrainKind> {
        self.bounds
            .checked_ix(coordinate)
            .map(|ix| self.terrain[ix])
    }
    /// Changes the terrain of a tile. Returns [false] if the coordinate is out of bounds.
    pub fn set_terrain(&mut self, coordinate: Coordinate, kind: TerrainKind) -> bool {
        match self.bounds.checked_ix(coordinate) {
            Some(ix) => {
                self.terrain[ix] = kind;
                true
            }
            None => false,
        }
    }
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.terrain
            .iter()
            .enumerate()
            .map(|(ix, &kind)| Tile::new(self.bounds.coordinate_of(ix), kind))
    }
}

impl TileGrid for TileMap {
    fn tile_at(&self, coordinate: Coordinate) -> Option<Tile> {
        self.terrain(coordinate)
            .map(|kind| Tile::new(coordinate, kind))
    }
}

/// Parses one row per line, the first line being `y = 0`, using [TerrainKind::symbol].
impl FromStr for TileMap {
    type Err = MapParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();
        let width = rows.first().ok_or(MapParseError::Empty)?.chars().count();
        let mut terrain = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let kind = TerrainKind::from_symbol(symbol)
                    .ok_or(MapParseError::UnknownSymbol { symbol, x, y })?;
                terrain.push(kind);
            }
        }
        Ok(TileMap {
            bounds: Bounds {
                width,
                height: rows.len(),
            },
            terrain,
        })
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.terrain.chunks(self.bounds.width.max(1)) {
            let line = row.iter().map(|k| k.symbol()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
