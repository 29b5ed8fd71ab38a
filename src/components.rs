use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::grid::{Bounds, TileMap, NEIGHBOR_OFFSETS};
use crate::terrain::TerrainCatalog;
use crate::{Coordinate, N_SMALLVEC_SIZE};

/// Connected components of the passable tiles of a [TileMap], maintained with a [UnionFind]
/// structure. Passable tiles are joined with their passable Chebyshev neighbours. The index is a
/// snapshot: rebuild it after changing terrain.
#[derive(Clone, Debug)]
pub struct ComponentIndex {
    bounds: Bounds,
    passable: Vec<bool>,
    components: UnionFind<usize>,
}

impl ComponentIndex {
    /// Generates a new [UnionFind] structure and links up passable neighbours into components.
    pub fn new(map: &TileMap, catalog: &TerrainCatalog) -> ComponentIndex {
        info!(
            "Generating connected components for {}x{} map",
            map.width(),
            map.height()
        );
        let passable = map
            .tiles()
            .map(|tile| catalog.passable(tile.terrain))
            .collect::<Vec<bool>>();
        let mut index = ComponentIndex {
            bounds: map.bounds(),
            components: UnionFind::new(passable.len()),
            passable,
        };
        for ix in 0..index.passable.len() {
            let point = index.bounds.coordinate_of(ix);
            if !index.passable[ix] {
                continue;
            }
            // Half of the neighbourhood suffices since every pair is visited from one side
            [
                Coordinate::new(point.x + 1, point.y - 1),
                Coordinate::new(point.x + 1, point.y),
                Coordinate::new(point.x + 1, point.y + 1),
                Coordinate::new(point.x, point.y + 1),
            ]
            .into_iter()
            .filter_map(|p| index.passable_ix(p))
            .collect::<SmallVec<[usize; 4]>>()
            .into_iter()
            .for_each(|n_ix| {
                index.components.union(ix, n_ix);
            });
        }
        index
    }

    fn passable_ix(&self, point: Coordinate) -> Option<usize> {
        self.bounds
            .checked_ix(point)
            .filter(|&ix| self.passable[ix])
    }

    fn neighbours(point: Coordinate) -> impl Iterator<Item = Coordinate> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| Coordinate::new(point.x + dx, point.y + dy))
    }

    /// Retrieves the component id of a passable tile, [None] for impassable or absent tiles.
    pub fn component(&self, point: Coordinate) -> Option<usize> {
        self.passable_ix(point).map(|ix| self.components.find(ix))
    }

    /// Checks whether a search from `start` would reach `goal`. An impassable start is only ever
    /// left, so the components of its passable neighbours are what it reaches. An impassable goal
    /// is only reachable when `allow_impassable_goal` is set and one of its neighbours is.
    pub fn reachable(&self, start: Coordinate, goal: Coordinate, allow_impassable_goal: bool) -> bool {
        if !self.bounds.contains(start) || !self.bounds.contains(goal) {
            return false;
        }
        if start == goal {
            return true;
        }
        let start_components = match self.component(start) {
            Some(c) => SmallVec::<[usize; N_SMALLVEC_SIZE]>::from_elem(c, 1),
            None => Self::neighbours(start)
                .filter_map(|p| self.component(p))
                .collect(),
        };
        match self.component(goal) {
            Some(c) => start_components.contains(&c),
            None => {
                allow_impassable_goal
                    && Self::neighbours(goal).any(|p| {
                        p == start
                            || self
                                .component(p)
                                .is_some_and(|c| start_components.contains(&c))
                    })
            }
        }
    }

    /// Checks if start and goal cannot reach each other.
    pub fn unreachable(&self, start: Coordinate, goal: Coordinate, allow_impassable_goal: bool) -> bool {
        !self.reachable(start, goal, allow_impassable_goal)
    }
}
