use std::sync::atomic::{AtomicBool, Ordering};

use itertools::Itertools;
use log::{debug, warn};
use smallvec::SmallVec;

use crate::error::PathfindingError;
use crate::grid::{Tile, TileGrid};
use crate::search::{astar, SearchOutcome};
use crate::terrain::TerrainCatalog;
use crate::{Coordinate, Path, C, D, N_SMALLVEC_SIZE};

/// Octile distance scaled by [C]: cardinal steps cost [C] and diagonal steps [D].
pub fn distance(a: &Coordinate, b: &Coordinate) -> i32 {
    let delta_x = (a.x - b.x).abs();
    let delta_y = (a.y - b.y).abs();
    if delta_x > delta_y {
        D * delta_y + C * (delta_x - delta_y)
    } else {
        D * delta_x + C * (delta_y - delta_x)
    }
}

/// Cost of stepping from `from` onto `to`: the distance divided by the speed modifier of the
/// destination's terrain, rounded to the nearest integer with halves going to the even value.
/// Only the destination terrain matters, so the cost is not symmetric.
pub fn cost_between(catalog: &TerrainCatalog, from: &Coordinate, to: &Tile) -> i32 {
    let modifier = catalog.properties(to.terrain).move_speed_modifier;
    (distance(from, &to.coordinate) as f32 / modifier).round_ties_even() as i32
}

/// Knobs for a [Pathfinder].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Lets the goal be entered as the final step even when its terrain is impassable. Off by
    /// default, so an impassable goal other than the start yields an empty path.
    pub allow_impassable_goal: bool,
    /// Aborts the search with an empty path once this many tiles have been expanded.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            allow_impassable_goal: false,
            max_expansions: None,
        }
    }
}

/// A* search over a [TileGrid] weighted by a [TerrainCatalog]. Holds no per-query state, so one
/// value can serve concurrent searches.
#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    pub config: SearchConfig,
}

impl Pathfinder {
    pub fn new() -> Pathfinder {
        Pathfinder::default()
    }

    pub fn with_config(config: SearchConfig) -> Pathfinder {
        Pathfinder { config }
    }

    /// Computes the cheapest path from `start` to `goal`. The path excludes `start` and ends with
    /// `goal`; it is empty when the goal cannot be reached or equals the start. Fails if either
    /// coordinate has no tile.
    pub fn find_path<G: TileGrid + ?Sized>(
        &self,
        grid: &G,
        catalog: &TerrainCatalog,
        start: Coordinate,
        goal: Coordinate,
    ) -> Result<Path, PathfindingError> {
        self.find_path_with_cost(grid, catalog, start, goal)
            .map(|found| found.map(|(path, _)| path).unwrap_or_default())
    }

    /// Like [find_path](Self::find_path), but returns the accumulated cost as well and reports an
    /// unreachable goal as [None].
    pub fn find_path_with_cost<G: TileGrid + ?Sized>(
        &self,
        grid: &G,
        catalog: &TerrainCatalog,
        start: Coordinate,
        goal: Coordinate,
    ) -> Result<Option<(Path, i32)>, PathfindingError> {
        self.search(grid, catalog, start, goal, None)
    }

    /// Like [find_path](Self::find_path), but gives up with an empty path as soon as `cancel` is
    /// observed to be set. The flag is checked before every expansion.
    pub fn find_path_cancellable<G: TileGrid + ?Sized>(
        &self,
        grid: &G,
        catalog: &TerrainCatalog,
        start: Coordinate,
        goal: Coordinate,
        cancel: &AtomicBool,
    ) -> Result<Path, PathfindingError> {
        self.search(grid, catalog, start, goal, Some(cancel))
            .map(|found| found.map(|(path, _)| path).unwrap_or_default())
    }

    fn search<G: TileGrid + ?Sized>(
        &self,
        grid: &G,
        catalog: &TerrainCatalog,
        start: Coordinate,
        goal: Coordinate,
        cancel: Option<&AtomicBool>,
    ) -> Result<Option<(Path, i32)>, PathfindingError> {
        for coordinate in [start, goal] {
            if grid.tile_at(coordinate).is_none() {
                return Err(PathfindingError::TileNotFound { coordinate });
            }
        }
        let allow_impassable_goal = self.config.allow_impassable_goal;
        let max_expansions = self.config.max_expansions;
        let (outcome, expanded) = astar(
            &start,
            |node| {
                grid.neighbors_of(*node)
                    .into_iter()
                    .filter(|tile| {
                        catalog.passable(tile.terrain)
                            || (allow_impassable_goal && tile.coordinate == goal)
                    })
                    .map(|tile| (tile.coordinate, cost_between(catalog, node, &tile)))
                    .collect::<SmallVec<[(Coordinate, i32); N_SMALLVEC_SIZE]>>()
            },
            |point| distance(point, &goal),
            |point| *point == goal,
            |expanded| {
                cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
                    || max_expansions.is_some_and(|limit| expanded >= limit)
            },
        );
        match outcome {
            SearchOutcome::Found { path, cost } => {
                debug!(
                    "Found path from {} to {} of length {} and cost {}, expanded {} tiles",
                    start,
                    goal,
                    path.len(),
                    cost,
                    expanded
                );
                Ok(Some((path, cost)))
            }
            SearchOutcome::Exhausted => {
                debug!(
                    "{} is not reachable from {}, expanded {} tiles",
                    goal, start, expanded
                );
                Ok(None)
            }
            SearchOutcome::Aborted => {
                warn!(
                    "Search from {} to {} aborted after expanding {} tiles",
                    start, goal, expanded
                );
                Ok(None)
            }
        }
    }

    /// Sums [cost_between] over each step of `path`, starting from `start`. Saturates like the
    /// search does.
    pub fn path_cost<G: TileGrid + ?Sized>(
        &self,
        grid: &G,
        catalog: &TerrainCatalog,
        start: Coordinate,
        path: &[Coordinate],
    ) -> Result<i32, PathfindingError> {
        grid.tile_at(start)
            .ok_or(PathfindingError::TileNotFound { coordinate: start })?;
        std::iter::once(start)
            .chain(path.iter().copied())
            .tuple_windows()
            .map(|(from, to)| {
                grid.tile_at(to)
                    .map(|tile| cost_between(catalog, &from, &tile))
                    .ok_or(PathfindingError::TileNotFound { coordinate: to })
            })
            .fold_ok(0, i32::saturating_add)
    }
}

/// Computes a path with the default [SearchConfig]. See [Pathfinder::find_path].
pub fn find_path<G: TileGrid + ?Sized>(
    grid: &G,
    catalog: &TerrainCatalog,
    start: Coordinate,
    goal: Coordinate,
) -> Result<Path, PathfindingError> {
    Pathfinder::new().find_path(grid, catalog, start, goal)
}
