use std::collections::HashMap;
use std::thread;

use tile_pathfinding::*;

fn p(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

/// Asserts that the two step diagonal solution is found on an open 3x3 grid.
#[test]
fn solve_open_grid() {
    let map = TileMap::new(3, 3, TerrainKind::Grass);
    let catalog = TerrainCatalog::default();
    let (path, cost) = Pathfinder::new()
        .find_path_with_cost(&map, &catalog, p(0, 0), p(2, 2))
        .unwrap()
        .unwrap();
    assert_eq!(path, vec![p(1, 1), p(2, 2)]);
    assert_eq!(cost, 28);
}

#[test]
fn route_around_obstacle() {
    let mut map = TileMap::new(3, 3, TerrainKind::Grass);
    map.set_terrain(p(1, 1), TerrainKind::Water);
    let catalog = TerrainCatalog::default();
    let pathfinder = Pathfinder::new();
    let path = pathfinder.find_path(&map, &catalog, p(0, 0), p(2, 2)).unwrap();
    assert!(!path.contains(&p(1, 1)));
    assert_eq!(path.last(), Some(&p(2, 2)));
    assert_eq!(path.len(), 3);
    let cost = pathfinder.path_cost(&map, &catalog, p(0, 0), &path).unwrap();
    assert_eq!(cost, 34);
    assert!(cost > 28);
}

#[test]
fn equal_start_goal() {
    let map: TileMap = "~s.".parse().unwrap();
    let catalog = TerrainCatalog::default();
    for x in 0..3 {
        let path = find_path(&map, &catalog, p(x, 0), p(x, 0)).unwrap();
        assert!(path.is_empty());
    }
}

#[test]
fn goal_ringed_by_water_is_unreachable() {
    let map: TileMap = ".....\n.~~~.\n.~.~.\n.~~~.\n.....".parse().unwrap();
    let catalog = TerrainCatalog::default();
    let path = find_path(&map, &catalog, p(0, 0), p(2, 2)).unwrap();
    assert!(path.is_empty());
    assert!(ComponentIndex::new(&map, &catalog).unreachable(p(0, 0), p(2, 2), true));
}

#[test]
fn impassable_goal_yields_empty_path_by_default() {
    let map: TileMap = "..~".parse().unwrap();
    let catalog = TerrainCatalog::default();
    assert!(find_path(&map, &catalog, p(0, 0), p(2, 0)).unwrap().is_empty());
    assert!(ComponentIndex::new(&map, &catalog).unreachable(p(0, 0), p(2, 0), false));
    // Standing on it is still fine
    assert!(find_path(&map, &catalog, p(2, 0), p(2, 0)).unwrap().is_empty());
}

#[test]
fn long_corridor_of_slow_terrain_saturates_cost() {
    let map = TileMap::new(4000, 1, TerrainKind::Sand);
    let catalog = TerrainCatalog::new([
        (TerrainKind::Grass, TerrainProperties::new(1.0, true, 2)),
        (TerrainKind::Sand, TerrainProperties::new(1.4e-5, true, 1)),
        (TerrainKind::Water, TerrainProperties::new(0.25, false, 0)),
    ])
    .unwrap();
    let pathfinder = Pathfinder::new();
    let (path, cost) = pathfinder
        .find_path_with_cost(&map, &catalog, p(0, 0), p(3999, 0))
        .unwrap()
        .unwrap();
    assert_eq!(path.len(), 3999);
    assert_eq!(cost, i32::MAX);
    assert_eq!(
        pathfinder.path_cost(&map, &catalog, p(0, 0), &path).unwrap(),
        i32::MAX
    );
}

#[test]
fn missing_goal_is_a_caller_error() {
    let map = TileMap::new(3, 3, TerrainKind::Grass);
    let catalog = TerrainCatalog::default();
    let err = find_path(&map, &catalog, p(0, 0), p(3, 3)).unwrap_err();
    assert_eq!(err, PathfindingError::TileNotFound { coordinate: p(3, 3) });
    assert!(err.to_string().contains(&p(3, 3).to_string()));
}

#[test]
fn entering_slow_terrain_costs_more() {
    let catalog = TerrainCatalog::default();
    let grass = Tile::new(p(0, 0), TerrainKind::Grass);
    let sand = Tile::new(p(1, 0), TerrainKind::Sand);
    let into_sand = cost_between(&catalog, &grass.coordinate, &sand);
    let out_of_sand = cost_between(&catalog, &sand.coordinate, &grass);
    assert_ne!(into_sand, out_of_sand);
    assert!(into_sand > out_of_sand);
}

#[test]
fn detours_around_slow_terrain_when_cheaper() {
    // A sand band across the middle with a grass gap on the right
    let map: TileMap = "....\nsss.\n....".parse().unwrap();
    let catalog = TerrainCatalog::default();
    let pathfinder = Pathfinder::new();
    let (path, cost) = pathfinder
        .find_path_with_cost(&map, &catalog, p(0, 0), p(0, 2))
        .unwrap()
        .unwrap();
    // Straight through sand: 20 + 10 = 30, cheaper than the 60+ grass detour
    assert_eq!(path, vec![p(0, 1), p(0, 2)]);
    assert_eq!(cost, 30);

    let (path, _) = pathfinder
        .find_path_with_cost(&map, &catalog, p(2, 0), p(2, 2))
        .unwrap()
        .unwrap();
    // Via (3, 1): 14 + 14 = 28 beats 20 + 10 = 30 through sand
    assert_eq!(path, vec![p(3, 1), p(2, 2)]);
}

#[test]
fn heuristic_never_overestimates_on_uniform_terrain() {
    let map = TileMap::new(8, 8, TerrainKind::Grass);
    let catalog = TerrainCatalog::default();
    let pathfinder = Pathfinder::new();
    let start = p(1, 2);
    for tile in map.tiles() {
        let (_, cost) = pathfinder
            .find_path_with_cost(&map, &catalog, start, tile.coordinate)
            .unwrap()
            .unwrap();
        assert!(distance(&start, &tile.coordinate) <= cost);
        // Nothing blocks the way, so the estimate is exact
        assert_eq!(distance(&start, &tile.coordinate), cost);
    }
}

#[test]
fn repeated_searches_are_identical() {
    let map: TileMap = "..s...\n.~~s..\n..s.~.\n.....s".parse().unwrap();
    let catalog = TerrainCatalog::default();
    let first = find_path(&map, &catalog, p(0, 0), p(5, 3)).unwrap();
    for _ in 0..10 {
        assert_eq!(find_path(&map, &catalog, p(0, 0), p(5, 3)).unwrap(), first);
    }
}

#[test]
fn concurrent_searches_share_map_and_catalog() {
    let map: TileMap = "........\n.~~~~~~.\n.~....~.\n.~.~~.~.\n.~.~..~.\n.~.~~~~.\n.s......"
        .parse()
        .unwrap();
    let catalog = TerrainCatalog::default();
    let queries = [
        (p(0, 0), p(4, 4)),
        (p(7, 6), p(2, 2)),
        (p(0, 6), p(7, 0)),
        (p(5, 4), p(5, 4)),
    ];
    let expected = queries
        .iter()
        .map(|&(s, g)| find_path(&map, &catalog, s, g).unwrap())
        .collect::<Vec<_>>();
    let results = thread::scope(|scope| {
        let (map, catalog) = (&map, &catalog);
        let handles = queries
            .iter()
            .map(|&(s, g)| scope.spawn(move || find_path(map, catalog, s, g).unwrap()))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });
    assert_eq!(results, expected);
}

#[test]
fn sparse_grid_with_holes() {
    // Two islands joined by a single tile at (0, 0); (1, 0) is not populated
    let mut grid: HashMap<Coordinate, TerrainKind> = HashMap::new();
    for x in -3..=-1 {
        grid.insert(p(x, 0), TerrainKind::Grass);
    }
    grid.insert(p(0, 0), TerrainKind::Sand);
    grid.insert(p(1, 1), TerrainKind::Grass);
    grid.insert(p(2, 1), TerrainKind::Grass);
    let catalog = TerrainCatalog::default();
    let path = find_path(&grid, &catalog, p(-3, 0), p(2, 1)).unwrap();
    assert_eq!(path, vec![p(-2, 0), p(-1, 0), p(0, 0), p(1, 1), p(2, 1)]);
    assert!(matches!(
        find_path(&grid, &catalog, p(-3, 0), p(1, 0)),
        Err(PathfindingError::TileNotFound { .. })
    ));
}

#[test]
fn custom_catalog_changes_passability() {
    let map: TileMap = ".s.\n.s.\n.s.".parse().unwrap();
    let catalog = TerrainCatalog::new([
        (TerrainKind::Grass, TerrainProperties::new(1.0, true, 2)),
        (TerrainKind::Sand, TerrainProperties::new(0.5, false, 1)),
        (TerrainKind::Water, TerrainProperties::new(0.25, false, 0)),
    ])
    .unwrap();
    let path = Pathfinder::with_config(SearchConfig {
        allow_impassable_goal: false,
        ..Default::default()
    })
    .find_path(&map, &catalog, p(0, 0), p(2, 2))
    .unwrap();
    assert!(path.is_empty());
}
