use tile_pathfinding::{Coordinate, Pathfinder, TerrainCatalog, TileMap};

// Sand halves movement speed, so entering it costs twice as much as grass. The path below
// skirts the sand patch unless going through it is cheaper. A catalog file passed as the first
// argument replaces the built-in terrain table.
fn main() {
    let catalog = match std::env::args().nth(1) {
        Some(path) => match TerrainCatalog::from_path(&path) {
            Ok(catalog) => catalog,
            Err(err) => {
                eprintln!("{}", err);
                return;
            }
        },
        None => TerrainCatalog::default(),
    };
    let map: TileMap = "........\n..ssss..\n..ssss..\n..ssss..\n........"
        .parse()
        .expect("demo map is well formed");
    println!("{}", map);
    let pathfinder = Pathfinder::new();
    let start = Coordinate::new(0, 2);
    let end = Coordinate::new(7, 2);
    match pathfinder.find_path_with_cost(&map, &catalog, start, end) {
        Ok(Some((path, cost))) => {
            println!("Path with cost {}:", cost);
            for p in path {
                println!("{:?}", p);
            }
        }
        Ok(None) => println!("{} cannot be reached from {}", end, start),
        Err(err) => println!("{}", err),
    }
}
