use tile_pathfinding::{find_path, Coordinate, TerrainCatalog, TileMap};

// In this example a path is found on a map with shape
// ~~~~~
// ~S..~
// ~.~.~
// ~..E~
// ~~~~~
// where
// - ~ marks water, which cannot be entered
// - S marks the start
// - E marks the end
fn main() {
    let map: TileMap = "~~~~~\n~...~\n~.~.~\n~...~\n~~~~~"
        .parse()
        .expect("demo map is well formed");
    let catalog = TerrainCatalog::default();
    println!("{}", map);
    let start = Coordinate::new(1, 1);
    let end = Coordinate::new(3, 3);
    match find_path(&map, &catalog, start, end) {
        Ok(path) if path.is_empty() => println!("{} cannot be reached from {}", end, start),
        Ok(path) => {
            println!("A path has been found:");
            for p in path {
                println!("{:?}", p);
            }
        }
        Err(err) => println!("{}", err),
    }
}
