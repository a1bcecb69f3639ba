use grid_astar::{Cell, Grid, Pathfinder};

// In this example a path is found on a 5x5 grid with shape
//  _____
// |S   #|
// | ##  |
// |     |
// |## # |
// |    E|
//  _____
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Cells have an 8-neighborhood and every move costs the same.

fn main() -> Result<(), grid_astar::PathError> {
    let grid = Grid::from_rows(&[
        [0u8, 0, 0, 0, 1],
        [0, 1, 1, 0, 0],
        [0, 0, 0, 0, 0],
        [1, 1, 0, 1, 0],
        [0, 0, 0, 0, 0],
    ])?;
    println!("{}", grid);
    let start = Cell::new(0, 0);
    let end = Cell::new(4, 4);
    let path = Pathfinder::new().find_path(&grid, start, end)?;
    if path.is_empty() {
        println!("No path found.");
    } else {
        println!("Path found:");
        for cell in path {
            println!("{}", cell);
        }
    }
    Ok(())
}
