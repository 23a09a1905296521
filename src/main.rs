use docopt::Docopt;
use error_chain::bail;
use prims_maze::{
    grid_displays::{PathDisplay, WeightsDisplay},
    Maze,
    MazeConfig,
    PrimsMazeGenerator,
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    io,
    io::prelude::*,
    fs::File,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Prim's Mazes

Usage:
    prims_maze_driver -h | --help
    prims_maze_driver [--world-width=<w> --world-height=<h>] [--cell-diameter=<d>] [--seed=<n>] [--show-weights | --show-path] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --world-width=<w>      Width of the maze area in world units [default: 10].
    --world-height=<h>     Height of the maze area in world units [default: 10].
    --cell-diameter=<d>    Width and height of one cell in world units [default: 1].
    --seed=<n>             Seed the random number generator to get the same maze every time.
    --show-weights         Show the weight of every opened cell instead of the start and end markers.
    --show-path            Mark the cells on the way from the start 'S' to the end 'E'.
    --text-out=<path>      Output file path for a textual rendering of a maze.
    --save-edges=<path>    Serialize the maze passages to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.

Set RUST_LOG (e.g. RUST_LOG=prims_maze=debug) to see how the maze was grown.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_world_width: f32,
    flag_world_height: f32,
    flag_cell_diameter: f32,
    flag_seed: Option<u64>,
    flag_show_weights: bool,
    flag_show_path: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

// `error_chain!` creates the Error, ErrorKind, ResultExt and Result types.
// ResultExt adds the `chain_err` trait method.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            Docopt(::docopt::Error);
            Io(::std::io::Error);
            Generation(::prims_maze::GenerationError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    init_logging();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let config = MazeConfig::new(args.flag_world_width, args.flag_world_height, args.flag_cell_diameter);
    let mut generator = PrimsMazeGenerator::new(config);
    let mut rng = match args.flag_seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };

    let maze = generator.generate(&mut rng)
        .chain_err(|| format!("Failed to generate a {} x {} maze with cell diameter {}",
                              args.flag_world_width, args.flag_world_height, args.flag_cell_diameter))?;
    info!(seed = ?args.flag_seed,
          columns = maze.grid().columns().0,
          rows = maze.grid().rows().0,
          opened = maze.opened().len(),
          "generated maze");

    let text = render_maze(maze, &args);
    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(maze, &args.flag_save_edges)?;
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn render_maze(maze: &Maze, maze_args: &MazeArgs) -> String {
    if maze_args.flag_show_weights {
        maze.render(&WeightsDisplay)
    } else if maze_args.flag_show_path {
        maze.render(&PathDisplay::new(&maze.solution()))
    } else {
        maze.to_string()
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let grid = maze.grid();
    let mut graph_data = format!("{} {}\n", grid.size(), grid.links_count());

    for (src, dst) in grid.iter_links() {
        let (index_a, index_b) = match (grid.grid_coordinate_to_index(src), grid.grid_coordinate_to_index(dst)) {
            (Some(a), Some(b)) => (a, b),
            _ => bail!("Passage between {:?} and {:?} is outside the maze", src, dst),
        };
        graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
