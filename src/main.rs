use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{CommandFactory, Parser, ValueEnum};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use maze_forge::config::{self, Settings};
use maze_forge::format::{self, Format};
use maze_forge::{generator, pathfinder, Grid, MazeError, Strategy};

/// Maze generator and solver
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generate a maze of HEIGHT x WIDTH cells (each from 1 to 100)
    #[arg(long, visible_alias = "gm", num_args = 2, value_names = ["HEIGHT", "WIDTH"])]
    generate_maze: Option<Vec<u32>>,

    /// Print the maze to the console
    #[arg(long, visible_alias = "pm")]
    print_maze: bool,

    /// Load a maze from a .txt, .png or .jpg file
    #[arg(long, visible_alias = "im", value_name = "PATH")]
    import_maze: Option<PathBuf>,

    /// Save the maze to a .txt, .png or .jpg file
    #[arg(long, visible_alias = "em", value_name = "PATH")]
    export_maze: Option<PathBuf>,

    /// Print the maze with its solution to the console
    #[arg(long, visible_alias = "psm")]
    print_solved_maze: bool,

    /// Save the solved maze to a .png or .jpg file
    #[arg(long, visible_alias = "esm", value_name = "PATH")]
    export_solved_maze: Option<PathBuf>,

    /// Solve between two cells instead of corner to corner
    #[arg(
        long,
        visible_alias = "sm",
        num_args = 4,
        allow_negative_numbers = true,
        value_names = ["START_X", "START_Y", "END_X", "END_Y"]
    )]
    solve_maze: Option<Vec<i64>>,

    /// Search used for solving
    #[arg(long, value_enum, default_value_t = SearchArg::Bfs)]
    strategy: SearchArg,

    /// Seed for reproducible generation [env: MAZE_SEED]
    #[arg(long)]
    seed: Option<u64>,

    /// Pixel size of one maze square in images [env: MAZE_CELL_PX]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=config::MAX_CELL_PX as i64))]
    cell_size: Option<u32>,

    /// Print without colours [env: MAZE_COLOR=0]
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SearchArg {
    Bfs,
    Dfs,
}

impl From<SearchArg> for Strategy {
    fn from(arg: SearchArg) -> Self {
        match arg {
            SearchArg::Bfs => Strategy::Bfs,
            SearchArg::Dfs => Strategy::Dfs,
        }
    }
}

impl Args {
    fn any_action(&self) -> bool {
        self.generate_maze.is_some()
            || self.import_maze.is_some()
            || self.print_maze
            || self.export_maze.is_some()
            || self.print_solved_maze
            || self.export_solved_maze.is_some()
    }

    fn wants_solution(&self) -> bool {
        self.print_solved_maze || self.export_solved_maze.is_some() || self.solve_maze.is_some()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = read_settings(&args);
    debug!("settings: {:?}", settings);
    run(&args, &settings, &mut io::stdout(), &mut io::stderr());
    Ok(())
}

fn read_settings(args: &Args) -> Settings {
    let mut settings = Settings::from_env();
    if let Some(px) = args.cell_size {
        settings.cell_px = px;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if args.no_color {
        settings.color = false;
    }
    settings
}

/// Runs the requested actions in order. A failed action is reported on `err`
/// and the rest still run. With nothing requested the usage help is printed.
fn run<O: Write, E: Write>(args: &Args, settings: &Settings, out: &mut O, err: &mut E) {
    if !args.any_action() {
        report(err, writeln!(out, "{}", Args::command().render_help()).map_err(Into::into));
        return;
    }

    let mut maze: Option<Grid> = None;

    if let Some(dims) = &args.generate_maze {
        maze = report(err, generate(dims, settings));
    }

    if let Some(path) = &args.import_maze {
        report(
            err,
            import(path, &mut maze, settings)
                .with_context(|| format!("cannot import {}", path.display())),
        );
    }

    if args.print_maze {
        report(err, with_maze(maze.as_ref()).and_then(|grid| show(out, "Maze:", grid, settings)));
    }

    if let Some(path) = &args.export_maze {
        report(err, with_maze(maze.as_ref()).and_then(|grid| export(grid, path, settings)));
    }

    if args.wants_solution() {
        let Some(grid) = maze.as_mut() else {
            report::<()>(err, Err(anyhow!("nothing to solve: generate or import a maze first")));
            return;
        };
        if report(err, solve(grid, args, out)).is_none() {
            return;
        }
        if args.print_solved_maze {
            report(err, show(out, "Solution:", grid, settings));
        }
        if let Some(path) = &args.export_solved_maze {
            report(err, export_solved(grid, path, settings));
        }
    }
}

fn report<T>(err: &mut impl Write, result: anyhow::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            let _ = writeln!(err, "Error: {:#}", e);
            None
        }
    }
}

fn with_maze(maze: Option<&Grid>) -> anyhow::Result<&Grid> {
    maze.ok_or_else(|| anyhow!("no maze loaded: generate or import one first"))
}

fn generate(dims: &[u32], settings: &Settings) -> anyhow::Result<Grid> {
    let &[height, width] = dims else {
        bail!("expected HEIGHT and WIDTH");
    };
    if !config::side_in_range(height) || !config::side_in_range(width) {
        bail!(
            "HEIGHT and WIDTH must be between {} and {}, got {}x{}",
            config::MIN_SIDE,
            config::MAX_SIDE,
            height,
            width
        );
    }
    let (height, width) = (height as usize, width as usize);
    let grid = match settings.seed {
        Some(seed) => generator::generate(height, width, &mut SmallRng::seed_from_u64(seed))?,
        None => generator::generate(height, width, &mut rand::thread_rng())?,
    };
    info!("generated {}x{} maze", height, width);
    Ok(grid)
}

/// Replaces the current maze with the file's contents. A rejected file leaves
/// the current maze as it was.
fn import(path: &Path, maze: &mut Option<Grid>, settings: &Settings) -> anyhow::Result<()> {
    let markers = format::read(path, settings.cell_px)?;
    match maze {
        Some(grid) => grid.load(markers)?,
        None => {
            let mut grid = Grid::new(1, 1)?;
            grid.load(markers)?;
            *maze = Some(grid);
        }
    }
    Ok(())
}

fn show(out: &mut impl Write, title: &str, grid: &Grid, settings: &Settings) -> anyhow::Result<()> {
    writeln!(out, "{}", title)?;
    grid.print_to(out, settings.color)?;
    Ok(())
}

fn export(grid: &Grid, path: &Path, settings: &Settings) -> anyhow::Result<()> {
    format::write(grid, path, settings.cell_px)
        .with_context(|| format!("cannot export to {}", path.display()))
}

fn export_solved(grid: &Grid, path: &Path, settings: &Settings) -> anyhow::Result<()> {
    if Format::from_path(path)? != Format::Image {
        return Err(MazeError::UnsupportedFormat(format!(
            "{} (solved mazes export to .png or .jpg only)",
            path.display()
        ))
        .into());
    }
    export(grid, path, settings)
}

fn solve(grid: &mut Grid, args: &Args, out: &mut impl Write) -> anyhow::Result<()> {
    // X is the column, Y the row.
    let (start, end) = match args.solve_maze.as_deref() {
        Some(&[sx, sy, ex, ey]) => (Some((sy, sx)), Some((ey, ex))),
        Some(_) => bail!("expected START_X START_Y END_X END_Y"),
        None => (None, None),
    };
    let path = pathfinder::solve(grid, args.strategy.into(), start, end)?;
    if path.is_empty() {
        writeln!(out, "No path between the given cells.")?;
    }
    Ok(())
}
