//! Command line driver for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_grid::{
    config::{CliOverrides, OutputFormat, Settings},
    initial_grid,
    utils::{ColorOutput, GridFormatter},
    GenerationReport, LifeGrid, Pattern, Simulation,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_grid")]
#[command(about = "Conway's Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a grid and run it for a number of generations
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Grid width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Probability of each cell starting alive (overrides config)
        #[arg(short, long)]
        probability: Option<f64>,

        /// Random seed for a reproducible start (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Start from a built-in pattern instead of random cells
        #[arg(long, value_enum)]
        pattern: Option<Pattern>,

        /// Number of generations to run (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Milliseconds between generations (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Print the grid after every generation
        #[arg(long)]
        show_grid: bool,

        /// Label printed grids with row and column numbers
        #[arg(long)]
        coords: bool,

        /// Emit one JSON report per generation
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = execute(Cli::parse()) {
        eprintln!("{}", ColorOutput::error(&format!("Error: {:#}", err)));
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            config,
            height,
            width,
            probability,
            seed,
            pattern,
            generations,
            interval,
            show_grid,
            coords,
            json,
        } => {
            let overrides = CliOverrides {
                height,
                width,
                probability,
                seed,
                pattern,
                generations,
                interval_ms: interval,
            };
            let mut settings = load_settings(&config)?;
            settings.merge_with_cli(&overrides);
            if show_grid {
                settings.output.show_grid = true;
            }
            if coords {
                settings.output.show_coords = true;
            }
            if json {
                settings.output.format = OutputFormat::Json;
            }
            run_command(settings)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        Ok(Settings::default())
    }
}

fn run_command(settings: Settings) -> Result<()> {
    settings
        .validate()
        .context("Configuration validation failed")?;
    debug!(?settings, "Resolved settings");

    let grid = initial_grid(&settings).context("Failed to build the initial grid")?;
    let cells = grid.height() * grid.width();
    let format = settings.output.format;
    let show_grid = settings.output.show_grid;
    let show_coords = settings.output.show_coords;

    if format == OutputFormat::Text {
        println!(
            "{}",
            ColorOutput::info(&format!(
                "Starting {}x{} grid with {} living cells",
                grid.height(),
                grid.width(),
                grid.living_count()
            ))
        );
        if show_grid {
            println!("{}", render_grid(&grid, show_coords));
        }
    }

    let simulation = Simulation::new(grid, settings.interval());
    let viewer = simulation.clone();
    let start_time = Instant::now();
    let mut last = GenerationReport {
        generation: 0,
        living: 0,
    };
    let mut print_error = None;

    simulation.run(settings.driver.generations, |report| {
        last = *report;
        match format {
            OutputFormat::Json => match serde_json::to_string(report) {
                Ok(line) => println!("{}", line),
                Err(err) => {
                    print_error.get_or_insert(err);
                    viewer.stop_handle().stop();
                }
            },
            OutputFormat::Text => {
                println!("{}", GridFormatter::format_report(report, cells));
                if show_grid {
                    println!("{}", render_grid(&viewer.snapshot(), show_coords));
                }
            }
        }
    });

    if let Some(err) = print_error {
        return Err(err).context("Failed to serialize generation report");
    }

    if format == OutputFormat::Text {
        let message = format!(
            "Ran {} generation(s) in {:.3}s, {} living cells remain",
            last.generation,
            start_time.elapsed().as_secs_f64(),
            last.living
        );
        if last.generation > 0 && last.living == 0 {
            println!("{}", ColorOutput::warning(&format!("{} (extinct)", message)));
        } else {
            println!("{}", ColorOutput::success(&message));
        }
    }

    Ok(())
}

fn render_grid(grid: &LifeGrid, show_coords: bool) -> String {
    if show_coords {
        GridFormatter::format_grid_with_coords(grid)
    } else {
        GridFormatter::format_grid_compact(grid)
    }
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_path = directory.join("config").join("default.yaml");

    if config_path.exists() && !force {
        println!("Skipped: {} (already exists)", config_path.display());
        return Ok(());
    }

    Settings::default()
        .to_file(&config_path)
        .context("Failed to create default configuration")?;
    println!("{}", ColorOutput::success(&format!("Created: {}", config_path.display())));

    Ok(())
}
