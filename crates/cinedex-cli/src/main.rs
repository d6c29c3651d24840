//! Cinedex CLI: browse a movie catalog from the terminal.
//!
//! Commands: init, movies, movie, actors, actor, directors, director,
//! genres, health, completions

mod config;
mod exit;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use serde::Serialize;
use tracing::{debug, info, Level};

use cinedex_core::error::CatalogError;
use cinedex_core::id::{ActorId, DirectorId, MovieId};
use cinedex_core::seed::reference_catalog;
use cinedex_core::{Catalog, CatalogStats};
use cinedex_index::CatalogStore;
use cinedex_query::{
    format_item, format_page, path_id, ActorParams, MovieParams, OutputFormat, QueryEngine,
};

use crate::config::{FileConfig, Overrides, Settings, DB_ENV};
use crate::exit::CliExitCode;

#[derive(Parser)]
#[command(name = "cinedex")]
#[command(version)]
#[command(about = "Movie catalog with composable filters")]
struct Cli {
    /// Catalog database path (overrides CINEDEX_DB and the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Config file (defaults to ./cinedex.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format: json, table, or markdown
    #[arg(long, short = 'f', global = true)]
    format: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create the catalog database and load the reference dataset
    Init,
    /// List movies matching every supplied filter
    #[command(alias = "ls")]
    Movies(MovieArgs),
    /// Show one movie with its director, genres, and cast
    Movie {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// List actors, optionally filtered by movie or genre
    Actors(ActorArgs),
    /// Show one actor and their movies
    Actor {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// List directors with their movies
    Directors,
    /// Show one director and their movies
    Director {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// List genres
    Genres,
    /// Check that the catalog database is reachable
    Health,
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Args)]
struct MovieArgs {
    /// Only movies tagged with this genre
    #[arg(long, allow_negative_numbers = true)]
    genre_id: Option<i64>,
    /// Only movies by this director
    #[arg(long, allow_negative_numbers = true)]
    director_id: Option<i64>,
    /// Only movies featuring this actor
    #[arg(long, allow_negative_numbers = true)]
    actor_id: Option<i64>,
    /// Only movies released in this year
    #[arg(long, allow_negative_numbers = true)]
    release_year: Option<i64>,
    /// Case-insensitive title search
    #[arg(long, visible_alias = "search")]
    q: Option<String>,
}

impl From<MovieArgs> for MovieParams {
    fn from(args: MovieArgs) -> Self {
        Self {
            genre_id: args.genre_id,
            director_id: args.director_id,
            actor_id: args.actor_id,
            release_year: args.release_year,
            q: args.q,
        }
    }
}

#[derive(clap::Args)]
struct ActorArgs {
    /// Only actors in this movie's cast
    #[arg(long, allow_negative_numbers = true)]
    movie_id: Option<i64>,
    /// Only actors who appear in a movie of this genre
    #[arg(long, allow_negative_numbers = true)]
    genre_id: Option<i64>,
}

impl From<ActorArgs> for ActorParams {
    fn from(args: ActorArgs) -> Self {
        Self {
            movie_id: args.movie_id,
            genre_id: args.genre_id,
        }
    }
}

#[derive(Serialize)]
struct InitReport {
    database: String,
    seeded: bool,
    stats: CatalogStats,
}

#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    database: String,
    movies: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err}");
            return CliExitCode::from(&err).into();
        }
    };
    init_tracing(cli.verbose, settings.log_level);

    match run(cli.command, &settings) {
        Ok(Some(output)) => {
            println!("{}", output.trim_end_matches('\n'));
            CliExitCode::Success.into()
        }
        Ok(None) => CliExitCode::Success.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            CliExitCode::from(&err).into()
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, CatalogError> {
    let file = FileConfig::load(cli.config.as_deref())?;
    let env_database = std::env::var_os(DB_ENV).map(PathBuf::from);
    Settings::resolve(
        Overrides {
            database: cli.db.clone(),
            format: cli.format,
        },
        env_database,
        file,
    )
}

fn init_tracing(verbose: u8, configured: Option<Level>) {
    let level = match verbose {
        0 => configured.unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

/// Execute one command, returning the text to print on stdout.
fn run(command: Commands, settings: &Settings) -> anyhow::Result<Option<String>> {
    let format = settings.format;
    let db = settings.database.as_path();

    let output = match command {
        Commands::Init => init(db, format)?,
        Commands::Movies(args) => {
            // Reject bad parameters before touching the store.
            let filter = MovieParams::from(args)
                .validate()
                .map_err(CatalogError::from)?;
            let catalog = load_catalog(db)?;
            format_page(&QueryEngine::new(&catalog).movies(&filter), format)?
        }
        Commands::Movie { id } => {
            let id: MovieId = path_id(id).map_err(CatalogError::from)?;
            let catalog = load_catalog(db)?;
            let detail = QueryEngine::new(&catalog)
                .movie(id)
                .ok_or_else(|| not_found(MovieId::KIND, id.get()))?;
            format_item(&detail, format)?
        }
        Commands::Actors(args) => {
            let filter = ActorParams::from(args)
                .validate()
                .map_err(CatalogError::from)?;
            let catalog = load_catalog(db)?;
            format_page(&QueryEngine::new(&catalog).actors(&filter), format)?
        }
        Commands::Actor { id } => {
            let id: ActorId = path_id(id).map_err(CatalogError::from)?;
            let catalog = load_catalog(db)?;
            let detail = QueryEngine::new(&catalog)
                .actor(id)
                .ok_or_else(|| not_found(ActorId::KIND, id.get()))?;
            format_item(&detail, format)?
        }
        Commands::Directors => {
            let catalog = load_catalog(db)?;
            format_page(&QueryEngine::new(&catalog).directors(), format)?
        }
        Commands::Director { id } => {
            let id: DirectorId = path_id(id).map_err(CatalogError::from)?;
            let catalog = load_catalog(db)?;
            let detail = QueryEngine::new(&catalog)
                .director(id)
                .ok_or_else(|| not_found(DirectorId::KIND, id.get()))?;
            format_item(&detail, format)?
        }
        Commands::Genres => {
            let catalog = load_catalog(db)?;
            format_page(&QueryEngine::new(&catalog).genres(), format)?
        }
        Commands::Health => {
            let store = open_existing(db)?;
            let report = HealthReport {
                status: "ok",
                database: db.display().to_string(),
                movies: store.count_movies()?,
            };
            format_item(&report, format)?
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "cinedex", &mut io::stdout());
            return Ok(None);
        }
    };

    Ok(Some(output))
}

fn init(db: &Path, format: OutputFormat) -> anyhow::Result<String> {
    if let Some(parent) = db.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }

    let mut store = CatalogStore::open(db)?;
    let catalog = reference_catalog().map_err(CatalogError::from)?;
    let seeded = store.seed(&catalog)?;
    let stats = store.load()?.stats();
    info!(path = %db.display(), seeded, movies = stats.movies, "catalog initialized");

    Ok(format_item(
        &InitReport {
            database: db.display().to_string(),
            seeded,
            stats,
        },
        format,
    )?)
}

/// Open a store that `init` has already created.
fn open_existing(db: &Path) -> anyhow::Result<CatalogStore> {
    if !db.is_file() {
        return Err(CatalogError::Storage(format!(
            "no catalog at {}; run `cinedex init` first",
            db.display()
        ))
        .into());
    }
    Ok(CatalogStore::open(db)?)
}

fn load_catalog(db: &Path) -> anyhow::Result<Catalog> {
    let catalog = open_existing(db)?
        .load()
        .with_context(|| format!("loading catalog from {}", db.display()))?;
    debug!(movies = catalog.movie_count(), "catalog loaded");
    Ok(catalog)
}

fn not_found(kind: &'static str, id: i64) -> CatalogError {
    CatalogError::NotFound { kind, id }
}
