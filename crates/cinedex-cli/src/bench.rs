//! Cinedex Benchmark Binary
//!
//! Measures seeding, loading, and filter queries at different catalog scales
//! (1,000, 10,000, 50,000 movies).
//! Run with: `cargo run --bin cinedex-bench --release`

use std::time::Instant;

use anyhow::Context;
use cinedex_core::entity::NewMovie;
use cinedex_core::id::{ActorId, DirectorId, GenreId};
use cinedex_core::Catalog;
use cinedex_index::CatalogStore;
use cinedex_query::{MovieFilter, MovieParams, QueryEngine};

// ---------------------------------------------------------------------------
// Synthetic data generation
// ---------------------------------------------------------------------------

const GENRES: &[&str] = &[
    "Action",
    "Comedy",
    "Drama",
    "Sci-Fi",
    "Thriller",
    "Horror",
    "Romance",
    "Documentary",
];

const TITLE_WORDS: &[&str] = &[
    "Dark", "Silent", "Last", "Golden", "Broken", "Hidden", "Iron", "Crimson", "Lost", "Final",
    "Night", "River", "Empire", "Signal", "Harbor", "Storm", "Garden", "Echo", "Frontier",
    "Machine",
];

const CAST_SIZE: usize = 4;

fn generate_catalog(n: usize) -> anyhow::Result<Catalog> {
    let mut builder = Catalog::builder();

    let genres = GENRES
        .iter()
        .map(|name| builder.add_genre(*name))
        .collect::<Result<Vec<GenreId>, _>>()?;
    let directors: Vec<DirectorId> = (0..(n / 10).max(1))
        .map(|i| builder.add_director(format!("Director {i}")))
        .collect::<Result<_, _>>()?;
    let actors: Vec<ActorId> = (0..(n / 4).max(CAST_SIZE))
        .map(|i| builder.add_actor(format!("Actor {i}")))
        .collect::<Result<_, _>>()?;

    for i in 0..n {
        let title = format!(
            "{} {} {}",
            TITLE_WORDS[i % TITLE_WORDS.len()],
            TITLE_WORDS[(i / TITLE_WORDS.len()) % TITLE_WORDS.len()],
            i
        );
        let movie = builder.add_movie(NewMovie {
            title,
            release_year: 1950 + (i % 75) as u32,
            rating: 5.0 + (i % 50) as f64 / 10.0,
            director: directors[i % directors.len()],
        })?;
        for k in 0..CAST_SIZE {
            builder.cast(movie, actors[(i * 7 + k * 13) % actors.len()])?;
        }
        builder.tag(movie, genres[i % genres.len()])?;
        builder.tag(movie, genres[(i / 3) % genres.len()])?;
    }

    Ok(builder.build())
}

// ---------------------------------------------------------------------------
// Statistics and units
// ---------------------------------------------------------------------------

/// Nearest-rank percentile of an ascending sample.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = (p / 100.0 * sorted.len() as f64).ceil() as usize;
    sorted
        .get(rank.clamp(1, sorted.len().max(1)) - 1)
        .copied()
        .unwrap_or(0.0)
}

/// A unit threshold: values at or above `factor` are divided by it and
/// printed with `precision` decimals followed by `suffix`.
type Unit = (f64, usize, &'static str);

const MICROS: &[Unit] = &[(1e6, 1, " s"), (1e3, 0, " ms"), (1.0, 0, " us")];
const RATE: &[Unit] = &[(1e6, 1, "M/s"), (1e3, 1, "K/s"), (1.0, 0, "/s")];
const BYTES: &[Unit] = &[(1_048_576.0, 1, " MB"), (1_024.0, 0, " KB")];
const COUNT: &[Unit] = &[(1e6, 0, "M"), (1e3, 0, "K"), (1.0, 0, "")];

/// Render `value` with the first unit it reaches, falling back to the last.
fn scaled(value: f64, units: &[Unit]) -> String {
    let Some(&(factor, precision, suffix)) = units
        .iter()
        .find(|(factor, _, _)| value >= *factor)
        .or_else(|| units.last())
    else {
        return value.to_string();
    };
    format!("{:.precision$}{suffix}", value / factor)
}

// ---------------------------------------------------------------------------
// Benchmark results
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Latency {
    p50_us: f64,
    p95_us: f64,
    p99_us: f64,
}

impl Latency {
    fn from_samples(mut samples: Vec<f64>) -> Self {
        samples.sort_by(f64::total_cmp);
        Self {
            p50_us: percentile(&samples, 50.0),
            p95_us: percentile(&samples, 95.0),
            p99_us: percentile(&samples, 99.0),
        }
    }
}

#[derive(Default)]
struct ScaleResult {
    seed_movies_per_sec: f64,
    load_us: f64,
    single_filter: Latency,
    combined_filter: Latency,
    title_search: Latency,
    detail_lookup: Latency,
    db_size_bytes: u64,
}

// ---------------------------------------------------------------------------
// Benchmark runner for a single scale
// ---------------------------------------------------------------------------

const SAMPLES: usize = 50;

fn time_queries(mut query: impl FnMut(usize)) -> Latency {
    let samples = (0..SAMPLES)
        .map(|i| {
            let start = Instant::now();
            query(i);
            start.elapsed().as_micros() as f64
        })
        .collect();
    Latency::from_samples(samples)
}

fn filter(params: MovieParams) -> anyhow::Result<MovieFilter> {
    Ok(params.validate()?)
}

fn run_benchmark(n: usize) -> anyhow::Result<ScaleResult> {
    let tmp = tempfile::TempDir::new().context("failed to create temp dir")?;
    let db_path = tmp.path().join("bench.db");
    let mut store = CatalogStore::open(&db_path)?;

    let mut result = ScaleResult::default();
    let generated = generate_catalog(n)?;

    // --- Seed ---
    let start = Instant::now();
    store.seed(&generated)?;
    result.seed_movies_per_sec = n as f64 / start.elapsed().as_secs_f64();

    // --- Load ---
    let start = Instant::now();
    let catalog = store.load()?;
    result.load_us = start.elapsed().as_micros() as f64;

    let engine = QueryEngine::new(&catalog);
    let genre_count = GENRES.len() as i64;
    let director_count = (n / 10).max(1) as i64;
    let actor_count = (n / 4).max(CAST_SIZE) as i64;

    let by_genre: Vec<MovieFilter> = (0..SAMPLES as i64)
        .map(|i| {
            filter(MovieParams {
                genre_id: Some(i % genre_count + 1),
                ..Default::default()
            })
        })
        .collect::<anyhow::Result<_>>()?;
    let combined: Vec<MovieFilter> = (0..SAMPLES as i64)
        .map(|i| {
            filter(MovieParams {
                genre_id: Some(i % genre_count + 1),
                director_id: Some(i % director_count + 1),
                actor_id: Some(i * 31 % actor_count + 1),
                release_year: Some(1950 + i % 75),
                q: None,
            })
        })
        .collect::<anyhow::Result<_>>()?;
    let by_title: Vec<MovieFilter> = (0..SAMPLES)
        .map(|i| {
            filter(MovieParams {
                q: Some(TITLE_WORDS[i % TITLE_WORDS.len()].to_lowercase()),
                ..Default::default()
            })
        })
        .collect::<anyhow::Result<_>>()?;
    let ids: Vec<_> = catalog.movies().map(|m| m.id).collect();

    result.single_filter = time_queries(|i| {
        let _ = engine.movies(&by_genre[i]);
    });
    result.combined_filter = time_queries(|i| {
        let _ = engine.movies(&combined[i]);
    });
    result.title_search = time_queries(|i| {
        let _ = engine.movies(&by_title[i]);
    });
    result.detail_lookup = time_queries(|i| {
        let _ = engine.movie(ids[i * 7919 % ids.len()]);
    });

    // --- Database Size ---
    result.db_size_bytes = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    Ok(result)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

type MetricRow = (&'static str, fn(&ScaleResult) -> f64);

const LABEL_WIDTH: usize = 24;
const CELL_WIDTH: usize = 14;

fn print_row(label: &str, cells: impl Iterator<Item = String>) {
    let cells: String = cells.map(|c| format!("| {c:>CELL_WIDTH$}")).collect();
    println!("| {label:LABEL_WIDTH$}{cells}|");
}

fn main() -> anyhow::Result<()> {
    let scales: &[usize] = &[1_000, 10_000, 50_000];

    println!();
    println!("Cinedex Benchmark");
    println!("=================");
    println!(
        "Platform: {} {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    println!();

    eprint!("Warming up... ");
    run_benchmark(100)?;
    eprintln!("done.");
    println!();

    let mut results: Vec<(usize, ScaleResult)> = Vec::new();
    for &n in scales {
        eprint!("Benchmarking {} movies... ", n);
        let start = Instant::now();
        let result = run_benchmark(n)?;
        eprintln!("done in {:.1}s", start.elapsed().as_secs_f64());
        results.push((n, result));
    }

    println!();

    print_row(
        "Operation",
        scales
            .iter()
            .map(|&n| format!("{} movies", scaled(n as f64, COUNT))),
    );
    println!(
        "|{}|{}|",
        "-".repeat(LABEL_WIDTH + 1),
        vec!["-".repeat(CELL_WIDTH + 1); scales.len()].join("|")
    );
    print_row(
        "Seed",
        results.iter().map(|(_, r)| scaled(r.seed_movies_per_sec, RATE)),
    );

    let rows: Vec<MetricRow> = vec![
        ("Load", |r: &ScaleResult| r.load_us),
        ("Genre Filter (p50)", |r: &ScaleResult| r.single_filter.p50_us),
        ("Genre Filter (p95)", |r: &ScaleResult| r.single_filter.p95_us),
        ("Genre Filter (p99)", |r: &ScaleResult| r.single_filter.p99_us),
        ("Combined Filter (p50)", |r: &ScaleResult| r.combined_filter.p50_us),
        ("Combined Filter (p95)", |r: &ScaleResult| r.combined_filter.p95_us),
        ("Combined Filter (p99)", |r: &ScaleResult| r.combined_filter.p99_us),
        ("Title Search (p50)", |r: &ScaleResult| r.title_search.p50_us),
        ("Title Search (p95)", |r: &ScaleResult| r.title_search.p95_us),
        ("Title Search (p99)", |r: &ScaleResult| r.title_search.p99_us),
        ("Detail Lookup (p50)", |r: &ScaleResult| r.detail_lookup.p50_us),
        ("Detail Lookup (p99)", |r: &ScaleResult| r.detail_lookup.p99_us),
    ];
    for (label, getter) in &rows {
        print_row(label, results.iter().map(|(_, r)| scaled(getter(r), MICROS)));
    }
    print_row(
        "Database Size",
        results
            .iter()
            .map(|(_, r)| scaled(r.db_size_bytes as f64, BYTES)),
    );

    println!();
    Ok(())
}
