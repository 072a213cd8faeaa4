//! Command-line front end for grid-indexed DBSCAN clustering.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use gridscan_algorithms::{dbscan, kmeans, DbscanConfig, KMeansConfig};
use gridscan_core::{Dimension, PointCloud};

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("core error: {0}")]
    Core(#[from] gridscan_core::Error),

    #[error("malformed input at line {line}: {detail}")]
    Parse { line: usize, detail: String },
}

/// Clustering algorithm selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Grid-indexed DBSCAN
    Dbscan,
    /// Lloyd's-algorithm k-means
    Kmeans,
}

/// Grid-indexed DBSCAN clustering over 2D/3D point sets.
#[derive(Parser)]
#[command(name = "gridscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster points read from a CSV file (`x,y` or `x,y,z` per line)
    Cluster {
        /// Input CSV file
        input: PathBuf,

        /// Clustering algorithm to use
        #[arg(short, long, value_enum, default_value = "dbscan")]
        algorithm: Algorithm,

        /// Neighborhood radius (DBSCAN only)
        #[arg(long, default_value = "1.0")]
        eps: f64,

        /// Minimum neighborhood size for a core point (DBSCAN only)
        #[arg(long, default_value = "4")]
        min_points: usize,

        /// Spatial hash table size, 0 for the library default (DBSCAN only)
        #[arg(long, default_value = "0")]
        table_size: usize,

        /// Number of centroids to fit (k-means only)
        #[arg(short, long, default_value = "2")]
        k: usize,

        /// Verbose diagnostics on stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show point count and bounding box for a CSV file
    Info {
        /// Input CSV file
        input: PathBuf,
    },
}

/// Parses a CSV file of `x,y` or `x,y,z` rows into a [`PointCloud`].
///
/// Blank lines are skipped. The dimensionality is fixed by the first
/// data row and every subsequent row must match it.
fn read_points(path: &PathBuf) -> Result<PointCloud> {
    let contents = fs::read_to_string(path)?;
    let mut cloud: Option<PointCloud> = None;

    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let parse = |s: &str, lineno: usize| -> Result<f64> {
            s.parse::<f64>().map_err(|_| CliError::Parse {
                line: lineno + 1,
                detail: format!("'{s}' is not a valid number"),
            })
        };

        match fields.len() {
            2 => {
                let x = parse(fields[0], idx)?;
                let y = parse(fields[1], idx)?;
                let cloud = cloud.get_or_insert_with(|| PointCloud::with_capacity(Dimension::Two, 0));
                cloud.push_2d(x, y);
            }
            3 => {
                let x = parse(fields[0], idx)?;
                let y = parse(fields[1], idx)?;
                let z = parse(fields[2], idx)?;
                let cloud = cloud.get_or_insert_with(|| PointCloud::with_capacity(Dimension::Three, 0));
                cloud.push_3d(x, y, z);
            }
            n => {
                return Err(CliError::Parse {
                    line: idx + 1,
                    detail: format!("expected 2 or 3 comma-separated fields, found {n}"),
                })
            }
        }
    }

    Ok(cloud.unwrap_or_default())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Cluster {
            input,
            algorithm,
            eps,
            min_points,
            table_size,
            k,
            verbose,
        } => {
            if verbose {
                eprintln!("Reading points from {}", input.display());
            }
            let cloud = read_points(&input)?;
            let view = cloud.view()?;

            if verbose {
                eprintln!("{} points, {:?}", view.len(), view.dim());
                eprintln!("Algorithm: {algorithm:?}");
            }

            let start = Instant::now();
            let mut labels = vec![0_i32; view.len()];

            match algorithm {
                Algorithm::Dbscan => {
                    let config = DbscanConfig::new(eps, min_points).with_table_size(table_size);
                    let summary = dbscan::run(view, &config, &mut labels)?;
                    let elapsed = start.elapsed();
                    println!("clusters: {}", summary.clusters_found);
                    println!("noise: {}", summary.noise_points);
                    println!("points: {}", summary.points_processed);
                    if verbose {
                        eprintln!("clustered in {:.3}s", elapsed.as_secs_f64());
                    }
                }
                Algorithm::Kmeans => {
                    let config = KMeansConfig::new(k);
                    let summary = kmeans::run(view, &config, &mut labels)?;
                    let elapsed = start.elapsed();
                    println!("centroids: {}", summary.clusters_found);
                    println!("points: {}", summary.points_processed);
                    if verbose {
                        eprintln!("clustered in {:.3}s", elapsed.as_secs_f64());
                    }
                }
            }

            for (idx, label) in labels.iter().enumerate() {
                println!("{idx},{label}");
            }
        }

        Commands::Info { input } => {
            let cloud = read_points(&input)?;
            let view = cloud.view()?;

            println!("points: {}", view.len());
            println!("dimension: {:?} ({} axes)", view.dim(), view.dim().axes());

            if !view.is_empty() {
                let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
                let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
                let (mut min_z, mut max_z) = (f64::INFINITY, f64::NEG_INFINITY);
                for idx in 0..view.len() {
                    let p = view.get(idx);
                    min_x = min_x.min(p.x);
                    max_x = max_x.max(p.x);
                    min_y = min_y.min(p.y);
                    max_y = max_y.max(p.y);
                    min_z = min_z.min(p.z);
                    max_z = max_z.max(p.z);
                }
                println!("x range: {min_x} - {max_x}");
                println!("y range: {min_y} - {max_y}");
                if view.dim() == Dimension::Three {
                    println!("z range: {min_z} - {max_z}");
                }
            }
        }
    }

    Ok(())
}
