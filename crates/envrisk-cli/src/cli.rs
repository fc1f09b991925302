use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// envrisk - Environmental-justice risk assessment and remediation prioritization
#[derive(Parser, Debug)]
#[command(name = "envrisk")]
#[command(about = "Spatial environmental risk assessment and remediation prioritization", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess, prioritize and map a batch of locations
    Analyze(AnalyzeArgs),

    /// Great-circle distance between two points
    Distance(DistanceArgs),

    /// Show the effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Air-quality stations (GeoJSON FeatureCollection or JSON array)
    #[arg(long, value_name = "FILE")]
    pub air: PathBuf,

    /// Water-quality sources (GeoJSON FeatureCollection or JSON array)
    #[arg(long, value_name = "FILE")]
    pub water: PathBuf,

    /// Contamination (Superfund) sites (GeoJSON FeatureCollection or JSON array)
    #[arg(long, value_name = "FILE")]
    pub superfund: PathBuf,

    /// Locations to assess (defaults to the air-quality stations)
    #[arg(long, value_name = "FILE")]
    pub locations: Option<PathBuf>,

    /// Directory for risk_assessments.json, priority_areas.json and heatmap_data.json
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Demographic vulnerability applied to locations without an override (0-1)
    #[arg(long, value_name = "FACTOR")]
    pub demographic: Option<f64>,

    /// Number of priority areas to show in the summary
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Run the analysis without writing output files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct DistanceArgs {
    /// Latitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lat1: f64,

    /// Longitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lon1: f64,

    /// Latitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lat2: f64,

    /// Longitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lon2: f64,
}
