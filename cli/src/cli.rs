use std::path::PathBuf;

/// OpenStreetMap viewport explorer CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "osmview", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON config file (round_to, palette, color_basis, row_limit, cache_capacity)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Pad and round a viewport into a query bounding box
    Bbox(BboxArgs),

    /// Print the SQL for a viewport query
    Query(QueryArgs),

    /// Run one redraw over exported rows and write styled GeoJSON
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
pub struct BboxArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub south: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub west: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub north: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub east: f64,

    /// Decimal places, overrides the config file
    #[arg(long)]
    pub round_to: Option<u32>,
}

/// Table, column and filters shared by `query` and `render`.
#[derive(clap::Args, Debug)]
pub struct SelectionArgs {
    /// Geometry table: point, line or polygon
    pub table: String,

    /// Column to color and filter by, e.g. amenity
    pub column: String,

    /// Keep only these values (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Maximum number of rows (100, 1000, 10000 or 100000)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Viewport JSON as reported by the map widget, defaults to North America
    #[arg(short, long)]
    pub bounds: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Exported query rows (.csv or GeoJSON)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub rows: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output GeoJSON file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
