use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kdplane-cli",
    about = "A command line interface for kdplane point sets",
    long_about = "kdplane-cli loads a set of 2D points into a KD-tree and runs membership,\nrange and nearest-neighbor queries against it."
)]
pub struct CliArgs {
    /// 配置文件路径
    #[arg(short, long, default_value = "kdplane.toml")]
    pub config: String,

    /// 生成默认配置文件并退出
    #[arg(long)]
    pub generate_config: bool,

    /// Log level (overrides config file)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Check whether a point is in the set
    Contains {
        /// Points file (.txt) or snapshot
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// List all points inside a rectangle (boundary inclusive)
    Range {
        /// Points file (.txt) or snapshot
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x_min: f64,
        #[arg(allow_negative_numbers = true)]
        y_min: f64,
        #[arg(allow_negative_numbers = true)]
        x_max: f64,
        #[arg(allow_negative_numbers = true)]
        y_max: f64,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Find the point closest to a query point
    Nearest {
        /// Points file (.txt) or snapshot
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Export the tree structure as JSON for rendering
    Export {
        /// Points file (.txt) or snapshot
        input: PathBuf,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print size, depth and bounds of the tree
    Stats {
        /// Points file (.txt) or snapshot
        input: PathBuf,
    },

    /// Generate uniformly distributed random points inside the configured bounds
    Generate {
        /// Number of points
        #[arg(short = 'n', long, default_value_t = 100)]
        count: usize,
        /// Random seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Output file: .txt for a points file, anything else for a snapshot
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Geojson,
}

impl CliArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.generate_config && self.command.is_none() {
            return Err(
                "No command specified. Use --generate-config or provide a subcommand."
                    .to_string(),
            );
        }

        if let Some(Command::Generate { count: 0, .. }) = self.command {
            return Err("Count must be greater than 0".to_string());
        }

        Ok(())
    }
}
