pub mod cli_args;
pub mod formatter;
pub mod points_file;

pub use cli_args::{CliArgs, Command, OutputFormat};
pub use formatter::OutputFormatter;
pub use points_file::{load_tree, read_points, write_points, PointsFileError};
