pub mod client;
pub mod config;
pub mod kdtree;

use std::error::Error;

// 重新导出主要的公共接口
pub use kdtree::{KdTree, KdTreeError, NodeView, Orientation, Point, Rectangle};

// 重新导出常用类型，便于二进制文件使用
pub use client::{CliArgs, OutputFormatter};
pub use config::KdPlaneConfig;

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;
