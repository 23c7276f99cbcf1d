use super::super::error::KdTreeError;
use super::super::kdtree::KdTree;
use super::super::point::Point;
use super::super::rectangle::Rectangle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 持久化错误类型
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Binary serialization error: {0}")]
    Binary(#[from] bincode::Error),
    #[error("Invalid snapshot: {0}")]
    Tree(#[from] KdTreeError),
}

/// 序列化格式枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationFormat {
    /// JSON格式 - 可读性好，方便调试
    Json,
    /// 二进制格式 - 性能好，体积小
    Binary,
}

impl SerializationFormat {
    /// 根据文件扩展名自动判断格式
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("json") => SerializationFormat::Json,
            _ => SerializationFormat::Binary,
        }
    }
}

/// 快照内容：边界加上按先序遍历排列的点
///
/// 按同样的顺序重新插入即可得到形状完全相同的树，
/// 同时每个点都会重新经过插入校验。
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    bounds: Rectangle,
    points: Vec<Point>,
}

/// KD-tree持久化功能实现
impl KdTree {
    /// 导出到文件
    ///
    /// 根据文件扩展名自动选择序列化格式：
    /// - .json -> JSON格式（调试友好）
    /// - 其他 -> 二进制格式（高性能）
    pub fn dump_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        let format = SerializationFormat::from_extension(&path);
        self.dump_to_file_with_format(path, format)
    }

    /// 使用指定格式导出到文件
    pub fn dump_to_file_with_format<P: AsRef<Path>>(
        &self,
        path: P,
        format: SerializationFormat,
    ) -> Result<(), PersistenceError> {
        let path = path.as_ref();

        // 先写临时文件再重命名，确保原子性写入
        let temp_path = temp_path_for(path);

        let snapshot = Snapshot {
            bounds: self.bounds,
            points: self.points().collect(),
        };
        let data = match format {
            SerializationFormat::Json => serde_json::to_vec_pretty(&snapshot)?,
            SerializationFormat::Binary => bincode::serialize(&snapshot)?,
        };

        if let Err(e) = fs::write(&temp_path, data).and_then(|_| fs::rename(&temp_path, path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        info!("dumped {} points to {}", self.size, path.display());
        Ok(())
    }

    /// 从文件加载KD-tree，格式由扩展名决定
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<KdTree, PersistenceError> {
        let format = SerializationFormat::from_extension(&path);
        Self::load_from_file_with_format(path, format)
    }

    /// 使用指定格式从文件加载KD-tree
    pub fn load_from_file_with_format<P: AsRef<Path>>(
        path: P,
        format: SerializationFormat,
    ) -> Result<KdTree, PersistenceError> {
        let path = path.as_ref();
        let data = fs::read(path)?;

        let snapshot: Snapshot = match format {
            SerializationFormat::Json => serde_json::from_slice(&data)?,
            SerializationFormat::Binary => bincode::deserialize(&data)?,
        };
        let tree = KdTree::from_points(snapshot.bounds, snapshot.points)?;

        info!("loaded {} points from {}", tree.len(), path.display());
        Ok(tree)
    }
}

/// `tree.kd` -> `tree.kd.tmp`，无扩展名时 `tree` -> `tree.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().unwrap_or_default().to_os_string();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}
