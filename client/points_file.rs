use crate::kdtree::{KdTree, Point, Rectangle};
use std::fs;
use std::path::Path;

/// 点文件读写错误
#[derive(Debug, thiserror::Error)]
pub enum PointsFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// 解析点文件内容
///
/// 每行一个 `x y` 坐标对，以空白分隔；空行和 `#` 开头的注释行被忽略。
pub fn parse_points(content: &str) -> Result<Vec<Point>, PointsFileError> {
    let mut points = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parse_error = |message: String| PointsFileError::Parse {
            line: index + 1,
            message,
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(parse_error(format!(
                "expected 2 coordinates, found {}",
                fields.len()
            )));
        }

        let mut coords = [0.0; 2];
        for (slot, field) in coords.iter_mut().zip(&fields) {
            *slot = field
                .parse::<f64>()
                .map_err(|e| parse_error(format!("invalid coordinate '{}': {}", field, e)))?;
        }
        points.push(Point::from(coords));
    }

    Ok(points)
}

/// 读取点文件
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, PointsFileError> {
    let content = fs::read_to_string(path)?;
    parse_points(&content)
}

/// 写出点文件，每行一个坐标对
pub fn write_points<P: AsRef<Path>>(path: P, points: &[Point]) -> Result<(), PointsFileError> {
    let mut content = String::with_capacity(points.len() * 24);
    for point in points {
        content.push_str(&format!("{} {}\n", point.x, point.y));
    }
    fs::write(path, content)?;
    Ok(())
}

/// 是否按点文件处理（`.txt` 扩展名），否则按快照处理
pub fn is_points_file<P: AsRef<Path>>(path: P) -> bool {
    matches!(
        path.as_ref().extension().and_then(|ext| ext.to_str()),
        Some("txt")
    )
}

/// 加载输入文件为 KD-tree
///
/// 点文件使用给定的边界，快照文件使用其中保存的边界。
pub fn load_tree<P: AsRef<Path>>(path: P, bounds: Rectangle) -> crate::Result<KdTree> {
    let path = path.as_ref();
    if is_points_file(path) {
        let points = read_points(path)?;
        Ok(KdTree::from_points(bounds, points)?)
    } else {
        Ok(KdTree::load_from_file(path)?)
    }
}
