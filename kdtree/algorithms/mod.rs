// KD-tree算法模块
//
// 按功能分解为不同的子模块：
// - insert: 插入和树构建
// - search: 成员查询和范围查询
// - nearest: 最近邻查询
// - traverse: 供外部渲染使用的深度优先遍历
// - persistence: 快照的持久化和加载

pub mod insert;
pub mod nearest;
pub mod persistence;
pub mod search;
pub mod traverse;

use super::error::KdTreeError;
use super::point::Point;
use super::rectangle::Rectangle;

/// 查询点必须是有限坐标
pub(crate) fn validate_point(point: &Point) -> Result<(), KdTreeError> {
    if point.is_finite() {
        Ok(())
    } else {
        tracing::debug!("rejected non-finite point {}", point);
        Err(KdTreeError::invalid(format!(
            "point {} must have finite coordinates",
            point
        )))
    }
}

/// 查询矩形必须是有限坐标且 min <= max
pub(crate) fn validate_rectangle(rect: &Rectangle) -> Result<(), KdTreeError> {
    if rect.is_valid() {
        Ok(())
    } else {
        tracing::debug!("rejected invalid rectangle {}", rect);
        Err(KdTreeError::invalid(format!(
            "rectangle {} must be finite with min <= max",
            rect
        )))
    }
}
