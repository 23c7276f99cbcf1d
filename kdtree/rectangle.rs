use super::error::KdTreeError;
use super::point::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 轴对齐矩形 - 用于范围查询和节点的隐式区域
///
/// 所有几何判断都包含边界。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub min: [f64; 2], // [x_min, y_min]
    pub max: [f64; 2], // [x_max, y_max]
}

impl Rectangle {
    /// 创建新的矩形
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        assert!(x_min <= x_max && y_min <= y_max, "Invalid rectangle bounds");
        Rectangle {
            min: [x_min, y_min],
            max: [x_max, y_max],
        }
    }

    /// 创建矩形，边界非法时返回错误而不是 panic
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self, KdTreeError> {
        let rect = Rectangle {
            min: [x_min, y_min],
            max: [x_max, y_max],
        };
        if rect.is_valid() {
            Ok(rect)
        } else {
            Err(KdTreeError::invalid(format!("rectangle {} is not valid", rect)))
        }
    }

    /// 单位正方形 [0, 1] x [0, 1]，KD-tree 的默认边界
    pub fn unit() -> Self {
        Rectangle::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn x_min(&self) -> f64 {
        self.min[0]
    }

    pub fn y_min(&self) -> f64 {
        self.min[1]
    }

    pub fn x_max(&self) -> f64 {
        self.max[0]
    }

    pub fn y_max(&self) -> f64 {
        self.max[1]
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// 边界是否都是有限值且满足 min <= max
    ///
    /// 直接构造结构体或反序列化得到的矩形可能不满足这一点。
    pub fn is_valid(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|v| v.is_finite())
            && self.min[0] <= self.max[0]
            && self.min[1] <= self.max[1]
    }

    /// 判断两个矩形是否相交
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.min[0] <= other.max[0] && self.max[0] >= other.min[0] &&
        self.min[1] <= other.max[1] && self.max[1] >= other.min[1]
    }

    /// 判断当前矩形是否包含一个点
    pub fn contains_point(&self, point: &Point) -> bool {
        self.min[0] <= point.x && point.x <= self.max[0] &&
        self.min[1] <= point.y && point.y <= self.max[1]
    }

    /// 点到矩形最近处的距离平方，点在矩形内部或边界上时为 0
    pub fn distance_squared_to(&self, point: &Point) -> f64 {
        let dx = if point.x < self.min[0] {
            point.x - self.min[0]
        } else if point.x > self.max[0] {
            point.x - self.max[0]
        } else {
            0.0
        };
        let dy = if point.y < self.min[1] {
            point.y - self.min[1]
        } else if point.y > self.max[1] {
            point.y - self.max[1]
        } else {
            0.0
        };
        dx * dx + dy * dy
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min[0], self.max[0], self.min[1], self.max[1]
        )
    }
}
