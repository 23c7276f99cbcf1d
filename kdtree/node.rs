use super::point::Point;
use super::rectangle::Rectangle;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 节点的分割方向
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// 竖直分割线，按 x 坐标比较
    #[display(fmt = "vertical")]
    Vertical,
    /// 水平分割线，按 y 坐标比较
    #[display(fmt = "horizontal")]
    Horizontal,
}

impl Orientation {
    /// 根节点固定为竖直分割，此后逐层交替
    pub const ROOT: Orientation = Orientation::Vertical;

    /// 子节点的分割方向
    pub fn flip(self) -> Orientation {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

/// 子树所在的一侧
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// 左侧（竖直分割）或下侧（水平分割）
    LeftBottom,
    /// 右侧（竖直分割）或上侧（水平分割）
    RightTop,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::LeftBottom => Side::RightTop,
            Side::RightTop => Side::LeftBottom,
        }
    }
}

/// KD-tree节点
///
/// 每个节点由父节点独占持有，区域不存储在节点中，
/// 遍历时由祖先的分割线逐层推导。
#[derive(Debug, Clone)]
pub struct Node {
    /// 节点存储的点
    pub point: Point,
    /// 分割方向
    pub orientation: Orientation,
    /// 左/下子树
    pub left: Option<Box<Node>>,
    /// 右/上子树
    pub right: Option<Box<Node>>,
}

impl Node {
    /// 创建新的叶子节点
    pub fn new(point: Point, orientation: Orientation) -> Self {
        Node {
            point,
            orientation,
            left: None,
            right: None,
        }
    }

    /// 点在本节点分割轴上的坐标
    fn axis_value(&self, point: &Point) -> f64 {
        match self.orientation {
            Orientation::Vertical => point.x,
            Orientation::Horizontal => point.y,
        }
    }

    /// 判断点应该落在哪一侧
    ///
    /// 分割轴上严格小于本节点的点去左/下侧，相等或更大的去右/上侧。
    pub fn side_of(&self, point: &Point) -> Side {
        if self.axis_value(point) < self.axis_value(&self.point) {
            Side::LeftBottom
        } else {
            Side::RightTop
        }
    }

    pub fn child(&self, side: Side) -> Option<&Node> {
        match side {
            Side::LeftBottom => self.left.as_deref(),
            Side::RightTop => self.right.as_deref(),
        }
    }

    pub fn child_slot_mut(&mut self, side: Side) -> &mut Option<Box<Node>> {
        match side {
            Side::LeftBottom => &mut self.left,
            Side::RightTop => &mut self.right,
        }
    }

    /// 由本节点区域推导某一侧子节点的区域
    ///
    /// 本节点的点总是位于 `region` 内，所以得到的矩形始终合法。
    pub fn child_region(&self, region: &Rectangle, side: Side) -> Rectangle {
        let mut child = *region;
        match (self.orientation, side) {
            (Orientation::Vertical, Side::LeftBottom) => child.max[0] = self.point.x,
            (Orientation::Vertical, Side::RightTop) => child.min[0] = self.point.x,
            (Orientation::Horizontal, Side::LeftBottom) => child.max[1] = self.point.y,
            (Orientation::Horizontal, Side::RightTop) => child.min[1] = self.point.y,
        }
        child
    }

    /// 以本节点为根的子树高度
    pub fn height(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |node| node.height());
        let right = self.right.as_ref().map_or(0, |node| node.height());
        1 + left.max(right)
    }
}
