use super::super::kdtree::KdTree;
use super::super::node::{Node, Orientation, Side};
use super::super::point::Point;
use super::super::rectangle::Rectangle;
use serde::{Deserialize, Serialize};

/// 遍历时每个节点对外暴露的信息
///
/// 渲染方只需要这些数据就能画出分割线和点，不需要了解树的内部结构。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub point: Point,
    pub orientation: Orientation,
    /// 节点负责分割的区域
    pub region: Rectangle,
}

impl NodeView {
    /// 节点分割线的两个端点，竖直分割为 x = point.x，水平分割为 y = point.y
    pub fn split_line(&self) -> (Point, Point) {
        match self.orientation {
            Orientation::Vertical => (
                Point::new(self.point.x, self.region.y_min()),
                Point::new(self.point.x, self.region.y_max()),
            ),
            Orientation::Horizontal => (
                Point::new(self.region.x_min(), self.point.y),
                Point::new(self.region.x_max(), self.point.y),
            ),
        }
    }
}

/// 深度优先（先序）遍历迭代器，先左/下后右/上
///
/// 使用显式栈，遍历深度不受调用栈限制。
pub struct Traversal<'a> {
    stack: Vec<(&'a Node, Rectangle)>,
}

impl<'a> Iterator for Traversal<'a> {
    type Item = NodeView;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, region) = self.stack.pop()?;

        // 先压右侧，保证左侧先出栈
        for side in [Side::RightTop, Side::LeftBottom] {
            if let Some(child) = node.child(side) {
                self.stack.push((child, node.child_region(&region, side)));
            }
        }

        Some(NodeView {
            point: node.point,
            orientation: node.orientation,
            region,
        })
    }
}

/// 遍历相关算法
impl KdTree {
    /// 遍历所有节点，产出点、分割方向和区域
    pub fn traverse(&self) -> Traversal<'_> {
        let mut stack = Vec::new();
        if let Some(root) = self.root_ref() {
            stack.push((root, self.bounds));
        }
        Traversal { stack }
    }

    /// 按遍历顺序产出所有点
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.traverse().map(|view| view.point)
    }
}
