use super::error::KdTreeError;
use super::node::{Node, Orientation, Side};
use super::rectangle::Rectangle;
use super::point::Point;
use serde::{Deserialize, Serialize};

/// 用于JSON序列化的树结构，供外部渲染使用
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeVisualization {
    /// 初始边界矩形
    pub bounds: Rectangle,
    /// 点的数量
    pub size: usize,
    /// 树的高度
    pub depth: usize,
    /// 根节点（如果存在）
    pub root: Option<NodeVisualization>,
}

/// 用于JSON序列化的节点结构
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeVisualization {
    pub point: Point,
    pub orientation: Orientation,
    /// 节点负责分割的区域
    pub region: Rectangle,
    pub left: Option<Box<NodeVisualization>>,
    pub right: Option<Box<NodeVisualization>>,
}

/// 二维 KD-tree 点集
///
/// 根节点按 x 坐标分割，之后逐层在 x/y 之间交替。
/// 分割轴坐标相等（但点不相等）的点进入右/上子树。
#[derive(Debug, Clone)]
pub struct KdTree {
    /// 根节点
    pub(crate) root: Option<Box<Node>>,
    /// 不重复的点的数量
    pub(crate) size: usize,
    /// 初始边界，所有节点区域都由它逐层切分得到
    pub(crate) bounds: Rectangle,
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

impl KdTree {
    /// 以单位正方形为边界创建空树
    pub fn new() -> Self {
        KdTree {
            root: None,
            size: 0,
            bounds: Rectangle::unit(),
        }
    }

    /// 以指定矩形为边界创建空树
    pub fn with_bounds(bounds: Rectangle) -> Result<Self, KdTreeError> {
        if !bounds.is_valid() {
            return Err(KdTreeError::invalid(format!(
                "tree bounds {} must be finite with min <= max",
                bounds
            )));
        }
        Ok(KdTree {
            root: None,
            size: 0,
            bounds,
        })
    }

    /// 检查树是否为空
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// 获取点的数量
    pub fn len(&self) -> usize {
        self.size
    }

    /// 获取初始边界
    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    /// 获取树的高度，空树为 0
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.height())
    }

    /// 内部方法：获取根节点的引用
    pub(crate) fn root_ref(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// 导出树结构为JSON格式
    ///
    /// 返回包含完整树结构的JSON字符串，用于前端可视化
    pub fn export_to_json(&self) -> Result<String, serde_json::Error> {
        let visualization = self.create_tree_visualization();
        serde_json::to_string_pretty(&visualization)
    }

    /// 创建用于可视化的树结构
    pub fn create_tree_visualization(&self) -> TreeVisualization {
        TreeVisualization {
            bounds: self.bounds,
            size: self.size,
            depth: self.depth(),
            root: self
                .root_ref()
                .map(|node| self.create_node_visualization(node, self.bounds)),
        }
    }

    /// 递归创建节点的可视化结构
    fn create_node_visualization(&self, node: &Node, region: Rectangle) -> NodeVisualization {
        let child = |side: Side| {
            node.child(side).map(|child| {
                Box::new(self.create_node_visualization(child, node.child_region(&region, side)))
            })
        };

        NodeVisualization {
            point: node.point,
            orientation: node.orientation,
            region,
            left: child(Side::LeftBottom),
            right: child(Side::RightTop),
        }
    }
}
