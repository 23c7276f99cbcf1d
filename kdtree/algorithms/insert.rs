use super::super::error::KdTreeError;
use super::super::kdtree::KdTree;
use super::super::node::{Node, Orientation};
use super::super::point::Point;
use super::super::rectangle::Rectangle;
use super::validate_point;
use tracing::trace;

/// 插入操作相关算法
impl KdTree {
    /// 插入一个点
    ///
    /// 返回 `Ok(true)` 表示新增了一个节点，`Ok(false)` 表示点已存在（不做任何修改）。
    /// 坐标非有限值或点落在边界之外时返回错误，树保持不变。
    pub fn insert(&mut self, point: &Point) -> Result<bool, KdTreeError> {
        self.validate_insert(point)?;

        let mut slot = &mut self.root;
        let mut orientation = Orientation::ROOT;

        // 沿分割轴下降，直到遇到相等的点或空位置
        while let Some(node) = slot {
            if node.point == *point {
                return Ok(false);
            }
            orientation = node.orientation.flip();
            let side = node.side_of(point);
            slot = node.child_slot_mut(side);
        }

        *slot = Some(Box::new(Node::new(*point, orientation)));
        self.size += 1;
        trace!("inserted {} with {} split, size = {}", point, orientation, self.size);

        Ok(true)
    }

    /// 批量插入，返回新增点的数量
    ///
    /// 先校验全部点再开始插入，任何一个点非法时树保持不变。
    pub fn insert_all<I>(&mut self, points: I) -> Result<usize, KdTreeError>
    where
        I: IntoIterator<Item = Point>,
    {
        let points: Vec<Point> = points.into_iter().collect();
        for point in &points {
            self.validate_insert(point)?;
        }

        let mut inserted = 0;
        for point in &points {
            if self.insert(point)? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// 以指定边界创建树并按顺序插入所有点
    pub fn from_points<I>(bounds: Rectangle, points: I) -> Result<Self, KdTreeError>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut tree = KdTree::with_bounds(bounds)?;
        tree.insert_all(points)?;
        Ok(tree)
    }

    /// 插入的点必须是有限坐标并且位于树的边界内，否则节点区域会失效
    fn validate_insert(&self, point: &Point) -> Result<(), KdTreeError> {
        validate_point(point)?;
        if !self.bounds.contains_point(point) {
            tracing::debug!("rejected {} outside bounds {}", point, self.bounds);
            return Err(KdTreeError::invalid(format!(
                "point {} lies outside the tree bounds {}",
                point, self.bounds
            )));
        }
        Ok(())
    }
}
