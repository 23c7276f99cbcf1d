use super::super::error::KdTreeError;
use super::super::kdtree::KdTree;
use super::super::node::{Node, Side};
use super::super::point::Point;
use super::super::rectangle::Rectangle;
use super::{validate_point, validate_rectangle};
use tracing::debug;

/// 搜索操作相关算法
impl KdTree {
    /// 判断点是否在集合中
    ///
    /// 与插入使用相同的下降路径，遇到相等的点或空子树即停止。
    pub fn contains(&self, point: &Point) -> Result<bool, KdTreeError> {
        validate_point(point)?;

        let mut current = self.root_ref();
        while let Some(node) = current {
            if node.point == *point {
                return Ok(true);
            }
            current = node.child(node.side_of(point));
        }
        Ok(false)
    }

    /// 返回位于矩形内部或边界上的所有点
    ///
    /// 深度优先，先左/下后右/上，因此同一棵树的结果顺序是确定的。
    /// 节点区域与查询矩形不相交时整棵子树被剪枝。
    pub fn range(&self, query: &Rectangle) -> Result<Vec<Point>, KdTreeError> {
        self.range_visiting(query).map(|(results, _)| results)
    }

    /// 范围搜索，同时返回实际访问（未被剪枝）的节点数
    pub(crate) fn range_visiting(&self, query: &Rectangle) -> Result<(Vec<Point>, usize), KdTreeError> {
        validate_rectangle(query)?;

        let mut results = Vec::new();
        let mut visited = 0;
        if let Some(root) = self.root_ref() {
            self.range_recursive(root, self.bounds, query, &mut results, &mut visited);
        }

        debug!(
            "range {} matched {} of {} points, visited {} nodes",
            query,
            results.len(),
            self.size,
            visited
        );
        Ok((results, visited))
    }

    /// 递归范围搜索
    fn range_recursive(
        &self,
        node: &Node,
        region: Rectangle,
        query: &Rectangle,
        results: &mut Vec<Point>,
        visited: &mut usize,
    ) {
        if !query.intersects(&region) {
            return;
        }

        *visited += 1;
        if query.contains_point(&node.point) {
            results.push(node.point);
        }

        // 无论本节点是否命中，两侧子树都要继续检查
        for side in [Side::LeftBottom, Side::RightTop] {
            if let Some(child) = node.child(side) {
                self.range_recursive(child, node.child_region(&region, side), query, results, visited);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sample_tree() -> KdTree {
        let mut tree = KdTree::new();
        for (x, y) in [(0.7, 0.2), (0.5, 0.4), (0.2, 0.3), (0.4, 0.7), (0.9, 0.6)] {
            tree.insert(&Point::new(x, y)).unwrap();
        }
        tree
    }

    fn random_points(count: usize, seed: u64) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| Point::new(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0)))
            .collect()
    }

    fn sorted(mut points: Vec<Point>) -> Vec<Point> {
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points
    }

    #[test]
    fn test_contains() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 5);
        assert!(tree.contains(&Point::new(0.2, 0.3)).unwrap());
        assert!(tree.contains(&Point::new(0.9, 0.6)).unwrap());
        assert!(!tree.contains(&Point::new(0.2, 0.1)).unwrap());
        // 分割轴坐标相同但点不同
        assert!(!tree.contains(&Point::new(0.7, 0.9)).unwrap());
    }

    #[test]
    fn test_contains_outside_bounds_is_false() {
        let tree = sample_tree();
        assert!(!tree.contains(&Point::new(5.0, -3.0)).unwrap());
    }

    #[test]
    fn test_contains_rejects_non_finite() {
        let tree = sample_tree();
        assert!(matches!(
            tree.contains(&Point::new(f64::NAN, 0.3)),
            Err(KdTreeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_range_sample() {
        let tree = sample_tree();
        let results = tree.range(&Rectangle::new(0.0, 0.0, 0.6, 0.6)).unwrap();
        // 深度优先、先左后右的确定顺序
        assert_eq!(results, vec![Point::new(0.5, 0.4), Point::new(0.2, 0.3)]);
    }

    #[test]
    fn test_range_full_bounds_returns_all() {
        let tree = sample_tree();
        let results = tree.range(&Rectangle::unit()).unwrap();
        assert_eq!(results.len(), 5);
    }

    #[test]
    fn test_range_boundary_inclusive() {
        let tree = sample_tree();
        let results = tree.range(&Rectangle::new(0.2, 0.3, 0.5, 0.4)).unwrap();
        assert_eq!(
            sorted(results),
            vec![Point::new(0.2, 0.3), Point::new(0.5, 0.4)]
        );
    }

    #[test]
    fn test_range_degenerate_rectangle() {
        let tree = sample_tree();
        let hit = tree.range(&Rectangle::new(0.4, 0.7, 0.4, 0.7)).unwrap();
        assert_eq!(hit, vec![Point::new(0.4, 0.7)]);

        // 零宽度的竖直线段
        let line = tree.range(&Rectangle::new(0.4, 0.0, 0.4, 1.0)).unwrap();
        assert_eq!(line, vec![Point::new(0.4, 0.7)]);

        let empty = tree.range(&Rectangle::new(0.3, 0.3, 0.3, 0.3)).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_range_outside_bounds() {
        let tree = sample_tree();
        let results = tree.range(&Rectangle::new(2.0, 2.0, 3.0, 3.0)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_range_empty_tree() {
        let tree = KdTree::new();
        assert!(tree.range(&Rectangle::unit()).unwrap().is_empty());
        assert!(!tree.contains(&Point::new(0.5, 0.5)).unwrap());
    }

    #[test]
    fn test_range_rejects_invalid_rectangle() {
        let tree = sample_tree();
        let inverted = Rectangle { min: [0.6, 0.0], max: [0.0, 0.6] };
        assert!(matches!(
            tree.range(&inverted),
            Err(KdTreeError::InvalidArgument(_))
        ));
        let nan = Rectangle { min: [f64::NAN, 0.0], max: [0.5, 0.5] };
        assert!(tree.range(&nan).is_err());
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_range_matches_brute_force() {
        let points = random_points(1000, 42);
        let tree = KdTree::from_points(Rectangle::unit(), points.clone()).unwrap();
        let mut rng = StdRng::seed_from_u64(1042);

        for _ in 0..200 {
            let (x0, x1) = (rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0));
            let (y0, y1) = (rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0));
            let query = Rectangle::new(
                f64::min(x0, x1),
                f64::min(y0, y1),
                f64::max(x0, x1),
                f64::max(y0, y1),
            );

            let expected: Vec<Point> = points
                .iter()
                .copied()
                .filter(|p| query.contains_point(p))
                .collect();
            let actual = tree.range(&query).unwrap();
            assert_eq!(sorted(actual), sorted(expected));
        }
    }

    #[test]
    fn test_range_skips_disjoint_subtrees() {
        let tree = sample_tree();
        // 只有根、(0.5, 0.4) 和 (0.2, 0.3) 的区域与查询相交
        let (results, visited) = tree
            .range_visiting(&Rectangle::new(0.1, 0.1, 0.3, 0.35))
            .unwrap();
        assert_eq!(results, vec![Point::new(0.2, 0.3)]);
        assert_eq!(visited, 3);

        let (_, visited) = tree.range_visiting(&Rectangle::new(2.0, 2.0, 3.0, 3.0)).unwrap();
        assert_eq!(visited, 0);
    }

    #[test]
    fn test_small_range_visits_few_nodes() {
        let tree = KdTree::from_points(Rectangle::unit(), random_points(1000, 42)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let mut total_visited = 0;
        for _ in 0..50 {
            let x = rng.gen_range(0.0..0.99);
            let y = rng.gen_range(0.0..0.99);
            let (_, visited) = tree
                .range_visiting(&Rectangle::new(x, y, x + 0.01, y + 0.01))
                .unwrap();
            total_visited += visited;
        }

        // 平均每次查询访问的节点应远少于全部 1000 个
        assert!(total_visited / 50 < 100, "average visited {}", total_visited / 50);
    }

    #[test]
    fn test_contains_matches_inserted() {
        let points = random_points(500, 3);
        let tree = KdTree::from_points(Rectangle::unit(), points.clone()).unwrap();

        for point in &points {
            assert!(tree.contains(point).unwrap());
        }
        for point in random_points(500, 4) {
            assert_eq!(tree.contains(&point).unwrap(), points.contains(&point));
        }
    }
}
