//! Nearest-neighbor search for the KD-tree
//!
//! Depth-first descent that carries the best point found so far together with
//! its squared distance to the query point. Each node's region is derived from
//! its ancestors' split lines on the way down.
//!
//! ## Pruning
//!
//! A subtree is skipped when the squared distance from the query point to its
//! region is already at least the best squared distance. The bound is the exact
//! point-to-rectangle distance, so no closer point can hide in a pruned subtree.
//!
//! ## Visiting order
//!
//! The child on the query point's side of the split is searched first, the far
//! child second. By the time the far child is reached the best distance has
//! usually shrunk enough to prune it outright.

use super::super::error::KdTreeError;
use super::super::kdtree::KdTree;
use super::super::node::Node;
use super::super::point::Point;
use super::super::rectangle::Rectangle;
use super::validate_point;
use tracing::debug;

/// Best candidate found so far during a nearest-neighbor search
#[derive(Debug, Clone, Copy)]
struct Candidate {
    point: Point,
    /// Squared distance from the query point
    distance: f64,
}

impl KdTree {
    /// Find the stored point closest to `query`
    ///
    /// Returns `Ok(None)` when the tree is empty. Among points at the same
    /// minimum distance, the first one reached in the visiting order wins.
    ///
    /// # Example
    ///
    /// ```
    /// use kdplane::{KdTree, Point};
    ///
    /// let mut tree = KdTree::new();
    /// tree.insert(&Point::new(0.2, 0.3)).unwrap();
    /// tree.insert(&Point::new(0.9, 0.6)).unwrap();
    ///
    /// let nearest = tree.nearest(&Point::new(0.21, 0.31)).unwrap();
    /// assert_eq!(nearest, Some(Point::new(0.2, 0.3)));
    /// ```
    pub fn nearest(&self, query: &Point) -> Result<Option<Point>, KdTreeError> {
        Ok(self
            .nearest_with_distance(query)?
            .map(|(point, _)| point))
    }

    /// Same as [`KdTree::nearest`], also returning the squared distance
    pub fn nearest_with_distance(&self, query: &Point) -> Result<Option<(Point, f64)>, KdTreeError> {
        let (best, _) = self.nearest_visiting(query)?;
        Ok(best.map(|candidate| (candidate.point, candidate.distance)))
    }

    /// Nearest-neighbor search that also reports how many nodes were
    /// examined, i.e. not pruned
    fn nearest_visiting(&self, query: &Point) -> Result<(Option<Candidate>, usize), KdTreeError> {
        validate_point(query)?;

        let Some(root) = self.root_ref() else {
            return Ok((None, 0));
        };

        let mut best = Candidate {
            point: root.point,
            distance: query.distance_squared_to(&root.point),
        };
        let mut visited = 0;
        self.nearest_recursive(root, self.bounds, query, &mut best, &mut visited);

        debug!(
            "nearest to {} is {} (squared distance {}), visited {} of {} nodes",
            query, best.point, best.distance, visited, self.size
        );
        Ok((Some(best), visited))
    }

    fn nearest_recursive(
        &self,
        node: &Node,
        region: Rectangle,
        query: &Point,
        best: &mut Candidate,
        visited: &mut usize,
    ) {
        if region.distance_squared_to(query) >= best.distance {
            return;
        }

        *visited += 1;
        let distance = query.distance_squared_to(&node.point);
        if distance < best.distance {
            *best = Candidate {
                point: node.point,
                distance,
            };
        }

        // Near side first; `best` is re-read when the far side is checked.
        let near = node.side_of(query);
        for side in [near, near.opposite()] {
            if let Some(child) = node.child(side) {
                self.nearest_recursive(child, node.child_region(&region, side), query, best, visited);
            }
        }
    }
}
