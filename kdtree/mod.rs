pub mod algorithms;
pub mod error;
#[allow(clippy::module_inception)]
pub mod kdtree;
pub mod node;
pub mod point;
pub mod rectangle;

// 重新导出主要类型
pub use algorithms::persistence::{PersistenceError, SerializationFormat};
pub use algorithms::traverse::{NodeView, Traversal};
pub use error::KdTreeError;
pub use kdtree::KdTree;
pub use node::{Node, Orientation, Side};
pub use point::Point;
pub use rectangle::Rectangle;
