//! Lossy image approximation by region-quadtree decomposition.
//!
//! An image is split into quadrants until every quadrant is close enough to
//! a flat color or a depth limit is hit; drawing each remaining quadrant with
//! its average color gives the approximation.

pub mod animation;
pub mod compress;
pub mod node;
pub mod points;
pub mod render;
pub mod tree;

pub use node::*;

pub use compress::{compress, CompressOptions, CompressReport};
pub use points::{Point, PointIndex};
pub use tree::{BuildConfig, QuadTree};
