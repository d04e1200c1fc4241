//! Construction and traversal of the whole-image quadtree.

use image::RgbImage;
use tracing::{debug, trace_span};

use crate::node::error::{DepthError, InputError};
use crate::node::region::Region;
use crate::node::QuadNode;

/// Deepest level a node may be split down to by default.
pub const DEFAULT_MAX_DEPTH: u32 = 8;
/// Error at or below which a region is left unsplit by default.
pub const DEFAULT_ERROR_THRESHOLD: f64 = 13.;
/// Depth from which children are built inline instead of forked by default.
pub const DEFAULT_PARALLEL_DEPTH: u32 = 4;

/// Knobs for building a `QuadTree`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildConfig {
	/// Nodes at this depth are never split.
	pub max_depth: u32,
	/// Nodes whose error is at most this are never split.
	pub error_threshold: f64,
	/// Children of nodes at this depth or deeper are built sequentially in
	/// the task of their parent. `0` builds the whole tree on one thread.
	pub parallel_depth: u32,
}

impl Default for BuildConfig {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			error_threshold: DEFAULT_ERROR_THRESHOLD,
			parallel_depth: DEFAULT_PARALLEL_DEPTH,
		}
	}
}

impl BuildConfig {
	/// Rejects thresholds under which empty regions would keep splitting.
	pub fn validate(&self) -> Result<(), InputError> {
		if !self.error_threshold.is_finite() || self.error_threshold < 0. {
			return Err(InputError::InvalidThreshold(self.error_threshold));
		}
		Ok(())
	}

	/// Whether a freshly measured node is final.
	pub fn is_terminal(&self, node: &QuadNode) -> bool {
		node.depth >= self.max_depth || node.error <= self.error_threshold
	}
}

/// Quadtree approximation of a whole image.
#[derive(Clone, Debug)]
pub struct QuadTree {
	width: u32,
	height: u32,
	root: QuadNode,
	max_depth_reached: u32,
}

struct Builder<'a> {
	img: &'a RgbImage,
	config: &'a BuildConfig,
}

impl<'a> Builder<'a> {
	/// Finalizes `node` as a leaf or splits it and builds its sections,
	/// returning the deepest leaf depth below it.
	fn build(&self, node: &mut QuadNode) -> u32 {
		if self.config.is_terminal(node) {
			return node.depth;
		}
		let fork = node.depth < self.config.parallel_depth;
		let [tl, tr, bl, br] = node.split(self.img);
		if fork {
			let ((a, b), (c, d)) = rayon::join(
				|| rayon::join(|| self.build(tl), || self.build(tr)),
				|| rayon::join(|| self.build(bl), || self.build(br)),
			);
			a.max(b).max(c).max(d)
		} else {
			[tl, tr, bl, br].into_iter().map(|n| self.build(n)).max().unwrap_or(0)
		}
	}
}

impl QuadTree {
	/// Builds the tree for `img` on the global `rayon` pool.
	pub fn build(img: &RgbImage, config: &BuildConfig) -> Self {
		let (width, height) = img.dimensions();
		let _span = trace_span!("build", width, height).entered();
		let mut root = QuadNode::new(img, Region::of_size(width, height), 0);
		let max_depth_reached = Builder { img, config }.build(&mut root);
		debug!(max_depth_reached, "quadtree built");
		Self { width, height, root, max_depth_reached }
	}

	/// Builds the tree using the workers of `pool` only.
	pub fn build_in(pool: &rayon::ThreadPool, img: &RgbImage, config: &BuildConfig) -> Self {
		pool.install(|| Self::build(img, config))
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn root(&self) -> &QuadNode {
		&self.root
	}

	/// Depth of the deepest leaf.
	pub fn max_depth_reached(&self) -> u32 {
		self.max_depth_reached
	}

	/// Collects the nodes to draw for a preview cut at `depth`.
	///
	/// Descent stops at leaves and at nodes `depth` levels deep, so the
	/// returned regions never overlap. Nodes come in pre-order with
	/// sections ordered top-left, top-right, bottom-left, bottom-right.
	pub fn get_leaf_nodes(&self, depth: u32) -> Result<Vec<&QuadNode>, DepthError> {
		if depth > self.max_depth_reached {
			return Err(DepthError::OutOfRange { requested: depth, max: self.max_depth_reached });
		}
		let mut leaves = Vec::new();
		Self::collect_leaves(&self.root, depth, &mut leaves);
		Ok(leaves)
	}

	fn collect_leaves<'a>(node: &'a QuadNode, depth: u32, leaves: &mut Vec<&'a QuadNode>) {
		match node.children() {
			Some(c) if node.depth != depth => {
				c.iter().for_each(|n| Self::collect_leaves(n, depth, leaves));
			},
			_ => leaves.push(node),
		}
	}

	/// Number of true leaves in the tree.
	pub fn leaf_count(&self) -> usize {
		let mut count = 0;
		self.root.walk(&mut |n| if n.is_leaf() { count += 1 });
		count
	}
}
