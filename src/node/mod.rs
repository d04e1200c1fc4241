pub mod error;
pub mod metric;
pub mod region;

use image::{Rgb, RgbImage};

use metric::Histogram;
use region::{Quadrant, Region};

/// Role of a node in the tree.
#[derive(Clone, Debug)]
pub enum NodeKind {
	/// Terminal node; its region is drawn flat with the node's color.
	Leaf,
	/// Node split into four sections, in `Quadrant::ALL` order.
	Internal(Box<[QuadNode; 4]>),
}

/// Node in a quadtree approximating an image.
///
/// Every node carries the average color and error of its region, leaf or
/// not, such that tree descent can stop at any level and give a meaningful
/// preview.
#[derive(Clone, Debug)]
pub struct QuadNode {
	pub region: Region,
	pub depth: u32,
	pub color: Rgb<u8>,
	pub error: f64,
	pub kind: NodeKind,
}

impl QuadNode {
	/// Measures `region` of `img` into a new, unsplit node.
	pub fn new(img: &RgbImage, region: Region, depth: u32) -> Self {
		let m = Histogram::of_region(img, &region).measure();
		Self {
			region,
			depth,
			color: m.color,
			error: m.error,
			kind: NodeKind::Leaf,
		}
	}

	pub fn is_leaf(&self) -> bool {
		matches!(self.kind, NodeKind::Leaf)
	}

	pub fn children(&self) -> Option<&[QuadNode; 4]> {
		match &self.kind {
			NodeKind::Leaf => None,
			NodeKind::Internal(c) => Some(c),
		}
	}

	pub fn child(&self, quadrant: Quadrant) -> Option<&QuadNode> {
		self.children().map(|c| &c[quadrant.index()])
	}

	/// Replaces this node's role with four freshly measured sections one
	/// level deeper, and returns them for further building.
	pub fn split(&mut self, img: &RgbImage) -> &mut [QuadNode; 4] {
		let depth = self.depth + 1;
		let sections = self.region.split().map(|r| QuadNode::new(img, r, depth));
		self.kind = NodeKind::Internal(Box::new(sections));
		match &mut self.kind {
			NodeKind::Internal(c) => c,
			NodeKind::Leaf => unreachable!("node was just split"),
		}
	}

	/// Visits this node and its descendants parent-first.
	pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a QuadNode)) {
		f(self);
		if let Some(c) = self.children() {
			c.iter().for_each(|n| n.walk(f));
		}
	}
}
