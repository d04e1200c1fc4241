//! Spatial index of points over the partition of a built `QuadTree`.
//!
//! The index copies only the regions of the tree it is made from, so it can
//! be created, filled and dropped without touching the tree itself.

use crate::node::region::{Quadrant, Region};
use crate::node::QuadNode;
use crate::tree::QuadTree;

/// Pixel coordinate supplied by the application.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Point {
	pub x: u32,
	pub y: u32,
}

impl Point {
	pub fn new(x: u32, y: u32) -> Self {
		Self { x, y }
	}
}

/// Node of a `PointIndex`; holds points only while it is a leaf.
#[derive(Clone, Debug)]
pub struct IndexNode {
	pub region: Region,
	pub depth: u32,
	pub points: Vec<Point>,
	pub sections: Option<Box<[IndexNode; 4]>>,
}

impl IndexNode {
	fn mirror(node: &QuadNode) -> Self {
		Self {
			region: node.region,
			depth: node.depth,
			points: Vec::new(),
			sections: node.children().map(|c| Box::new([
				Self::mirror(&c[0]),
				Self::mirror(&c[1]),
				Self::mirror(&c[2]),
				Self::mirror(&c[3]),
			])),
		}
	}

	pub fn is_leaf(&self) -> bool {
		self.sections.is_none()
	}

	fn section_for(&self, point: &Point) -> Option<&IndexNode> {
		let q = Quadrant::of(point.x, point.y, self.region.midpoint());
		self.sections.as_ref().map(|s| &s[q.index()])
	}

	fn section_for_mut(&mut self, point: &Point) -> Option<&mut IndexNode> {
		let q = Quadrant::of(point.x, point.y, self.region.midpoint());
		self.sections.as_mut().map(|s| &mut s[q.index()])
	}
}

/// Points bucketed by the leaf regions of a quadtree.
#[derive(Clone, Debug)]
pub struct PointIndex {
	root: IndexNode,
	len: usize,
}

impl PointIndex {
	/// Creates an empty index with the same partition as `tree`.
	pub fn new(tree: &QuadTree) -> Self {
		Self { root: IndexNode::mirror(tree.root()), len: 0 }
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn root(&self) -> &IndexNode {
		&self.root
	}

	/// Leaf whose region the point would fall in, descending by midpoints.
	pub fn locate(&self, point: &Point) -> &IndexNode {
		let mut node = &self.root;
		while let Some(next) = node.section_for(point) {
			node = next;
		}
		node
	}

	/// Points stored in the leaf that `point` would fall in.
	pub fn points_in(&self, point: &Point) -> &[Point] {
		&self.locate(point).points
	}

	fn locate_mut(&mut self, point: &Point) -> &mut IndexNode {
		let mut node = &mut self.root;
		while !node.is_leaf() {
			node = match node.section_for_mut(point) {
				Some(next) => next,
				None => unreachable!("internal index node without sections"),
			};
		}
		node
	}

	/// Regions visited from the root down to the leaf holding `point`.
	pub fn path(&self, point: &Point) -> Vec<Region> {
		let mut path = vec![self.root.region];
		let mut node = &self.root;
		while let Some(next) = node.section_for(point) {
			path.push(next.region);
			node = next;
		}
		path
	}

	pub fn insert(&mut self, point: Point) {
		self.locate_mut(&point).points.push(point);
		self.len += 1;
	}

	/// Removes every stored copy of `point`, returning how many there were.
	pub fn remove(&mut self, point: &Point) -> usize {
		let points = &mut self.locate_mut(point).points;
		let before = points.len();
		points.retain(|p| p != point);
		let removed = before - points.len();
		self.len -= removed;
		removed
	}

	pub fn contains(&self, point: &Point) -> bool {
		self.locate(point).points.contains(point)
	}
}
