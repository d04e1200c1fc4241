use image::{Rgb, RgbImage};

use crate::node::error::DepthError;
use crate::node::region::Region;
use crate::node::QuadNode;
use crate::tree::QuadTree;

/// Color of region outlines and of any pixel no leaf covers.
pub const BORDER_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

fn outline(img: &mut RgbImage, r: &Region) {
	let (right, bottom) = (r.right - 1, r.bottom - 1);
	for x in r.left..r.right {
		img.put_pixel(x, r.top, BORDER_COLOR);
		img.put_pixel(x, bottom, BORDER_COLOR);
	}
	for y in r.top..r.bottom {
		img.put_pixel(r.left, y, BORDER_COLOR);
		img.put_pixel(right, y, BORDER_COLOR);
	}
}

/// Paints each node's region flat with its color.
///
/// With `borders`, a one pixel outline is drawn along the inside edge of
/// every region. Regions must lie within `img`.
pub fn draw_leaves(img: &mut RgbImage, leaves: &[&QuadNode], borders: bool) {
	for node in leaves.iter().filter(|n| !n.region.is_empty()) {
		let r = &node.region;
		image::imageops::replace(
			img,
			&RgbImage::from_pixel(r.width(), r.height(), node.color),
			r.left as i64,
			r.top as i64,
		);
		if borders {
			outline(img, r);
		}
	}
}

/// Creates a `width` by `height` image of the given leaves.
pub fn render(width: u32, height: u32, leaves: &[&QuadNode], borders: bool) -> RgbImage {
	let mut img = RgbImage::from_pixel(width, height, BORDER_COLOR);
	draw_leaves(&mut img, leaves, borders);
	img
}

impl QuadTree {
	/// Renders the approximation cut at `depth`.
	///
	/// Fails like `get_leaf_nodes` if the tree is not `depth` levels deep.
	pub fn to_image(&self, depth: u32, borders: bool) -> Result<RgbImage, DepthError> {
		let leaves = self.get_leaf_nodes(depth)?;
		Ok(render(self.width(), self.height(), &leaves, borders))
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::tree::BuildConfig;

	fn quadrants() -> RgbImage {
		RgbImage::from_fn(8, 6, |x, y| match (x < 4, y < 3) {
			(true, true) => Rgb([255, 0, 0]),
			(false, true) => Rgb([0, 255, 0]),
			(true, false) => Rgb([0, 0, 255]),
			(false, false) => Rgb([255, 255, 255]),
		})
	}

	#[test]
	fn reconstructs_flat_regions() {
		let img = quadrants();
		let tree = QuadTree::build(&img, &BuildConfig::default());
		assert_eq!(img, tree.to_image(1, false).unwrap());
	}

	#[test]
	fn depth_zero_is_average() {
		let tree = QuadTree::build(&quadrants(), &BuildConfig::default());
		let out = tree.to_image(0, false).unwrap();
		assert!(out.pixels().all(|p| *p == tree.root().color));
		assert_eq!(Rgb([128, 128, 128]), tree.root().color);
	}

	#[test]
	fn borders_outline_regions() {
		let tree = QuadTree::build(&quadrants(), &BuildConfig::default());
		let out = tree.to_image(1, true).unwrap();
		for &(x, y) in &[(0, 0), (3, 0), (4, 0), (7, 5), (0, 2), (5, 3)] {
			assert_eq!(BORDER_COLOR, *out.get_pixel(x, y), "({}, {})", x, y);
		}
		assert_eq!(Rgb([255, 0, 0]), *out.get_pixel(1, 1));
		assert_eq!(Rgb([255, 255, 255]), *out.get_pixel(5, 4));
	}

	#[test]
	fn out_of_range_depth() {
		let tree = QuadTree::build(&quadrants(), &BuildConfig::default());
		assert!(tree.to_image(2, false).is_err());
	}

	#[test]
	fn empty_regions_are_skipped() {
		let img = RgbImage::from_fn(1, 4, |_, y| Rgb([(y * 80) as u8; 3]));
		let tree = QuadTree::build(&img, &BuildConfig::default());
		let out = tree.to_image(tree.max_depth_reached(), true).unwrap();
		assert_eq!((1, 4), out.dimensions());
	}
}
