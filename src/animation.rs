//! Depth-progression animations of a quadtree.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};
use tracing::{debug, info};

use crate::node::error::CompressError;
use crate::tree::QuadTree;

/// Display time of each frame.
pub const FRAME_DELAY_MS: u32 = 800;
/// Directory animations are written to unless told otherwise.
pub const DEFAULT_DIR: &str = "gif";

/// Sequence of rendered frames waiting to be encoded.
#[derive(Clone, Debug, Default)]
pub struct Animation {
	frames: Vec<RgbImage>,
}

impl Animation {
	pub fn new() -> Self {
		Default::default()
	}

	/// One frame per depth in `0..=max_depth`.
	///
	/// Depths below the deepest leaf of `tree` repeat its final frame, so the
	/// sequence always has the same length for a given `max_depth`.
	pub fn of_tree(tree: &QuadTree, max_depth: u32, borders: bool) -> Self {
		let mut anim = Self::new();
		for depth in 0..=max_depth {
			let depth = depth.min(tree.max_depth_reached());
			let leaves = match tree.get_leaf_nodes(depth) {
				Ok(l) => l,
				Err(_) => unreachable!("depth clamped to tree depth"),
			};
			anim.push(crate::render::render(tree.width(), tree.height(), &leaves, borders));
		}
		anim
	}

	pub fn push(&mut self, frame: RgbImage) {
		self.frames.push(frame);
	}

	pub fn len(&self) -> usize {
		self.frames.len()
	}

	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	pub fn frames(&self) -> &[RgbImage] {
		&self.frames
	}

	/// Encodes the frames as an endlessly looping GIF at `path`.
	pub fn save(&self, path: &Path) -> Result<(), CompressError> {
		info!(path = %path.display(), frames = self.len(), "started gif creation");
		let mut encoder = GifEncoder::new(BufWriter::new(File::create(path)?));
		encoder.set_repeat(Repeat::Infinite)?;
		encoder.encode_frames(self.frames.iter().map(|f| Frame::from_parts(
			DynamicImage::ImageRgb8(f.clone()).into_rgba8(),
			0,
			0,
			Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1),
		)))?;
		info!("gif creation successfully completed");
		Ok(())
	}
}

/// Picks `gif<N>.gif` in `dir` with the lowest `N >= 1` not already taken,
/// creating `dir` if needed.
pub fn next_output_path(dir: &Path) -> std::io::Result<PathBuf> {
	if !dir.exists() {
		debug!(dir = %dir.display(), "creating animation directory");
		std::fs::create_dir_all(dir)?;
	}
	let mut number = 1u32;
	loop {
		let path = dir.join(format!("gif{}.gif", number));
		if !path.exists() {
			return Ok(path);
		}
		number += 1;
	}
}
