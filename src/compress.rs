//! File-to-file compression runs.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::animation::{self, Animation};
use crate::node::error::{CompressError, InputError};
use crate::tree::{BuildConfig, QuadTree};

/// Source file extensions that can be compressed.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["png", "jpg"];

/// What to produce from a source image.
#[derive(Clone, Debug)]
pub struct CompressOptions {
	/// Depth at which the static approximation is cut.
	pub level: u32,
	/// Outline every region in the outputs.
	pub borders: bool,
	/// Also write a depth-progression animation.
	pub animation: bool,
	/// Where animations go.
	pub animation_dir: PathBuf,
}

impl Default for CompressOptions {
	fn default() -> Self {
		Self {
			level: 1,
			borders: false,
			animation: false,
			animation_dir: PathBuf::from(animation::DEFAULT_DIR),
		}
	}
}

/// Artifacts written by `compress`.
#[derive(Clone, Debug)]
pub struct CompressReport {
	pub output: PathBuf,
	pub animation: Option<PathBuf>,
	pub max_depth_reached: u32,
	pub leaves: usize,
}

/// Rejects a source path or level that `compress` cannot work with.
pub fn validate_input(source: &Path, level: u32, max_depth: u32) -> Result<(), InputError> {
	if !source.exists() {
		return Err(InputError::MissingSource(source.to_owned()));
	}
	let supported = source.extension()
		.and_then(|e| e.to_str())
		.map(|e| SUPPORTED_EXTENSIONS.contains(&e))
		.unwrap_or(false);
	if !supported {
		return Err(InputError::UnsupportedExtension(source.to_owned()));
	}
	if level == 0 || level > max_depth {
		return Err(InputError::LevelOutOfRange { level, max: max_depth });
	}
	Ok(())
}

/// `dir/name.ext` becomes `dir/name_quadtree.ext`.
pub fn output_path(source: &Path) -> PathBuf {
	let stem = source.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
	let mut name = format!("{}_quadtree", stem);
	if let Some(ext) = source.extension() {
		name.push('.');
		name.push_str(&ext.to_string_lossy());
	}
	source.with_file_name(name)
}

/// Approximates the image at `source` and writes the requested outputs.
///
/// Inputs are validated first; nothing is written if they are rejected.
/// A `level` deeper than the built tree is rendered at the tree's deepest
/// level instead.
pub fn compress(
	source: &Path,
	options: &CompressOptions,
	config: &BuildConfig,
	pool: Option<&rayon::ThreadPool>,
) -> Result<CompressReport, CompressError> {
	validate_input(source, options.level, config.max_depth)?;
	config.validate()?;
	let img = image::open(source)?.into_rgb8();
	let tree = match pool {
		Some(p) => QuadTree::build_in(p, &img, config),
		None => QuadTree::build(&img, config),
	};

	let level = if options.level > tree.max_depth_reached() {
		warn!(
			level = options.level,
			max_depth_reached = tree.max_depth_reached(),
			"image needs fewer levels than requested"
		);
		tree.max_depth_reached()
	} else {
		options.level
	};
	let output = output_path(source);
	tree.to_image(level, options.borders)?.save(&output)?;
	info!(output = %output.display(), "the image was compressed");

	let animation = if options.animation {
		let path = animation::next_output_path(&options.animation_dir)?;
		Animation::of_tree(&tree, config.max_depth, options.borders).save(&path)?;
		Some(path)
	} else {
		None
	};

	Ok(CompressReport {
		output,
		animation,
		max_depth_reached: tree.max_depth_reached(),
		leaves: tree.leaf_count(),
	})
}
