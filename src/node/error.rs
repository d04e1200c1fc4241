use thiserror::Error;

/// Reason why a leaf query couldn't be answered.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthError {
	/// The requested depth is deeper than any leaf of the tree.
	#[error("depth {requested} is out of range; the tree is {max} levels deep")]
	OutOfRange { requested: u32, max: u32 },
}

/// Reason why a compression request was rejected before any work started.
#[derive(Error, Debug)]
pub enum InputError {
	/// The source image path does not exist.
	#[error("wrong image path: {0}")]
	MissingSource(std::path::PathBuf),
	/// The source image is neither `.png` nor `.jpg`.
	#[error("wrong file type: {0}")]
	UnsupportedExtension(std::path::PathBuf),
	/// The level lies outside `1..=max`.
	#[error("the compression level should be between 1 and {max}, got {level}")]
	LevelOutOfRange { level: u32, max: u32 },
	/// The error threshold is negative or not a number.
	#[error("the error threshold should be a finite number of at least 0, got {0}")]
	InvalidThreshold(f64),
}

/// Reason why a compression run failed.
#[derive(Error, Debug)]
pub enum CompressError {
	#[error(transparent)]
	Input(#[from] InputError),
	#[error(transparent)]
	Depth(#[from] DepthError),
	/// Decoding the source or encoding an output image failed.
	#[error("image error: {0}")]
	Image(#[from] image::ImageError),
	/// Output directory or file could not be created.
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),
}
