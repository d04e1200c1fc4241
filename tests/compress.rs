use std::path::PathBuf;

use image::{Rgb, RgbImage};

use quadtree_compress::error::{CompressError, InputError};
use quadtree_compress::{compress, BuildConfig, CompressOptions};

fn scratch_dir(name: &str) -> PathBuf {
	let dir = std::env::temp_dir()
		.join(format!("quadtree_compress-it-{}-{}", name, std::process::id()));
	let _ = std::fs::remove_dir_all(&dir);
	std::fs::create_dir_all(&dir).unwrap();
	dir
}

fn quadrants(size: u32) -> RgbImage {
	RgbImage::from_fn(size, size, |x, y| match (x < size / 2, y < size / 2) {
		(true, true) => Rgb([220, 20, 60]),
		(false, true) => Rgb([30, 144, 255]),
		(true, false) => Rgb([50, 205, 50]),
		(false, false) => Rgb([255, 215, 0]),
	})
}

#[test]
fn writes_static_output_and_animations() {
	let dir = scratch_dir("full");
	let source = dir.join("quads.png");
	let img = quadrants(64);
	img.save(&source).unwrap();

	let options = CompressOptions {
		level: 3,
		animation: true,
		animation_dir: dir.join("gif"),
		..Default::default()
	};
	let report = compress(&source, &options, &BuildConfig::default(), None).unwrap();
	assert_eq!(dir.join("quads_quadtree.png"), report.output);
	assert_eq!(1, report.max_depth_reached);
	assert_eq!(4, report.leaves);
	assert_eq!(Some(dir.join("gif").join("gif1.gif")), report.animation);

	let out = image::open(&report.output).unwrap().into_rgb8();
	assert_eq!(img, out);

	// A second run picks the next free animation name.
	let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
	let again = compress(&source, &options, &BuildConfig::default(), Some(&pool)).unwrap();
	assert_eq!(Some(dir.join("gif").join("gif2.gif")), again.animation);
	assert!(dir.join("gif").join("gif1.gif").is_file());

	std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn rejected_input_writes_nothing() {
	let dir = scratch_dir("rejected");
	let source = dir.join("quads.png");
	quadrants(16).save(&source).unwrap();

	let options = CompressOptions {
		level: 9,
		animation: true,
		animation_dir: dir.join("gif"),
		..Default::default()
	};
	match compress(&source, &options, &BuildConfig::default(), None) {
		Err(CompressError::Input(InputError::LevelOutOfRange { level: 9, max: 8 })) => (),
		other => panic!("unexpected result {:?}", other),
	}
	assert!(!dir.join("quads_quadtree.png").exists());
	assert!(!dir.join("gif").exists());

	let negative = BuildConfig { error_threshold: -1., ..Default::default() };
	let options = CompressOptions { level: 2, ..options };
	assert!(matches!(
		compress(&source, &options, &negative, None),
		Err(CompressError::Input(InputError::InvalidThreshold(_)))
	));
	assert!(!dir.join("quads_quadtree.png").exists());

	let missing = compress(&dir.join("nope.png"), &CompressOptions::default(), &BuildConfig::default(), None);
	assert!(matches!(missing, Err(CompressError::Input(InputError::MissingSource(_)))));

	std::fs::remove_dir_all(&dir).unwrap();
}
