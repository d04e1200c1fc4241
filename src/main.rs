use image::error::ImageError;

use quadtree_compress::error::{CompressError, InputError};
use quadtree_compress::tree::{self, BuildConfig};
use quadtree_compress::{compress, CompressOptions};

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// Parses an optional numeric argument, exiting on garbage.
fn numeric_arg<T: std::str::FromStr>(matches: &clap::ArgMatches, name: &str, default: T) -> T {
	match matches.value_of(name) {
		None => default,
		Some(v) => match v.parse() {
			Ok(n) => n,
			Err(_) => error_exit(&format!("Non-numeric value for {}", name), 2),
		},
	}
}

/// `clap`-based CLI for approximating images with quadtrees.
///
/// Logging is controlled through `RUST_LOG`.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 5: computation limits exceeded
///
/// 10: other, potentially unknown error
fn main() {
	tracing_subscriber::fmt()
		.with_target(true)
		.with_env_filter(EnvFilter::from_default_env())
		.with_span_events(FmtSpan::CLOSE)
		.init();

	let clap_matches = clap::App::new("quadtree_compress")
		.version("0.1.0")
		.author("vkcz")
		.about("Approximates an image by flat-filling the regions of a quadtree.")
		.arg_from_usage("-i, --img=<PATH> 'Source image, .png or .jpg'")
		.arg_from_usage("-l, --level=<N> 'Depth at which the output is rendered, from 1 to the maximum depth'")
		.arg_from_usage("-b, --borders 'Outline every region'")
		.arg_from_usage("-g, --gif 'Also write an animation stepping through every depth'")
		.arg_from_usage("--max-depth=[N] 'Deepest level regions are split to; defaults to 8'")
		.arg_from_usage("--threshold=[F] 'Error at or below which a region is kept whole; defaults to 13'")
		.arg_from_usage("--parallel-depth=[N] 'Depth from which sections are built without forking; defaults to 4'")
		.arg_from_usage("--threads=[N] 'Number of worker threads; defaults to one per CPU'")
		.arg_from_usage("--gif-dir=[DIR] 'Directory animations are written to; defaults to gif'")
		.get_matches();

	let config = BuildConfig {
		max_depth: numeric_arg(&clap_matches, "max-depth", tree::DEFAULT_MAX_DEPTH),
		error_threshold: numeric_arg(&clap_matches, "threshold", tree::DEFAULT_ERROR_THRESHOLD),
		parallel_depth: numeric_arg(&clap_matches, "parallel-depth", tree::DEFAULT_PARALLEL_DEPTH),
	};
	if let Err(e) = config.validate() {
		error_exit(&e.to_string(), 2);
	}
	let mut options = CompressOptions {
		level: numeric_arg(&clap_matches, "level", 0),
		borders: clap_matches.is_present("borders"),
		animation: clap_matches.is_present("gif"),
		..Default::default()
	};
	if let Some(dir) = clap_matches.value_of("gif-dir") {
		options.animation_dir = dir.into();
	}
	let pool = match clap_matches.value_of("threads") {
		None => None,
		Some(_) => match rayon::ThreadPoolBuilder::new()
			.num_threads(numeric_arg(&clap_matches, "threads", 0))
			.build() {
			Ok(p) => Some(p),
			Err(_) => error_exit("Could not start worker threads", 10),
		},
	};

	// `--img` is required, so clap has already rejected its absence.
	let source = std::path::Path::new(clap_matches.value_of("img").unwrap());
	match compress(source, &options, &config, pool.as_ref()) {
		Ok(report) => {
			println!("The image was compressed: {}", report.output.display());
			if let Some(anim) = report.animation {
				println!("Animation saved: {}", anim.display());
			}
		},
		Err(e) => {
			let (msg, code) = match e {
				CompressError::Input(InputError::MissingSource(_)) => ("Wrong image path!".to_string(), 2),
				CompressError::Input(InputError::UnsupportedExtension(_)) => ("Wrong file type!".to_string(), 2),
				CompressError::Input(e @ InputError::LevelOutOfRange { .. })
				| CompressError::Input(e @ InputError::InvalidThreshold(_)) => (e.to_string(), 2),
				CompressError::Image(ImageError::Decoding(_)) => ("Invalid image data".to_string(), 4),
				CompressError::Image(ImageError::Limits(_)) => ("Computation limits exceeded".to_string(), 5),
				CompressError::Image(ImageError::IoError(_)) | CompressError::Io(_) =>
					("File could not be read or written".to_string(), 3),
				e => (format!("An error occurred: {}", e), 10),
			};
			error_exit(&msg, code)
		}
	}
}
