use image::{Rgb, RgbImage};

use super::region::Region;

/// Luma weights for combining per-channel deviations.
const LUMA: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Per-channel counts of pixel values over some set of pixels.
#[derive(Clone)]
pub struct Histogram {
	pub channels: [[u64; 256]; 3],
}

impl Default for Histogram {
	fn default() -> Self {
		Self { channels: [[0; 256]; 3] }
	}
}

impl std::fmt::Debug for Histogram {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Histogram")
			.field("pixels", &self.pixel_count())
			.finish()
	}
}

/// Mean and population standard deviation of one channel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChannelStats {
	pub mean: f64,
	pub deviation: f64,
}

impl ChannelStats {
	/// Computes the weighted mean and deviation of a 256-bin histogram.
	///
	/// An empty histogram yields zeroes instead of dividing by zero.
	pub fn from_bins(bins: &[u64; 256]) -> Self {
		let total: u64 = bins.iter().sum();
		if total == 0 {
			return Self::default();
		}
		let total = total as f64;
		let mean = bins.iter()
			.enumerate()
			.map(|(v, &c)| v as f64 * c as f64)
			.sum::<f64>() / total;
		let variance = bins.iter()
			.enumerate()
			.map(|(v, &c)| c as f64 * (mean - v as f64).powi(2))
			.sum::<f64>() / total;
		Self { mean, deviation: variance.sqrt() }
	}
}

/// Representative color and non-uniformity score of a set of pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
	pub color: Rgb<u8>,
	pub error: f64,
}

impl Histogram {
	/// Counts the pixels of `img` inside `region`.
	pub fn of_region(img: &RgbImage, region: &Region) -> Self {
		let mut hist = Self::default();
		for y in region.top..region.bottom {
			for x in region.left..region.right {
				hist.add(img.get_pixel(x, y));
			}
		}
		hist
	}

	pub fn add(&mut self, pixel: &Rgb<u8>) {
		for (channel, &value) in self.channels.iter_mut().zip(pixel.0.iter()) {
			channel[value as usize] += 1;
		}
	}

	pub fn pixel_count(&self) -> u64 {
		self.channels[0].iter().sum()
	}

	/// Derives the average color and the luma-weighted error.
	pub fn measure(&self) -> Measurement {
		let stats = [
			ChannelStats::from_bins(&self.channels[0]),
			ChannelStats::from_bins(&self.channels[1]),
			ChannelStats::from_bins(&self.channels[2]),
		];
		let color = Rgb([
			stats[0].mean.round() as u8,
			stats[1].mean.round() as u8,
			stats[2].mean.round() as u8,
		]);
		let error: f64 = stats.iter()
			.zip(LUMA.iter())
			.map(|(s, w)| s.deviation * w)
			.sum();
		Measurement { color, error }
	}
}
