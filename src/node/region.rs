/// One of the four sections of a split region, in the order that
/// children are stored and visited.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Quadrant {
	TopLeft,
	TopRight,
	BottomLeft,
	BottomRight,
}

impl Quadrant {
	/// All quadrants in storage order.
	pub const ALL: [Quadrant; 4] = [
		Quadrant::TopLeft,
		Quadrant::TopRight,
		Quadrant::BottomLeft,
		Quadrant::BottomRight,
	];

	/// Index of this quadrant within a node's children.
	pub fn index(self) -> usize {
		self as usize
	}

	/// Picks the quadrant a point falls into relative to a midpoint.
	///
	/// Points lying exactly on a midpoint line belong to the right/bottom
	/// side, matching the way `Region::split` places the shared edge.
	pub fn of(x: u32, y: u32, mid: (u32, u32)) -> Self {
		match (x < mid.0, y < mid.1) {
			(true, true) => Quadrant::TopLeft,
			(false, true) => Quadrant::TopRight,
			(true, false) => Quadrant::BottomLeft,
			(false, false) => Quadrant::BottomRight,
		}
	}
}

/// Axis-aligned box of pixels, `left..right` by `top..bottom`.
///
/// A region may be empty along one axis; this happens when a region
/// one pixel wide or tall is split.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Region {
	pub left: u32,
	pub top: u32,
	pub right: u32,
	pub bottom: u32,
}

impl Region {
	pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
		debug_assert!(left <= right && top <= bottom, "inverted region");
		Self { left, top, right, bottom }
	}

	/// Region covering a whole `width` by `height` image.
	pub fn of_size(width: u32, height: u32) -> Self {
		Self::new(0, 0, width, height)
	}

	pub fn width(&self) -> u32 {
		self.right - self.left
	}

	pub fn height(&self) -> u32 {
		self.bottom - self.top
	}

	pub fn area(&self) -> u64 {
		self.width() as u64 * self.height() as u64
	}

	pub fn is_empty(&self) -> bool {
		self.area() == 0
	}

	/// Split point; the rounding here is shared by `split` and point routing.
	pub fn midpoint(&self) -> (u32, u32) {
		(self.left + self.width() / 2, self.top + self.height() / 2)
	}

	pub fn contains(&self, x: u32, y: u32) -> bool {
		x >= self.left && x < self.right && y >= self.top && y < self.bottom
	}

	/// Overlapping part of two regions, if any pixel is shared.
	///
	/// Sections of one `split` never intersect.
	pub fn intersection(&self, other: &Region) -> Option<Region> {
		let left = self.left.max(other.left);
		let top = self.top.max(other.top);
		let right = self.right.min(other.right);
		let bottom = self.bottom.min(other.bottom);
		if left < right && top < bottom {
			Some(Region::new(left, top, right, bottom))
		} else {
			None
		}
	}

	/// Cuts the region at its midpoint into four sections, in
	/// `Quadrant::ALL` order. The sections tile `self` exactly.
	pub fn split(&self) -> [Region; 4] {
		let (mx, my) = self.midpoint();
		[
			Region::new(self.left, self.top, mx, my),
			Region::new(mx, self.top, self.right, my),
			Region::new(self.left, my, mx, self.bottom),
			Region::new(mx, my, self.right, self.bottom),
		]
	}

	/// Section of `split()` for one quadrant.
	pub fn quadrant(&self, quadrant: Quadrant) -> Region {
		self.split()[quadrant.index()]
	}
}
