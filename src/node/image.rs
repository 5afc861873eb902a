use super::color;
use super::error::BufferError;
use super::{QuadNode, Region};

/// Rectangular grid of packed 24-bit RGB samples, row-major.
///
/// The sample at `(x, y)` lives at offset `y * width + x`; the vector
/// length always equals `width * height`, and both dimensions are at
/// least one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
	width: u32,
	height: u32,
	pixels: Vec<u32>,
}

impl PixelBuffer {
	/// Allocates a buffer of the given dimensions, filled with black.
	pub fn new(width: u32, height: u32) -> Result<PixelBuffer, BufferError> {
		if width == 0 || height == 0 {
			return Err(BufferError::EmptyDimensions);
		}
		Ok(PixelBuffer {
			width,
			height,
			pixels: vec![0; (width * height) as usize],
		})
	}

	/// Wraps an existing row-major pixel vector.
	pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<PixelBuffer, BufferError> {
		if width == 0 || height == 0 {
			return Err(BufferError::EmptyDimensions);
		}
		if pixels.len() != (width * height) as usize {
			return Err(BufferError::LengthMismatch(
				(width * height) as usize,
				pixels.len(),
			));
		}
		Ok(PixelBuffer { width, height, pixels })
	}

	/// Packs an RGBA image into a buffer, dropping the alpha channel.
	pub fn from_rgba(img: &image::RgbaImage) -> Result<PixelBuffer, BufferError> {
		let pixels = img
			.pixels()
			.map(|p| color::pack(p.0[0], p.0[1], p.0[2]))
			.collect();
		PixelBuffer::from_pixels(img.width(), img.height(), pixels)
	}

	/// Unpacks the buffer into a fully opaque RGBA image.
	pub fn to_rgba(&self) -> image::RgbaImage {
		image::RgbaImage::from_fn(self.width, self.height, |x, y| {
			let [r, g, b] = color::channels(self.get(x, y));
			image::Rgba([r, g, b, 255])
		})
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn pixels(&self) -> &[u32] {
		&self.pixels
	}

	/// Region covering the whole buffer.
	pub fn bounds(&self) -> Region {
		Region::new(0, 0, self.width - 1, self.height - 1)
	}

	pub fn get(&self, x: u32, y: u32) -> u32 {
		debug_assert!(x < self.width && y < self.height);
		self.pixels[(y * self.width + x) as usize]
	}

	pub fn set(&mut self, x: u32, y: u32, color: u32) {
		debug_assert!(x < self.width && y < self.height);
		self.pixels[(y * self.width + x) as usize] = color;
	}
}

impl QuadNode {
	/// Paints this subtree's share of the reconstructed image.
	///
	/// A leaf covers all of `region` with its color. A branch re-splits
	/// the region the same way the builder did and recurses; absent
	/// children and empty quadrants are skipped together, since the
	/// builder left both out for the same coordinates.
	pub fn render(&self, region: Region, out: &mut PixelBuffer) {
		if region.is_empty() {
			return;
		}
		if self.is_leaf() {
			for y in region.tl_y..=region.br_y {
				for x in region.tl_x..=region.br_x {
					out.set(x, y, self.color);
				}
			}
			return;
		}
		// Recursion
		let [tl, tr, bl, br] = region.split();
		render_child(&self.tl, tl, out);
		render_child(&self.tr, tr, out);
		render_child(&self.bl, bl, out);
		render_child(&self.br, br, out);
	}

	/// Reconstructs a full raster of the given dimensions from the
	/// tree.
	pub fn decompress(&self, width: u32, height: u32) -> Result<PixelBuffer, BufferError> {
		let mut out = PixelBuffer::new(width, height)?;
		self.render(out.bounds(), &mut out);
		Ok(out)
	}
}

fn render_child(child: &Option<Box<QuadNode>>, region: Region, out: &mut PixelBuffer) {
	if let Some(node) = child {
		node.render(region, out);
	}
}
