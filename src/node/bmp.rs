//! Reading and writing of uncompressed truecolor bitmap files.
//!
//! Only the header fields the pipeline needs are interpreted: the
//! pixel-data offset, the dimensions and the bit depth. Samples are 3
//! bytes each, with stored rows padded to 4-byte boundaries. The first
//! byte of a stored sample becomes the low byte of the packed color
//! and the writer puts the low byte back first, so a buffer survives
//! an encode/decode pair bit-for-bit.

use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::trace;

use super::error::{DecodeError, EncodeError};
use super::image::PixelBuffer;

/// Position of the pixel-data offset field in the file header.
const DATA_OFFSET_OFFSET: u64 = 0x000A;
/// Position of the width field.
const WIDTH_OFFSET: u64 = 0x0012;
/// Position of the height field.
const HEIGHT_OFFSET: u64 = 0x0016;
/// Position of the bits-per-pixel field.
const BITS_PER_PIXEL_OFFSET: u64 = 0x001C;

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;

/// Largest accepted width or height.
const MAX_DIMENSION: u32 = 1 << 14;

/// Pixels-per-meter resolution written into the info header.
const RESOLUTION: u32 = 0x0B6D;

/// Bytes per stored row, including the trailing padding.
fn padded_row_size(width: u32, bytes_per_pixel: u32) -> u32 {
	(width * bytes_per_pixel + 3) / 4 * 4
}

/// Loads a truecolor bitmap into a pixel buffer.
///
/// On success also returns the sample size in bytes, which is always 3
/// for the only supported bit depth.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<(PixelBuffer, u32), DecodeError> {
	let mut file = File::open(path)?;

	let mut magic = [0u8; 2];
	file.read_exact(&mut magic)?;
	if &magic != b"BM" {
		return Err(DecodeError::MissingHeader);
	}

	file.seek(SeekFrom::Start(DATA_OFFSET_OFFSET))?;
	let data_offset = read_u32(&mut file)?;
	file.seek(SeekFrom::Start(WIDTH_OFFSET))?;
	let width = read_u32(&mut file)?;
	file.seek(SeekFrom::Start(HEIGHT_OFFSET))?;
	let height = read_u32(&mut file)?;
	file.seek(SeekFrom::Start(BITS_PER_PIXEL_OFFSET))?;
	let bits_per_pixel = read_u16(&mut file)?;

	trace!("Width: {}", width);
	trace!("Height: {}", height);
	trace!("Bit depth: {}", bits_per_pixel);

	if width == 0 || height == 0 {
		return Err(DecodeError::EmptyDimensions);
	}
	if width > MAX_DIMENSION {
		return Err(DecodeError::TooLargeDimensions("width", width));
	}
	if height > MAX_DIMENSION {
		return Err(DecodeError::TooLargeDimensions("height", height));
	}
	if bits_per_pixel != 24 {
		return Err(DecodeError::UnsupportedDepth(bits_per_pixel));
	}
	let bytes_per_pixel = bits_per_pixel as u32 / 8;

	let padded = padded_row_size(width, bytes_per_pixel);
	let mut row = vec![0u8; (width * bytes_per_pixel) as usize];
	let mut pixels = Vec::with_capacity((width * height) as usize);
	for i in 0..height {
		file.seek(SeekFrom::Start(data_offset as u64 + (i * padded) as u64))?;
		file.read_exact(&mut row)?;
		for sample in row.chunks_exact(bytes_per_pixel as usize) {
			pixels.push(sample[0] as u32 | (sample[1] as u32) << 8 | (sample[2] as u32) << 16);
		}
	}

	let buffer = match PixelBuffer::from_pixels(width, height, pixels) {
		Ok(b) => b,
		Err(_) => unreachable!("pixel count was computed from the header"),
	};
	Ok((buffer, bytes_per_pixel))
}

/// Writes a pixel buffer out as an uncompressed truecolor bitmap.
///
/// The headers carry the minimum set of meaningful fields: sizes and
/// offsets, the dimensions, one color plane, the bit depth, no
/// compression and an empty color table.
pub fn encode<P: AsRef<Path>>(
	path: P,
	buffer: &PixelBuffer,
	bytes_per_pixel: u32,
) -> Result<(), EncodeError> {
	let width = buffer.width();
	let height = buffer.height();
	let padded = padded_row_size(width, bytes_per_pixel);
	let data_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
	let image_size = padded * height;
	let file_size = data_offset + image_size;

	let mut out = BufWriter::new(File::create(path)?);

	// File header
	out.write_all(b"BM")?;
	out.write_all(&file_size.to_le_bytes())?;
	out.write_all(&0u32.to_le_bytes())?; // reserved
	out.write_all(&data_offset.to_le_bytes())?;
	// Info header
	out.write_all(&INFO_HEADER_SIZE.to_le_bytes())?;
	out.write_all(&width.to_le_bytes())?;
	out.write_all(&height.to_le_bytes())?;
	out.write_all(&1u16.to_le_bytes())?; // color planes
	out.write_all(&((bytes_per_pixel * 8) as u16).to_le_bytes())?;
	out.write_all(&0u32.to_le_bytes())?; // no compression
	out.write_all(&image_size.to_le_bytes())?;
	out.write_all(&RESOLUTION.to_le_bytes())?;
	out.write_all(&RESOLUTION.to_le_bytes())?;
	out.write_all(&0u32.to_le_bytes())?; // color table length
	out.write_all(&0u32.to_le_bytes())?; // important colors

	let padding = vec![0u8; (padded - width * bytes_per_pixel) as usize];
	for y in 0..height {
		for x in 0..width {
			out.write_all(&super::color::channels(buffer.get(x, y)))?;
		}
		out.write_all(&padding)?;
	}
	out.flush()?;
	Ok(())
}

fn read_u32(file: &mut File) -> io::Result<u32> {
	let mut bytes = [0u8; 4];
	file.read_exact(&mut bytes)?;
	Ok(u32::from_le_bytes(bytes))
}

fn read_u16(file: &mut File) -> io::Result<u16> {
	let mut bytes = [0u8; 2];
	file.read_exact(&mut bytes)?;
	Ok(u16::from_le_bytes(bytes))
}
