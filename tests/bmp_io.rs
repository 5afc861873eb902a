use quadtree_bmp::color;
use quadtree_bmp::error::DecodeError;
use quadtree_bmp::node::bmp;
use quadtree_bmp::{PixelBuffer, QuadNode};

use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
	let mut path = std::env::temp_dir();
	path.push(format!("quadtree_bmp_{}_{}.bmp", std::process::id(), name));
	path
}

fn buffer_from(width: u32, height: u32, pixels: Vec<u32>) -> PixelBuffer {
	PixelBuffer::from_pixels(width, height, pixels).unwrap()
}

#[test]
fn encode_decode_round_trips_an_aligned_width() {
	let path = temp_path("aligned");
	let pixels = (0..4u32 * 2).map(|i| color::pack(i as u8, 2 * i as u8, 200)).collect();
	let buffer = buffer_from(4, 2, pixels);

	bmp::encode(&path, &buffer, 3).unwrap();
	let (decoded, bytes_per_pixel) = bmp::decode(&path).unwrap();
	fs::remove_file(&path).ok();

	assert_eq!(bytes_per_pixel, 3);
	assert_eq!(decoded, buffer);
}

#[test]
fn encode_decode_round_trips_padded_rows() {
	// Widths that are not multiples of 4 put padding bytes at the end
	// of every stored row.
	for &(width, height) in &[(5u32, 3u32), (1, 1), (3, 7), (7, 2)] {
		let path = temp_path(&format!("padded_{}x{}", width, height));
		let pixels = (0..width * height)
			.map(|i| color::pack(i as u8, (i * 7) as u8, (i * 13) as u8))
			.collect();
		let buffer = buffer_from(width, height, pixels);

		bmp::encode(&path, &buffer, 3).unwrap();
		let (decoded, _) = bmp::decode(&path).unwrap();
		fs::remove_file(&path).ok();

		assert_eq!(decoded, buffer, "{}x{}", width, height);
	}
}

#[test]
fn decoded_samples_keep_the_packed_channel_order() {
	let path = temp_path("channels");
	let red = color::pack(255, 0, 0);
	let green = color::pack(0, 255, 0);
	let blue = color::pack(0, 0, 255);
	let white = color::pack(255, 255, 255);
	let buffer = buffer_from(2, 2, vec![red, green, blue, white]);

	bmp::encode(&path, &buffer, 3).unwrap();
	let (decoded, _) = bmp::decode(&path).unwrap();
	fs::remove_file(&path).ok();

	assert_eq!(decoded.get(0, 0), red);
	assert_eq!(decoded.get(1, 0), green);
	assert_eq!(decoded.get(0, 1), blue);
	assert_eq!(decoded.get(1, 1), white);
}

#[test]
fn decode_rejects_a_file_without_the_magic_bytes() {
	let path = temp_path("garbage");
	fs::write(&path, b"not a bitmap at all").unwrap();

	let result = bmp::decode(&path);
	fs::remove_file(&path).ok();

	match result {
		Err(DecodeError::MissingHeader) => (),
		other => panic!("expected MissingHeader, got {:?}", other),
	}
}

#[test]
fn decode_rejects_an_unsupported_bit_depth() {
	let path = temp_path("depth");
	let buffer = buffer_from(2, 2, vec![0; 4]);
	bmp::encode(&path, &buffer, 3).unwrap();

	let mut bytes = fs::read(&path).unwrap();
	bytes[0x1C] = 32;
	fs::write(&path, &bytes).unwrap();

	let result = bmp::decode(&path);
	fs::remove_file(&path).ok();

	match result {
		Err(DecodeError::UnsupportedDepth(32)) => (),
		other => panic!("expected UnsupportedDepth, got {:?}", other),
	}
}

#[test]
fn decode_rejects_zero_dimensions() {
	let path = temp_path("zero");
	let buffer = buffer_from(2, 2, vec![0; 4]);
	bmp::encode(&path, &buffer, 3).unwrap();

	let mut bytes = fs::read(&path).unwrap();
	bytes[0x12..0x16].copy_from_slice(&0u32.to_le_bytes());
	fs::write(&path, &bytes).unwrap();

	let result = bmp::decode(&path);
	fs::remove_file(&path).ok();

	match result {
		Err(DecodeError::EmptyDimensions) => (),
		other => panic!("expected EmptyDimensions, got {:?}", other),
	}
}

#[test]
fn decode_rejects_oversized_dimensions() {
	let path = temp_path("oversized");
	let buffer = buffer_from(2, 2, vec![0; 4]);
	bmp::encode(&path, &buffer, 3).unwrap();

	let mut bytes = fs::read(&path).unwrap();
	bytes[0x16..0x1A].copy_from_slice(&0x00FF_FFFFu32.to_le_bytes());
	fs::write(&path, &bytes).unwrap();

	let result = bmp::decode(&path);
	fs::remove_file(&path).ok();

	match result {
		Err(DecodeError::TooLargeDimensions("height", 0x00FF_FFFF)) => (),
		other => panic!("expected TooLargeDimensions, got {:?}", other),
	}
}

#[test]
fn decode_reports_a_missing_file_as_io() {
	let path = temp_path("does_not_exist");
	match bmp::decode(&path) {
		Err(DecodeError::Io(_)) => (),
		other => panic!("expected Io, got {:?}", other),
	}
}

#[test]
fn a_uniform_bitmap_compresses_to_one_leaf_through_the_files() {
	let in_path = temp_path("pipeline_in");
	let out_path = temp_path("pipeline_out");
	let white = color::pack(255, 255, 255);
	let buffer = buffer_from(4, 4, vec![white; 16]);
	bmp::encode(&in_path, &buffer, 3).unwrap();

	let (decoded, bytes_per_pixel) = bmp::decode(&in_path).unwrap();
	let mut tree = QuadNode::build(&decoded, decoded.bounds(), 0).unwrap();
	tree.compress(5);
	assert!(tree.is_leaf());

	let restored = tree.decompress(4, 4).unwrap();
	bmp::encode(&out_path, &restored, bytes_per_pixel).unwrap();
	let (reread, _) = bmp::decode(&out_path).unwrap();

	fs::remove_file(&in_path).ok();
	fs::remove_file(&out_path).ok();

	assert_eq!(reread, buffer);
}
