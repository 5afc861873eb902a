use image::error::ImageError;

use quadtree_bmp::error::{DecodeError, EncodeError};
use quadtree_bmp::node::bmp;
use quadtree_bmp::{PixelBuffer, QuadNode};

use log::info;

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// `clap`-based CLI for quadtree compression of bitmap images.
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
	let clap_matches = clap::App::new("quadtree_bmp")
		.version("0.1.0")
		.author("vkcz")
		.about("Lossy quadtree compression for truecolor bitmap images.")
		.arg_from_usage("-l, --level=[N] 'Depth budget past which merging is forced; defaults to 5'")
		.arg_from_usage("-x, --exact 'Skip the lossy merge pass; the output reproduces the input exactly'")
		.arg_from_usage("-v, --verbose 'Enable trace logging'")
		.arg_from_usage("<INPUT> 'Path to input image`")
		.arg_from_usage("[OUTPUT] 'Path to output file; defaults to INPUT with a modified file extension`")
		.get_matches();

	let log_level = if clap_matches.is_present("verbose") {
		log::Level::Trace
	} else {
		log::Level::Info
	};
	simple_logger::init_with_level(log_level).unwrap();

	let max_level = match clap_matches.value_of("level").unwrap_or("5").parse::<u32>() {
		Ok(n) => n,
		Err(_) => error_exit("Non-numeric value for level", 2),
	};

	let input_path = clap_matches.value_of("INPUT").unwrap();
	let (buffer, bytes_per_pixel) = if input_path.to_lowercase().ends_with(".bmp") {
		match bmp::decode(input_path) {
			Ok(r) => r,
			Err(e) => {
				let (msg, code) = match e {
					DecodeError::Io(_) => ("File not found or could not be read", 3),
					DecodeError::TooLargeDimensions(..) => ("Computation limits exceeded", 5),
					DecodeError::MissingHeader
					| DecodeError::UnsupportedDepth(_)
					| DecodeError::EmptyDimensions => ("Invalid image data", 4),
				};
				error_exit(msg, code)
			}
		}
	} else {
		let source = match image::open(input_path) {
			Ok(i) => i,
			Err(e) => {
				let (msg, code) = match e {
					ImageError::Decoding(_) => ("Invalid image data", 4),
					ImageError::Limits(_) => ("Computation limits exceeded", 5),
					ImageError::IoError(_) => ("File not found or could not be read", 3),
					_ => ("An error occurred", 10),
				};
				error_exit(msg, code)
			}
		}
		.into_rgba();
		match PixelBuffer::from_rgba(&source) {
			Ok(b) => (b, 3),
			Err(_) => error_exit("Input image is empty", 4),
		}
	};

	let mut tree = match QuadNode::build(&buffer, buffer.bounds(), 0) {
		Some(t) => t,
		None => error_exit("Input image is empty", 4),
	};
	info!("{} leaves before merging", tree.leaf_count());

	if !clap_matches.is_present("exact") {
		tree.compress(max_level);
		info!("{} leaves after merging", tree.leaf_count());
	}

	let output = match tree.decompress(buffer.width(), buffer.height()) {
		Ok(b) => b,
		Err(_) => unreachable!("source dimensions are non-empty"),
	};

	let output_path = clap_matches
		.value_of("OUTPUT")
		.map(str::to_string)
		.unwrap_or_else(|| input_path.rsplitn(2, '.').last().unwrap().to_string() + ".out.bmp");
	if output_path.to_lowercase().ends_with(".png") {
		match output.to_rgba().save(&output_path) {
			Ok(_) => (),
			Err(_) => error_exit("Could not save output", 3),
		}
	} else {
		match bmp::encode(&output_path, &output, bytes_per_pixel) {
			Ok(_) => (),
			Err(EncodeError::Io(_)) => error_exit("Could not write to output file", 3),
		}
	}
}
