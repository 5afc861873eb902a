use std::io;

/// Reason why a bitmap file couldn't be decoded.
#[derive(Debug)]
pub enum DecodeError {
	/// The file does not start with the `BM` magic bytes.
	MissingHeader,
	/// The bit depth is something other than 24-bit truecolor.
	UnsupportedDepth(u16),
	/// The header declares a zero width or height.
	EmptyDimensions,
	/// The named dimension exceeds the supported maximum.
	TooLargeDimensions(&'static str, u32),
	/// The file could not be opened or read.
	Io(io::Error),
}

impl From<io::Error> for DecodeError {
	fn from(err: io::Error) -> DecodeError {
		DecodeError::Io(err)
	}
}

/// Reason why a bitmap file couldn't be written.
#[derive(Debug)]
pub enum EncodeError {
	/// The file could not be created or written.
	Io(io::Error),
}

impl From<io::Error> for EncodeError {
	fn from(err: io::Error) -> EncodeError {
		EncodeError::Io(err)
	}
}

/// Reason why a pixel buffer couldn't be assembled.
#[derive(Debug)]
pub enum BufferError {
	/// Zero pixels on one of the axes.
	EmptyDimensions,
	/// The pixel vector's length does not match width times height;
	/// expected length first, actual length second.
	LengthMismatch(usize, usize),
}
