//! Error types for RESP reply decoding.

use thiserror::Error;

/// Errors that can occur while decoding a reply from a stream.
///
/// Every variant is fatal to the decode call that produced it: the decoder
/// never retries and never returns a partially built reply.
#[derive(Error, Debug)]
pub enum DecodeError {
	/// The underlying stream failed, or ended before the reply was complete.
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),

	/// Leading byte matched none of `+`, `-`, `:`, `$`, `*`.
	#[error("unexpected character in stream: {0:#04x}")]
	UnexpectedTag(u8),

	/// Non-digit byte where a decimal digit was required.
	#[error("invalid character in integer: {0:#04x}")]
	InvalidDigit(u8),

	/// Expected a CR LF pair, found the given bytes instead.
	#[error("improper line ending: {0:#04x}, {1:#04x}")]
	MalformedTerminator(u8, u8),

	/// Declared bulk or multi-bulk size was below -1.
	#[error("invalid size: {0}")]
	InvalidLength(i64),

	/// Decimal magnitude on the wire exceeds the 64-bit signed range.
	#[error("integer overflows the 64-bit signed range")]
	IntegerOverflow,

	/// Multi-bulk nesting went past the configured maximum.
	#[error("nesting depth exceeds the maximum of {0}")]
	DepthLimitExceeded(usize),
}

impl DecodeError {
	/// True when the stream ended cleanly before the reply was complete.
	///
	/// Useful for callers draining pipelined replies until end of input.
	pub fn is_unexpected_eof(&self) -> bool {
		matches!(self, DecodeError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
	}
}
