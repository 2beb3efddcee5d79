//! Streaming decoder for RESP replies.
//!
//! One call decodes exactly one reply from the supplied stream, recursing
//! for nested multi-bulk items. The stream position after a successful call
//! is the first byte past the decoded reply, so callers can decode
//! back-to-back pipelined replies with repeated calls on the same stream.

use std::io::BufRead;
use std::io::ErrorKind;
use std::io::Read;

use bytes::Bytes;

use crate::error::DecodeError;
use crate::types::Reply;

/// Type markers
const STATUS: u8 = b'+';
const ERROR: u8 = b'-';
const INTEGER: u8 = b':';
const BULK: u8 = b'$';
const MULTI_BULK: u8 = b'*';

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Upper bound on speculative preallocation for declared sizes.
const PREALLOC_ITEMS: usize = 64;

/// Maximum multi-bulk nesting accepted by [`decode`].
///
/// Wire data nested deeper than this fails with
/// [`DecodeError::DepthLimitExceeded`] instead of exhausting the call stack.
/// Use [`ReplyDecoder::with_max_depth`] to pick a different bound.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decode a single reply from a stream, using [`DEFAULT_MAX_DEPTH`].
///
/// The stream supplies buffering; the decoder adds none of its own, so the
/// bytes of the next pipelined reply are left untouched in the caller's
/// buffer.
pub fn decode<R: BufRead>(stream: &mut R) -> Result<Reply, DecodeError> {
	decode_at(stream, 0, DEFAULT_MAX_DEPTH)
}

/// A reply decoder with a configurable nesting limit.
///
/// Holds no parse state: each [`decode`](ReplyDecoder::decode) call is a
/// self-contained parse of one reply, and a single decoder can be shared
/// freely across threads as long as each stream is used by one call at a
/// time.
#[derive(Debug, Clone)]
pub struct ReplyDecoder {
	max_depth: usize,
}

impl Default for ReplyDecoder {
	fn default() -> Self {
		Self::new()
	}
}

impl ReplyDecoder {
	pub fn new() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}

	/// Create a decoder that rejects multi-bulk nesting deeper than
	/// `max_depth` levels.
	pub fn with_max_depth(max_depth: usize) -> Self {
		Self { max_depth }
	}

	/// Decode a single reply from a stream.
	pub fn decode<R: BufRead>(&self, stream: &mut R) -> Result<Reply, DecodeError> {
		decode_at(stream, 0, self.max_depth)
	}
}

fn decode_at<R: BufRead>(
	stream: &mut R,
	depth: usize,
	max_depth: usize,
) -> Result<Reply, DecodeError> {
	if depth > max_depth {
		return Err(DecodeError::DepthLimitExceeded(max_depth));
	}

	match read_byte(stream)? {
		STATUS => Ok(Reply::Status(read_line(stream)?)),
		ERROR => Ok(Reply::Error(read_line(stream)?)),
		INTEGER => Ok(Reply::Integer(read_integer(stream)?)),
		BULK => Ok(Reply::Bulk(read_bulk(stream)?)),
		MULTI_BULK => {
			let count = read_integer(stream)?;
			if count == -1 {
				return Ok(Reply::MultiBulk(None));
			}
			if count < -1 {
				return Err(DecodeError::InvalidLength(count));
			}

			// The count comes off the wire; cap the preallocation and let
			// push grow the rest, so hostile counts cannot overflow the
			// capacity computation.
			let count = count as usize;
			let mut items = Vec::with_capacity(count.min(PREALLOC_ITEMS));
			for _ in 0..count {
				// Any item failure aborts the whole multi-bulk.
				items.push(decode_at(stream, depth + 1, max_depth)?);
			}
			Ok(Reply::MultiBulk(Some(items)))
		}
		tag => Err(DecodeError::UnexpectedTag(tag)),
	}
}

/// Read a decimal integer line: optional leading `-`, digits, CR LF.
///
/// The sign is applied once the terminator is seen. Magnitudes past
/// `i64::MAX` fail with [`DecodeError::IntegerOverflow`] rather than wrap,
/// which also rejects `i64::MIN` on the wire. A line with no digits at all
/// (`\r\n` or `-\r\n`) is the zero magnitude and decodes as 0.
fn read_integer<R: BufRead>(stream: &mut R) -> Result<i64, DecodeError> {
	let mut byte = read_byte(stream)?;
	let negative = byte == b'-';
	if negative {
		byte = read_byte(stream)?;
	}

	let mut magnitude: i64 = 0;
	loop {
		if byte == CR {
			let lf = read_byte(stream)?;
			if lf != LF {
				return Err(DecodeError::MalformedTerminator(CR, lf));
			}
			return Ok(if negative { -magnitude } else { magnitude });
		}

		let digit = byte.wrapping_sub(b'0');
		if digit > 9 {
			return Err(DecodeError::InvalidDigit(byte));
		}
		magnitude = magnitude
			.checked_mul(10)
			.and_then(|m| m.checked_add(i64::from(digit)))
			.ok_or(DecodeError::IntegerOverflow)?;

		byte = read_byte(stream)?;
	}
}

/// Read a length-prefixed byte string: `<len>\r\n<len bytes>\r\n`.
///
/// A declared length of -1 is the null bulk and consumes nothing past the
/// prefix line. The trailing CR LF is required; a payload without it is not
/// a decoded payload.
///
/// The declared length comes off the wire and is never trusted for an
/// up-front allocation: the payload buffer grows as bytes actually arrive,
/// so a lying prefix ends in an i/o error instead of an allocation abort.
fn read_bulk<R: BufRead>(stream: &mut R) -> Result<Option<Bytes>, DecodeError> {
	let len = read_integer(stream)?;
	if len == -1 {
		return Ok(None);
	}
	if len < -1 {
		return Err(DecodeError::InvalidLength(len));
	}

	let len = len as u64;
	let mut payload = Vec::new();
	let read = stream.by_ref().take(len).read_to_end(&mut payload)?;
	if (read as u64) < len {
		return Err(DecodeError::Io(ErrorKind::UnexpectedEof.into()));
	}

	let mut terminator = [0u8; 2];
	stream.read_exact(&mut terminator)?;
	if terminator != [CR, LF] {
		return Err(DecodeError::MalformedTerminator(
			terminator[0],
			terminator[1],
		));
	}

	Ok(Some(Bytes::from(payload)))
}

/// Read a status or error line: bytes up to CR LF, terminator discarded.
///
/// Scans the stream's own buffer for the CR, consuming only the bytes that
/// belong to this line.
fn read_line<R: BufRead>(stream: &mut R) -> Result<Bytes, DecodeError> {
	let mut line = Vec::new();
	loop {
		let available = stream.fill_buf()?;
		if available.is_empty() {
			return Err(DecodeError::Io(ErrorKind::UnexpectedEof.into()));
		}

		match memchr::memchr(CR, available) {
			Some(pos) => {
				line.extend_from_slice(&available[..pos]);
				stream.consume(pos + 1);

				let lf = read_byte(stream)?;
				if lf != LF {
					return Err(DecodeError::MalformedTerminator(CR, lf));
				}
				return Ok(Bytes::from(line));
			}
			None => {
				line.extend_from_slice(available);
				let consumed = available.len();
				stream.consume(consumed);
			}
		}
	}
}

#[inline]
fn read_byte<R: Read>(stream: &mut R) -> std::io::Result<u8> {
	let mut byte = [0u8; 1];
	stream.read_exact(&mut byte)?;
	Ok(byte[0])
}
