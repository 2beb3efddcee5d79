//! # resp-reply - RESP Reply Decoder
//!
//! A streaming decoder for replies in the Redis Serialization Protocol
//! (RESP): status lines, error lines, integers, bulk byte strings and
//! nested multi-bulk collections, including the null bulk and null
//! multi-bulk forms.
//!
//! The decoder reads from any [`std::io::BufRead`] and consumes exactly one
//! reply per call, so successive calls on the same stream decode pipelined
//! replies in order. It holds no state between calls and performs no I/O
//! beyond the bytes of the reply being decoded.
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use resp_reply::Reply;
//!
//! let mut stream = Cursor::new(&b"*2\r\n$3\r\nfoo\r\n$-1\r\n"[..]);
//! let reply = resp_reply::decode(&mut stream).unwrap();
//! assert_eq!(
//!     reply,
//!     Reply::multi_bulk([Reply::bulk("foo"), Reply::null_bulk()]),
//! );
//! ```

mod decode;
mod error;
mod types;

pub use decode::DEFAULT_MAX_DEPTH;
pub use decode::ReplyDecoder;
pub use decode::decode;
pub use error::DecodeError;
pub use types::Reply;
