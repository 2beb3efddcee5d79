//! Reply value representation.

use bytes::Bytes;

/// A single decoded RESP reply.
///
/// The variant is fixed by the tag byte that opened the reply on the wire.
/// Payloads are kept as raw [`Bytes`]: the protocol does not guarantee UTF-8
/// and the decoder does not validate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Status line: `+OK\r\n`
    Status(Bytes),

    /// Error line: `-ERR unknown command\r\n`
    Error(Bytes),

    /// Integer: `:1000\r\n`
    Integer(i64),

    /// Bulk reply: `$6\r\nfoobar\r\n`, or `None` for the null bulk `$-1\r\n`.
    ///
    /// `Some(Bytes::new())` is the empty-but-present bulk `$0\r\n\r\n`,
    /// which is distinct from null.
    Bulk(Option<Bytes>),

    /// Multi-bulk reply: `*2\r\n...`, or `None` for the null form `*-1\r\n`.
    ///
    /// `Some(vec![])` is the empty-but-present multi-bulk `*0\r\n`.
    MultiBulk(Option<Vec<Reply>>),
}

impl Reply {
    /// Check if the reply is an error line
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    /// Check if the reply is a null bulk or null multi-bulk
    pub fn is_null(&self) -> bool {
        matches!(self, Reply::Bulk(None) | Reply::MultiBulk(None))
    }

    /// Try to view the payload as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Reply::Status(s) | Reply::Error(s) => std::str::from_utf8(s).ok(),
            Reply::Bulk(Some(b)) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Try to view the payload as raw bytes
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Reply::Status(s) | Reply::Error(s) => Some(s),
            Reply::Bulk(Some(b)) => Some(b),
            _ => None,
        }
    }

    /// Try to get the integer value
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Reply::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to view the nested replies of a present multi-bulk
    pub fn as_items(&self) -> Option<&[Reply]> {
        match self {
            Reply::MultiBulk(Some(items)) => Some(items),
            _ => None,
        }
    }

    /// Try to consume a present multi-bulk into its nested replies
    pub fn into_items(self) -> Option<Vec<Reply>> {
        match self {
            Reply::MultiBulk(Some(items)) => Some(items),
            _ => None,
        }
    }

    /// Convert the payload to a String with lossy UTF-8 conversion
    pub fn to_string_lossy(&self) -> Option<String> {
        self.as_bytes()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    // Convenience constructors

    /// Create a status reply
    pub fn status(s: impl Into<Bytes>) -> Self {
        Reply::Status(s.into())
    }

    /// Create an error reply
    pub fn error(e: impl Into<Bytes>) -> Self {
        Reply::Error(e.into())
    }

    /// Create an integer reply
    pub fn integer(i: i64) -> Self {
        Reply::Integer(i)
    }

    /// Create a present bulk reply
    pub fn bulk(b: impl Into<Bytes>) -> Self {
        Reply::Bulk(Some(b.into()))
    }

    /// Create a null bulk reply
    pub fn null_bulk() -> Self {
        Reply::Bulk(None)
    }

    /// Create a present multi-bulk reply from an iterator
    pub fn multi_bulk(items: impl IntoIterator<Item = Reply>) -> Self {
        Reply::MultiBulk(Some(items.into_iter().collect()))
    }

    /// Create a null multi-bulk reply
    pub fn null_multi_bulk() -> Self {
        Reply::MultiBulk(None)
    }
}
