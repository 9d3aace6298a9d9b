//! DNS wire format (RFC 1035 section 4) for the subset of messages ruledns
//! reads and writes.
//!
//! Record data is carried as opaque bytes; names inside rdata are never
//! expanded or compressed.

mod decoder;
mod encoder;
mod name;
mod reader;

pub use decoder::decode;
pub use encoder::{encode, MessageEncoder};
pub use name::{read_name, write_name, NameCompressor, MAX_POINTER_HOPS};
pub use reader::WireReader;

/// Size of the fixed message header.
pub const HEADER_LEN: usize = 12;
