//! Block-level codec: match finding, GLO/GHI/NUM encoding, and decoding.

pub mod encoder;
pub mod decoder;
pub mod match_finder;
pub mod num;
pub mod types;

pub use encoder::{select_encoding, Encoding};
pub use decoder::decode_block;
