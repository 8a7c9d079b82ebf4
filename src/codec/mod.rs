//! Codec Module
//!
//! Key and value codecs used by the cache client.
//!
//! Keys and hash field names go through [`StringCodec`] (plain UTF-8).
//! Values, list elements and hash field values go through [`JsonCodec`].

mod key;
mod value;

pub use key::StringCodec;
pub use value::{CacheValue, JsonCodec};
