//!
//! Key parsing and the signing primitive
//!

mod sign;

pub mod parse;

pub use self::parse::KeyError;
pub use self::sign::{RsaSha1Key, SigningKey, sign};
