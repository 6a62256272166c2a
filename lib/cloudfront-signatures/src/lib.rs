//!
//! CloudFront signed URLs and signed cookies
//!
//! Turns a URL and an expiration (canned policy) or an arbitrary access policy (custom policy) into the
//! parameters CloudFront checks before serving private content.
//!
//! ```no_run
//! use cloudfront_signatures::{KeyPair, Signer};
//! use std::time::{Duration, SystemTime};
//!
//! # fn main() -> cloudfront_signatures::Result<()> {
//! let key_pair = KeyPair::new("K2JCJMDEHXQW5F", std::fs::read_to_string("private_key.pem").unwrap());
//! let signer = Signer::new(&key_pair);
//!
//! let expiration = SystemTime::now() + Duration::from_secs(30 * 60);
//! let signed_url = signer.sign_url("https://d111111abcdef8.cloudfront.net/image.jpg", expiration)?;
//! # Ok(())
//! # }
//! ```
//!

pub use crate::{
    error::Error,
    policy::{
        Condition, ConditionBuilder, ConditionBuilderError, EpochTime, Policy, SourceIp, Statement,
        date_to_epoch_time,
    },
    signature::{Signature, SignatureKind},
    signer::{KeyPair, Signer},
};

mod error;
mod signature;
mod signer;

pub mod crypto;
pub mod pem;
pub mod policy;
pub mod safe_base64;

/// Result alias defaulting to the crate [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;
