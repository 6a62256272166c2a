use crate::crypto::KeyError;
use miette::Diagnostic;
use thiserror::Error;

/// Signing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Private key is absent, malformed, or rejected
    #[error(transparent)]
    #[diagnostic(transparent)]
    Key(#[from] KeyError),

    /// Policy couldn't be serialised into JSON
    #[error(transparent)]
    Serialisation(#[from] serde_json::Error),
}
