use cloudfront_signatures::KeyPair;
use miette::{IntoDiagnostic, Result, WrapErr, bail};
use serde::Deserialize;
use std::{fs, path::PathBuf};

/// Prefix of the environment variables the configuration is read from
pub const ENV_PREFIX: &str = "CLOUDFRONT_";

#[derive(Default, Deserialize)]
pub struct Configuration {
    pub key_pair_id: Option<String>,
    pub private_key: Option<String>,
    pub private_key_file: Option<PathBuf>,
}

impl Configuration {
    pub fn from_env() -> Result<Self> {
        envy::prefixed(ENV_PREFIX).from_env().into_diagnostic()
    }

    /// Assemble the key pair, reading the key from disk if it isn't set inline
    pub fn key_pair(&self) -> Result<KeyPair> {
        let Some(ref key_pair_id) = self.key_pair_id else {
            bail!(
                help = "set the CLOUDFRONT_KEY_PAIR_ID environment variable",
                "Missing key pair ID"
            );
        };

        let private_key_pem = if let Some(ref private_key) = self.private_key {
            private_key.clone()
        } else if let Some(ref path) = self.private_key_file {
            fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to read private key from {}", path.display()))?
        } else {
            bail!(
                help = "set either CLOUDFRONT_PRIVATE_KEY or CLOUDFRONT_PRIVATE_KEY_FILE",
                "Missing private key"
            );
        };

        Ok(KeyPair::new(key_pair_id.clone(), private_key_pem))
    }
}
