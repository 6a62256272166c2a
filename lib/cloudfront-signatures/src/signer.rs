use crate::{
    Result,
    crypto::{self, KeyError},
    policy::{EpochTime, Policy},
    safe_base64,
    signature::Signature,
};
use serde::Deserialize;
use std::{fmt, time::SystemTime};
use tracing::{debug, instrument};

/// Key pair registered with CloudFront
#[derive(Clone, Deserialize)]
pub struct KeyPair {
    /// ID of the public key (or key pair) as registered with CloudFront
    pub id: String,

    /// RSA private key in its PEM form (PKCS#1 or PKCS#8)
    pub private_key_pem: String,
}

impl KeyPair {
    /// Construct a new key pair
    #[must_use]
    pub fn new(id: impl Into<String>, private_key_pem: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            private_key_pem: private_key_pem.into(),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Signs CloudFront policies
///
/// Construction doesn't touch the key. A malformed key only surfaces once something gets signed.
#[derive(Clone, Copy, Debug)]
pub struct Signer<'a> {
    key_pair: &'a KeyPair,
}

impl<'a> Signer<'a> {
    /// Construct a new signer
    #[must_use]
    pub fn new(key_pair: &'a KeyPair) -> Self {
        Self { key_pair }
    }

    /// Key pair this signer signs with
    #[must_use]
    pub fn key_pair(&self) -> &'a KeyPair {
        self.key_pair
    }
}

impl Signer<'_> {
    /// Sign a single URL using a canned policy and return the signed URL
    ///
    /// The expiration gets rounded up to the next full second
    #[instrument(skip_all, fields(key_pair_id = %self.key_pair.id))]
    pub fn sign_url(&self, url: &str, expiration: SystemTime) -> Result<String> {
        let signature = self.sign_canned(url, expiration)?;
        Ok(signature.add_to_url(url))
    }

    /// Sign a single URL using a canned policy
    ///
    /// Returns the signature itself, useful if you want to hand out cookies instead of a URL
    #[instrument(skip_all, fields(key_pair_id = %self.key_pair.id))]
    pub fn sign_canned(&self, url: &str, expiration: SystemTime) -> Result<Signature> {
        let expires = EpochTime::from(expiration);
        let policy = Policy::canned(url, expires).to_json()?;
        let signature = self.signature(policy.as_bytes())?;

        debug!(expires = expires.as_secs(), "signed canned policy");

        Ok(Signature::canned(
            self.key_pair.id.clone(),
            signature,
            expires,
        ))
    }

    /// Sign a custom policy
    ///
    /// The policy is signed exactly as it was constructed. Nothing gets validated or normalised.
    #[instrument(skip_all, fields(key_pair_id = %self.key_pair.id))]
    pub fn sign(&self, policy: &Policy) -> Result<Signature> {
        let policy = policy.to_json()?;
        let signature = self.signature(policy.as_bytes())?;
        let encoded_policy =
            safe_base64::encode(&base64_simd::STANDARD.encode_to_string(policy.as_bytes()));

        debug!(policy_len = policy.len(), "signed custom policy");

        Ok(Signature::custom(
            self.key_pair.id.clone(),
            signature,
            encoded_policy,
        ))
    }

    /// Parse the key and sign the message, returning the URL-safe Base64 of the signature
    ///
    /// The PEM is parsed on every call since constructing a [`Signer`] must never validate the key.
    fn signature(&self, message: &[u8]) -> Result<String, KeyError> {
        let key = crypto::parse::private_key(&self.key_pair.private_key_pem)?;
        let signature = crypto::sign(message, &key)?;

        Ok(safe_base64::encode(&signature))
    }
}
