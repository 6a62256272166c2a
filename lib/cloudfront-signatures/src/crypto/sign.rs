use super::KeyError;
use rsa::{
    RsaPrivateKey, pkcs1v15,
    signature::{SignatureEncoding, Signer},
};
use sha1::Sha1;

/// Signing key definition
pub trait SigningKey {
    /// Type the signature algorithm outputs
    type Output: AsRef<[u8]>;

    /// Sign a message
    fn sign(&self, msg: &[u8]) -> Result<Self::Output, KeyError>;
}

/// RSA key producing PKCS#1 v1.5 signatures over SHA-1 digests
///
/// This is the only scheme CloudFront accepts. The padding is deterministic, signing the same message twice yields the same bytes
pub struct RsaSha1Key {
    inner: pkcs1v15::SigningKey<Sha1>,
}

impl RsaSha1Key {
    /// Wrap an RSA private key
    #[must_use]
    pub fn new(private_key: RsaPrivateKey) -> Self {
        Self {
            inner: pkcs1v15::SigningKey::new(private_key),
        }
    }
}

impl SigningKey for RsaSha1Key {
    type Output = Box<[u8]>;

    #[inline]
    fn sign(&self, msg: &[u8]) -> Result<Self::Output, KeyError> {
        let signature = self.inner.try_sign(msg)?;
        Ok(signature.to_bytes())
    }
}

/// Sign a message with the provided signing key and encode the returned signature in standard Base64
#[inline]
pub fn sign<SK>(payload: &[u8], key: &SK) -> Result<String, KeyError>
where
    SK: SigningKey,
{
    Ok(base64_simd::STANDARD.encode_to_string(key.sign(payload)?))
}
