use crate::policy::EpochTime;
use std::fmt::Write;

const KEY_PAIR_ID: &str = "Key-Pair-Id";
const SIGNATURE: &str = "Signature";
const EXPIRES: &str = "Expires";
const POLICY: &str = "Policy";

const COOKIE_PREFIX: &str = "CloudFront-";

/// Policy-specific part of a signature
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SignatureKind {
    /// Canned policy. CloudFront rebuilds the policy from the URL and the expiration
    Canned {
        /// Expiration in seconds since the Unix epoch
        expires: u64,
    },

    /// Custom policy. The policy travels along with the signature
    Custom {
        /// Policy JSON, Base64 encoded with the CloudFront alphabet
        policy: String,
    },
}

/// CloudFront signature
///
/// Consists of a few parameters which can either be added to the query string of a URL or set as cookies
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    key_pair_id: String,
    signature: String,
    kind: SignatureKind,
}

impl Signature {
    pub(crate) fn canned(key_pair_id: String, signature: String, expires: EpochTime) -> Self {
        Self {
            key_pair_id,
            signature,
            kind: SignatureKind::Canned {
                expires: expires.as_secs(),
            },
        }
    }

    pub(crate) fn custom(key_pair_id: String, signature: String, policy: String) -> Self {
        Self {
            key_pair_id,
            signature,
            kind: SignatureKind::Custom { policy },
        }
    }

    /// ID of the key pair that produced the signature
    #[must_use]
    pub fn key_pair_id(&self) -> &str {
        &self.key_pair_id
    }

    /// Signature, Base64 encoded with the CloudFront alphabet
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Policy-specific part of the signature
    #[must_use]
    pub fn kind(&self) -> &SignatureKind {
        &self.kind
    }

    /// Query string parameters of the signature
    ///
    /// Always ordered `Key-Pair-Id`, `Signature`, followed by either `Expires` or `Policy`
    #[must_use]
    pub fn to_query_string_params(&self) -> [(&'static str, String); 3] {
        let policy_param = match self.kind {
            SignatureKind::Canned { expires } => (EXPIRES, expires.to_string()),
            SignatureKind::Custom { ref policy } => (POLICY, policy.clone()),
        };

        [
            (KEY_PAIR_ID, self.key_pair_id.clone()),
            (SIGNATURE, self.signature.clone()),
            policy_param,
        ]
    }

    /// Cookies of the signature
    ///
    /// These are the query string parameters prefixed with `CloudFront-`.
    /// Attributes such as the path or the expiration of the cookies are up to the caller.
    #[must_use]
    pub fn to_cookies(&self) -> [(String, String); 3] {
        self.to_query_string_params()
            .map(|(name, value)| (format!("{COOKIE_PREFIX}{name}"), value))
    }

    /// Append the query string parameters to a URL
    ///
    /// The values are restricted to the CloudFront Base64 alphabet and the key pair ID, so they are appended without further escaping
    #[must_use]
    pub fn add_to_url(&self, url: &str) -> String {
        let separator = if url.contains('?') { '&' } else { '?' };

        let mut buffer = String::from(url);
        for (idx, (name, value)) in self.to_query_string_params().iter().enumerate() {
            buffer.push(if idx == 0 { separator } else { '&' });
            let _ = write!(buffer, "{name}={value}");
        }

        buffer
    }
}

#[cfg(test)]
mod test {
    use super::{Signature, SignatureKind};
    use crate::policy::EpochTime;
    use pretty_assertions::assert_eq;

    fn canned() -> Signature {
        Signature::canned("KEYPAIR".into(), "c2lnbmF0dXJl".into(), EpochTime::new(42))
    }

    fn custom() -> Signature {
        Signature::custom("KEYPAIR".into(), "c2lnbmF0dXJl".into(), "cG9saWN5".into())
    }

    #[test]
    fn canned_query_string_params() {
        assert_eq!(
            canned().to_query_string_params(),
            [
                ("Key-Pair-Id", "KEYPAIR".to_string()),
                ("Signature", "c2lnbmF0dXJl".to_string()),
                ("Expires", "42".to_string()),
            ]
        );
    }

    #[test]
    fn custom_query_string_params() {
        let params = custom().to_query_string_params();
        assert_eq!(params[2], ("Policy", "cG9saWN5".to_string()));
    }

    #[test]
    fn cookies_are_prefixed() {
        for signature in [canned(), custom()] {
            let params = signature.to_query_string_params();
            let cookies = signature.to_cookies();

            assert_eq!(cookies.len(), 3);
            for ((param_name, param_value), (cookie_name, cookie_value)) in
                params.iter().zip(cookies.iter())
            {
                assert_eq!(*cookie_name, format!("CloudFront-{param_name}"));
                assert_eq!(cookie_value, param_value);
            }
        }
    }

    #[test]
    fn add_to_url_without_query() {
        assert_eq!(
            canned().add_to_url("https://example.com/file"),
            "https://example.com/file?Key-Pair-Id=KEYPAIR&Signature=c2lnbmF0dXJl&Expires=42"
        );
    }

    #[test]
    fn add_to_url_with_query() {
        assert_eq!(
            custom().add_to_url("https://example.com/file?q=s"),
            "https://example.com/file?q=s&Key-Pair-Id=KEYPAIR&Signature=c2lnbmF0dXJl&Policy=cG9saWN5"
        );
    }

    #[test]
    fn exposes_kind() {
        assert_eq!(canned().kind(), &SignatureKind::Canned { expires: 42 });
        assert_eq!(
            custom().kind(),
            &SignatureKind::Custom {
                policy: "cG9saWN5".into()
            }
        );
    }
}
