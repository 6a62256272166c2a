//!
//! Turn single-line key material into PEM
//!
//! Secret stores and environment variables tend to carry the key as one line of Base64.
//! The signer expects a properly framed PEM document.
//!

/// Label of PKCS#1 encoded RSA private keys
pub const RSA_PRIVATE_KEY: &str = "RSA PRIVATE KEY";

const LINE_WIDTH: usize = 64;

/// Wrap a single line of Base64 into a PEM document with the given label
///
/// Lines are 64 characters wide and separated by `\n`. The document doesn't end with a newline.
#[must_use]
pub fn format(key: &str, label: &str) -> String {
    let chars = key.chars().collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(chars.len().div_ceil(LINE_WIDTH) + 2);
    lines.push(format!("-----BEGIN {label}-----"));
    lines.extend(
        chars
            .chunks(LINE_WIDTH)
            .map(|chunk| chunk.iter().collect::<String>()),
    );
    lines.push(format!("-----END {label}-----"));

    lines.join("\n")
}
