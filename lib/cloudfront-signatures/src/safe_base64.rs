//!
//! CloudFront flavoured "URL-safe" Base64
//!
//! CloudFront doesn't use the RFC 4648 URL-safe alphabet. It takes standard Base64 and swaps out the three
//! characters that are reserved in query strings and cookies:
//!
//! | Standard | CloudFront |
//! |----------|------------|
//! | `+`      | `-`        |
//! | `/`      | `~`        |
//! | `=`      | `_`        |
//!

const ENCODE_TABLE: &[(char, char)] = &[('+', '-'), ('/', '~'), ('=', '_')];
const DECODE_TABLE: &[(char, char)] = &[('-', '+'), ('~', '/'), ('_', '=')];

#[inline]
fn translate(input: &str, table: &[(char, char)]) -> String {
    input
        .chars()
        .map(|ch| {
            table
                .iter()
                .find_map(|&(from, to)| (from == ch).then_some(to))
                .unwrap_or(ch)
        })
        .collect()
}

/// Translate standard Base64 into the CloudFront alphabet
///
/// Characters outside of the substitution table are passed through untouched
#[inline]
#[must_use]
pub fn encode(base64: &str) -> String {
    translate(base64, ENCODE_TABLE)
}

/// Translate the CloudFront alphabet back into standard Base64
///
/// This doesn't validate anything. Input that never went through [`encode`] is translated character by character all the same
#[inline]
#[must_use]
pub fn decode(safe_base64: &str) -> String {
    translate(safe_base64, DECODE_TABLE)
}
