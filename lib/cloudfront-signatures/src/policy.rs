//!
//! CloudFront access policies
//!
//! The verifier recomputes the signature over the exact bytes it receives, so the JSON representation of these types is part
//! of the contract. Serde serialises struct fields in declaration order, which makes the field order below load-bearing.
//! Don't reorder the fields.
//!
//! Deserialisation rejects unknown keys. A misspelled condition would otherwise vanish and widen the granted access.
//!

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Point in time, in seconds since the Unix epoch
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EpochTime {
    #[serde(rename = "AWS:EpochTime")]
    epoch_time: u64,
}

impl EpochTime {
    /// Construct an epoch time from whole seconds
    #[must_use]
    pub const fn new(secs: u64) -> Self {
        Self { epoch_time: secs }
    }

    /// Seconds since the Unix epoch
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.epoch_time
    }
}

impl From<SystemTime> for EpochTime {
    fn from(value: SystemTime) -> Self {
        date_to_epoch_time(value)
    }
}

/// Convert a point in time into an [`EpochTime`]
///
/// The instant is truncated to milliseconds and then rounded *up* to the next full second.
/// An expiration is never moved earlier than requested.
///
/// Instants before the Unix epoch saturate to zero.
#[must_use]
pub fn date_to_epoch_time(instant: SystemTime) -> EpochTime {
    let millis = instant
        .duration_since(UNIX_EPOCH)
        .map_or(0, |since_epoch| since_epoch.as_millis());

    let secs = u64::try_from(millis.div_ceil(1000)).unwrap_or(u64::MAX);
    EpochTime::new(secs)
}

/// Source IP restriction in CIDR notation (e.g. `192.0.2.0/24`)
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceIp {
    #[serde(rename = "AWS:SourceIp")]
    source_ip: String,
}

impl SourceIp {
    /// CIDR string of the restriction
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source_ip
    }
}

impl From<String> for SourceIp {
    fn from(source_ip: String) -> Self {
        Self { source_ip }
    }
}

impl From<&str> for SourceIp {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

/// Conditions under which access is granted
///
/// Every condition carries an expiration. Absent optional conditions are omitted from the JSON entirely.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct Condition {
    /// Access is denied after this point in time
    #[builder(setter(into))]
    pub date_less_than: EpochTime,

    /// Access is denied before this point in time
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_greater_than: Option<EpochTime>,

    /// Only requests from this address range are granted access
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<SourceIp>,
}

impl Condition {
    /// Return a builder for a condition
    #[must_use]
    pub fn builder() -> ConditionBuilder {
        ConditionBuilder::default()
    }

    /// Condition which only expires the access
    #[must_use]
    pub fn expires_at(date_less_than: EpochTime) -> Self {
        Self {
            date_less_than,
            date_greater_than: None,
            ip_address: None,
        }
    }
}

/// Grant of access to a resource
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct Statement {
    /// URL of the resource. Custom policies may use `*` wildcards
    pub resource: String,

    /// Conditions of the grant
    pub condition: Condition,
}

impl Statement {
    /// Construct a new statement
    #[must_use]
    pub fn new(resource: impl Into<String>, condition: Condition) -> Self {
        Self {
            resource: resource.into(),
            condition,
        }
    }
}

/// CloudFront access policy
///
/// CloudFront expects exactly one statement. The type permits more, but nothing here enforces it
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct Policy {
    /// Statements of the policy
    pub statement: Vec<Statement>,
}

impl Policy {
    /// Canned policy for a single URL
    ///
    /// CloudFront reconstructs this exact shape from the `Expires` parameter, so it only ever contains `DateLessThan`
    #[must_use]
    pub fn canned(url: impl Into<String>, expires: EpochTime) -> Self {
        Statement::new(url, Condition::expires_at(expires)).into()
    }

    /// Serialise the policy into the JSON that gets signed
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<Statement> for Policy {
    fn from(value: Statement) -> Self {
        Self {
            statement: vec![value],
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Condition, EpochTime, Policy, Statement, date_to_epoch_time};
    use pretty_assertions::assert_eq;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn rounds_up_to_full_second() {
        let epoch_time = date_to_epoch_time(UNIX_EPOCH + Duration::from_millis(1001));
        assert_eq!(epoch_time, EpochTime::new(2));
    }

    #[test]
    fn keeps_full_seconds() {
        assert_eq!(
            date_to_epoch_time(UNIX_EPOCH + Duration::from_millis(1000)).as_secs(),
            1
        );
        assert_eq!(date_to_epoch_time(UNIX_EPOCH).as_secs(), 0);
    }

    #[test]
    fn ignores_sub_millisecond_precision() {
        let instant = UNIX_EPOCH + Duration::from_secs(1) + Duration::from_nanos(999);
        assert_eq!(date_to_epoch_time(instant).as_secs(), 1);
    }

    #[test]
    fn saturates_before_epoch() {
        let instant = UNIX_EPOCH - Duration::from_secs(10);
        assert_eq!(date_to_epoch_time(instant).as_secs(), 0);
    }

    #[test]
    fn canned_policy_json() {
        let policy = Policy::canned("http://test.com/file", EpochTime::new(1));
        assert_eq!(
            policy.to_json().unwrap(),
            r#"{"Statement":[{"Resource":"http://test.com/file","Condition":{"DateLessThan":{"AWS:EpochTime":1}}}]}"#
        );
    }

    #[test]
    fn custom_policy_json_keeps_field_order() {
        let condition = Condition::builder()
            .ip_address("1.1.1.0/24")
            .date_greater_than(EpochTime::new(0))
            .date_less_than(EpochTime::new(1))
            .build()
            .unwrap();
        let policy = Policy::from(Statement::new("http://test.com/f/*", condition));

        assert_eq!(
            policy.to_json().unwrap(),
            r#"{"Statement":[{"Resource":"http://test.com/f/*","Condition":{"DateLessThan":{"AWS:EpochTime":1},"DateGreaterThan":{"AWS:EpochTime":0},"IpAddress":{"AWS:SourceIp":"1.1.1.0/24"}}}]}"#
        );
    }

    #[test]
    fn omits_absent_conditions() {
        let condition = Condition::builder()
            .date_less_than(EpochTime::new(10))
            .ip_address("192.0.2.0/24")
            .build()
            .unwrap();

        let json = serde_json::to_string(&condition).unwrap();
        assert_eq!(
            json,
            r#"{"DateLessThan":{"AWS:EpochTime":10},"IpAddress":{"AWS:SourceIp":"192.0.2.0/24"}}"#
        );
        assert!(!json.contains("null"));
    }

    #[test]
    fn builder_requires_expiration() {
        assert!(
            Condition::builder()
                .date_greater_than(EpochTime::new(0))
                .build()
                .is_err()
        );
    }

    #[test]
    fn parses_policy_document() {
        let raw = r#"{
            "Statement": [{
                "Resource": "https://d111111abcdef8.cloudfront.net/videos/*",
                "Condition": {
                    "DateLessThan": { "AWS:EpochTime": 1767225600 },
                    "IpAddress": { "AWS:SourceIp": "192.0.2.0/24" }
                }
            }]
        }"#;

        let policy: Policy = serde_json::from_str(raw).unwrap();
        let statement = &policy.statement[0];
        assert_eq!(statement.condition.date_less_than.as_secs(), 1_767_225_600);
        assert_eq!(statement.condition.date_greater_than, None);
        assert_eq!(
            statement.condition.ip_address.as_ref().map(|ip| ip.as_str()),
            Some("192.0.2.0/24")
        );
    }

    #[test]
    fn rejects_misspelled_condition() {
        let raw = r#"{
            "Statement": [{
                "Resource": "https://d111111abcdef8.cloudfront.net/videos/*",
                "Condition": {
                    "DateLessThan": { "AWS:EpochTime": 1767225600 },
                    "IPAddress": { "AWS:SourceIp": "192.0.2.0/24" }
                }
            }]
        }"#;

        let error = serde_json::from_str::<Policy>(raw).unwrap_err();
        assert!(error.to_string().contains("IPAddress"));
    }

    #[test]
    fn rejects_unknown_keys_at_every_level() {
        let documents = [
            r#"{"Statement":[],"Version":"2012-10-17"}"#,
            r#"{"Statement":[{"Resource":"*","Effect":"Allow","Condition":{"DateLessThan":{"AWS:EpochTime":1}}}]}"#,
            r#"{"Statement":[{"Resource":"*","Condition":{"DateLessThan":{"AWS:EpochTime":1,"AWS:Epoch":2}}}]}"#,
            r#"{"Statement":[{"Resource":"*","Condition":{"DateLessThan":{"AWS:EpochTime":1},"IpAddress":{"AWS:SourceIP":"10.0.0.0/8"}}}]}"#,
        ];

        for raw in documents {
            assert!(serde_json::from_str::<Policy>(raw).is_err(), "{raw}");
        }
    }
}
