//! Option shapes for the individual security headers.

use serde::{Deserialize, Serialize};

/// A header option that is either a switch or a literal header value.
///
/// `true` selects the header's built-in value, `false` turns the header off,
/// and a string is sent as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagOrValue {
    Enabled(bool),
    Value(String),
}

impl From<bool> for FlagOrValue {
    fn from(enabled: bool) -> Self {
        FlagOrValue::Enabled(enabled)
    }
}

impl From<&str> for FlagOrValue {
    fn from(value: &str) -> Self {
        FlagOrValue::Value(value.to_string())
    }
}

impl From<String> for FlagOrValue {
    fn from(value: String) -> Self {
        FlagOrValue::Value(value)
    }
}

/// Options for `Strict-Transport-Security`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrictTransportSecurity {
    #[serde(rename = "max-age")]
    pub max_age: i64,
    #[serde(rename = "includeSubDomains", default)]
    pub include_sub_domains: bool,
    #[serde(default)]
    pub preload: bool,
}

impl Default for StrictTransportSecurity {
    fn default() -> Self {
        Self {
            max_age: 31536000, // 1 year
            include_sub_domains: true,
            preload: true,
        }
    }
}

/// Options for `Expect-CT`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectCt {
    #[serde(rename = "max-age")]
    pub max_age: i64,
    #[serde(default)]
    pub enforce: bool,
    #[serde(rename = "report-uri", default, skip_serializing_if = "Option::is_none")]
    pub report_uri: Option<String>,
}

impl Default for ExpectCt {
    fn default() -> Self {
        Self {
            max_age: 86400, // 1 day
            enforce: false,
            report_uri: None,
        }
    }
}

/// A single `Referrer-Policy` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferrerPolicy {
    #[serde(rename = "")]
    Empty,
    #[serde(rename = "no-referrer")]
    NoReferrer,
    #[serde(rename = "no-referrer-when-downgrade")]
    NoReferrerWhenDowngrade,
    #[serde(rename = "same-origin")]
    SameOrigin,
    #[serde(rename = "origin")]
    Origin,
    #[serde(rename = "strict-origin")]
    StrictOrigin,
    #[serde(rename = "origin-when-cross-origin")]
    OriginWhenCrossOrigin,
    #[serde(rename = "strict-origin-when-cross-origin")]
    StrictOriginWhenCrossOrigin,
    #[serde(rename = "unsafe-url")]
    UnsafeUrl,
}

impl ReferrerPolicy {
    pub const ALL: [ReferrerPolicy; 9] = [
        ReferrerPolicy::Empty,
        ReferrerPolicy::NoReferrer,
        ReferrerPolicy::NoReferrerWhenDowngrade,
        ReferrerPolicy::SameOrigin,
        ReferrerPolicy::Origin,
        ReferrerPolicy::StrictOrigin,
        ReferrerPolicy::OriginWhenCrossOrigin,
        ReferrerPolicy::StrictOriginWhenCrossOrigin,
        ReferrerPolicy::UnsafeUrl,
    ];

    /// The token as it appears in the header value
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferrerPolicy::Empty => "",
            ReferrerPolicy::NoReferrer => "no-referrer",
            ReferrerPolicy::NoReferrerWhenDowngrade => "no-referrer-when-downgrade",
            ReferrerPolicy::SameOrigin => "same-origin",
            ReferrerPolicy::Origin => "origin",
            ReferrerPolicy::StrictOrigin => "strict-origin",
            ReferrerPolicy::OriginWhenCrossOrigin => "origin-when-cross-origin",
            ReferrerPolicy::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
            ReferrerPolicy::UnsafeUrl => "unsafe-url",
        }
    }

    /// Look up a token by its header spelling (case-insensitive, trimmed)
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(token))
    }
}

/// One referrer policy or an ordered list of fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferrerPolicyOption {
    Single(ReferrerPolicy),
    List(Vec<ReferrerPolicy>),
}

impl ReferrerPolicyOption {
    /// Normalize to a list; a single policy becomes a one-element list.
    pub fn policies(&self) -> &[ReferrerPolicy] {
        match self {
            ReferrerPolicyOption::Single(policy) => std::slice::from_ref(policy),
            ReferrerPolicyOption::List(policies) => policies,
        }
    }
}

impl From<ReferrerPolicy> for ReferrerPolicyOption {
    fn from(policy: ReferrerPolicy) -> Self {
        ReferrerPolicyOption::Single(policy)
    }
}

impl From<Vec<ReferrerPolicy>> for ReferrerPolicyOption {
    fn from(policies: Vec<ReferrerPolicy>) -> Self {
        ReferrerPolicyOption::List(policies)
    }
}
