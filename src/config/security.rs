//! Security headers configuration.
//!
//! [`SecurityPolicyConfig`] is both the effective policy handed to the
//! middleware and the partial override record a caller supplies. Each field
//! maps to one response header; `None` means the key is absent.

use super::options::{
    ExpectCt, FlagOrValue, ReferrerPolicy, ReferrerPolicyOption, StrictTransportSecurity,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for security headers middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityPolicyConfig {
    #[serde(
        rename = "Strict-Transport-Security",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub strict_transport_security: Option<StrictTransportSecurity>,

    #[serde(rename = "Referrer-Policy", default, skip_serializing_if = "Option::is_none")]
    pub referrer_policy: Option<ReferrerPolicyOption>,

    #[serde(rename = "Expect-CT", default, skip_serializing_if = "Option::is_none")]
    pub expect_ct: Option<ExpectCt>,

    #[serde(rename = "X-Frame-Options", default, skip_serializing_if = "Option::is_none")]
    pub frame_options: Option<FlagOrValue>,

    #[serde(
        rename = "X-Content-Type-Options",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type_options: Option<bool>,

    #[serde(rename = "X-XSS-Protection", default, skip_serializing_if = "Option::is_none")]
    pub xss_protection: Option<bool>,

    #[serde(
        rename = "X-Permitted-Cross-Domain-Policies",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub permitted_cross_domain_policies: Option<FlagOrValue>,

    #[serde(rename = "X-Powered-By", default, skip_serializing_if = "Option::is_none")]
    pub powered_by: Option<FlagOrValue>,
}

impl Default for SecurityPolicyConfig {
    /// The built-in policy used when a caller overrides nothing.
    fn default() -> Self {
        Self {
            strict_transport_security: Some(StrictTransportSecurity::default()),
            referrer_policy: Some(ReferrerPolicyOption::List(vec![
                ReferrerPolicy::NoReferrer,
                ReferrerPolicy::StrictOriginWhenCrossOrigin,
            ])),
            expect_ct: Some(ExpectCt::default()),
            frame_options: Some(FlagOrValue::Enabled(true)),
            content_type_options: Some(true),
            xss_protection: Some(true),
            permitted_cross_domain_policies: Some(FlagOrValue::Enabled(true)),
            powered_by: Some(FlagOrValue::Value("Fake Server".to_string())),
        }
    }
}

impl SecurityPolicyConfig {
    /// A record with every key absent, the starting point for overrides.
    pub fn empty() -> Self {
        Self {
            strict_transport_security: None,
            referrer_policy: None,
            expect_ct: None,
            frame_options: None,
            content_type_options: None,
            xss_protection: None,
            permitted_cross_domain_policies: None,
            powered_by: None,
        }
    }

    /// Key-wise merge: every key present in `overrides` replaces ours whole,
    /// including nested records and explicit `false`.
    pub fn merge(&self, overrides: &SecurityPolicyConfig) -> Self {
        fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
            over.as_ref().or(base.as_ref()).cloned()
        }

        Self {
            strict_transport_security: pick(
                &self.strict_transport_security,
                &overrides.strict_transport_security,
            ),
            referrer_policy: pick(&self.referrer_policy, &overrides.referrer_policy),
            expect_ct: pick(&self.expect_ct, &overrides.expect_ct),
            frame_options: pick(&self.frame_options, &overrides.frame_options),
            content_type_options: pick(&self.content_type_options, &overrides.content_type_options),
            xss_protection: pick(&self.xss_protection, &overrides.xss_protection),
            permitted_cross_domain_policies: pick(
                &self.permitted_cross_domain_policies,
                &overrides.permitted_cross_domain_policies,
            ),
            powered_by: pick(&self.powered_by, &overrides.powered_by),
        }
    }

    /// The built-in defaults with `overrides` merged over them
    pub fn with_overrides(overrides: &SecurityPolicyConfig) -> Self {
        Self::default().merge(overrides)
    }

    /// Drop `Strict-Transport-Security` from the policy
    pub fn without_hsts(mut self) -> Self {
        self.strict_transport_security = None;
        self
    }

    /// Drop `Expect-CT` from the policy
    pub fn without_expect_ct(mut self) -> Self {
        self.expect_ct = None;
        self
    }

    /// Parse an override record from JSON keyed by header name
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Header names this policy will touch on a response
    pub fn active_headers(&self) -> Vec<&'static str> {
        let flag = |value: &Option<FlagOrValue>| {
            !matches!(value, None | Some(FlagOrValue::Enabled(false)))
        };

        let mut headers = Vec::new();
        if self.strict_transport_security.is_some() {
            headers.push("Strict-Transport-Security");
        }
        if self.referrer_policy.is_some() {
            headers.push("Referrer-Policy");
        }
        if self.expect_ct.is_some() {
            headers.push("Expect-CT");
        }
        if flag(&self.frame_options) {
            headers.push("X-Frame-Options");
        }
        if self.content_type_options == Some(true) {
            headers.push("X-Content-Type-Options");
        }
        if self.xss_protection == Some(true) {
            headers.push("X-XSS-Protection");
        }
        if flag(&self.permitted_cross_domain_policies) {
            headers.push("X-Permitted-Cross-Domain-Policies");
        }
        // `false` deletes, a string overwrites; only `true` leaves it alone
        if !matches!(self.powered_by, None | Some(FlagOrValue::Enabled(true))) {
            headers.push("X-Powered-By");
        }
        headers
    }

    /// Load the effective policy from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = Self::overrides_from_lookup(&lookup)?;
        let mut config = Self::with_overrides(&overrides);

        if !read(&lookup, "HSTS_ENABLED", parse_bool)?.unwrap_or(true) {
            config = config.without_hsts();
        }
        if !read(&lookup, "EXPECT_CT_ENABLED", parse_bool)?.unwrap_or(true) {
            config = config.without_expect_ct();
        }

        Ok(config)
    }

    /// Read only the override record; unset variables leave their key absent.
    pub fn overrides_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overrides = Self::empty();

        let hsts_max_age = read(&lookup, "HSTS_MAX_AGE", parse_i64)?;
        let hsts_subdomains = read(&lookup, "HSTS_INCLUDE_SUBDOMAINS", parse_bool)?;
        let hsts_preload = read(&lookup, "HSTS_PRELOAD", parse_bool)?;
        if hsts_max_age.is_some() || hsts_subdomains.is_some() || hsts_preload.is_some() {
            let base = StrictTransportSecurity::default();
            overrides.strict_transport_security = Some(StrictTransportSecurity {
                max_age: hsts_max_age.unwrap_or(base.max_age),
                include_sub_domains: hsts_subdomains.unwrap_or(base.include_sub_domains),
                preload: hsts_preload.unwrap_or(base.preload),
            });
        }

        overrides.referrer_policy = read(&lookup, "REFERRER_POLICY", parse_referrer_policy)?;

        let ct_max_age = read(&lookup, "EXPECT_CT_MAX_AGE", parse_i64)?;
        let ct_enforce = read(&lookup, "EXPECT_CT_ENFORCE", parse_bool)?;
        let ct_report_uri = lookup("EXPECT_CT_REPORT_URI");
        if ct_max_age.is_some() || ct_enforce.is_some() || ct_report_uri.is_some() {
            let base = ExpectCt::default();
            overrides.expect_ct = Some(ExpectCt {
                max_age: ct_max_age.unwrap_or(base.max_age),
                enforce: ct_enforce.unwrap_or(base.enforce),
                report_uri: ct_report_uri.or(base.report_uri),
            });
        }

        overrides.frame_options = read(&lookup, "X_FRAME_OPTIONS", parse_flag_or_value)?;
        overrides.content_type_options = read(&lookup, "X_CONTENT_TYPE_OPTIONS", parse_bool)?;
        overrides.xss_protection = read(&lookup, "X_XSS_PROTECTION", parse_bool)?;
        overrides.permitted_cross_domain_policies =
            read(&lookup, "X_PERMITTED_CROSS_DOMAIN_POLICIES", parse_flag_or_value)?;
        overrides.powered_by = read(&lookup, "X_POWERED_BY", parse_flag_or_value)?;

        Ok(overrides)
    }
}

fn read<F, T>(
    lookup: &F,
    var: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => match parse(&value) {
            Some(parsed) => Ok(Some(parsed)),
            None => Err(ConfigError::InvalidEnv { var, value }),
        },
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_i64(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn parse_flag_or_value(value: &str) -> Option<FlagOrValue> {
    Some(match parse_bool(value) {
        Some(enabled) => FlagOrValue::Enabled(enabled),
        None => FlagOrValue::Value(value.to_string()),
    })
}

fn parse_referrer_policy(value: &str) -> Option<ReferrerPolicyOption> {
    let policies = value
        .split(',')
        .map(ReferrerPolicy::from_token)
        .collect::<Option<Vec<_>>>()?;
    Some(match policies.as_slice() {
        [single] => ReferrerPolicyOption::Single(*single),
        _ => ReferrerPolicyOption::List(policies),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_merge_with_empty_overrides_keeps_defaults() {
        let defaults = SecurityPolicyConfig::default();
        assert_eq!(defaults.merge(&SecurityPolicyConfig::empty()), defaults);
    }

    #[test]
    fn test_merge_prefers_explicit_false() {
        let overrides = SecurityPolicyConfig {
            content_type_options: Some(false),
            frame_options: Some(FlagOrValue::Enabled(false)),
            ..SecurityPolicyConfig::empty()
        };
        let merged = SecurityPolicyConfig::with_overrides(&overrides);

        assert_eq!(merged.content_type_options, Some(false));
        assert_eq!(merged.frame_options, Some(FlagOrValue::Enabled(false)));
        assert_eq!(merged.xss_protection, Some(true));
    }

    #[test]
    fn test_merge_replaces_nested_records_whole() {
        let overrides = SecurityPolicyConfig {
            strict_transport_security: Some(StrictTransportSecurity {
                max_age: 60,
                include_sub_domains: false,
                preload: false,
            }),
            ..SecurityPolicyConfig::empty()
        };
        let merged = SecurityPolicyConfig::with_overrides(&overrides);

        let hsts = merged.strict_transport_security.unwrap();
        assert_eq!(hsts.max_age, 60);
        assert!(!hsts.include_sub_domains);
        assert!(!hsts.preload);
    }

    #[test]
    fn test_every_key_override_wins() {
        let overrides = SecurityPolicyConfig {
            strict_transport_security: Some(StrictTransportSecurity {
                max_age: 1,
                include_sub_domains: false,
                preload: false,
            }),
            referrer_policy: Some(ReferrerPolicy::Origin.into()),
            expect_ct: Some(ExpectCt {
                max_age: 2,
                enforce: true,
                report_uri: Some("https://report".to_string()),
            }),
            frame_options: Some("DENY".into()),
            content_type_options: Some(false),
            xss_protection: Some(false),
            permitted_cross_domain_policies: Some("master-only".into()),
            powered_by: Some(true.into()),
        };
        assert_eq!(SecurityPolicyConfig::with_overrides(&overrides), overrides);
    }

    #[test]
    fn test_from_json_reads_header_keys() {
        let config = SecurityPolicyConfig::from_json(
            r#"{
                "X-Frame-Options": "DENY",
                "X-Powered-By": false,
                "Referrer-Policy": ["same-origin"],
                "Expect-CT": {"max-age": 10, "enforce": true, "report-uri": "https://r"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.frame_options, Some("DENY".into()));
        assert_eq!(config.powered_by, Some(false.into()));
        assert_eq!(
            config.referrer_policy,
            Some(ReferrerPolicyOption::List(vec![ReferrerPolicy::SameOrigin]))
        );
        assert_eq!(config.expect_ct.unwrap().max_age, 10);
        assert!(config.strict_transport_security.is_none());
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let err = SecurityPolicyConfig::from_json(r#"{"X-Frame-Option": "DENY"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_json_rejects_non_numeric_max_age() {
        let err = SecurityPolicyConfig::from_json(
            r#"{"Strict-Transport-Security": {"max-age": "forever"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_lookup_without_vars_is_default() {
        let config = SecurityPolicyConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SecurityPolicyConfig::default());
    }

    #[test]
    fn test_from_lookup_applies_overrides() {
        let config = SecurityPolicyConfig::from_lookup(lookup_from(&[
            ("HSTS_MAX_AGE", "600"),
            ("REFERRER_POLICY", "origin, unsafe-url"),
            ("X_FRAME_OPTIONS", "DENY"),
            ("X_XSS_PROTECTION", "FALSE"),
            ("X_POWERED_BY", "false"),
            ("EXPECT_CT_ENABLED", "false"),
        ]))
        .unwrap();

        assert_eq!(
            config.strict_transport_security,
            Some(StrictTransportSecurity {
                max_age: 600,
                include_sub_domains: true,
                preload: true,
            })
        );
        assert_eq!(
            config.referrer_policy,
            Some(ReferrerPolicyOption::List(vec![
                ReferrerPolicy::Origin,
                ReferrerPolicy::UnsafeUrl
            ]))
        );
        assert_eq!(config.frame_options, Some("DENY".into()));
        assert_eq!(config.xss_protection, Some(false));
        assert_eq!(config.powered_by, Some(false.into()));
        assert!(config.expect_ct.is_none());
    }

    #[test]
    fn test_from_lookup_disables_hsts() {
        let config =
            SecurityPolicyConfig::from_lookup(lookup_from(&[("HSTS_ENABLED", "false")])).unwrap();
        assert!(config.strict_transport_security.is_none());
        assert!(!config.active_headers().contains(&"Strict-Transport-Security"));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = SecurityPolicyConfig::from_lookup(lookup_from(&[("HSTS_MAX_AGE", "a year")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: "HSTS_MAX_AGE", .. }));

        let err =
            SecurityPolicyConfig::from_lookup(lookup_from(&[("REFERRER_POLICY", "nowhere")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: "REFERRER_POLICY", .. }));
    }

    #[test]
    fn test_active_headers_for_defaults() {
        assert_eq!(
            SecurityPolicyConfig::default().active_headers(),
            vec![
                "Strict-Transport-Security",
                "Referrer-Policy",
                "Expect-CT",
                "X-Frame-Options",
                "X-Content-Type-Options",
                "X-XSS-Protection",
                "X-Permitted-Cross-Domain-Policies",
                "X-Powered-By",
            ]
        );
        assert!(SecurityPolicyConfig::empty().active_headers().is_empty());
    }
}
