//! Header value serializers.
//!
//! Each function turns one header's option into a [`HeaderAction`]. They are
//! pure: the outcome depends only on the option, never on the response.

use crate::{
    config::{ExpectCt, FlagOrValue, ReferrerPolicyOption, StrictTransportSecurity},
    error::ValidationError,
};

/// What to do with a header on the outgoing response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderAction {
    /// Set the header, replacing any value the handler produced
    Set(String),
    /// Delete the header if present
    Remove,
    /// Leave the header untouched
    Skip,
}

/// Reject negative max-age values.
pub fn validate_max_age(header: &'static str, max_age: i64) -> Result<i64, ValidationError> {
    if max_age < 0 {
        return Err(ValidationError::InvalidMaxAge {
            header,
            value: max_age,
        });
    }
    Ok(max_age)
}

pub fn strict_transport_security(
    opts: &StrictTransportSecurity,
) -> Result<HeaderAction, ValidationError> {
    let max_age = validate_max_age("Strict-Transport-Security", opts.max_age)?;

    let mut parts = vec![format!("max-age={max_age}")];
    if opts.include_sub_domains {
        parts.push("includeSubDomains".to_string());
    }
    if opts.preload {
        parts.push("preload".to_string());
    }

    Ok(HeaderAction::Set(parts.join("; ")))
}

pub fn referrer_policy(opts: &ReferrerPolicyOption) -> Result<HeaderAction, ValidationError> {
    let policies = opts.policies();
    if policies.is_empty() {
        return Err(ValidationError::EmptyReferrerPolicy);
    }

    let value = policies
        .iter()
        .map(|policy| policy.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Ok(HeaderAction::Set(value))
}

/// `report-uri` follows `enforce`: it is written whenever enforcement is on
/// and never otherwise, whether or not a URI is configured.
pub fn expect_ct(opts: &ExpectCt) -> Result<HeaderAction, ValidationError> {
    let max_age = validate_max_age("Expect-CT", opts.max_age)?;

    let mut parts = vec![format!("max-age={max_age}")];
    if opts.enforce {
        parts.push("enforce".to_string());
        parts.push(format!(
            "report-uri=\"{}\"",
            opts.report_uri.as_deref().unwrap_or_default()
        ));
    }

    Ok(HeaderAction::Set(parts.join(", ")))
}

pub fn frame_options(value: &FlagOrValue) -> HeaderAction {
    flag_or_value(value, "SAMEORIGIN")
}

pub fn content_type_options(enabled: bool) -> HeaderAction {
    if enabled {
        HeaderAction::Set("nosniff".to_string())
    } else {
        HeaderAction::Skip
    }
}

pub fn xss_protection(enabled: bool) -> HeaderAction {
    if enabled {
        HeaderAction::Set("1; mode=block".to_string())
    } else {
        HeaderAction::Skip
    }
}

pub fn permitted_cross_domain_policies(value: &FlagOrValue) -> HeaderAction {
    flag_or_value(value, "none")
}

/// A string overwrites, `false` deletes, `true` passes the handler's value through.
pub fn powered_by(value: &FlagOrValue) -> HeaderAction {
    match value {
        FlagOrValue::Value(literal) => HeaderAction::Set(literal.clone()),
        FlagOrValue::Enabled(false) => HeaderAction::Remove,
        FlagOrValue::Enabled(true) => HeaderAction::Skip,
    }
}

fn flag_or_value(value: &FlagOrValue, default: &str) -> HeaderAction {
    match value {
        FlagOrValue::Value(literal) => HeaderAction::Set(literal.clone()),
        FlagOrValue::Enabled(true) => HeaderAction::Set(default.to_string()),
        FlagOrValue::Enabled(false) => HeaderAction::Skip,
    }
}
