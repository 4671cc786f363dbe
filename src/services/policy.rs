//! Applies an effective policy to a response header map.

use super::serializers::{self, HeaderAction};
use crate::{config::SecurityPolicyConfig, error::ValidationError};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};

/// A managed header: display spelling for logs and errors, wire name for the map
struct Rule {
    header: &'static str,
    name: &'static str,
}

const STRICT_TRANSPORT_SECURITY: Rule = Rule {
    header: "Strict-Transport-Security",
    name: "strict-transport-security",
};
const REFERRER_POLICY: Rule = Rule {
    header: "Referrer-Policy",
    name: "referrer-policy",
};
const EXPECT_CT: Rule = Rule {
    header: "Expect-CT",
    name: "expect-ct",
};
const X_FRAME_OPTIONS: Rule = Rule {
    header: "X-Frame-Options",
    name: "x-frame-options",
};
const X_CONTENT_TYPE_OPTIONS: Rule = Rule {
    header: "X-Content-Type-Options",
    name: "x-content-type-options",
};
const X_XSS_PROTECTION: Rule = Rule {
    header: "X-XSS-Protection",
    name: "x-xss-protection",
};
const X_PERMITTED_CROSS_DOMAIN_POLICIES: Rule = Rule {
    header: "X-Permitted-Cross-Domain-Policies",
    name: "x-permitted-cross-domain-policies",
};
const X_POWERED_BY: Rule = Rule {
    header: "X-Powered-By",
    name: "x-powered-by",
};

/// Apply every configured header rule to `headers`, in place.
///
/// Rules run in a fixed order and stop at the first [`ValidationError`].
/// Rules applied before the failure stay on the map.
pub fn apply_policy(
    config: &SecurityPolicyConfig,
    headers: &mut HeaderMap,
) -> Result<(), ValidationError> {
    if let Some(opts) = &config.strict_transport_security {
        apply(
            headers,
            STRICT_TRANSPORT_SECURITY,
            serializers::strict_transport_security(opts)?,
        )?;
    }

    if let Some(opts) = &config.referrer_policy {
        apply(headers, REFERRER_POLICY, serializers::referrer_policy(opts)?)?;
    }

    if let Some(opts) = &config.expect_ct {
        apply(headers, EXPECT_CT, serializers::expect_ct(opts)?)?;
    }

    if let Some(value) = &config.frame_options {
        apply(headers, X_FRAME_OPTIONS, serializers::frame_options(value))?;
    }

    if let Some(enabled) = config.content_type_options {
        apply(
            headers,
            X_CONTENT_TYPE_OPTIONS,
            serializers::content_type_options(enabled),
        )?;
    }

    if let Some(enabled) = config.xss_protection {
        apply(headers, X_XSS_PROTECTION, serializers::xss_protection(enabled))?;
    }

    if let Some(value) = &config.permitted_cross_domain_policies {
        apply(
            headers,
            X_PERMITTED_CROSS_DOMAIN_POLICIES,
            serializers::permitted_cross_domain_policies(value),
        )?;
    }

    if let Some(value) = &config.powered_by {
        apply(headers, X_POWERED_BY, serializers::powered_by(value))?;
    }

    Ok(())
}

fn apply(headers: &mut HeaderMap, rule: Rule, action: HeaderAction) -> Result<(), ValidationError> {
    let Rule { header, name } = rule;

    match action {
        HeaderAction::Set(value) => {
            let Ok(header_value) = HeaderValue::from_str(&value) else {
                return Err(ValidationError::InvalidHeaderValue { header, value });
            };
            tracing::debug!(target: "security_headers", header, value = %value, "Setting header");
            headers.insert(HeaderName::from_static(name), header_value);
        }
        HeaderAction::Remove => {
            tracing::debug!(target: "security_headers", header, "Removing header");
            headers.remove(name);
        }
        HeaderAction::Skip => {}
    }

    Ok(())
}
