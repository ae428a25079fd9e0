use axum::http::{header, HeaderValue};
use axum::Router;
use std::env;
use tower_http::set_header::SetResponseHeaderLayer;

/// Security header values
const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_API_VALUE: &str = "default-src 'none'; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";

/// Attach the standard security response headers to every route. HSTS is
/// only meaningful behind HTTPS, so it is added in production mode alone.
pub fn apply_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let router = router
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static(NOSNIFF),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static(DENY),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CSP_API_VALUE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static(REFERRER_POLICY_VALUE),
        ));

    if hsts_enabled() {
        tracing::info!("Security: HSTS header enabled (production mode)");
        router.layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS_VALUE),
        ))
    } else {
        tracing::info!("Security: HSTS header disabled (development mode)");
        router
    }
}

fn hsts_enabled() -> bool {
    env::var("RUST_ENV")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsts_defaults_off_outside_production() {
        std::env::remove_var("RUST_ENV");
        assert!(!hsts_enabled());
    }

    #[test]
    fn header_values_are_valid() {
        for value in [NOSNIFF, DENY, HSTS_VALUE, CSP_API_VALUE, REFERRER_POLICY_VALUE] {
            assert!(value.parse::<HeaderValue>().is_ok());
        }
    }
}
