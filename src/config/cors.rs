use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// Build the CORS layer from the configured comma-separated origin list.
/// With no configured origins the layer is permissive, which is the
/// documented default for this service.
pub fn create_cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS));

    match parse_origins(allowed_origins) {
        Some(origins) => {
            tracing::info!("CORS: Configured with {} allowed origin(s)", origins.len());
            layer
                .allow_origin(AllowOrigin::list(origins))
                .allow_credentials(true)
        }
        None => {
            tracing::info!("CORS: No origins configured, using permissive settings");
            layer.allow_origin(AllowOrigin::any())
        }
    }
}

fn parse_origins(raw: Option<&str>) -> Option<Vec<HeaderValue>> {
    let origins: Vec<HeaderValue> = raw?
        .split(',')
        .filter_map(|origin| {
            let trimmed = origin.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(value) => {
                    tracing::debug!("CORS: Allowing origin: {}", trimmed);
                    Some(value)
                }
                Err(e) => {
                    tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    if origins.is_empty() {
        None
    } else {
        Some(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_configuration_falls_back_to_permissive() {
        let _layer = create_cors_layer(None);
        assert!(parse_origins(None).is_none());
    }

    #[test]
    fn origin_list_is_parsed_and_trimmed() {
        let origins =
            parse_origins(Some(" https://tickets.example.com , http://localhost:5173 ")).unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://tickets.example.com");
    }

    #[test]
    fn invalid_entries_are_dropped() {
        let origins = parse_origins(Some("https://ok.example.com,bad\u{7f}origin")).unwrap();
        assert_eq!(origins.len(), 1);
    }

    #[test]
    fn all_invalid_entries_mean_permissive() {
        assert!(parse_origins(Some(" , ")).is_none());
    }
}
