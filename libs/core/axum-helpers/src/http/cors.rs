use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// CORS layer for an explicit list of origins.
///
/// Allows GET, POST and OPTIONS with JSON content headers, cached for one hour.
///
/// # Errors
/// Returns `InvalidInput` when the list is empty or an origin is not a
/// valid header value.
pub fn create_cors_layer(allowed_origins: &[String]) -> io::Result<CorsLayer> {
    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS origin list cannot be empty",
        ));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    info!("CORS configured with allowed origins: {}", allowed_origins.join(","));

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

/// Allows any origin. Development only.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Pick the CORS layer for an environment.
///
/// An explicit list always wins. Without one, development is permissive and
/// production allows no cross-origin requests.
pub fn cors_layer_for(allowed_origins: &[String], is_production: bool) -> io::Result<CorsLayer> {
    match (allowed_origins.is_empty(), is_production) {
        (false, _) => create_cors_layer(allowed_origins),
        (true, false) => {
            warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin (development)");
            Ok(create_permissive_cors_layer())
        }
        (true, true) => {
            info!("CORS_ALLOWED_ORIGIN not set, cross-origin requests disabled");
            Ok(CorsLayer::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cors_layer_rejects_empty_list() {
        let err = create_cors_layer(&[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_create_cors_layer_rejects_invalid_origin() {
        let err = create_cors_layer(&["http://bad\norigin".to_string()]).unwrap_err();
        assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
    }

    #[test]
    fn test_cors_layer_for_each_environment() {
        let origins = vec!["http://localhost:5173".to_string()];
        assert!(cors_layer_for(&origins, true).is_ok());
        assert!(cors_layer_for(&[], false).is_ok());
        assert!(cors_layer_for(&[], true).is_ok());
    }
}
