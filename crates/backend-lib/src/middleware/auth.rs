//! Bearer token gate for protected routes.
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use metrics::counter;

use crate::error::AppError;
use crate::metrics::BEARER_REJECTED;
use crate::AppState;

/// Identity attached to a request once its bearer token verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub token_id: String,
}

/// Reject the request with 401 unless it carries a valid `Authorization: Bearer` token
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = bearer_token(&request)
        .and_then(|token| state.signer.verify(token))
        .inspect_err(|e| {
            counter!(BEARER_REJECTED).increment(1);
            tracing::debug!(reason = %e, "bearer token rejected");
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        subject: claims.sub,
        token_id: claims.jti,
    });
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Result<&str, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::InvalidOrExpiredAccessToken("missing authorization header".into()))?
        .to_str()
        .map_err(|_| {
            AppError::InvalidOrExpiredAccessToken("invalid authorization header encoding".into())
        })?;

    let (scheme, token) = header.split_once(' ').ok_or_else(|| {
        AppError::InvalidOrExpiredAccessToken("invalid authorization header format".into())
    })?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::InvalidOrExpiredAccessToken(
            "unsupported authorization scheme".into(),
        ));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::InvalidOrExpiredAccessToken("empty bearer token".into()));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Extension, Router};
    use tower::ServiceExt;

    use crate::config::Settings;

    fn request_with(header: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/protected-resource");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&request_with(Some("Bearer abc.def.ghi"))).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&request_with(Some("bearer abc"))).unwrap(), "abc");
        assert!(bearer_token(&request_with(None)).is_err());
        assert!(bearer_token(&request_with(Some("Bearer"))).is_err());
        assert!(bearer_token(&request_with(Some("Bearer   "))).is_err());
        assert!(bearer_token(&request_with(Some("Basic dXNlcjpwYXNz"))).is_err());
    }

    #[tokio::test]
    async fn test_verified_identity_is_attached() {
        let mut settings = Settings::default();
        settings.jwt.key = "middleware-test-key-0123456789abcdef".to_string();
        let state = AppState::new(settings).unwrap();
        let issued = state.signer.issue("username").unwrap();

        let app = Router::new()
            .route(
                "/whoami",
                get(|Extension(user): Extension<AuthenticatedUser>| async move {
                    format!("{}:{}", user.subject, user.token_id)
                }),
            )
            .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_bearer))
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(AUTHORIZATION, format!("Bearer {}", issued.token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, format!("username:{}", issued.claims.jti).as_bytes());
    }
}
