//! Bearer token authentication and role checks.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;
use crate::error::ApiError;
use claimdesk_shared::{Claims, JwtError, JwtService, UserRole};

/// Why a request was turned away before reaching a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization: Bearer` header.
    MissingToken,
    /// The token's `exp` has passed.
    Expired,
    /// Bad signature or malformed token.
    Invalid,
    /// Handler extracted [`AuthUser`] on a route without the middleware.
    Unauthenticated,
}

impl AuthRejection {
    const fn code(self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::Expired => "token_expired",
            Self::Invalid => "invalid_token",
            Self::Unauthenticated => "unauthorized",
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::MissingToken => "Authorization header with Bearer token is required",
            Self::Expired => "Token has expired",
            Self::Invalid => "Invalid or malformed token",
            Self::Unauthenticated => "Authentication required",
        }
    }
}

impl From<JwtError> for AuthRejection {
    fn from(e: JwtError) -> Self {
        match e {
            JwtError::Expired => Self::Expired,
            JwtError::EncodingError(_) | JwtError::DecodingError(_) => Self::Invalid,
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": self.code(),
                "title": "Not Authenticated",
                "message": self.message(),
            })),
        )
            .into_response()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Resolves the caller's claims from the request headers.
fn authenticate(jwt: &JwtService, headers: &HeaderMap) -> Result<Claims, AuthRejection> {
    let token = bearer_token(headers).ok_or(AuthRejection::MissingToken)?;
    Ok(jwt.validate_token(token)?)
}

/// Validates the bearer token and stores its [`Claims`] in the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state.jwt_service, request.headers()) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(rejection) => {
            tracing::debug!(reason = rejection.code(), "Rejected request");
            rejection.into_response()
        }
    }
}

/// The authenticated caller.
///
/// ```ignore
/// async fn approve(auth: AuthUser) -> Result<Json<Value>, ApiError> {
///     auth.require(UserRole::can_approve)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The caller's user id.
    #[must_use]
    pub fn user_id(&self) -> uuid::Uuid {
        self.0.user_id()
    }

    /// The caller's role, if the token carries a known one.
    #[must_use]
    pub fn role(&self) -> Option<UserRole> {
        self.0.user_role()
    }

    /// Fails with 403 unless the caller's role passes `check`.
    pub fn require(&self, check: fn(&UserRole) -> bool) -> Result<(), ApiError> {
        match self.role() {
            Some(role) if check(&role) => Ok(()),
            _ => Err(ApiError::not_permitted()),
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::{Duration, Utc};
    use rstest::rstest;
    use uuid::Uuid;

    fn auth(role: &str) -> AuthUser {
        AuthUser(Claims::new(Uuid::new_v4(), role, Utc::now() + Duration::minutes(5)))
    }

    fn service() -> JwtService {
        JwtService::new("middleware-test-secret", Duration::minutes(5))
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("bearer abc", Some("abc"))]
    #[case("BEARER  abc ", Some("abc"))]
    #[case("Basic abc", None)]
    #[case("Bearer ", None)]
    fn test_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(bearer_token(&headers(header)), expected);
    }

    #[test]
    fn test_authenticate_rejections() {
        let jwt = service();
        assert_eq!(
            authenticate(&jwt, &HeaderMap::new()).unwrap_err(),
            AuthRejection::MissingToken
        );
        assert_eq!(
            authenticate(&jwt, &headers("Bearer not.a.token")).unwrap_err(),
            AuthRejection::Invalid
        );

        let expired = service().with_ttl(Duration::minutes(-10));
        let token = expired.generate_access_token(Uuid::new_v4(), "admin").unwrap();
        assert_eq!(
            authenticate(&jwt, &headers(&format!("Bearer {token}"))).unwrap_err(),
            AuthRejection::Expired
        );
    }

    #[test]
    fn test_authenticate_accepts_valid_token() {
        let jwt = service();
        let user_id = Uuid::new_v4();
        let token = jwt.generate_access_token(user_id, "submitter").unwrap();

        let claims = authenticate(&jwt, &headers(&format!("Bearer {token}"))).unwrap();
        assert_eq!(claims.user_id(), user_id);
    }

    #[test]
    fn test_require_checks_role() {
        assert!(auth("admin").require(UserRole::can_manage_dimensions).is_ok());
        assert!(auth("submitter").require(UserRole::can_manage_dimensions).is_err());
        assert!(auth("approver").require(UserRole::can_approve).is_ok());
    }

    #[test]
    fn test_unknown_role_is_not_permitted() {
        assert!(auth("superuser").require(UserRole::can_submit).is_err());
    }
}
