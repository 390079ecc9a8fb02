use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use jsonwebtoken::{decode, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::middleware_auth::{issue_session_token, SessionKeys, SESSION_COOKIE};
use crate::routes::users::{self, model::User};
use crate::state::AppState;

const SESSION_COOKIE_MAX_AGE_SECS: u32 = 60 * 60 * 24;

/// Identity assertion minted by the external OAuth provider once its own
/// flow has completed. Only the email claim matters here.
#[derive(Debug, Serialize, Deserialize)]
struct IdentityClaims {
    email: String,
    exp: usize,
}

#[derive(Deserialize)]
pub struct SignInRequest {
    #[serde(rename = "idToken")]
    pub id_token: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

fn verify_identity_token(keys: &SessionKeys, token: &str) -> Result<String, ApiError> {
    decode::<IdentityClaims>(token, &keys.decoding, &Validation::default())
        .map(|data| data.claims.email)
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected identity token");
            ApiError::Unauthorized
        })
}

/// Exchanges a provider identity assertion for a session. First sign-in
/// creates the user row; the OAuth dance itself happens upstream.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = verify_identity_token(&state.session, &payload.id_token)?;
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::Unauthorized);
    }

    let user = users::queries::upsert_by_email(&state.db, &email).await?;

    let token = issue_session_token(&state.session, &user.email)?;
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, SESSION_COOKIE_MAX_AGE_SECS
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse { token, user }),
    ))
}

pub async fn sign_out() -> impl IntoResponse {
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    );

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "Signed out" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, Header};

    #[test]
    fn identity_token_yields_its_email() {
        let keys = SessionKeys::new(b"test-secret");
        let claims = IdentityClaims {
            email: "person@example.com".into(),
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();

        assert_eq!(
            verify_identity_token(&keys, &token).unwrap(),
            "person@example.com"
        );
    }

    #[test]
    fn malformed_identity_token_is_unauthorized() {
        let keys = SessionKeys::new(b"test-secret");

        assert!(matches!(
            verify_identity_token(&keys, "not-a-jwt"),
            Err(ApiError::Unauthorized)
        ));
    }
}
