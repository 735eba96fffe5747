use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use axum::{
    body::Body,
    extract::State,
    http::{
        header::{AUTHORIZATION, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, Request,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kepengen_core::accounts::{Account, AccountRepositoryTrait, NewAccount};
use kepengen_core::errors::{Error as CoreError, ErrorKind, ValidationError};
use kepengen_core::identity::{Identity, IdentityResolverTrait};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{
    AccountDto, IdentityDto, LoginRequest, MessageResponse, RegisterRequest, SessionResponse,
};

/// Name of the session cookie set on login and register.
pub const TOKEN_COOKIE: &str = "token";

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    InvalidCredentials,
    Internal(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

impl AuthManager {
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            validation,
            token_ttl,
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Failed to hash password: {e}")))
    }

    pub fn verify_password(&self, candidate: &str, password_hash: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::Internal(format!("Stored password hash is invalid: {e}")))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => AuthError::InvalidCredentials,
                other => AuthError::Internal(format!("Password verification failed: {other}")),
            })
    }

    pub fn issue_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Verifies signature and expiry and returns the subject (account id).
    pub fn validate_token(&self, token: &str) -> Result<String, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::Unauthorized
                }
                other => AuthError::Internal(format!("Failed to validate token: {other:?}")),
            })
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }

    fn session_cookie(&self, token: &str) -> String {
        format!(
            "{TOKEN_COOKIE}={token}; Path=/; HttpOnly; Secure; SameSite=None; Max-Age={}",
            self.token_ttl.as_secs()
        )
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ApiError::Unauthorized("Unauthorized".to_string()),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

/// Resolves session tokens against the account store.
///
/// The role is always reloaded from the stored account, so a demoted or
/// deleted account loses its privileges on the next request.
pub struct TokenIdentityResolver {
    auth: Arc<AuthManager>,
    accounts: Arc<dyn AccountRepositoryTrait>,
}

impl TokenIdentityResolver {
    pub fn new(auth: Arc<AuthManager>, accounts: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { auth, accounts }
    }
}

impl IdentityResolverTrait for TokenIdentityResolver {
    fn resolve_identity(&self, credential: &str) -> Option<Identity> {
        let user_id = self.auth.validate_token(credential).ok()?;
        match self.accounts.get_by_id(&user_id) {
            Ok(account) => Some(account.identity()),
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!("Identity lookup failed for {}: {}", user_id, e);
                }
                None
            }
        }
    }
}

/// Identity resolved for the current request, if any.
#[derive(Clone, Debug, Default)]
pub struct CurrentIdentity(pub Option<Identity>);

impl CurrentIdentity {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    /// Owner id used to scope goal operations. Empty when anonymous; the
    /// access guard rejects those calls before any lookup.
    pub fn owner_id(&self) -> &str {
        self.0.as_ref().map(|i| i.user_id.as_str()).unwrap_or_default()
    }
}

/// Reads the session credential from `Authorization: Bearer` or the
/// `token` cookie.
pub fn extract_credential(headers: &HeaderMap) -> Option<String> {
    if let Some(header) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        let mut parts = header.splitn(2, ' ');
        if let (Some(scheme), Some(token)) = (parts.next(), parts.next()) {
            let token = token.trim();
            if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Attaches a [`CurrentIdentity`] to every request. Never rejects: the
/// access guard decides what an anonymous caller may do.
pub async fn resolve_identity(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let identity = extract_credential(request.headers())
        .and_then(|credential| state.identity_resolver.resolve_identity(&credential));
    request.extensions_mut().insert(CurrentIdentity(identity));
    next.run(request).await
}

fn session_response(auth: &AuthManager, account: Account, token: String) -> ApiResult<Response> {
    let cookie = HeaderValue::from_str(&auth.session_cookie(&token))
        .map_err(|e| ApiError::Internal(format!("Invalid session cookie: {e}")))?;
    let body = SessionResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: auth.expires_in().as_secs(),
        account: AccountDto::from(account),
    };
    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}

#[utoipa::path(post, path = "/api/v1/auth/register", request_body = RegisterRequest, responses((status = 200, body = SessionResponse)))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Response> {
    if payload.password.is_empty() {
        let missing = ValidationError::MissingField("password".to_string());
        return Err(CoreError::Validation(missing).into());
    }
    let password_credential = state.auth.hash_password(&payload.password)?;
    let account = state
        .account_service
        .register_account(NewAccount {
            email: payload.email,
            username: payload.username,
            password_credential,
        })
        .await?;
    tracing::info!("Registered account {}", account.id);
    let token = state.auth.issue_token(&account.id)?;
    session_response(&state.auth, account, token)
}

#[utoipa::path(post, path = "/api/v1/auth/login", request_body = LoginRequest, responses((status = 200, body = SessionResponse), (status = 401)))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Response> {
    let credentials = match state.account_service.find_credentials(&payload.email) {
        Ok(credentials) => credentials,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AuthError::InvalidCredentials.into())
        }
        Err(e) => return Err(e.into()),
    };
    state
        .auth
        .verify_password(&payload.password, &credentials.password_credential)?;
    let token = state.auth.issue_token(&credentials.account.id)?;
    session_response(&state.auth, credentials.account, token)
}

#[utoipa::path(post, path = "/api/v1/auth/logout", responses((status = 200, body = MessageResponse), (status = 400)))]
pub async fn logout(headers: HeaderMap) -> ApiResult<Response> {
    if extract_credential(&headers).is_none() {
        return Err(ApiError::BadRequest("No user is logged in".to_string()));
    }
    let cleared = HeaderValue::from_static(
        "token=; Path=/; HttpOnly; Secure; SameSite=None; Max-Age=0",
    );
    let body = MessageResponse {
        message: "Logout successful".to_string(),
    };
    Ok(([(SET_COOKIE, cleared)], Json(body)).into_response())
}

#[utoipa::path(get, path = "/api/v1/auth/me", responses((status = 200, body = IdentityDto), (status = 401)))]
pub async fn me(Extension(current): Extension<CurrentIdentity>) -> ApiResult<Json<IdentityDto>> {
    let identity = current.0.ok_or(CoreError::Unauthenticated)?;
    Ok(Json(IdentityDto::from(identity)))
}
