//! REST client for the Lanceraa backend auth endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to `Result<T, ApiError>`. Non-2xx responses keep the
//! server's message for verbatim display; transport failures and malformed
//! JSON collapse into `ApiError::Network` since the UI renders them the same.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::http::{HttpClient, HttpRequest, HttpResponse};
use super::types::{
    CheckEmailRequest, CheckEmailResponse, ErrorBody, InitialSignupRequest, InitialSignupResponse,
    LoginResponse, MeResponse, ResendVerificationRequest, ResendVerificationResponse, SignupProfile,
    SignupResponse, User, VerifyEmailRequest,
};

/// Fixed text for transport and parse failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Header the backend sets on verification failures caused by an expired code.
pub const ERROR_CODE_HEADER: &str = "X-Error-Code";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Http {
        status: u16,
        /// Server-provided `detail`/`error`/`message`, if any.
        detail: Option<String>,
        /// Value of `X-Error-Code`, if present.
        error_code: Option<String>,
    },
    /// No usable response: transport failure or undecodable body.
    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Message for the alert banner: server detail verbatim, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Http { detail: Some(detail), .. } => detail.clone(),
            Self::Http { detail: None, .. } => fallback.to_owned(),
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_owned(),
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) => None,
        }
    }
}

#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/api/auth/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// REST client over `fetch` rooted at the configured base URL.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn browser_api() -> ApiClient<super::http::GlooHttp> {
    ApiClient::new(super::http::GlooHttp, crate::config::api_base_url())
}

/// Typed wrapper over an `HttpClient` rooted at the API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient<H> {
    http: H,
    base_url: String,
}

impl<H: HttpClient> ApiClient<H> {
    pub fn new(http: H, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into() }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST check-email`: does an account exist, and is it active.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    pub async fn check_email(&self, email: &str) -> Result<CheckEmailResponse, ApiError> {
        let req = HttpRequest::post(self.url("check-email")).json(to_json(&CheckEmailRequest { email })?);
        self.call(req).await
    }

    /// `POST login` with an OAuth2 password-grant form body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx response, or a
    /// success body without an access token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let req = HttpRequest::post(self.url("login")).form(&[("username", username), ("password", password)]);
        let resp: LoginResponse = self.call(req).await?;
        if resp.user.is_active && resp.bearer().is_none() {
            return Err(ApiError::Network("login response missing access token".to_owned()));
        }
        Ok(resp)
    }

    /// `POST signup/initial`: first phase of the two-step signup.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    pub async fn signup_initial(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<InitialSignupResponse, ApiError> {
        let body = InitialSignupRequest { email, password, confirm_password };
        let req = HttpRequest::post(self.url("signup/initial")).json(to_json(&body)?);
        self.call(req).await
    }

    /// `POST signup` with a full profile (single-phase registration).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    pub async fn signup(&self, profile: &SignupProfile) -> Result<SignupResponse, ApiError> {
        let req = HttpRequest::post(self.url("signup")).json(to_json(profile)?);
        self.call(req).await
    }

    /// `POST resend-verification` by user id or email.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx response.
    pub async fn resend_verification(
        &self,
        target: ResendVerificationRequest<'_>,
    ) -> Result<ResendVerificationResponse, ApiError> {
        let req = HttpRequest::post(self.url("resend-verification")).json(to_json(&target)?);
        self.call(req).await
    }

    /// `POST verify-email`. The success body is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` with `error_code` populated from
    /// `X-Error-Code` when the backend rejects the code.
    pub async fn verify_email(&self, user_id: &str, code: &str) -> Result<(), ApiError> {
        let body = VerifyEmailRequest { user_id, verification_code: code };
        let req = HttpRequest::post(self.url("verify-email")).json(to_json(&body)?);
        let resp = self.send(req).await?;
        check_status(&resp)
    }

    /// `GET me` with the bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` when the token is rejected.
    pub async fn me(&self, token: &str) -> Result<User, ApiError> {
        let req = HttpRequest::get(self.url("me")).bearer(token);
        let resp: MeResponse = self.call(req).await?;
        Ok(resp.user)
    }

    /// `POST logout`. Best effort: failures are logged and otherwise ignored.
    pub async fn logout(&self, token: &str) {
        let req = HttpRequest::post(self.url("logout")).bearer(token);
        match self.send(req).await.and_then(|resp| check_status(&resp)) {
            Ok(()) => {}
            Err(e) => log::warn!("logout request failed: {e}"),
        }
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.http
            .send(req)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn call<T: DeserializeOwned>(&self, req: HttpRequest) -> Result<T, ApiError> {
        let resp = self.send(req).await?;
        check_status(&resp)?;
        serde_json::from_str(&resp.body).map_err(|e| ApiError::Network(format!("malformed response: {e}")))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Network(e.to_string()))
}

fn check_status(resp: &HttpResponse) -> Result<(), ApiError> {
    if resp.is_success() {
        return Ok(());
    }
    let detail = serde_json::from_str::<ErrorBody>(&resp.body)
        .ok()
        .and_then(ErrorBody::into_message);
    Err(ApiError::Http {
        status: resp.status,
        detail,
        error_code: resp.header(ERROR_CODE_HEADER).map(str::to_owned),
    })
}
