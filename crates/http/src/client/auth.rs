//! Authentication API client methods

use super::{ApiClient, ClientError};
use crate::types::{
    LoginCodeRequest, LoginRequest, MessageResponse, RefreshTokenRequest, SignupRequest,
    TokenResponse, VerifyEmailRequest,
};
use reqwest::Method;

impl ApiClient {
    /// Register a new account; the server mails a verification code
    pub async fn signup(&self, request: &SignupRequest) -> Result<MessageResponse, ClientError> {
        let req = self.request(Method::POST, "/auth/signup").json(request);
        self.execute(req).await
    }

    /// Confirm an email address with the mailed code
    pub async fn verify_email(
        &self,
        request: &VerifyEmailRequest,
    ) -> Result<MessageResponse, ClientError> {
        let req = self.request(Method::POST, "/auth/verify-email").json(request);
        self.execute(req).await
    }

    /// Ask the server to mail a one-time login code
    pub async fn request_login_otp(&self, email: &str) -> Result<MessageResponse, ClientError> {
        let req = self
            .request(Method::POST, "/auth/request-login-otp")
            .json(&LoginCodeRequest {
                email: email.to_string(),
            });
        self.execute(req).await
    }

    /// Exchange email and one-time code for a token pair
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        let req = self.request(Method::POST, "/auth/login").json(request);
        self.execute(req).await
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ClientError> {
        let req = self
            .request(Method::POST, "/auth/refresh")
            .json(&RefreshTokenRequest {
                refresh_token: refresh_token.to_string(),
            });
        self.execute(req).await
    }
}
