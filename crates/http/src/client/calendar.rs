//! Calendar linking API client methods

use super::{ApiClient, ClientError};
use crate::types::{AppleConnectRequest, CalendarStatus, GoogleAuthResponse, MessageResponse};
use reqwest::Method;

impl ApiClient {
    /// URL the user visits to grant Google Calendar access
    pub async fn google_auth_url(&self) -> Result<GoogleAuthResponse, ClientError> {
        let request = self.request(Method::GET, "/calendar/google/auth");
        self.execute(request).await
    }

    pub async fn google_status(&self) -> Result<CalendarStatus, ClientError> {
        let request = self.request(Method::GET, "/calendar/google/status");
        self.execute(request).await
    }

    /// Link an Apple calendar with an app-specific password
    pub async fn connect_apple(
        &self,
        credentials: &AppleConnectRequest,
    ) -> Result<MessageResponse, ClientError> {
        let request = self
            .request(Method::POST, "/calendar/apple/connect")
            .json(credentials);
        self.execute(request).await
    }

    pub async fn apple_status(&self) -> Result<CalendarStatus, ClientError> {
        let request = self.request(Method::GET, "/calendar/apple/status");
        self.execute(request).await
    }
}
