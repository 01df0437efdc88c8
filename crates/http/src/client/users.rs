//! Current-user API client methods

use super::{ApiClient, ClientError};
use crate::types::User;
use reqwest::Method;

impl ApiClient {
    /// Get the signed-in user's profile
    pub async fn current_user(&self) -> Result<User, ClientError> {
        let request = self.request(Method::GET, "/users/me");
        self.execute(request).await
    }
}
