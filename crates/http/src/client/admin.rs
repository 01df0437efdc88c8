//! Administration API client methods

use super::{ApiClient, ClientError};
use crate::types::{
    MessageResponse, TemplateReview, TimetableTemplate, TimetableTemplateCreate, User,
    UserListResponse, UserUpdate,
};
use reqwest::Method;

impl ApiClient {
    /// List users with offset pagination
    pub async fn list_users(&self, skip: u32, limit: u32) -> Result<UserListResponse, ClientError> {
        let request = self
            .request(Method::GET, "/admin/users")
            .query(&[("skip", skip), ("limit", limit)]);
        self.execute(request).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, ClientError> {
        let request = self.request(Method::GET, &format!("/admin/users/{user_id}"));
        self.execute(request).await
    }

    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/admin/users/{user_id}"))
            .json(update);
        self.execute(request).await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::DELETE, &format!("/admin/users/{user_id}"));
        self.execute(request).await
    }

    /// Templates submitted by users and awaiting review
    pub async fn pending_templates(&self) -> Result<Vec<TimetableTemplate>, ClientError> {
        let request = self.request(Method::GET, "/admin/templates/pending");
        self.execute(request).await
    }

    /// Create an approved template directly
    pub async fn create_template(
        &self,
        template: &TimetableTemplateCreate,
    ) -> Result<TimetableTemplate, ClientError> {
        let request = self.request(Method::POST, "/admin/templates").json(template);
        self.execute(request).await
    }

    pub async fn review_template(
        &self,
        template_id: i64,
        review: TemplateReview,
    ) -> Result<(), ClientError> {
        let request = self
            .request(
                Method::POST,
                &format!("/admin/templates/{template_id}/review"),
            )
            .json(&review);
        self.execute_empty(request).await
    }
}
