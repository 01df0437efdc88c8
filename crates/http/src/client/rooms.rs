//! Room API client methods

use super::{ApiClient, ClientError};
use crate::types::{
    InviteCodeResponse, JoinRoomRequest, JoinRoomResponse, MessageResponse, Room, RoomCreate,
    RoomFreeSlotsResponse, RoomInviteRequest, Webhook, WebhookCreate, Weekday,
};
use reqwest::Method;

impl ApiClient {
    /// Rooms the current user belongs to
    pub async fn list_rooms(&self) -> Result<Vec<Room>, ClientError> {
        let request = self.request(Method::GET, "/rooms");
        self.execute(request).await
    }

    /// Room detail including members
    pub async fn get_room(&self, room_id: &str) -> Result<Room, ClientError> {
        let request = self.request(Method::GET, &format!("/rooms/{room_id}"));
        self.execute(request).await
    }

    pub async fn create_room(&self, room: &RoomCreate) -> Result<Room, ClientError> {
        let request = self.request(Method::POST, "/rooms").json(room);
        self.execute(request).await
    }

    pub async fn delete_room(&self, room_id: &str) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/rooms/{room_id}"));
        self.execute_empty(request).await
    }

    /// Invite someone to a room by email
    pub async fn invite_to_room(
        &self,
        room_id: &str,
        email: &str,
    ) -> Result<MessageResponse, ClientError> {
        let request = self
            .request(Method::POST, &format!("/rooms/{room_id}/invite"))
            .json(&RoomInviteRequest {
                email: email.to_string(),
            });
        self.execute(request).await
    }

    pub async fn invite_code(&self, room_id: &str) -> Result<InviteCodeResponse, ClientError> {
        let request = self.request(Method::GET, &format!("/rooms/{room_id}/invite-code"));
        self.execute(request).await
    }

    /// Replace the room's invite code; the old code stops working
    pub async fn regenerate_invite_code(
        &self,
        room_id: &str,
    ) -> Result<InviteCodeResponse, ClientError> {
        let request = self.request(
            Method::POST,
            &format!("/rooms/{room_id}/regenerate-invite-code"),
        );
        self.execute(request).await
    }

    /// Join a room with an invite code
    pub async fn join_room_by_code(
        &self,
        invite_code: &str,
    ) -> Result<JoinRoomResponse, ClientError> {
        let request = self
            .request(Method::POST, "/rooms/join")
            .json(&JoinRoomRequest {
                invite_code: invite_code.to_string(),
            });
        self.execute(request).await
    }

    /// Free time shared by the room's members on a weekday, computed server-side
    pub async fn room_free_slots(
        &self,
        room_id: &str,
        weekday: Weekday,
        template_id: Option<i64>,
    ) -> Result<RoomFreeSlotsResponse, ClientError> {
        let mut query = vec![("weekday", weekday.to_string())];
        if let Some(template_id) = template_id {
            query.push(("template_id", template_id.to_string()));
        }

        let request = self
            .request(Method::GET, &format!("/rooms/{room_id}/members/free-slots"))
            .query(&query);
        self.execute(request).await
    }

    pub async fn list_webhooks(&self, room_id: &str) -> Result<Vec<Webhook>, ClientError> {
        let request = self.request(Method::GET, &format!("/rooms/{room_id}/webhooks"));
        self.execute(request).await
    }

    pub async fn create_webhook(&self, room_id: &str, url: &str) -> Result<Webhook, ClientError> {
        let request = self
            .request(Method::POST, &format!("/rooms/{room_id}/webhooks"))
            .json(&WebhookCreate {
                url: url.to_string(),
            });
        self.execute(request).await
    }

    pub async fn delete_webhook(&self, room_id: &str, webhook_id: &str) -> Result<(), ClientError> {
        let request = self.request(
            Method::DELETE,
            &format!("/rooms/{room_id}/webhooks/{webhook_id}"),
        );
        self.execute_empty(request).await
    }
}
