//! Event API client methods
//!
//! Room events are private and voted on; public events are joined directly.

use super::{ApiClient, ClientError};
use crate::types::{
    Event, EventAttendee, EventVote, EventVoteResponse, MessageResponse, PrivateEventCreate,
    PublicEventCreate, PublicEventQuery,
};
use reqwest::Method;

impl ApiClient {
    /// Propose an event inside a room
    pub async fn create_room_event(
        &self,
        room_id: &str,
        event: &PrivateEventCreate,
    ) -> Result<Event, ClientError> {
        let request = self
            .request(Method::POST, &format!("/rooms/{room_id}/events"))
            .json(event);
        self.execute(request).await
    }

    pub async fn room_events(&self, room_id: &str) -> Result<Vec<Event>, ClientError> {
        let request = self.request(Method::GET, &format!("/rooms/{room_id}/events"));
        self.execute(request).await
    }

    /// Vote on one of a room event's proposed times
    pub async fn vote_event(
        &self,
        room_id: &str,
        event_id: &str,
        vote: &EventVote,
    ) -> Result<EventVoteResponse, ClientError> {
        let request = self
            .request(
                Method::POST,
                &format!("/rooms/{room_id}/events/{event_id}/vote"),
            )
            .json(vote);
        self.execute(request).await
    }

    /// Browse public events; only the filters that are set are sent
    pub async fn public_events(&self, query: &PublicEventQuery) -> Result<Vec<Event>, ClientError> {
        let request = self.request(Method::GET, "/events/public").query(query);
        self.execute(request).await
    }

    pub async fn create_public_event(&self, event: &PublicEventCreate) -> Result<Event, ClientError> {
        let request = self.request(Method::POST, "/events/public").json(event);
        self.execute(request).await
    }

    pub async fn get_event(&self, event_id: &str) -> Result<Event, ClientError> {
        let request = self.request(Method::GET, &format!("/events/{event_id}"));
        self.execute(request).await
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/events/{event_id}"));
        self.execute_empty(request).await
    }

    pub async fn join_event(&self, event_id: &str) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::POST, &format!("/events/{event_id}/join"));
        self.execute(request).await
    }

    pub async fn leave_event(&self, event_id: &str) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::POST, &format!("/events/{event_id}/leave"));
        self.execute(request).await
    }

    pub async fn event_attendees(&self, event_id: &str) -> Result<Vec<EventAttendee>, ClientError> {
        let request = self.request(Method::GET, &format!("/events/{event_id}/attendees"));
        self.execute(request).await
    }
}
