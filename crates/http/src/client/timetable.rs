//! Timetable API client methods

use super::{ApiClient, ClientError};
use crate::types::{
    FreeSlotsResponse, Timetable, TimetableData, TimetableSave, TimetableTemplate,
    TimetableTemplateCreate, Weekday,
};
use reqwest::Method;

impl ApiClient {
    /// Approved period templates, one per school
    pub async fn timetable_templates(&self) -> Result<Vec<TimetableTemplate>, ClientError> {
        let request = self.request(Method::GET, "/timetable/templates");
        self.execute(request).await
    }

    pub async fn timetable(&self) -> Result<Timetable, ClientError> {
        let request = self.request(Method::GET, "/timetable");
        self.execute(request).await
    }

    /// Replace the current user's timetable
    pub async fn save_timetable(&self, data: &TimetableData) -> Result<Timetable, ClientError> {
        let request = self
            .request(Method::POST, "/timetable")
            .json(&TimetableSave { data: data.clone() });
        self.execute(request).await
    }

    /// Gaps in the current user's timetable on a weekday, computed server-side
    pub async fn free_slots(&self, weekday: Weekday) -> Result<FreeSlotsResponse, ClientError> {
        let request = self
            .request(Method::GET, "/timetable/free-slots")
            .query(&[("weekday", weekday.as_str())]);
        self.execute(request).await
    }

    /// Submit a period template for admin review
    pub async fn submit_template(
        &self,
        template: &TimetableTemplateCreate,
    ) -> Result<TimetableTemplate, ClientError> {
        let request = self
            .request(Method::POST, "/timetable/templates/submit")
            .json(template);
        self.execute(request).await
    }
}
