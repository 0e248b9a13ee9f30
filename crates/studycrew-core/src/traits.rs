//! Core trait definitions for the backend API.
//!
//! `studycrew-client` implements [`StudyCrewApi`] over HTTP and provides a
//! mock implementation for tests.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{
    AcademicYear, AssignedCourse, Assistant, AuthSession, BulkUpdateRequest, Course,
    RegisterData, Semester,
};

/// Result alias for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Operations offered by the studycrew backend.
#[async_trait]
pub trait StudyCrewApi: Send + Sync {
    /// Install or clear the bearer token sent with every request.
    fn set_token(&self, token: Option<String>);

    /// `POST /users/sign_in`
    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<AuthSession>;

    /// `POST /users`
    async fn register(&self, data: &RegisterData) -> ApiResult<AuthSession>;

    /// `DELETE /users/sign_out`
    async fn sign_out(&self) -> ApiResult<()>;

    /// `GET /courses?year=&semester=`
    async fn courses(
        &self,
        year: Option<AcademicYear>,
        semester: Option<Semester>,
    ) -> ApiResult<Vec<Course>>;

    /// `GET /courses/:code/assistants`
    async fn assistants_for_course(&self, course_code: &str) -> ApiResult<Vec<Assistant>>;

    /// `GET /assistant_courses/by_assistant/:id`
    async fn assigned_courses(&self, assistant_id: u64) -> ApiResult<Vec<AssignedCourse>>;

    /// `POST /assistant_courses/bulk_update_with_availability`
    async fn bulk_update(&self, request: &BulkUpdateRequest) -> ApiResult<()>;
}
