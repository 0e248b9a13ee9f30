//! In-memory backend for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use studycrew_core::catalog::matches_term;
use studycrew_core::error::ApiError;
use studycrew_core::model::{
    AcademicYear, AssignedCourse, Assistant, AuthSession, BulkUpdateRequest, Course,
    RegisterData, Role, Semester, User,
};
use studycrew_core::traits::{ApiResult, StudyCrewApi};

const SIGN_IN_REQUIRED: &str = "You need to sign in or sign up before continuing.";

/// A mock backend that keeps accounts, courses and assignments in memory.
///
/// Assignment endpoints require a token, like the real backend.
pub struct MockApi {
    /// email → (password, user)
    accounts: Mutex<HashMap<String, (String, User)>>,
    courses: Vec<Course>,
    assistants: HashMap<String, Vec<Assistant>>,
    assignments: Mutex<HashMap<u64, Vec<AssignedCourse>>>,
    token: Mutex<Option<String>>,
    /// Error returned by every call while set.
    failure: Mutex<Option<ApiError>>,
    next_id: AtomicU64,
    call_count: AtomicU32,
    last_bulk_update: Mutex<Option<BulkUpdateRequest>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            courses: Vec::new(),
            assistants: HashMap::new(),
            assignments: Mutex::new(HashMap::new()),
            token: Mutex::new(None),
            failure: Mutex::new(None),
            next_id: AtomicU64::new(100),
            call_count: AtomicU32::new(0),
            last_bulk_update: Mutex::new(None),
        }
    }

    pub fn with_account(self, user: User, password: &str) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(user.email.clone(), (password.to_string(), user));
        self
    }

    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = courses;
        self
    }

    pub fn with_assistants(mut self, course_code: &str, assistants: Vec<Assistant>) -> Self {
        self.assistants.insert(course_code.to_string(), assistants);
        self
    }

    pub fn with_assignment(self, assistant_id: u64, assigned: Vec<AssignedCourse>) -> Self {
        self.assignments
            .lock()
            .unwrap()
            .insert(assistant_id, assigned);
        self
    }

    /// Make every call fail with `error` until cleared with `None`.
    pub fn fail_with(&self, error: Option<ApiError>) {
        *self.failure.lock().unwrap() = error;
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Token most recently installed by the caller.
    pub fn current_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    pub fn last_bulk_update(&self) -> Option<BulkUpdateRequest> {
        self.last_bulk_update.lock().unwrap().clone()
    }

    fn enter(&self) -> ApiResult<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn require_token(&self) -> ApiResult<()> {
        if self.current_token().is_none() {
            return Err(ApiError::Unauthorized(SIGN_IN_REQUIRED.into()));
        }
        Ok(())
    }

    fn issue_token(user: &User) -> String {
        format!("mock-token-{}", user.id)
    }
}

#[async_trait]
impl StudyCrewApi for MockApi {
    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }

    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        self.enter()?;
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some((expected, user)) if expected == password => Ok(AuthSession {
                token: Self::issue_token(user),
                user: user.clone(),
            }),
            _ => Err(ApiError::Unauthorized("Invalid Email or password.".into())),
        }
    }

    async fn register(&self, data: &RegisterData) -> ApiResult<AuthSession> {
        self.enter()?;
        let academic_year = AcademicYear::from_number(data.academic_year).ok_or_else(|| {
            ApiError::Http {
                status: 422,
                message: "Academic year is not included in the list".into(),
            }
        })?;

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&data.email) {
            return Err(ApiError::Http {
                status: 422,
                message: "Email has already been taken".into(),
            });
        }

        let role = if academic_year >= AcademicYear::Sophomore {
            Role::Assistant
        } else {
            Role::Student
        };
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: data.name.clone(),
            email: data.email.clone(),
            academic_year,
            telegram_username: data.telegram_username.clone(),
            bio: data.bio.clone(),
            role: Some(role),
        };
        accounts.insert(data.email.clone(), (data.password.clone(), user.clone()));
        Ok(AuthSession {
            token: Self::issue_token(&user),
            user,
        })
    }

    async fn sign_out(&self) -> ApiResult<()> {
        self.enter()
    }

    async fn courses(
        &self,
        year: Option<AcademicYear>,
        semester: Option<Semester>,
    ) -> ApiResult<Vec<Course>> {
        self.enter()?;
        Ok(self
            .courses
            .iter()
            .filter(|c| match (year, semester) {
                (Some(y), Some(s)) => matches_term(c, y, s),
                (Some(y), None) => c.year == y.label(),
                (None, Some(s)) => c.semester == s.index(),
                (None, None) => true,
            })
            .cloned()
            .collect())
    }

    async fn assistants_for_course(&self, course_code: &str) -> ApiResult<Vec<Assistant>> {
        self.enter()?;
        if !self.courses.iter().any(|c| c.code == course_code) {
            return Err(ApiError::NotFound(format!("Course {course_code} not found")));
        }
        Ok(self
            .assistants
            .get(course_code)
            .cloned()
            .unwrap_or_default())
    }

    async fn assigned_courses(&self, assistant_id: u64) -> ApiResult<Vec<AssignedCourse>> {
        self.enter()?;
        self.require_token()?;
        Ok(self
            .assignments
            .lock()
            .unwrap()
            .get(&assistant_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn bulk_update(&self, request: &BulkUpdateRequest) -> ApiResult<()> {
        self.enter()?;
        self.require_token()?;

        let mut assigned = Vec::with_capacity(request.course_ids.len());
        for code in &request.course_ids {
            let course = self
                .courses
                .iter()
                .find(|c| &c.code == code)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(format!("Course {code} not found")))?;
            assigned.push(AssignedCourse {
                is_special: request.special_course_codes.contains(code),
                course,
            });
        }

        self.assignments
            .lock()
            .unwrap()
            .insert(request.assistant_id, assigned);
        *self.last_bulk_update.lock().unwrap() = Some(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, year: AcademicYear, semester: Semester) -> Course {
        Course {
            code: code.into(),
            name: format!("{code} course"),
            description: None,
            credit_hour: None,
            year: year.label().into(),
            semester: semester.index(),
        }
    }

    #[tokio::test]
    async fn courses_filtered_server_side() {
        let api = MockApi::new().with_courses(vec![
            course("CS101", AcademicYear::Freshman, Semester::First),
            course("CS102", AcademicYear::Freshman, Semester::Second),
        ]);
        let courses = api
            .courses(Some(AcademicYear::Freshman), Some(Semester::Second))
            .await
            .unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].code, "CS102");
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn bulk_update_replaces_assignment() {
        let api = MockApi::new().with_courses(vec![
            course("CS101", AcademicYear::Freshman, Semester::First),
            course("CS102", AcademicYear::Freshman, Semester::Second),
        ]);
        let request = BulkUpdateRequest {
            assistant_id: 5,
            course_ids: vec!["CS101".into(), "CS102".into()],
            special_course_codes: vec!["CS102".into()],
            availability_updates: vec![],
        };

        let err = api.bulk_update(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        api.set_token(Some("t".into()));
        api.bulk_update(&request).await.unwrap();
        let assigned = api.assigned_courses(5).await.unwrap();
        assert_eq!(assigned.len(), 2);
        assert!(assigned[1].is_special);
        assert_eq!(api.last_bulk_update(), Some(request));
    }

    #[tokio::test]
    async fn unknown_course_assistants_not_found() {
        let api = MockApi::new();
        let err = api.assistants_for_course("NOPE").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
