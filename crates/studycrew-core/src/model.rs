//! Core data model types for studycrew.
//!
//! These mirror the JSON records exchanged with the backend: users, courses,
//! assistants and assistant course assignments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a user bio, in characters.
pub const MAX_BIO_CHARS: usize = 70;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Credit hours assumed when a course record omits them.
pub const DEFAULT_CREDIT_HOURS: u32 = 3;

/// Academic year of a student, 1 (Freshman) through 4 (Senior).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AcademicYear {
    Freshman = 1,
    Sophomore = 2,
    Junior = 3,
    Senior = 4,
}

impl AcademicYear {
    /// All years in ascending order.
    pub const ALL: [AcademicYear; 4] = [
        AcademicYear::Freshman,
        AcademicYear::Sophomore,
        AcademicYear::Junior,
        AcademicYear::Senior,
    ];

    /// Numeric value (1–4).
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Label used in course records (e.g. "Sophomore").
    pub fn label(self) -> &'static str {
        match self {
            AcademicYear::Freshman => "Freshman",
            AcademicYear::Sophomore => "Sophomore",
            AcademicYear::Junior => "Junior",
            AcademicYear::Senior => "Senior",
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(AcademicYear::Freshman),
            2 => Some(AcademicYear::Sophomore),
            3 => Some(AcademicYear::Junior),
            4 => Some(AcademicYear::Senior),
            _ => None,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|y| y.label() == label)
    }
}

impl TryFrom<u8> for AcademicYear {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n).ok_or_else(|| format!("academic year must be 1-4, got {n}"))
    }
}

impl From<AcademicYear> for u8 {
    fn from(year: AcademicYear) -> u8 {
        year.number()
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AcademicYear {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return Self::try_from(n);
        }
        Self::ALL
            .into_iter()
            .find(|y| y.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown academic year: {trimmed}"))
    }
}

/// One of the two semesters of an academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Semester {
    #[serde(rename = "Semester 1")]
    First,
    #[serde(rename = "Semester 2")]
    Second,
}

impl Semester {
    pub const ALL: [Semester; 2] = [Semester::First, Semester::Second];

    /// Index stored in course records (1 or 2).
    pub fn index(self) -> u8 {
        match self {
            Semester::First => 1,
            Semester::Second => 2,
        }
    }

    /// Label sent as the `semester` query parameter.
    pub fn label(self) -> &'static str {
        match self {
            Semester::First => "Semester 1",
            Semester::Second => "Semester 2",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "semester 1" | "first" => Ok(Semester::First),
            "2" | "semester 2" | "second" => Ok(Semester::Second),
            other => Err(format!("unknown semester: {other}")),
        }
    }
}

/// Role a user acts in.
///
/// Any role string other than `assistant` (`user`, `admin`, ...) decodes as
/// [`Role::Student`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    /// Looks for assistants. Serialized as `user` to match the backend.
    #[serde(rename = "user")]
    Student,
    Assistant,
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        if role.trim().eq_ignore_ascii_case("assistant") {
            Role::Assistant
        } else {
            Role::Student
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "Student"),
            Role::Assistant => write!(f, "Teaching Assistant"),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub academic_year: AcademicYear,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Role as reported by the backend, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl User {
    /// The role this user actually acts in.
    ///
    /// First-year students are always students, whatever the backend says.
    /// Otherwise the backend's role wins, and users of year 2 and above
    /// without one are assistants.
    pub fn effective_role(&self) -> Role {
        if self.academic_year == AcademicYear::Freshman {
            return Role::Student;
        }
        self.role.unwrap_or(Role::Assistant)
    }

    /// Name for greetings, falling back to the email address.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code (e.g. "CS101").
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_hour: Option<u32>,
    /// Year label, e.g. "Freshman".
    pub year: String,
    /// Semester index, 1 or 2.
    pub semester: u8,
}

impl Course {
    pub fn credit_hours(&self) -> u32 {
        self.credit_hour.unwrap_or(DEFAULT_CREDIT_HOURS)
    }
}

/// An assistant available for a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assistant {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub courses: Vec<String>,
}

/// A course assigned to an assistant, as returned by the assignment listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedCourse {
    #[serde(flatten)]
    pub course: Course,
    #[serde(default)]
    pub is_special: bool,
}

/// Fields submitted when creating an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub academic_year: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl RegisterData {
    /// Drop empty optional fields so they are sent as absent.
    pub fn normalized(mut self) -> Self {
        self.telegram_username = self.telegram_username.filter(|s| !s.trim().is_empty());
        self.bio = self.bio.filter(|s| !s.trim().is_empty());
        self
    }
}

/// Payload of `POST /assistant_courses/bulk_update_with_availability`.
///
/// Always carries the full selection; the backend replaces what it had.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUpdateRequest {
    pub assistant_id: u64,
    pub course_ids: Vec<String>,
    pub special_course_codes: Vec<String>,
    #[serde(default)]
    pub availability_updates: Vec<serde_json::Value>,
}

/// Token and user returned by sign-in and registration.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(year: AcademicYear, role: Option<Role>) -> User {
        User {
            id: 7,
            name: "Ada".into(),
            email: "ada@bits.edu".into(),
            academic_year: year,
            telegram_username: None,
            bio: None,
            role,
        }
    }

    #[test]
    fn freshman_is_always_student() {
        let u = user(AcademicYear::Freshman, Some(Role::Assistant));
        assert_eq!(u.effective_role(), Role::Student);
    }

    #[test]
    fn senior_defaults_to_assistant() {
        assert_eq!(
            user(AcademicYear::Senior, None).effective_role(),
            Role::Assistant
        );
        assert_eq!(
            user(AcademicYear::Senior, Some(Role::Student)).effective_role(),
            Role::Student
        );
    }

    #[test]
    fn academic_year_parsing() {
        assert_eq!("2".parse::<AcademicYear>(), Ok(AcademicYear::Sophomore));
        assert_eq!("junior".parse::<AcademicYear>(), Ok(AcademicYear::Junior));
        assert!("5".parse::<AcademicYear>().is_err());
        assert!(serde_json::from_str::<AcademicYear>("0").is_err());
    }

    #[test]
    fn semester_labels() {
        assert_eq!(Semester::Second.label(), "Semester 2");
        assert_eq!("semester 1".parse::<Semester>(), Ok(Semester::First));
        assert_eq!(
            serde_json::to_string(&Semester::First).unwrap(),
            "\"Semester 1\""
        );
    }

    #[test]
    fn user_deserializes_backend_shape() {
        let json = r#"{
            "id": 3,
            "name": "Sam",
            "email": "sam@bits.edu",
            "academic_year": 1,
            "role": "user"
        }"#;
        let u: User = serde_json::from_str(json).unwrap();
        assert_eq!(u.academic_year, AcademicYear::Freshman);
        assert_eq!(u.role, Some(Role::Student));
        assert!(u.bio.is_none());
    }

    #[test]
    fn unknown_role_decodes_as_student() {
        let json = r#"{"id":9,"name":"Root","email":"root@bits.edu","academic_year":4,"role":"admin"}"#;
        let u: User = serde_json::from_str(json).unwrap();
        assert_eq!(u.role, Some(Role::Student));
        assert_eq!(u.effective_role(), Role::Student);

        let assistant: Role = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(assistant, Role::Assistant);
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"user\"");
    }

    #[test]
    fn course_default_credit_hours() {
        let c: Course = serde_json::from_str(
            r#"{"code":"CS101","name":"Intro","year":"Freshman","semester":1}"#,
        )
        .unwrap();
        assert_eq!(c.credit_hours(), 3);
    }

    #[test]
    fn assigned_course_flattens_course_fields() {
        let a: AssignedCourse = serde_json::from_str(
            r#"{"code":"MA201","name":"Calculus","year":"Sophomore","semester":2,"is_special":true}"#,
        )
        .unwrap();
        assert_eq!(a.course.code, "MA201");
        assert!(a.is_special);
    }

    #[test]
    fn register_data_drops_blank_optionals() {
        let data = RegisterData {
            name: "Ada".into(),
            email: "ada@bits.edu".into(),
            password: "password1".into(),
            academic_year: 2,
            telegram_username: Some(String::new()),
            bio: Some("  ".into()),
        }
        .normalized();
        assert!(data.telegram_username.is_none());
        assert!(data.bio.is_none());
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("bio").is_none());
    }
}
