//! Role-gated dashboard selection.
//!
//! Students browse courses of their own year and earlier; assistants can only
//! help with courses of years they have already completed.

use serde::Serialize;

use crate::model::{AcademicYear, Role, Semester, User};

/// Message shown when a first-year student opens the assistant dashboard.
pub const ASSISTANT_DENIED_MESSAGE: &str = "1st year students are not eligible to become teaching assistants. You must be at least in your 2nd year to assist courses.";

/// Which dashboard a user lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardKind {
    Student,
    Assistant,
}

/// Dashboard state derived from the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub kind: DashboardKind,
    /// Years whose courses the user may open, ascending.
    pub eligible_years: Vec<AcademicYear>,
    /// Year selected when the dashboard opens.
    pub initial_year: Option<AcademicYear>,
    pub initial_semester: Semester,
}

impl DashboardView {
    fn new(kind: DashboardKind, eligible_years: Vec<AcademicYear>) -> Self {
        Self {
            kind,
            initial_year: eligible_years.first().copied(),
            eligible_years,
            initial_semester: Semester::First,
        }
    }

    pub fn allows(&self, year: AcademicYear) -> bool {
        self.eligible_years.contains(&year)
    }
}

/// Why the assistant dashboard was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", ASSISTANT_DENIED_MESSAGE)]
pub struct AccessDenied;

/// Years a student may browse: every year up to and including their own.
pub fn student_years(year: AcademicYear) -> Vec<AcademicYear> {
    AcademicYear::ALL
        .into_iter()
        .filter(|y| *y <= year)
        .collect()
}

/// Years an assistant may help with: every year strictly before their own.
pub fn assistant_years(year: AcademicYear) -> Vec<AcademicYear> {
    AcademicYear::ALL
        .into_iter()
        .filter(|y| *y < year)
        .collect()
}

/// The student dashboard, open to everyone.
pub fn student_dashboard(user: &User) -> DashboardView {
    DashboardView::new(DashboardKind::Student, student_years(user.academic_year))
}

/// The assistant dashboard; first-year students are refused.
///
/// The stored role only decides where a user lands (see [`select_dashboard`]);
/// any student from the 2nd year on may open this dashboard.
pub fn assistant_dashboard(user: &User) -> Result<DashboardView, AccessDenied> {
    if user.academic_year == AcademicYear::Freshman {
        return Err(AccessDenied);
    }
    Ok(DashboardView::new(
        DashboardKind::Assistant,
        assistant_years(user.academic_year),
    ))
}

/// Pick the dashboard for a user from their effective role.
pub fn select_dashboard(user: &User) -> DashboardView {
    match user.effective_role() {
        Role::Assistant => assistant_dashboard(user).unwrap_or_else(|_| student_dashboard(user)),
        Role::Student => student_dashboard(user),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(year: AcademicYear, role: Option<Role>) -> User {
        User {
            id: 1,
            name: "Test User".into(),
            email: "test@bits.edu".into(),
            academic_year: year,
            telegram_username: None,
            bio: None,
            role,
        }
    }

    #[test]
    fn freshman_denied_assistant_dashboard_for_any_role() {
        for role in [None, Some(Role::Assistant), Some(Role::Student)] {
            let u = user(AcademicYear::Freshman, role);
            assert_eq!(assistant_dashboard(&u), Err(AccessDenied));
            assert_eq!(select_dashboard(&u).kind, DashboardKind::Student);
        }
    }

    #[test]
    fn junior_assistant_helps_earlier_years() {
        let view = select_dashboard(&user(AcademicYear::Junior, None));
        assert_eq!(view.kind, DashboardKind::Assistant);
        assert_eq!(
            view.eligible_years,
            vec![AcademicYear::Freshman, AcademicYear::Sophomore]
        );
        assert_eq!(view.initial_year, Some(AcademicYear::Freshman));
        assert!(!view.allows(AcademicYear::Junior));
    }

    #[test]
    fn student_sees_own_year() {
        let view = student_dashboard(&user(AcademicYear::Sophomore, Some(Role::Student)));
        assert_eq!(
            view.eligible_years,
            vec![AcademicYear::Freshman, AcademicYear::Sophomore]
        );
        assert_eq!(view.initial_semester, Semester::First);
    }

    #[test]
    fn explicit_student_role_gets_student_dashboard() {
        let view = select_dashboard(&user(AcademicYear::Senior, Some(Role::Student)));
        assert_eq!(view.kind, DashboardKind::Student);
        assert_eq!(view.eligible_years.len(), 4);
    }

    #[test]
    fn senior_with_student_role_may_still_assist() {
        let u = user(AcademicYear::Senior, Some(Role::Student));
        let view = assistant_dashboard(&u).unwrap();
        assert_eq!(view.kind, DashboardKind::Assistant);
        assert_eq!(view.eligible_years.len(), 3);
        assert!(!view.allows(AcademicYear::Senior));
        assert_eq!(select_dashboard(&u).kind, DashboardKind::Student);
    }

    #[test]
    fn denied_message() {
        assert!(AccessDenied.to_string().starts_with("1st year students"));
    }
}
