//! Dashboard flows built on top of the API: term course lists and the
//! assistant's course selection.

use tracing::{info, instrument};

use studycrew_core::access::DashboardView;
use studycrew_core::catalog::filter_courses;
use studycrew_core::error::ApiError;
use studycrew_core::model::{AcademicYear, Course, Semester, User};
use studycrew_core::reconcile::AssignmentEditor;
use studycrew_core::traits::{ApiResult, StudyCrewApi};

const UPDATE_FAILED_PREFIX: &str = "An error occurred while updating courses: ";

/// Fetch the courses of one term, limited to years the dashboard allows.
#[instrument(skip(api, view), fields(kind = ?view.kind))]
pub async fn term_courses(
    api: &dyn StudyCrewApi,
    view: &DashboardView,
    year: AcademicYear,
    semester: Semester,
) -> ApiResult<Vec<Course>> {
    if !view.allows(year) {
        return Err(ApiError::Validation(format!(
            "{year} courses are not available on this dashboard"
        )));
    }
    let courses = api.courses(Some(year), Some(semester)).await?;
    Ok(filter_courses(&courses, year, semester))
}

/// Load the assistant's current assignment into an editor.
pub async fn load_editor(api: &dyn StudyCrewApi, user: &User) -> ApiResult<AssignmentEditor> {
    let assigned = api.assigned_courses(user.id).await?;
    Ok(AssignmentEditor::from_assigned(&assigned))
}

/// Submit the editor's selection as a full replacement.
///
/// On success the selection becomes the assigned set and the success message
/// is returned. On failure the editor is left untouched.
#[instrument(skip(api, user, editor), fields(assistant_id = user.id))]
pub async fn submit_selection(
    api: &dyn StudyCrewApi,
    user: &User,
    editor: &mut AssignmentEditor,
) -> ApiResult<String> {
    let diff = editor.diff();
    let request = editor.bulk_update(user.id);
    api.bulk_update(&request)
        .await
        .map_err(|e| e.prefixed(UPDATE_FAILED_PREFIX))?;
    editor.commit();
    info!(
        added = diff.added.len(),
        removed = diff.removed.len(),
        "assignment updated"
    );
    Ok(diff.success_message())
}
