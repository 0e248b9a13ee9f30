//! Assistant course assignment editing and reconciliation.
//!
//! The backend always receives the full selection as a replacement list. The
//! diff against the previously assigned set only feeds the success message.

use std::collections::BTreeSet;

use crate::model::{AssignedCourse, BulkUpdateRequest, Course};

/// Courses assigned to an assistant, with the subset flagged special.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantCourseAssignment {
    pub courses: BTreeSet<String>,
    pub special: BTreeSet<String>,
}

impl AssistantCourseAssignment {
    /// Build from the assignment listing. Special codes are always assigned.
    pub fn from_assigned(assigned: &[AssignedCourse]) -> Self {
        let courses = assigned.iter().map(|a| a.course.code.clone()).collect();
        let special = assigned
            .iter()
            .filter(|a| a.is_special)
            .map(|a| a.course.code.clone())
            .collect();
        Self { courses, special }
    }
}

/// Difference between two assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentDiff {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub special_added: BTreeSet<String>,
    pub special_removed: BTreeSet<String>,
}

impl AssignmentDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.special_added.is_empty()
            && self.special_removed.is_empty()
    }

    /// Message shown after a successful bulk update.
    pub fn success_message(&self) -> String {
        let mut message = format!(
            "Courses updated successfully! Added {} courses, removed {} courses.",
            self.added.len(),
            self.removed.len()
        );
        let special_added = self.special_added.len();
        if special_added > 0 {
            message.push_str(&format!(
                " Added {special_added} special course{}.",
                plural(special_added)
            ));
        }
        let special_removed = self.special_removed.len();
        if special_removed > 0 {
            message.push_str(&format!(
                " Removed {special_removed} special course{}.",
                plural(special_removed)
            ));
        }
        message
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Compute what changed between the old and new assignment.
pub fn diff(old: &AssistantCourseAssignment, new: &AssistantCourseAssignment) -> AssignmentDiff {
    AssignmentDiff {
        added: new.courses.difference(&old.courses).cloned().collect(),
        removed: old.courses.difference(&new.courses).cloned().collect(),
        special_added: new.special.difference(&old.special).cloned().collect(),
        special_removed: old.special.difference(&new.special).cloned().collect(),
    }
}

/// Editing state of the assistant dashboard.
#[derive(Debug, Clone, Default)]
pub struct AssignmentEditor {
    assigned: AssistantCourseAssignment,
    selected: AssistantCourseAssignment,
    has_changes: bool,
}

impl AssignmentEditor {
    /// Start editing from what the backend has assigned.
    pub fn new(assigned: AssistantCourseAssignment) -> Self {
        Self {
            selected: assigned.clone(),
            assigned,
            has_changes: false,
        }
    }

    pub fn from_assigned(assigned: &[AssignedCourse]) -> Self {
        Self::new(AssistantCourseAssignment::from_assigned(assigned))
    }

    pub fn assigned(&self) -> &AssistantCourseAssignment {
        &self.assigned
    }

    pub fn selection(&self) -> &AssistantCourseAssignment {
        &self.selected
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.courses.contains(code)
    }

    pub fn is_special(&self, code: &str) -> bool {
        self.selected.special.contains(code)
    }

    /// Select or deselect a course. Returns whether it is now selected.
    ///
    /// Deselecting also clears the special flag.
    pub fn toggle_course(&mut self, code: &str) -> bool {
        self.has_changes = true;
        if self.selected.courses.remove(code) {
            self.selected.special.remove(code);
            false
        } else {
            self.selected.courses.insert(code.to_string());
            true
        }
    }

    /// Flip the special flag of a selected course.
    ///
    /// Returns the new flag, or `None` if the course is not selected.
    pub fn toggle_special(&mut self, code: &str) -> Option<bool> {
        if !self.is_selected(code) {
            return None;
        }
        self.has_changes = true;
        if self.selected.special.remove(code) {
            Some(false)
        } else {
            self.selected.special.insert(code.to_string());
            Some(true)
        }
    }

    pub fn diff(&self) -> AssignmentDiff {
        diff(&self.assigned, &self.selected)
    }

    /// Full replacement payload for the current selection.
    pub fn bulk_update(&self, assistant_id: u64) -> BulkUpdateRequest {
        BulkUpdateRequest {
            assistant_id,
            course_ids: self.selected.courses.iter().cloned().collect(),
            special_course_codes: self.selected.special.iter().cloned().collect(),
            availability_updates: Vec::new(),
        }
    }

    /// Accept the selection as assigned after a successful submit.
    pub fn commit(&mut self) {
        self.assigned = self.selected.clone();
        self.has_changes = false;
    }

    /// Split courses into (selected, available), keeping their order.
    pub fn partition<'a>(&self, courses: &'a [Course]) -> (Vec<&'a Course>, Vec<&'a Course>) {
        courses.iter().partition(|c| self.is_selected(&c.code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn assignment(courses: &[&str], special: &[&str]) -> AssistantCourseAssignment {
        AssistantCourseAssignment {
            courses: set(courses),
            special: set(special),
        }
    }

    #[test]
    fn added_and_removed_are_disjoint() {
        let universe = ["A", "B", "C", "D"];
        // every pair of subsets of a four-element universe
        for old_mask in 0u8..16 {
            for new_mask in 0u8..16 {
                let pick = |mask: u8| -> Vec<&str> {
                    universe
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| mask & (1 << i) != 0)
                        .map(|(_, c)| *c)
                        .collect()
                };
                let old = assignment(&pick(old_mask), &[]);
                let new = assignment(&pick(new_mask), &[]);
                let d = diff(&old, &new);
                assert!(d.added.is_disjoint(&d.removed));
                assert!(d.added.is_subset(&new.courses));
                assert!(d.removed.is_subset(&old.courses));
            }
        }
    }

    #[test]
    fn diff_counts_specials() {
        let old = assignment(&["CS101", "CS102"], &["CS101"]);
        let new = assignment(&["CS102", "MA101"], &["MA101"]);
        let d = diff(&old, &new);
        assert_eq!(d.added, set(&["MA101"]));
        assert_eq!(d.removed, set(&["CS101"]));
        assert_eq!(d.special_added, set(&["MA101"]));
        assert_eq!(d.special_removed, set(&["CS101"]));
        assert_eq!(
            d.success_message(),
            "Courses updated successfully! Added 1 courses, removed 1 courses. Added 1 special course. Removed 1 special course."
        );
    }

    #[test]
    fn message_without_special_changes() {
        let old = assignment(&[], &[]);
        let new = assignment(&["A", "B"], &[]);
        assert_eq!(
            diff(&old, &new).success_message(),
            "Courses updated successfully! Added 2 courses, removed 0 courses."
        );
    }

    #[test]
    fn editor_tracks_changes_and_commits() {
        let mut editor = AssignmentEditor::new(assignment(&["CS101"], &["CS101"]));
        assert!(!editor.has_changes());

        assert!(editor.toggle_course("CS201"));
        assert_eq!(editor.toggle_special("CS201"), Some(true));
        assert!(!editor.toggle_course("CS101"));
        assert!(!editor.is_special("CS101"));
        assert!(editor.has_changes());

        let request = editor.bulk_update(9);
        assert_eq!(request.assistant_id, 9);
        assert_eq!(request.course_ids, vec!["CS201".to_string()]);
        assert_eq!(request.special_course_codes, vec!["CS201".to_string()]);
        assert!(request.availability_updates.is_empty());

        let d = editor.diff();
        assert_eq!(d.added, set(&["CS201"]));
        assert_eq!(d.removed, set(&["CS101"]));

        editor.commit();
        assert!(!editor.has_changes());
        assert!(editor.diff().is_empty());
    }

    #[test]
    fn special_requires_selection() {
        let mut editor = AssignmentEditor::default();
        assert_eq!(editor.toggle_special("CS101"), None);
        assert!(!editor.has_changes());
        assert!(editor.selection().special.is_subset(&editor.selection().courses));
    }

    #[test]
    fn from_assigned_listing() {
        let listing: Vec<AssignedCourse> = serde_json::from_str(
            r#"[
                {"code":"CS101","name":"Intro","year":"Freshman","semester":1,"is_special":true},
                {"code":"CS102","name":"Data","year":"Freshman","semester":2}
            ]"#,
        )
        .unwrap();
        let editor = AssignmentEditor::from_assigned(&listing);
        assert_eq!(editor.assigned().courses, set(&["CS101", "CS102"]));
        assert_eq!(editor.assigned().special, set(&["CS101"]));

        let courses: Vec<Course> = listing.into_iter().map(|a| a.course).collect();
        let mut editor = editor;
        editor.toggle_course("CS102");
        let (selected, available) = editor.partition(&courses);
        assert_eq!(selected.len(), 1);
        assert_eq!(available[0].code, "CS102");
    }
}
