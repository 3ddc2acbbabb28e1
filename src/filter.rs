//! Composable filtering over the session collection. Checkbox options are
//! a flat OR across every checked option regardless of group (union
//! semantics), while the single-select dropdowns AND against everything
//! else. The two passes are kept separate on purpose; do not fold them
//! into one reducer.

use crate::model::AttendanceSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterGroup {
    Level,
    Semester,
    Status,
    Course,
    Year,
}

/// One checkbox in a filter group. `value` is the match target: a level
/// like "100", a semester name, "active"/"inactive" for the status group,
/// a course title or code, or a year fragment of the session name.
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub value: String,
    pub group: FilterGroup,
    pub checked: bool,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, group: FilterGroup) -> Self {
        Self {
            value: value.into(),
            group,
            checked: false,
        }
    }

    pub fn checked(value: impl Into<String>, group: FilterGroup) -> Self {
        Self {
            value: value.into(),
            group,
            checked: true,
        }
    }
}

/// Independent single-select dropdowns. Unlike the checkbox groups these
/// combine with AND: each set dropdown must match.
#[derive(Debug, Clone, Default)]
pub struct DropdownFilters {
    pub level: Option<String>,
    pub course: Option<String>,
    pub academic_session: Option<String>,
    pub semester: Option<String>,
}

fn matches_search(session: &AttendanceSession, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    session.course.to_lowercase().contains(&q)
        || session.course_code.to_lowercase().contains(&q)
        || session.level.to_lowercase().contains(&q)
        || session.session_name.to_lowercase().contains(&q)
}

fn matches_option(session: &AttendanceSession, option: &FilterOption) -> bool {
    match option.group {
        FilterGroup::Level => session.level.eq_ignore_ascii_case(&option.value),
        FilterGroup::Semester => session.semester.eq_ignore_ascii_case(&option.value),
        FilterGroup::Status => match option.value.as_str() {
            "active" => session.is_active,
            "inactive" => !session.is_active,
            _ => false,
        },
        FilterGroup::Course => {
            session.course.eq_ignore_ascii_case(&option.value)
                || session.course_code.eq_ignore_ascii_case(&option.value)
        }
        FilterGroup::Year => session.session_name.contains(option.value.as_str()),
    }
}

fn matches_dropdowns(session: &AttendanceSession, dropdowns: &DropdownFilters) -> bool {
    if let Some(level) = &dropdowns.level {
        if !session.level.eq_ignore_ascii_case(level) {
            return false;
        }
    }
    if let Some(course) = &dropdowns.course {
        if !session.course.eq_ignore_ascii_case(course)
            && !session.course_code.eq_ignore_ascii_case(course)
        {
            return false;
        }
    }
    if let Some(academic_session) = &dropdowns.academic_session {
        if &session.session_name != academic_session {
            return false;
        }
    }
    if let Some(semester) = &dropdowns.semester {
        if !session.semester.eq_ignore_ascii_case(semester) {
            return false;
        }
    }
    true
}

/// Filters without reordering: the output is a subsequence of the input.
///
/// With no checked option the checkbox pass is skipped entirely; with any
/// checked, a session passes if it matches at least one checked option
/// from any group. Search and dropdowns always apply.
pub fn filter_sessions<'a>(
    sessions: &'a [AttendanceSession],
    query: &str,
    options: &[FilterOption],
    dropdowns: &DropdownFilters,
) -> Vec<&'a AttendanceSession> {
    let checked: Vec<&FilterOption> = options.iter().filter(|o| o.checked).collect();

    sessions
        .iter()
        .filter(|s| matches_search(s, query))
        .filter(|s| checked.is_empty() || checked.iter().any(|o| matches_option(s, o)))
        .filter(|s| matches_dropdowns(s, dropdowns))
        .collect()
}
