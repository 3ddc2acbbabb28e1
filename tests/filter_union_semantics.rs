use rollbook::filter::{filter_sessions, DropdownFilters, FilterGroup, FilterOption};
use rollbook::AttendanceSession;

fn session(
    id: &str,
    course: &str,
    code: &str,
    level: &str,
    semester: &str,
    session_name: &str,
    active: bool,
) -> AttendanceSession {
    AttendanceSession {
        id: id.to_string(),
        course: course.to_string(),
        course_code: code.to_string(),
        level: level.to_string(),
        session_name: session_name.to_string(),
        date: "2024-02-10".to_string(),
        semester: semester.to_string(),
        is_active: active,
        students: Vec::new(),
    }
}

fn fixture() -> Vec<AttendanceSession> {
    vec![
        session(
            "s1",
            "Intro to Programming",
            "CSC101",
            "100",
            "First",
            "2023/2024",
            true,
        ),
        session(
            "s2",
            "Data Structures",
            "CSC201",
            "200",
            "Second",
            "2023/2024",
            false,
        ),
        session(
            "s3",
            "Algorithms",
            "CSC301",
            "300",
            "First",
            "2022/2023",
            false,
        ),
    ]
}

#[test]
fn checked_options_union_across_groups() {
    let sessions = fixture();
    // "Level 100" and "Active Sessions" checked together: s1 matches both,
    // s2 matches neither, s3 matches neither. Now widen: level 300 + active
    // must return the union {s1, s3}, not the empty intersection.
    let options = vec![
        FilterOption::checked("300", FilterGroup::Level),
        FilterOption::checked("active", FilterGroup::Status),
    ];
    let out = filter_sessions(&sessions, "", &options, &DropdownFilters::default());
    let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s3"]);
}

#[test]
fn union_includes_every_session_matching_at_least_one_checked_option() {
    let sessions = vec![
        session("a", "X", "X1", "100", "First", "2023/2024", true),
        session("b", "Y", "Y1", "200", "First", "2023/2024", false),
    ];
    let options = vec![
        FilterOption::checked("100", FilterGroup::Level),
        FilterOption::checked("active", FilterGroup::Status),
    ];
    let out = filter_sessions(&sessions, "", &options, &DropdownFilters::default());
    // "a" matches both options, "b" matches... neither level 100 nor
    // active, so only "a" survives here.
    assert_eq!(out.len(), 1);

    // But an inactive level-100 peer joins through the level option alone.
    let sessions = vec![
        session("a", "X", "X1", "100", "First", "2023/2024", true),
        session("b", "Y", "Y1", "100", "First", "2023/2024", false),
    ];
    let out = filter_sessions(&sessions, "", &options, &DropdownFilters::default());
    assert_eq!(out.len(), 2);
}

#[test]
fn search_composes_with_and_against_the_checkbox_union() {
    let sessions = fixture();
    let options = vec![
        FilterOption::checked("100", FilterGroup::Level),
        FilterOption::checked("300", FilterGroup::Level),
    ];
    let out = filter_sessions(&sessions, "algo", &options, &DropdownFilters::default());
    let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s3"]);
}

#[test]
fn dropdowns_and_against_everything_else() {
    let sessions = fixture();
    let options = vec![
        FilterOption::checked("First", FilterGroup::Semester),
        FilterOption::checked("Second", FilterGroup::Semester),
    ];
    let dropdowns = DropdownFilters {
        academic_session: Some("2023/2024".to_string()),
        ..Default::default()
    };
    let out = filter_sessions(&sessions, "", &options, &dropdowns);
    let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
    // s3 matches the semester union but fails the academic-session dropdown.
    assert_eq!(ids, vec!["s1", "s2"]);
}

#[test]
fn no_checked_options_means_search_only() {
    let sessions = fixture();
    let options = vec![
        FilterOption::new("100", FilterGroup::Level),
        FilterOption::new("active", FilterGroup::Status),
    ];
    let out = filter_sessions(&sessions, "csc", &options, &DropdownFilters::default());
    assert_eq!(out.len(), 3);
}

#[test]
fn year_and_course_groups_match_name_fragments() {
    let sessions = fixture();
    let options = vec![FilterOption::checked("2022/2023", FilterGroup::Year)];
    let out = filter_sessions(&sessions, "", &options, &DropdownFilters::default());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "s3");

    let options = vec![FilterOption::checked("CSC201", FilterGroup::Course)];
    let out = filter_sessions(&sessions, "", &options, &DropdownFilters::default());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "s2");
}
