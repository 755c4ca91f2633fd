//! End-to-end checks of the aggregation and layout rules.

use chrono::Local;
use jira_status_report::model::{FieldMapping, Issue, IssuesByProject, Project, ReportConfig, ReportError, ReportInput};
use jira_status_report::report::{CellRole, ReportFormat, Row, Section, SectionKind};
use jira_status_report::{build_document, write_report};
use pretty_assertions::assert_eq;

fn texts(section: &Section) -> Vec<Vec<String>> {
    section.rows.iter().map(Row::texts).collect()
}

fn alpha_beta() -> ReportInput {
    ReportInput::new(
        vec![Project::new("ALPHA", "Alpha"), Project::new("BETA", "Beta")],
        IssuesByProject::from([
            (
                "ALPHA".to_string(),
                vec![
                    Issue::new("AL-1", Some("Fix bug"), Some("Done"), Some("Ann")),
                    Issue::new("AL-2", Some("Add feature"), Some("In Progress"), None),
                ],
            ),
            ("BETA".to_string(), vec![]),
        ]),
    )
}

#[test]
fn completed_and_in_progress_items_are_split_per_project() {
    let document = build_document(&alpha_beta(), &ReportConfig::default());

    let summary = document.section(SectionKind::Summary).unwrap();
    assert_eq!(
        texts(summary)[2..].to_vec(),
        vec![vec!["Alpha", "2", "1", "50.0%"]]
    );

    let completed = document.section(SectionKind::Completed).unwrap();
    assert_eq!(
        texts(completed),
        vec![
            vec!["A. Completed Items"],
            vec!["Project Alpha"],
            vec!["Φ", "AL-1", "Fix bug", "Ann"],
            vec![],
        ]
    );

    let in_progress = document.section(SectionKind::InProgress).unwrap();
    assert_eq!(
        texts(in_progress),
        vec![
            vec!["B. InProgress Items"],
            vec!["Project Alpha"],
            vec!["Φ", "AL-2", "Add feature", "Unassigned"],
            vec![],
        ]
    );
}

#[test]
fn issue_without_status_is_in_progress() {
    let input = ReportInput::new(
        vec![Project::new("ALPHA", "Alpha")],
        IssuesByProject::from([(
            "ALPHA".to_string(),
            vec![Issue::new("AL-9", None, None, None)],
        )]),
    );

    let document = build_document(&input, &ReportConfig::default());

    let completed = document.section(SectionKind::Completed).unwrap();
    assert_eq!(completed.rows.len(), 1);
    let in_progress = document.section(SectionKind::InProgress).unwrap();
    assert_eq!(texts(in_progress)[2], vec!["Φ", "AL-9", "", "Unassigned"]);
    let summary = document.section(SectionKind::Summary).unwrap();
    assert_eq!(texts(summary)[2], vec!["Alpha", "1", "0", "0.0%"]);
}

#[test]
fn empty_project_list_renders_headers_only() {
    let document = build_document(&ReportInput::default(), &ReportConfig::default());

    let summary = document.section(SectionKind::Summary).unwrap();
    assert_eq!(
        texts(summary),
        vec![
            vec!["Project Summary Details"],
            vec!["Project Name", "Total Tasks", "Completed Tasks", "% Complete"],
        ]
    );
    assert_eq!(summary.rows[0].role(), Some(CellRole::Title));
    assert_eq!(summary.rows[1].role(), Some(CellRole::Header));
    for kind in [SectionKind::Completed, SectionKind::InProgress] {
        assert_eq!(document.section(kind).unwrap().rows.len(), 1);
    }
}

#[test]
fn empty_projects_can_be_listed_in_the_summary() {
    let config = ReportConfig {
        include_empty_projects: true,
        ..ReportConfig::default()
    };

    let document = build_document(&alpha_beta(), &config);

    let summary = document.section(SectionKind::Summary).unwrap();
    assert_eq!(
        texts(summary)[2..].to_vec(),
        vec![vec!["Alpha", "2", "1", "50.0%"], vec!["Beta", "0", "0", "0.0%"]]
    );
    let completed = document.section(SectionKind::Completed).unwrap();
    assert!(texts(completed).iter().all(|row| row != &vec!["Project Beta"]));
}

#[test]
fn projects_are_listed_alphabetically_whatever_the_input_order() {
    let input = ReportInput::new(
        vec![
            Project::new("ZED", "Zed"),
            Project::new("MID", "Mid"),
            Project::new("APP", "App"),
        ],
        IssuesByProject::from([
            ("ZED".to_string(), vec![Issue::new("Z-1", None, Some("Done"), None)]),
            ("MID".to_string(), vec![Issue::new("M-1", None, Some("Closed"), None)]),
            ("APP".to_string(), vec![Issue::new("A-1", None, Some("Resolved"), None)]),
        ]),
    );

    let document = build_document(&input, &ReportConfig::default());

    let names = texts(document.section(SectionKind::Summary).unwrap())[2..]
        .iter()
        .map(|row| row[0].clone())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["App", "Mid", "Zed"]);
    let project_rows = texts(document.section(SectionKind::Completed).unwrap())
        .into_iter()
        .filter(|row| row.len() == 1 && row[0].starts_with("Project "))
        .map(|row| row[0].clone())
        .collect::<Vec<_>>();
    assert_eq!(project_rows, vec!["Project App", "Project Mid", "Project Zed"]);
}

#[test]
fn rendering_is_deterministic() {
    let input = alpha_beta();
    let config = ReportConfig::default();

    assert_eq!(build_document(&input, &config), build_document(&input, &config));
}

#[test]
fn configured_statuses_drive_classification() {
    let config = ReportConfig {
        completed_statuses: vec!["In Progress".to_string()],
        ..ReportConfig::default()
    };

    let document = build_document(&alpha_beta(), &config);

    let completed = texts(document.section(SectionKind::Completed).unwrap());
    assert_eq!(completed[2], vec!["Φ", "AL-2", "Add feature", "Unassigned"]);
}

#[test]
fn null_issue_list_in_snapshot_is_a_structural_error() {
    let err = ReportInput::parse_snapshot(
        r#"{ "projects": [{ "key": "ALPHA", "name": "Alpha" }], "issues": { "ALPHA": null } }"#,
        &FieldMapping::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ReportError::Structure(_)), "{err}");
}

#[test]
fn writes_xlsx_and_markdown_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let input = alpha_beta();
    let config = ReportConfig::default();

    for format in [ReportFormat::Xlsx, ReportFormat::Markdown] {
        let writer = format.writer();
        let path = write_report(&input, &config, writer.as_ref(), tmp.path(), Local::now()).unwrap();

        assert!(path.starts_with(tmp.path()));
        assert_eq!(path.extension().unwrap(), writer.extension());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
