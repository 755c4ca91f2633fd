use crate::analyze::{IssueBucket, IssuesByName, ReportData, SummariesByName};
use crate::model::{Issue, ReportConfig, DEFAULT_BULLET_MARKER, DEFAULT_TITLE};
use crate::report::document::{Cell, ReportDocument, Row, Section, SectionKind};

pub const SUMMARY_TITLE: &str = "Project Summary Details";
pub const SUMMARY_HEADERS: [&str; 4] = ["Project Name", "Total Tasks", "Completed Tasks", "% Complete"];
pub const COMPLETED_TITLE: &str = "A. Completed Items";
pub const IN_PROGRESS_TITLE: &str = "B. InProgress Items";
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub title: String,
    pub bullet_marker: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            bullet_marker: DEFAULT_BULLET_MARKER.to_string(),
        }
    }
}

impl From<&ReportConfig> for RenderOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            title: config.title.clone(),
            bullet_marker: config.bullet_marker.clone(),
        }
    }
}

pub trait ReportRenderer {
    fn render(&self, options: &RenderOptions) -> ReportDocument;
}

impl ReportRenderer for ReportData {
    fn render(&self, options: &RenderOptions) -> ReportDocument {
        ReportDocument {
            title: options.title.clone(),
            sections: vec![
                build_summary_section(&self.summary_by_project),
                build_bucket_section(
                    self.bucket(IssueBucket::Completed),
                    IssueBucket::Completed,
                    &options.bullet_marker,
                ),
                build_bucket_section(
                    self.bucket(IssueBucket::InProgress),
                    IssueBucket::InProgress,
                    &options.bullet_marker,
                ),
            ],
        }
    }
}

pub fn build_summary_section(summaries: &SummariesByName) -> Section {
    let mut section = Section::new(SectionKind::Summary);
    section.push(Row::new(vec![Cell::title(SUMMARY_TITLE)]));
    section.push(Row::new(SUMMARY_HEADERS.iter().map(Cell::header).collect()));
    for (project_name, summary) in summaries {
        section.push(Row::new(vec![
            Cell::data(project_name),
            Cell::integer(summary.total_count),
            Cell::integer(summary.completed_count),
            Cell::data(format!("{:.1}%", summary.completion_percent)),
        ]));
    }
    section
}

pub fn build_bucket_section(issues: &IssuesByName, bucket: IssueBucket, bullet_marker: &str) -> Section {
    let (kind, title) = match bucket {
        IssueBucket::Completed => (SectionKind::Completed, COMPLETED_TITLE),
        IssueBucket::InProgress => (SectionKind::InProgress, IN_PROGRESS_TITLE),
    };
    let mut section = Section::new(kind);
    section.push(Row::new(vec![Cell::title(title)]));
    for (project_name, project_issues) in issues.iter().filter(|(_, i)| !i.is_empty()) {
        section.push(Row::new(vec![Cell::header(format!("Project {project_name}"))]));
        for issue in project_issues {
            section.push(bullet_row(issue, bullet_marker));
        }
        section.push(Row::blank());
    }
    section
}

fn bullet_row(issue: &Issue, bullet_marker: &str) -> Row {
    Row::new(vec![
        Cell::bullet(bullet_marker),
        Cell::bullet(&issue.key),
        Cell::bullet(&issue.summary),
        Cell::bullet(issue.assignee_name.as_deref().unwrap_or(UNASSIGNED)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::ProjectSummary;
    use crate::report::document::CellRole;
    use pretty_assertions::assert_eq;

    fn texts(section: &Section) -> Vec<Vec<String>> {
        section.rows.iter().map(Row::texts).collect()
    }

    #[test]
    fn summary_rows_are_sorted_and_formatted() {
        let summaries = SummariesByName::from([
            ("Zeta".to_string(), ProjectSummary::new("Zeta", 3, 2)),
            ("Alpha".to_string(), ProjectSummary::new("Alpha", 2, 1)),
            ("Empty".to_string(), ProjectSummary::empty("Empty")),
        ]);

        let section = build_summary_section(&summaries);

        assert_eq!(
            texts(&section),
            vec![
                vec!["Project Summary Details"],
                vec!["Project Name", "Total Tasks", "Completed Tasks", "% Complete"],
                vec!["Alpha", "2", "1", "50.0%"],
                vec!["Empty", "0", "0", "0.0%"],
                vec!["Zeta", "3", "2", "66.7%"],
            ]
        );
        assert_eq!(section.rows[0].role(), Some(CellRole::Title));
        assert_eq!(section.rows[1].role(), Some(CellRole::Header));
        assert_eq!(section.rows[2].role(), Some(CellRole::Data));
    }

    #[test]
    fn bucket_section_lists_issues_per_project() {
        let issues = IssuesByName::from([
            (
                "Beta".to_string(),
                vec![Issue::new("BE-1", None, Some("Done"), Some("Bob"))],
            ),
            ("Gamma".to_string(), vec![]),
            (
                "Alpha".to_string(),
                vec![
                    Issue::new("AL-1", Some("Fix bug"), Some("Done"), None),
                    Issue::new("AL-3", Some("Docs"), Some("Closed"), None),
                ],
            ),
        ]);

        let section = build_bucket_section(&issues, IssueBucket::Completed, "*");

        assert_eq!(section.kind, SectionKind::Completed);
        assert_eq!(
            texts(&section),
            vec![
                vec!["A. Completed Items"],
                vec!["Project Alpha"],
                vec!["*", "AL-1", "Fix bug", "Unassigned"],
                vec!["*", "AL-3", "Docs", "Unassigned"],
                vec![],
                vec!["Project Beta"],
                vec!["*", "BE-1", "", "Bob"],
                vec![],
            ]
        );
        assert_eq!(section.rows[2].role(), Some(CellRole::Bullet));
    }

    #[test]
    fn empty_data_renders_titles_only() {
        let document = ReportData::default().render(&RenderOptions::default());

        let kinds = document.sections.iter().map(|s| s.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![SectionKind::Summary, SectionKind::Completed, SectionKind::InProgress]
        );
        assert_eq!(document.sections[0].rows.len(), 2);
        assert_eq!(texts(&document.sections[2]), vec![vec!["B. InProgress Items"]]);
    }
}
