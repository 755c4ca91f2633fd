mod client;
pub mod payload;

pub use client::JiraClient;

use crate::model::{Issue, IssuesByProject, Project, ReportError, ReportInput, Result};
use futures::{StreamExt, TryStreamExt};
use std::future::Future;

pub type PageProgress<'a> = Box<dyn FnMut(usize) + Send + 'a>;

/// Source of projects and issues. The returned futures are `Send` so a fetch
/// can run on a spawned task.
pub trait IssueTracker {
    fn fetch_all_projects(&self) -> impl Future<Output = Result<Vec<Project>>> + Send;

    fn fetch_issues<'a>(
        &self,
        project_key: &str,
        cb: PageProgress<'a>,
    ) -> impl Future<Output = Result<Vec<Issue>>> + Send;
}

/// Fetches every project and then, one project at a time, its issues.
/// `on_page` is called with the project and page number before each issue page
/// is requested.
pub async fn fetch_report_input<T, F>(tracker: &T, on_page: F) -> Result<ReportInput>
where
    T: IssueTracker,
    F: Fn(&Project, usize) + Sync,
{
    let projects = tracker.fetch_all_projects().await?;
    let on_page = &on_page;

    let fetched = futures::stream::iter(&projects)
        .then(|project| async move {
            let issues = tracker
                .fetch_issues(&project.key, Box::new(move |page: usize| on_page(project, page)))
                .await?;
            Ok::<_, ReportError>((project.key.clone(), issues))
        })
        .try_collect::<Vec<_>>()
        .await?;

    let issues = fetched.into_iter().collect::<IssuesByProject>();
    Ok(ReportInput::new(projects, issues))
}
