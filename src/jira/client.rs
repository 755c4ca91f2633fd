use crate::jira::payload::{decode_issue_page, decode_project_page};
use crate::jira::{IssueTracker, PageProgress};
use crate::model::{FieldMapping, Issue, Project, ResolvedField, Result};
use reqwest::Client;
use tracing::{debug, warn};

const API_PATH: &str = "rest/api/3";
const PROJECT_PAGE_SIZE: usize = 50;
const ISSUE_PAGE_SIZE: usize = 100;
const BASE_FIELDS: [&str; 3] = ["summary", "status", "assignee"];

#[derive(Debug, Clone)]
pub struct JiraClient {
    http: Client,
    base_url: String,
    email: String,
    token: String,
    field_mapping: FieldMapping,
}

impl JiraClient {
    pub fn new(base_url: &str, email: impl ToString, token: impl ToString, field_mapping: FieldMapping) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            email: email.to_string(),
            token: token.to_string(),
            field_mapping,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{API_PATH}/{path}", self.base_url)
    }

    fn requested_fields(&self) -> String {
        BASE_FIELDS
            .into_iter()
            .chain(self.field_mapping.field_ids())
            .collect::<Vec<_>>()
            .join(",")
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let body = self
            .http
            .get(self.url(path))
            .basic_auth(&self.email, Some(&self.token))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

impl IssueTracker for JiraClient {
    async fn fetch_all_projects(&self) -> Result<Vec<Project>> {
        let mut projects = vec![];
        loop {
            let query = [
                ("startAt", projects.len().to_string()),
                ("maxResults", PROJECT_PAGE_SIZE.to_string()),
            ];
            let page = decode_project_page(&self.get("project/search", &query).await?)?;
            debug!(received = page.projects.len(), "fetched project page");
            let done = page.is_last || page.projects.is_empty();
            projects.extend(page.projects);
            if done {
                break;
            }
        }
        Ok(projects)
    }

    async fn fetch_issues<'a>(&self, project_key: &str, mut cb: PageProgress<'a>) -> Result<Vec<Issue>> {
        let jql = format!("project = \"{project_key}\"");
        let fields = self.requested_fields();
        let mut issues = vec![];
        let mut start_at = 0;
        let mut page_num = 0;
        loop {
            cb(page_num);
            let query = [
                ("jql", jql.clone()),
                ("fields", fields.clone()),
                ("startAt", start_at.to_string()),
                ("maxResults", ISSUE_PAGE_SIZE.to_string()),
            ];
            let body = self.get("search", &query).await?;
            let page = decode_issue_page(project_key, &body, &self.field_mapping)?;
            let next = page.next_start();
            issues.extend(page.issues);
            match next {
                Some(next) => start_at = next,
                None => break,
            }
            page_num += 1;
        }
        debug!(project = project_key, count = issues.len(), "fetched issues");
        for name in self.field_mapping.fields.values() {
            let unrecognized = issues
                .iter()
                .filter(|issue| issue.field(name) == &ResolvedField::Unrecognized)
                .count();
            if unrecognized > 0 {
                warn!(project = project_key, field = %name, unrecognized, "mapped field has an unexpected shape");
            }
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_and_fields() {
        let mapping = FieldMapping {
            version: 1,
            fields: [("customfield_10006".to_string(), "team".to_string())].into_iter().collect(),
        };
        let client = JiraClient::new("https://example.atlassian.net/", "me@example.com", "token", mapping);

        assert_eq!(
            client.url("search"),
            "https://example.atlassian.net/rest/api/3/search"
        );
        assert_eq!(client.requested_fields(), "summary,status,assignee,customfield_10006");
    }
}
