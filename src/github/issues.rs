use serde::{Deserialize, Serialize};

/// An issue as returned by `GET /repos/{id}/issues`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    #[serde(default)]
    pub number: u64,
    pub title: String,
    pub html_url: String,
    #[serde(default)]
    pub state: IssueState,
    pub user: IssueAuthor,
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueAuthor {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueLabel {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

/// Query parameters of one issue-list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    pub state: &'static str,
    pub page: u32,
    pub per_page: u32,
}

impl IssueQuery {
    /// Key/value pairs in the order they are sent on the wire.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("state", self.state.to_string()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}
