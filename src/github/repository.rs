use serde::{Deserialize, Serialize};

/// Repository metadata as returned by `GET /repos/{id}`.
///
/// The `Default` value is the empty record a view starts with before its
/// first load completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    pub owner: Owner,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}
