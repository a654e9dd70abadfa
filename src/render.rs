use crate::github::issues::Issue;
use crate::view_state::ViewState;

pub const LOADING_TEXT: &str = "Loading...";
pub const BACK_LINK_TEXT: &str = "< Back to repositories";

/// Renders a view-state snapshot as plain text lines.
///
/// While loading only the loading indicator is shown; metadata and issues
/// appear together once the first load has been committed.
pub fn render(state: &ViewState) -> Vec<String> {
    if state.loading {
        let mut lines = vec![LOADING_TEXT.to_string()];
        if let Some(error) = &state.last_error {
            lines.push(format!("Error: {error}"));
        }
        return lines;
    }

    let mut lines = vec![
        BACK_LINK_TEXT.to_string(),
        format!(
            "{} (@{})",
            display_name(state),
            state.repository.owner.login
        ),
    ];
    if let Some(description) = &state.repository.description {
        lines.push(description.clone());
    }
    lines.push(String::new());
    lines.push(render_filters(state));
    lines.push(render_pagination(state));

    if state.issues.is_empty() {
        lines.push("No issues on this page.".to_string());
    }
    lines.extend(state.issues.iter().map(render_issue));

    if let Some(error) = &state.last_error {
        lines.push(format!("Error: {error}"));
    }
    lines
}

fn display_name(state: &ViewState) -> &str {
    if state.repository.full_name.is_empty() {
        &state.repository.name
    } else {
        &state.repository.full_name
    }
}

fn render_filters(state: &ViewState) -> String {
    state
        .filters
        .iter()
        .enumerate()
        .map(|(index, filter)| {
            if index == state.filter_index {
                format!("[*{}]", filter.label)
            } else {
                format!("[ {}]", filter.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_pagination(state: &ViewState) -> String {
    let back = if state.page.can_go_back() {
        "< Back"
    } else {
        "  (Back)"
    };
    format!("{back} | Page {} | Next >", state.page.get())
}

fn render_issue(issue: &Issue) -> String {
    let labels = issue
        .labels
        .iter()
        .map(|label| format!(" [{}]", label.name))
        .collect::<String>();
    format!(
        "- {}{} by {} <{}>",
        issue.title, labels, issue.user.login, issue.html_url
    )
}
