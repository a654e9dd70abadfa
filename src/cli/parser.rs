use crate::view_state::{IssueFilter, PageDirection};

/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    Show { repo: String },
    Help,
    Unknown(String),
}

/// One line typed while a repository view is open.
#[derive(Debug, PartialEq)]
pub enum ViewInput {
    Filter(usize),
    Paginate(PageDirection),
    Quit,
    Empty,
    Unknown(String),
}

pub const USAGE: &str = "Usage: repoview show <owner>/<repo>";
pub const VIEW_HELP: &str =
    "Commands: all | open | closed | filter <n> | next (n) | back (b) | quit (q)";

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    match args.len() {
        0 | 1 => Command::Help,
        2 => match args[1].as_str() {
            "help" | "--help" | "-h" => Command::Help,
            "show" => Command::Unknown(format!("Missing repository argument. {USAGE}")),
            cmd => Command::Unknown(cmd.to_string()),
        },
        _ => match args[1].as_str() {
            "show" => Command::Show {
                repo: args[2].clone(),
            },
            cmd => Command::Unknown(cmd.to_string()),
        },
    }
}

/// Parse one interactive input line against the available filters.
///
/// Filters are selected by label (case-insensitive) or by `filter <index>`.
pub fn parse_view_input(line: &str, filters: &[IssueFilter]) -> ViewInput {
    let line = line.trim();
    let lower = line.to_ascii_lowercase();
    match lower.as_str() {
        "" => return ViewInput::Empty,
        "q" | "quit" | "exit" => return ViewInput::Quit,
        _ => {}
    }
    if let Ok(direction) = lower.parse::<PageDirection>() {
        return ViewInput::Paginate(direction);
    }

    if let Some(index) = filters
        .iter()
        .position(|filter| filter.label.eq_ignore_ascii_case(&lower))
    {
        return ViewInput::Filter(index);
    }

    match lower.split_once(' ') {
        Some(("filter", index)) => match index.trim().parse::<usize>() {
            Ok(index) if index < filters.len() => ViewInput::Filter(index),
            _ => ViewInput::Unknown(line.to_string()),
        },
        _ => ViewInput::Unknown(line.to_string()),
    }
}
