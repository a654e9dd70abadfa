use crate::cli::parser::{self, Command, ViewInput};
use crate::config::Settings;
use crate::controller::RepositoryController;
use crate::github::client::{DataFetcher, GitHubClient};
use crate::output;
use crate::render;
use crate::route;
use crate::view_state::ViewState;
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;

pub async fn run<R>(
    args: Vec<String>,
    input: R,
    mut stdout_additional: Option<&mut dyn Write>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    match parser::parse_args(&args) {
        Command::Show { repo } => {
            let repository = route::decode_repository_param(&repo)?;
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            let settings = Settings::load(&cwd)?;
            tracing::debug!(?settings, "settings loaded");

            let client = GitHubClient::new(&settings.api_base_url, settings.timeout)?;
            let controller = RepositoryController::new(client, repository)
                .with_policy(settings.filter_page_policy);
            run_view(&controller, input, &mut stdout_additional).await?;
        }
        Command::Help => {
            output::println(parser::USAGE, &mut stdout_additional)?;
        }
        Command::Unknown(cmd) => {
            output::println(
                &format!("Invalid command or arguments: {cmd}. Use help for usage."),
                &mut stdout_additional,
            )?;
        }
    }
    Ok(())
}

/// Mounts the view, then applies one input line at a time until `quit` or
/// end of input. The page is redrawn whenever the controller publishes a new
/// state.
pub async fn run_view<F, R>(
    controller: &RepositoryController<F>,
    input: R,
    writer: &mut Option<&mut dyn Write>,
) -> Result<()>
where
    F: DataFetcher,
    R: AsyncBufRead + Unpin,
{
    tracing::info!(repository = controller.repository(), "opening repository view");
    let mut receiver = controller.subscribe();
    let initial = render::render(&receiver.borrow_and_update());
    output::print_lines(&initial, writer)?;

    if let Err(err) = controller.initialize().await {
        redraw(&mut receiver, writer)?;
        return Err(err);
    }
    redraw(&mut receiver, writer)?;
    output::println(parser::VIEW_HELP, writer)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let filters = controller.state().filters;
        let result = match parser::parse_view_input(&line, &filters) {
            ViewInput::Quit => break,
            ViewInput::Empty => continue,
            ViewInput::Unknown(text) => {
                output::println(
                    &format!("Unknown input '{text}'. {}", parser::VIEW_HELP),
                    writer,
                )?;
                continue;
            }
            ViewInput::Filter(index) => controller.select_filter(index).await,
            ViewInput::Paginate(direction) => controller.paginate(direction).await,
        };
        if let Err(err) = result {
            eprintln!("{err:#}");
        }
        redraw(&mut receiver, writer)?;
    }
    Ok(())
}

fn redraw(
    receiver: &mut watch::Receiver<ViewState>,
    writer: &mut Option<&mut dyn Write>,
) -> Result<()> {
    if receiver.has_changed()? {
        let lines = render::render(&receiver.borrow_and_update());
        output::print_lines(&lines, writer)?;
    }
    Ok(())
}
