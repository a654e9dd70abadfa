use crate::RepoViewWorld;
use crate::fetcher::StubFetcher;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use repoview::controller::RepositoryController;
use repoview::github::issues::IssueState;
use repoview::github::repository::{Owner, RepositoryMetadata};
use repoview::route::decode_repository_param;
use repoview::view_state::PageDirection;
use std::sync::atomic::Ordering;

fn controller(world: &RepoViewWorld) -> &RepositoryController<StubFetcher> {
    world
        .controller
        .as_ref()
        .expect("The view has not been created")
}

fn create_view(world: &mut RepoViewWorld, param: &str) {
    let repository = decode_repository_param(param).expect("Valid repository parameter");
    world.controller = Some(RepositoryController::new(world.fetcher.clone(), repository));
}

async fn mount_view(world: &mut RepoViewWorld, param: &str) {
    create_view(world, param);
    let result = controller(world).initialize().await;
    world.last_result = Some(result);
}

#[given(regex = r#"^a repository "([^"]+)" named "([^"]+)"$"#)]
async fn given_repository(world: &mut RepoViewWorld, full_name: String, name: String) {
    let owner = full_name
        .split_once('/')
        .map(|(owner, _)| owner.to_string())
        .expect("Repository in <owner>/<repo> form");
    world.fetcher.repository = Some(RepositoryMetadata {
        name,
        full_name,
        description: Some("Repository used in acceptance tests".to_string()),
        owner: Owner {
            login: owner,
            avatar_url: String::new(),
        },
        ..RepositoryMetadata::default()
    });
}

#[given(regex = r"^the repository has (\d+) open issues and (\d+) closed issues$")]
async fn given_issues(world: &mut RepoViewWorld, open: usize, closed: usize) {
    world.fetcher.add_issues(open, IssueState::Open);
    world.fetcher.add_issues(closed, IssueState::Closed);
}

#[given("the repository does not exist")]
async fn given_missing_repository(world: &mut RepoViewWorld) {
    world.fetcher.repository = None;
}

#[given("issue requests start failing")]
async fn given_failing_issue_requests(world: &mut RepoViewWorld) {
    world.fetcher.fail_issues.store(true, Ordering::SeqCst);
}

#[given(regex = r#"^the view for "([^"]+)" is created$"#)]
async fn given_view_created(world: &mut RepoViewWorld, param: String) {
    create_view(world, &param);
}

#[given(regex = r#"^the view for "([^"]+)" is mounted$"#)]
async fn given_view_mounted(world: &mut RepoViewWorld, param: String) {
    mount_view(world, &param).await;
    assert!(
        matches!(world.last_result, Some(Ok(_))),
        "Mount failed: {:?}",
        world.last_result
    );
}

#[when(regex = r#"^the view for "([^"]+)" is mounted$"#)]
async fn when_view_mounted(world: &mut RepoViewWorld, param: String) {
    mount_view(world, &param).await;
}

#[when("I click next")]
async fn when_click_next(world: &mut RepoViewWorld) {
    let result = controller(world).paginate(PageDirection::Next).await;
    world.last_result = Some(result);
}

#[when("I click back")]
async fn when_click_back(world: &mut RepoViewWorld) {
    let result = controller(world).paginate(PageDirection::Back).await;
    world.last_result = Some(result);
}

#[when(regex = r#"^I select the "([^"]+)" filter$"#)]
async fn when_select_filter(world: &mut RepoViewWorld, label: String) {
    let index = controller(world)
        .state()
        .filters
        .iter()
        .position(|filter| filter.label == label)
        .unwrap_or_else(|| panic!("No filter labelled '{label}'"));
    let result = controller(world).select_filter(index).await;
    world.last_result = Some(result);
}

#[when(regex = r#"^I open the terminal view for "([^"]+)" with input:$"#)]
async fn when_open_terminal_view(world: &mut RepoViewWorld, param: String, step: &Step) {
    let input = step
        .docstring
        .as_ref()
        .expect("Expected docstring with input lines")
        .clone();
    create_view(world, &param);

    let mut buffer: Vec<u8> = Vec::new();
    let mut writer: Option<&mut dyn std::io::Write> = Some(&mut buffer);
    let result = repoview::run::run_view(controller(world), input.as_bytes(), &mut writer).await;

    world.captured_output = buffer;
    world.run_result = Some(result);
}

#[then("the view is loading")]
async fn then_loading(world: &mut RepoViewWorld) {
    assert!(controller(world).state().loading);
}

#[then("the view is not loading")]
async fn then_not_loading(world: &mut RepoViewWorld) {
    assert!(!controller(world).state().loading);
}

#[then("no issues are shown")]
async fn then_no_issues(world: &mut RepoViewWorld) {
    let issues = controller(world).state().issues;
    assert!(issues.is_empty(), "Expected no issues, got {issues:?}");
}

#[then(regex = r"^(\d+) issues are shown$")]
async fn then_issue_count(world: &mut RepoViewWorld, count: usize) {
    assert_eq!(controller(world).state().issues.len(), count);
}

#[then(regex = r#"^the repository name is "([^"]+)"$"#)]
async fn then_repository_name(world: &mut RepoViewWorld, name: String) {
    assert_eq!(controller(world).state().repository.name, name);
}

#[then(regex = r#"^only the "([^"]+)" filter is active$"#)]
async fn then_only_filter_active(world: &mut RepoViewWorld, label: String) {
    let state = controller(world).state();
    let active: Vec<&str> = state
        .filters
        .iter()
        .enumerate()
        .filter(|(index, _)| *index == state.filter_index)
        .map(|(_, filter)| filter.label)
        .collect();
    assert_eq!(active, vec![label.as_str()]);
}

#[then(regex = r"^the page is (\d+)$")]
async fn then_page(world: &mut RepoViewWorld, page: u32) {
    assert_eq!(controller(world).state().page.get(), page);
}

#[then(regex = r#"^the last issue request was state "(\w+)" page (\d+) per_page (\d+)$"#)]
async fn then_last_request(world: &mut RepoViewWorld, state: String, page: u32, per_page: u32) {
    let requests = world.fetcher.requests();
    let last = requests.last().expect("No issue request was made");
    assert_eq!(last.state, state);
    assert_eq!(last.page, page);
    assert_eq!(last.per_page, per_page);
}

#[then(regex = r"^(\d+) issue requests were made$")]
async fn then_request_count(world: &mut RepoViewWorld, count: usize) {
    assert_eq!(world.fetcher.requests().len(), count);
}

#[then("the last operation succeeded")]
async fn then_last_operation_succeeded(world: &mut RepoViewWorld) {
    assert!(
        matches!(world.last_result, Some(Ok(_))),
        "Expected success, got {:?}",
        world.last_result
    );
}

#[then(regex = r#"^the last operation failed with "([^"]+)"$"#)]
async fn then_last_operation_failed(world: &mut RepoViewWorld, expected: String) {
    match &world.last_result {
        Some(Err(err)) => {
            let message = format!("{err:#}");
            assert!(
                message.contains(&expected),
                "Expected error containing '{expected}', got '{message}'"
            );
        }
        other => panic!("Expected a failure, got {other:?}"),
    }
}

#[then("the terminal run succeeded")]
async fn then_terminal_succeeded(world: &mut RepoViewWorld) {
    assert!(
        matches!(world.run_result, Some(Ok(()))),
        "Terminal run failed: {:?}",
        world.run_result
    );
}

#[then("the terminal run failed")]
async fn then_terminal_failed(world: &mut RepoViewWorld) {
    assert!(
        matches!(world.run_result, Some(Err(_))),
        "Terminal run should have failed: {:?}",
        world.run_result
    );
}

#[then(regex = r#"^the output contains "(.*)"$"#)]
async fn then_output_contains(world: &mut RepoViewWorld, expected: String) {
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");
    assert!(
        output.contains(&expected),
        "Expected output to contain '{}', but got:\n---\n{}\n---",
        expected,
        output
    );
}

#[then(regex = r"^the last rendered page is (\d+)$")]
async fn then_last_rendered_page(world: &mut RepoViewWorld, page: u32) {
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");
    let re = regex::Regex::new(r"Page (\d+)").expect("Valid regex");
    let last = re
        .captures_iter(&output)
        .last()
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or_else(|| panic!("No page indicator in output:\n{output}"));
    assert_eq!(last, page);
}
