use std::{
    cell::RefCell,
    fs,
    path::Path,
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

use cucumber::{given, then, when, StatsWriter as _, World, WriterExt as _};
use cucumber_notify::{
    notify::{self, Notification, Sink},
    Icon, Notifier,
};
use tempfile::TempDir;

#[derive(Debug, Default, World)]
struct Account {
    user: Option<String>,
}

#[given("I open the login page")]
fn open_login_page(acc: &mut Account) {
    acc.user = None;
}

#[when(regex = r"^I log in as (\w+)$")]
fn log_in(acc: &mut Account, name: String) {
    assert_ne!(name, "mallory", "mallory is banned");
    acc.user = Some(name);
}

#[when(regex = r"^I export a report as (\w+)$")]
fn export_report(_: &mut Account, _format: String) {
    todo!()
}

#[given("a flaky step")]
fn flaky_step(_: &mut Account) {
    static ATTEMPTS: AtomicUsize = AtomicUsize::new(0);

    let attempt = ATTEMPTS.fetch_add(1, Ordering::SeqCst);
    assert!(attempt > 0, "fails on the first attempt");
}

#[then("I see the dashboard")]
fn see_dashboard(acc: &mut Account) {
    assert!(acc.user.is_some(), "not logged in");
}

/// [`Sink`] sharing recorded [`Notification`]s with the test.
#[derive(Clone, Debug, Default)]
struct Recorder(Rc<RefCell<Vec<Notification>>>);

impl Sink for Recorder {
    fn notify(&mut self, n: &Notification) -> Result<(), notify::Error> {
        self.0.borrow_mut().push(n.clone());
        Ok(())
    }
}

struct Outcome {
    notifications: Vec<Notification>,
    /// Passed, skipped and failed steps.
    stats: (usize, usize, usize),
    retried_steps: usize,
    rerun: Option<String>,
    _dir: TempDir,
}

async fn run(features: &str) -> Outcome {
    run_with_retries(features, 0).await
}

async fn run_with_retries(features: &str, retries: usize) -> Outcome {
    let dir = tempfile::tempdir().unwrap();
    let rerun_file = dir.path().join("rerun.txt");
    let recorder = Recorder::default();

    let cucumber = Account::cucumber().max_concurrent_scenarios(1);
    let cucumber =
        if retries > 0 { cucumber.retries(retries) } else { cucumber };
    let writer = cucumber
        .with_writer(
            Notifier::raw(recorder.clone())
                .with_rerun_file(&rerun_file)
                .normalized(),
        )
        .with_default_cli()
        .run(features)
        .await;
    let stats = (
        writer.passed_steps(),
        writer.skipped_steps(),
        writer.failed_steps(),
    );
    let retried_steps = writer.retried_steps();

    let notifications = recorder.0.borrow().clone();
    Outcome {
        notifications,
        stats,
        retried_steps,
        rerun: fs::read_to_string(&rerun_file).ok(),
        _dir: dir,
    }
}

fn summary(outcome: &Outcome) -> &Notification {
    outcome.notifications.last().expect("no summary notification")
}

fn rerun_locations(outcome: &Outcome) -> Vec<String> {
    let rerun = outcome.rerun.as_deref().expect("no rerun file written");
    assert!(rerun.ends_with('\n'), "{rerun:?}");
    assert_eq!(rerun.lines().count(), 1, "{rerun:?}");
    rerun.split_whitespace().map(ToOwned::to_owned).collect()
}

fn file_name(location: &str) -> String {
    Path::new(location)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap()
        .to_owned()
}

#[tokio::test]
async fn failed_step_is_notified_and_rerun() {
    let outcome = run("tests/features/notifier/login.feature").await;

    assert_eq!(
        outcome.notifications,
        [
            Notification::new(
                "Login",
                "I log in as *mallory*",
                Some(Icon::Failed),
            ),
            Notification::new(
                "Cucumber Results",
                "1 step failed, 4 steps passed",
                Some(Icon::Failed),
            ),
        ],
    );
    assert_eq!(outcome.stats, (4, 0, 1));

    let locations = rerun_locations(&outcome);
    assert_eq!(locations.len(), 1);
    assert!(
        locations[0].ends_with("tests/features/notifier/login.feature:3"),
        "{locations:?}",
    );
}

#[tokio::test]
async fn passing_run_writes_no_rerun_file() {
    let outcome = run("tests/features/notifier/dashboard.feature").await;

    assert_eq!(
        outcome.notifications,
        [Notification::new(
            "Cucumber Results",
            "3 steps passed",
            Some(Icon::Success),
        )],
    );
    assert_eq!(outcome.rerun, None);
}

#[tokio::test]
async fn pending_step_is_rerun() {
    let outcome = run("tests/features/notifier/reports.feature").await;

    assert_eq!(
        outcome.notifications,
        [
            Notification::new(
                "Export",
                "I export a report as *pdf*",
                Some(Icon::Pending),
            ),
            Notification::new(
                "Cucumber Results",
                "1 step pending, 4 steps passed",
                Some(Icon::Pending),
            ),
        ],
    );
    assert_eq!(
        rerun_locations(&outcome)
            .iter()
            .map(|l| file_name(l))
            .collect::<Vec<_>>(),
        ["reports.feature:6"],
    );
}

#[tokio::test]
async fn undefined_step_is_notified_and_rerun() {
    let outcome = run("tests/features/notifier/logout.feature").await;

    assert_eq!(
        outcome.notifications,
        [
            Notification::new(
                "Logout",
                "I press the logout button",
                Some(Icon::Pending),
            ),
            Notification::new(
                "Cucumber Results",
                "1 step undefined, 1 step passed",
                Some(Icon::Pending),
            ),
        ],
    );
    assert_eq!(outcome.stats, (1, 1, 0));
    assert_eq!(
        rerun_locations(&outcome)
            .iter()
            .map(|l| file_name(l))
            .collect::<Vec<_>>(),
        ["logout.feature:3"],
    );
}

#[tokio::test]
async fn retried_failure_is_not_summarized() {
    let outcome =
        run_with_retries("tests/features/retry/flaky.feature", 1).await;

    assert_eq!(
        outcome.notifications,
        [
            Notification::new("Flaky", "a flaky step", Some(Icon::Failed)),
            Notification::new(
                "Cucumber Results",
                "1 step passed",
                Some(Icon::Success),
            ),
        ],
    );
    assert_eq!(outcome.stats, (1, 0, 0));
    assert_eq!(outcome.retried_steps, 1);
    assert_eq!(outcome.rerun, None);
}

#[tokio::test]
async fn whole_suite() {
    let outcome = run("tests/features/notifier").await;

    let summary = summary(&outcome);
    assert_eq!(summary.title, "Cucumber Results");
    assert_eq!(
        summary.message,
        "1 step failed, 1 step undefined, 1 step pending, 12 steps passed",
    );
    assert_eq!(summary.icon, Some(Icon::Failed));
    assert_eq!(outcome.notifications.len(), 4);
    assert_eq!(outcome.stats, (12, 1, 2));

    let mut locations = rerun_locations(&outcome)
        .iter()
        .map(|l| file_name(l))
        .collect::<Vec<_>>();
    locations.sort();
    assert_eq!(
        locations,
        ["login.feature:3", "logout.feature:3", "reports.feature:6"],
    );
}
