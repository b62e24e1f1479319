// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Writer`] notifying about [`Cucumber`] run results.
//!
//! [`Cucumber`]: cucumber::event::Cucumber

pub mod cli;
pub mod step;

use std::path::PathBuf;

use async_trait::async_trait;
use cucumber::{
    event, gherkin, parser, writer, Event, World, Writer, WriterExt as _,
};
use derive_more::with_trait::{Deref, DerefMut};

use crate::{
    notify::{Desktop, Sink},
    Error, Formatter as _, ResultNotifier, Status, StatusCounts,
};

#[doc(inline)]
pub use self::cli::Cli;

/// [`Writer`] feeding [`Cucumber`] events into a [`ResultNotifier`].
///
/// Sends a notification for every failed, pending or undefined [`Step`], a
/// summary notification once the run is finished, and writes the
/// [`RerunFile`] with locations of the failed [`Scenario`]s.
///
/// # Ordering
///
/// This [`Writer`] isn't [`Normalized`] by itself, so should be wrapped into
/// a [`writer::Normalize`], otherwise interleaved [`Scenario`]s will be
/// reported wrongly. [`Notifier::new()`] does so.
///
/// # Undefined [`Step`]s
///
/// A [`Step`] not matching any step function is [`Skipped`] by [`cucumber`].
/// It's reported as [`Status::Undefined`] (so its [`Scenario`] is rerun),
/// while still being counted in [`writer::Stats::skipped_steps()`].
///
/// # Retries
///
/// Failed attempts of a retried [`Scenario`] are neither counted in the
/// summary nor written into the [`RerunFile`], only its final attempt is.
///
/// # Panics
///
/// If the [`Sink`] fails to deliver a notification, or the [`RerunFile`]
/// cannot be written.
///
/// [`Cucumber`]: event::Cucumber
/// [`Normalized`]: writer::Normalized
/// [`RerunFile`]: crate::RerunFile
/// [`Scenario`]: gherkin::Scenario
/// [`Skipped`]: event::Step::Skipped
/// [`Step`]: gherkin::Step
#[derive(Clone, Debug, Deref, DerefMut)]
pub struct Notifier<S> {
    /// [`ResultNotifier`] to report into.
    #[deref]
    #[deref_mut]
    formatter: ResultNotifier<S>,

    /// Number of [`Step`]s finished with each [`Status`] in the final
    /// attempts of [`Scenario`]s.
    ///
    /// [`Scenario`]: gherkin::Scenario
    /// [`Step`]: gherkin::Step
    counts: StatusCounts,

    /// Number of [`Step`]s not matching any step function, in the final
    /// attempts of [`Scenario`]s.
    ///
    /// [`Scenario`]: gherkin::Scenario
    /// [`Step`]: gherkin::Step
    unmatched_steps: usize,

    /// [`Attempt`] of the [`Scenario`] being run.
    ///
    /// [`Scenario`]: gherkin::Scenario
    attempt: Attempt,

    /// Number of failed [`Step`]s whose [`Scenario`] has been retried.
    ///
    /// [`Scenario`]: gherkin::Scenario
    /// [`Step`]: gherkin::Step
    retried_steps: usize,

    /// Number of [`parser::Error`]s.
    parsing_errors: usize,

    /// Number of failed [`Scenario`] hooks.
    ///
    /// [`Scenario`]: gherkin::Scenario
    hook_errors: usize,
}

/// Outcome of a single attempt to run a [`Scenario`].
///
/// [`Scenario`]: gherkin::Scenario
#[derive(Clone, Copy, Debug, Default)]
struct Attempt {
    /// Number of [`Step`]s finished with each [`Status`].
    ///
    /// [`Step`]: gherkin::Step
    counts: StatusCounts,

    /// Number of [`Step`]s not matching any step function.
    ///
    /// [`Step`]: gherkin::Step
    unmatched_steps: usize,

    /// Number of [`Step`]s that have failed.
    ///
    /// [`Step`]: gherkin::Step
    failed_steps: usize,

    /// Indicator whether a [`Step`] or a hook has failed, so the [`Scenario`]
    /// may be retried.
    ///
    /// [`Scenario`]: gherkin::Scenario
    /// [`Step`]: gherkin::Step
    failed: bool,
}

impl Notifier<Desktop> {
    /// Creates a new [`Normalized`] [`Notifier`] showing desktop
    /// notifications.
    ///
    /// [`Normalized`]: writer::Normalized
    #[must_use]
    pub fn desktop<W>() -> writer::Normalize<W, Self> {
        Self::new(Desktop::new())
    }
}

impl<S: Sink> Notifier<S> {
    /// Creates a new [`Normalized`] [`Notifier`] delivering notifications
    /// into the given [`Sink`].
    ///
    /// [`Normalized`]: writer::Normalized
    #[must_use]
    pub fn new<W>(sink: S) -> writer::Normalize<W, Self> {
        Self::raw(sink).normalized()
    }

    /// Creates a new non-[`Normalized`] [`Notifier`] delivering notifications
    /// into the given [`Sink`].
    ///
    /// Use it only if you know what you're doing. Otherwise, consider using
    /// [`Notifier::new()`] which creates an already [`Normalized`] version of
    /// a [`Notifier`].
    ///
    /// [`Normalized`]: writer::Normalized
    #[must_use]
    pub fn raw(sink: S) -> Self {
        Self::from(ResultNotifier::new(sink))
    }

    /// Sets the title of the summary notification.
    #[must_use]
    pub fn with_title(
        mut self,
        title: impl Into<std::borrow::Cow<'static, str>>,
    ) -> Self {
        self.formatter = self.formatter.with_title(title);
        self
    }

    /// Sets the path of the [`RerunFile`].
    ///
    /// [`RerunFile`]: crate::RerunFile
    #[must_use]
    pub fn with_rerun_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.formatter.set_rerun_file(path);
        self
    }

    /// Returns the [`StatusCounts`] of the [`Step`]s finished so far.
    ///
    /// Attempts of [`Scenario`]s being retried are not counted.
    ///
    /// [`Scenario`]: gherkin::Scenario
    /// [`Step`]: gherkin::Step
    #[must_use]
    pub const fn counts(&self) -> &StatusCounts {
        &self.counts
    }

    /// Applies the given [`Cli`] options to this [`Notifier`].
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.rerun_file {
            self.formatter.set_rerun_file(path.clone());
        }
        if cli.no_notifications {
            self.formatter.silence(true);
        }
    }

    fn scenario<W>(
        &mut self,
        feature: &gherkin::Feature,
        scenario: &gherkin::Scenario,
        ev: event::RetryableScenario<W>,
    ) -> Result<(), Error> {
        use event::{Hook, Scenario};

        let event::RetryableScenario { event, retries } = ev;
        match event {
            Scenario::Started => {
                self.attempt = Attempt::default();
                self.formatter.feature_element_started(&scenario.name);
                Ok(())
            }
            Scenario::Background(st, ev) | Scenario::Step(st, ev) => {
                self.step(&st, ev)
            }
            Scenario::Hook(_, Hook::Failed(..)) => {
                self.hook_errors += 1;
                self.attempt.failed = true;
                Ok(())
            }
            Scenario::Finished => {
                let attempt = std::mem::take(&mut self.attempt);
                if attempt.failed && retries.is_some_and(|r| r.left > 0) {
                    tracing::debug!(
                        scenario = %scenario.name,
                        "scenario will be retried",
                    );
                    self.retried_steps += attempt.failed_steps;
                } else {
                    self.counts.merge(&attempt.counts);
                    self.unmatched_steps += attempt.unmatched_steps;
                    self.formatter.feature_element_finished(
                        &step::location(feature, scenario),
                    );
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn step<W>(
        &mut self,
        st: &gherkin::Step,
        ev: event::Step<W>,
    ) -> Result<(), Error> {
        let (status, captures) = match ev {
            event::Step::Started => return Ok(()),
            event::Step::Skipped => {
                self.attempt.unmatched_steps += 1;
                (Status::Undefined, None)
            }
            event::Step::Passed(captures, _) => (Status::Passed, Some(captures)),
            event::Step::Failed(captures, _, _, err) => {
                self.attempt.failed_steps += 1;
                self.attempt.failed = true;
                (step::failed_status(&err), captures)
            }
        };

        self.attempt.counts.record(status);
        if !status.is_failure() {
            return Ok(());
        }

        let args = captures.as_ref().map_or_else(
            || st.value.clone(),
            |c| step::highlight_args(&st.value, c),
        );
        self.formatter.step_finished(status, &args)
    }
}

impl<S> From<ResultNotifier<S>> for Notifier<S> {
    fn from(formatter: ResultNotifier<S>) -> Self {
        Self {
            formatter,
            counts: StatusCounts::default(),
            unmatched_steps: 0,
            attempt: Attempt::default(),
            retried_steps: 0,
            parsing_errors: 0,
            hook_errors: 0,
        }
    }
}

#[async_trait(?Send)]
impl<W, S> Writer<W> for Notifier<S>
where
    W: World,
    S: Sink,
{
    type Cli = Cli;

    async fn handle_event(
        &mut self,
        event: parser::Result<Event<event::Cucumber<W>>>,
        cli: &Self::Cli,
    ) {
        use event::{Cucumber, Feature, Rule};

        match event.map(Event::into_inner) {
            Err(err) => {
                tracing::debug!(%err, "failed to parse feature");
                self.parsing_errors += 1;
                Ok(())
            }
            Ok(Cucumber::Started) => {
                self.apply_cli(cli);
                Ok(())
            }
            Ok(Cucumber::Feature(f, ev)) => match ev {
                Feature::Scenario(sc, ev)
                | Feature::Rule(_, Rule::Scenario(sc, ev)) => {
                    self.scenario(&f, &sc, ev)
                }
                Feature::Started
                | Feature::Rule(..)
                | Feature::Finished => Ok(()),
            },
            Ok(Cucumber::Finished) => {
                self.formatter.run_finished(&self.counts)
            }
            Ok(Cucumber::ParsingFinished { .. }) => Ok(()),
        }
        .unwrap_or_else(|e| panic!("{e}"));
    }
}

impl<W, S> writer::Stats<W> for Notifier<S>
where
    S: Sink,
    Self: Writer<W>,
{
    fn passed_steps(&self) -> usize {
        self.counts.passed
    }

    fn skipped_steps(&self) -> usize {
        self.counts.skipped + self.unmatched_steps
    }

    fn failed_steps(&self) -> usize {
        Status::BY_SEVERITY
            .into_iter()
            .filter(|st| st.is_failure())
            .map(|st| self.counts.get(st))
            .sum::<usize>()
            - self.unmatched_steps
    }

    fn retried_steps(&self) -> usize {
        self.retried_steps
    }

    fn parsing_errors(&self) -> usize {
        self.parsing_errors
    }

    fn hook_errors(&self) -> usize {
        self.hook_errors
    }
}

impl<S> writer::NonTransforming for Notifier<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notification;

    #[test]
    fn cli_overrides_builder() {
        let dir = tempfile::tempdir().unwrap();
        let mut notifier = Notifier::raw(Vec::<Notification>::new())
            .with_rerun_file("ignored.txt");

        notifier.apply_cli(&Cli {
            rerun_file: Some(dir.path().join("rerun.txt")),
            no_notifications: true,
        });
        notifier.feature_element_started("Login");
        notifier.step_finished(Status::Failed, "boom").unwrap();
        notifier.feature_element_finished("features/login.feature:3");
        notifier.run_finished(&StatusCounts::default()).unwrap();

        assert!(notifier.sink().is_empty());
        assert_eq!(notifier.rerun_file().path(), dir.path().join("rerun.txt"));
        assert!(dir.path().join("rerun.txt").exists());
    }

    #[test]
    fn default_cli_keeps_builder_options() {
        let mut notifier = Notifier::raw(Vec::<Notification>::new())
            .with_rerun_file("target/rerun.txt")
            .with_title("Guard");

        notifier.apply_cli(&Cli::default());

        assert_eq!(
            notifier.rerun_file().path(),
            std::path::Path::new("target/rerun.txt"),
        );
        assert_eq!(notifier.counts(), &StatusCounts::default());
    }
}
