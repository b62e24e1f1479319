// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Notifying about results of a run as they come.

use std::{borrow::Cow, path::PathBuf};

use itertools::Itertools as _;

use crate::{
    notify::{Notification, Sink},
    Error, Icon, RerunFile, Status, StatusCounts,
};

/// Receiver of run lifecycle callbacks.
///
/// Callbacks are invoked in the following order: for every feature element
/// (a [`Scenario`] or an expanded example) [`feature_element_started()`], then
/// [`step_finished()`] for each of its [`Step`]s, then
/// [`feature_element_finished()`]. Once all the feature elements are done,
/// [`run_finished()`] is invoked.
///
/// [`feature_element_finished()`]: Formatter::feature_element_finished
/// [`feature_element_started()`]: Formatter::feature_element_started
/// [`run_finished()`]: Formatter::run_finished
/// [`step_finished()`]: Formatter::step_finished
/// [`Scenario`]: cucumber::gherkin::Scenario
/// [`Step`]: cucumber::gherkin::Step
pub trait Formatter {
    /// Error of reporting.
    type Error;

    /// Handles the start of the feature element with the given `name`.
    fn feature_element_started(&mut self, name: &str);

    /// Handles the given `status` of a finished [`Step`], with its `args`
    /// rendered into the [`Step`] text.
    ///
    /// # Errors
    ///
    /// If reporting the [`Step`] fails.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    fn step_finished(
        &mut self,
        status: Status,
        args: &str,
    ) -> Result<(), Self::Error>;

    /// Handles the end of the current feature element located at the given
    /// `location`.
    fn feature_element_finished(&mut self, location: &str);

    /// Handles the end of the whole run with the given [`StatusCounts`].
    ///
    /// # Errors
    ///
    /// If reporting the run fails.
    fn run_finished(&mut self, counts: &StatusCounts)
        -> Result<(), Self::Error>;
}

/// State of a single run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunState {
    /// Locations of the feature elements to rerun, in order of finishing.
    rerun_locations: Vec<String>,

    /// Name of the feature element being run.
    current_name: String,

    /// Indicator whether the current feature element has a failed step.
    pending_rerun: bool,
}

impl RunState {
    /// Returns the locations of the feature elements to rerun.
    #[must_use]
    pub fn rerun_locations(&self) -> &[String] {
        &self.rerun_locations
    }

    /// Returns the name of the feature element being run.
    #[must_use]
    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    /// Indicates whether the current feature element should be rerun.
    #[must_use]
    pub const fn pending_rerun(&self) -> bool {
        self.pending_rerun
    }

    fn start(&mut self, name: &str) {
        name.clone_into(&mut self.current_name);
        self.pending_rerun = false;
    }

    fn finish(&mut self, location: &str) -> bool {
        let rerun = std::mem::take(&mut self.pending_rerun);
        if rerun {
            self.rerun_locations.push(location.to_owned());
        }
        rerun
    }
}

/// [`Formatter`] sending a [`Notification`] for every failed [`Step`] and a
/// summary one at the end of a run, and writing a [`RerunFile`] with the
/// failed feature elements.
///
/// [`Step`]: cucumber::gherkin::Step
#[derive(Clone, Debug)]
pub struct ResultNotifier<S> {
    /// [`Sink`] to deliver [`Notification`]s into.
    sink: S,

    /// [`RerunFile`] to write failed feature elements into.
    rerun_file: RerunFile,

    /// Title of the summary [`Notification`].
    title: Cow<'static, str>,

    /// Indicator whether [`Notification`]s are suppressed.
    silenced: bool,

    /// [`RunState`] of the current run.
    state: RunState,
}

impl<S: Sink> ResultNotifier<S> {
    /// Default title of the summary [`Notification`].
    pub const DEFAULT_TITLE: &'static str = "Cucumber Results";

    /// Creates a new [`ResultNotifier`] delivering [`Notification`]s into the
    /// given [`Sink`].
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            rerun_file: RerunFile::default(),
            title: Self::DEFAULT_TITLE.into(),
            silenced: false,
            state: RunState::default(),
        }
    }

    /// Sets the title of the summary [`Notification`].
    #[must_use]
    pub fn with_title(mut self, title: impl Into<Cow<'static, str>>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the path of the [`RerunFile`].
    #[must_use]
    pub fn with_rerun_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.set_rerun_file(path);
        self
    }

    /// Sets the path of the [`RerunFile`].
    pub fn set_rerun_file(&mut self, path: impl Into<PathBuf>) {
        self.rerun_file = RerunFile::new(path);
    }

    /// Suppresses (or enables back) delivering [`Notification`]s.
    ///
    /// The [`RerunFile`] is written regardless.
    pub fn silence(&mut self, silenced: bool) {
        self.silenced = silenced;
    }

    /// Returns the [`RunState`] of the current run.
    #[must_use]
    pub const fn state(&self) -> &RunState {
        &self.state
    }

    /// Returns the [`RerunFile`] written at the end of a run.
    #[must_use]
    pub const fn rerun_file(&self) -> &RerunFile {
        &self.rerun_file
    }

    /// Returns the [`Sink`] of this [`ResultNotifier`].
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the [`Sink`] of this [`ResultNotifier`].
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn notify(&mut self, notification: &Notification) -> Result<(), Error> {
        if self.silenced {
            return Ok(());
        }
        self.sink.notify(notification).map_err(Error::from)
    }
}

impl<S: Sink> Formatter for ResultNotifier<S> {
    type Error = Error;

    fn feature_element_started(&mut self, name: &str) {
        tracing::debug!(name, "feature element started");
        self.state.start(name);
    }

    fn step_finished(&mut self, status: Status, args: &str) -> Result<(), Error> {
        if !status.is_failure() {
            return Ok(());
        }
        tracing::debug!(
            element = %self.state.current_name,
            %status,
            step = args,
            "step requires rerun",
        );
        self.state.pending_rerun = true;

        let notification = Notification::new(
            self.state.current_name.clone(),
            args,
            Some(status.icon()),
        );
        self.notify(&notification)
    }

    fn feature_element_finished(&mut self, location: &str) {
        if self.state.finish(location) {
            tracing::debug!(location, "feature element marked for rerun");
        }
    }

    fn run_finished(&mut self, counts: &StatusCounts) -> Result<(), Error> {
        let notification = Notification::new(
            self.title.clone(),
            summary(counts),
            summary_icon(counts),
        );
        tracing::info!(
            summary = %notification.message,
            rerun = self.state.rerun_locations.len(),
            "run finished",
        );
        self.notify(&notification)?;

        if !self.state.rerun_locations.is_empty() {
            self.rerun_file.write(&self.state.rerun_locations)?;
        }
        Ok(())
    }
}

/// Renders the given [`StatusCounts`] as a summary message, most severe
/// [`Status`] first.
///
/// Empty if no [`Step`]s have been run.
///
/// [`Step`]: cucumber::gherkin::Step
#[must_use]
pub fn summary(counts: &StatusCounts) -> String {
    counts
        .present()
        .map(|st| format!("{} {st}", steps(counts.get(st))))
        .join(", ")
}

/// Picks the [`Icon`] of the most severe [`Status`] present in the given
/// [`StatusCounts`].
#[must_use]
pub fn summary_icon(counts: &StatusCounts) -> Option<Icon> {
    counts.present().next().map(Status::icon)
}

fn steps(n: usize) -> String {
    format!("{n} step{}", if n == 1 { "" } else { "s" })
}
