// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rerun list of failed [`Scenario`]s.
//!
//! [`Scenario`]: cucumber::gherkin::Scenario

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::Error;

/// File holding locations of [`Scenario`]s to be rerun, separated by spaces
/// on a single line.
///
/// [`Scenario`]: cucumber::gherkin::Scenario
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RerunFile {
    path: PathBuf,
}

impl Default for RerunFile {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl RerunFile {
    /// Path of the [`RerunFile`], relative to the current directory, used
    /// when nothing else is specified.
    pub const DEFAULT_PATH: &'static str = "rerun.txt";

    /// Creates a new [`RerunFile`] located at the given `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of this [`RerunFile`].
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renders the given `locations` as the contents of a [`RerunFile`].
    #[must_use]
    pub fn render<L: AsRef<str>>(locations: &[L]) -> String {
        let mut line = locations
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        line.push('\n');
        line
    }

    /// Overwrites this [`RerunFile`] with the given `locations`.
    ///
    /// # Errors
    ///
    /// If the file cannot be created or written.
    pub fn write<L: AsRef<str>>(&self, locations: &[L]) -> Result<(), Error> {
        fs::write(&self.path, Self::render(locations)).map_err(|source| {
            Error::RerunFile { path: self.path.clone(), source }
        })?;
        tracing::info!(
            path = %self.path.display(),
            scenarios = locations.len(),
            "rerun file written",
        );
        Ok(())
    }
}
