// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Statuses of finished [`Step`]s and their notification [`Icon`]s.
//!
//! [`Step`]: cucumber::gherkin::Step

use derive_more::with_trait::Display;

/// Status a [`Step`] has finished with.
///
/// [`Step`]: cucumber::gherkin::Step
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Status {
    /// [`Step`] has passed.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    #[display("passed")]
    Passed,

    /// [`Step`] has failed.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    #[display("failed")]
    Failed,

    /// [`Step`] matched a step function which isn't implemented yet.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    #[display("pending")]
    Pending,

    /// [`Step`] doesn't match any step function.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    #[display("undefined")]
    Undefined,

    /// [`Step`] has been skipped.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    #[display("skipped")]
    Skipped,
}

impl Status {
    /// All the [`Status`]es, most severe first.
    pub const BY_SEVERITY: [Self; 5] = [
        Self::Failed,
        Self::Skipped,
        Self::Undefined,
        Self::Pending,
        Self::Passed,
    ];

    /// Indicates whether a [`Scenario`] containing a [`Step`] with this
    /// [`Status`] should be rerun.
    ///
    /// [`Scenario`]: cucumber::gherkin::Scenario
    /// [`Step`]: cucumber::gherkin::Step
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Pending | Self::Undefined)
    }

    /// Returns the [`Icon`] to notify about this [`Status`] with.
    #[must_use]
    pub const fn icon(self) -> Icon {
        match self {
            Self::Passed => Icon::Success,
            Self::Pending | Self::Undefined | Self::Skipped => Icon::Pending,
            Self::Failed => Icon::Failed,
        }
    }
}

/// Image of a notification.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Icon {
    /// Everything went fine.
    #[display("success")]
    Success,

    /// Something is not finished yet.
    #[display("pending")]
    Pending,

    /// Something went wrong.
    #[display("failed")]
    Failed,
}

/// Number of [`Step`]s finished with each [`Status`].
///
/// [`Step`]: cucumber::gherkin::Step
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StatusCounts {
    /// Number of [`Status::Passed`] [`Step`]s.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    pub passed: usize,

    /// Number of [`Status::Failed`] [`Step`]s.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    pub failed: usize,

    /// Number of [`Status::Pending`] [`Step`]s.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    pub pending: usize,

    /// Number of [`Status::Undefined`] [`Step`]s.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    pub undefined: usize,

    /// Number of [`Status::Skipped`] [`Step`]s.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    pub skipped: usize,
}

impl StatusCounts {
    /// Returns the number of [`Step`]s with the given [`Status`].
    ///
    /// [`Step`]: cucumber::gherkin::Step
    #[must_use]
    pub const fn get(&self, status: Status) -> usize {
        match status {
            Status::Passed => self.passed,
            Status::Failed => self.failed,
            Status::Pending => self.pending,
            Status::Undefined => self.undefined,
            Status::Skipped => self.skipped,
        }
    }

    /// Records one more [`Step`] with the given [`Status`].
    ///
    /// [`Step`]: cucumber::gherkin::Step
    pub fn record(&mut self, status: Status) {
        *self.get_mut(status) += 1;
    }

    fn get_mut(&mut self, status: Status) -> &mut usize {
        match status {
            Status::Passed => &mut self.passed,
            Status::Failed => &mut self.failed,
            Status::Pending => &mut self.pending,
            Status::Undefined => &mut self.undefined,
            Status::Skipped => &mut self.skipped,
        }
    }

    /// Adds the `other` [`StatusCounts`] to these ones.
    pub fn merge(&mut self, other: &Self) {
        for st in Status::BY_SEVERITY {
            *self.get_mut(st) += other.get(st);
        }
    }

    /// Returns the [`Status`]es having at least one [`Step`], most severe
    /// first.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    pub fn present(&self) -> impl Iterator<Item = Status> + '_ {
        Status::BY_SEVERITY
            .into_iter()
            .filter(|st| self.get(*st) > 0)
    }

    /// Returns the total number of [`Step`]s.
    ///
    /// [`Step`]: cucumber::gherkin::Step
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.pending + self.undefined + self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_class() {
        assert!(Status::Failed.is_failure());
        assert!(Status::Pending.is_failure());
        assert!(Status::Undefined.is_failure());
        assert!(!Status::Passed.is_failure());
        assert!(!Status::Skipped.is_failure());
    }

    #[test]
    fn icons() {
        assert_eq!(Status::Passed.icon(), Icon::Success);
        assert_eq!(Status::Pending.icon(), Icon::Pending);
        assert_eq!(Status::Undefined.icon(), Icon::Pending);
        assert_eq!(Status::Skipped.icon(), Icon::Pending);
        assert_eq!(Status::Failed.icon(), Icon::Failed);
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(Status::Undefined.to_string(), "undefined");
        assert_eq!(Icon::Success.to_string(), "success");
    }

    #[test]
    fn present_statuses_follow_severity() {
        let mut counts = StatusCounts::default();
        for st in [Status::Passed, Status::Pending, Status::Failed] {
            counts.record(st);
        }
        counts.record(Status::Passed);

        assert_eq!(
            counts.present().collect::<Vec<_>>(),
            [Status::Failed, Status::Pending, Status::Passed],
        );
        assert_eq!(counts.get(Status::Passed), 2);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn merges_counts() {
        let mut total = StatusCounts {
            passed: 3,
            failed: 1,
            ..StatusCounts::default()
        };
        total.merge(&StatusCounts {
            passed: 2,
            undefined: 1,
            ..StatusCounts::default()
        });

        assert_eq!(
            total,
            StatusCounts {
                passed: 5,
                failed: 1,
                undefined: 1,
                ..StatusCounts::default()
            },
        );
    }

    #[test]
    fn nothing_present_when_empty() {
        assert_eq!(StatusCounts::default().present().count(), 0);
    }
}
