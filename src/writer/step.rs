// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Helpers turning [`cucumber`] events into [`Formatter`] inputs.
//!
//! [`Formatter`]: crate::Formatter

use std::{
    any::Any,
    env,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use cucumber::{event::StepError, gherkin};
use regex::CaptureLocations;

use crate::Status;

/// Returns the [`Status`] of a [`Step`] failed with the given [`StepError`].
///
/// [`Step`]: gherkin::Step
#[allow(unreachable_patterns)] // not every `StepError` has `NotFound`
#[must_use]
pub fn failed_status(err: &StepError) -> Status {
    match err {
        StepError::Panic(info) if is_pending(&**info) => Status::Pending,
        StepError::Panic(_) | StepError::AmbiguousMatch(_) => Status::Failed,
        _ => Status::Undefined,
    }
}

/// Indicates whether the given panic payload comes from [`todo!`] or
/// [`unimplemented!`].
#[must_use]
pub fn is_pending(payload: &(dyn Any + Send)) -> bool {
    payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .is_some_and(|msg| {
            msg.starts_with("not yet implemented")
                || msg.starts_with("not implemented")
        })
}

/// Wraps the `value`s matched by the given `captures` into asterisks.
///
/// Nested groups are not wrapped on their own.
#[must_use]
pub fn highlight_args(value: &str, captures: &CaptureLocations) -> String {
    let (mut formatted, end) =
        (1..captures.len()).filter_map(|group| captures.get(group)).fold(
            (String::with_capacity(value.len() + 2 * captures.len()), 0),
            |(mut out, old), (start, end)| {
                if old > start {
                    return (out, old);
                }

                out.push_str(&value[old..start]);
                out.push('*');
                out.push_str(&value[start..end]);
                out.push('*');
                (out, end)
            },
        );
    formatted.push_str(&value[end..]);

    formatted
}

/// Renders the location of the given [`Scenario`] as `<path>:<line>`, with the
/// path relative to the current project directory.
///
/// [`Scenario`]: gherkin::Scenario
#[must_use]
pub fn location(
    feature: &gherkin::Feature,
    scenario: &gherkin::Scenario,
) -> String {
    let path = feature.path.as_deref().map_or_else(
        || feature.name.clone(),
        |p| trim_path(p).display().to_string(),
    );
    format!("{path}:{}", scenario.position.line)
}

/// Trims start of the `path` if it matches the current project directory.
fn trim_path(path: &Path) -> &Path {
    /// Path of the current project directory.
    static CURRENT_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
        env::var_os("CARGO_WORKSPACE_DIR")
            .or_else(|| env::var_os("CARGO_MANIFEST_DIR"))
            .map(PathBuf::from)
            .or_else(|| env::current_dir().ok())
            .unwrap_or_default()
    });

    path.strip_prefix(&*CURRENT_DIR).unwrap_or(path)
}
