// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI options of a [`Notifier`] [`Writer`].
//!
//! [`Notifier`]: super::Notifier
//! [`Writer`]: cucumber::Writer

use std::path::PathBuf;

/// CLI options of a [`Notifier`] [`Writer`].
///
/// [`Notifier`]: super::Notifier
/// [`Writer`]: cucumber::Writer
#[derive(Clone, Debug, Default, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Path of the file to write locations of the scenarios to rerun into.
    ///
    /// Defaults to `rerun.txt` in the current directory.
    #[arg(long = "rerun-file", value_name = "path", global = true)]
    pub rerun_file: Option<PathBuf>,

    /// Disables notifications about failed steps and the run summary.
    ///
    /// The rerun file is still written.
    #[arg(long = "no-notifications", global = true)]
    pub no_notifications: bool,
}
