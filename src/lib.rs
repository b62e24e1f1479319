// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`cucumber`] [`Writer`] notifying about run results.
//!
//! Every failed, pending or undefined [`Step`] produces a notification titled
//! with its [`Scenario`] name. Once the run is finished, a summary
//! notification counts the [`Step`]s per [`Status`] (most severe first), and
//! locations of the [`Scenario`]s to rerun are written into a [`RerunFile`]
//! (`rerun.txt` by default) as a single space-separated line.
//!
//! Notifications are delivered into a [`notify::Sink`]: desktop
//! ([`notify::Desktop`]), terminal ([`notify::Term`]) or any custom one.
//!
//! [`Scenario`]: cucumber::gherkin::Scenario
//! [`Step`]: cucumber::gherkin::Step
//! [`Writer`]: cucumber::Writer

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::dbg_macro,
    clippy::missing_const_for_fn,
    clippy::str_to_string,
    clippy::unwrap_used,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unused_qualifications
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod formatter;
pub mod notify;
pub mod rerun;
pub mod status;
pub mod writer;

#[doc(inline)]
pub use self::{
    error::Error,
    formatter::{Formatter, ResultNotifier, RunState},
    rerun::RerunFile,
    status::{Icon, Status, StatusCounts},
    writer::Notifier,
};
