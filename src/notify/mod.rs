// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sinks of [`Notification`]s.

pub mod desktop;
pub mod term;

use std::{io, process::ExitStatus};

use derive_more::{Display, Error, From};

use crate::Icon;

#[doc(inline)]
pub use self::{desktop::Desktop, term::Term};

/// Notification to be shown to a user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    /// Title of this [`Notification`].
    pub title: String,

    /// Text of this [`Notification`].
    pub message: String,

    /// [`Icon`] of this [`Notification`].
    ///
    /// [`None`] only for a summary of a run without any steps.
    pub icon: Option<Icon>,
}

impl Notification {
    /// Creates a new [`Notification`].
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        icon: Option<Icon>,
    ) -> Self {
        Self { title: title.into(), message: message.into(), icon }
    }
}

/// Capability of delivering [`Notification`]s.
///
/// Delivery is synchronous: [`Sink::notify()`] returns once the
/// [`Notification`] has been handed over (or failed to be).
pub trait Sink {
    /// Delivers the given [`Notification`].
    ///
    /// # Errors
    ///
    /// If the [`Notification`] cannot be delivered.
    fn notify(&mut self, notification: &Notification) -> Result<(), Error>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn notify(&mut self, notification: &Notification) -> Result<(), Error> {
        (**self).notify(notification)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn notify(&mut self, notification: &Notification) -> Result<(), Error> {
        (**self).notify(notification)
    }
}

/// Records all the delivered [`Notification`]s.
impl Sink for Vec<Notification> {
    fn notify(&mut self, notification: &Notification) -> Result<(), Error> {
        self.push(notification.clone());
        Ok(())
    }
}

/// Failure of a notification [`Sink`].
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Notifier program failed to start.
    #[display("failed to run notifier: {_0}")]
    Spawn(io::Error),

    /// Notifier program has exited unsuccessfully.
    #[display("`{program}` rejected notification: {status}")]
    #[from(ignore)]
    Rejected {
        /// Name of the notifier program.
        #[error(not(source))]
        program: &'static str,

        /// [`ExitStatus`] of the notifier program.
        #[error(not(source))]
        status: ExitStatus,
    },

    /// Failed to write a [`Notification`] into an output.
    #[display("failed to write notification: {_0}")]
    #[from(ignore)]
    Io(io::Error),
}
