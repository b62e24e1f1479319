// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of reporting a run.

use std::{io, path::PathBuf};

use derive_more::{Display, Error, From};

use crate::notify;

/// Failure of reporting a run.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Notification [`Sink`] is unavailable or rejected a notification.
    ///
    /// [`Sink`]: notify::Sink
    #[display("Failed to notify: {_0}")]
    Notification(notify::Error),

    /// [`RerunFile`] cannot be created or written.
    ///
    /// [`RerunFile`]: crate::RerunFile
    #[display("Failed to write `{}`: {source}", path.display())]
    #[from(ignore)]
    RerunFile {
        /// Path of the [`RerunFile`].
        ///
        /// [`RerunFile`]: crate::RerunFile
        #[error(not(source))]
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },
}

impl Error {
    /// Indicates whether this [`Error`] comes from a notification [`Sink`].
    ///
    /// [`Sink`]: notify::Sink
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        matches!(self, Self::Notification(_))
    }
}
