// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Desktop [`Sink`] delegating to the notifier program of the platform.

use std::{borrow::Cow, process::Command};

use super::{Error, Notification, Sink};
use crate::Icon;

/// Program used for showing desktop notifications on the current platform.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Backend {
    /// [`osascript`] (macOS).
    ///
    /// [`osascript`]: https://ss64.com/mac/osascript.html
    OsaScript,

    /// [`notify-send`] (freedesktop compatible desktops).
    ///
    /// [`notify-send`]: https://man.archlinux.org/man/notify-send.1
    NotifySend,
}

impl Backend {
    /// Detects the [`Backend`] of the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::OsaScript
        } else {
            Self::NotifySend
        }
    }

    /// Name of the program this [`Backend`] runs.
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::OsaScript => "osascript",
            Self::NotifySend => "notify-send",
        }
    }
}

/// [`Sink`] showing [`Notification`]s on the desktop.
///
/// Every [`Notification`] spawns the notifier program and blocks until it
/// exits.
#[derive(Clone, Debug)]
pub struct Desktop {
    /// [`Backend`] to notify with.
    backend: Backend,

    /// Name of the application the [`Notification`]s are sent on behalf of.
    app_name: Cow<'static, str>,
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new()
    }
}

impl Desktop {
    /// Creates a new [`Desktop`] [`Sink`] for the current platform.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(Backend::detect())
    }

    /// Creates a new [`Desktop`] [`Sink`] using the given [`Backend`].
    #[must_use]
    pub fn with_backend(backend: Backend) -> Self {
        Self { backend, app_name: "cucumber".into() }
    }

    /// Sets the name of the application to send [`Notification`]s on behalf
    /// of.
    #[must_use]
    pub fn app_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Builds the [`Command`] delivering the given [`Notification`].
    #[must_use]
    pub fn command(&self, n: &Notification) -> Command {
        let mut cmd = Command::new(self.backend.program());
        match self.backend {
            Backend::OsaScript => {
                cmd.arg("-e").arg(format!(
                    "display notification \"{}\" with title \"{}\"",
                    escape_apple_script(&n.message),
                    escape_apple_script(&n.title),
                ));
            }
            Backend::NotifySend => {
                cmd.arg(format!("--app-name={}", self.app_name));
                if let Some(icon) = n.icon {
                    cmd.arg(format!("--icon={}", freedesktop_icon(icon)));
                }
                cmd.arg("--").arg(&n.title).arg(&n.message);
            }
        }
        cmd
    }
}

impl Sink for Desktop {
    fn notify(&mut self, notification: &Notification) -> Result<(), Error> {
        let program = self.backend.program();
        tracing::debug!(program, title = %notification.title, "notifying");

        let status = self.command(notification).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Rejected { program, status })
        }
    }
}

/// Maps an [`Icon`] to the [freedesktop icon name][1].
///
/// [1]: https://specifications.freedesktop.org/icon-naming-spec/latest
const fn freedesktop_icon(icon: Icon) -> &'static str {
    match icon {
        Icon::Success => "dialog-information",
        Icon::Pending => "dialog-warning",
        Icon::Failed => "dialog-error",
    }
}

fn escape_apple_script(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
