// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Terminal [`Sink`] printing [`Notification`]s as lines.

use std::{borrow::Cow, io, str::FromStr};

use console::Style;
use derive_more::with_trait::{Deref, DerefMut};

use super::{Error, Notification, Sink};
use crate::Icon;

/// Possible policies of a [`console`] output coloring.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Coloring {
    /// Letting [`console::colors_enabled_stderr()`] to decide, whether output
    /// should be colored.
    Auto,

    /// Forcing of a colored output.
    Always,

    /// Forcing of a non-colored output.
    Never,
}

impl FromStr for Coloring {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err("possible options: auto, always, never"),
        }
    }
}

/// [`Style`]s of the [`Notification`] [`Icon`]s.
#[derive(Clone, Debug)]
pub struct Styles {
    /// [`Style`] for [`Icon::Success`].
    pub success: Style,

    /// [`Style`] for [`Icon::Pending`].
    pub pending: Style,

    /// [`Style`] for [`Icon::Failed`].
    pub failed: Style,

    /// [`Style`] for [`Notification::title`]s.
    pub title: Style,

    /// Indicates whether the output should be colored.
    pub is_present: bool,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            success: Style::new().green(),
            pending: Style::new().cyan(),
            failed: Style::new().red(),
            title: Style::new().bold(),
            is_present: console::Term::stderr().is_term()
                && console::colors_enabled_stderr(),
        }
    }
}

impl Styles {
    /// Applies the given [`Coloring`] to these [`Styles`].
    pub fn apply_coloring(&mut self, color: Coloring) {
        match color {
            Coloring::Auto => {}
            Coloring::Always => self.is_present = true,
            Coloring::Never => self.is_present = false,
        }
    }

    /// Colors `input` according to the given [`Icon`], if coloring is
    /// enabled, or leaves it "as is" otherwise.
    #[must_use]
    pub fn icon<'a>(
        &self,
        icon: Option<Icon>,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        let style = match icon {
            Some(Icon::Success) => &self.success,
            Some(Icon::Pending) => &self.pending,
            Some(Icon::Failed) => &self.failed,
            None => return input.into(),
        };
        self.apply(style, input)
    }

    /// Makes `input` __bold__ if coloring is enabled, or leaves it "as is"
    /// otherwise.
    #[must_use]
    pub fn title<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.title, input)
    }

    fn apply<'a>(
        &self,
        style: &Style,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        if self.is_present {
            style
                .clone()
                .force_styling(true)
                .apply_to(input.into())
                .to_string()
                .into()
        } else {
            input.into()
        }
    }
}

/// [`Sink`] writing [`Notification`]s into an [`io::Write`] implementor
/// ([`io::Stderr`] by default), one per line.
#[derive(Clone, Debug, Deref, DerefMut)]
pub struct Term<Out: io::Write = io::Stderr> {
    /// [`io::Write`] implementor to write [`Notification`]s into.
    #[deref]
    #[deref_mut]
    output: Out,

    /// [`Styles`] for the output.
    styles: Styles,
}

impl Term {
    /// Creates a new [`Term`] [`Sink`] writing into [`io::Stderr`].
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr(), Coloring::Auto)
    }
}

impl<Out: io::Write> Term<Out> {
    /// Creates a new [`Term`] [`Sink`] writing into the given `output`.
    #[must_use]
    pub fn new(output: Out, color: Coloring) -> Self {
        let mut styles = Styles::default();
        styles.apply_coloring(color);
        Self { output, styles }
    }

    /// Returns the [`io::Write`] implementor of this [`Term`].
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }
}

impl<Out: io::Write> Sink for Term<Out> {
    fn notify(&mut self, n: &Notification) -> Result<(), Error> {
        let label = n.icon.map_or_else(String::new, |i| format!("[{i}] "));
        writeln!(
            self.output,
            "{}{}: {}",
            self.styles.icon(n.icon, label),
            self.styles.title(n.title.as_str()),
            n.message,
        )
        .and_then(|()| self.output.flush())
        .map_err(Error::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_plain_lines() {
        let mut term = Term::new(Vec::<u8>::new(), Coloring::Never);
        term.notify(&Notification::new(
            "Login",
            "I log in as *bob*",
            Some(Icon::Failed),
        ))
        .unwrap();
        term.notify(&Notification::new("Cucumber Results", "", None))
            .unwrap();

        assert_eq!(
            String::from_utf8(term.into_inner()).unwrap(),
            "[failed] Login: I log in as *bob*\nCucumber Results: \n",
        );
    }

    #[test]
    fn colors_when_forced() {
        let mut term = Term::new(Vec::<u8>::new(), Coloring::Always);
        term.notify(&Notification::new("t", "m", Some(Icon::Success)))
            .unwrap();

        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.contains("\u{1b}["), "no escape sequences in {out:?}");
        assert!(out.contains("[success]"));
    }

    #[test]
    fn parses_coloring() {
        assert_eq!("Never".parse(), Ok(Coloring::Never));
        assert_eq!("always".parse(), Ok(Coloring::Always));
        assert!("sometimes".parse::<Coloring>().is_err());
    }
}
