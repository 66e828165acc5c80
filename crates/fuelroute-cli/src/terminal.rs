//! Terminal styling for route output.
//!
//! Renderers ask a [`Palette`] to paint text in a [`Tone`]; a disabled palette
//! paints nothing, so plain and colored output share one code path.

use std::fmt;

/// What a piece of route output represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// `STRT` badge.
    Start,
    /// `PASS` badge.
    Pass,
    /// `FUEL` badge.
    Refuel,
    /// `GOAL` badge.
    Goal,
    Node,
    Muted,
    Distance,
    FuelAmount,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Start => "\x1b[1;7;32m",
            Tone::Pass => "\x1b[1;7;36m",
            Tone::Refuel => "\x1b[1;7;33m",
            Tone::Goal => "\x1b[1;7;35m",
            Tone::Node => "\x1b[1;97m",
            Tone::Muted => "\x1b[90m",
            Tone::Distance => "\x1b[32m",
            Tone::FuelAmount => "\x1b[38;5;208m",
        }
    }
}

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub const fn colored() -> Self {
        Self { enabled: true }
    }

    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Colored unless `NO_COLOR` is set or `TERM` is `dumb`.
    pub fn from_env() -> Self {
        Self {
            enabled: color_allowed(
                std::env::var_os("NO_COLOR").is_some(),
                std::env::var("TERM").ok().as_deref(),
            ),
        }
    }

    pub fn paint<T: fmt::Display>(&self, tone: Tone, value: T) -> Painted<T> {
        Painted {
            code: self.enabled.then(|| tone.ansi()),
            value,
        }
    }
}

/// A value wrapped in a tone's escape codes when the palette is enabled.
pub struct Painted<T> {
    code: Option<&'static str>,
    value: T,
}

impl<T: fmt::Display> fmt::Display for Painted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{code}{}{RESET}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

fn color_allowed(no_color: bool, term: Option<&str>) -> bool {
    !no_color && !term.is_some_and(|term| term.eq_ignore_ascii_case("dumb"))
}
