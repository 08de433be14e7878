use std::fmt::Display;

use crate::span::AbsoluteSpan;

mod render;

/// A diagnostic to be reported to the user.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Diagnostic {
    /// Level of the message.
    pub level: Level,

    /// Location of the message; `None` for synthetic tokens.
    pub span: Option<AbsoluteSpan>,

    /// Message to be printed.
    pub message: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Note,
    Help,
    Info,
    Warning,
    Error,
}

/// Options for [`Diagnostic::render`].
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Render without ANSI color codes.
    pub no_color: bool,
}

impl Diagnostic {
    pub fn error(span: Option<AbsoluteSpan>, message: impl Display) -> Self {
        Self::new(Level::Error, span, message)
    }

    pub fn new(level: Level, span: Option<AbsoluteSpan>, message: impl Display) -> Self {
        Diagnostic {
            level,
            span,
            message: message.to_string(),
        }
    }

    /// Render the diagnostic, with a source excerpt when it has a location.
    pub fn render(&self, opts: &RenderOptions) -> String {
        render::render(opts, self)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.span {
            Some(span) => write!(
                f,
                "{}:{}: {:?}: {}",
                span.source_file.path(),
                span.span.start.as_usize(),
                self.level,
                self.message
            ),
            None => write!(f, "{:?}: {}", self.level, self.message),
        }
    }
}
