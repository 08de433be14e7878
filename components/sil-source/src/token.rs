use std::{
    fmt::Display,
    sync::{Arc, OnceLock},
};

use sil_util::Text;

use crate::{
    diagnostic::Diagnostic,
    span::{AbsoluteSpan, SourceFile, Span},
};

/// A source-location handle that can carry one error.
///
/// Clones share the error slot, so an error attached through any clone is
/// visible through all of them. Attaching is first-error-wins and atomic:
/// when two threads race to flag the same token, exactly one message is kept.
#[derive(Clone)]
pub struct Token {
    data: Arc<TokenData>,
}

struct TokenData {
    text: Text,
    location: Option<AbsoluteSpan>,
    error: OnceLock<Diagnostic>,
}

impl Token {
    /// Token for the text at `span` in `source_file`.
    pub fn new(source_file: &SourceFile, span: Span) -> Self {
        let text = Text::from(source_file.text(span));
        Self::with_location(
            text,
            Some(AbsoluteSpan {
                source_file: source_file.clone(),
                span,
            }),
        )
    }

    /// Token for compiler-generated names that have no place in any source file.
    pub fn synthetic(text: impl Into<Text>) -> Self {
        Self::with_location(text.into(), None)
    }

    fn with_location(text: Text, location: Option<AbsoluteSpan>) -> Self {
        Token {
            data: Arc::new(TokenData {
                text,
                location,
                error: OnceLock::new(),
            }),
        }
    }

    pub fn text(&self) -> &str {
        &self.data.text
    }

    pub fn location(&self) -> Option<&AbsoluteSpan> {
        self.data.location.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.data.error.get().is_some()
    }

    /// The error attached to this token, if any.
    pub fn error(&self) -> Option<&Diagnostic> {
        self.data.error.get()
    }

    /// Attach an error unless the token already has one.
    ///
    /// Returns `true` if this call attached the error.
    pub fn add_error(&self, message: impl Display) -> bool {
        let diagnostic = Diagnostic::error(self.location().cloned(), message);
        self.data.error.set(diagnostic).is_ok()
    }

    /// True if `self` and `other` are clones of the same token.
    pub fn same_token(&self, other: &Token) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut dbg = f.debug_struct("Token");
        dbg.field("text", &self.text());
        if let Some(location) = self.location() {
            dbg.field("location", location);
        }
        if let Some(error) = self.error() {
            dbg.field("error", &error.message);
        }
        dbg.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_wins() {
        let token = Token::synthetic("Foo");
        assert!(!token.has_error());
        assert!(token.add_error("first"));
        assert!(!token.add_error("second"));
        assert_eq!(token.error().unwrap().message, "first");
    }

    #[test]
    fn clones_share_the_error() {
        let token = Token::synthetic("T");
        let clone = token.clone();
        clone.add_error("shadowed");
        assert!(token.has_error());
        assert!(token.same_token(&clone));
        assert!(!token.same_token(&Token::synthetic("T")));
    }

    #[test]
    fn text_comes_from_source() {
        let file = SourceFile::new("a.sil", "type Foo { }");
        let token = Token::new(&file, Span::new(5usize, 8usize));
        assert_eq!(token.text(), "Foo");
        assert_eq!(token.location().unwrap().range(), 5..8);
    }

    #[test]
    fn racing_threads_keep_one_error() {
        let token = Token::synthetic("x");
        let attached: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let token = token.clone();
                    s.spawn(move || token.add_error(format!("error {i}")) as usize)
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });
        assert_eq!(attached, 1);
        assert!(token.has_error());
    }
}
