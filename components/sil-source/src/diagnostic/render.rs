use annotate_snippets::{Message, Renderer, Snippet};

use super::{Diagnostic, Level, RenderOptions};

pub(super) fn render(opts: &RenderOptions, diagnostic: &Diagnostic) -> String {
    let message = to_message(diagnostic);
    renderer(opts).render(message).to_string()
}

fn renderer(opts: &RenderOptions) -> Renderer {
    if opts.no_color {
        Renderer::plain()
    } else {
        Renderer::styled()
    }
}

fn to_level(level: Level) -> annotate_snippets::Level {
    match level {
        Level::Note => annotate_snippets::Level::Note,
        Level::Warning => annotate_snippets::Level::Warning,
        Level::Info => annotate_snippets::Level::Info,
        Level::Help => annotate_snippets::Level::Help,
        Level::Error => annotate_snippets::Level::Error,
    }
}

fn to_message(diagnostic: &Diagnostic) -> Message<'_> {
    let title = to_level(diagnostic.level).title(&diagnostic.message);
    match &diagnostic.span {
        Some(span) => title.snippet(
            Snippet::source(span.source_file.contents())
                .line_start(1)
                .origin(span.source_file.path())
                .fold(true)
                .annotation(to_level(diagnostic.level).span(span.range()).label("here")),
        ),
        None => title,
    }
}

#[cfg(test)]
mod tests {
    use crate::{SourceFile, Span, Token};

    use super::*;

    #[test]
    fn plain_render_names_file_and_message() {
        let file = SourceFile::new("lib.sil", "type Foo\n  fun Foo()\n");
        let token = Token::new(&file, Span::new(15usize, 18usize));
        token.add_error("name must not be same as parent scope");

        let text = token
            .error()
            .unwrap()
            .render(&RenderOptions { no_color: true });
        assert!(text.contains("error: name must not be same as parent scope"));
        assert!(text.contains("lib.sil"));
        assert!(text.contains("fun Foo()"));
    }

    #[test]
    fn synthetic_render_has_title_only() {
        let diagnostic = Diagnostic::error(None, "oops");
        let text = diagnostic.render(&RenderOptions { no_color: true });
        assert_eq!(text.trim(), "error: oops");
    }
}
