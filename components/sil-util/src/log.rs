//! Debug log for the compiler passes.
//!
//! Enabled by the `SIL_DEBUG` environment variable:
//!
//! * `1` or `human` writes an indented text log to `sil_debug.txt`;
//! * `json` writes one JSON record per line to `sil_debug.json`.
//!
//! When the variable is unset the macros cost a single branch.

use std::{cell::Cell, fmt, fs::File, io::Write};

use serde::Serialize;

/// Log `message` with the given expressions, each labeled by its source text.
#[macro_export]
macro_rules! debug {
    ($message:literal $(, $args:expr)* $(,)?) => {
        $crate::log::debug($message, |emit| emit(&[$($crate::log::Field::new(stringify!($args), &$args),)*]))
    };
}

/// Like [`debug!`], but everything logged until the end of the enclosing
/// block is nested beneath this message.
#[macro_export]
macro_rules! debug_heading {
    ($message:literal $(, $args:expr)* $(,)?) => {
        let _nested = $crate::log::debug_heading($message, |emit| emit(&[$($crate::log::Field::new(stringify!($args), &$args),)*]));
    };
}

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

enum Sink {
    Human(File),
    Json(File),
}

/// Where a record sits relative to the nesting of headings.
#[derive(Copy, Clone, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Nesting {
    Flat,
    Open,
    Close,
}

impl Nesting {
    fn marker(self) -> &'static str {
        match self {
            Nesting::Flat => "-",
            Nesting::Open => ">",
            Nesting::Close => "<",
        }
    }
}

/// One labeled value attached to a log message.
pub struct Field<'a> {
    label: &'static str,
    value: &'a dyn fmt::Debug,
}

impl<'a> Field<'a> {
    pub fn new(label: &'static str, value: &'a dyn fmt::Debug) -> Self {
        Field { label, value }
    }
}

#[derive(Serialize)]
struct Record<'a> {
    message: &'a str,
    nesting: Nesting,
    thread: String,
    fields: Vec<(&'a str, String)>,
}

fn sink() -> Option<&'static Sink> {
    lazy_static::lazy_static! {
        static ref SINK: Option<Sink> = open_sink(std::env::var("SIL_DEBUG").ok().as_deref());
    }
    SINK.as_ref()
}

fn open_sink(setting: Option<&str>) -> Option<Sink> {
    let (path, json) = match setting? {
        "json" => ("sil_debug.json", true),
        "human" | "1" => ("sil_debug.txt", false),
        other => {
            eprintln!("SIL_DEBUG must be `json`, `human` or `1`, not `{other}`; logging disabled");
            return None;
        }
    };
    match File::create(path) {
        Ok(file) if json => Some(Sink::Json(file)),
        Ok(file) => Some(Sink::Human(file)),
        Err(err) => {
            eprintln!("SIL_DEBUG: cannot create `{path}`: {err}");
            None
        }
    }
}

#[inline]
pub fn debug(message: &'static str, fields: impl FnOnce(&dyn Fn(&[Field<'_>]))) {
    if let Some(sink) = sink() {
        fields(&|fields| emit(sink, Nesting::Flat, message, fields));
    }
}

/// Log `message` and nest everything logged on this thread beneath it
/// until the returned guard is dropped.
#[inline]
#[must_use]
pub fn debug_heading(
    message: &'static str,
    fields: impl FnOnce(&dyn Fn(&[Field<'_>])),
) -> Option<Heading> {
    let sink = sink()?;
    fields(&|fields| emit(sink, Nesting::Open, message, fields));
    Some(Heading { sink })
}

/// Closes a heading opened by [`debug_heading`].
pub struct Heading {
    sink: &'static Sink,
}

impl Drop for Heading {
    fn drop(&mut self) {
        emit(self.sink, Nesting::Close, "", &[]);
    }
}

#[cold]
fn emit(sink: &Sink, nesting: Nesting, message: &str, fields: &[Field<'_>]) {
    let depth = DEPTH.with(Cell::get);
    let depth = match nesting {
        Nesting::Close => depth.saturating_sub(1),
        Nesting::Flat | Nesting::Open => depth,
    };

    // Write failures are ignored.
    let _ = match sink {
        Sink::Human(file) => write_human(file, depth, nesting, message, fields),
        Sink::Json(file) => write_json(file, nesting, message, fields),
    };

    DEPTH.with(|cell| {
        cell.set(match nesting {
            Nesting::Open => depth + 1,
            Nesting::Flat | Nesting::Close => depth,
        })
    });
}

fn write_human(
    mut file: &File,
    depth: usize,
    nesting: Nesting,
    message: &str,
    fields: &[Field<'_>],
) -> std::io::Result<()> {
    let mut line = format!(
        "{:indent$}{:?} {} {message}",
        "",
        std::thread::current().id(),
        nesting.marker(),
        indent = depth * 2,
    );
    for field in fields {
        line.push_str(&format!(" {}={:?}", field.label, field.value));
    }
    line.push('\n');
    file.write_all(line.as_bytes())
}

fn write_json(
    mut file: &File,
    nesting: Nesting,
    message: &str,
    fields: &[Field<'_>],
) -> std::io::Result<()> {
    let record = Record {
        message,
        nesting,
        thread: format!("{:?}", std::thread::current().id()),
        fields: fields
            .iter()
            .map(|field| (field.label, format!("{:?}", field.value)))
            .collect(),
    };
    let mut line = serde_json::to_vec(&record)?;
    line.push(b'\n');
    file.write_all(&line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_setting_disables_logging() {
        assert!(open_sink(None).is_none());
    }

    #[test]
    fn unknown_setting_disables_logging() {
        assert!(open_sink(Some("verbose")).is_none());
    }

    #[test]
    fn json_record_shape() {
        let fields = [Field::new("count", &3)];
        let record = Record {
            message: "visited",
            nesting: Nesting::Open,
            thread: "ThreadId(1)".to_string(),
            fields: fields
                .iter()
                .map(|field| (field.label, format!("{:?}", field.value)))
                .collect(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"message":"visited","nesting":"open","thread":"ThreadId(1)","fields":[["count","3"]]}"#
        );
    }
}
