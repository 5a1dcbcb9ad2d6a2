//! # Stack Trace Capture
//!
//! Captures the call stack at error construction time and renders it in
//! the conventional `"<Name>: <message>"` header-plus-frames layout. The
//! first rendered frame is the call site that built the error, not the
//! error constructor itself.

use std::fmt;
use std::panic::Location;

use backtrace::Backtrace;

/// Upper bound on rendered frames per trace.
const MAX_FRAMES: usize = 32;

/// Placeholder for frames whose symbol could not be resolved.
const UNKNOWN_FRAME: &str = "<unknown>";

/// A single resolved call-site frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    function: String,
    file: Option<String>,
    line: Option<u32>,
    column: Option<u32>,
}

impl StackFrame {
    /// Full demangled function path, without the trailing hash suffix.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Source file the frame points into, when debug info is available.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// 1-based source line, when debug info is available.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// 1-based source column, when debug info is available.
    pub fn column(&self) -> Option<u32> {
        self.column
    }

    /// True for frames that belong to the capture machinery itself rather
    /// than to the code that constructed the error.
    fn is_capture_internal(&self) -> bool {
        self.function == UNKNOWN_FRAME
            || self.function.starts_with("backtrace::")
            || self.function.contains("StackTrace::capture")
            || self.function.contains("ExtensibleError::new")
            || self.function.contains("ExtensibleError::with_name")
            || self.function.contains("ExtensibleError::for_type")
    }

    /// True when this frame points at the given construction call site.
    fn matches(&self, caller: &Location<'_>) -> bool {
        self.line == Some(caller.line())
            && self
                .file
                .as_ref()
                .is_some_and(|file| std::path::Path::new(file).ends_with(caller.file()))
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let function = display_name(&self.function);
        match (&self.file, self.line) {
            (Some(file), Some(line)) => match self.column {
                Some(column) => write!(f, "at {} ({}:{}:{})", function, file, line, column),
                None => write!(f, "at {} ({}:{})", function, file, line),
            },
            _ => write!(f, "at {}", function),
        }
    }
}

/// A captured stack trace.
///
/// `Display` renders the header line followed by one indented `at` line
/// per frame, so the function identifier always starts at the same fixed
/// column. Each trace owns its frames; traces captured from separate
/// constructions never share state.
#[derive(Debug, Clone)]
pub struct StackTrace {
    header: String,
    frames: Vec<StackFrame>,
}

impl StackTrace {
    /// Capture the current call stack, dropping every frame above the
    /// construction call site.
    ///
    /// `caller` is the `#[track_caller]` location of the outermost
    /// constructor invocation. Frames belonging to the capture machinery
    /// are always removed; when a frame matching `caller` is found, any
    /// intermediate constructor frames above it are removed as well.
    pub(crate) fn capture(header: String, caller: &'static Location<'static>) -> Self {
        let raw = Backtrace::new();
        let mut frames: Vec<StackFrame> = Vec::new();
        'resolve: for frame in raw.frames() {
            for symbol in frame.symbols() {
                let function = match symbol.name() {
                    Some(name) => format!("{name:#}"),
                    None => String::from(UNKNOWN_FRAME),
                };
                // Everything below this marker is test-harness or runtime
                // startup scaffolding.
                if function.contains("__rust_begin_short_backtrace") {
                    break 'resolve;
                }
                frames.push(StackFrame {
                    function,
                    file: symbol.filename().map(|path| path.display().to_string()),
                    line: symbol.lineno(),
                    column: symbol.colno(),
                });
            }
        }

        let internal = frames
            .iter()
            .take_while(|frame| frame.is_capture_internal())
            .count();
        frames.drain(..internal);

        if let Some(anchor) = frames.iter().position(|frame| frame.matches(caller)) {
            frames.drain(..anchor);
        }
        frames.truncate(MAX_FRAMES);

        tracing::trace!(frames = frames.len(), "captured error stack trace");

        StackTrace { header, frames }
    }

    /// The `"<Name>: <message>"` line the rendered trace starts with.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Resolved frames, topmost (the throw site) first.
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header)?;
        for frame in &self.frames {
            write!(f, "\n    {}", frame)?;
        }
        Ok(())
    }
}

/// Trim a demangled symbol path down to the bare function identifier,
/// keeping the enclosing function's name for closure frames.
fn display_name(full: &str) -> &str {
    let anchor = full.strip_suffix("::{{closure}}").unwrap_or(full);
    match anchor.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
