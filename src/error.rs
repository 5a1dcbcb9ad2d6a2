//! # Extensible Base Error
//!
//! The root type for building error hierarchies. Every value carries the
//! reported class name of the most-derived type that constructed it, the
//! caller-supplied message, and a stack trace anchored at the construction
//! call site. Derived types embed this type (directly or through their
//! parent) and thread their own name down at construction.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

use crate::stack::StackTrace;

/// Root of an error hierarchy.
///
/// Constructing the type directly reports the name `"ExtensibleError"`.
/// Derived types pick one of two strategies for their own name:
///
/// - [`ExtensibleError::with_name`]: the derived constructor passes its
///   declared name down explicitly, the way a subclass constructor calls
///   through to its base.
/// - [`ExtensibleError::for_type`]: the name is read from the concrete
///   type's runtime type name, so the derived type writes no name at all.
///
/// The [`define_error!`](crate::define_error) macro generates the whole
/// derivation for field-less and field-carrying classes alike.
///
/// # Examples
///
/// ```rust
/// use extensible_error::ExtensibleError;
///
/// let err = ExtensibleError::new("It went bad!");
/// assert_eq!(err.name(), "ExtensibleError");
/// assert_eq!(err.to_string(), "ExtensibleError: It went bad!");
/// assert!(err.stack().to_string().starts_with("ExtensibleError: It went bad!"));
/// ```
#[derive(Debug)]
pub struct ExtensibleError {
    name: Cow<'static, str>,
    message: String,
    stack: StackTrace,
}

impl ExtensibleError {
    /// Construct the base type directly.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_name("ExtensibleError", message)
    }

    /// Construct with an explicitly supplied class name.
    ///
    /// This is the call a derived type's constructor makes in place of
    /// `super(message)`: the most-derived class threads its own name down
    /// through every intermediate level to here.
    #[track_caller]
    pub fn with_name(name: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let header = render_header(&name, &message);
        let stack = StackTrace::capture(header, Location::caller());
        Self {
            name,
            message,
            stack,
        }
    }

    /// Construct with the name taken from `C`'s runtime type name.
    ///
    /// Only the final path segment is kept, so
    /// `for_type::<my_app::ConfigError>(..)` reports `"ConfigError"`.
    #[track_caller]
    pub fn for_type<C: 'static>(message: impl Into<String>) -> Self {
        Self::with_name(short_type_name::<C>(), message)
    }

    /// Reported class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Message supplied at construction.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Stack trace captured at the construction call site.
    pub fn stack(&self) -> &StackTrace {
        &self.stack
    }
}

impl fmt::Display for ExtensibleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The stack header is rendered from name and message at
        // construction, so the trace always starts with exactly this text.
        f.write_str(self.stack.header())
    }
}

impl std::error::Error for ExtensibleError {}

/// Render the `"<name>: <message>"` header. An empty message renders the
/// name alone, matching how native error formatting treats it.
fn render_header(name: &str, message: &str) -> String {
    if message.is_empty() {
        name.to_string()
    } else {
        format!("{name}: {message}")
    }
}

/// Final path segment of `std::any::type_name::<C>()`, with any generic
/// arguments stripped first.
fn short_type_name<C: 'static>() -> &'static str {
    let full = std::any::type_name::<C>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
