//! # Extensible Error
//!
//! A base error type for building error hierarchies that keep the native
//! error semantics intact: every value reports the name of the
//! most-derived class that constructed it, renders as
//! `"<Name>: <message>"`, satisfies ancestry checks across any number of
//! derivation levels, behaves as an ordinary [`std::error::Error`], and
//! carries a stack trace whose first frame is the function that threw,
//! not the error constructor.
//!
//! ```rust
//! use extensible_error::{define_error, ErrorClass, ExtensibleError};
//!
//! define_error! {
//!     /// Raised when the widget cache has no entry.
//!     pub struct CacheMissError;
//! }
//!
//! let err = CacheMissError::new("no entry for 'widget-7'");
//! assert_eq!(err.name(), "CacheMissError");
//! assert_eq!(err.to_string(), "CacheMissError: no entry for 'widget-7'");
//! assert!(err.instance_of::<ExtensibleError>());
//! assert!(err.stack().to_string().starts_with("CacheMissError: no entry for 'widget-7'"));
//! ```

pub mod class;
pub mod error;
mod macros;
pub mod stack;

pub use class::ErrorClass;
pub use error::ExtensibleError;
pub use stack::{StackFrame, StackTrace};
