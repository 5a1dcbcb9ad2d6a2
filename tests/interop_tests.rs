//! Composition with Application-Level Error Types
//!
//! Applications wrap their dependencies' errors in their own failure
//! enums. Hierarchy classes must slot into that pattern like any other
//! error value: `#[from]` conversion, `?` propagation, and `source()`
//! access to the original class.

use extensible_error::{ErrorClass, define_error};
use thiserror::Error;

define_error! {
    /// Raised when the cache has no entry for a key.
    pub struct CacheMissError;
}

#[derive(Debug, Error)]
enum AppFailure {
    #[error("cache layer: {0}")]
    Cache(#[from] CacheMissError),

    #[error("io layer: {0}")]
    Io(#[from] std::io::Error),
}

fn lookup() -> Result<String, AppFailure> {
    Err(CacheMissError::new("no entry for key 'user:42'"))?
}

#[test]
fn test_question_mark_converts_into_the_app_enum() {
    let failure = lookup().unwrap_err();
    match failure {
        AppFailure::Cache(err) => {
            assert_eq!(err.name(), "CacheMissError");
            assert_eq!(err.message(), "no entry for key 'user:42'");
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn test_wrapped_class_keeps_its_conventional_rendering() {
    let failure = lookup().unwrap_err();
    assert_eq!(
        failure.to_string(),
        "cache layer: CacheMissError: no entry for key 'user:42'"
    );
}

#[test]
fn test_source_exposes_the_original_class() {
    let failure = lookup().unwrap_err();
    let source = std::error::Error::source(&failure).expect("thiserror wires up source()");
    let class = source
        .downcast_ref::<CacheMissError>()
        .expect("source downcasts back to the class");
    assert_eq!(class.name(), "CacheMissError");
}

#[test]
fn test_other_variants_are_unaffected() {
    let failure: AppFailure =
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert_eq!(failure.to_string(), "io layer: gone");
}
