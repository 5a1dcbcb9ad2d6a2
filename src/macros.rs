//! # Hierarchy Definition Macro
//!
//! `define_error!` generates a complete error class: the struct, its
//! constructors, `Display`, `std::error::Error`, and the
//! [`ErrorClass`](crate::ErrorClass) plumbing. The class name reported at
//! runtime is always the most-derived class, with no per-class code.

/// Define a new error class derived from [`ExtensibleError`](crate::ExtensibleError)
/// or from any other field-less class in a hierarchy.
///
/// Every generated class gets two constructors: `new(message, ..)` for
/// ordinary construction, and `with_name(name, message, ..)` used by
/// further-derived classes to thread the most-derived name down the
/// chain. A class whose *parent* carries extra fields cannot be generated
/// (the macro cannot guess the parent's field values); write its
/// constructor by hand and implement `ErrorClass` in a few lines instead.
///
/// # Examples
///
/// Deriving from the base type:
///
/// ```rust
/// use extensible_error::{define_error, ErrorClass};
///
/// define_error! {
///     /// Raised when a requested resource cannot be located.
///     pub struct NotFoundError;
/// }
///
/// let err = NotFoundError::new("missing widget");
/// assert_eq!(err.name(), "NotFoundError");
/// assert_eq!(err.to_string(), "NotFoundError: missing widget");
/// ```
///
/// A multi-level hierarchy with extra fields on the leaf:
///
/// ```rust
/// use extensible_error::{define_error, ErrorClass, ExtensibleError};
///
/// define_error! {
///     pub struct StorageError;
/// }
///
/// define_error! {
///     /// Carries the key that failed to resolve.
///     pub struct MissingKeyError: StorageError {
///         pub key: String,
///     }
/// }
///
/// let err = MissingKeyError::new("lookup failed", "user:42".to_string());
/// assert_eq!(err.key, "user:42");
/// assert!(err.instance_of::<StorageError>());
/// assert!(err.instance_of::<ExtensibleError>());
/// ```
#[macro_export]
macro_rules! define_error {
    // Field-less class derived from the base type.
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident;
    ) => {
        $crate::define_error! {
            $(#[$meta])*
            $vis struct $name: $crate::ExtensibleError;
        }
    };

    // Field-less class derived from any field-less parent.
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $parent:ty;
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis struct $name {
            parent: $parent,
        }

        impl $name {
            /// Construct with this class reported as the error's name.
            #[track_caller]
            $vis fn new(message: impl ::std::convert::Into<::std::string::String>) -> Self {
                Self::with_name(::core::stringify!($name), message)
            }

            /// Construct on behalf of a further-derived class, threading
            /// its name down the chain.
            #[track_caller]
            $vis fn with_name(
                name: &'static str,
                message: impl ::std::convert::Into<::std::string::String>,
            ) -> Self {
                Self {
                    parent: <$parent>::with_name(name, message),
                }
            }
        }

        $crate::__impl_error_class! { $name }
    };

    // Class with extra fields, derived from the base type.
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $fname:ident : $ftype:ty ),* $(,)?
        }
    ) => {
        $crate::define_error! {
            $(#[$meta])*
            $vis struct $name: $crate::ExtensibleError {
                $( $(#[$fmeta])* $fvis $fname : $ftype ),*
            }
        }
    };

    // Class with extra fields, derived from any field-less parent. The
    // generated constructor builds the base first, then assigns the
    // class's own fields.
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $parent:ty {
            $( $(#[$fmeta:meta])* $fvis:vis $fname:ident : $ftype:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis struct $name {
            parent: $parent,
            $( $(#[$fmeta])* $fvis $fname : $ftype, )*
        }

        impl $name {
            /// Construct with this class reported as the error's name.
            #[track_caller]
            $vis fn new(
                message: impl ::std::convert::Into<::std::string::String>
                $(, $fname : $ftype)*
            ) -> Self {
                Self::with_name(::core::stringify!($name), message $(, $fname)*)
            }

            /// Construct on behalf of a further-derived class, threading
            /// its name down the chain.
            #[track_caller]
            $vis fn with_name(
                name: &'static str,
                message: impl ::std::convert::Into<::std::string::String>
                $(, $fname : $ftype)*
            ) -> Self {
                Self {
                    parent: <$parent>::with_name(name, message),
                    $( $fname, )*
                }
            }
        }

        $crate::__impl_error_class! { $name }
    };
}

/// Shared trait plumbing for classes generated by [`define_error!`].
#[doc(hidden)]
#[macro_export]
macro_rules! __impl_error_class {
    ( $name:ident ) => {
        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.parent, f)
            }
        }

        impl ::std::error::Error for $name {}

        impl $crate::ErrorClass for $name {
            fn root(&self) -> &$crate::ExtensibleError {
                $crate::ErrorClass::root(&self.parent)
            }

            fn parent_class(&self) -> ::std::option::Option<&dyn $crate::ErrorClass> {
                ::std::option::Option::Some(&self.parent)
            }

            fn class_id(&self) -> ::std::any::TypeId {
                ::std::any::TypeId::of::<$name>()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{ErrorClass, ExtensibleError};

    crate::define_error! {
        /// Top of the test hierarchy.
        pub struct AppError;
    }

    crate::define_error! {
        pub struct StorageError: AppError;
    }

    crate::define_error! {
        pub struct MissingKeyError: StorageError;
    }

    crate::define_error! {
        pub struct QuotaError {
            pub used: u64,
            pub limit: u64,
        }
    }

    #[test]
    fn test_generated_class_reports_its_own_name() {
        let err = AppError::new("It went bad!");
        assert_eq!(err.name(), "AppError");
        assert_eq!(err.to_string(), "AppError: It went bad!");
    }

    #[test]
    fn test_deep_chain_reports_leaf_name() {
        let err = MissingKeyError::new("no such key");
        assert_eq!(err.name(), "MissingKeyError");
        assert_eq!(err.to_string(), "MissingKeyError: no such key");
        assert!(err.stack().to_string().starts_with("MissingKeyError: no such key"));
    }

    #[test]
    fn test_deep_chain_ancestry() {
        let err = MissingKeyError::new("no such key");
        assert!(err.instance_of::<MissingKeyError>());
        assert!(err.instance_of::<StorageError>());
        assert!(err.instance_of::<AppError>());
        assert!(err.instance_of::<ExtensibleError>());
        assert!(!err.instance_of::<QuotaError>());
    }

    #[test]
    fn test_ancestry_does_not_leak_downward() {
        let err = StorageError::new("disk gone");
        assert!(!err.instance_of::<MissingKeyError>());
    }

    #[test]
    fn test_fields_are_assigned_after_base_construction() {
        let err = QuotaError::new("over quota", 150, 100);
        assert_eq!(err.used, 150);
        assert_eq!(err.limit, 100);
        assert_eq!(err.name(), "QuotaError");
        assert_eq!(err.to_string(), "QuotaError: over quota");
    }

    #[test]
    fn test_with_name_threads_an_arbitrary_leaf_name() {
        let err = StorageError::with_name("PretendLeafError", "threaded");
        assert_eq!(err.name(), "PretendLeafError");
        assert_eq!(err.to_string(), "PretendLeafError: threaded");
    }

    #[test]
    fn test_generated_classes_are_std_errors() {
        let boxed: Box<dyn std::error::Error> = Box::new(QuotaError::new("over quota", 1, 0));
        assert_eq!(boxed.to_string(), "QuotaError: over quota");
        assert!(boxed.downcast_ref::<QuotaError>().is_some());
    }
}
