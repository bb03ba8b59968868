//! Logging shim. Events go to `tracing` when the feature is on and compile to
//! nothing otherwise.

cfg_if::cfg_if! {
    if #[cfg(feature = "tracing")] {
        pub(crate) use tracing::debug;
        pub(crate) use tracing::trace;
    } else {
        macro_rules! debug {
            ($($arg:tt)*) => {};
        }

        macro_rules! trace {
            ($($arg:tt)*) => {};
        }

        pub(crate) use debug;
        pub(crate) use trace;
    }
}
