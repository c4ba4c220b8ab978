//! Trace points that compile to nothing unless the `trace` feature is on.

#[cfg(feature = "trace")]
macro_rules! trace {
    ($($arg:tt)*) => {
        log::trace!($($arg)*)
    };
}

#[cfg(not(feature = "trace"))]
macro_rules! trace {
    ($($arg:tt)*) => {{
        if false {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

pub(crate) use trace;
