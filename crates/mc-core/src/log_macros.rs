// Domain-aware logging macros.
//
// Each macro injects a `domain` field so call sites only name the domain:
// `load` (compiling condition text), `eval` (per-request evaluation).
//
//     mc_warn!(eval, line = 3, error = %e, "condition evaluation failed");

#[doc(hidden)]
macro_rules! mc_log {
    ($level:ident, $domain:ident, $($field:tt)*) => {
        tracing::$level!(domain = stringify!($domain), $($field)*)
    };
}

#[allow(unused_macros)]
macro_rules! mc_error {
    ($domain:ident, $($rest:tt)*) => {
        mc_log!(error, $domain, $($rest)*)
    };
}

macro_rules! mc_warn {
    ($domain:ident, $($rest:tt)*) => {
        mc_log!(warn, $domain, $($rest)*)
    };
}

macro_rules! mc_info {
    ($domain:ident, $($rest:tt)*) => {
        mc_log!(info, $domain, $($rest)*)
    };
}

macro_rules! mc_debug {
    ($domain:ident, $($rest:tt)*) => {
        mc_log!(debug, $domain, $($rest)*)
    };
}

macro_rules! mc_trace {
    ($domain:ident, $($rest:tt)*) => {
        mc_log!(trace, $domain, $($rest)*)
    };
}
