// Every log line of the crate goes to the `virtualizer_sortable` target.
#[cfg(feature = "tracing")]
macro_rules! vlog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "virtualizer_sortable", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! vlog {
    ($level:ident, $($tt:tt)*) => {};
}

/// Per-event detail: engine callbacks, resizes, range hints.
macro_rules! vtrace {
    ($($tt:tt)*) => {
        vlog!(trace, $($tt)*)
    };
}

/// Drag sessions and top-load restores.
macro_rules! vdebug {
    ($($tt:tt)*) => {
        vlog!(debug, $($tt)*)
    };
}

/// Controller lifecycle: mount, suspend, resume, teardown.
macro_rules! vinfo {
    ($($tt:tt)*) => {
        vlog!(info, $($tt)*)
    };
}

macro_rules! vwarn {
    ($($tt:tt)*) => {
        vlog!(warn, $($tt)*)
    };
}
