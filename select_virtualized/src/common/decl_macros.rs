// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Runs the block only when the given `DEBUG_SELECT_*` flag is `true`. The flags are
/// `const`, so the compiler drops the block entirely when the flag is off.
///
/// ```
/// use select_virtualized::call_if_true;
///
/// const DEBUG_SOMETHING: bool = true;
/// let mut count = 0;
/// call_if_true!(DEBUG_SOMETHING, {
///     count += 1;
/// });
/// assert_eq!(count, 1);
/// ```
#[macro_export]
macro_rules! call_if_true {
    ($cond:ident, $block: expr) => {{
        if $cond {
            $block
        }
    }};
}

/// A wrapper for `pretty_assertions::assert_eq!` macro.
#[macro_export]
macro_rules! assert_eq2 {
    ($($params:tt)*) => {
        pretty_assertions::assert_eq!($($params)*)
    };
}

/// Queue [crossterm] commands on a writer, converting errors with
/// [`miette::IntoDiagnostic`]. Nothing is written until the writer is flushed.
#[macro_export]
macro_rules! queue_commands_no_lock {
    ($writer:expr $(, $command:expr)* $(,)?) => {{
        use miette::IntoDiagnostic as _;
        $(
            ::crossterm::QueueableCommand::queue(
                &mut *$writer,
                $command
            ).into_diagnostic()?;
        )*
    }}
}
