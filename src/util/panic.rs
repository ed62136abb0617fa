// This file is heavily inspired by https://github.com/rust-cli/human-panic
// human-panic is licensed under MIT OR Apache-2.0
// Copyright 2018 human-panic Individual contributors
// Copyright 2024-2025 rotary-panel contributors

//! Panic hook that writes the crash, with a backtrace, into the log

use std::{mem, panic, thread};
use std::any::Any;
use std::fmt::Write as FmtWrite;

use backtrace::{Backtrace, BacktraceFrame};
use tracing::error;

// We take padding for address and extra two letters to pad after index.
const HEX_WIDTH: usize = mem::size_of::<usize>() + 2;
// Padding for next lines after frame's address
const NEXT_SYMBOL_PADDING: usize = HEX_WIDTH + 6;

pub fn set_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let cause = panic_cause(panic_info.payload()).unwrap_or("<unknown>");

        let location = match panic_info.location() {
            Some(location) => format!("{}:{}:{}", location.file(), location.line(), location.column()),
            None => "<unknown>".to_string(),
        };

        let backtrace = format_backtrace(&Backtrace::new());

        // emulates the default one-line panic format, followed by the backtrace
        let thread_name = thread::current().name().unwrap_or("<unknown>").to_string();
        error!("{} v{} has crashed. Attach this log file when reporting the problem.\nthread '{thread_name}' panicked at '{cause}', {location}{backtrace}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }));
}

/// The message a panic was raised with, if it was a string
pub fn panic_cause(payload: &(dyn Any + Send)) -> Option<&str> {
    match (payload.downcast_ref::<&str>(), payload.downcast_ref::<String>()) {
        (_, Some(s)) => Some(s.as_str()),
        (Some(s), _) => Some(*s),
        (_, _) => None,
    }
}

fn format_backtrace(trace: &Backtrace) -> String {
    let mut backtrace = String::new();

    for (index, frame) in trace
        .frames()
        .iter()
        .skip_while(should_skip) // skip until we see the stack frame where panic internals start
        .enumerate()
    {
        let ip = frame.ip();
        let _ = write!(backtrace, "\n{index:4}: {ip:HEX_WIDTH$?}");

        for (index, symbol) in frame.symbols().iter().enumerate() {
            // several symbols for one address go on their own lines
            if index != 0 {
                let _ = write!(backtrace, "\n{:1$}", "", NEXT_SYMBOL_PADDING);
            }

            match symbol.name() {
                Some(name) => { let _ = write!(backtrace, " - {name}"); }
                None => { let _ = write!(backtrace, " - <unknown>"); }
            }

            if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                let _ = write!(backtrace, "\n{:3$}at {}:{}", "", file.display(), line, NEXT_SYMBOL_PADDING);
            }
        }
    }

    backtrace
}

/// Should this stack frame be skipped?
fn should_skip(frame: &&BacktraceFrame) -> bool {
    match frame.symbols() {
        [first, ..] => {
            if let Some(name) = first.name() {
                let name = format!("{name}");
                name != "std::panicking::begin_panic_handler" && name != "core::panicking::panic_fmt" && name != "core::panicking::panic"
            } else {
                false
            }
        }
        _ => false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_payload() {
        let cause = panic::catch_unwind(|| panic!("str payload")).unwrap_err();
        assert_eq!(panic_cause(cause.as_ref()), Some("str payload"));
    }

    #[test]
    fn string_payload() {
        let cause = panic::catch_unwind(|| {
            let angle = 36;
            panic!("bad angle {angle}");
        }).unwrap_err();
        assert_eq!(panic_cause(cause.as_ref()), Some("bad angle 36"));
    }

    #[test]
    fn other_payload() {
        let cause = panic::catch_unwind(|| panic::panic_any(7u8)).unwrap_err();
        assert_eq!(panic_cause(cause.as_ref()), None);
    }

    #[test]
    fn backtrace_formats_without_panicking() {
        let _ = format_backtrace(&Backtrace::new());
    }
}
