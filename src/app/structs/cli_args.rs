// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use clap::Parser;

/// struct used to derive Clap arguments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Sets the level of verbosity. Repeating this argument up to four times will apply increasingly verbose log_filter presets.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log to stdout instead of the default log file.
    #[arg(short = 'c', long)]
    pub stdout: bool,

    /// Custom logging filter: https://docs.rs/tracing-subscriber/0.3.16/tracing_subscriber/filter/struct.EnvFilter.html. This completely overrides the `--verbose` setting.
    #[arg(short = 'f', long)]
    pub log_filter: Option<String>,

    /// Controller base URL for this run only, e.g. http://raspberrypi.local:5000. Overrides the saved setting without changing it.
    #[arg(short = 's', long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Load settings, validate the controller URL, then immediately exit.
    #[arg(long)]
    pub self_check: bool,

    /// Disables the custom panic handler in the log file. Has no effect if used with `--stdout`.
    #[arg(long)]
    pub no_panic_handler: bool,

    /// Enables the custom panic handler in stdout logs. Has no effect if file logging is used. Note that file logging is the default without an explicit `--stdout`.
    #[arg(long)]
    pub force_panic_handler: bool,
}

impl CliArgs {
    pub fn use_panic_handler(&self) -> bool {
        if self.stdout {
            self.force_panic_handler
        } else {
            !self.no_panic_handler
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn verbosity_counts() {
        let args = CliArgs::parse_from(["rotary-panel", "-vvv", "--server-url", "http://rig.local:5000"]);
        assert_eq!(args.verbose, 3);
        assert_eq!(args.server_url.as_deref(), Some("http://rig.local:5000"));
    }

    #[test]
    fn panic_handler_defaults() {
        assert!(CliArgs::parse_from(["rotary-panel"]).use_panic_handler());
        assert!(!CliArgs::parse_from(["rotary-panel", "--no-panic-handler"]).use_panic_handler());
        assert!(!CliArgs::parse_from(["rotary-panel", "--stdout"]).use_panic_handler());
        assert!(CliArgs::parse_from(["rotary-panel", "-c", "--force-panic-handler"]).use_panic_handler());
    }
}
