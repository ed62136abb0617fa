// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

// necessary to remove the weird console window that appears alongside the real GUI on Windows
#![windows_subsystem = "windows"]

use std::process;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::api::DeviceApi;
use crate::app::poller;
use crate::app::structs::CliArgs;
use crate::config::v1::ConfigurationV1;
use crate::util::GLOBAL_TOKIO_RUNTIME;

mod api;
mod app;
mod config;
mod gui;
mod util;

fn main() {
    let args: CliArgs = CliArgs::parse();

    let log_filter = match &args.log_filter {
        // user is providing a custom filter and not using my verbosity presets at all
        Some(log_filter_string) => match EnvFilter::try_new(log_filter_string) {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!("failed to parse log filter \"{log_filter_string}\": {e}");
                process::exit(2);
            }
        },
        None => EnvFilter::new(util::logging::verbosity_filter(args.verbose)),
    };

    let appender_guard = if args.stdout {
        util::logging::init_console_logging(log_filter);
        None
    } else {
        util::logging::try_init_file_logging(log_filter)
    };
    // now we can use tracing to log. Any tracing logs before this point go nowhere.

    if args.use_panic_handler() {
        util::panic::set_hook();
    }

    info!("initializing {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let exit_code = run(&args);

    // flush the log file before exiting
    drop(appender_guard);
    process::exit(exit_code);
}

fn run(args: &CliArgs) -> i32 {
    let settings = GLOBAL_TOKIO_RUNTIME.block_on(config::load_configuration());
    let server_url = controller_url(args, &settings);
    if args.server_url.is_some() {
        info!("using controller URL {server_url} from the command line");
    }

    let api = match DeviceApi::new(server_url, settings.timeouts()) {
        Ok(api) => api,
        Err(e) => {
            error!("invalid controller URL \"{server_url}\": {e}");
            return 1;
        }
    };

    if args.self_check {
        info!("self check passed: {:?} layout, {} configuration, controller at {}", settings.layout, settings.config_schema, api.base_url());
        return 0;
    }

    let (poll_sender, poll_receiver) = mpsc::unbounded_channel();
    let _poller = {
        let _enter_guard = GLOBAL_TOKIO_RUNTIME.enter();
        poller::start(api.clone(), settings.poll_interval(), poll_sender)
    };

    match gui::run(gui::Flags { api, settings, poll_receiver }) {
        Ok(()) => {
            info!("window closed; shutting down");
            0
        }
        Err(e) => {
            error!("could not run the GUI: {e}");
            1
        }
    }
}

/// The URL to talk to for this run. `--server-url` wins, but never replaces the saved setting.
fn controller_url<'a>(args: &'a CliArgs, settings: &'a ConfigurationV1) -> &'a str {
    args.server_url.as_deref().unwrap_or(&settings.server_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_url_is_used_for_this_run_only() {
        let settings = ConfigurationV1::default();

        let args = CliArgs::parse_from(["rotary-panel", "--server-url", "http://rig.local:5000"]);
        assert_eq!(controller_url(&args, &settings), "http://rig.local:5000");
        assert_eq!(settings.server_url, "http://127.0.0.1:5000");

        let args = CliArgs::parse_from(["rotary-panel"]);
        assert_eq!(controller_url(&args, &settings), "http://127.0.0.1:5000");
    }
}
