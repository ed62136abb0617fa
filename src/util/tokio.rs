// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! Tokio-related utilities

use lazy_static::lazy_static;

lazy_static! {
    /// The one runtime shared by the poller, the HTTP client and the GUI executor
    pub static ref GLOBAL_TOKIO_RUNTIME: tokio::runtime::Runtime = create_tokio_runtime();
}

fn create_tokio_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("rotary-panel-worker")
        .build()
        .expect("failed to create tokio runtime")
}
