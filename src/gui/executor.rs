// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

use futures::Future;
use iced::Executor;
use iced_futures::MaybeSend;
use tokio::runtime::Handle;

use crate::util::GLOBAL_TOKIO_RUNTIME;

/// Runs iced's futures on the global tokio runtime instead of a second runtime just for the GUI
pub struct TokioExecutor {
    handle: Handle,
}

impl Executor for TokioExecutor {
    fn new() -> Result<Self, futures::io::Error> {
        Ok(TokioExecutor { handle: GLOBAL_TOKIO_RUNTIME.handle().clone() })
    }

    fn spawn(&self, future: impl Future<Output = ()> + MaybeSend + 'static) {
        let _join_handle = self.handle.spawn(future);
    }

    fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        let _enter_guard = self.handle.enter();
        f()
    }
}
