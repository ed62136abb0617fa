// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

pub mod extensions;
pub mod logging;
pub mod number;
pub mod panic;
mod tokio;

pub use crate::util::tokio::GLOBAL_TOKIO_RUNTIME;
