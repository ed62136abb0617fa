// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! The iced front end

mod constants;
mod element_appearance;
mod executor;
pub mod subscription;
mod util;
mod window;

use executor::TokioExecutor;
pub use window::{Flags, run};
