// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! extensions for various types

pub use float_extensions::FloatExtensions;

mod float_extensions;
