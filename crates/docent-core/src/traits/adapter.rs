// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all external-collaborator adapters implement.

use crate::types::AdapterType;

/// The base trait for all Docent adapters.
///
/// Provides identity for logging and diagnostics. Adapters must be shareable
/// across request tasks.
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the kind of collaborator this adapter fronts.
    fn adapter_type(&self) -> AdapterType;
}
