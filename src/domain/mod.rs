//! Capability declarations and their request handling
//!
//! Provides the demonstration tools, resources, and prompt exposed over the
//! MCP protocol, and assembles the startup capability registry.

pub mod calculator;
pub mod prompts;
pub mod resources;
pub mod tools;

use crate::registry::{CapabilityRegistry, RegistryError};

/// Builds the process-wide registry with every declared capability. Runs
/// once at startup; the registration order is the listing order.
pub fn build_registry() -> Result<CapabilityRegistry, RegistryError> {
    let mut registry = CapabilityRegistry::new();
    tools::register_tools(&mut registry)?;
    resources::register_resources(&mut registry)?;
    prompts::register_prompts(&mut registry)?;
    Ok(registry)
}
