use crate::state::{SystemDescriptor, TickReport};

/// All messages (events) that can flow through the application event bus.
///
/// Sources:
/// - System monitor task   → `SystemReport`
/// - Descriptor probe      → `DescriptorResolved`
/// - Config watcher task   → `ConfigReloaded`
#[derive(Debug, Clone)]
pub enum Message {
    /// Fresh rolling windows and rankings from the background monitor task.
    SystemReport(TickReport),
    /// CPU / GPU names finished resolving (sent once).
    DescriptorResolved(SystemDescriptor),
    /// Config file changed on disk — triggers a live reload.
    ConfigReloaded,
}
