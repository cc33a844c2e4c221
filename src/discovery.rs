//! Controller auto-discovery.
//!
//! Rather than scanning a dependency-injection container at runtime,
//! controllers register their names in an explicit [`ControllerRegistry`].
//! The [`ControllerSource`] trait keeps the seam open for other sources
//! (a DI container adapter, a plugin host); whatever the source, discovery
//! failures are logged and yield an empty list - callers decide whether an
//! empty result warrants a warning or an abort, discovery itself never
//! fails the startup path.

use crate::error::Result;
use log::{debug, error, warn};

/// Something that can enumerate controller names.
pub trait ControllerSource {
    /// List the registered controller names.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying source cannot be accessed.
    fn controllers(&self) -> Result<Vec<String>>;
}

/// In-process controller list, filled during application wiring.
#[derive(Debug, Clone, Default)]
pub struct ControllerRegistry {
    controllers: Vec<String>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one controller by name, preserving registration order.
    pub fn register(&mut self, controller: impl Into<String>) {
        self.controllers.push(controller.into());
    }
}

impl ControllerSource for ControllerRegistry {
    fn controllers(&self) -> Result<Vec<String>> {
        Ok(self.controllers.clone())
    }
}

/// Enumerate controllers from a source, recovering locally from failure.
///
/// An inaccessible source is logged and treated as "nothing discovered";
/// the returned list is empty in that case, not an error.
pub fn discover_controllers(source: &dyn ControllerSource) -> Vec<String> {
    match source.controllers() {
        Ok(controllers) => {
            if controllers.is_empty() {
                warn!("No controllers discovered; the generated document will have no paths");
            } else {
                debug!("Discovered {} controller(s)", controllers.len());
            }
            controllers
        }
        Err(err) => {
            error!("Controller discovery failed: {err}");
            Vec::new()
        }
    }
}
