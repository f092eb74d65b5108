//! # Scripting Types
//!
//! Handle types for Rhai scripting integration.
//!
//! ## Responsibilities
//! - **PageHandle**: Wrapper around `PageDirector` for script access
//! - **NodeHandle**: Reference to a scene graph element

use crate::director::PageDirector;
use crate::types::NodeId;
use std::sync::{Arc, Mutex, MutexGuard};

/// Wrapper around `PageDirector` for Rhai scripting.
#[derive(Clone)]
pub struct PageHandle {
    pub page: Arc<Mutex<PageDirector>>,
}

impl PageHandle {
    pub fn new(page: PageDirector) -> Self {
        Self {
            page: Arc::new(Mutex::new(page)),
        }
    }

    /// Locks the page, recovering from a poisoned lock.
    pub fn lock(&self) -> MutexGuard<'_, PageDirector> {
        self.page.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Handle to a specific element in the page's scene graph.
#[derive(Clone)]
pub struct NodeHandle {
    pub page: Arc<Mutex<PageDirector>>,
    pub id: NodeId,
}

impl NodeHandle {
    pub fn lock(&self) -> MutexGuard<'_, PageDirector> {
        self.page.lock().unwrap_or_else(|e| e.into_inner())
    }
}
