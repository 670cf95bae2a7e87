//! Page surface the pollers render into
//!
//! A page is a set of elements addressed by id: text elements that display a
//! string, controls that can be activated, and canvases that host a chart.
//! Pollers only see the `Page` trait; `MemoryPage` is the in-process
//! implementation used by the terminal dashboard and the tests.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tokio::sync::{broadcast, mpsc};

use crate::config::Config;

/// Stream of activations of a single control element
pub type Activations = mpsc::UnboundedReceiver<()>;

/// Element operations the dashboard relies on
pub trait Page: Send + Sync {
    /// Whether an element with this id exists
    fn has_element(&self, id: &str) -> bool;

    /// Current text content of an element
    fn text(&self, id: &str) -> Option<String>;

    /// Replace the text content of an element
    fn set_text(&self, id: &str, text: &str) -> crate::Result<()>;

    /// Subscribe to activations of a control, `None` when no such control exists
    fn activations(&self, id: &str) -> Option<Activations>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Control,
    Canvas,
}

/// Content update published by `MemoryPage`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementChange {
    pub id: String,
    pub kind: ElementKind,
    pub content: String,
}

#[derive(Debug)]
struct Element {
    kind: ElementKind,
    content: String,
    listeners: Vec<mpsc::UnboundedSender<()>>,
}

/// In-memory page with change notifications
#[derive(Debug)]
pub struct MemoryPage {
    elements: RwLock<HashMap<String, Element>>,
    changes: broadcast::Sender<ElementChange>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            elements: RwLock::new(HashMap::new()),
            changes,
        }
    }

    /// Page carrying every element the configuration refers to
    pub fn for_config(config: &Config) -> Self {
        Self::new()
            .with_text(&config.status.element_id)
            .with_text(&config.logs.element_id)
            .with_control(&config.logs.refresh_control_id)
            .with_canvas(&config.stats.canvas_id)
    }

    pub fn with_text(self, id: &str) -> Self {
        self.insert(id, ElementKind::Text);
        self
    }

    pub fn with_control(self, id: &str) -> Self {
        self.insert(id, ElementKind::Control);
        self
    }

    pub fn with_canvas(self, id: &str) -> Self {
        self.insert(id, ElementKind::Canvas);
        self
    }

    /// Add an element, replacing any element with the same id
    pub fn insert(&self, id: &str, kind: ElementKind) {
        let element = Element {
            kind,
            content: String::new(),
            listeners: Vec::new(),
        };
        self.elements
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), element);
    }

    /// Remove an element; its activation streams end
    pub fn remove(&self, id: &str) -> bool {
        self.elements
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    pub fn kind(&self, id: &str) -> Option<ElementKind> {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .map(|e| e.kind)
    }

    /// Fire a control, returning how many subscribers were notified
    pub fn activate(&self, id: &str) -> crate::Result<usize> {
        let mut elements = self.elements.write().unwrap_or_else(PoisonError::into_inner);
        let element = elements
            .get_mut(id)
            .filter(|e| e.kind == ElementKind::Control)
            .ok_or_else(|| crate::DashboardError::MissingElement(id.to_string()))?;

        element.listeners.retain(|tx| tx.send(()).is_ok());
        tracing::debug!("Activated '{}' ({} listeners)", id, element.listeners.len());
        Ok(element.listeners.len())
    }

    /// Subscribe to content updates of every element
    pub fn changes(&self) -> broadcast::Receiver<ElementChange> {
        self.changes.subscribe()
    }
}

impl Page for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    fn text(&self, id: &str) -> Option<String> {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .map(|e| e.content.clone())
    }

    fn set_text(&self, id: &str, text: &str) -> crate::Result<()> {
        let kind = {
            let mut elements = self.elements.write().unwrap_or_else(PoisonError::into_inner);
            let element = elements
                .get_mut(id)
                .ok_or_else(|| crate::DashboardError::MissingElement(id.to_string()))?;
            element.content = text.to_string();
            element.kind
        };

        tracing::debug!("Set '{}' ({} bytes)", id, text.len());
        // No subscribers is fine
        let _ = self.changes.send(ElementChange {
            id: id.to_string(),
            kind,
            content: text.to_string(),
        });
        Ok(())
    }

    fn activations(&self, id: &str) -> Option<Activations> {
        let mut elements = self.elements.write().unwrap_or_else(PoisonError::into_inner);
        let element = elements
            .get_mut(id)
            .filter(|e| e.kind == ElementKind::Control)?;
        let (tx, rx) = mpsc::unbounded_channel();
        element.listeners.push(tx);
        Some(rx)
    }
}
