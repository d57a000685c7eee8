//! Layout document: the ordered list of placed elements.

use crate::elements::{Element, ElementProps};
use crate::id::ElementId;
use serde::{Deserialize, Serialize};

/// Collisions tolerated at one id length before ids get longer.
const ID_ATTEMPTS_PER_LENGTH: usize = 64;

/// The page being built. Order is display order (top to bottom).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    elements: Vec<Element>,
}

impl Layout {
    /// Create a new empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an id not used by any element in this layout.
    ///
    /// Ids start at `len` characters and grow by one whenever
    /// `ID_ATTEMPTS_PER_LENGTH` draws in a row collide.
    pub fn fresh_id(&self, len: usize) -> ElementId {
        let mut len = len.max(1);
        loop {
            for _ in 0..ID_ATTEMPTS_PER_LENGTH {
                let id = ElementId::generate(len);
                if !self.contains(&id) {
                    return id;
                }
                log::debug!("Generated id {} collides with a live element, retrying", id);
            }
            log::debug!("No free id of length {} found, widening to {}", len, len + 1);
            len += 1;
        }
    }

    /// Append an element at the end of the display order.
    pub(crate) fn push(&mut self, id: ElementId, props: ElementProps) -> &Element {
        let index = self.elements.len();
        self.elements.push(Element::new(id, props));
        &self.elements[index]
    }

    /// Remove an element by id.
    pub(crate) fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.position(id)?;
        Some(self.elements.remove(index))
    }

    /// Get an element by id.
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Get a mutable reference to an element by id.
    pub(crate) fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    /// Index of an element in display order.
    pub fn position(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.position(id).is_some()
    }

    /// Elements in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    /// Check if the layout is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
