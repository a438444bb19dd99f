use shared::ObjectId;

/// Kind of element a selection refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Point,
    Edge,
    Face,
    Circle,
}

/// A selected scene element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedElement {
    pub id: ObjectId,
    pub kind: SelectionKind,
}

/// Element selection on the drawing surface
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    /// Selected elements (in order of selection)
    selected: Vec<SelectedElement>,
    /// Version counter for selection changes (for frame invalidation)
    version: u64,
}

impl SelectionState {
    /// Primary (first) selected element
    pub fn primary(&self) -> Option<&SelectedElement> {
        self.selected.first()
    }

    /// All selected elements
    pub fn all(&self) -> &[SelectedElement] {
        &self.selected
    }

    /// Check if an element is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s.id == id)
    }

    /// Select a single element (clears previous selection)
    pub fn select(&mut self, id: ObjectId, kind: SelectionKind) {
        self.selected.clear();
        self.selected.push(SelectedElement { id, kind });
        self.version += 1;
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.version += 1;
        }
    }

    /// Number of selected elements
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_empty() {
        let s = SelectionState::default();
        assert!(s.primary().is_none());
        assert!(s.all().is_empty());
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn test_select_single() {
        let mut s = SelectionState::default();
        s.select("A".to_string(), SelectionKind::Point);
        assert_eq!(s.primary().map(|e| e.id.as_str()), Some("A"));
        assert_eq!(s.primary().map(|e| e.kind), Some(SelectionKind::Point));
        assert!(s.is_selected("A"));
    }

    #[test]
    fn test_select_clears_previous() {
        let mut s = SelectionState::default();
        s.select("A".to_string(), SelectionKind::Point);
        s.select("c1".to_string(), SelectionKind::Circle);
        assert_eq!(s.count(), 1);
        assert!(!s.is_selected("A"));
        assert!(s.is_selected("c1"));
    }

    #[test]
    fn test_version_tracks_changes() {
        let mut s = SelectionState::default();
        s.clear();
        assert_eq!(s.version(), 0);
        s.select("A".to_string(), SelectionKind::Point);
        s.clear();
        assert_eq!(s.version(), 2);
    }
}
