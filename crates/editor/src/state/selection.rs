use super::model::ModelId;

/// Single-model selection. Holds an index into the scene, never the model itself.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<ModelId>,
    /// Bumped on every change, for panels that cache per-selection data
    version: u64,
}

impl SelectionState {
    /// Selected model, if any
    pub fn primary(&self) -> Option<ModelId> {
        self.selected
    }

    pub fn is_selected(&self, id: ModelId) -> bool {
        self.selected == Some(id)
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    /// Select a single model (replaces previous selection)
    pub fn select(&mut self, id: ModelId) {
        if self.selected != Some(id) {
            self.selected = Some(id);
            self.version += 1;
        }
    }

    pub fn clear(&mut self) {
        if self.selected.take().is_some() {
            self.version += 1;
        }
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
        assert!(!s.has_selection());
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut s = SelectionState::default();
        s.select(ModelId(0));
        s.select(ModelId(1));
        assert_eq!(s.primary(), Some(ModelId(1)));
        assert!(!s.is_selected(ModelId(0)));
        assert!(s.is_selected(ModelId(1)));
    }

    #[test]
    fn test_clear() {
        let mut s = SelectionState::default();
        s.select(ModelId(3));
        s.clear();
        assert!(s.primary().is_none());
    }

    #[test]
    fn test_version_only_bumps_on_change() {
        let mut s = SelectionState::default();
        s.select(ModelId(0));
        s.select(ModelId(0));
        assert_eq!(s.version(), 1);
        s.clear();
        s.clear();
        assert_eq!(s.version(), 2);
    }
}
