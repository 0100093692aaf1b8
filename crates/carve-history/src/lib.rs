//! Append-only edit history with index-addressed time-travel.
//!
//! Every durable mutation snapshots the full serialized forest onto a linear
//! stack. Navigation restores a snapshot by index; saving after navigating
//! backward truncates everything after the active index before appending, so
//! the history is always a single line of states: classic linear undo with
//! no redo branches.
//!
//! Automated playback over the stack lives in [`playback`].

mod error;
pub mod playback;

pub use error::{HistoryError, Result};
pub use playback::{Playback, PlaybackState, PLAYBACK_INTERVAL};

use carve_scene::Project;

/// Linear stack of serialized project snapshots plus the active index.
///
/// `current_index` is the single source of truth for which edit step is
/// active; any position view (sliders, listings) must be re-read after every
/// save or restore.
#[derive(Debug, Default)]
pub struct History {
    stack: Vec<String>,
    current: usize,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots on the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no snapshot has been saved yet.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The active snapshot index, or `None` while the stack is empty.
    pub fn current_index(&self) -> Option<usize> {
        if self.stack.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }

    /// The serialized snapshot at `index`, if it exists.
    pub fn snapshot(&self, index: usize) -> Option<&str> {
        self.stack.get(index).map(String::as_str)
    }

    /// Snapshot the project's current forest as the new last state.
    ///
    /// Any states after the active index are discarded first, then the new
    /// snapshot is appended and becomes active. Returns the new index.
    pub fn save(&mut self, project: &Project) -> Result<usize> {
        let snapshot = project.export_json()?;
        if !self.stack.is_empty() {
            self.stack.truncate(self.current + 1);
        }
        self.stack.push(snapshot);
        self.current = self.stack.len() - 1;
        log::debug!("saved history state {}", self.current);
        Ok(self.current)
    }

    /// Restore the snapshot at `index` into the project (full reset, not a
    /// merge) and make it the active state.
    ///
    /// An out-of-range index fails with zero state mutation. Restoring never
    /// pushes a new snapshot.
    pub fn restore(&mut self, index: usize, project: &mut Project) -> Result<()> {
        if index >= self.stack.len() {
            return Err(HistoryError::IndexOutOfRange {
                index,
                len: self.stack.len(),
            });
        }
        project.import_json(&self.stack[index])?;
        self.current = index;
        log::debug!("restored history state {}", index);
        Ok(())
    }

    /// Step one state backward. Returns the new index, or `Ok(None)` when
    /// already at the first state.
    pub fn step_back(&mut self, project: &mut Project) -> Result<Option<usize>> {
        let current = self.current_index().ok_or(HistoryError::Empty)?;
        match current.checked_sub(1) {
            Some(target) => {
                self.restore(target, project)?;
                Ok(Some(target))
            }
            None => Ok(None),
        }
    }

    /// Step one state forward. Returns the new index, or `Ok(None)` when
    /// already at the last state.
    pub fn step_forward(&mut self, project: &mut Project) -> Result<Option<usize>> {
        let current = self.current_index().ok_or(HistoryError::Empty)?;
        let target = current + 1;
        if target >= self.stack.len() {
            return Ok(None);
        }
        self.restore(target, project)?;
        Ok(Some(target))
    }

    /// Drop every snapshot (used when a fresh import asks to start over).
    pub fn clear(&mut self) {
        self.stack.clear();
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carve_scene::{OpKind, ShapeKind};

    #[test]
    fn save_and_restore() {
        let mut project = Project::new();
        let mut history = History::new();

        let a = project.add_primitive(ShapeKind::Box);
        assert_eq!(history.save(&project).unwrap(), 0);
        let b = project.add_primitive(ShapeKind::Sphere);
        assert_eq!(history.save(&project).unwrap(), 1);
        project.apply_operation(&a, &b, OpKind::Subtract).unwrap();
        assert_eq!(history.save(&project).unwrap(), 2);

        history.restore(0, &mut project).unwrap();
        assert_eq!(history.current_index(), Some(0));
        assert_eq!(project.store.len(), 1);
        assert!(project.node("node_1").unwrap().is_root);

        history.restore(2, &mut project).unwrap();
        assert_eq!(project.store.roots().len(), 1);
        assert_eq!(project.store.roots()[0].id, "node_3");
    }

    #[test]
    fn restore_out_of_range_is_rejected() {
        let mut project = Project::new();
        let mut history = History::new();
        project.add_primitive(ShapeKind::Box);
        history.save(&project).unwrap();

        let len = history.len();
        assert!(matches!(
            history.restore(len, &mut project),
            Err(HistoryError::IndexOutOfRange { .. })
        ));
        assert_eq!(history.current_index(), Some(0));
        assert_eq!(project.store.len(), 1);
    }

    #[test]
    fn saving_after_navigating_back_truncates() {
        let mut project = Project::new();
        let mut history = History::new();

        for _ in 0..4 {
            project.add_primitive(ShapeKind::Box);
            history.save(&project).unwrap();
        }
        assert_eq!(history.len(), 4);

        history.restore(1, &mut project).unwrap();
        project.add_primitive(ShapeKind::Sphere);
        let index = history.save(&project).unwrap();

        // States 2 and 3 are gone; the new state sits right after index 1.
        assert_eq!(index, 2);
        assert_eq!(history.len(), 3);
        assert_eq!(history.current_index(), Some(2));
    }

    #[test]
    fn restore_does_not_snapshot() {
        let mut project = Project::new();
        let mut history = History::new();
        project.add_primitive(ShapeKind::Box);
        history.save(&project).unwrap();
        project.add_primitive(ShapeKind::Box);
        history.save(&project).unwrap();

        history.restore(0, &mut project).unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn step_back_and_forward() {
        let mut project = Project::new();
        let mut history = History::new();
        project.add_primitive(ShapeKind::Box);
        history.save(&project).unwrap();
        project.add_primitive(ShapeKind::Sphere);
        history.save(&project).unwrap();

        assert_eq!(history.step_back(&mut project).unwrap(), Some(0));
        assert_eq!(project.store.len(), 1);
        assert_eq!(history.step_back(&mut project).unwrap(), None);

        assert_eq!(history.step_forward(&mut project).unwrap(), Some(1));
        assert_eq!(project.store.len(), 2);
        assert_eq!(history.step_forward(&mut project).unwrap(), None);
    }

    #[test]
    fn stepping_on_empty_history_is_an_error() {
        let mut project = Project::new();
        let mut history = History::new();
        assert!(matches!(
            history.step_back(&mut project),
            Err(HistoryError::Empty)
        ));
    }

    #[test]
    fn ids_never_collide_after_restore() {
        let mut project = Project::new();
        let mut history = History::new();
        project.add_primitive(ShapeKind::Box);
        project.add_primitive(ShapeKind::Box);
        history.save(&project).unwrap();

        history.restore(0, &mut project).unwrap();
        // The restored store only re-registered node_1 and node_2, but the
        // counter must still run past every suffix ever seen.
        assert_eq!(project.add_primitive(ShapeKind::Sphere), "node_3");
    }
}
