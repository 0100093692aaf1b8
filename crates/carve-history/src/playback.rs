//! Automated playback over the history stack.
//!
//! Playback is an explicit two-state machine rather than an ad hoc interval
//! callback: the owner runs a repeating timer at [`PLAYBACK_INTERVAL`] and
//! calls [`Playback::tick`] on each firing. Because toggling while playing
//! transitions straight to [`PlaybackState::Idle`], a second "start" can
//! never spawn a second timer, and stopping at any point is always safe.

use std::time::Duration;

use carve_scene::Project;

use crate::{History, Result};

/// Fixed cadence the owning timer should tick at.
pub const PLAYBACK_INTERVAL: Duration = Duration::from_millis(500);

/// Playback machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Not playing; ticks are ignored.
    #[default]
    Idle,
    /// Advancing one history state per tick.
    Playing,
}

/// Drives linear playback of the history stack, one `restore` per tick.
#[derive(Debug, Default)]
pub struct Playback {
    state: PlaybackState,
}

impl Playback {
    /// Create an idle playback machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current machine state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Toggle playback.
    ///
    /// Toggling off leaves the history index wherever it stopped. Toggling
    /// on while the active index is already the last state restarts from
    /// index 0 first; with fewer than two states there is nothing to step
    /// through and the machine stays idle.
    pub fn toggle(&mut self, history: &mut History, project: &mut Project) -> Result<PlaybackState> {
        match self.state {
            PlaybackState::Playing => {
                self.state = PlaybackState::Idle;
            }
            PlaybackState::Idle => {
                let len = history.len();
                if len == 0 {
                    return Ok(PlaybackState::Idle);
                }
                let current = history.current_index().unwrap_or(0);
                if current + 1 >= len {
                    history.restore(0, project)?;
                }
                if len > 1 {
                    self.state = PlaybackState::Playing;
                }
            }
        }
        Ok(self.state)
    }

    /// Unconditionally stop playback. The history index stays put.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Idle;
    }

    /// Advance one state if playing; transitions to idle upon reaching the
    /// last state. A tick while idle is a no-op.
    pub fn tick(&mut self, history: &mut History, project: &mut Project) -> Result<PlaybackState> {
        if self.state != PlaybackState::Playing {
            return Ok(self.state);
        }
        let len = history.len();
        let current = history.current_index().unwrap_or(0);
        let next = current + 1;
        if next >= len {
            self.state = PlaybackState::Idle;
            return Ok(self.state);
        }
        history.restore(next, project)?;
        if next == len - 1 {
            self.state = PlaybackState::Idle;
        }
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carve_scene::ShapeKind;

    fn project_with_states(states: usize) -> (Project, History) {
        let mut project = Project::new();
        let mut history = History::new();
        for _ in 0..states {
            project.add_primitive(ShapeKind::Box);
            history.save(&project).unwrap();
        }
        (project, history)
    }

    #[test]
    fn plays_to_the_end_and_stops() {
        let (mut project, mut history) = project_with_states(3);
        history.restore(0, &mut project).unwrap();

        let mut playback = Playback::new();
        assert_eq!(
            playback.toggle(&mut history, &mut project).unwrap(),
            PlaybackState::Playing
        );

        assert_eq!(
            playback.tick(&mut history, &mut project).unwrap(),
            PlaybackState::Playing
        );
        assert_eq!(history.current_index(), Some(1));

        assert_eq!(
            playback.tick(&mut history, &mut project).unwrap(),
            PlaybackState::Idle
        );
        assert_eq!(history.current_index(), Some(2));

        // Further ticks are no-ops.
        assert_eq!(
            playback.tick(&mut history, &mut project).unwrap(),
            PlaybackState::Idle
        );
        assert_eq!(history.current_index(), Some(2));
    }

    #[test]
    fn starting_at_the_end_restarts_from_zero() {
        let (mut project, mut history) = project_with_states(3);
        assert_eq!(history.current_index(), Some(2));

        let mut playback = Playback::new();
        playback.toggle(&mut history, &mut project).unwrap();
        assert!(playback.is_playing());
        assert_eq!(history.current_index(), Some(0));
    }

    #[test]
    fn toggling_off_leaves_the_index() {
        let (mut project, mut history) = project_with_states(4);
        history.restore(0, &mut project).unwrap();

        let mut playback = Playback::new();
        playback.toggle(&mut history, &mut project).unwrap();
        playback.tick(&mut history, &mut project).unwrap();
        assert_eq!(history.current_index(), Some(1));

        // Toggling while playing is a stop, never a second timer.
        assert_eq!(
            playback.toggle(&mut history, &mut project).unwrap(),
            PlaybackState::Idle
        );
        assert_eq!(history.current_index(), Some(1));
    }

    #[test]
    fn single_state_stack_never_starts() {
        let (mut project, mut history) = project_with_states(1);
        let mut playback = Playback::new();
        assert_eq!(
            playback.toggle(&mut history, &mut project).unwrap(),
            PlaybackState::Idle
        );
        assert_eq!(history.current_index(), Some(0));
    }

    #[test]
    fn empty_history_is_a_noop() {
        let mut project = Project::new();
        let mut history = History::new();
        let mut playback = Playback::new();
        assert_eq!(
            playback.toggle(&mut history, &mut project).unwrap(),
            PlaybackState::Idle
        );
        assert_eq!(
            playback.tick(&mut history, &mut project).unwrap(),
            PlaybackState::Idle
        );
    }
}
