//! Screens of the game flow and the contract they share.

mod elements;
mod finish;
mod playing;
mod welcome;

pub use finish::FinishScreen;
pub use playing::PlayingScreen;
pub use welcome::WelcomeScreen;

use crate::round::RoundOutcome;
use crate::scene::{NodeId, Scene};

/// Discrete key signals the host delivers. Only key presses arrive
/// here; releases and repeats are the host's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    /// Move up.
    Up,
    /// Move down.
    Down,
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// Activate the current selection.
    Confirm,
}

/// What the flow should do after a screen handled an event or an
/// animation batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Keep the current screen.
    Stay,
    /// Start a round of gameplay.
    Play,
    /// The round ended with the carried outcome.
    Finished(RoundOutcome),
    /// Leave the game.
    Exit,
}

/// One screen of the game.
///
/// A screen builds its subtree when constructed, reacts to keys and to
/// completed reveals by returning a [`ScreenTransition`], and releases
/// its subtree in [`Screen::destroy`]. Outcomes travel in return
/// values; the flow wires no callbacks into screens.
pub trait Screen {
    /// Called once the screen becomes active.
    fn start(&mut self, scene: &mut Scene);

    /// Handles one key press.
    fn handle_key(&mut self, key: InputKey, scene: &mut Scene) -> ScreenTransition;

    /// Reacts to the nodes whose reveals completed this tick.
    fn animations_completed(
        &mut self,
        _completed: &[NodeId],
        _scene: &mut Scene,
    ) -> ScreenTransition {
        ScreenTransition::Stay
    }

    /// Releases the screen's subtree.
    fn destroy(&mut self, scene: &mut Scene);
}
