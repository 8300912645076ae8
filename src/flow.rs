//! Game flow: one active screen, ad breaks, and pause management.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, instrument, warn};

use crate::scene::{Color, Scene, Surface};
use crate::screens::{
    FinishScreen, InputKey, PlayingScreen, Screen, ScreenTransition, WelcomeScreen,
};

/// Backdrop color behind every screen. Hosts that clear the target
/// themselves should use the same color.
pub const BACKDROP: Color = Color::rgb(0xdd, 0xdd, 0xdd);

/// Status of an ad break in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdBreakStatus {
    /// The break is still showing.
    Running,
    /// The break finished normally.
    Finished,
    /// The break errored out. Treated like a finish, just logged.
    Failed,
}

/// External ad collaborator, consulted when a round starts.
///
/// The flow pauses gameplay the moment a break begins and resumes the
/// moment polling reports it over, successfully or not. Gameplay never
/// times a break out; an indefinite break means an indefinite pause.
pub trait AdGateway {
    /// Asks to show a break; `false` means none will be shown.
    fn begin(&mut self) -> bool;

    /// Polls the break last begun.
    fn poll(&mut self) -> AdBreakStatus;
}

/// Gateway that never shows a break.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAds;

impl AdGateway for NoAds {
    fn begin(&mut self) -> bool {
        false
    }

    fn poll(&mut self) -> AdBreakStatus {
        AdBreakStatus::Finished
    }
}

/// Gateway standing in for an ad network with fixed-length
/// intermissions.
#[derive(Debug)]
pub struct TimedIntermission {
    length: Duration,
    started: Option<Instant>,
}

impl TimedIntermission {
    /// Creates a gateway whose breaks last `length`.
    pub fn new(length: Duration) -> Self {
        Self {
            length,
            started: None,
        }
    }
}

impl AdGateway for TimedIntermission {
    fn begin(&mut self) -> bool {
        self.started = Some(Instant::now());
        true
    }

    fn poll(&mut self) -> AdBreakStatus {
        match self.started {
            Some(at) if at.elapsed() < self.length => AdBreakStatus::Running,
            Some(_) => {
                self.started = None;
                AdBreakStatus::Finished
            }
            None => AdBreakStatus::Finished,
        }
    }
}

/// Which screen the flow is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The title card.
    Welcome,
    /// A round in progress.
    Playing,
    /// The outcome card.
    Finish,
    /// The player left; the host should shut down.
    Exited,
}

enum ActiveScreen {
    Welcome(WelcomeScreen),
    Playing(PlayingScreen),
    Finish(FinishScreen),
    Exited,
}

/// Owns the scene and walks the welcome, playing, and finish screens.
///
/// The flow is frame-driven: the host forwards key presses through
/// [`Flow::handle_key`] and calls [`Flow::advance`] once per frame with
/// the elapsed wall time. While paused the scene neither ticks nor
/// shows; the flow polls the ad gateway instead and resumes the moment
/// the break ends.
pub struct Flow {
    scene: Scene,
    screen: ActiveScreen,
    gateway: Box<dyn AdGateway>,
    rng: SmallRng,
    paused: bool,
    break_pending: bool,
}

impl Flow {
    /// Creates the flow on the welcome screen. A seed fixes the side
    /// roll and the opponent's dice, making runs replayable.
    pub fn new(seed: Option<u64>, gateway: Box<dyn AdGateway>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut scene = Scene::new();
        let mut welcome = WelcomeScreen::new(&mut scene);
        welcome.start(&mut scene);
        Self {
            scene,
            screen: ActiveScreen::Welcome(welcome),
            gateway,
            rng,
            paused: false,
            break_pending: false,
        }
    }

    /// The stage currently showing.
    pub fn stage(&self) -> Stage {
        match self.screen {
            ActiveScreen::Welcome(_) => Stage::Welcome,
            ActiveScreen::Playing(_) => Stage::Playing,
            ActiveScreen::Finish(_) => Stage::Finish,
            ActiveScreen::Exited => Stage::Exited,
        }
    }

    /// Whether gameplay is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the player chose to leave.
    pub fn has_exited(&self) -> bool {
        matches!(self.screen, ActiveScreen::Exited)
    }

    /// Forwards one key press to the active screen. Keys are dropped
    /// while paused.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: InputKey) {
        if self.paused {
            return;
        }
        let transition = match &mut self.screen {
            ActiveScreen::Welcome(screen) => screen.handle_key(key, &mut self.scene),
            ActiveScreen::Playing(screen) => screen.handle_key(key, &mut self.scene),
            ActiveScreen::Finish(screen) => screen.handle_key(key, &mut self.scene),
            ActiveScreen::Exited => ScreenTransition::Stay,
        };
        self.apply(transition);
    }

    /// Advances one frame. While paused this polls the ad break;
    /// otherwise it ticks the scene and feeds completed reveals back to
    /// the active screen.
    pub fn advance(&mut self, delta: Duration) {
        if self.paused {
            self.poll_break();
            return;
        }
        let completed = self.scene.tick(delta);
        if completed.is_empty() {
            return;
        }
        let transition = match &mut self.screen {
            ActiveScreen::Welcome(screen) => {
                screen.animations_completed(&completed, &mut self.scene)
            }
            ActiveScreen::Playing(screen) => {
                screen.animations_completed(&completed, &mut self.scene)
            }
            ActiveScreen::Finish(screen) => {
                screen.animations_completed(&completed, &mut self.scene)
            }
            ActiveScreen::Exited => ScreenTransition::Stay,
        };
        self.apply(transition);
    }

    /// Renders the backdrop and, unless paused, the scene.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill_background(BACKDROP);
        self.scene.render(surface);
    }

    /// Pauses gameplay: the scene hides and stops ticking.
    pub fn pause(&mut self) {
        self.paused = true;
        let root = self.scene.root();
        if let Some(node) = self.scene.get_mut(root) {
            node.visible = false;
        }
        info!("gameplay paused");
    }

    /// Resumes gameplay after a pause.
    pub fn resume(&mut self) {
        self.paused = false;
        let root = self.scene.root();
        if let Some(node) = self.scene.get_mut(root) {
            node.visible = true;
        }
        info!("gameplay resumed");
    }

    fn poll_break(&mut self) {
        if !self.break_pending {
            return;
        }
        match self.gateway.poll() {
            AdBreakStatus::Running => {}
            AdBreakStatus::Finished => {
                self.break_pending = false;
                self.resume();
            }
            AdBreakStatus::Failed => {
                self.break_pending = false;
                warn!("ad break failed, resuming anyway");
                self.resume();
            }
        }
    }

    fn apply(&mut self, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Play => {
                if self.gateway.begin() {
                    self.break_pending = true;
                    self.pause();
                }
                self.destroy_active();
                let mut playing = PlayingScreen::new(&mut self.scene, &mut self.rng);
                playing.start(&mut self.scene);
                self.screen = ActiveScreen::Playing(playing);
            }
            ScreenTransition::Finished(outcome) => {
                info!(%outcome, "round finished");
                self.destroy_active();
                let mut finish = FinishScreen::new(&mut self.scene, outcome);
                finish.start(&mut self.scene);
                self.screen = ActiveScreen::Finish(finish);
            }
            ScreenTransition::Exit => {
                info!("leaving the game");
                self.destroy_active();
                self.screen = ActiveScreen::Exited;
            }
        }
    }

    fn destroy_active(&mut self) {
        match &mut self.screen {
            ActiveScreen::Welcome(screen) => screen.destroy(&mut self.scene),
            ActiveScreen::Playing(screen) => screen.destroy(&mut self.scene),
            ActiveScreen::Finish(screen) => screen.destroy(&mut self.scene),
            ActiveScreen::Exited => {}
        }
    }
}
