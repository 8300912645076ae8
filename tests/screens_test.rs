//! Tests driving the screens through keys and animation completions.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use noughts::{
    Cell, Color, Coord, DrawOp, FinishScreen, InputKey, Mark, Opponent, PlayingScreen,
    RecordingSurface, RoundOutcome, Scene, Screen, ScreenTransition, WelcomeScreen,
};

/// Builds a playing screen whose side roll gave the player `mark`.
fn playing_with_player(mark: Mark) -> (Scene, PlayingScreen) {
    for seed in 0..64 {
        let mut scene = Scene::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        let screen = PlayingScreen::new(&mut scene, &mut rng);
        if *screen.round().player_mark() == mark {
            return (scene, screen);
        }
    }
    panic!("no seed rolled the requested side in 64 tries");
}

/// Walks the cursor to `target` one arrow press at a time.
fn steer(screen: &mut PlayingScreen, scene: &mut Scene, target: Coord) {
    while screen.cursor().x > target.x {
        screen.handle_key(InputKey::Left, scene);
    }
    while screen.cursor().x < target.x {
        screen.handle_key(InputKey::Right, scene);
    }
    while screen.cursor().y > target.y {
        screen.handle_key(InputKey::Up, scene);
    }
    while screen.cursor().y < target.y {
        screen.handle_key(InputKey::Down, scene);
    }
}

fn marks_on_grid(screen: &PlayingScreen) -> usize {
    screen
        .round()
        .grid()
        .cells()
        .iter()
        .filter(|cell| !cell.is_empty())
        .count()
}

/// Plays the round out through keys and ticks, steering the player
/// with its own heuristic. Returns the final transition and whether
/// the outcome was visible before it was reported.
fn drive_to_end(
    scene: &mut Scene,
    screen: &mut PlayingScreen,
    brain: &mut Opponent,
) -> (ScreenTransition, bool) {
    let mut outcome_was_delayed = false;
    for _ in 0..200 {
        if screen.round().input_open() {
            let target = match brain.choose(screen.round().grid()) {
                Some(coord) => coord,
                None => first_free(screen),
            };
            steer(screen, scene, target);
            assert_eq!(screen.cursor(), target);
            screen.handle_key(InputKey::Confirm, scene);
        }
        let completed = scene.tick(Duration::from_millis(400));
        if completed.is_empty() {
            continue;
        }
        match screen.animations_completed(&completed, scene) {
            ScreenTransition::Stay => {
                if screen.round().outcome().is_some() {
                    outcome_was_delayed = true;
                }
            }
            transition => return (transition, outcome_was_delayed),
        }
    }
    panic!("round did not finish");
}

fn first_free(screen: &PlayingScreen) -> Coord {
    let size = screen.round().grid().size();
    for y in 0..size {
        for x in 0..size {
            let coord = Coord::new(x, y);
            if screen.round().grid().is_empty(coord) {
                return coord;
            }
        }
    }
    panic!("no free cell while input is open");
}

#[test]
fn test_cursor_clamps_to_the_board() {
    let (mut scene, mut screen) = playing_with_player(Mark::X);
    screen.start(&mut scene);
    assert_eq!(screen.cursor(), Coord::new(1, 1));

    for _ in 0..3 {
        screen.handle_key(InputKey::Up, &mut scene);
    }
    assert_eq!(screen.cursor(), Coord::new(1, 0));

    for _ in 0..4 {
        screen.handle_key(InputKey::Left, &mut scene);
    }
    assert_eq!(screen.cursor(), Coord::new(0, 0));

    for _ in 0..5 {
        screen.handle_key(InputKey::Right, &mut scene);
    }
    assert_eq!(screen.cursor(), Coord::new(2, 0));

    for _ in 0..5 {
        screen.handle_key(InputKey::Down, &mut scene);
    }
    assert_eq!(screen.cursor(), Coord::new(2, 2));
}

#[test]
fn test_confirm_places_and_shuts_input() {
    let (mut scene, mut screen) = playing_with_player(Mark::X);
    screen.start(&mut scene);

    screen.handle_key(InputKey::Confirm, &mut scene);
    assert_eq!(
        screen.round().grid().get(Coord::new(1, 1)),
        Some(Cell::Taken(Mark::X))
    );
    assert!(!screen.round().input_open());

    // Keys bounce off while the reveal resolves.
    screen.handle_key(InputKey::Right, &mut scene);
    assert_eq!(screen.cursor(), Coord::new(1, 1));
    screen.handle_key(InputKey::Confirm, &mut scene);
    assert_eq!(marks_on_grid(&screen), 1);
}

#[test]
fn test_confirm_on_a_taken_cell_changes_nothing() {
    let (mut scene, mut screen) = playing_with_player(Mark::X);
    screen.start(&mut scene);

    screen.handle_key(InputKey::Confirm, &mut scene);
    let completed = scene.tick(Duration::from_millis(400));
    screen.animations_completed(&completed, &mut scene);
    let completed = scene.tick(Duration::from_millis(400));
    screen.animations_completed(&completed, &mut scene);
    assert!(screen.round().input_open());
    assert_eq!(marks_on_grid(&screen), 2);

    // The cursor still sits on the player's first mark.
    assert_eq!(screen.cursor(), Coord::new(1, 1));
    screen.handle_key(InputKey::Confirm, &mut scene);
    assert!(screen.round().input_open());
    assert_eq!(marks_on_grid(&screen), 2);
}

#[test]
fn test_reveal_completion_triggers_the_opponent_reply() {
    let (mut scene, mut screen) = playing_with_player(Mark::X);
    screen.start(&mut scene);

    screen.handle_key(InputKey::Confirm, &mut scene);
    assert_eq!(marks_on_grid(&screen), 1);

    // The first tick also completes the side panel reveals; only the
    // mark's own completion may resolve the turn.
    let completed = scene.tick(Duration::from_millis(400));
    let transition = screen.animations_completed(&completed, &mut scene);
    assert_eq!(transition, ScreenTransition::Stay);
    assert_eq!(marks_on_grid(&screen), 2);
    assert!(!screen.round().input_open());

    let completed = scene.tick(Duration::from_millis(400));
    let transition = screen.animations_completed(&completed, &mut scene);
    assert_eq!(transition, ScreenTransition::Stay);
    assert!(screen.round().input_open());
}

#[test]
fn test_opponent_opens_when_the_player_is_o() {
    let (mut scene, mut screen) = playing_with_player(Mark::O);
    screen.start(&mut scene);
    assert_eq!(marks_on_grid(&screen), 1);
    assert!(!screen.round().input_open());

    let completed = scene.tick(Duration::from_millis(400));
    screen.animations_completed(&completed, &mut scene);
    assert!(screen.round().input_open());
}

#[test]
fn test_rounds_end_in_a_reported_outcome() {
    for seed in 0..16 {
        let mut scene = Scene::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut screen = PlayingScreen::new(&mut scene, &mut rng);
        let mut brain = Opponent::with_seed(*screen.round().player_mark(), seed + 1000);
        screen.start(&mut scene);

        let (transition, _) = drive_to_end(&mut scene, &mut screen, &mut brain);
        let ScreenTransition::Finished(outcome) = transition else {
            panic!("round ended with {transition:?}");
        };
        match screen.round().outcome() {
            Some(reported) => assert_eq!(reported, outcome),
            // An exhausted field can end the round as a draw without
            // the machine seeing a final verdict.
            None => assert_eq!(outcome, RoundOutcome::Draw),
        }
    }
}

#[test]
fn test_win_line_delays_the_outcome_report() {
    for seed in 0..64 {
        let mut scene = Scene::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut screen = PlayingScreen::new(&mut scene, &mut rng);
        let mut brain = Opponent::with_seed(*screen.round().player_mark(), seed + 1000);
        screen.start(&mut scene);

        let (transition, delayed) = drive_to_end(&mut scene, &mut screen, &mut brain);
        let ScreenTransition::Finished(outcome) = transition else {
            panic!("round ended with {transition:?}");
        };
        if outcome == RoundOutcome::Draw {
            continue;
        }
        // Decisive rounds hold the report until the line has drawn.
        assert!(delayed);
        assert_eq!(screen.round().outcome(), Some(outcome));
        return;
    }
    panic!("no decisive round in 64 seeds");
}

#[test]
fn test_playing_destroy_releases_the_board() {
    let (mut scene, mut screen) = playing_with_player(Mark::X);
    screen.start(&mut scene);
    assert!(!scene.is_empty());
    screen.destroy(&mut scene);
    assert!(scene.is_empty());
}

#[test]
fn test_welcome_buttons_report_their_transition() {
    let mut scene = Scene::new();
    let mut screen = WelcomeScreen::new(&mut scene);
    screen.start(&mut scene);

    assert_eq!(
        screen.handle_key(InputKey::Confirm, &mut scene),
        ScreenTransition::Play
    );
    assert_eq!(
        screen.handle_key(InputKey::Right, &mut scene),
        ScreenTransition::Stay
    );
    assert_eq!(
        screen.handle_key(InputKey::Confirm, &mut scene),
        ScreenTransition::Exit
    );

    // Focus saturates at the row ends.
    screen.handle_key(InputKey::Right, &mut scene);
    assert_eq!(
        screen.handle_key(InputKey::Confirm, &mut scene),
        ScreenTransition::Exit
    );
    screen.handle_key(InputKey::Left, &mut scene);
    screen.handle_key(InputKey::Left, &mut scene);
    assert_eq!(
        screen.handle_key(InputKey::Confirm, &mut scene),
        ScreenTransition::Play
    );
}

#[test]
fn test_welcome_ignores_vertical_keys() {
    let mut scene = Scene::new();
    let mut screen = WelcomeScreen::new(&mut scene);
    screen.start(&mut scene);

    assert_eq!(
        screen.handle_key(InputKey::Up, &mut scene),
        ScreenTransition::Stay
    );
    assert_eq!(
        screen.handle_key(InputKey::Down, &mut scene),
        ScreenTransition::Stay
    );
    assert_eq!(
        screen.handle_key(InputKey::Confirm, &mut scene),
        ScreenTransition::Play
    );
}

#[test]
fn test_focus_highlight_tracks_the_selection() {
    let mut scene = Scene::new();
    let mut screen = WelcomeScreen::new(&mut scene);

    let blue_fills = |scene: &Scene| {
        let mut surface = RecordingSurface::new();
        scene.render(&mut surface);
        surface
            .ops()
            .iter()
            .filter(|op| {
                matches!(
                    op,
                    DrawOp::FillRect { color, .. } if *color == Color::rgb(0x00, 0x00, 0xff)
                )
            })
            .count()
    };

    // No highlight until the screen starts.
    assert_eq!(blue_fills(&scene), 0);
    screen.start(&mut scene);
    assert_eq!(blue_fills(&scene), 1);
    screen.handle_key(InputKey::Right, &mut scene);
    assert_eq!(blue_fills(&scene), 1);
}

#[test]
fn test_finish_banner_names_the_outcome() {
    for (outcome, banner) in [
        (RoundOutcome::Win, "YOU WIN!"),
        (RoundOutcome::Lose, "YOU LOSE!"),
        (RoundOutcome::Draw, "DRAW"),
    ] {
        let mut scene = Scene::new();
        let mut screen = FinishScreen::new(&mut scene, outcome);
        screen.start(&mut scene);

        let mut surface = RecordingSurface::new();
        scene.render(&mut surface);
        let found = surface.ops().iter().any(|op| {
            matches!(op, DrawOp::DrawText { content, .. } if content == banner)
        });
        assert!(found, "missing banner {banner:?}");
        screen.destroy(&mut scene);
        assert!(scene.is_empty());
    }
}
