//! Lava Run entry point
//!
//! Natively this plays a headless session with a scripted autopilot and
//! prints text frames. The browser build is driven from JS through
//! `platform::web::WebGame`.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use lava_run::Settings;
    use lava_run::display::{LevelDisplay, TextDisplay};
    use lava_run::game::{GameSession, SessionEvent};
    use lava_run::highscores::{HighScores, now_ms};
    use lava_run::platform::FileStorage;
    use lava_run::sim::{SIMPLE_LEVEL_PLAN, split_plans};

    /// Simulated frame rate
    const FRAME: f64 = 1.0 / 60.0;
    /// Give up after two minutes of game time
    const MAX_FRAMES: u32 = 60 * 120;

    env_logger::init();
    log::info!("Lava Run (native) starting...");

    // Optional level pack: plans separated by empty lines
    let plans = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading levels from {}", path);
            split_plans(&std::fs::read_to_string(&path)?)
        }
        None => vec![SIMPLE_LEVEL_PLAN.iter().map(|row| row.to_string()).collect()],
    };

    let mut storage = FileStorage::new(".lava-run");
    let settings = Settings::load(&storage);
    let mut high_scores = HighScores::load(&storage);
    let mut session = GameSession::new(&plans, &settings)?;
    let mut display = TextDisplay::new(40, 12);

    for frame in 0..MAX_FRAMES {
        let input = autopilot(frame);
        let event = session.frame(FRAME, &input);

        if frame % 60 == 0 {
            display.draw_frame(session.level());
            println!(
                "t={:>3}s level {} lives {} score {}",
                frame / 60,
                session.level_index() + 1,
                session.lives(),
                session.score()
            );
            println!("{}\n", display.frame());
        }

        match event {
            SessionEvent::Running | SessionEvent::Paused => {}
            SessionEvent::LevelLost { level, lives_left } => {
                println!("Level {} lost, {} lives left", level + 1, lives_left);
            }
            SessionEvent::LevelWon { level, points } => {
                println!("Level {} cleared for {} points", level + 1, points);
            }
            SessionEvent::GameOver { .. } | SessionEvent::Victory { .. } => {
                let Some((score, levels_cleared)) = event.run_result() else {
                    break;
                };
                println!("{}! Final score: {}", event.name(), score);
                if let Some(rank) = high_scores.add_score(score, levels_cleared, now_ms()) {
                    println!("New high score, rank {}", rank);
                    high_scores.save(&mut storage)?;
                }
                break;
            }
        }
    }

    display.clear();
    if let Some(best) = high_scores.top_score() {
        println!("Best score so far: {}", best);
    }
    Ok(())
}

/// Walk right, hopping for half a second out of every second
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(frame: u32) -> lava_run::sim::TickInput {
    lava_run::sim::TickInput {
        left: false,
        right: true,
        up: (frame / 30) % 2 == 0,
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
