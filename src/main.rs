//! Alien Invasion headless runner
//!
//! Drives a session for a fixed number of ticks with no window attached:
//! frames are tessellated into vertex buffers and audio cues are logged.
//! Without `--difficulty` the session idles on the title screen and falls
//! into attract mode; with it, the autopilot plays a real game.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use alien_invasion::audio::LogAudio;
use alien_invasion::demo::DemoPilot;
use alien_invasion::platform::{Clock, FrameClock, InputEvent, Key, ManualClock};
use alien_invasion::renderer::SpriteBatch;
use alien_invasion::sim::{Control, GamePhase, Session, World};
use alien_invasion::{Difficulty, HighScoreFile, Settings, round_to_ten};

#[derive(Parser, Debug)]
#[command(name = "alien-invasion")]
#[command(about = "Run the Alien Invasion simulation headless")]
struct Cli {
    /// Number of ticks to run (60 per second)
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,
    /// Start a game at this difficulty and let the autopilot play it
    #[arg(long, value_enum)]
    difficulty: Option<CliDifficulty>,
    /// RNG seed (alien firing)
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Settings file (JSON); missing fields use defaults
    #[arg(long)]
    settings: Option<PathBuf>,
    /// High score file
    #[arg(long, default_value = alien_invasion::highscores::DEFAULT_HIGH_SCORE_FILE)]
    high_score: PathBuf,
    /// Uniform scale for every distance (screen, sprites, speeds)
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
    /// Run as fast as possible instead of at 60 ticks per second
    #[arg(long, default_value_t = false)]
    unthrottled: bool,
    /// Silence audio cues
    #[arg(long, default_value_t = false)]
    mute: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliDifficulty {
    Easy,
    Normal,
    Hard,
}

impl From<CliDifficulty> for Difficulty {
    fn from(value: CliDifficulty) -> Self {
        match value {
            CliDifficulty::Easy => Difficulty::Easy,
            CliDifficulty::Normal => Difficulty::Normal,
            CliDifficulty::Hard => Difficulty::Hard,
        }
    }
}

fn select_key(difficulty: Difficulty) -> Key {
    match difficulty {
        Difficulty::Easy => Key::SelectEasy,
        Difficulty::Normal => Key::SelectNormal,
        Difficulty::Hard => Key::SelectHard,
    }
}

/// Input for the coming tick: menu navigation, then the autopilot
fn scripted_input<C: Clock>(
    session: &Session<SpriteBatch, LogAudio, C>,
    difficulty: Option<Difficulty>,
    pilot: &DemoPilot,
) -> Vec<InputEvent> {
    let Some(difficulty) = difficulty else {
        return Vec::new();
    };

    match session.phase() {
        GamePhase::Title | GamePhase::Demo => vec![InputEvent::KeyDown(Key::Other)],
        GamePhase::Menu => vec![InputEvent::KeyDown(select_key(difficulty))],
        GamePhase::GameOver => Vec::new(),
        GamePhase::Playing => {
            let Some(decision) = pilot.decide(&session.world) else {
                return Vec::new();
            };
            let ship = &session.world.ship;
            let mut input = Vec::with_capacity(3);
            for (key, wanted, current) in [
                (Key::Left, decision.move_left, ship.moving_left),
                (Key::Right, decision.move_right, ship.moving_right),
            ] {
                if wanted && !current {
                    input.push(InputEvent::KeyDown(key));
                } else if !wanted && current {
                    input.push(InputEvent::KeyUp(key));
                }
            }
            if decision.fire {
                input.push(InputEvent::KeyDown(Key::Fire));
            }
            input
        }
    }
}

fn run<C: Clock>(cli: &Cli, world: World, scores: HighScoreFile, clock: C) {
    let difficulty = cli.difficulty.map(Difficulty::from);
    let pilot = DemoPilot::default();
    let mut audio = LogAudio::new();
    audio.set_muted(cli.mute);
    let mut session = Session::new(world, scores, SpriteBatch::new(), audio, clock);

    let mut ran = 0;
    while ran < cli.ticks {
        let input = scripted_input(&session, difficulty, &pilot);
        if session.tick(&input) == Control::Quit {
            break;
        }
        ran += 1;
        if difficulty.is_some() && session.phase() == GamePhase::GameOver {
            log::info!("Autopilot game over after {ran} ticks");
            break;
        }
    }

    let stats = &session.world.stats;
    log::info!(
        "Ran {ran} ticks: phase {:?}, level {}, score {}, high score {}",
        session.phase(),
        stats.level,
        round_to_ten(stats.score),
        round_to_ten(stats.high_score),
    );
    log::debug!(
        "{} frames presented, last frame {} bytes of vertices",
        session.renderer().frames_presented(),
        session.renderer().vertex_bytes().len()
    );
    session.quit();
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    settings.scale(cli.scale);

    let scores = HighScoreFile::new(&cli.high_score);
    let world = World::new(settings, scores.load(), cli.seed);
    log::info!(
        "Alien Invasion: {}x{} screen, seed {}",
        world.settings.screen_width,
        world.settings.screen_height,
        cli.seed
    );

    if cli.unthrottled {
        run(&cli, world, scores, ManualClock::default());
    } else {
        run(&cli, world, scores, FrameClock::default());
    }
}
