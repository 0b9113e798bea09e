//! Fixed timestep session tick
//!
//! The session owns the world and its collaborators (render surface, audio,
//! clock) and runs one frame per call in a fixed order:
//!
//! 1. input
//! 2. if active: demo pilot, ship, projectiles, fleet, explosions
//! 3. side effects of the tick's events (audio, pauses, cursor)
//! 4. render
//! 5. end-of-tick level check
//! 6. frame cap

use crate::audio::{AudioSink, MusicCue, SoundEffect};
use crate::consts::*;
use crate::demo::DemoPilot;
use crate::platform::{Clock, InputEvent, Key};
use crate::renderer::{Overlay, RenderSurface, Sprite, SpriteKind, world_sprites};
use crate::ui::{MenuAction, MenuLayout, Scoreboard};
use crate::{Difficulty, HighScoreFile};

use super::state::GameEvent;
use super::world::World;

/// Where the session is, derived from the world's flags and the title state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen with the blinking prompt
    Title,
    /// Difficulty buttons, before the first game
    Menu,
    Playing,
    /// Attract mode
    Demo,
    /// Difficulty buttons plus the game-over banner
    GameOver,
}

/// Whether the loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Session<R: RenderSurface, A: AudioSink, C: Clock> {
    pub world: World,
    renderer: R,
    audio: A,
    clock: C,
    high_scores: HighScoreFile,
    menu: MenuLayout,
    pilot: DemoPilot,
    on_title: bool,
    /// Ticks spent idle on the title screen (blink and demo timers)
    title_ticks: u32,
}

impl<R: RenderSurface, A: AudioSink, C: Clock> Session<R, A, C> {
    /// Session on the title screen
    pub fn new(world: World, high_scores: HighScoreFile, renderer: R, audio: A, clock: C) -> Self {
        let menu = MenuLayout::for_settings(&world.settings);
        Self {
            world,
            renderer,
            audio,
            clock,
            high_scores,
            menu,
            pilot: DemoPilot::default(),
            on_title: true,
            title_ticks: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        let stats = &self.world.stats;
        if stats.active {
            if stats.demo {
                GamePhase::Demo
            } else {
                GamePhase::Playing
            }
        } else if self.on_title {
            GamePhase::Title
        } else if stats.game_over {
            GamePhase::GameOver
        } else {
            GamePhase::Menu
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run one frame
    pub fn tick(&mut self, input: &[InputEvent]) -> Control {
        for event in input {
            if self.handle_input(event) == Control::Quit {
                return self.quit();
            }
        }

        match self.phase() {
            GamePhase::Title => self.tick_title(),
            GamePhase::Demo => self.steer_demo(),
            _ => {}
        }

        self.world.update();
        self.dispatch_events();

        if self.phase() == GamePhase::Demo && self.world.stats.ships_left == 0 {
            self.leave_demo();
        }

        self.render();

        self.world.check_level_clear();
        self.dispatch_events();

        self.clock.end_frame();
        Control::Continue
    }

    /// Persist the high score and stop
    ///
    /// A failed write is reported but never blocks quitting.
    pub fn quit(&mut self) -> Control {
        let high_score = self.world.stats.high_score;
        match self.high_scores.save(high_score) {
            Ok(()) => log::info!(
                "Saved high score {} to {}",
                crate::round_to_ten(high_score),
                self.high_scores.path().display()
            ),
            Err(e) => log::error!(
                "Failed to save high score to {}: {e}",
                self.high_scores.path().display()
            ),
        }
        Control::Quit
    }

    fn handle_input(&mut self, event: &InputEvent) -> Control {
        if *event == InputEvent::Quit {
            return Control::Quit;
        }

        match self.phase() {
            // Any key or click dismisses the title screen or attract mode
            GamePhase::Title => {
                if matches!(event, InputEvent::KeyDown(_) | InputEvent::PointerClick(_)) {
                    self.leave_title();
                }
            }
            GamePhase::Demo => {
                if matches!(event, InputEvent::KeyDown(_) | InputEvent::PointerClick(_)) {
                    self.leave_demo();
                }
            }
            GamePhase::Menu | GamePhase::GameOver => match event {
                InputEvent::KeyDown(Key::Quit) => return Control::Quit,
                InputEvent::KeyDown(Key::SelectEasy) => self.start_game(Difficulty::Easy),
                InputEvent::KeyDown(Key::SelectNormal) => self.start_game(Difficulty::Normal),
                InputEvent::KeyDown(Key::SelectHard) => self.start_game(Difficulty::Hard),
                InputEvent::PointerClick(pos) => match self.menu.hit_test(*pos) {
                    Some(MenuAction::Start(difficulty)) => self.start_game(difficulty),
                    Some(MenuAction::Quit) => return Control::Quit,
                    None => {}
                },
                _ => {}
            },
            GamePhase::Playing => match event {
                InputEvent::KeyDown(Key::Quit) => return Control::Quit,
                InputEvent::KeyDown(Key::Left) => self.world.ship.moving_left = true,
                InputEvent::KeyDown(Key::Right) => self.world.ship.moving_right = true,
                InputEvent::KeyUp(Key::Left) => self.world.ship.moving_left = false,
                InputEvent::KeyUp(Key::Right) => self.world.ship.moving_right = false,
                InputEvent::KeyDown(Key::Fire) => {
                    self.world.fire_ship();
                }
                _ => {}
            },
        }
        Control::Continue
    }

    fn start_game(&mut self, difficulty: Difficulty) {
        self.on_title = false;
        self.world.start_game(difficulty);
    }

    /// Leave the title screen for the menu
    fn leave_title(&mut self) {
        self.world.reset_idle();
        self.on_title = false;
        self.title_ticks = 0;
        self.renderer.set_cursor_visible(true);
    }

    /// End attract mode and go back to the title screen
    fn leave_demo(&mut self) {
        self.world.reset_idle();
        self.on_title = true;
        self.title_ticks = 0;
    }

    fn tick_title(&mut self) {
        self.title_ticks += 1;
        if self.title_ticks >= DEMO_DELAY_TICKS {
            self.title_ticks = 0;
            self.world.start_demo();
        }
    }

    fn steer_demo(&mut self) {
        let Some(decision) = self.pilot.decide(&self.world) else {
            return;
        };
        self.world.ship.moving_left = decision.move_left;
        self.world.ship.moving_right = decision.move_right;
        if decision.fire {
            self.world.fire_ship();
        }
    }

    /// Turn the tick's events into audio, pauses and cursor changes
    fn dispatch_events(&mut self) {
        for event in self.world.drain_events() {
            match event {
                GameEvent::ShipFired => self.audio.play(SoundEffect::ShipFired),
                GameEvent::AlienFired => self.audio.play(SoundEffect::AlienFired),
                GameEvent::AlienDestroyed { .. } => self.audio.play(SoundEffect::AlienDestroyed),
                GameEvent::LifeLost { .. } => {
                    self.audio.music(MusicCue::Pause);
                    self.audio.play(SoundEffect::LifeLost);
                    self.clock.pause(LIFE_LOST_PAUSE);
                    self.audio.music(MusicCue::Resume);
                }
                GameEvent::GameStarted => {
                    self.renderer.set_cursor_visible(false);
                    self.audio.play(SoundEffect::GameStarted);
                    self.clock.pause(GAME_START_PAUSE);
                    self.audio.music(MusicCue::Play);
                }
                GameEvent::GameOver => {
                    self.audio.music(MusicCue::Stop);
                    self.audio.play(SoundEffect::GameOver);
                    self.clock.pause(GAME_OVER_PAUSE);
                    self.renderer.set_cursor_visible(true);
                }
                GameEvent::LevelUp { .. } => self.audio.music(MusicCue::Rewind),
                GameEvent::HighScore { score } => log::debug!("New high score {score}"),
                GameEvent::ScoreChanged { .. } | GameEvent::FleetReversed => {}
            }
        }
    }

    fn render(&mut self) {
        if self.phase() == GamePhase::Title {
            let show_prompt = (self.title_ticks / BLINK_TICKS) % 2 == 0;
            self.renderer.draw_overlay(&Overlay::Title { show_prompt });
            self.renderer.present_frame();
            return;
        }

        for sprite in world_sprites(&self.world) {
            self.renderer.draw_sprite(&sprite);
        }

        let hud = Scoreboard::from_stats(&self.world.stats);
        for rect in hud.ship_icons(&self.world.settings) {
            self.renderer.draw_sprite(&Sprite {
                kind: SpriteKind::Ship,
                rect,
            });
        }
        self.renderer.draw_hud(&hud);

        if !self.world.stats.active {
            self.renderer.draw_overlay(&Overlay::Menu {
                buttons: &self.menu.buttons,
                game_over: self.world.stats.game_over,
            });
        }
        self.renderer.present_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::audio::{NullAudio, RecordingAudio};
    use crate::platform::ManualClock;
    use crate::renderer::SpriteBatch;
    use crate::sim::state::{Alien, Faction, Projectile};
    use glam::Vec2;
    use proptest::prelude::*;
    use tempfile::TempDir;

    type TestSession = Session<SpriteBatch, RecordingAudio, ManualClock>;

    fn session_in(dir: &TempDir, seed: u64) -> TestSession {
        let scores = HighScoreFile::new(dir.path().join("highscore.json"));
        let world = World::new(Settings::default(), scores.load(), seed);
        Session::new(
            world,
            scores,
            SpriteBatch::new(),
            RecordingAudio::default(),
            ManualClock::default(),
        )
    }

    /// Session past the title screen, playing at the given difficulty
    fn playing(dir: &TempDir, difficulty: Difficulty) -> TestSession {
        let mut session = session_in(dir, 42);
        let select = match difficulty {
            Difficulty::Easy => Key::SelectEasy,
            Difficulty::Normal => Key::SelectNormal,
            Difficulty::Hard => Key::SelectHard,
        };
        session.tick(&[InputEvent::KeyDown(Key::Other)]);
        session.tick(&[InputEvent::KeyDown(select)]);
        session
    }

    fn bomb_on_ship(session: &mut TestSession) {
        let pos = session.world.ship.rect().center();
        session.world.projectiles.alien.push(Projectile {
            id: 10_000,
            faction: Faction::Alien,
            pos,
            size: Vec2::new(3.0, 15.0),
        });
    }

    #[test]
    fn test_title_to_menu_to_playing() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, 1);
        assert_eq!(session.phase(), GamePhase::Title);

        // Select keys on the title screen only dismiss it
        session.tick(&[InputEvent::KeyDown(Key::SelectHard)]);
        assert_eq!(session.phase(), GamePhase::Menu);

        session.tick(&[InputEvent::KeyDown(Key::SelectHard)]);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.world.settings.alien_bullets_allowed, 3);
        assert!(!session.renderer().cursor_visible());
        assert!(session.audio().effects.contains(&SoundEffect::GameStarted));
        assert_eq!(session.audio().music, vec![MusicCue::Play]);
        assert_eq!(session.clock().pauses, vec![GAME_START_PAUSE]);
    }

    #[test]
    fn test_menu_buttons() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, 1);
        session.tick(&[InputEvent::PointerClick(Vec2::ZERO)]);
        assert_eq!(session.phase(), GamePhase::Menu);

        // Normal button sits at the screen center
        session.tick(&[InputEvent::PointerClick(Vec2::new(640.0, 360.0))]);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.world.settings.alien_bullets_allowed, 2);
    }

    #[test]
    fn test_fire_only_while_playing() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, 1);
        session.tick(&[InputEvent::KeyDown(Key::Other)]);
        session.tick(&[InputEvent::KeyDown(Key::Fire)]);
        assert!(session.world.projectiles.ship.is_empty());

        session.tick(&[InputEvent::KeyDown(Key::SelectEasy)]);
        session.tick(&[InputEvent::KeyDown(Key::Fire)]);
        assert_eq!(session.world.projectiles.ship.len(), 1);
        assert!(session.audio().effects.contains(&SoundEffect::ShipFired));
    }

    #[test]
    fn test_fire_at_cap_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut session = playing(&dir, Difficulty::Easy);
        let cap = session.world.settings.ship_bullets_allowed;
        let fire = vec![InputEvent::KeyDown(Key::Fire); cap + 2];
        session.tick(&fire);
        assert_eq!(session.world.projectiles.ship.len(), cap);
    }

    #[test]
    fn test_movement_intents_persist() {
        let dir = TempDir::new().unwrap();
        let mut session = playing(&dir, Difficulty::Easy);
        let start = session.world.ship.pos.x;
        session.tick(&[InputEvent::KeyDown(Key::Right)]);
        session.tick(&[]);
        let speed = session.world.settings.ship_speed;
        assert_eq!(session.world.ship.pos.x, start + 2.0 * speed);
        session.tick(&[InputEvent::KeyUp(Key::Right)]);
        assert_eq!(session.world.ship.pos.x, start + 2.0 * speed);
    }

    #[test]
    fn test_life_lost_pauses_and_respawns() {
        let dir = TempDir::new().unwrap();
        let mut session = playing(&dir, Difficulty::Easy);
        session.world.stats.score = 300;
        bomb_on_ship(&mut session);

        session.tick(&[]);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.world.stats.ships_left, 2);
        assert_eq!(session.world.stats.score, 300);
        assert!(session.clock().pauses.contains(&LIFE_LOST_PAUSE));
        assert_eq!(
            session.audio().music,
            vec![MusicCue::Play, MusicCue::Pause, MusicCue::Resume]
        );
    }

    #[test]
    fn test_last_ship_hit_is_game_over() {
        let dir = TempDir::new().unwrap();
        let mut session = playing(&dir, Difficulty::Normal);
        session.world.stats.ships_left = 1;
        bomb_on_ship(&mut session);

        session.tick(&[]);
        assert_eq!(session.world.stats.ships_left, 0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(session.renderer().cursor_visible());
        assert!(session.clock().pauses.contains(&GAME_OVER_PAUSE));
        assert_eq!(session.audio().music.last(), Some(&MusicCue::Stop));
        assert!(session.renderer().text().contains(&"Game Over".to_string()));
        assert_eq!(session.world.settings.alien_bullets_allowed, 1);

        // Select again from game over
        session.tick(&[InputEvent::KeyDown(Key::SelectEasy)]);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.world.stats.ships_left, 3);
    }

    #[test]
    fn test_last_alien_kill_levels_up_after_explosion() {
        let dir = TempDir::new().unwrap();
        let mut session = playing(&dir, Difficulty::Easy);
        session.world.settings.alien_bullets_allowed = 0;
        session.world.projectiles.alien.clear();
        session.tick(&[InputEvent::KeyDown(Key::Fire)]);

        // One moving alien far from both edges, the shot just below it
        let settings = &session.world.settings;
        let alien = Alien::new(9_000, Vec2::new(610.0, 300.0), settings);
        session.world.fleet.aliens = vec![alien];
        session.world.projectiles.ship[0].pos = Vec2::new(638.0, 342.0);
        let alien_speed = session.world.settings.alien_speed;
        let bullet_speed = session.world.settings.bullet_speed;
        assert!(alien_speed > 0.0);

        session.tick(&[]);
        assert!(session.world.fleet.is_empty());
        assert_eq!(session.world.explosions.len(), 1);
        assert_eq!(session.world.stats.score, 50);
        assert_eq!(session.world.stats.level, 1);
        assert!(session.audio().effects.contains(&SoundEffect::AlienDestroyed));

        let mut ticks = 0;
        while session.world.stats.level == 1 && ticks < 100 {
            session.tick(&[]);
            ticks += 1;
        }
        assert!(ticks <= EXPLOSION_TICKS as usize);
        let settings = &session.world.settings;
        assert_eq!(session.world.stats.level, 2);
        assert!((settings.alien_speed - alien_speed * 1.1).abs() < 1e-5);
        assert!((settings.bullet_speed - bullet_speed * 1.1).abs() < 1e-5);
        assert_eq!(settings.alien_points, 75);
        assert_eq!(session.world.fleet.len(), 27);
        assert!(session.world.explosions.is_empty());
        assert_eq!(session.audio().music.last(), Some(&MusicCue::Rewind));
    }

    #[test]
    fn test_projectiles_cancel_without_score() {
        let dir = TempDir::new().unwrap();
        let mut session = playing(&dir, Difficulty::Easy);
        session.world.settings.alien_bullets_allowed = 0;
        session.world.projectiles.alien.clear();
        session.tick(&[InputEvent::KeyDown(Key::Fire)]);
        let shot = session.world.projectiles.ship[0].pos;
        session.world.projectiles.alien.push(Projectile {
            id: 10_000,
            faction: Faction::Alien,
            pos: shot - Vec2::new(0.0, 10.0),
            size: Vec2::new(3.0, 15.0),
        });

        session.tick(&[]);
        assert!(session.world.projectiles.is_empty());
        assert_eq!(session.world.stats.score, 0);
        assert!(session.world.explosions.is_empty());
    }

    #[test]
    fn test_demo_starts_after_idle_and_ends_on_key() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, 5);
        for _ in 0..DEMO_DELAY_TICKS {
            session.tick(&[]);
        }
        assert_eq!(session.phase(), GamePhase::Demo);

        for _ in 0..30 {
            session.tick(&[]);
        }
        session.tick(&[InputEvent::KeyDown(Key::Fire)]);
        assert_eq!(session.phase(), GamePhase::Title);
        assert!(!session.world.stats.active);
        assert_eq!(session.world.stats.score, 0);
    }

    #[test]
    fn test_demo_never_sets_high_score() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, 9);
        let mut saw_demo = false;
        for _ in 0..5_000 {
            session.tick(&[]);
            saw_demo |= session.phase() == GamePhase::Demo;
            assert_eq!(session.world.stats.high_score, 0);
            assert!(!session.world.stats.game_over);
        }
        assert!(saw_demo);
    }

    #[test]
    fn test_quit_persists_rounded_high_score() {
        let dir = TempDir::new().unwrap();
        let mut session = playing(&dir, Difficulty::Easy);
        session.world.stats.high_score = 1234;
        assert_eq!(session.tick(&[InputEvent::KeyDown(Key::Quit)]), Control::Quit);

        let reloaded = session_in(&dir, 1);
        assert_eq!(reloaded.world.stats.high_score, 1230);
    }

    #[test]
    fn test_quit_with_unwritable_file_still_quits() {
        let dir = TempDir::new().unwrap();
        let scores = HighScoreFile::new(dir.path().join("missing").join("hs.json"));
        let world = World::new(Settings::default(), 0, 1);
        let mut session = Session::new(
            world,
            scores,
            SpriteBatch::new(),
            NullAudio,
            ManualClock::default(),
        );
        assert_eq!(session.tick(&[InputEvent::Quit]), Control::Quit);
    }

    #[test]
    fn test_determinism() {
        let dir = TempDir::new().unwrap();
        let script = |i: u32| match i % 7 {
            0 => vec![InputEvent::KeyDown(Key::Fire)],
            2 => vec![InputEvent::KeyDown(Key::Left)],
            4 => vec![InputEvent::KeyUp(Key::Left), InputEvent::KeyDown(Key::Right)],
            6 => vec![InputEvent::KeyUp(Key::Right)],
            _ => vec![],
        };

        let mut a = playing(&dir, Difficulty::Hard);
        let mut b = playing(&dir, Difficulty::Hard);
        for i in 0..600 {
            a.tick(&script(i));
            b.tick(&script(i));
        }
        assert_eq!(a.world.stats, b.world.stats);
        assert_eq!(a.world.ship.pos, b.world.ship.pos);
        assert_eq!(a.world.fleet.len(), b.world.fleet.len());
        assert_eq!(a.renderer().vertices(), b.renderer().vertices());
    }

    fn play_input() -> impl Strategy<Value = Vec<InputEvent>> {
        let event = prop_oneof![
            Just(InputEvent::KeyDown(Key::Fire)),
            Just(InputEvent::KeyDown(Key::Left)),
            Just(InputEvent::KeyDown(Key::Right)),
            Just(InputEvent::KeyUp(Key::Left)),
            Just(InputEvent::KeyUp(Key::Right)),
        ];
        prop::collection::vec(event, 0..3)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_ships_and_score_monotonic(
            frames in prop::collection::vec(play_input(), 1..400),
        ) {
            let dir = TempDir::new().unwrap();
            let mut session = playing(&dir, Difficulty::Hard);
            let mut ships = session.world.stats.ships_left;
            let mut score = session.world.stats.score;

            for input in frames {
                session.tick(&input);
                let stats = &session.world.stats;
                prop_assert!(stats.ships_left <= ships);
                prop_assert!(stats.score >= score);
                prop_assert!(stats.high_score >= stats.score);
                prop_assert!(
                    session.world.projectiles.ship.len() <= session.world.settings.ship_bullets_allowed
                );
                ships = stats.ships_left;
                score = stats.score;
            }
        }
    }
}
