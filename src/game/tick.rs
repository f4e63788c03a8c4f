//! Simulation Tick
//!
//! The core game loop. Fully deterministic: fixed-point math only, entities
//! processed in level order, no clocks or randomness. Feeding the same
//! inputs to the same level always produces the same state hash.

use tracing::debug;
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::game::collision::{
    check_all_coin_pickups, classify_enemy_contact, fell_off_world, EnemyContact,
};
use crate::game::config::Level;
use crate::game::entity::{Entity, UpdateContext};
use crate::game::events::{DeathCause, GameEvent};
use crate::game::input::{InputFrame, InputRecording};
use crate::game::session::{Session, SessionPhase};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Session is over after this tick
    pub game_over: bool,
    /// Session was reset this tick
    pub reset: bool,
    /// The simulation step ran (false while frozen in game over)
    pub simulated: bool,
}

/// Run one simulation tick.
///
/// While the session is over, everything but restart is ignored. A restart
/// press resets the level and the step then runs in the same tick with that
/// tick's movement; the jump bit is dropped. Restart while playing does
/// nothing.
pub fn tick(session: &mut Session, input: InputFrame) -> TickResult {
    let mut result = TickResult::default();

    // 0. Advance tick counter
    session.tick = session.tick.wrapping_add(1);

    let mut input = input;
    if session.phase == SessionPhase::GameOver {
        if !input.restart_pressed() {
            result.game_over = true;
            result.events = session.take_events();
            return result;
        }
        session.reset();
        result.reset = true;
        input.set_jump(false);
    }

    step(session, input);

    result.simulated = true;
    result.game_over = session.is_game_over();
    result.events = session.take_events();
    result
}

/// One step of play. Only called while playing.
fn step(session: &mut Session, input: InputFrame) {
    let physics = *session.physics();
    let scoring = *session.scoring();

    // 1. Jump (edge-triggered, only from the ground)
    if input.jump_pressed() && session.player.jump(&physics) {
        let tick = session.tick;
        session.push_event(GameEvent::player_jumped(tick));
    }

    // 2. Move the player, then the enemies, against the static world
    {
        let Session { level, player, enemies, .. } = &mut *session;
        let ctx = UpdateContext {
            input,
            world: &level.world,
            physics: &level.physics,
        };
        player.update(&ctx);
        for enemy in enemies.iter_mut() {
            enemy.update(&ctx);
        }
    }

    // 3. Coin pickups
    process_coin_pickups(session, scoring.coin_points);

    // 4. Enemy contacts
    process_enemy_contacts(session, scoring.stomp_points);

    // 5. Fell below the screen
    if fell_off_world(&session.player, &physics) {
        session.end(DeathCause::FellOffWorld);
    }

    #[cfg(feature = "debug-tracing")]
    trace!(
        "tick {} score {} phase {:?}",
        session.tick,
        session.player.score,
        session.phase
    );
}

fn process_coin_pickups(session: &mut Session, points: u32) {
    for index in check_all_coin_pickups(&session.player, &session.coins) {
        if !session.coins[index].collect() {
            continue;
        }
        let new_score = session.player.add_score(points);
        debug!("Coin {} collected, score {}", index, new_score);
        let tick = session.tick;
        session.push_event(GameEvent::coin_collected(tick, index, points, new_score));
    }
}

/// Enemies are checked one at a time in level order, and each contact
/// takes effect before the next enemy is checked. A side hit ends the
/// session but does not stop the pass, so a later enemy can still be
/// stomped (and score) in the same tick. A stomp's bounce changes
/// `vel_y`, which can turn a later stomp into a side hit.
fn process_enemy_contacts(session: &mut Session, points: u32) {
    let physics = *session.physics();

    for index in 0..session.enemies.len() {
        let contact =
            classify_enemy_contact(&session.player, &session.enemies[index], &physics);
        match contact {
            Some(EnemyContact::Stomp) => {
                session.enemies[index].stomp();
                session.player.vel_y = physics.stomp_bounce;
                let new_score = session.player.add_score(points);
                debug!("Enemy {} stomped, score {}", index, new_score);
                let tick = session.tick;
                session.push_event(GameEvent::enemy_stomped(tick, index, points, new_score));
            }
            Some(EnemyContact::SideHit) => {
                session.end(DeathCause::Enemy { enemy: index });
            }
            None => {}
        }
    }
}

/// Replay a recorded input log from a fresh session.
///
/// Runs `ticks` ticks, feeding `recording.input_at(t)` at tick `t`, and
/// returns the final session with every event in order.
pub fn replay_session(
    level: &Level,
    recording: &InputRecording,
    ticks: u32,
) -> (Session, Vec<GameEvent>) {
    let mut session = Session::new(level.clone());
    let mut all_events = Vec::new();

    for t in 0..ticks {
        let result = tick(&mut session, recording.input_at(t));
        all_events.extend(result.events);
    }

    (session, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::from_int;
    use crate::core::rect::Rect;
    use crate::game::config::{EnemySpawn, GameConfig};
    use crate::game::enemy::EnemyState;
    use crate::game::events::GameEventData;

    fn session() -> Session {
        Session::from_config(&GameConfig::default()).unwrap()
    }

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(from_int(x), from_int(y), from_int(w), from_int(h))
    }

    /// Session with no coins and the given enemies placed by hand.
    fn arena(enemies: &[(i32, i32)]) -> Session {
        let mut s = session();
        s.coins.clear();
        s.enemies = enemies
            .iter()
            .map(|&(x, y)| {
                EnemyState::new(&EnemySpawn {
                    rect: rect(x, y, 30, 30),
                    vel_x: 0,
                })
            })
            .collect();
        s
    }

    #[test]
    fn test_tick_advances_counter() {
        let mut s = session();
        for _ in 0..5 {
            tick(&mut s, InputFrame::new());
        }
        assert_eq!(s.tick, 5);
    }

    #[test]
    fn test_coin_scores_once() {
        let mut s = session();
        s.enemies.clear();
        // Put the player on top of coin 3 (300, 530)
        s.player.rect = rect(295, 512, 32, 48);

        let result = tick(&mut s, InputFrame::new());
        assert_eq!(s.score(), 10);
        assert!(s.coins[3].collected);
        assert!(matches!(
            result.events[0].data,
            GameEventData::CoinCollected { coin: 3, points: 10, new_score: 10 }
        ));

        tick(&mut s, InputFrame::new());
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn test_stomp_kills_enemy_and_bounces() {
        let mut s = arena(&[(300, 300)]);
        // Bottom ends up 4.8px into the enemy after gravity
        s.player.rect = rect(300, 255, 32, 48);
        s.player.vel_y = from_int(1);

        let result = tick(&mut s, InputFrame::new());
        assert!(!s.enemies[0].alive);
        assert_eq!(s.player.vel_y, from_int(-8));
        assert_eq!(s.score(), 50);
        assert!(!result.game_over);
    }

    #[test]
    fn test_side_hit_ends_session() {
        let mut s = arena(&[(300, 300)]);
        s.player.rect = rect(290, 290, 32, 48);

        let result = tick(&mut s, InputFrame::new());
        assert!(result.game_over);
        assert!(s.enemies[0].alive);
        assert_eq!(
            result.events,
            vec![GameEvent::player_killed(1, DeathCause::Enemy { enemy: 0 })]
        );
    }

    #[test]
    fn test_stomp_after_death_in_same_tick() {
        // Enemy 0 is a side hit, enemy 1 is under the player's feet. The
        // pass keeps going after the death and still scores the stomp.
        let mut s = arena(&[(320, 280), (300, 300)]);
        s.player.rect = rect(300, 255, 32, 48);
        s.player.vel_y = from_int(1);

        let result = tick(&mut s, InputFrame::new());
        assert!(result.game_over);
        assert!(s.enemies[0].alive);
        assert!(!s.enemies[1].alive);
        assert_eq!(s.score(), 50);
        assert_eq!(result.events.len(), 2);
        assert!(matches!(
            result.events[0].data,
            GameEventData::PlayerKilled { cause: DeathCause::Enemy { enemy: 0 } }
        ));
        assert!(matches!(result.events[1].data, GameEventData::EnemyStomped { enemy: 1, .. }));
    }

    #[test]
    fn test_bounce_turns_later_stomp_into_side_hit() {
        // Two enemies side by side under the player: the first stomp sets
        // vel_y negative, so the second overlap is a side hit.
        let mut s = arena(&[(290, 300), (310, 300)]);
        s.player.rect = rect(300, 255, 32, 48);
        s.player.vel_y = from_int(1);

        let result = tick(&mut s, InputFrame::new());
        assert!(!s.enemies[0].alive);
        assert!(s.enemies[1].alive);
        assert!(result.game_over);
        assert_eq!(s.score(), 50);
    }

    #[test]
    fn test_fall_off_world() {
        let mut s = arena(&[]);
        let h = s.physics().screen_height;
        s.player.rect = Rect::new(from_int(100), h + from_int(1), from_int(32), from_int(48));

        let result = tick(&mut s, InputFrame::new());
        assert!(result.game_over);
        assert_eq!(
            result.events,
            vec![GameEvent::player_killed(1, DeathCause::FellOffWorld)]
        );
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let mut s = session();
        s.end(DeathCause::FellOffWorld);
        s.take_events();
        let frozen = s.player.clone();

        let result = tick(&mut s, InputFrame::right().with(InputFrame::jump()));
        assert!(result.game_over);
        assert!(!result.simulated);
        assert_eq!(s.player, frozen);

        let result = tick(&mut s, InputFrame::restart().with(InputFrame::right()));
        assert!(result.reset);
        assert!(result.simulated);
        assert!(!result.game_over);
        assert_eq!(s.resets, 1);
        // Movement applies on the restart tick
        assert_eq!(s.player.rect.x, from_int(55));
        assert!(matches!(result.events[0].data, GameEventData::SessionReset { resets: 1 }));
    }

    #[test]
    fn test_restart_while_playing_is_ignored() {
        let mut s = session();
        let result = tick(&mut s, InputFrame::restart());
        assert!(!result.reset);
        assert_eq!(s.resets, 0);
    }

    #[test]
    fn test_jump_emits_event_only_from_ground() {
        let mut s = session();
        let result = tick(&mut s, InputFrame::jump());
        assert!(result.events.is_empty());

        // Land on the ground
        while !s.player.on_ground {
            tick(&mut s, InputFrame::new());
        }
        let result = tick(&mut s, InputFrame::jump());
        assert_eq!(result.events, vec![GameEvent::player_jumped(s.tick)]);
        assert!(s.player.vel_y < 0);
    }

    #[test]
    fn test_replay_matches_live_run() {
        let level = GameConfig::default().validate().unwrap();
        let mut live = Session::new(level.clone());
        let mut recording = InputRecording::new();
        let mut live_events = Vec::new();

        for t in 0..240u32 {
            let mut frame = InputFrame::new();
            frame.set_right(t % 90 < 60);
            frame.set_jump(t % 45 == 0);
            recording.record(live.tick, frame);
            live_events.extend(tick(&mut live, frame).events);
        }

        let (replayed, events) = replay_session(&level, &recording, 240);
        assert_eq!(replayed.compute_hash(), live.compute_hash());
        assert_eq!(events, live_events);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn frames() -> impl Strategy<Value = Vec<InputFrame>> {
            proptest::collection::vec((0u8..16).prop_map(|flags| InputFrame { flags }), 1..400)
        }

        proptest! {
            #[test]
            fn score_moves_in_award_steps(inputs in frames()) {
                let mut s = session();
                let mut previous = 0;

                for frame in inputs {
                    let result = tick(&mut s, frame);
                    if result.reset {
                        previous = 0;
                    }
                    let awarded: u32 = result.events.iter().map(GameEvent::points).sum();
                    for event in &result.events {
                        let points = event.points();
                        prop_assert!(points == 0 || points == 10 || points == 50);
                    }
                    prop_assert!(s.score() >= previous);
                    prop_assert_eq!(s.score() - previous, awarded);
                    previous = s.score();
                }
            }

            #[test]
            fn same_inputs_same_hash(inputs in frames()) {
                let mut a = session();
                let mut b = session();
                for frame in &inputs {
                    tick(&mut a, *frame);
                    tick(&mut b, *frame);
                }
                prop_assert_eq!(a.compute_hash(), b.compute_hash());
            }

            #[test]
            fn reset_restores_player_and_pickups(inputs in frames()) {
                let fresh = session();
                let mut s = session();
                for frame in inputs {
                    tick(&mut s, frame);
                }
                let positions: Vec<_> = s.enemies.iter().map(|e| (e.rect, e.vel_x)).collect();

                s.reset();
                let once = (s.player.clone(), s.coins.clone(), s.enemies.clone(), s.phase);
                s.reset();

                prop_assert_eq!(&s.player, &fresh.player);
                prop_assert_eq!(&s.coins, &fresh.coins);
                prop_assert!(s.enemies.iter().all(|e| e.alive));
                let after: Vec<_> = s.enemies.iter().map(|e| (e.rect, e.vel_x)).collect();
                prop_assert_eq!(after, positions);
                prop_assert_eq!(once, (s.player.clone(), s.coins.clone(), s.enemies.clone(), s.phase));
            }
        }
    }
}
