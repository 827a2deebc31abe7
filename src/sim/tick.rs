//! Frame tick
//!
//! Called once per rendered frame. Order within a frame:
//! 1. camera update
//! 2. pause / resume requests (a paused session stops here)
//! 3. clicks
//! 4. session clock advance and sprite expiry
//! 5. countdown (may fail the level and stop spawning)
//! 6. spawn, if one is due

use super::lifecycle::ObjectHandle;
use super::placement::Camera;
use super::state::LevelSession;

/// Host input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current camera, if it changed or is known
    pub camera: Option<Camera>,
    /// Pause request (pause button)
    pub pause: bool,
    /// Resume request (resume button)
    pub resume: bool,
    /// Sprites clicked this frame, in click order
    pub interactions: Vec<ObjectHandle>,
}

/// Advance a level session by one frame of `dt` seconds
pub fn tick(session: &mut LevelSession, input: &TickInput, dt: f32) {
    if let Some(camera) = input.camera {
        session.set_camera(camera);
    }

    if input.pause {
        session.pause();
    }
    if input.resume {
        session.resume();
    }

    // Paused: nothing moves, not even sprite lifespans
    if session.state() == super::SessionState::Paused {
        return;
    }

    for &handle in &input.interactions {
        session.interact(handle);
    }

    session.advance_clock(dt);
    session.tick_timer(dt);
    session.spawn_due();
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::FRAME_DT;
    use crate::persistence::{LevelProgressStore, MemoryStore};
    use crate::sim::{ConfigIssue, Footprint, GameEvent, SessionState, SpawnPattern, VariantKind};
    use crate::tuning::{LevelSpec, SpawnTuning, Tuning};

    fn camera() -> Camera {
        Camera::new(Vec2::ZERO, 5.0, 16.0 / 9.0)
    }

    fn frame() -> TickInput {
        TickInput {
            camera: Some(camera()),
            ..Default::default()
        }
    }

    fn run_frames(session: &mut LevelSession, frames: usize) {
        let input = frame();
        for _ in 0..frames {
            tick(session, &input, FRAME_DT);
        }
    }

    /// Tuning where level 1 needs `target` points and only spawns harmful sprites
    fn harmful_only(target: u32, time_limit: f32) -> Tuning {
        let mut tuning = Tuning::default();
        tuning.levels.set(LevelSpec::new(
            1,
            target,
            time_limit,
            SpawnTuning {
                pattern: SpawnPattern::Random {
                    harmful_chance: 1.0,
                },
                min_interval: 0.5,
                max_interval: 0.5,
                lifespan: 10.0,
                min_separation: 0.5,
                ..SpawnTuning::default()
            },
        ));
        tuning
    }

    fn click(session: &mut LevelSession, handle: ObjectHandle) {
        let input = TickInput {
            interactions: vec![handle],
            ..frame()
        };
        tick(session, &input, FRAME_DT);
    }

    #[test]
    fn test_first_sprite_spawns_on_first_frame() {
        let mut session =
            LevelSession::new(1, &Tuning::default(), 1, Box::new(MemoryStore::new()));
        run_frames(&mut session, 1);
        assert_eq!(session.live_objects().len(), 1);
        let events = session.drain_events();
        assert!(matches!(events.as_slice(), [GameEvent::Spawned { .. }]));
    }

    #[test]
    fn test_sprites_expire_after_lifespan() {
        let mut session =
            LevelSession::new(1, &Tuning::default(), 2, Box::new(MemoryStore::new()));
        run_frames(&mut session, 1);
        let first = session.live_objects()[0].handle;

        // Lifespan is 3s
        run_frames(&mut session, 170);
        assert!(session.lifecycle().get(first).is_some());
        run_frames(&mut session, 20);
        assert!(session.lifecycle().get(first).is_none());
    }

    #[test]
    fn test_live_sprites_keep_separation() {
        let mut session =
            LevelSession::new(2, &Tuning::default(), 3, Box::new(MemoryStore::new()));
        let min_sep = session.spawn_tuning().min_separation;
        let input = frame();
        for _ in 0..(30 * 60) {
            tick(&mut session, &input, FRAME_DT);
            for event in session.drain_events() {
                if let GameEvent::Spawned {
                    handle, position, ..
                } = event
                {
                    let crowded = session
                        .live_objects()
                        .iter()
                        .filter(|o| o.handle != handle)
                        .any(|o| o.position.distance(position) < min_sep);
                    // At most two other sprites are live when placing, leaving plenty of room
                    assert!(!crowded, "sprite {:?} placed too close", handle);
                }
            }
        }
    }

    #[test]
    fn test_seven_clicks_complete_target_seven() {
        let mut session = LevelSession::new(1, &harmful_only(7, 60.0), 4, Box::new(MemoryStore::new()));
        let mut clicks = 0;
        while clicks < 8 {
            run_frames(&mut session, 1);
            let Some(handle) = session.live_objects().first().map(|o| o.handle) else {
                continue;
            };
            click(&mut session, handle);
            clicks += 1;
            if clicks < 7 {
                assert_eq!(session.state(), SessionState::Active);
            }
            if clicks == 7 {
                assert_eq!(session.state(), SessionState::Complete);
                // Spawning halts: an eighth click has nothing to hit
                break;
            }
        }
        assert_eq!(session.session().score(), 7);
        assert!(!session.scheduler().is_scheduling());

        // Any leftover sprite cannot add an eighth point
        let live = session.live_objects().iter().map(|o| o.handle).collect::<Vec<_>>();
        for handle in live {
            click(&mut session, handle);
        }
        assert_eq!(session.session().score(), 7);
        assert_eq!(session.state(), SessionState::Complete);
    }

    #[test]
    fn test_completion_advances_watermark_once() {
        let tuning = harmful_only(1, 60.0);
        let mut session = LevelSession::new(1, &tuning, 5, Box::new(MemoryStore::new()));
        run_frames(&mut session, 1);
        let handle = session.live_objects()[0].handle;
        click(&mut session, handle);

        let outcome = session.unlock_outcome().unwrap();
        assert!(outcome.advanced);
        assert_eq!(outcome.current, 2);
        let completes = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::LevelComplete { .. }))
            .count();
        assert_eq!(completes, 1);

        // Replay level 1 with the same store
        let mut replay = LevelSession::new(1, &tuning, 6, session.into_store());
        run_frames(&mut replay, 1);
        let handle = replay.live_objects()[0].handle;
        click(&mut replay, handle);
        let outcome = replay.unlock_outcome().unwrap();
        assert!(!outcome.advanced);
        assert_eq!(replay.into_store().unlocked_level(), 2);
    }

    #[test]
    fn test_timeout_fails_once_and_stops_spawning() {
        let mut session =
            LevelSession::new(1, &harmful_only(100, 2.0), 7, Box::new(MemoryStore::new()));
        run_frames(&mut session, 200);
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.snapshot().seconds_display, 0);
        let spawned = session.scheduler().spawned();

        run_frames(&mut session, 600);
        assert_eq!(session.scheduler().spawned(), spawned);
        let fails = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::LevelFailed { .. }))
            .count();
        assert_eq!(fails, 1);
        // Sprites still run out their lifespan after the level ends
        assert!(session.live_objects().is_empty());
    }

    #[test]
    fn test_pause_freezes_timer_and_spawning() {
        let mut session =
            LevelSession::new(2, &Tuning::default(), 8, Box::new(MemoryStore::new()));
        run_frames(&mut session, 90);

        tick(
            &mut session,
            &TickInput {
                pause: true,
                ..frame()
            },
            FRAME_DT,
        );
        assert_eq!(session.state(), SessionState::Paused);
        let before = session.snapshot();
        let spawned = session.scheduler().spawned();
        let due = session.scheduler().next_due();

        run_frames(&mut session, 10 * 60);
        let after = session.snapshot();
        assert_eq!(after.time_remaining, before.time_remaining);
        assert_eq!(after.live_objects, before.live_objects);
        assert_eq!(session.scheduler().spawned(), spawned);
        assert_eq!(session.scheduler().next_due(), due);

        // Clicks while paused are ignored and the sprite stays
        if let Some(handle) = session.live_objects().first().map(|o| o.handle) {
            click(&mut session, handle);
            assert!(session.lifecycle().get(handle).is_some());
        }

        tick(
            &mut session,
            &TickInput {
                resume: true,
                ..frame()
            },
            FRAME_DT,
        );
        assert_eq!(session.state(), SessionState::Active);
        assert!(session.snapshot().time_remaining < before.time_remaining);
    }

    #[test]
    fn test_click_then_expiry_scores_once() {
        let mut session =
            LevelSession::new(1, &harmful_only(10, 60.0), 9, Box::new(MemoryStore::new()));
        run_frames(&mut session, 1);
        let handle = session.live_objects()[0].handle;

        click(&mut session, handle);
        assert_eq!(session.session().score(), 1);
        assert!(!session.expire(handle));
        run_frames(&mut session, 20 * 60 / 10);
        assert_eq!(session.session().score(), 1);
    }

    #[test]
    fn test_expiry_then_click_scores_nothing() {
        let mut session =
            LevelSession::new(1, &harmful_only(10, 60.0), 10, Box::new(MemoryStore::new()));
        run_frames(&mut session, 1);
        let handle = session.live_objects()[0].handle;

        assert!(session.expire(handle));
        click(&mut session, handle);
        assert_eq!(session.session().score(), 0);
        assert!(
            !session
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Interacted { .. }))
        );
    }

    #[test]
    fn test_clicking_beneficial_costs_a_point() {
        let mut tuning = Tuning::default();
        tuning.levels.set(LevelSpec::new(
            1,
            10,
            60.0,
            SpawnTuning {
                pattern: SpawnPattern::Alternating {
                    first: VariantKind::Beneficial,
                },
                ..SpawnTuning::default()
            },
        ));
        let mut session = LevelSession::new(1, &tuning, 11, Box::new(MemoryStore::new()));
        run_frames(&mut session, 1);
        let good = session.live_objects()[0];
        assert_eq!(good.variant.kind, VariantKind::Beneficial);

        click(&mut session, good.handle);
        assert_eq!(session.session().score(), 0);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_oversized_sprite_spawns_at_view_center() {
        let mut tuning = harmful_only(100, 60.0);
        let spawn = tuning.levels.resolve(1).spec.spawn;
        tuning.levels.set(LevelSpec::new(
            1,
            100,
            60.0,
            SpawnTuning {
                // 20x20 sprite in a view only 10 units tall
                footprint: Footprint::from_size(Vec2::splat(20.0)),
                ..spawn
            },
        ));
        let mut session = LevelSession::new(1, &tuning, 12, Box::new(MemoryStore::new()));
        let center = Vec2::new(2.0, -1.0);
        let input = TickInput {
            camera: Some(Camera::new(center, 5.0, 16.0 / 9.0)),
            ..Default::default()
        };

        // 0.5s interval: a spawn every 30 frames
        for _ in 0..(3 * 60) {
            tick(&mut session, &input, FRAME_DT);
        }

        let positions = session
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Spawned { position, .. } => Some(position),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert!(positions.len() >= 5);
        assert!(positions.iter().all(|&p| p == center));

        let degenerate = session
            .diagnostics()
            .issues()
            .iter()
            .filter(|i| matches!(i, ConfigIssue::DegenerateFootprint { .. }))
            .count();
        assert_eq!(degenerate, 1);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_completing_highest_level_number() {
        let mut tuning = harmful_only(1, 60.0);
        let spawn = tuning.levels.resolve(1).spec.spawn;
        tuning.levels.set(LevelSpec::new(u32::MAX, 1, 60.0, spawn));
        let mut session = LevelSession::new(u32::MAX, &tuning, 13, Box::new(MemoryStore::new()));
        run_frames(&mut session, 1);
        let handle = session.live_objects()[0].handle;
        click(&mut session, handle);

        assert_eq!(session.state(), SessionState::Complete);
        let outcome = session.unlock_outcome().unwrap();
        assert_eq!(outcome.current, u32::MAX);
        assert_eq!(session.into_store().unlocked_level(), u32::MAX);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = LevelSession::new(3, &Tuning::default(), 99, Box::new(MemoryStore::new()));
        let mut b = LevelSession::new(3, &Tuning::default(), 99, Box::new(MemoryStore::new()));
        run_frames(&mut a, 20 * 60);
        run_frames(&mut b, 20 * 60);
        assert_eq!(a.drain_events(), b.drain_events());
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
