// Integration tests for the playback controller

use std::time::{Duration, Instant};

use algostep::config::Config;
use algostep::error::PlaybackError;
use algostep::input::TraceInput;
use algostep::materialize::Materializer;
use algostep::playback::{Phase, PlaybackController, TickOutcome};

fn loaded(algorithm: &str, values: &[i64]) -> PlaybackController {
    let mut controller = PlaybackController::with_config(&Config::default());
    controller
        .load(
            &Materializer::builtin(),
            algorithm,
            &TraceInput::Array(values.to_vec()),
        )
        .expect("load failed");
    controller
}

#[test]
fn test_starts_idle_without_trace() {
    let mut controller = PlaybackController::default();
    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(controller.current_index(), 0);
    assert!(controller.current_step().is_none());

    // Every command is a no-op without a trace
    assert!(!controller.play());
    assert_eq!(controller.step_forward(), Ok(false));
    assert_eq!(controller.step_backward(), Ok(false));
    assert_eq!(controller.tick(), TickOutcome::Idle);
    assert_eq!(controller.phase(), Phase::Idle);
}

#[test]
fn test_load_moves_to_ready() {
    let controller = loaded("bubble", &[5, 3, 1, 4, 2]);
    assert_eq!(controller.phase(), Phase::Ready);
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.trace().len(), 19);
    assert!(!controller.is_playing());
}

#[test]
fn test_step_forward_clamps_at_last_step() {
    let mut controller = loaded("insertion", &[2, 1]);
    let last = controller.trace().last_index();

    for _ in 0..last {
        assert_eq!(controller.step_forward(), Ok(true));
    }
    assert_eq!(controller.current_index(), last);
    assert_eq!(controller.phase(), Phase::Paused);

    assert_eq!(controller.step_forward(), Ok(false));
    assert_eq!(controller.current_index(), last);
    assert_eq!(controller.phase(), Phase::Paused);
}

#[test]
fn test_step_backward_at_start_changes_nothing() {
    let mut controller = loaded("bubble", &[2, 1]);
    assert_eq!(controller.step_backward(), Ok(false));
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.phase(), Phase::Ready);

    controller.step_forward().expect("step failed");
    assert_eq!(controller.step_backward(), Ok(true));
    assert_eq!(controller.current_index(), 0);
}

#[test]
fn test_stepping_rejected_while_playing() {
    let mut controller = loaded("bubble", &[3, 2, 1]);
    assert!(controller.play());

    assert_eq!(
        controller.step_forward(),
        Err(PlaybackError::WhilePlaying {
            command: "step forward"
        })
    );
    assert!(matches!(
        controller.step_backward(),
        Err(PlaybackError::WhilePlaying { .. })
    ));
    assert!(controller.set_speed(100).is_err());
    assert!(controller.seek(2).is_err());
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.speed_ms(), 500);
}

#[test]
fn test_play_pause_keeps_index() {
    let mut controller = loaded("selection", &[4, 3, 2, 1]);
    controller.play();
    assert_eq!(controller.tick(), TickOutcome::Advanced(1));
    assert_eq!(controller.tick(), TickOutcome::Advanced(2));

    assert!(controller.pause());
    assert_eq!(controller.current_index(), 2);
    assert_eq!(controller.phase(), Phase::Paused);
    assert!(controller.active_timer().is_none());
    assert_eq!(controller.tick(), TickOutcome::Idle);

    // Resuming continues from the paused index
    controller.play();
    assert_eq!(controller.tick(), TickOutcome::Advanced(3));
}

#[test]
fn test_play_then_pause_before_tick() {
    let mut controller = loaded("bubble", &[3, 2, 1]);
    controller.step_forward().expect("step failed");
    assert_eq!(controller.current_index(), 1);

    assert!(controller.play());
    assert!(controller.pause());

    assert_eq!(controller.current_index(), 1);
    assert_eq!(controller.phase(), Phase::Paused);
    assert!(controller.active_timer().is_none());
    assert!(!controller.is_playing());
}

#[test]
fn test_play_until_finished_then_replay_rewinds() {
    let mut controller = loaded("bubble", &[1, 2]);
    let len = controller.trace().len();
    controller.play();

    let mut outcomes = Vec::new();
    loop {
        let outcome = controller.tick();
        outcomes.push(outcome);
        if outcome != TickOutcome::Advanced(outcomes.len()) {
            break;
        }
    }

    assert_eq!(outcomes.len(), len);
    assert_eq!(outcomes.last(), Some(&TickOutcome::Completed));
    assert_eq!(controller.phase(), Phase::Finished);
    assert_eq!(controller.current_index(), len - 1);

    assert!(controller.play());
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.phase(), Phase::Playing);
}

#[test]
fn test_poll_follows_speed() {
    let mut controller = loaded("bubble", &[3, 2, 1]);
    controller.set_speed(200).expect("speed rejected");

    let start = Instant::now();
    controller.play_at(start);
    assert_eq!(controller.poll(start + Duration::from_millis(150)), TickOutcome::Idle);
    assert_eq!(
        controller.poll(start + Duration::from_millis(200)),
        TickOutcome::Advanced(1)
    );
    assert_eq!(controller.poll(start + Duration::from_millis(300)), TickOutcome::Idle);
    assert_eq!(
        controller.poll(start + Duration::from_millis(400)),
        TickOutcome::Advanced(2)
    );
}

#[test]
fn test_restarting_play_replaces_timer() {
    let mut controller = loaded("bubble", &[3, 2, 1]);
    controller.play();
    let first = controller.active_timer().expect("no timer").id;
    controller.play();
    let second = controller.active_timer().expect("no timer").id;

    assert_ne!(first, second);
    assert_eq!(controller.on_timer(first), TickOutcome::Idle);
    assert_eq!(controller.on_timer(second), TickOutcome::Advanced(1));
}

#[test]
fn test_set_speed_bounds() {
    let mut controller = PlaybackController::default();
    assert_eq!(controller.set_speed(50), Ok(()));
    assert_eq!(controller.set_speed(2000), Ok(()));
    assert_eq!(
        controller.set_speed(10),
        Err(PlaybackError::SpeedOutOfRange {
            speed: 10,
            min: 50,
            max: 2000,
        })
    );
    assert_eq!(controller.speed(), Duration::from_millis(2000));
}

#[test]
fn test_seek_clamps() {
    let mut controller = loaded("bubble", &[3, 2, 1]);
    assert_eq!(controller.seek(1_000), Ok(true));
    assert_eq!(controller.current_index(), controller.trace().last_index());
    assert_eq!(controller.seek(1), Ok(true));
    assert_eq!(controller.current_index(), 1);
}

#[test]
fn test_reset_and_invalidate_discard_trace() {
    let mut controller = loaded("bubble", &[3, 2, 1]);
    controller.play();
    controller.tick();

    controller.invalidate();
    assert_eq!(controller.phase(), Phase::Idle);
    assert!(controller.trace().is_empty());
    assert!(controller.active_timer().is_none());
    assert_eq!(controller.current_index(), 0);

    let mut controller = loaded("bubble", &[3, 2, 1]);
    controller.step_forward().expect("step failed");
    controller.reset();
    assert_eq!(controller.state().total_steps, 0);
    assert_eq!(controller.phase(), Phase::Idle);
}

#[test]
fn test_unknown_algorithm_loads_empty_trace() {
    let mut controller = loaded("bogo", &[3, 2, 1]);
    assert!(controller.trace().is_empty());
    assert_eq!(controller.phase(), Phase::Ready);
    assert!(!controller.play());
    assert_eq!(controller.step_forward(), Ok(false));
    assert_eq!(controller.counters(), Default::default());
}

#[test]
fn test_failed_load_leaves_state_untouched() {
    let mut controller = loaded("bubble", &[3, 2, 1]);
    controller.step_forward().expect("step failed");

    let config = Config {
        max_trace_input: 2,
        ..Config::default()
    };
    let materializer = Materializer::new(algostep::algorithms::Registry::builtin(), &config);
    let result = controller.load(&materializer, "bubble", &TraceInput::Array(vec![1, 2, 3]));

    assert!(matches!(result, Err(PlaybackError::Trace(_))));
    assert_eq!(controller.current_index(), 1);
    assert_eq!(controller.phase(), Phase::Paused);
    assert_eq!(controller.trace().algorithm(), Some("bubble"));
}

#[test]
fn test_counters_follow_current_step() {
    let mut controller = loaded("bubble", &[5, 3, 1, 4, 2]);
    controller.seek(usize::MAX).expect("seek failed");
    assert_eq!(controller.counters().comparisons, 10);
    controller.seek(0).expect("seek failed");
    assert_eq!(controller.counters().comparisons, 1);
}
