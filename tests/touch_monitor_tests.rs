//! Behavior tests for the touch-activation monitor

use rs_glowband::hal::{MockClock, MockTouchSensor};
use rs_glowband::touch::{derive_threshold, trip_point};
use rs_glowband::traits::Clock;
use rs_glowband::{DetectionMode, RearmPolicy, TouchConfig, TouchMonitor, TouchPoll};

fn monitor_with_baseline(baseline: u16, config: TouchConfig) -> TouchMonitor<MockTouchSensor> {
    let mut sensor = MockTouchSensor::new();
    sensor.queue_sample(baseline);
    let mut monitor = TouchMonitor::new(sensor, config);
    monitor.calibrate().unwrap();
    monitor
}

// ============================================================================
// Threshold Derivation
// ============================================================================

#[test]
fn baseline_300_derives_threshold_200_and_trip_240() {
    let monitor = monitor_with_baseline(300, TouchConfig::default());

    // Hardware interrupt threshold register: floor(300 * 2/3)
    assert_eq!(monitor.sensor().threshold_for(monitor.pad()), Some(200));
    // Filtered comparator trip point: floor(300 * 80/100)
    assert_eq!(trip_point(300, 80), 240);
}

#[test]
fn threshold_derivation_floors_for_any_baseline() {
    for baseline in [0u16, 1, 2, 99, 100, 300, 1000, u16::MAX] {
        assert_eq!(
            derive_threshold(baseline),
            (baseline as u32 * 2 / 3) as u16
        );
        assert_eq!(
            trip_point(baseline, 80),
            (baseline as u32 * 80 / 100) as u16
        );
    }
}

#[test]
fn calibration_registers_isr_signal() {
    let monitor = monitor_with_baseline(300, TouchConfig::default());
    assert!(monitor.sensor().has_signal());
}

// ============================================================================
// Scenario: filtered sample sequence
// ============================================================================

#[test]
fn sample_sequence_counts_while_below_trip() {
    // Baseline 300, trip point 240; polls spaced past the debounce window
    let mut monitor = monitor_with_baseline(300, TouchConfig::default());

    let samples = [300u16, 300, 200, 200, 300];
    let expected_counts = [0u32, 0, 1, 2, 2];

    let mut now = 0;
    for (sample, expected) in samples.iter().zip(expected_counts) {
        monitor.sensor_mut().queue_sample(*sample);
        monitor.poll(now).unwrap();
        assert_eq!(monitor.activation_count(), expected);
        now += 250;
    }
}

#[test]
fn sample_sequence_with_on_release_counts_once_per_touch() {
    let config = TouchConfig::default().with_rearm(RearmPolicy::OnRelease);
    let mut monitor = monitor_with_baseline(300, config);

    let samples = [300u16, 300, 200, 200, 300, 200];
    let expected_counts = [0u32, 0, 1, 1, 1, 2];

    let mut now = 0;
    for (sample, expected) in samples.iter().zip(expected_counts) {
        monitor.sensor_mut().queue_sample(*sample);
        monitor.poll(now).unwrap();
        assert_eq!(monitor.activation_count(), expected);
        now += 250;
    }
}

#[test]
fn fast_polls_inside_hold_window_do_not_count() {
    // At the real 10ms cadence the 200ms hold absorbs a held touch
    let mut monitor = monitor_with_baseline(300, TouchConfig::default());

    let mut now = 0;
    for _ in 0..20 {
        monitor.sensor_mut().queue_sample(200);
        monitor.poll(now).unwrap();
        now += 10;
    }

    // 200ms elapsed: the first poll counted, the hold absorbed the rest
    assert_eq!(monitor.activation_count(), 1);

    monitor.sensor_mut().queue_sample(200);
    assert_eq!(monitor.poll(200).unwrap(), TouchPoll::Activated);
    assert_eq!(monitor.activation_count(), 2);
}

// ============================================================================
// Debounce Monotonicity
// ============================================================================

#[test]
fn no_side_effect_within_debounce_window() {
    let mut monitor = monitor_with_baseline(300, TouchConfig::default());

    monitor.sensor_mut().queue_sample(100);
    assert_eq!(monitor.poll(1000).unwrap(), TouchPoll::Activated);
    let count = monitor.activation_count();

    for now in (1001..1200).step_by(7) {
        monitor.sensor_mut().queue_sample(100);
        assert_eq!(monitor.poll(now).unwrap(), TouchPoll::Holding);
        assert_eq!(monitor.activation_count(), count);
    }
}

#[test]
fn debounce_tracks_clock_time() {
    let mut clock = MockClock::new();
    let mut monitor = monitor_with_baseline(300, TouchConfig::default());

    monitor.sensor_mut().queue_sample(100);
    monitor.poll(clock.now_ms()).unwrap();
    assert!(monitor.is_holding(clock.now_ms()));

    clock.advance(199);
    assert!(monitor.is_holding(clock.now_ms()));

    clock.advance(1);
    assert!(!monitor.is_holding(clock.now_ms()));
}

// ============================================================================
// Interrupt Coalescing
// ============================================================================

#[test]
fn two_edges_before_consumption_yield_one_activation() {
    let config = TouchConfig::default().with_mode(DetectionMode::Interrupt);
    let mut monitor = monitor_with_baseline(300, config);

    // First poll arms the interrupt
    assert_eq!(monitor.poll(0).unwrap(), TouchPoll::Idle);

    // Two edges 1ms apart before the poll loop runs again
    let pad = monitor.pad();
    monitor.sensor_mut().fire_interrupt(pad);
    monitor.sensor_mut().fire_interrupt(pad);

    // Exactly one debounce cycle observed
    assert_eq!(monitor.poll(10).unwrap(), TouchPoll::Activated);
    assert_eq!(monitor.poll(20).unwrap(), TouchPoll::Holding);
    assert_eq!(monitor.poll(100).unwrap(), TouchPoll::Holding);
    assert_eq!(monitor.poll(210).unwrap(), TouchPoll::Idle);
}

#[test]
fn interrupt_mode_rearms_every_poll() {
    let config = TouchConfig::default().with_mode(DetectionMode::Interrupt);
    let mut monitor = monitor_with_baseline(300, config);

    for now in [0, 10, 20, 30] {
        monitor.poll(now).unwrap();
    }
    assert_eq!(monitor.sensor().enable_calls, 4);
    assert!(monitor.sensor().interrupt_enabled);
}

#[test]
fn separate_touches_yield_separate_cycles() {
    let config = TouchConfig::default().with_mode(DetectionMode::Interrupt);
    let mut monitor = monitor_with_baseline(300, config);
    monitor.poll(0).unwrap();

    let pad = monitor.pad();
    monitor.sensor_mut().fire_interrupt(pad);
    assert_eq!(monitor.poll(10).unwrap(), TouchPoll::Activated);
    assert_eq!(monitor.poll(210).unwrap(), TouchPoll::Idle);

    monitor.sensor_mut().fire_interrupt(pad);
    assert_eq!(monitor.poll(220).unwrap(), TouchPoll::Activated);
}

// ============================================================================
// Counter Properties
// ============================================================================

#[test]
fn counter_starts_at_zero() {
    let monitor = monitor_with_baseline(300, TouchConfig::default());
    assert_eq!(monitor.activation_count(), 0);
}

#[test]
fn counter_never_decreases() {
    let mut monitor = monitor_with_baseline(300, TouchConfig::default());

    let samples = [300u16, 100, 250, 100, 239, 240, 241, 0, 300, 100];
    let mut now = 0;
    let mut previous = 0;

    for sample in samples {
        monitor.sensor_mut().queue_sample(sample);
        monitor.poll(now).unwrap();
        let count = monitor.activation_count();
        assert!(count >= previous);
        previous = count;
        now += 250;
    }
}

#[test]
fn filtered_mode_keeps_interrupt_disabled() {
    let mut monitor = monitor_with_baseline(300, TouchConfig::default());
    monitor.sensor_mut().queue_sample(300);
    monitor.poll(0).unwrap();
    monitor.sensor_mut().queue_sample(300);
    monitor.poll(10).unwrap();

    let sensor = monitor.sensor();
    assert!(!sensor.interrupt_enabled);
    assert_eq!(sensor.disable_calls, 2);
    assert_eq!(sensor.clear_status_calls, 2);
}
