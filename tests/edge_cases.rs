//! Boundary and failure-path tests

use rs_glowband::hal::{MockBattery, MockTouchSensor};
use rs_glowband::touch::trip_point;
use rs_glowband::traits::BatteryMonitor;
use rs_glowband::{TouchConfig, TouchMonitor, TouchPoll};

// ============================================================================
// Baseline Extremes
// ============================================================================

#[test]
fn zero_baseline_never_activates() {
    let mut sensor = MockTouchSensor::new();
    sensor.queue_sample(0);
    let mut monitor = TouchMonitor::new(sensor, TouchConfig::default());
    monitor.calibrate().unwrap();

    assert_eq!(monitor.sensor().threshold_for(monitor.pad()), Some(0));

    // Trip point is 0 and the comparison is strict, so nothing trips
    let mut now = 0;
    for sample in [0u16, 0, 1, 100] {
        monitor.sensor_mut().queue_sample(sample);
        assert_eq!(monitor.poll(now).unwrap(), TouchPoll::Idle);
        now += 250;
    }
    assert_eq!(monitor.activation_count(), 0);
}

#[test]
fn max_baseline_does_not_overflow() {
    let mut sensor = MockTouchSensor::new();
    sensor.queue_sample(u16::MAX);
    let mut monitor = TouchMonitor::new(sensor, TouchConfig::default());
    monitor.calibrate().unwrap();

    assert_eq!(monitor.sensor().threshold_for(monitor.pad()), Some(43690));
    assert_eq!(trip_point(u16::MAX, 80), 52428);

    monitor.sensor_mut().queue_sample(52427);
    assert_eq!(monitor.poll(0).unwrap(), TouchPoll::Activated);
}

// ============================================================================
// Trip Point Boundary
// ============================================================================

#[test]
fn sample_at_trip_point_is_not_a_touch() {
    let mut sensor = MockTouchSensor::new();
    sensor.queue_sample(300);
    let mut monitor = TouchMonitor::new(sensor, TouchConfig::default());
    monitor.calibrate().unwrap();

    monitor.sensor_mut().queue_sample(240);
    assert_eq!(monitor.poll(0).unwrap(), TouchPoll::Idle);

    monitor.sensor_mut().queue_sample(239);
    assert_eq!(monitor.poll(10).unwrap(), TouchPoll::Activated);
}

#[test]
fn trip_percent_zero_disables_detection() {
    let config = TouchConfig::default().with_trip_percent(0);
    let mut sensor = MockTouchSensor::new();
    sensor.queue_sample(300);
    let mut monitor = TouchMonitor::new(sensor, config);
    monitor.calibrate().unwrap();

    monitor.sensor_mut().queue_sample(0);
    assert_eq!(monitor.poll(0).unwrap(), TouchPoll::Idle);
}

// ============================================================================
// Hold Expiry Boundary
// ============================================================================

#[test]
fn hold_releases_exactly_at_debounce_deadline() {
    let mut sensor = MockTouchSensor::new();
    sensor.queue_sample(300);
    let mut monitor = TouchMonitor::new(sensor, TouchConfig::default());
    monitor.calibrate().unwrap();

    monitor.sensor_mut().queue_sample(100);
    assert_eq!(monitor.poll(1000).unwrap(), TouchPoll::Activated);

    monitor.sensor_mut().queue_sample(300);
    assert_eq!(monitor.poll(1199).unwrap(), TouchPoll::Holding);

    monitor.sensor_mut().queue_sample(300);
    assert_eq!(monitor.poll(1200).unwrap(), TouchPoll::Idle);
}

#[test]
fn zero_debounce_counts_back_to_back_touches() {
    let config = TouchConfig::default().with_debounce_ms(0);
    let mut sensor = MockTouchSensor::new();
    sensor.queue_sample(300);
    let mut monitor = TouchMonitor::new(sensor, config);
    monitor.calibrate().unwrap();

    for now in [0u64, 10, 20] {
        monitor.sensor_mut().queue_sample(100);
        assert_eq!(monitor.poll(now).unwrap(), TouchPoll::Activated);
    }
    assert_eq!(monitor.activation_count(), 3);
}

// ============================================================================
// Calibration and Error Paths
// ============================================================================

#[test]
fn uncalibrated_monitor_is_inert() {
    let mut sensor = MockTouchSensor::new();
    sensor.queue_sample(100);
    let mut monitor = TouchMonitor::new(sensor, TouchConfig::default());

    assert_eq!(monitor.poll(0).unwrap(), TouchPoll::Idle);
    assert_eq!(monitor.activation_count(), 0);
    assert!(monitor.baseline().is_none());
}

#[test]
fn calibrate_failure_leaves_no_baseline() {
    let mut sensor = MockTouchSensor::new();
    sensor.fail = true;
    let mut monitor = TouchMonitor::new(sensor, TouchConfig::default());

    assert!(monitor.calibrate().is_err());
    assert!(monitor.baseline().is_none());
}

#[test]
fn poll_propagates_sensor_errors_without_counting() {
    let mut sensor = MockTouchSensor::new();
    sensor.queue_sample(300);
    let mut monitor = TouchMonitor::new(sensor, TouchConfig::default());
    monitor.calibrate().unwrap();

    monitor.sensor_mut().fail = true;
    assert!(monitor.poll(0).is_err());
    assert_eq!(monitor.activation_count(), 0);

    // Recovery: a later good sample still works
    monitor.sensor_mut().fail = false;
    monitor.sensor_mut().queue_sample(100);
    assert_eq!(monitor.poll(250).unwrap(), TouchPoll::Activated);
}

// ============================================================================
// Battery Boundaries
// ============================================================================

#[test]
fn battery_percent_clamps_outside_curve() {
    let mut battery = MockBattery::at_millivolts(5000);
    assert_eq!(battery.level_percent().unwrap(), 100);

    let mut battery = MockBattery::at_millivolts(0);
    assert_eq!(battery.level_percent().unwrap(), 0);
}

#[test]
fn battery_read_failure_propagates() {
    let mut battery = MockBattery::at_millivolts(3700);
    battery.fail = true;
    assert!(battery.read_millivolts().is_err());
    assert!(battery.level_percent().is_err());
}
