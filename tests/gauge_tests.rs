use rand::rngs::StdRng;
use rand::SeedableRng;
use sensor_gauges::{
    major_ticks, minor_ticks, needle_angle, render_gauge, update_gauges, AnimationController,
    Board, DrawCommand, GaugeConfig, GaugeId, ManualClock, RandomSensorFeed, Scene, SensorFeed,
    DEFAULT_DURATION,
};
use std::time::Duration;

fn needle_tip(scene: &Scene) -> (f64, f64) {
    let config = GaugeConfig::temperature();
    scene
        .commands()
        .iter()
        .find_map(|command| match command {
            DrawCommand::Line { to, stroke, .. } if stroke.color == config.style.needle_color => {
                Some((to.x, to.y))
            }
            _ => None,
        })
        .expect("needle drawn")
}

/// Temperature gauge animated from 0 to 100 ends pointing at 0°
#[test]
fn temperature_sweep_to_full_scale() {
    let clock = ManualClock::new();
    let gauges = GaugeConfig::defaults();
    let mut board: Board<Scene> = Board::for_gauges(&gauges, |_| Scene::new(250, 250));
    let mut controller = AnimationController::with_gauges(clock.clone(), gauges).unwrap();
    let temp = GaugeId::from("temp");

    controller.animate(&temp, 100.0, DEFAULT_DURATION).unwrap();
    let mut frames = 0;
    loop {
        frames += 1;
        if controller.tick(&mut board) == 0 {
            break;
        }
        clock.advance(Duration::from_millis(16));
    }

    assert!(frames > 30);
    assert_eq!(controller.value(&temp), Some(100.0));
    assert_eq!(board.label("label-temp").unwrap(), "100 °C");

    let (x, y) = needle_tip(board.surface("gauge-temp").unwrap());
    assert!((x - 185.0).abs() < 1e-6);
    assert!((y - 125.0).abs() < 1e-6);
}

#[test]
fn co_gauge_has_nine_labelled_ticks() {
    let config = GaugeConfig::co();
    assert_eq!(major_ticks(&config).len(), 9);
    assert_eq!(minor_ticks(&config).len(), 32);

    let mut scene = Scene::new(250, 250);
    let mut label = String::new();
    render_gauge(&mut scene, &mut label, &config, 0.0);
    let labels: Vec<&str> = scene
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        labels,
        ["0", "200", "400", "600", "800", "1000", "1200", "1400", "1600"]
    );
}

#[test]
fn readout_shows_raw_value_while_needle_clamps() {
    let config = GaugeConfig::humidity();
    let mut scene = Scene::new(250, 250);
    let mut label = String::new();
    render_gauge(&mut scene, &mut label, &config, 130.4);
    assert_eq!(label, "130 %");
    assert_eq!(needle_angle(&config, 130.4), needle_angle(&config, 100.0));
}

#[test]
fn periodic_updates_settle_on_latest_readings() {
    let clock = ManualClock::new();
    let gauges = GaugeConfig::defaults();
    let mut board: Board<Scene> = Board::for_gauges(&gauges, |_| Scene::new(250, 250));
    let mut controller = AnimationController::with_gauges(clock.clone(), gauges).unwrap();
    let mut feed = RandomSensorFeed::from_rng(StdRng::seed_from_u64(2024));

    let mut last = None;
    for _ in 0..4 {
        let readings = feed.read();
        update_gauges(&mut controller, &readings, DEFAULT_DURATION).unwrap();
        for _ in 0..40 {
            controller.tick(&mut board);
            clock.advance(Duration::from_millis(20));
        }
        last = Some(readings);
    }

    let readings = last.unwrap();
    for (id, value) in readings.targets() {
        assert_eq!(controller.value(&id), Some(value));
        assert!(!controller.is_animating(&id));
    }
    assert_eq!(
        board.label("label-co").unwrap(),
        &format!("{} ppm", readings.co)
    );
}

#[test]
fn update_mid_transition_keeps_needle_continuous() {
    let clock = ManualClock::new();
    let gauges = vec![GaugeConfig::humidity()];
    let mut board: Board<Scene> = Board::for_gauges(&gauges, |_| Scene::new(250, 250));
    let mut controller = AnimationController::with_gauges(clock.clone(), gauges).unwrap();
    let humi = GaugeId::from("humi");

    controller.animate(&humi, 100.0, Duration::from_millis(400)).unwrap();
    clock.advance(Duration::from_millis(100));
    controller.tick(&mut board);
    assert_eq!(board.label("label-humi").unwrap(), "25 %");

    controller.animate(&humi, 25.0, Duration::from_millis(400)).unwrap();
    clock.advance(Duration::from_millis(200));
    controller.tick(&mut board);
    assert_eq!(board.label("label-humi").unwrap(), "25 %");
    assert_eq!(controller.value(&humi), Some(0.0));

    clock.advance(Duration::from_millis(200));
    controller.tick(&mut board);
    assert_eq!(controller.value(&humi), Some(25.0));
}
