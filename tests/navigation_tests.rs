//! Convergence behaviour of the gesture controller against a simulated viewport

use mapglide::input::PointerEvent;
use mapglide::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

fn controller(
    viewport: &SimulatedViewport,
    options: NavigatorOptions,
) -> GestureController<SimulatedViewport, SimulatedViewport> {
    GestureController::new(viewport.clone(), viewport.clone(), options)
        .unwrap()
        .with_seed(7)
}

fn pixel_distance(a: &GeoPoint, b: &GeoPoint, zoom: f64) -> f64 {
    CoordinateProjector::to_pixel(a, zoom).distance_to(&CoordinateProjector::to_pixel(b, zoom))
}

fn drag_lengths(viewport: &SimulatedViewport, anchor: PixelPoint) -> Vec<f64> {
    viewport
        .events()
        .iter()
        .filter_map(|event| match event {
            PointerEvent::Release { position } => Some(position.distance_to(&anchor)),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn pan_converges_on_short_hop() {
    let viewport = SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 15.0);
    let mut controller = controller(&viewport, NavigatorOptions::default());
    let target = GeoPoint::new(0.0, 0.01);

    let outcome = controller.pan_to(target).await;

    assert!(outcome.is_converged(), "{outcome}");
    assert!(outcome.gestures() <= 18);
    assert!(outcome.residual().unwrap() <= 3.5);
    assert!(pixel_distance(&viewport.center(), &target, 15.0) <= 3.5);
}

#[tokio::test(start_paused = true)]
async fn pan_clamps_each_drag() {
    let viewport = SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 12.0);
    let options = NavigatorOptions::default();
    let anchor = options.anchor.anchor;
    let mut controller = controller(&viewport, options);

    // about 2913px east at z12
    let outcome = controller.pan_to(GeoPoint::new(0.0, 1.0)).await;

    assert_eq!(
        outcome,
        ConvergenceOutcome::Converged {
            gestures: 4,
            residual: outcome.residual().unwrap()
        }
    );
    let lengths = drag_lengths(&viewport, anchor);
    assert_eq!(lengths.len(), 4);
    for length in &lengths[..3] {
        assert!((length - 800.0).abs() < 1e-6, "{lengths:?}");
    }
    assert!(lengths[3] < 800.0);
}

#[tokio::test(start_paused = true)]
async fn pan_drags_are_interpolated_from_the_anchor() {
    let viewport = SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 15.0);
    let mut options = NavigatorOptions::default();
    options.gesture.interpolation_steps = 12;
    options.anchor.anchor = PixelPoint::new(400.0, 300.0);
    let mut controller = controller(&viewport, options);

    controller.pan_to(GeoPoint::new(0.0, 0.01)).await;

    let events = viewport.events();
    assert_eq!(
        events[0],
        PointerEvent::Move {
            position: PixelPoint::new(400.0, 300.0)
        }
    );
    assert_eq!(
        events[1],
        PointerEvent::Press {
            position: PixelPoint::new(400.0, 300.0)
        }
    );
    match &events[2] {
        PointerEvent::Drag { to, steps } => {
            assert_eq!(*steps, 12);
            // content moves east, so the pointer travels west
            assert!(to.x < 400.0);
        }
        other => panic!("expected drag, got {other:?}"),
    }
    assert!(events[3].is_release());
}

#[tokio::test(start_paused = true)]
async fn pan_converges_with_lagging_viewport() {
    let viewport =
        SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 15.0).with_drag_efficiency(0.5);
    let mut controller = controller(&viewport, NavigatorOptions::default());

    let outcome = controller.pan_to(GeoPoint::new(0.0, 0.01)).await;

    assert!(outcome.is_converged(), "{outcome}");
    assert!(outcome.gestures() > 1);
}

#[tokio::test(start_paused = true)]
async fn pan_reports_exhaustion_with_residual() {
    let viewport =
        SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 12.0).with_drag_efficiency(0.1);
    let mut options = NavigatorOptions::default();
    options.gesture.max_iterations = 2;
    let mut controller = controller(&viewport, options);

    let outcome = controller.pan_to(GeoPoint::new(0.0, 1.0)).await;

    match outcome {
        ConvergenceOutcome::Exhausted { gestures, residual } => {
            assert_eq!(gestures, 2);
            let residual = residual.unwrap();
            assert!(residual > 2700.0 && residual < 2800.0, "{residual}");
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn unavailable_reads_use_up_iterations() {
    let viewport =
        SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 15.0).with_unavailable_reads(3);
    let mut options = NavigatorOptions::default();
    options.gesture.max_iterations = 3;
    let mut controller = controller(&viewport, options);

    let outcome = controller.pan_to(GeoPoint::new(0.0, 0.01)).await;

    assert!(matches!(
        outcome,
        ConvergenceOutcome::Exhausted {
            gestures: 0,
            residual: Some(_)
        }
    ));
    assert_eq!(viewport.drag_count(), 0);
    assert_eq!(viewport.reads(), 4);
}

#[tokio::test(start_paused = true)]
async fn unavailable_reads_back_off_and_recover() {
    let viewport =
        SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 15.0).with_unavailable_reads(2);
    let mut controller = controller(&viewport, NavigatorOptions::default());
    let start = tokio::time::Instant::now();

    let outcome = controller.pan_to(GeoPoint::new(0.0, 0.01)).await;

    assert!(outcome.is_converged());
    assert_eq!(outcome.gestures(), 1);
    // two backoffs and one settle
    assert!(start.elapsed() >= Duration::from_millis(2 * 300 + 350));
}

#[tokio::test(start_paused = true)]
async fn zoom_steps_one_level_per_scroll() {
    let viewport = SimulatedViewport::new(GeoPoint::new(37.5, 127.0), 10.0);
    let mut controller = controller(&viewport, NavigatorOptions::default());

    let outcome = controller.zoom_to(15).await;

    assert_eq!(
        outcome,
        ConvergenceOutcome::Converged {
            gestures: 5,
            residual: 0.0
        }
    );
    assert_eq!(viewport.scroll_count(), 5);
    assert_eq!(viewport.zoom(), 15.0);
    for event in viewport.events() {
        if let PointerEvent::Scroll { delta_x, delta_y } = event {
            assert_eq!(delta_x, 0.0);
            assert_eq!(delta_y, -300.0);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn zoom_with_exact_attempt_budget_converges() {
    let viewport = SimulatedViewport::new(GeoPoint::new(37.5, 127.0), 10.0);
    let mut options = NavigatorOptions::default();
    options.zoom.max_attempts = 5;
    let mut controller = controller(&viewport, options);

    let outcome = controller.zoom_to(15).await;

    assert!(outcome.is_converged(), "{outcome}");
    assert_eq!(viewport.scroll_count(), 5);
}

#[tokio::test(start_paused = true)]
async fn zoom_out_scrolls_positive() {
    let viewport = SimulatedViewport::new(GeoPoint::new(37.5, 127.0), 15.0);
    let mut controller = controller(&viewport, NavigatorOptions::default());

    let outcome = controller.zoom_to(12).await;

    assert!(outcome.is_converged());
    assert_eq!(outcome.gestures(), 3);
    assert!(viewport.events().iter().all(|event| match event {
        PointerEvent::Scroll { delta_y, .. } => *delta_y > 0.0,
        _ => true,
    }));
}

#[tokio::test(start_paused = true)]
async fn zoom_rounds_fractional_levels() {
    let viewport = SimulatedViewport::new(GeoPoint::new(37.5, 127.0), 14.6);
    let mut controller = controller(&viewport, NavigatorOptions::default());

    let outcome = controller.zoom_to(15).await;

    assert_eq!(outcome.gestures(), 0);
    assert!(outcome.is_converged());
}

#[tokio::test(start_paused = true)]
async fn zoom_exhaustion_reports_levels_left() {
    let viewport = SimulatedViewport::new(GeoPoint::new(37.5, 127.0), 10.0);
    let mut options = NavigatorOptions::default();
    options.zoom.max_attempts = 3;
    let mut controller = controller(&viewport, options);

    let outcome = controller.zoom_to(15).await;

    assert_eq!(
        outcome,
        ConvergenceOutcome::Exhausted {
            gestures: 3,
            residual: Some(2.0)
        }
    );
}

#[tokio::test(start_paused = true)]
async fn zoom_stops_at_viewport_limit() {
    let viewport =
        SimulatedViewport::new(GeoPoint::new(37.5, 127.0), 17.0).with_zoom_limits(0.0, 18.0);
    let mut options = NavigatorOptions::default();
    options.zoom.max_attempts = 4;
    let mut controller = controller(&viewport, options);

    let outcome = controller.zoom_to(20).await;

    assert!(matches!(outcome, ConvergenceOutcome::Exhausted { gestures: 4, .. }));
    assert_eq!(viewport.zoom(), 18.0);
}

#[tokio::test(start_paused = true)]
async fn recenter_runs_four_phases() {
    let viewport = SimulatedViewport::new(GeoPoint::new(37.55, 126.95), 15.0);
    let mut options = NavigatorOptions::default();
    options.recenter.coarse = CoarseZoom::fixed();
    let mut controller = controller(&viewport, options);
    let target = GeoPoint::new(37.5665, 126.978);

    let report = controller.recenter(target, 15).await;

    assert_eq!(report.coarse_zoom, 12);
    assert!(report.is_converged(), "{report:?}");
    assert_eq!(report.coarse_zoom_phase.gestures(), 3);
    assert_eq!(report.fine_zoom_phase.gestures(), 3);
    assert!(report.coarse_pan_phase.is_converged());
    assert_eq!(viewport.zoom(), 15.0);
    assert!(pixel_distance(&viewport.center(), &target, 15.0) <= 3.5);
}

#[tokio::test(start_paused = true)]
async fn recenter_is_reproducible_with_seed() {
    let run = |seed| async move {
        let viewport = SimulatedViewport::new(GeoPoint::new(48.85, 2.33), 16.0);
        let mut options = NavigatorOptions::default();
        options.timing.jitter = 0.2;
        let mut controller = GestureController::new(viewport.clone(), viewport.clone(), options)
            .unwrap()
            .with_seed(seed);
        let report = controller.recenter(GeoPoint::new(48.8566, 2.3522), 16).await;
        (report, viewport.events())
    };

    let (first, first_events) = run(11).await;
    let (second, second_events) = run(11).await;

    assert!((9..=12).contains(&first.coarse_zoom));
    assert_eq!(first.coarse_zoom, second.coarse_zoom);
    assert_eq!(first_events, second_events);
    assert!(first.is_converged());
}

#[tokio::test(start_paused = true)]
async fn recenter_continues_after_failed_phase() {
    // the coarse pan cannot finish in two iterations, the later phases still run
    let viewport = SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 14.0);
    let mut options = NavigatorOptions::default();
    options.gesture.max_iterations = 2;
    options.recenter.coarse = CoarseZoom::FixedOffset { offset: 1, floor: 0 };
    let mut controller = controller(&viewport, options);

    let report = controller.recenter(GeoPoint::new(0.0, 0.3), 15).await;

    assert_eq!(report.coarse_zoom, 14);

    assert!(matches!(
        report.coarse_pan_phase,
        ConvergenceOutcome::Exhausted { .. }
    ));
    assert!(report.fine_zoom_phase.is_converged());
    assert_eq!(report.fine_pan_phase.gestures(), 2);
    assert!(!report.is_converged());
    assert_eq!(viewport.zoom(), 15.0);
}

#[tokio::test(start_paused = true)]
async fn cancelled_before_start() {
    let viewport = SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 15.0);
    let token = CancellationToken::new();
    token.cancel();
    let mut controller =
        controller(&viewport, NavigatorOptions::default()).with_cancellation(token);

    let outcome = controller.pan_to(GeoPoint::new(0.0, 0.01)).await;
    assert_eq!(
        outcome,
        ConvergenceOutcome::Cancelled {
            gestures: 0,
            residual: None
        }
    );

    let report = controller.recenter(GeoPoint::new(0.0, 0.01), 15).await;
    assert!(report.is_cancelled());
    assert_eq!(report.total_gestures(), 0);
    assert!(viewport.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancelled_between_gestures() {
    let viewport =
        SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 12.0).with_drag_efficiency(0.1);
    let token = CancellationToken::new();
    let mut controller =
        controller(&viewport, NavigatorOptions::default()).with_cancellation(token.clone());

    let task = tokio::spawn(async move { controller.pan_to(GeoPoint::new(0.0, 1.0)).await });
    tokio::time::sleep(Duration::from_millis(500)).await;
    token.cancel();
    let outcome = task.await.unwrap();

    assert!(outcome.is_cancelled(), "{outcome}");
    assert!(outcome.gestures() >= 1);
    // every press got its release
    let events = viewport.events();
    let presses = events
        .iter()
        .filter(|e| matches!(e, PointerEvent::Press { .. }))
        .count();
    assert_eq!(presses, viewport.drag_count());
}

#[tokio::test(start_paused = true)]
async fn driver_failure_ends_loop() {
    let viewport = SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 10.0);
    viewport.set_reject_gestures(true);
    let mut controller = controller(&viewport, NavigatorOptions::default());

    let outcome = controller.zoom_to(12).await;
    match outcome {
        ConvergenceOutcome::Failed { gestures, reason } => {
            assert_eq!(gestures, 0);
            assert!(reason.contains("rejected"));
        }
        other => panic!("expected failure, got {other:?}"),
    }

    let outcome = controller.pan_to(GeoPoint::new(0.0, 1.0)).await;
    assert!(matches!(outcome, ConvergenceOutcome::Failed { .. }));
}

#[test]
fn invalid_options_rejected() {
    let viewport = SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 10.0);
    let mut options = NavigatorOptions::default();
    options.gesture.max_drag_px = 0.0;
    let result = GestureController::new(viewport.clone(), viewport, options);
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[tokio::test(start_paused = true)]
async fn non_finite_state_counts_as_unavailable() {
    let viewport = SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 15.0);
    viewport.set_view(GeoPoint::new(f64::NAN, 0.0), 15.0);
    let mut options = NavigatorOptions::default();
    options.gesture.max_iterations = 3;
    options.zoom.max_attempts = 3;
    let mut controller = controller(&viewport, options);

    let outcome = controller.pan_to(GeoPoint::new(0.0, 0.01)).await;
    assert_eq!(
        outcome,
        ConvergenceOutcome::Exhausted {
            gestures: 0,
            residual: None
        }
    );
    assert_eq!(viewport.drag_count(), 0);

    viewport.set_view(GeoPoint::new(0.0, 0.0), f64::NAN);
    let outcome = controller.zoom_to(12).await;
    assert_eq!(
        outcome,
        ConvergenceOutcome::Exhausted {
            gestures: 0,
            residual: None
        }
    );
    assert_eq!(viewport.scroll_count(), 0);
    assert!(viewport.events().is_empty());
}

#[derive(Clone, Default)]
struct CountingProjector {
    projections: Arc<AtomicUsize>,
}

impl CoordinateTransform for CountingProjector {
    fn project(&self, point: &GeoPoint, zoom: f64) -> PixelPoint {
        self.projections.fetch_add(1, Ordering::SeqCst);
        CoordinateProjector::to_pixel(point, zoom)
    }

    fn unproject(&self, point: &PixelPoint, zoom: f64) -> GeoPoint {
        CoordinateProjector::to_geo(point, zoom)
    }

    fn scale(&self, zoom: f64) -> f64 {
        CoordinateProjector.scale(zoom)
    }
}

#[tokio::test(start_paused = true)]
async fn pan_measures_with_custom_projection() {
    let viewport = SimulatedViewport::new(GeoPoint::new(0.0, 0.0), 15.0);
    let projector = CountingProjector::default();
    let projections = Arc::clone(&projector.projections);
    let mut controller =
        controller(&viewport, NavigatorOptions::default()).with_projection(projector);

    let outcome = controller.pan_to(GeoPoint::new(0.0, 0.01)).await;
    assert!(outcome.is_converged(), "{outcome}");
    let gestures = outcome.gestures() as usize;
    assert_eq!(gestures, 1);
    // center and target are projected on every successful read
    assert_eq!(projections.load(Ordering::SeqCst), 2 * (gestures + 1));

    let (reader, driver) = controller.into_parts();
    assert_eq!(reader.reads(), gestures + 1);
    assert_eq!(driver.drag_count(), gestures);
}
