use anyhow::Context;
use mapglide::{prelude::*, sweep::sweep_point_count};

/// Recenters a simulated viewport on a preset location and sweeps around it.
///
/// Usage: `mapglide-app [options.json] [preset]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mapglide::init_logging();

    let mut args = std::env::args().skip(1);
    let options = match args.next() {
        Some(path) if path.ends_with(".json") => NavigatorOptions::from_file(&path)
            .with_context(|| format!("loading navigator options from {path}"))?,
        _ => MotionProfile::Brisk.resolve(),
    };
    let preset = args.next().unwrap_or_else(|| "Seoul".to_string());

    let presets = [
        ("Seoul", GeoPoint::new(37.5665, 126.978), 15),
        ("San Francisco", GeoPoint::new(37.7749, -122.4194), 14),
        ("London", GeoPoint::new(51.5074, -0.1278), 14),
        ("Tokyo", GeoPoint::new(35.6762, 139.6503), 15),
    ];
    let (name, target, zoom) = presets
        .iter()
        .copied()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(&preset))
        .with_context(|| format!("unknown preset '{preset}'"))?;

    // start a little off target, zoomed in, the way a page usually opens
    let start = GeoPoint::new(target.lat - 0.02, target.lon + 0.03);
    let viewport = SimulatedViewport::new(start, f64::from(zoom) + 1.0);

    let token = CancellationToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });
    }

    let mut controller = GestureController::new(viewport.clone(), viewport.clone(), options)?
        .with_cancellation(token);

    let report = controller.recenter(target, zoom).await;
    println!(
        "{name}: recenter {} via z{} in {} gestures",
        if report.is_converged() { "converged" } else { "did not converge" },
        report.coarse_zoom,
        report.total_gestures()
    );

    match controller.think().await {
        Ok(waited) => println!("paused {waited:.2?} before sweeping"),
        Err(Error::Cancelled) => {}
        Err(e) => return Err(e.into()),
    }

    let sweep = SweepConfig::new(target, f64::from(zoom))
        .with_rings(2)
        .with_dwell_secs(0.1);
    let planner = AreaSweepPlanner::new(sweep)?;
    println!("sweeping {} points", sweep_point_count(planner.config().rings));

    let mut on_point = |point: GeoPoint, index: usize, total: usize| {
        println!("  [{index:>2}/{total}] {point}");
        Ok::<(), BoxError>(())
    };
    let summary = planner.run(&mut controller, &mut on_point).await?;

    println!(
        "{} of {} points converged{}",
        summary.converged_count(),
        summary.total,
        if summary.completed { "" } else { " (cancelled)" }
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
