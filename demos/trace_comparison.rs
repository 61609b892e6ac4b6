//! Trace comparison demo
//!
//! Records a 500 Hz reference trace of the inverted pendulum with RK4, then
//! replays the same command series with each scheme and reports how far each
//! strays from the reference. Finishes with a 60 Hz render-rate run of the
//! hanging pendulum.
//!
//! Run with `RUST_LOG=debug cargo run --example trace_comparison` to see the
//! driver's log output.

use pendulum_sim::config::SimulationConfig;
use pendulum_sim::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("Pendulum trace comparison");
    println!("=========================\n");

    let base = SimulationConfig {
        params: PhysicsParameters {
            spring_constant: 12.0,
            ..PhysicsParameters::inverted_default()
        },
        ..SimulationConfig::trace_rate()
    };
    let duration = 4.0;
    let steps = (duration / base.dt).round() as usize;

    // A kick every half second, alternating direction
    let command = CommandSeries::new(
        TimeSeries::from_pairs((0..8).map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            (0.5 * i as f64, sign * 0.2)
        }))?,
        0.002,
    );

    let mut recorder = base.build_driver()?.with_command(command.clone());
    let mut rows = Vec::with_capacity(steps);
    for _ in 0..steps {
        let s = recorder.tick().state;
        rows.push(Sample::new(s.time, ReferencePoint::new(s.theta, s.theta_dot)));
    }
    let reference = TimeSeries::new(rows)?;

    println!(
        "Reference: {} rows at dt = {} s, polarity {:?}",
        reference.len(),
        base.dt,
        base.polarity
    );
    println!();
    println!("{:<8} {:>10} {:>14} {:>14}", "solver", "matched", "rms error", "max error");

    for solver in SolverType::ALL {
        let config = SimulationConfig {
            solver,
            ..base.clone()
        };
        let mut driver = config
            .build_driver()?
            .with_command(command.clone())
            .with_reference(reference.clone());
        let summary = driver.run(steps);
        println!(
            "{:<8} {:>10} {:>14.3e} {:>14.3e}",
            solver.as_str(),
            summary.matched,
            summary.rms_error,
            summary.max_error
        );
    }
    println!();

    let render = SimulationConfig {
        initial_angle: 0.3,
        ..SimulationConfig::render_rate()
    };
    let mut driver = render.build_driver()?;
    let period = driver.model().coefficients().small_angle_period();
    println!(
        "Render rate: dt = {:.4} s, small-angle period {:.3} s",
        render.dt, period
    );
    for second in 1..=3 {
        for _ in 0..60 {
            driver.tick();
        }
        let s = driver.state();
        println!(
            "  t = {}s  theta = {:+.4}  theta_dot = {:+.4}  energy = {:.4}",
            second,
            s.theta,
            s.theta_dot,
            driver.model().total_energy()
        );
    }

    Ok(())
}
