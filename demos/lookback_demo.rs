// demos/lookback_demo.rs
use lookback_mc::analytics::lookback_analytic::MarketParameters;
use lookback_mc::math_utils::Timer;
use lookback_mc::mc::lookback::LookbackOption;
use lookback_mc::mc::mc_engine::{fixing_convergence, mc_price_lookback, mc_price_lookback_with_control_variate};
use lookback_mc::mc::payoffs::LookbackPayoff;
use lookback_mc::mc::simulation::{MonteCarloAssetSimulation, SimulationConfig};
use lookback_mc::models::bachelier::Bachelier;
use lookback_mc::models::gbm::Gbm;
use lookback_mc::output;
use lookback_mc::PricingResult;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run_demo_mode() {
        eprintln!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run_demo_mode() -> PricingResult<()> {
    println!("Running lookback-mc Demo\n");

    let s0 = 100.0;
    let k = 100.0;
    let r = 0.1;
    let sigma = 0.3;
    let t = 0.5;
    let market = MarketParameters::new(s0, r, sigma)?;

    let config = SimulationConfig {
        paths: 10_000,
        steps: 1_000,
        horizon: t,
        seed: 12345,
        ..Default::default()
    };

    let mut timer = Timer::new();
    timer.start();
    let simulation = MonteCarloAssetSimulation::new(Gbm::from_market(&market), config)?;
    let simulation_time = timer.elapsed_ms();
    println!(
        "Simulated {} paths x {} steps ({:.1} ms)\n",
        config.paths, config.steps, simulation_time
    );

    // --- Analytic prices ---
    println!("--- Continuously Monitored (Analytic) ---");
    let payoffs = [
        LookbackPayoff::FixedStrikeCall { strike: k },
        LookbackPayoff::FixedStrikePut { strike: k },
        LookbackPayoff::FloatingStrikeCall,
        LookbackPayoff::FloatingStrikePut,
    ];
    for payoff in payoffs {
        let option = LookbackOption::new(t, payoff);
        println!(
            "{:<22} continuous {:>9.4}   50 fixings (corrected) {:>9.4}",
            payoff.name(),
            option.analytic_price(&market),
            option.with_monitoring(50).analytic_price(&market)
        );
    }
    println!();

    // --- Monte Carlo ---
    println!("--- Monte Carlo, 50 fixings ---");
    for payoff in payoffs {
        let option = LookbackOption::new(t, payoff).with_monitoring(50);

        timer.start();
        let plain = mc_price_lookback(&option, &simulation)?;
        let plain_time = timer.elapsed_ms();

        timer.start();
        let controlled = mc_price_lookback_with_control_variate(&option, &simulation)?;
        let controlled_time = timer.elapsed_ms();

        println!("{}", payoff.name());
        println!(
            "  plain            {:.4} ± {:.4} ({:.1} ms)",
            plain.price, plain.standard_error, plain_time
        );
        println!(
            "  control variate  {:.4} ± {:.4} ({:.1} ms), sd ratio {:.2}",
            controlled.estimate.price,
            controlled.estimate.standard_error,
            controlled_time,
            controlled.variance_reduction_ratio()
        );
    }
    println!();

    // --- Fixing convergence ---
    println!("--- Fixed-Strike Call: Convergence in the Number of Fixings ---");
    let fixed_call = LookbackOption::new(t, LookbackPayoff::FixedStrikeCall { strike: k });
    let points = fixing_convergence(&fixed_call, &[1, 5, 12, 50, 250, 1_000, 0], &simulation, &market)?;
    println!("{:>8} {:>12} {:>10} {:>12}", "fixings", "MC", "stderr", "analytic");
    for point in &points {
        println!(
            "{:>8} {:>12.4} {:>10.4} {:>12.4}",
            point.fixings, point.monte_carlo.price, point.monte_carlo.standard_error, point.corrected_analytic
        );
    }
    println!("(0 fixings = every simulation time, compared with the continuous formula)\n");

    // --- Normal dynamics ---
    println!("--- Bachelier Dynamics (no Black-Scholes control) ---");
    let bachelier_config = SimulationConfig {
        paths: 10_000,
        steps: 250,
        horizon: t,
        seed: 12345,
        ..Default::default()
    };
    let bachelier = MonteCarloAssetSimulation::new(Bachelier::new(s0, r, sigma * s0)?, bachelier_config)?;
    let floating_put = LookbackOption::new(t, LookbackPayoff::FloatingStrikePut).with_monitoring(50);
    let fallback = mc_price_lookback_with_control_variate(&floating_put, &bachelier)?;
    println!(
        "Floating-strike put: {:.4} ± {:.4} (control applied: {})\n",
        fallback.estimate.price,
        fallback.estimate.standard_error,
        fallback.status.is_applied()
    );

    // --- CSV Output ---
    if let Err(e) = std::fs::create_dir_all("results") {
        eprintln!("Could not create results directory: {}", e);
        return Ok(());
    }

    let convergence_csv_filename = "results/fixing_convergence.csv";
    match output::write_convergence_to_csv(convergence_csv_filename, &points) {
        Ok(_) => println!("Convergence data written to {}", convergence_csv_filename),
        Err(e) => eprintln!("Error writing convergence data: {}", e),
    }

    let continuous_str = fixed_call.analytic_price(&market).to_string();
    let simulation_time_str = simulation_time.to_string();
    let bachelier_put_str = fallback.estimate.price.to_string();
    let summary_data = vec![
        ("metric", "value"),
        ("analytic_fixed_call_continuous", continuous_str.as_str()),
        ("simulation_time_ms", simulation_time_str.as_str()),
        ("mc_floating_put_bachelier", bachelier_put_str.as_str()),
    ];

    let summary_csv_filename = "results/summary.csv";
    match output::write_summary_to_csv(summary_csv_filename, &summary_data) {
        Ok(_) => println!("Summary data written to {}", summary_csv_filename),
        Err(e) => eprintln!("Error writing summary data: {}", e),
    }

    Ok(())
}
