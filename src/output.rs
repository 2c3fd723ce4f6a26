// src/output.rs
use crate::mc::mc_engine::FixingConvergencePoint;
use std::fs::File;
use std::io::{self, Write};

pub fn write_convergence_to_csv(filename: &str, points: &[FixingConvergencePoint]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "fixings,mc_price,standard_error,corrected_analytic,difference")?;
    for point in points {
        writeln!(
            file,
            "{},{},{},{},{}",
            point.fixings,
            point.monte_carlo.price,
            point.monte_carlo.standard_error,
            point.corrected_analytic,
            point.monte_carlo.price - point.corrected_analytic
        )?;
    }
    Ok(())
}

pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, &str)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}
