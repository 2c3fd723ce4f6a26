// src/mc/simulation.rs
//! Path simulation
//!
//! Pricing code only reads from a [`PathSimulation`]: asset values, the
//! numeraire and the Monte Carlo weights at a requested time, one entry per
//! path. [`MonteCarloAssetSimulation`] is the in-crate implementation.
//!
//! # Generation
//!
//! All paths are generated eagerly at construction, in parallel across
//! paths. Each path draws from its own `StdRng` stream seeded by
//! `seed + asset·paths + path` (see [`PathRngFactory`]), so results do not
//! depend on thread scheduling. With antithetic sampling, path `2k + 1`
//! replays the draws of path `2k` negated.
//!
//! # Measure
//!
//! The numeraire is the bank account `N(t) = exp(r t)` and every path
//! carries weight `1/paths`.

use crate::analytics::lookback_analytic::MarketParameters;
use crate::error::{validation::*, PricingError, PricingResult};
use crate::mc::path_values::PathValues;
use crate::mc::time_grid::TimeDiscretization;
use crate::models::model::SDEModel;
use crate::rng::PathRngFactory;
use crate::solvers::Scheme;
use ndarray::{Array1, Array2, Zip};
use tracing::debug;

/// Read access to a simulated path ensemble
pub trait PathSimulation: Sync {
    fn time_discretization(&self) -> &TimeDiscretization;

    fn number_of_paths(&self) -> usize;

    fn number_of_assets(&self) -> usize;

    /// Value of underlying `underlying_index` at the grid time nearest at or
    /// below `time`
    fn asset_value(&self, time: f64, underlying_index: usize) -> PricingResult<PathValues>;

    fn numeraire(&self, time: f64) -> PricingResult<PathValues>;

    fn monte_carlo_weights(&self, time: f64) -> PricingResult<PathValues>;

    /// Broadcast of a scalar to every path
    fn constant(&self, value: f64) -> PathValues {
        PathValues::constant(value, self.number_of_paths())
    }

    /// Black-Scholes inputs of an underlying, `None` when its dynamics are
    /// not lognormal with constant coefficients
    fn black_scholes_parameters(&self, underlying_index: usize) -> Option<MarketParameters>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub paths: usize,
    pub steps: usize,
    pub horizon: f64,
    pub seed: u64,
    pub use_antithetic: bool,
    pub scheme: Scheme,
}

impl SimulationConfig {
    pub fn validate(&self) -> PricingResult<()> {
        validate_paths(self.paths)?;
        validate_steps(self.steps)?;
        validate_positive("horizon", self.horizon)?;
        validate_finite("horizon", self.horizon)?;
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            paths: 10_000,
            steps: 1_000,
            horizon: 1.0,
            seed: 1897,
            use_antithetic: false,
            scheme: Scheme::Exact,
        }
    }
}

/// Independent underlyings driven by one model type and a common rate
pub struct MonteCarloAssetSimulation<M: SDEModel> {
    models: Vec<M>,
    config: SimulationConfig,
    grid: TimeDiscretization,
    rate: f64,
    /// One `paths × times` array per underlying
    values: Vec<Array2<f64>>,
}

impl<M: SDEModel> MonteCarloAssetSimulation<M> {
    pub fn new(model: M, config: SimulationConfig) -> PricingResult<Self> {
        Self::with_models(vec![model], config)
    }

    pub fn with_models(models: Vec<M>, config: SimulationConfig) -> PricingResult<Self> {
        config.validate()?;

        let rate = match models.first() {
            Some(model) => model.riskfree_rate(),
            None => {
                return Err(PricingError::InvalidConfiguration {
                    field: "models".to_string(),
                    reason: "at least one underlying model is required".to_string(),
                })
            }
        };
        if models
            .iter()
            .any(|m| (m.riskfree_rate() - rate).abs() > 1e-12)
        {
            return Err(PricingError::InvalidConfiguration {
                field: "models".to_string(),
                reason: "all underlyings must share the same risk-free rate".to_string(),
            });
        }

        let grid = TimeDiscretization::uniform(config.steps, config.horizon)?;
        let rng_factory = PathRngFactory::new(config.seed, config.paths, config.use_antithetic);

        let values = models
            .iter()
            .enumerate()
            .map(|(asset, model)| {
                debug!(
                    model = model.name(),
                    asset,
                    paths = config.paths,
                    steps = config.steps,
                    scheme = config.scheme.name(),
                    antithetic = config.use_antithetic,
                    "simulating paths"
                );
                simulate_asset(model, asset, &grid, config.scheme, &rng_factory, config.paths)
            })
            .collect::<Vec<_>>();

        for (asset, asset_values) in values.iter().enumerate() {
            if asset_values.iter().any(|x| !x.is_finite()) {
                return Err(PricingError::NumericalInstability {
                    method: format!("{} path simulation", models[asset].name()),
                    reason: format!("non-finite value generated for underlying {}", asset),
                });
            }
        }

        Ok(MonteCarloAssetSimulation {
            models,
            config,
            grid,
            rate,
            values,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn models(&self) -> &[M] {
        &self.models
    }

    fn time_index(&self, time: f64) -> PricingResult<usize> {
        self.grid
            .time_index_at_or_below(time)
            .ok_or(PricingError::TimeOutOfRange {
                time,
                horizon: self.grid.horizon(),
            })
    }
}

/// Fill a `paths × times` array, one rayon task per path row
fn simulate_asset<M: SDEModel>(
    model: &M,
    asset: usize,
    grid: &TimeDiscretization,
    scheme: Scheme,
    rng_factory: &PathRngFactory,
    paths: usize,
) -> Array2<f64> {
    let times = grid.times();
    let mut values = Array2::<f64>::zeros((paths, times.len()));

    Zip::indexed(values.rows_mut()).par_for_each(|path, mut row| {
        let draws = rng_factory.normal_draws(asset, path, times.len() - 1);

        let mut s = model.initial_value();
        row[0] = s;
        for (step, z) in draws.into_iter().enumerate() {
            let t = times[step];
            let dt = times[step + 1] - t;
            s = scheme.advance(model, s, t, dt, z);
            row[step + 1] = s;
        }
    });

    values
}

impl<M: SDEModel> PathSimulation for MonteCarloAssetSimulation<M> {
    fn time_discretization(&self) -> &TimeDiscretization {
        &self.grid
    }

    fn number_of_paths(&self) -> usize {
        self.config.paths
    }

    fn number_of_assets(&self) -> usize {
        self.models.len()
    }

    fn asset_value(&self, time: f64, underlying_index: usize) -> PricingResult<PathValues> {
        let asset_values = self
            .values
            .get(underlying_index)
            .ok_or(PricingError::UnderlyingOutOfRange {
                index: underlying_index,
                count: self.models.len(),
            })?;
        let index = self.time_index(time)?;
        Ok(PathValues::new(asset_values.column(index).to_owned()))
    }

    fn numeraire(&self, time: f64) -> PricingResult<PathValues> {
        self.time_index(time)?;
        Ok(self.constant((self.rate * time).exp()))
    }

    fn monte_carlo_weights(&self, time: f64) -> PricingResult<PathValues> {
        self.time_index(time)?;
        let paths = self.config.paths;
        Ok(PathValues::new(Array1::from_elem(paths, 1.0 / paths as f64)))
    }

    fn black_scholes_parameters(&self, underlying_index: usize) -> Option<MarketParameters> {
        self.models
            .get(underlying_index)
            .and_then(|model| model.black_scholes_parameters())
    }
}
