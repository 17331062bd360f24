//! Ant colony configuration.

/// Configuration parameters for an ant colony run.
///
/// # Examples
///
/// ```
/// use aco_tsp::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ants(32)
///     .with_iterations(200)
///     .with_seed(7);
/// assert_eq!(config.ants, 32);
/// assert_eq!(config.iterations, 200);
/// ```
#[derive(Debug, Clone)]
pub struct AcoConfig {
    /// Number of ants per iteration.
    pub ants: usize,
    /// Number of iterations.
    pub iterations: usize,
    /// Influence of pheromone on edge selection.
    pub alpha: f64,
    /// Influence of the inverse-distance heuristic on edge selection.
    pub beta: f64,
    /// Pheromone evaporation rate per iteration, in [0, 1].
    pub evaporation: f64,
    /// Pheromone deposit factor (deposit per edge = q / tour length).
    pub q: f64,
    /// Random seed.
    pub seed: u64,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ants: 64,
            iterations: 100,
            alpha: 1.0,
            beta: 3.0,
            evaporation: 0.5,
            q: 100.0,
            seed: 42,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per iteration.
    pub fn with_ants(mut self, ants: usize) -> Self {
        self.ants = ants;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_evaporation(mut self, evaporation: f64) -> Self {
        self.evaporation = evaporation;
        self
    }

    /// Sets the deposit factor.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// The runners trust their inputs and do not call this themselves;
    /// callers that accept untrusted parameters (CLI tools, services)
    /// should validate before running.
    pub fn validate(&self) -> Result<(), String> {
        if self.ants == 0 {
            return Err("ants must be at least 1".into());
        }
        if self.iterations == 0 {
            return Err("iterations must be at least 1".into());
        }
        if !self.alpha.is_finite() {
            return Err(format!("alpha must be finite, got {}", self.alpha));
        }
        if !self.beta.is_finite() {
            return Err(format!("beta must be finite, got {}", self.beta));
        }
        if !(0.0..=1.0).contains(&self.evaporation) {
            return Err(format!(
                "evaporation must be in [0, 1], got {}",
                self.evaporation
            ));
        }
        if !(self.q > 0.0 && self.q.is_finite()) {
            return Err(format!("q must be positive and finite, got {}", self.q));
        }
        Ok(())
    }
}
