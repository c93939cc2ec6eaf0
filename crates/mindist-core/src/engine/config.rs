use crate::core::assignment::AssignmentMethod;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Basin-hopping steps after the initial state.
    pub iterations: usize,
    /// Capacity of the retained candidate collection.
    pub num_candidates: usize,
    /// Metropolis temperature, in units of the overlap energy.
    pub temperature: f64,
    /// Largest angle (radians) of a single random perturbation.
    pub max_step_angle: f64,
    /// The search stops once the best score is this close to the landscape's global minimum.
    pub isomer_tolerance: f64,
    /// Candidates whose scores differ by less than this are the same basin.
    pub candidate_tolerance: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            num_candidates: 20,
            temperature: 1.0,
            max_step_angle: PI,
            isomer_tolerance: 1e-6,
            candidate_tolerance: 1e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlapConfig {
    /// Width of the Gaussian overlap kernel.
    pub length_scale: f64,
    /// Multipliers of `length_scale` for successive relaxation passes, coarse to fine.
    pub relax_schedule: Vec<f64>,
    pub relax_iterations: usize,
    pub relax_tolerance: f64,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            length_scale: 0.2,
            relax_schedule: vec![4.0, 2.0, 1.0],
            relax_iterations: 100,
            relax_tolerance: 1e-12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignmentConfig {
    pub search: SearchConfig,
    pub overlap: OverlapConfig,
    pub assignment: AssignmentMethod,
}

impl AlignmentConfig {
    pub fn builder() -> AlignmentConfigBuilder {
        AlignmentConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let search = &self.search;
        let overlap = &self.overlap;

        require(search.num_candidates > 0, "num_candidates", "must be at least 1")?;
        require_positive(search.temperature, "temperature")?;
        require_positive(search.max_step_angle, "max_step_angle")?;
        require(
            search.isomer_tolerance.is_finite() && search.isomer_tolerance >= 0.0,
            "isomer_tolerance",
            "must be a non-negative number",
        )?;
        require(
            search.candidate_tolerance.is_finite() && search.candidate_tolerance >= 0.0,
            "candidate_tolerance",
            "must be a non-negative number",
        )?;
        require_positive(overlap.length_scale, "length_scale")?;
        require(
            overlap.relax_schedule.iter().all(|f| f.is_finite() && *f > 0.0),
            "relax_schedule",
            "factors must be positive",
        )?;
        require(
            overlap.relax_tolerance.is_finite() && overlap.relax_tolerance >= 0.0,
            "relax_tolerance",
            "must be a non-negative number",
        )?;
        if let AssignmentMethod::Auto { max_exact_size } = self.assignment {
            require(max_exact_size > 0, "max_exact_size", "must be at least 1")?;
        }
        Ok(())
    }
}

fn require(condition: bool, name: &'static str, reason: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: reason.to_string(),
        })
    }
}

fn require_positive(value: f64, name: &'static str) -> Result<(), ConfigError> {
    require(
        value.is_finite() && value > 0.0,
        name,
        &format!("must be a positive number, got {}", value),
    )
}

/// Builds an [`AlignmentConfig`]; unset fields keep their defaults.
#[derive(Default)]
pub struct AlignmentConfigBuilder {
    iterations: Option<usize>,
    num_candidates: Option<usize>,
    temperature: Option<f64>,
    max_step_angle: Option<f64>,
    isomer_tolerance: Option<f64>,
    candidate_tolerance: Option<f64>,
    length_scale: Option<f64>,
    relax_schedule: Option<Vec<f64>>,
    relax_iterations: Option<usize>,
    relax_tolerance: Option<f64>,
    assignment: Option<AssignmentMethod>,
}

impl AlignmentConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }
    pub fn num_candidates(mut self, n: usize) -> Self {
        self.num_candidates = Some(n);
        self
    }
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
    pub fn max_step_angle(mut self, radians: f64) -> Self {
        self.max_step_angle = Some(radians);
        self
    }
    pub fn isomer_tolerance(mut self, tolerance: f64) -> Self {
        self.isomer_tolerance = Some(tolerance);
        self
    }
    pub fn candidate_tolerance(mut self, tolerance: f64) -> Self {
        self.candidate_tolerance = Some(tolerance);
        self
    }
    pub fn length_scale(mut self, length_scale: f64) -> Self {
        self.length_scale = Some(length_scale);
        self
    }
    pub fn relax_schedule(mut self, schedule: Vec<f64>) -> Self {
        self.relax_schedule = Some(schedule);
        self
    }
    pub fn relax_iterations(mut self, iterations: usize) -> Self {
        self.relax_iterations = Some(iterations);
        self
    }
    pub fn relax_tolerance(mut self, tolerance: f64) -> Self {
        self.relax_tolerance = Some(tolerance);
        self
    }
    pub fn assignment(mut self, method: AssignmentMethod) -> Self {
        self.assignment = Some(method);
        self
    }

    pub fn build(self) -> Result<AlignmentConfig, ConfigError> {
        let search_defaults = SearchConfig::default();
        let overlap_defaults = OverlapConfig::default();

        let config = AlignmentConfig {
            search: SearchConfig {
                iterations: self.iterations.unwrap_or(search_defaults.iterations),
                num_candidates: self.num_candidates.unwrap_or(search_defaults.num_candidates),
                temperature: self.temperature.unwrap_or(search_defaults.temperature),
                max_step_angle: self.max_step_angle.unwrap_or(search_defaults.max_step_angle),
                isomer_tolerance: self
                    .isomer_tolerance
                    .unwrap_or(search_defaults.isomer_tolerance),
                candidate_tolerance: self
                    .candidate_tolerance
                    .unwrap_or(search_defaults.candidate_tolerance),
            },
            overlap: OverlapConfig {
                length_scale: self.length_scale.unwrap_or(overlap_defaults.length_scale),
                relax_schedule: self
                    .relax_schedule
                    .unwrap_or(overlap_defaults.relax_schedule),
                relax_iterations: self
                    .relax_iterations
                    .unwrap_or(overlap_defaults.relax_iterations),
                relax_tolerance: self
                    .relax_tolerance
                    .unwrap_or(overlap_defaults.relax_tolerance),
            },
            assignment: self.assignment.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AlignmentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.iterations, 100);
        assert_eq!(config.search.num_candidates, 20);
        assert_eq!(config.overlap.length_scale, 0.2);
        assert_eq!(config.assignment, AssignmentMethod::Hungarian);
    }

    #[test]
    fn builder_without_overrides_matches_default() {
        let built = AlignmentConfig::builder().build().unwrap();
        assert_eq!(built, AlignmentConfig::default());
    }

    #[test]
    fn builder_applies_overrides() {
        let config = AlignmentConfig::builder()
            .iterations(250)
            .num_candidates(5)
            .length_scale(0.35)
            .assignment(AssignmentMethod::Auto { max_exact_size: 64 })
            .build()
            .unwrap();
        assert_eq!(config.search.iterations, 250);
        assert_eq!(config.search.num_candidates, 5);
        assert_eq!(config.overlap.length_scale, 0.35);
        assert_eq!(
            config.assignment,
            AssignmentMethod::Auto { max_exact_size: 64 }
        );
    }

    #[test]
    fn zero_iterations_is_allowed() {
        assert!(AlignmentConfig::builder().iterations(0).build().is_ok());
    }

    #[test]
    fn builder_rejects_non_positive_length_scale() {
        let result = AlignmentConfig::builder().length_scale(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "length_scale",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_zero_candidates() {
        let result = AlignmentConfig::builder().num_candidates(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "num_candidates",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_nan_temperature() {
        assert!(AlignmentConfig::builder().temperature(f64::NAN).build().is_err());
    }

    #[test]
    fn builder_rejects_negative_schedule_factor() {
        let result = AlignmentConfig::builder()
            .relax_schedule(vec![2.0, -1.0])
            .build();
        assert!(result.is_err());
    }
}
