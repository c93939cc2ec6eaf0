use super::progress::{Progress, ProgressReporter};
use super::state::{Candidate, CandidateSet};
use super::step::TakeStep;
use crate::core::models::rotation::AxisAngle;
use crate::core::potentials::RotationLandscape;
use rand::Rng;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub steps_taken: usize,
    pub accepted_steps: usize,
    pub isomer_found: bool,
    /// Local relaxation updates spent across the seed and every proposal.
    pub relax_iterations: usize,
}

/// Metropolis basin hopping over rotation space.
///
/// Every proposal is relaxed on the landscape before it is scored, so the walk
/// moves between local minima. Each relaxed minimum is offered to a bounded
/// [`CandidateSet`] regardless of whether the Metropolis test accepts it.
pub struct BasinHopping<'a, L: RotationLandscape, S: TakeStep> {
    landscape: &'a L,
    step: S,
    temperature: f64,
    current: Candidate,
    candidates: CandidateSet,
    relax_iterations: usize,
}

impl<'a, L: RotationLandscape, S: TakeStep> BasinHopping<'a, L, S> {
    /// Seeds the search with the identity orientation and its relaxed minimum.
    pub fn new(landscape: &'a L, step: S, temperature: f64, mut candidates: CandidateSet) -> Self {
        let identity = AxisAngle::identity();
        candidates.insert(Candidate {
            rotation: identity,
            score: landscape.energy(&identity.to_rotation()),
        });

        let relaxed = landscape.relax(&identity.to_rotation());
        let current = Candidate {
            rotation: AxisAngle::from_rotation(&relaxed.rotation),
            score: relaxed.energy,
        };
        candidates.insert(current);

        Self {
            landscape,
            step,
            temperature,
            current,
            candidates,
            relax_iterations: relaxed.iterations,
        }
    }

    pub fn current(&self) -> &Candidate {
        &self.current
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.best()
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn relax_iterations(&self) -> usize {
        self.relax_iterations
    }

    pub fn into_candidates(self) -> CandidateSet {
        self.candidates
    }

    /// Whether the best score is within `tolerance` of the landscape's known
    /// global minimum. Always false when the minimum is unknown.
    pub fn reached_global_minimum(&self, tolerance: f64) -> bool {
        match (self.landscape.global_minimum(), self.best()) {
            (Some(global), Some(best)) => (best.score - global).abs() < tolerance,
            _ => false,
        }
    }

    /// Performs one proposal; returns whether the walker moved.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let proposal = self.step.take_step(&self.current.rotation, rng);
        let relaxed = self.landscape.relax(&proposal.to_rotation());
        self.relax_iterations += relaxed.iterations;
        let trial = Candidate {
            rotation: AxisAngle::from_rotation(&relaxed.rotation),
            score: relaxed.energy,
        };
        self.candidates.insert(trial);

        let delta = trial.score - self.current.score;
        let accepted = delta < 0.0 || rng.r#gen::<f64>() < (-delta / self.temperature).exp();
        if accepted {
            self.current = trial;
        }
        accepted
    }

    /// Runs up to `iterations` steps, stopping early once the best score is
    /// within `isomer_tolerance` of the landscape's global minimum.
    #[instrument(skip_all, name = "basin_hopping")]
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        iterations: usize,
        isomer_tolerance: f64,
        rng: &mut R,
        reporter: &ProgressReporter,
    ) -> SearchOutcome {
        reporter.report(Progress::SearchStart {
            total_steps: iterations as u64,
        });

        let mut steps_taken = 0;
        let mut accepted_steps = 0;
        let mut isomer_found = self.reached_global_minimum(isomer_tolerance);

        while !isomer_found && steps_taken < iterations {
            if self.step(rng) {
                accepted_steps += 1;
            }
            steps_taken += 1;

            let best_score = self.best().map_or(f64::INFINITY, |c| c.score);
            reporter.report(Progress::SearchStep {
                step: steps_taken as u64,
                best_score,
            });
            debug!(
                step = steps_taken,
                current = self.current.score,
                best = best_score,
                "Basin hopping step."
            );

            isomer_found = self.reached_global_minimum(isomer_tolerance);
        }

        reporter.report(Progress::SearchFinish { isomer_found });
        info!(
            steps_taken,
            accepted_steps,
            isomer_found,
            relax_iterations = self.relax_iterations,
            candidates = self.candidates.len(),
            "Basin hopping finished."
        );

        SearchOutcome {
            steps_taken,
            accepted_steps,
            isomer_found,
            relax_iterations: self.relax_iterations,
        }
    }
}
