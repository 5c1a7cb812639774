use super::distribution::DifficultyDistribution;
use super::question::{Difficulty, Question};
use crate::shuffle::{sample, shuffled};
use log::debug;
use rand::RngCore;
use std::collections::HashSet;

/// Counts at or below this skip the percentage split entirely
pub const SMALL_COUNT_THRESHOLD: usize = 3;

/// Strategy for picking `count` questions out of a single question type's pool
pub trait QuestionSelector {
    fn select(
        &self,
        pool: &[Question],
        count: usize,
        distribution: &DifficultyDistribution,
        rng: &mut dyn RngCore,
    ) -> Vec<Question>;
}

/// Difficulty-blind selection: every tier pooled, shuffled, first `count` taken
pub struct UniformSelector;

impl QuestionSelector for UniformSelector {
    fn select(
        &self,
        pool: &[Question],
        count: usize,
        _distribution: &DifficultyDistribution,
        rng: &mut dyn RngCore,
    ) -> Vec<Question> {
        let mut combined: Vec<Question> = Difficulty::ALL
            .iter()
            .flat_map(|d| pool.iter().filter(move |q| q.difficulty == *d))
            .cloned()
            .collect();
        combined = shuffled(combined, rng);
        combined.truncate(count);
        combined
    }
}

/// Proportional selection across difficulty tiers with a backfill for short tiers
pub struct StratifiedSelector;

impl QuestionSelector for StratifiedSelector {
    fn select(
        &self,
        pool: &[Question],
        count: usize,
        distribution: &DifficultyDistribution,
        rng: &mut dyn RngCore,
    ) -> Vec<Question> {
        if count == 0 {
            return Vec::new();
        }
        if count >= pool.len() {
            return shuffled(pool.to_vec(), rng);
        }
        if count <= SMALL_COUNT_THRESHOLD {
            return UniformSelector.select(pool, count, distribution, rng);
        }

        let tiers = distribution.allocate(count);
        let mut selected: Vec<Question> = Vec::with_capacity(count);

        for difficulty in Difficulty::ALL {
            let wanted = tiers.get(difficulty);
            let available: Vec<Question> = pool
                .iter()
                .filter(|q| q.difficulty == difficulty)
                .cloned()
                .collect();
            let taken = sample(&available, wanted, rng);
            debug!(
                "{difficulty}: wanted {wanted}, available {}, taken {}",
                available.len(),
                taken.len()
            );
            selected.extend(taken);
        }

        if selected.len() < count {
            let chosen: HashSet<&str> = selected.iter().map(|q| q.id.as_str()).collect();
            let remaining: Vec<Question> = pool
                .iter()
                .filter(|q| !chosen.contains(q.id.as_str()))
                .cloned()
                .collect();
            let backfill = sample(&remaining, count - selected.len(), rng);
            debug!("backfilled {} across tiers", backfill.len());
            selected.extend(backfill);
        }

        selected
    }
}
