//! Portfolio comparator — a bounded set of strategies sharing one context.
//!
//! The portfolio owns its `GlobalContext` and between one and five
//! `StrategyConfig`s in insertion order. It never caches results: every
//! `evaluate_all()` re-projects from the current inputs.

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use roilab_core::{
    project, CatalogError, GlobalContext, InputFingerprint, ProjectionError, StrategyConfig,
    StrategyId, StrategyPreset, StrategyResult,
};

use crate::ranking::{self, RankingMetric, SortOrder};

/// Errors from portfolio operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortfolioError {
    #[error("portfolio already holds the maximum of {capacity} strategies")]
    CapacityExceeded { capacity: usize },
    #[error("cannot remove the last remaining strategy")]
    MinimumStrategyViolation,
    #[error("no strategy with id {0}")]
    StrategyNotFound(StrategyId),
    #[error(transparent)]
    Preset(#[from] CatalogError),
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// A comparison of 1..=`CAPACITY` strategies under one context.
#[derive(Debug, Clone)]
pub struct Portfolio {
    context: GlobalContext,
    strategies: Vec<StrategyConfig>,
    next_id: u32,
}

impl Portfolio {
    pub const CAPACITY: usize = 5;

    /// Create a portfolio seeded with one strategy from `initial_preset`.
    pub fn new(context: GlobalContext, initial_preset: &str) -> Result<Self, PortfolioError> {
        let preset: StrategyPreset = initial_preset.parse()?;
        let mut portfolio = Self {
            context,
            strategies: Vec::with_capacity(Self::CAPACITY),
            next_id: 1,
        };
        portfolio.push_preset(preset);
        Ok(portfolio)
    }

    pub fn context(&self) -> &GlobalContext {
        &self.context
    }

    /// Replace the shared context. Takes effect on the next evaluation.
    pub fn set_context(&mut self, context: GlobalContext) {
        debug!(?context, "portfolio context updated");
        self.context = context;
    }

    pub fn strategies(&self) -> &[StrategyConfig] {
        &self.strategies
    }

    pub fn strategy(&self, id: StrategyId) -> Option<&StrategyConfig> {
        self.strategies.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Never true for a portfolio built through `new`.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.strategies.len() >= Self::CAPACITY
    }

    /// Add a strategy cloned from the catalog. Returns its fresh id.
    pub fn add_strategy(&mut self, preset_key: &str) -> Result<StrategyId, PortfolioError> {
        if self.is_full() {
            return Err(PortfolioError::CapacityExceeded {
                capacity: Self::CAPACITY,
            });
        }
        let preset: StrategyPreset = preset_key.parse()?;
        let id = self.push_preset(preset);
        info!(%id, preset = preset.key(), count = self.len(), "strategy added");
        Ok(id)
    }

    /// Remove a strategy. The last strategy can never be removed.
    pub fn remove_strategy(&mut self, id: StrategyId) -> Result<StrategyConfig, PortfolioError> {
        let idx = self.index_of(id)?;
        if self.strategies.len() <= 1 {
            return Err(PortfolioError::MinimumStrategyViolation);
        }
        let removed = self.strategies.remove(idx);
        info!(%id, count = self.len(), "strategy removed");
        Ok(removed)
    }

    /// Reset a strategy's parameters from a preset, keeping its id, name and position.
    pub fn update_strategy(
        &mut self,
        id: StrategyId,
        preset_key: &str,
    ) -> Result<(), PortfolioError> {
        let idx = self.index_of(id)?;
        let preset: StrategyPreset = preset_key.parse()?;
        let slot = &mut self.strategies[idx];
        let name = std::mem::take(&mut slot.name);
        *slot = StrategyConfig {
            id,
            name,
            ..preset.to_config()
        };
        debug!(%id, preset = preset.key(), "strategy parameters replaced");
        Ok(())
    }

    /// Edit individual fields of a strategy.
    ///
    /// The id and name are restored after `edit` runs; use `rename_strategy`
    /// to change the name.
    pub fn edit_strategy<F>(&mut self, id: StrategyId, edit: F) -> Result<(), PortfolioError>
    where
        F: FnOnce(&mut StrategyConfig),
    {
        let idx = self.index_of(id)?;
        let slot = &mut self.strategies[idx];
        let name = slot.name.clone();
        edit(slot);
        slot.id = id;
        slot.name = name;
        Ok(())
    }

    pub fn rename_strategy(
        &mut self,
        id: StrategyId,
        name: impl Into<String>,
    ) -> Result<(), PortfolioError> {
        let idx = self.index_of(id)?;
        self.strategies[idx].name = name.into();
        Ok(())
    }

    /// Project every strategy against the shared context.
    ///
    /// Strategies are independent and evaluated in parallel. Results come back
    /// in insertion order. Any invalid strategy fails the whole evaluation.
    pub fn evaluate_all(&self) -> Result<Vec<StrategyResult>, PortfolioError> {
        let context = &self.context;
        let results = self
            .strategies
            .par_iter()
            .map(|s| project(s, context))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = results.len(), "portfolio evaluated");
        Ok(results)
    }

    /// Evaluate, then stable-sort by `metric`. Ties keep insertion order.
    pub fn rank_by(
        &self,
        metric: RankingMetric,
        order: SortOrder,
    ) -> Result<Vec<StrategyResult>, PortfolioError> {
        let mut results = self.evaluate_all()?;
        ranking::rank_results(&mut results, metric, order);
        Ok(results)
    }

    /// Evaluate and return the best strategy under the metric's natural direction.
    ///
    /// `None` only for an empty portfolio.
    pub fn best_by(
        &self,
        metric: RankingMetric,
    ) -> Result<Option<StrategyResult>, PortfolioError> {
        let results = self.evaluate_all()?;
        Ok(ranking::best_by(&results, metric).cloned())
    }

    /// Fingerprint of the current inputs.
    pub fn fingerprint(&self) -> InputFingerprint {
        InputFingerprint::of(&self.strategies, &self.context)
    }

    fn index_of(&self, id: StrategyId) -> Result<usize, PortfolioError> {
        self.strategies
            .iter()
            .position(|s| s.id == id)
            .ok_or(PortfolioError::StrategyNotFound(id))
    }

    fn push_preset(&mut self, preset: StrategyPreset) -> StrategyId {
        let id = StrategyId(self.next_id);
        self.next_id += 1;
        let mut config = preset.to_config();
        config.id = id;
        config.name = self.unique_name(preset.display_name());
        self.strategies.push(config);
        id
    }

    fn unique_name(&self, base: &str) -> String {
        let taken = |name: &str| self.strategies.iter().any(|s| s.name == name);
        if !taken(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base} #{n}"))
            .find(|candidate| !taken(candidate.as_str()))
            .unwrap_or_else(|| base.to_string())
    }
}
