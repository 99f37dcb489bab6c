use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock}
};

use super::{normalize, Formula, FormulaError, FormulaLimits};

/// Compiled formulas keyed by their normalized text, shared across threads.
///
/// Each key is compiled at most once; failed compilations are not stored, so a formula
/// that is rejected is rejected again on every lookup.
#[derive(Debug, Default)]
pub struct FormulaCache {
    limits: FormulaLimits,
    entries: RwLock<HashMap<String, Arc<Formula>>>
}

impl FormulaCache {
    pub fn new() -> FormulaCache {
        FormulaCache::default()
    }

    pub fn with_limits(limits: FormulaLimits) -> FormulaCache {
        FormulaCache {
            limits,
            entries: RwLock::default()
        }
    }

    pub fn get_or_compile(&self, source: &str) -> Result<Arc<Formula>, FormulaError> {
        let key = normalize(source);

        if let Some(formula) = self.entries.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
            return Ok(Arc::clone(formula));
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have compiled it while we waited for the write lock
        if let Some(formula) = entries.get(&key) {
            return Ok(Arc::clone(formula));
        }

        let formula = Arc::new(Formula::compile_with_limits(source, &self.limits)?);
        entries.insert(key, Arc::clone(&formula));

        Ok(formula)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
