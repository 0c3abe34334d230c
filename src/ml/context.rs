//! Explicit model context
//!
//! A `ModelContext` owns everything one classification pipeline needs: the
//! loader for its oracle, the lazily initialized oracle handle, the label table
//! and the configuration. The handle is loaded at most once; concurrent first
//! uses block on the same initialization. It is cleared only by
//! [`ModelContext::reset`], after which the next use loads it again.

use crate::analysis::result::ClassificationResult;
use crate::batch::{self, BatchInput, BatchReport};
use crate::config::ClassifyConfig;
use crate::error::{ClassifyError, Result};
use crate::labels::LabelTable;
use crate::ml::oracle::ScoreOracle;
use once_cell::sync::OnceCell;
use std::fmt;

type Loader<O> = Box<dyn Fn() -> Result<O> + Send + Sync>;

/// Lazily loaded oracle plus the label table and configuration it is used with
pub struct ModelContext<O> {
    loader: Loader<O>,
    handle: OnceCell<O>,
    labels: LabelTable,
    config: ClassifyConfig,
}

impl<O> ModelContext<O> {
    /// Create a context whose oracle is built by `loader` on first use
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::Validation` if `config` is invalid
    ///
    /// # Example
    ///
    /// ```
    /// use bloom_rank::labels::LabelTable;
    /// use bloom_rank::ml::{oracle_fn, ModelContext, ScoreBuffer};
    /// use bloom_rank::ClassifyConfig;
    ///
    /// let context = ModelContext::new(ClassifyConfig::default(), LabelTable::unlabeled(3), || {
    ///     Ok(oracle_fn(|_: &str| Ok(ScoreBuffer::new(vec![0.1, 0.8, 0.1]))))
    /// })?;
    /// assert!(!context.is_loaded());
    ///
    /// let result = context.classify("leaf.jpg")?;
    /// assert_eq!(result.predictions.top().map(|p| p.index), Some(1));
    /// assert!(context.is_loaded());
    /// # Ok::<(), bloom_rank::ClassifyError>(())
    /// ```
    pub fn new<F>(config: ClassifyConfig, labels: LabelTable, loader: F) -> Result<Self>
    where
        F: Fn() -> Result<O> + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self {
            loader: Box::new(loader),
            handle: OnceCell::new(),
            labels,
            config,
        })
    }

    /// Create a context around an already constructed oracle
    ///
    /// There is no loader to fall back on: after [`reset`](Self::reset) the
    /// oracle cannot be restored and every use fails with
    /// `ClassifyError::Model`.
    pub fn with_oracle(config: ClassifyConfig, labels: LabelTable, oracle: O) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            loader: Box::new(|| {
                Err(ClassifyError::Model(
                    "context was built from an oracle instance and has no loader".to_string(),
                ))
            }),
            handle: OnceCell::with_value(oracle),
            labels,
            config,
        })
    }

    /// Oracle handle, loading it on first use
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::Model` if the loader fails. The failure is not
    /// cached; the next call tries again.
    pub fn oracle(&self) -> Result<&O> {
        self.handle.get_or_try_init(|| {
            log::debug!("Loading model for variant {:?}", self.config.variant);
            (self.loader)().map_err(|e| match e {
                ClassifyError::Model(_) => e,
                other => ClassifyError::Model(format!("Failed to load model: {}", other)),
            })
        })
    }

    /// True once the oracle has been loaded
    pub fn is_loaded(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Drop the loaded oracle; the next use loads it again
    pub fn reset(&mut self) {
        if self.handle.take().is_some() {
            log::debug!("Model handle released");
        }
    }

    /// Label table used for ranking
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Configuration used for post-processing
    pub fn config(&self) -> &ClassifyConfig {
        &self.config
    }
}

impl<O: ScoreOracle> ModelContext<O> {
    /// Classify one input with the context's oracle, labels and configuration
    ///
    /// # Errors
    ///
    /// `ClassifyError::Model` if the oracle cannot be loaded, otherwise the
    /// errors of [`crate::classify_image`]
    pub fn classify(&self, input: &O::Input) -> Result<ClassificationResult> {
        let oracle = self.oracle()?;
        crate::classify_image(oracle, input, &self.labels, &self.config)
    }

    /// Classify a batch with the context's oracle
    ///
    /// If the oracle cannot be loaded every item records the load failure.
    pub fn process_batch(&self, items: &[BatchInput<'_, O::Input>]) -> BatchReport {
        match self.oracle() {
            Ok(oracle) => batch::process_batch(oracle, items, &self.labels, &self.config),
            Err(err) => {
                log::warn!("Model unavailable for batch of {} items: {}", items.len(), err);
                BatchReport::all_failed(items, &err)
            }
        }
    }
}

impl<O> fmt::Debug for ModelContext<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelContext")
            .field("loaded", &self.is_loaded())
            .field("class_count", &self.labels.class_count())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::oracle::{oracle_fn, ScoreBuffer};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_context(
        loads: Arc<AtomicUsize>,
    ) -> ModelContext<impl ScoreOracle<Input = str>> {
        ModelContext::new(ClassifyConfig::default(), LabelTable::unlabeled(4), move || {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(oracle_fn(|_: &str| Ok(ScoreBuffer::new(vec![0.1, 0.7, 0.05, 0.15]))))
        })
        .unwrap()
    }

    #[test]
    fn test_loads_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let context = counting_context(Arc::clone(&loads));
        assert_eq!(loads.load(Ordering::SeqCst), 0);

        for _ in 0..3 {
            let result = context.classify("a.jpg").unwrap();
            assert_eq!(result.predictions.top().unwrap().index, 1);
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reset_reloads() {
        let loads = Arc::new(AtomicUsize::new(0));
        let mut context = counting_context(Arc::clone(&loads));

        context.classify("a.jpg").unwrap();
        context.reset();
        assert!(!context.is_loaded());
        context.classify("a.jpg").unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_load_failure_is_model_error_and_not_cached() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let context = ModelContext::new(ClassifyConfig::default(), LabelTable::unlabeled(2), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<crate::ml::oracle::FnOracle<str, fn(&str) -> Result<ScoreBuffer>>, _>(
                ClassifyError::OracleInference("weights not found".to_string()),
            )
        })
        .unwrap();

        let err = context.classify("a.jpg").unwrap_err();
        assert_eq!(err.kind(), "model");
        assert!(err.to_string().contains("weights not found"));

        let items = [BatchInput::new("x", "x"), BatchInput::new("y", "y")];
        let report = context.process_batch(&items);
        assert_eq!(report.len(), 2);
        assert_eq!(report.failed(), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_with_oracle_cannot_reload_after_reset() {
        let oracle = oracle_fn(|_: &str| Ok(ScoreBuffer::new(vec![0.4, 0.6])));
        let mut context =
            ModelContext::with_oracle(ClassifyConfig::default(), LabelTable::unlabeled(2), oracle)
                .unwrap();
        assert!(context.is_loaded());
        assert!(context.classify("a").is_ok());

        context.reset();
        assert!(matches!(context.classify("a"), Err(ClassifyError::Model(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClassifyConfig {
            top_k: 0,
            ..Default::default()
        };
        let oracle = oracle_fn(|_: &str| Ok(ScoreBuffer::new(vec![1.0])));
        assert!(ModelContext::with_oracle(config, LabelTable::unlabeled(1), oracle).is_err());
    }

    #[test]
    fn test_batch_through_context() {
        let loads = Arc::new(AtomicUsize::new(0));
        let context = counting_context(loads);
        let items = [BatchInput::new("a", "a"), BatchInput::new("b", "b")];
        let report = context.process_batch(&items);
        assert_eq!(report.succeeded(), 2);
        assert!(format!("{:?}", context).contains("loaded: true"));
    }
}
