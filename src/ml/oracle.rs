//! Model oracle boundary and score buffer ownership
//!
//! The oracle is whatever produces a raw score vector from preprocessed image
//! input: an ONNX session, a TFLite interpreter, a remote stub. Its scores are
//! handed over in a [`ScoreBuffer`], an owning guard that runs the backend's
//! release hook when dropped. Because release happens in `Drop`, the buffer is
//! returned to the backend on every exit path: success, validation failure,
//! or an early `?` return.

use crate::error::Result;
use std::fmt;
use std::marker::PhantomData;

type ReleaseHook = Box<dyn FnOnce() + Send>;

/// Owning guard around one oracle output
pub struct ScoreBuffer {
    scores: Vec<f32>,
    release: Option<ReleaseHook>,
}

impl ScoreBuffer {
    /// Wrap scores that need no backend release
    pub fn new(scores: Vec<f32>) -> Self {
        Self {
            scores,
            release: None,
        }
    }

    /// Wrap scores whose backing storage must be released when the buffer is dropped
    ///
    /// # Example
    ///
    /// ```
    /// use bloom_rank::ml::oracle::ScoreBuffer;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let released = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&released);
    /// {
    ///     let buffer = ScoreBuffer::with_release(vec![0.2, 0.8], move || {
    ///         counter.fetch_add(1, Ordering::SeqCst);
    ///     });
    ///     assert_eq!(buffer.scores(), &[0.2, 0.8]);
    /// }
    /// assert_eq!(released.load(Ordering::SeqCst), 1);
    /// ```
    pub fn with_release<F>(scores: Vec<f32>, release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            scores,
            release: Some(Box::new(release)),
        }
    }

    /// Borrow the raw scores
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Number of scores
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True when the oracle returned no scores
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl AsRef<[f32]> for ScoreBuffer {
    fn as_ref(&self) -> &[f32] {
        &self.scores
    }
}

impl Drop for ScoreBuffer {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            log::trace!("Releasing score buffer of {} entries", self.scores.len());
            release();
        }
    }
}

impl fmt::Debug for ScoreBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreBuffer")
            .field("len", &self.scores.len())
            .field("has_release", &self.release.is_some())
            .finish()
    }
}

/// A model that maps preprocessed input to a score vector
///
/// The returned vector must be index-aligned with the label table of the
/// loaded model variant.
pub trait ScoreOracle {
    /// Preprocessed model input (tensor, pixel buffer, file path, ...)
    type Input: ?Sized;

    /// Run one inference
    ///
    /// # Errors
    ///
    /// Implementations report backend failures as
    /// `ClassifyError::OracleInference`
    fn infer(&self, input: &Self::Input) -> Result<ScoreBuffer>;
}

/// Oracle backed by a closure
pub struct FnOracle<I: ?Sized, F> {
    infer: F,
    _input: PhantomData<fn(&I)>,
}

impl<I: ?Sized, F> FnOracle<I, F>
where
    F: Fn(&I) -> Result<ScoreBuffer>,
{
    /// Wrap a closure as an oracle
    pub fn new(infer: F) -> Self {
        Self {
            infer,
            _input: PhantomData,
        }
    }
}

impl<I: ?Sized, F> ScoreOracle for FnOracle<I, F>
where
    F: Fn(&I) -> Result<ScoreBuffer>,
{
    type Input = I;

    fn infer(&self, input: &I) -> Result<ScoreBuffer> {
        (self.infer)(input)
    }
}

/// Shorthand for [`FnOracle::new`]
///
/// ```
/// use bloom_rank::ml::oracle::{oracle_fn, ScoreBuffer, ScoreOracle};
///
/// let oracle = oracle_fn(|pixels: &[u8]| Ok(ScoreBuffer::new(vec![pixels.len() as f32])));
/// assert_eq!(oracle.infer(&[1, 2, 3][..])?.scores(), &[3.0]);
/// # Ok::<(), bloom_rank::ClassifyError>(())
/// ```
pub fn oracle_fn<I: ?Sized, F>(infer: F) -> FnOracle<I, F>
where
    F: Fn(&I) -> Result<ScoreBuffer>,
{
    FnOracle::new(infer)
}
