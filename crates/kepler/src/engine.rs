//! Natal vector engine entry point.
//!
//! Time normalizer -> vector table builder -> aspect analyzer -> directive
//! selector. The engine is stateless apart from the provider it is handed;
//! each call builds its own vector and hit list.

use crate::aspects::{AspectAnalyzer, AspectHit};
use crate::directive::{select_directive, Directive};
use crate::ephemeris::PositionProvider;
use crate::error::EngineError;
use crate::time;
use crate::vectors::{build_position_vector, PositionVector};
use serde::Serialize;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::oneshot;

/// Raw birth data as received from the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NatalInput {
    /// `YYYY-MM-DD`
    pub date_text: String,
    /// `HH:MM`; `None` or blank means 12:00
    pub time_text: Option<String>,
}

impl NatalInput {
    pub fn new(date_text: impl Into<String>, time_text: Option<impl Into<String>>) -> Self {
        Self {
            date_text: date_text.into(),
            time_text: time_text.map(Into::into),
        }
    }
}

/// Successful engine output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalReport {
    pub vectors: PositionVector,
    pub aspect_hits: Vec<AspectHit>,
    pub directive: Directive,
}

/// Stateless engine over a position provider
pub struct NatalEngine<P> {
    provider: P,
    analyzer: AspectAnalyzer,
}

impl<P: PositionProvider> NatalEngine<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            analyzer: AspectAnalyzer::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run the whole pipeline. Any failure yields no vectors, no hits and
    /// no directive.
    pub fn compute(&self, input: &NatalInput) -> Result<NatalReport, EngineError> {
        let time_ref = time::normalize(&input.date_text, input.time_text.as_deref(), &self.provider)?;
        let vectors = build_position_vector(time_ref, &self.provider)?;
        Ok(self.report_for(vectors))
    }

    /// Analyze an already built vector
    pub fn report_for(&self, vectors: PositionVector) -> NatalReport {
        let aspect_hits = self.analyzer.analyze(&vectors);
        let directive = select_directive(&aspect_hits);
        NatalReport {
            vectors,
            aspect_hits,
            directive,
        }
    }
}

/// Run [`NatalEngine::compute`] on a detached worker thread and give up
/// after `timeout`.
///
/// There is no retry and no fallback narrative: expiry is reported as
/// [`EngineError::Timeout`]. The worker is not joined, so an abandoned
/// computation never holds up the caller or the runtime's shutdown; its
/// result is dropped when it eventually finishes.
pub async fn compute_with_timeout<P>(
    engine: Arc<NatalEngine<P>>,
    input: NatalInput,
    timeout: Duration,
) -> Result<NatalReport, EngineError>
where
    P: PositionProvider + Send + Sync + 'static,
{
    let (tx, rx) = oneshot::channel();
    thread::Builder::new()
        .name("kepler-compute".to_string())
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| engine.compute(&input)))
                .unwrap_or_else(|payload| Err(EngineError::Aborted(panic_message(payload.as_ref()))));
            // Nobody is listening once the deadline has passed
            let _ = tx.send(outcome);
        })
        .map_err(|err| EngineError::Aborted(format!("could not start worker: {}", err)))?;

    match tokio::time::timeout(timeout, rx).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(EngineError::Aborted("worker exited without a result".to_string())),
        Err(_) => Err(EngineError::Timeout(timeout)),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("worker panicked: {}", msg)
    } else {
        "worker panicked".to_string()
    }
}
