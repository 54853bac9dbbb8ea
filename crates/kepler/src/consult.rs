//! Consultation: one request carried through place resolution and the
//! engine, rendered as a single JSON record.

use crate::engine::{compute_with_timeout, NatalEngine, NatalInput, NatalReport};
use crate::ephemeris::PositionProvider;
use crate::error::EngineError;
use crate::geo::{GeoResolver, ResolvedPlace};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Birth data plus free-text place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultRequest {
    pub date: String,
    pub time: Option<String>,
    pub place: String,
}

impl ConsultRequest {
    fn natal_input(&self) -> NatalInput {
        NatalInput {
            date_text: self.date.clone(),
            time_text: self.time.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Consultation {
    pub place: ResolvedPlace,
    pub outcome: Result<NatalReport, EngineError>,
}

impl Consultation {
    /// Resolve the place and run the engine synchronously
    pub fn run<P, G>(engine: &NatalEngine<P>, resolver: &G, request: &ConsultRequest) -> Self
    where
        P: PositionProvider,
        G: GeoResolver + ?Sized,
    {
        let place = resolver.resolve(&request.place);
        let outcome = engine.compute(&request.natal_input());
        Self { place, outcome }
    }

    /// Same as [`Consultation::run`] with the engine bounded by `timeout`
    pub async fn run_with_timeout<P, G>(
        engine: Arc<NatalEngine<P>>,
        resolver: &G,
        request: &ConsultRequest,
        timeout: Duration,
    ) -> Self
    where
        P: PositionProvider + Send + Sync + 'static,
        G: GeoResolver + ?Sized,
    {
        let place = resolver.resolve(&request.place);
        let outcome = compute_with_timeout(engine, request.natal_input(), timeout).await;
        Self { place, outcome }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// JSON record for the caller. Failures carry the error marker and
    /// never a narrative.
    pub fn to_record(&self) -> Value {
        match &self.outcome {
            Ok(report) => json!({
                "status": "success",
                "geo": self.place,
                "vectors": report.vectors,
                "aspectHits": report.aspect_hits,
                "directive": report.directive,
            }),
            Err(err) => json!({
                "status": "error",
                "error": err.kind(),
                "detail": err.to_string(),
                "geo": self.place,
            }),
        }
    }
}
