//! Directive selector.
//!
//! The primary aspect is the first hit in pair-enumeration order, not the
//! tightest orb.

use crate::aspects::AspectHit;
use serde::Serialize;
use std::fmt;

/// Narrative used when no pair falls within orb
pub const DEFAULT_DIRECTIVE: &str =
    "EXPANSION NODE ACTIVE: geometry in equilibrium. Consolidation window.";

/// Terminal narrative output of the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Directive(String);

impl Directive {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Degrees with at least one decimal: 90.0, 87.25
fn format_degrees(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Render the directive for a single hit
pub fn render_hit(hit: &AspectHit) -> Directive {
    Directive(format!(
        "PROTOCOL {} DETECTED: {} between vectors {}. Distance: {}°.",
        hit.kind.type_name(),
        hit.kind.label(),
        hit.pair,
        format_degrees(hit.distance_deg),
    ))
}

/// First hit wins; an empty list yields the default narrative
pub fn select_directive(hits: &[AspectHit]) -> Directive {
    match hits.first() {
        Some(hit) => render_hit(hit),
        None => Directive(DEFAULT_DIRECTIVE.to_string()),
    }
}
