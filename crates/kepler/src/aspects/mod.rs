pub mod calculator;
pub mod types;

pub use calculator::{angular_distance, classify, AspectAnalyzer};
pub use types::{AspectHit, AspectKind, BodyPair, ASPECT_TABLE, ORB_MAX};
