//! The wellness scoring engine: pure, clock-injected, total over its input
//! domain. Nothing in here performs I/O or reads the wall clock.

pub mod fallback;
pub mod predict;
pub mod recommend;
pub mod score;
pub mod snapshot;

pub use fallback::{fallback_analysis, fallback_coach_reply, fallback_score};
pub use predict::{circadian_factor, predict_vitality};
pub use recommend::recommend;
pub use score::primary_score;
pub use snapshot::{BiometricInput, Goal, Snapshot};
