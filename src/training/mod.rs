//! Training infrastructure: episode and match drivers, the Q-learning
//! trainer, and rolling metrics.

pub mod episode;
pub mod metrics;
pub mod trainer;
