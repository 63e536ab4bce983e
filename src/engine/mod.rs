pub mod adaptive;
pub mod key_stats;
pub mod metrics;
