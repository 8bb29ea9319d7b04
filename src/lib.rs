//! Dealflow - scoring, filtering and sorting for a venture deal pipeline
//!
//! This library holds the pure logic behind the deal review views: it maps
//! metric values to display bands and match scores to recommendations, and it
//! filters and stably sorts in-memory deal collections. Everything is
//! synchronous and side-effect free apart from the simulated upload driver.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod services;

// Re-export commonly used types
pub use crate::core::{band_of, recommendation_of, Band, DealFilterSort, Verdict};
pub use crate::models::{Deal, FilterConfig, MatchRange, SortConfig, SortDirection, SortField};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(band_of(80.0), Band::Good);
        assert_eq!(recommendation_of(80.0), Verdict::RequestMoreInfo);
        assert_eq!(SortConfig::default().field, SortField::MatchScore);
    }
}
