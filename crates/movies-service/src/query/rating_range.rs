//! Rating-range builder.

use super::{FilterQuery, QueryClause, RangeBounds};
use crate::cache::{CacheKeyArgs, CallArgs};
use movies_core::{MoviesError, MoviesResult};
use serde::{Deserialize, Serialize};

/// Field holding a film's rating.
pub const RATING_FIELD: &str = "imdb_rating";

/// Optional inclusive rating bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingRangeRequest {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RatingRangeRequest {
    #[must_use]
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl CacheKeyArgs for RatingRangeRequest {
    fn key_args(&self) -> MoviesResult<CallArgs> {
        CallArgs::new().arg(&self.min)?.arg(&self.max)
    }
}

/// Translates rating bounds into a filter fragment.
///
/// No bounds yields the empty filter; otherwise one range clause carries the
/// supplied bounds only. NaN or infinite bounds and inverted bounds are
/// rejected rather than sent to the backend.
pub fn build_rating_range(min: Option<f64>, max: Option<f64>) -> MoviesResult<FilterQuery> {
    if min.is_none() && max.is_none() {
        return Ok(FilterQuery::empty());
    }

    for (name, bound) in [("rating_min", min), ("rating_max", max)] {
        if let Some(value) = bound.filter(|v| !v.is_finite()) {
            return Err(MoviesError::validation(format!("{} must be a finite number, got {}", name, value)));
        }
    }

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(MoviesError::validation(format!(
                "rating_min ({}) must not exceed rating_max ({})",
                min, max
            )));
        }
    }

    let bounds = RangeBounds { gte: min, lte: max };
    Ok(FilterQuery::must(vec![QueryClause::range(RATING_FIELD, bounds)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_bounds_is_empty() {
        let filter = build_rating_range(None, None).unwrap();
        assert_eq!(serde_json::to_value(filter).unwrap(), json!({}));
    }

    #[test]
    fn test_lower_bound_only() {
        let filter = build_rating_range(Some(5.0), None).unwrap();
        assert_eq!(
            serde_json::to_value(filter).unwrap(),
            json!({"bool": {"must": [{"range": {"imdb_rating": {"gte": 5.0}}}]}})
        );
    }

    #[test]
    fn test_upper_bound_only() {
        let filter = build_rating_range(None, Some(8.0)).unwrap();
        assert_eq!(
            serde_json::to_value(filter).unwrap(),
            json!({"bool": {"must": [{"range": {"imdb_rating": {"lte": 8.0}}}]}})
        );
    }

    #[test]
    fn test_both_bounds() {
        let filter = build_rating_range(Some(5.0), Some(8.0)).unwrap();
        assert_eq!(
            serde_json::to_value(filter).unwrap(),
            json!({"bool": {"must": [{"range": {"imdb_rating": {"gte": 5.0, "lte": 8.0}}}]}})
        );
    }

    #[test]
    fn test_equal_bounds_are_allowed() {
        assert!(build_rating_range(Some(7.5), Some(7.5)).is_ok());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = build_rating_range(Some(8.0), Some(5.0)).unwrap_err();
        assert!(matches!(err, MoviesError::Validation(_)));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        for (min, max) in [
            (Some(f64::NAN), None),
            (None, Some(f64::NAN)),
            (Some(f64::NEG_INFINITY), Some(5.0)),
            (Some(5.0), Some(f64::INFINITY)),
        ] {
            let err = build_rating_range(min, max).unwrap_err();
            assert!(matches!(err, MoviesError::Validation(_)), "{min:?}..{max:?}");
        }
    }

    #[test]
    fn test_key_args_reject_non_finite_bound() {
        assert!(RatingRangeRequest::new(Some(f64::NAN), None).key_args().is_err());
        assert!(RatingRangeRequest::new(None, Some(f64::INFINITY)).key_args().is_err());
        assert!(RatingRangeRequest::new(None, None).key_args().is_ok());
    }

    #[test]
    fn test_key_args_distinguish_missing_bound_side() {
        let low = RatingRangeRequest::new(Some(5.0), None).key_args().unwrap();
        let high = RatingRangeRequest::new(None, Some(5.0)).key_args().unwrap();
        assert_ne!(low, high);
    }
}
