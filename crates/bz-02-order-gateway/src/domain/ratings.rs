//! Completion ratings and dispute payout checks.

use super::errors::GatewayError;
use serde::{Deserialize, Serialize};
use shared_types::OrderId;

/// Lowest accepted sub-score.
pub const RATING_MIN: i32 = 1;
/// Highest accepted sub-score.
pub const RATING_MAX: i32 = 5;
/// Longest accepted review, counted in characters.
pub const REVIEW_MAX_CHARACTERS: usize = 3000;

/// Tolerance for the payout split sum.
const SPLIT_EPSILON: f32 = 0.001;

/// Buyer's rating of one purchased item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Rating {
    /// Listing slug of the rated item.
    pub slug: String,
    pub overall: i32,
    pub quality: i32,
    pub description: i32,
    pub delivery_speed: i32,
    pub customer_service: i32,
    pub review: String,
    pub anonymous: bool,
}

impl Rating {
    fn scores(&self) -> [i32; 5] {
        [
            self.overall,
            self.quality,
            self.description,
            self.delivery_speed,
            self.customer_service,
        ]
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.slug.is_empty() {
            return Err(GatewayError::ValidationFailed(
                "rating must contain the slug".to_string(),
            ));
        }
        if self
            .scores()
            .iter()
            .any(|s| !(RATING_MIN..=RATING_MAX).contains(s))
        {
            return Err(GatewayError::ValidationFailed(
                "rating values must be between 1 and 5".to_string(),
            ));
        }
        if self.review.chars().count() > REVIEW_MAX_CHARACTERS {
            return Err(GatewayError::ValidationFailed(
                "too many characters in review".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRatings {
    pub order_id: OrderId,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

impl OrderRatings {
    /// First failing rating wins.
    pub fn validate(&self) -> Result<(), GatewayError> {
        self.ratings.iter().try_for_each(Rating::validate)
    }
}

/// Each share within 0..=100, summing to 100.
pub fn validate_split(buyer_percentage: f32, vendor_percentage: f32) -> Result<(), GatewayError> {
    let in_range = |p: f32| (0.0..=100.0).contains(&p);
    if !in_range(buyer_percentage) || !in_range(vendor_percentage) {
        return Err(GatewayError::ValidationFailed(
            "payout percentages must be between 0 and 100".to_string(),
        ));
    }
    if (buyer_percentage + vendor_percentage - 100.0).abs() > SPLIT_EPSILON {
        return Err(GatewayError::ValidationFailed(
            "payout percentages must add up to 100".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating() -> Rating {
        Rating {
            slug: "handmade-mug".into(),
            overall: 5,
            quality: 4,
            description: 5,
            delivery_speed: 3,
            customer_service: 5,
            review: "Arrived intact.".into(),
            anonymous: true,
        }
    }

    #[test]
    fn test_valid_rating() {
        assert!(rating().validate().is_ok());
    }

    #[test]
    fn test_missing_slug() {
        let r = Rating {
            slug: String::new(),
            ..rating()
        };
        assert_eq!(r.validate().unwrap_err().reason(), "rating must contain the slug");
    }

    #[test]
    fn test_each_score_is_bounded() {
        for idx in 0..5 {
            for bad in [RATING_MIN - 1, RATING_MAX + 1] {
                let mut r = rating();
                match idx {
                    0 => r.overall = bad,
                    1 => r.quality = bad,
                    2 => r.description = bad,
                    3 => r.delivery_speed = bad,
                    _ => r.customer_service = bad,
                }
                assert_eq!(
                    r.validate().unwrap_err().reason(),
                    "rating values must be between 1 and 5"
                );
            }
        }
    }

    #[test]
    fn test_review_cap_counts_characters() {
        let at_cap = Rating {
            review: "é".repeat(REVIEW_MAX_CHARACTERS),
            ..rating()
        };
        assert!(at_cap.validate().is_ok());

        let over = Rating {
            review: "a".repeat(REVIEW_MAX_CHARACTERS + 1),
            ..rating()
        };
        assert_eq!(over.validate().unwrap_err().reason(), "too many characters in review");
    }

    #[test]
    fn test_ratings_deserialize_with_missing_fields() {
        let body = serde_json::json!({
            "orderId": "QmOrder",
            "ratings": [{"slug": "mug", "overall": 5}]
        });
        let parsed: OrderRatings = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.ratings[0].quality, 0);
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn test_split() {
        assert!(validate_split(70.0, 30.0).is_ok());
        assert!(validate_split(100.0, 0.0).is_ok());
        assert!(validate_split(60.0, 30.0).is_err());
        assert!(validate_split(120.0, -20.0).is_err());
    }
}
