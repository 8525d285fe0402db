//! The node's own profile and moderator settings.

use super::errors::DiscoveryError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    Fixed,
    Percentage,
    FixedPlusPercentage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedFee {
    pub currency_code: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratorFee {
    pub fee_type: FeeType,
    #[serde(default)]
    pub fixed_fee: Option<FixedFee>,
    #[serde(default)]
    pub percentage: f32,
}

impl ModeratorFee {
    fn validate(&self) -> Result<(), DiscoveryError> {
        let needs_fixed = matches!(self.fee_type, FeeType::Fixed | FeeType::FixedPlusPercentage);
        let needs_pct = matches!(
            self.fee_type,
            FeeType::Percentage | FeeType::FixedPlusPercentage
        );

        if needs_fixed {
            match &self.fixed_fee {
                Some(fee) if !fee.currency_code.is_empty() => {}
                _ => {
                    return Err(DiscoveryError::InvalidModeratorInfo(
                        "fixed fee requires a currency and amount".to_string(),
                    ))
                }
            }
        }
        if needs_pct && !(self.percentage > 0.0 && self.percentage <= 100.0) {
            return Err(DiscoveryError::InvalidModeratorInfo(
                "fee percentage must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }
}

/// Terms a moderator publishes with its profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratorInfo {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub terms_and_conditions: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub accepted_currencies: Vec<String>,
    #[serde(default)]
    pub fee: Option<ModeratorFee>,
}

impl ModeratorInfo {
    pub fn validate(&self) -> Result<(), DiscoveryError> {
        if self.description.trim().is_empty() {
            return Err(DiscoveryError::InvalidModeratorInfo(
                "moderator description is required".to_string(),
            ));
        }
        self.fee
            .as_ref()
            .ok_or_else(|| {
                DiscoveryError::InvalidModeratorInfo("moderator fee is required".to_string())
            })?
            .validate()
    }
}

/// The parts of the node profile moderator registration touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub peer_id: String,
    pub name: String,
    #[serde(default)]
    pub moderator: bool,
    #[serde(default)]
    pub mod_info: Option<ModeratorInfo>,
}
