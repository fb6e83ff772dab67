use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{AppError, Result};

/// Named sale type / tax tier.
///
/// The set is closed: anything the service or a form sends that is not one of
/// these is a configuration error, never silently mapped to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxTier {
    #[serde(rename = "Central - 5%", alias = "5%")]
    Central5,
    #[serde(rename = "Central - 18%", alias = "18%")]
    Central18,
    #[serde(rename = "Central - 28%", alias = "28%")]
    Central28,
}

impl TaxTier {
    pub const ALL: [TaxTier; 3] = [TaxTier::Central5, TaxTier::Central18, TaxTier::Central28];

    /// Rate in percent
    pub fn rate(&self) -> Decimal {
        match self {
            TaxTier::Central5 => Decimal::from(5),
            TaxTier::Central18 => Decimal::from(18),
            TaxTier::Central28 => Decimal::from(28),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxTier::Central5 => "Central - 5%",
            TaxTier::Central18 => "Central - 18%",
            TaxTier::Central28 => "Central - 28%",
        }
    }

    /// Tier whose rate equals `rate` percent
    pub fn from_rate(rate: Decimal) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.rate() == rate)
            .ok_or_else(|| {
                AppError::configuration(format!("Unrecognized tax rate: {}%", rate.normalize()))
            })
    }
}

impl Default for TaxTier {
    fn default() -> Self {
        TaxTier::Central18
    }
}

impl fmt::Display for TaxTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaxTier {
    type Err = AppError;

    /// Accepts the full label (`Central - 18%`), a bare percentage (`18%`) or
    /// a bare number (`18`).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(tier) = Self::ALL
            .into_iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(trimmed))
        {
            return Ok(tier);
        }

        let bare = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        let rate = Decimal::from_str(bare)
            .map_err(|_| AppError::configuration(format!("Unrecognized tax tier: {}", s)))?;
        Self::from_rate(rate)
            .map_err(|_| AppError::configuration(format!("Unrecognized tax tier: {}", s)))
    }
}

/// How tax is applied to an invoice.
///
/// The two variants are not interchangeable: identical lines give different
/// totals under each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxPolicy {
    /// Every line carries the tier chosen when it was added
    #[default]
    PerLine,
    /// One tier for the whole invoice, applied to the subtotal
    PerInvoice,
}

impl fmt::Display for TaxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxPolicy::PerLine => write!(f, "per_line"),
            TaxPolicy::PerInvoice => write!(f, "per_invoice"),
        }
    }
}
