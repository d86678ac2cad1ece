//! Target evaluation.
//!
//! Turns an accumulated commission total and a monthly target into a
//! percentage (one decimal place, half away from zero) and a status band.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{TargetEvaluation, TargetStatus};

/// Lower bound of the "Meta Atingida" band, in percent.
pub const TARGET_REACHED_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Lower bound of the "Próxima da Meta" band, in percent.
pub const NEAR_TARGET_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Computes the percentage of target reached, rounded to one decimal place.
///
/// A zero (or negative) target yields zero. A percentage too large for
/// [`Decimal`] saturates at [`Decimal::MAX`].
///
/// # Example
///
/// ```
/// use sales_engine::ingestion::target_percentage;
/// use rust_decimal::Decimal;
///
/// // 11.81 / 2000 * 100 = 0.5905
/// let pct = target_percentage(Decimal::new(1181, 2), Decimal::from(2000));
/// assert_eq!(pct, Decimal::new(6, 1));
/// ```
pub fn target_percentage(accumulated_total: Decimal, monthly_target: Decimal) -> Decimal {
    if monthly_target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    accumulated_total
        .checked_div(monthly_target)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Classifies a percentage. Each band includes its lower bound.
///
/// # Example
///
/// ```
/// use sales_engine::ingestion::classify;
/// use sales_engine::models::TargetStatus;
/// use rust_decimal::Decimal;
///
/// assert_eq!(classify(Decimal::new(800, 1)), TargetStatus::NearTarget);
/// assert_eq!(classify(Decimal::new(799, 1)), TargetStatus::BelowTarget);
/// ```
pub fn classify(percentage: Decimal) -> TargetStatus {
    if percentage >= TARGET_REACHED_THRESHOLD {
        TargetStatus::TargetReached
    } else if percentage >= NEAR_TARGET_THRESHOLD {
        TargetStatus::NearTarget
    } else {
        TargetStatus::BelowTarget
    }
}

/// Evaluates an accumulated total against its monthly target.
///
/// The status is classified on the rounded percentage, not the unrounded
/// ratio: 79.95% is "Próxima da Meta" even though it is below 80.
pub fn evaluate(accumulated_total: Decimal, monthly_target: Decimal) -> TargetEvaluation {
    let percentage = target_percentage(accumulated_total, monthly_target);
    TargetEvaluation {
        percentage,
        status: classify(percentage),
    }
}
