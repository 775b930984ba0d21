//! Down-sampling of monthly schedules into coarser reporting buckets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::schedule::AmortizationSchedule;
use crate::types::Money;

/// Reporting granularity for schedule summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryInterval {
    Monthly,
    Quarterly,
    Yearly,
}

impl SummaryInterval {
    pub fn months_per_bucket(&self) -> u32 {
        match self {
            SummaryInterval::Monthly => 1,
            SummaryInterval::Quarterly => 3,
            SummaryInterval::Yearly => 12,
        }
    }
}

impl std::fmt::Display for SummaryInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        };
        write!(f, "{}", s)
    }
}

/// One aggregated bucket of a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePoint {
    /// "Month 7", "Q3", "Year 2", from the bucket's last period.
    pub label: String,
    /// Last month number covered by this bucket.
    pub period_end: u32,
    /// Principal paid within the bucket.
    pub principal_paid: Money,
    /// Interest paid within the bucket.
    pub interest_paid: Money,
    /// Balance at bucket end (point-in-time, not summed).
    pub remaining_balance: Money,
    /// Total interest paid through bucket end (point-in-time).
    pub cumulative_interest: Money,
}

/// Group consecutive periods into buckets of 1/3/12 months.
///
/// The trailing bucket may cover fewer months when the term does not divide
/// evenly. An empty schedule summarizes to an empty list.
pub fn summarize_schedule(
    schedule: &AmortizationSchedule,
    interval: SummaryInterval,
) -> Vec<SchedulePoint> {
    if schedule.periods.is_empty() {
        return Vec::new();
    }

    let bucket = interval.months_per_bucket() as usize;
    let mut points = Vec::with_capacity(schedule.periods.len() / bucket + 1);

    for group in schedule.periods.chunks(bucket) {
        let last = match group.last() {
            Some(period) => period,
            None => continue,
        };

        let principal_paid: Money = group.iter().map(|p| p.principal).sum();
        let interest_paid: Money = group.iter().map(|p| p.interest).sum();

        let label = match interval {
            SummaryInterval::Monthly => format!("Month {}", last.period),
            SummaryInterval::Quarterly => format!("Q{}", (last.period - 1) / 3 + 1),
            SummaryInterval::Yearly => format!("Year {}", (last.period - 1) / 12 + 1),
        };

        points.push(SchedulePoint {
            label,
            period_end: last.period,
            principal_paid,
            interest_paid,
            remaining_balance: last.remaining_balance,
            cumulative_interest: last.cumulative_interest,
        });
    }

    points
}
