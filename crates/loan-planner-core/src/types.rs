use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%) unless a field says "percent".
pub type Rate = Decimal;

// ---------------------------------------------------------------------------
// Loan categories
// ---------------------------------------------------------------------------

/// The six categories the upstream intent classifier can resolve to.
///
/// Anything it did not recognize arrives as `Unknown`, and `parse` maps any
/// unrecognized string there as well, so category handling never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanCategory {
    Mortgage,
    Personal,
    Auto,
    Student,
    Business,
    #[default]
    Unknown,
}

impl LoanCategory {
    pub const ALL: [LoanCategory; 6] = [
        LoanCategory::Mortgage,
        LoanCategory::Personal,
        LoanCategory::Auto,
        LoanCategory::Student,
        LoanCategory::Business,
        LoanCategory::Unknown,
    ];

    /// Total parse: unrecognized names fall back to `Unknown`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "mortgage" => LoanCategory::Mortgage,
            "personal" => LoanCategory::Personal,
            "auto" => LoanCategory::Auto,
            "student" => LoanCategory::Student,
            "business" => LoanCategory::Business,
            _ => LoanCategory::Unknown,
        }
    }

    /// Default term/rate configuration for this category.
    pub fn profile(&self) -> &'static CategoryProfile {
        match self {
            LoanCategory::Mortgage => &MORTGAGE_PROFILE,
            LoanCategory::Personal => &PERSONAL_PROFILE,
            LoanCategory::Auto => &AUTO_PROFILE,
            LoanCategory::Student => &STUDENT_PROFILE,
            LoanCategory::Business => &BUSINESS_PROFILE,
            LoanCategory::Unknown => &UNKNOWN_PROFILE,
        }
    }
}

impl std::fmt::Display for LoanCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Mortgage => "mortgage",
            Self::Personal => "personal",
            Self::Auto => "auto",
            Self::Student => "student",
            Self::Business => "business",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl<'de> Deserialize<'de> for LoanCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(LoanCategory::parse(&raw))
    }
}

/// Per-category planning defaults. The term options drive plan generation;
/// the default term and rate drive metric estimation when the caller gives
/// no override.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryProfile {
    pub term_options: &'static [u32],
    pub default_rate: Rate,
    pub default_term_years: u32,
}

const MORTGAGE_PROFILE: CategoryProfile = CategoryProfile {
    term_options: &[15, 20, 25, 30],
    default_rate: dec!(0.035),
    default_term_years: 20,
};

const PERSONAL_PROFILE: CategoryProfile = CategoryProfile {
    term_options: &[3, 5, 7],
    default_rate: dec!(0.07),
    default_term_years: 5,
};

const AUTO_PROFILE: CategoryProfile = CategoryProfile {
    term_options: &[3, 5, 7],
    default_rate: dec!(0.05),
    default_term_years: 5,
};

const STUDENT_PROFILE: CategoryProfile = CategoryProfile {
    term_options: &[10, 15, 20],
    default_rate: dec!(0.04),
    default_term_years: 10,
};

const BUSINESS_PROFILE: CategoryProfile = CategoryProfile {
    term_options: &[5, 10, 15],
    default_rate: dec!(0.06),
    default_term_years: 5,
};

const UNKNOWN_PROFILE: CategoryProfile = CategoryProfile {
    term_options: &[5, 10, 15],
    default_rate: dec!(0.06),
    default_term_years: 5,
};

// ---------------------------------------------------------------------------
// Borrower inputs
// ---------------------------------------------------------------------------

/// The raw financial record collected upstream. Absent fields read as zero;
/// negative values pass through untouched (callers enforce non-negativity).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialProfile {
    /// Primary monthly income. Payment ratios are computed against this
    /// field alone, not against total income.
    pub monthly_income: Money,
    /// Additional monthly income (rent, dividends, ...).
    pub other_income: Money,
    /// Regular living expenses per month.
    pub monthly_expenses: Money,
    /// Payments on loans already being serviced.
    pub existing_loan_payments: Money,
    /// Current savings balance.
    pub savings: Money,
    /// Desired loan amount, before any down payment.
    pub loan_amount: Money,
}
