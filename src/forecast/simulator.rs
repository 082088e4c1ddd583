//! Year-by-year reserve fund simulation

use log::debug;

use super::result::{ForecastedReplacement, YearBalance};
use super::scheduler::offset_year;

/// Financial assumptions driving the reserve ledger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub investment_rate: f64,
    pub annual_deposit: f64,
    pub initial_balance: f64,
    pub horizon_years: u32,
    pub current_year: i32,
}

/// Simulated balance trajectory and period totals
#[derive(Debug, Clone, PartialEq)]
pub struct ReserveLedger {
    pub years: Vec<YearBalance>,
    pub total_deposits: f64,
    pub total_expenses: f64,
    pub final_balance: f64,
}

/// Walks the horizon one year at a time. Each year depends only on the
/// previous year's closing balance, so the loop is strictly sequential.
#[derive(Debug, Clone)]
pub struct ReserveSimulator {
    params: SimulationParams,
}

impl ReserveSimulator {
    pub fn new(params: SimulationParams) -> Self {
        Self { params }
    }

    /// Years with a ledger row: `current_year .. current_year + horizon_years`
    pub fn simulated_years(&self) -> std::ops::Range<i32> {
        let start = self.params.current_year;
        start..offset_year(start, self.params.horizon_years)
    }

    /// Ledger row a replacement is charged to. Replacements due in the
    /// horizon's boundary year land in the final simulated year.
    fn ledger_index(&self, year: i32) -> Option<usize> {
        let offset = i64::from(year) - i64::from(self.params.current_year);
        let horizon = i64::from(self.params.horizon_years);
        if horizon == 0 || offset < 0 || offset > horizon {
            return None;
        }
        usize::try_from(offset.min(horizon - 1)).ok()
    }

    pub fn simulate(&self, replacements: &[ForecastedReplacement]) -> ReserveLedger {
        let p = &self.params;
        let rows = p.horizon_years as usize;

        let mut expenses = vec![0.0; rows];
        let mut counts = vec![0usize; rows];
        let mut overdue_counts = vec![0usize; rows];
        for replacement in replacements {
            match self.ledger_index(replacement.year) {
                Some(idx) => {
                    expenses[idx] += replacement.cost;
                    counts[idx] += 1;
                    if replacement.is_overdue {
                        overdue_counts[idx] += 1;
                    }
                }
                None => debug!(
                    "replacement for {} in {} is outside the simulated horizon",
                    replacement.asset_id, replacement.year
                ),
            }
        }

        let mut years = Vec::with_capacity(rows);
        let mut balance = p.initial_balance;
        let mut deposits_to_date = 0.0;
        let mut expenses_to_date = 0.0;

        for (idx, year) in self.simulated_years().enumerate() {
            let opening = balance;

            // Growth on the balance as it stood at year start
            let grown = opening * (1.0 + p.investment_rate);
            // Deposit, then this year's withdrawals. No clamping at zero.
            balance = grown + p.annual_deposit - expenses[idx];

            deposits_to_date += p.annual_deposit;
            expenses_to_date += expenses[idx];

            years.push(YearBalance {
                year,
                opening_balance: opening,
                investment_growth: grown - opening,
                deposit: p.annual_deposit,
                expenses: expenses[idx],
                closing_balance: balance,
                is_negative: balance < 0.0,
                is_underfunded: deposits_to_date < expenses_to_date,
                replacement_count: counts[idx],
                overdue_replacement_count: overdue_counts[idx],
            });
        }

        ReserveLedger {
            years,
            total_deposits: p.annual_deposit * p.horizon_years as f64,
            total_expenses: expenses.iter().sum(),
            final_balance: balance,
        }
    }
}

/// Simulate the reserve balance over the horizon for an already-scheduled
/// set of replacements
pub fn simulate(
    replacements: &[ForecastedReplacement],
    investment_rate: f64,
    annual_deposit: f64,
    initial_balance: f64,
    horizon_years: u32,
    current_year: i32,
) -> ReserveLedger {
    ReserveSimulator::new(SimulationParams {
        investment_rate,
        annual_deposit,
        initial_balance,
        horizon_years,
        current_year,
    })
    .simulate(replacements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn replacement(year: i32, cost: f64) -> ForecastedReplacement {
        ForecastedReplacement {
            year,
            cost,
            asset_id: format!("A-{}", year),
            asset_name: "Roof".to_string(),
            unit: "1".to_string(),
            community: "Maple Court".to_string(),
            category: "Roofing".to_string(),
            is_overdue: false,
        }
    }

    #[test]
    fn test_growth_only() {
        let ledger = simulate(&[], 0.005, 0.0, 10_000.0, 3, 2024);

        let balances: Vec<_> = ledger.years.iter().map(|y| y.closing_balance).collect();
        assert_eq!(balances.len(), 3);
        assert_abs_diff_eq!(balances[0], 10_050.00, epsilon = 0.005);
        assert_abs_diff_eq!(balances[1], 10_100.25, epsilon = 0.005);
        assert_abs_diff_eq!(balances[2], 10_150.75, epsilon = 0.005);
        assert_eq!(ledger.final_balance, balances[2]);
    }

    #[test]
    fn test_balance_recursion() {
        let replacements = vec![replacement(2025, 4_000.0), replacement(2027, 9_500.0)];
        let ledger = simulate(&replacements, 0.02, 3_000.0, 5_000.0, 5, 2024);

        let mut previous = 5_000.0;
        for row in &ledger.years {
            let expected = previous * (1.0 + 0.02) + 3_000.0 - row.expenses;
            assert_eq!(row.closing_balance, expected);
            assert_eq!(row.opening_balance, previous);
            previous = row.closing_balance;
        }
        assert_eq!(ledger.years[1].expenses, 4_000.0);
        assert_eq!(ledger.years[3].expenses, 9_500.0);
    }

    #[test]
    fn test_deposit_conservation() {
        for horizon in [1, 5, 10, 15] {
            let ledger = simulate(&[], 0.01, 1_234.56, 0.0, horizon, 2024);
            assert_eq!(ledger.total_deposits, 1_234.56 * horizon as f64);
            assert_eq!(ledger.years.len(), horizon as usize);
        }
    }

    #[test]
    fn test_balance_may_go_negative() {
        let ledger = simulate(&[replacement(2024, 50_000.0)], 0.0, 1_000.0, 10_000.0, 2, 2024);
        assert_eq!(ledger.years[0].closing_balance, -39_000.0);
        assert!(ledger.years[0].is_negative);
        assert_eq!(ledger.final_balance, -38_000.0);
        assert_eq!(ledger.total_expenses, 50_000.0);
    }

    #[test]
    fn test_per_year_flags() {
        // Starting balance covers the 2025 roof before deposits have caught up
        let replacements = vec![replacement(2025, 3_000.0), replacement(2027, 20_000.0)];
        let ledger = simulate(&replacements, 0.0, 1_000.0, 5_000.0, 5, 2024);

        let negative: Vec<_> = ledger.years.iter().map(|y| y.is_negative).collect();
        let underfunded: Vec<_> = ledger.years.iter().map(|y| y.is_underfunded).collect();
        assert_eq!(negative, [false, false, false, true, true]);
        assert_eq!(underfunded, [false, true, false, true, true]);

        assert_eq!(ledger.years[1].closing_balance, 4_000.0);
        assert_eq!(ledger.years[3].closing_balance, -14_000.0);
    }

    #[test]
    fn test_deposits_catch_up_clears_underfunded() {
        let ledger = simulate(&[replacement(2024, 2_500.0)], 0.0, 1_000.0, 0.0, 4, 2024);
        let underfunded: Vec<_> = ledger.years.iter().map(|y| y.is_underfunded).collect();
        assert_eq!(underfunded, [true, true, false, false]);
        assert!(ledger.years[0].is_negative);
        assert!(!ledger.years[2].is_negative);
    }

    #[test]
    fn test_ledger_years_saturate_at_range_end() {
        let ledger = simulate(&[replacement(i32::MAX - 1, 10.0)], 0.0, 0.0, 100.0, 3, i32::MAX - 2);
        assert_eq!(ledger.years.len(), 2);
        assert_eq!(ledger.years[1].year, i32::MAX - 1);
        assert_eq!(ledger.total_expenses, 10.0);
    }

    #[test]
    fn test_negative_opening_balance_compounds() {
        let ledger = simulate(&[], 0.10, 0.0, -1_000.0, 1, 2024);
        assert_relative_eq!(ledger.final_balance, -1_100.0);
    }

    #[test]
    fn test_boundary_year_charged_to_final_year() {
        let replacements = vec![replacement(2024, 100.0), replacement(2029, 250.0)];
        let ledger = simulate(&replacements, 0.0, 0.0, 1_000.0, 5, 2024);

        assert_eq!(ledger.years.last().unwrap().year, 2028);
        assert_eq!(ledger.years[0].expenses, 100.0);
        assert_eq!(ledger.years[4].expenses, 250.0);
        assert_eq!(ledger.total_expenses, 350.0);
        assert_eq!(ledger.final_balance, 650.0);
    }

    #[test]
    fn test_out_of_range_replacements_ignored() {
        let replacements = vec![replacement(2023, 100.0), replacement(2031, 100.0)];
        let ledger = simulate(&replacements, 0.0, 0.0, 1_000.0, 5, 2024);
        assert_eq!(ledger.total_expenses, 0.0);
        assert_eq!(ledger.final_balance, 1_000.0);
    }

    #[test]
    fn test_deterministic() {
        let replacements = vec![replacement(2026, 777.77), replacement(2030, 123.45)];
        let a = simulate(&replacements, 0.0375, 2_500.0, 12_345.67, 10, 2024);
        let b = simulate(&replacements, 0.0375, 2_500.0, 12_345.67, 10, 2024);
        assert_eq!(a, b);
    }
}
