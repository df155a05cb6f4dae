use super::types::{AllocationEntry, Investment, InvestmentSummary};

impl Investment {
    pub fn invested_value(&self) -> f64 {
        self.purchase_price * self.quantity as f64
    }

    pub fn current_value(&self) -> f64 {
        self.current_price * self.quantity as f64
    }

    pub fn profit(&self) -> f64 {
        self.current_value() - self.invested_value()
    }

    /// Profit as a percentage of the amount invested, 0 for a zero-cost holding.
    pub fn profitability(&self) -> f64 {
        percentage_of(self.profit(), self.invested_value())
    }
}

pub fn summarize_investments(investments: &[Investment]) -> InvestmentSummary {
    let total_invested: f64 = investments.iter().map(Investment::invested_value).sum();
    let total_value: f64 = investments.iter().map(Investment::current_value).sum();
    let total_profit = total_value - total_invested;

    let allocation = investments
        .iter()
        .map(|investment| {
            let current_value = investment.current_value();
            AllocationEntry {
                name: investment.name.clone(),
                current_value,
                percentage: percentage_of(current_value, total_value),
                profitability: investment.profitability(),
            }
        })
        .collect();

    InvestmentSummary {
        total_invested,
        total_value,
        total_profit,
        total_profitability: percentage_of(total_profit, total_invested),
        allocation,
    }
}

fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn holding(name: &str, purchase_price: f64, current_price: f64, quantity: u32) -> Investment {
        Investment {
            name: name.to_string(),
            purchase_price,
            current_price,
            quantity,
        }
    }

    #[test]
    fn empty_collection_is_all_zero() {
        let summary = summarize_investments(&[]);
        assert_eq!(summary.total_invested, 0.0);
        assert_eq!(summary.total_value, 0.0);
        assert_eq!(summary.total_profit, 0.0);
        assert_eq!(summary.total_profitability, 0.0);
        assert!(summary.allocation.is_empty());
    }

    #[test]
    fn totals_and_allocation_match_hand_calculation() {
        let investments = [
            holding("PETR4", 30.0, 36.0, 100),
            holding("TESOURO SELIC", 100.0, 90.0, 10),
        ];
        let summary = summarize_investments(&investments);

        // Invested: 3000 + 1000; value: 3600 + 900.
        assert_close(summary.total_invested, 4_000.0, EPS);
        assert_close(summary.total_value, 4_500.0, EPS);
        assert_close(summary.total_profit, 500.0, EPS);
        assert_close(summary.total_profitability, 12.5, EPS);

        assert_eq!(summary.allocation.len(), 2);
        assert_eq!(summary.allocation[0].name, "PETR4");
        assert_close(summary.allocation[0].percentage, 80.0, EPS);
        assert_close(summary.allocation[0].profitability, 20.0, EPS);
        assert_close(summary.allocation[1].percentage, 20.0, EPS);
        assert_close(summary.allocation[1].profitability, -10.0, EPS);
    }

    #[test]
    fn zero_cost_and_zero_value_do_not_divide_by_zero() {
        let gifted = holding("gift", 0.0, 10.0, 5);
        assert_eq!(gifted.profitability(), 0.0);

        let worthless = [holding("delisted", 10.0, 0.0, 3)];
        let summary = summarize_investments(&worthless);
        assert_close(summary.total_profitability, -100.0, EPS);
        assert_eq!(summary.allocation[0].percentage, 0.0);
    }

    #[test]
    fn zero_quantity_holding_contributes_nothing() {
        let summary = summarize_investments(&[
            holding("sold", 50.0, 70.0, 0),
            holding("kept", 10.0, 11.0, 10),
        ]);
        assert_close(summary.total_value, 110.0, EPS);
        assert_eq!(summary.allocation[0].percentage, 0.0);
        assert_close(summary.allocation[1].percentage, 100.0, EPS);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_allocation_sums_to_one_hundred(
            holdings in vec((0u32..1_000_000, 1u32..1_000_000, 0u32..5_000), 1..12)
        ) {
            let investments: Vec<Investment> = holdings
                .iter()
                .enumerate()
                .map(|(i, (buy, now, qty))| {
                    holding(&format!("h{i}"), *buy as f64 / 100.0, *now as f64 / 100.0, *qty)
                })
                .collect();
            let summary = summarize_investments(&investments);
            prop_assert!(summary.allocation.len() == investments.len());
            prop_assert!(summary.total_profit.is_finite());
            if summary.total_value > 0.0 {
                let total: f64 = summary.allocation.iter().map(|a| a.percentage).sum();
                prop_assert!((total - 100.0).abs() <= 1e-6);
            }
        }
    }
}
