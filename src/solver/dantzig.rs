// Greedy knapsack heuristics based on Dantzig's ratio rule

use crate::domain::{
    models::{Instance, Solution},
    solver_service::{KnapsackSolver, Result},
    value_objects::Method,
};

/// Item indices ordered by profit/weight ratio, best first.
///
/// The sort is stable: items with equal ratios keep their original index
/// order, which fixes which of them ends up as the split item.
pub fn ratio_order(instance: &Instance) -> Vec<usize> {
    let mut order: Vec<usize> = (0..instance.item_count()).collect();
    order.sort_by(|&a, &b| instance.ratio(b).total_cmp(&instance.ratio(a)));
    order
}

/// Optimal solution of the LP relaxation.
///
/// Items are packed whole in ratio order until one does not fit; that split
/// item gets the fraction of it that fills the remaining capacity and every
/// item after it stays out.
pub struct RelaxedDantzig;

impl RelaxedDantzig {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RelaxedDantzig {
    fn default() -> Self {
        Self::new()
    }
}

impl KnapsackSolver for RelaxedDantzig {
    fn solve(&self, instance: &Instance) -> Result<Solution> {
        let weights = instance.weights();
        let capacity = instance.capacity();

        let mut assignment = vec![0.0; instance.item_count()];
        let mut used_capacity = 0.0;

        for i in ratio_order(instance) {
            if used_capacity + weights[i] <= capacity {
                assignment[i] = 1.0;
                used_capacity += weights[i];
            } else {
                assignment[i] = (capacity - used_capacity) / weights[i];
                break;
            }
        }

        Ok(Solution::from_assignment(instance, assignment))
    }

    fn method(&self) -> Method {
        Method::RelaxedDantzig
    }
}

/// Feasible 0/1 solution obtained by flooring the relaxed solution, which
/// drops the split item.
pub struct ViableDantzig {
    relaxed: RelaxedDantzig,
}

impl ViableDantzig {
    pub fn new() -> Self {
        Self {
            relaxed: RelaxedDantzig::new(),
        }
    }
}

impl Default for ViableDantzig {
    fn default() -> Self {
        Self::new()
    }
}

impl KnapsackSolver for ViableDantzig {
    fn solve(&self, instance: &Instance) -> Result<Solution> {
        let relaxed = self.relaxed.solve(instance)?;
        let assignment = relaxed.assignment.into_iter().map(f64::floor).collect();

        // objective recomputed from the floored assignment
        Ok(Solution::from_assignment(instance, assignment))
    }

    fn method(&self) -> Method {
        Method::ViableDantzig
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn instance(profits: &[f64], capacity: f64, weights: &[f64]) -> Instance {
        Instance::new(profits.to_vec(), capacity, weights.to_vec()).unwrap()
    }

    #[test]
    fn single_item_that_fits() {
        let inst = instance(&[10.0], 5.0, &[5.0]);

        let relaxed = RelaxedDantzig::new().solve(&inst).unwrap();
        let viable = ViableDantzig::new().solve(&inst).unwrap();

        assert_eq!(relaxed.assignment, vec![1.0]);
        assert_eq!(relaxed.objective_value, 10.0);
        assert_eq!(viable, relaxed);
    }

    #[test]
    fn heavy_item_gets_zero_split() {
        let inst = instance(&[10.0, 10.0], 5.0, &[10.0, 5.0]);

        let relaxed = RelaxedDantzig::new().solve(&inst).unwrap();
        assert_eq!(relaxed.assignment, vec![0.0, 1.0]);
        assert_eq!(relaxed.objective_value, 10.0);

        let viable = ViableDantzig::new().solve(&inst).unwrap();
        assert_eq!(viable.assignment, vec![0.0, 1.0]);
        assert_eq!(viable.objective_value, 10.0);
    }

    #[test]
    fn textbook_instance() {
        let inst = instance(&[60.0, 100.0, 120.0], 50.0, &[10.0, 20.0, 30.0]);

        let relaxed = RelaxedDantzig::new().solve(&inst).unwrap();
        assert_eq!(relaxed.assignment[..2], [1.0, 1.0]);
        assert_relative_eq!(relaxed.assignment[2], 2.0 / 3.0);
        assert_relative_eq!(relaxed.objective_value, 240.0);
        assert_eq!(relaxed.fractional_items(), vec![2]);

        let viable = ViableDantzig::new().solve(&inst).unwrap();
        assert_eq!(viable.assignment, vec![1.0, 1.0, 0.0]);
        assert_eq!(viable.objective_value, 160.0);
        assert!(viable.is_feasible(&inst));
    }

    #[test]
    fn equal_ratios_keep_index_order() {
        // all ratios are 2; items 0 and 1 fit, item 2 is split
        let inst = instance(&[4.0, 4.0, 4.0], 5.0, &[2.0, 2.0, 2.0]);

        assert_eq!(ratio_order(&inst), vec![0, 1, 2]);
        let relaxed = RelaxedDantzig::new().solve(&inst).unwrap();
        assert_eq!(relaxed.assignment, vec![1.0, 1.0, 0.5]);
    }

    #[test]
    fn items_after_split_stay_out() {
        // item 1 is split, item 2 would still fit but is never considered
        let inst = instance(&[30.0, 20.0, 1.0], 12.0, &[10.0, 10.0, 1.0]);

        let relaxed = RelaxedDantzig::new().solve(&inst).unwrap();
        assert_eq!(relaxed.assignment, vec![1.0, 0.2, 0.0]);
        assert_relative_eq!(relaxed.objective_value, 34.0);
    }

    #[test]
    fn zero_capacity_packs_nothing() {
        let inst = instance(&[3.0, 5.0], 0.0, &[1.0, 2.0]);

        let relaxed = RelaxedDantzig::new().solve(&inst).unwrap();
        assert_eq!(relaxed.assignment, vec![0.0, 0.0]);
        assert_eq!(relaxed.objective_value, 0.0);
    }

    #[test]
    fn everything_fits_without_split() {
        let inst = instance(&[1.0, 2.0, 3.0], 100.0, &[1.0, 1.0, 1.0]);

        let relaxed = RelaxedDantzig::new().solve(&inst).unwrap();
        assert!(relaxed.is_integral());
        assert_eq!(relaxed.objective_value, 6.0);
    }

    #[test]
    fn repeated_solves_are_identical() {
        let inst = instance(
            &[12.0, 7.0, 9.0, 7.0, 3.0, 14.0],
            17.0,
            &[4.0, 2.0, 3.0, 2.0, 1.0, 6.0],
        );
        let first = RelaxedDantzig::new().solve(&inst).unwrap();
        for _ in 0..10 {
            let again = RelaxedDantzig::new().solve(&inst).unwrap();
            assert_eq!(again.assignment, first.assignment);
            assert_eq!(
                again.objective_value.to_bits(),
                first.objective_value.to_bits()
            );
        }
    }

    #[test]
    fn relaxed_bounds_viable() {
        let inst = instance(
            &[92.0, 57.0, 49.0, 68.0, 60.0, 43.0, 67.0, 84.0, 87.0, 72.0],
            269.0,
            &[23.0, 31.0, 29.0, 44.0, 53.0, 38.0, 63.0, 85.0, 89.0, 82.0],
        );

        let relaxed = RelaxedDantzig::new().solve(&inst).unwrap();
        let viable = ViableDantzig::new().solve(&inst).unwrap();

        assert!(relaxed.fractional_items().len() <= 1);
        assert!(relaxed.objective_value >= viable.objective_value);
        assert!(viable.is_integral());
        assert!(viable.is_feasible(&inst));
    }
}
