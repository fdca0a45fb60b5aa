use anyhow::{Result, anyhow};
use log::{debug, trace};
use std::time::Instant;

use crate::optimisation_algorithms::{
    back_substitution::back_substitute, free_variable_bounds::SearchSpace,
    search_parameters::SearchParameters,
};

const TIME_CHECK_INTERVAL: u64 = 1024;

/**
 * Depth-first search over the free variables of a reduced system, minimising sum(x).
 *
 * Each level assigns one free variable, trying the values of its derived range cheapest first. A node is pruned as
 * soon as the free variables assigned so far already sum to at least the best solution found, as pivot variables
 * are non-negative.
 */
pub struct BranchAndBound<'a> {
    space: SearchSpace<'a>,
    parameters: &'a SearchParameters,
    assigned: Vec<i128>,
    assigned_sum: i128,
    best: Option<(i128, Vec<i128>)>,
    nodes: u64,
    started: Instant,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(space: SearchSpace<'a>, parameters: &'a SearchParameters) -> Self {
        Self {
            assigned: Vec::with_capacity(space.number_of_free_columns()),
            space,
            parameters,
            assigned_sum: 0,
            best: None,
            nodes: 0,
            started: Instant::now(),
        }
    }

    /// Returns the solution with the smallest sum, if there is one.
    pub fn run(mut self) -> Result<Option<Vec<i128>>> {
        debug!(
            "starting branch&bound over {} free variables, fallback bound {}",
            self.space.number_of_free_columns(),
            self.space.fallback_upper_bound
        );

        self.descend(0)?;

        match &self.best {
            Some((sum, _)) => debug!("search done after {} nodes, best sum {}", self.nodes, sum),
            None => debug!("search done after {} nodes, no solution", self.nodes),
        }
        Ok(self.best.map(|(_, solution)| solution))
    }

    /// Returns whether some complete assignment below this node was valid, regardless of whether it improved on the best.
    fn descend(&mut self, depth: usize) -> Result<bool> {
        self.visit()?;

        if self.is_dominated(self.assigned_sum) {
            return Ok(false);
        }

        if depth == self.space.number_of_free_columns() {
            return self.complete();
        }

        let range = match self.space.range_of(depth, &self.assigned)? {
            Some(range) => range,
            None => return Ok(false),
        };
        let is_last = depth + 1 == self.space.number_of_free_columns();

        let mut found = false;
        for (tried, value) in range.values().enumerate() {
            //on the last free variable the range keeps every pivot non-negative, so only integrality can fail, and
            //that repeats every period
            if is_last && !found && tried as i128 >= range.period {
                break;
            }

            if range.scans_upwards() && self.is_dominated(self.assigned_sum + value) {
                //all further values are larger
                break;
            }

            self.assigned.push(value);
            self.assigned_sum += value;
            let result = self.descend(depth + 1);
            self.assigned.pop();
            self.assigned_sum -= value;

            let valid = result?;
            found |= valid;

            //on the last free variable the sum is affine in the value, so the first valid value is the cheapest
            if valid && is_last && range.scans_upwards() {
                break;
            }
        }

        Ok(found)
    }

    fn complete(&mut self) -> Result<bool> {
        let space = &self.space;
        let mut values = vec![0; space.reduced.get_number_of_coefficient_columns()];
        for (column, value) in space.free_columns.iter().zip(&self.assigned) {
            values[*column] = *value;
        }

        let solution = match back_substitute(space.reduced, space.pivots, values)? {
            Some(solution) => solution,
            None => return Ok(false),
        };

        let sum = solution.iter().sum();
        if !self.is_dominated(sum) {
            trace!(
                "[node {} (search depth {})] found new best solution, sum: {}",
                self.nodes,
                self.assigned.len(),
                sum
            );
            self.best = Some((sum, solution));
        }
        Ok(true)
    }

    fn is_dominated(&self, sum: i128) -> bool {
        match &self.best {
            Some((best, _)) => sum >= *best,
            None => false,
        }
    }

    fn visit(&mut self) -> Result<()> {
        self.nodes += 1;

        if let Some(budget) = self.parameters.node_budget {
            if self.nodes > budget {
                return Err(anyhow!(
                    "search exceeded its budget of {} nodes",
                    budget
                ));
            }
        }

        if let Some(limit) = self.parameters.time_limit {
            if self.nodes % TIME_CHECK_INTERVAL == 1 && self.started.elapsed() >= limit {
                return Err(anyhow!(
                    "search exceeded its time limit of {:?} after {} nodes",
                    limit,
                    self.nodes
                ));
            }
        }

        Ok(())
    }
}
