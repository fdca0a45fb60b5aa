use anyhow::{Context, Result, anyhow};
use pathfinding::prelude::bfs;

use crate::{
    objects::machine::Machine,
    optimisation_algorithms::{linear_system::LinearSystem, search_parameters::SearchParameters},
};

pub trait ButtonPresses {
    /**
     * Returns a shortest sequence of buttons (by index) that, starting with all lights off, toggles the lights into the
     * target pattern.
     */
    fn presses_to_target(&self) -> Result<Vec<usize>>;

    /**
     * The counters x buttons matrix, with a 1 where the button affects the counter.
     */
    fn button_matrix(&self) -> Vec<Vec<i64>>;

    /**
     * Returns the fewest total number of presses that bring every counter from zero to its joltage requirement, and
     * how often each button is pressed.
     */
    fn presses_to_joltage(&self, parameters: &SearchParameters) -> Result<(u64, Vec<u64>)>;
}

impl ButtonPresses for Machine {
    fn presses_to_target(&self) -> Result<Vec<usize>> {
        let states = bfs(
            &0u64,
            |state| {
                let state = *state;
                self.buttons.iter().map(move |button| state ^ button)
            },
            |state| *state == self.target,
        )
        .ok_or_else(|| anyhow!("light pattern of {} cannot be reached", self))?;

        //recover which button was pressed between consecutive states
        states
            .windows(2)
            .map(|step| {
                let toggled = step[0] ^ step[1];
                self.buttons
                    .iter()
                    .position(|button| *button == toggled)
                    .ok_or_else(|| anyhow!("no button toggles {:#b}", toggled))
            })
            .collect()
    }

    fn button_matrix(&self) -> Vec<Vec<i64>> {
        (0..self.get_number_of_counters())
            .map(|counter| {
                self.buttons
                    .iter()
                    .map(|button| (button >> counter & 1) as i64)
                    .collect()
            })
            .collect()
    }

    fn presses_to_joltage(&self, parameters: &SearchParameters) -> Result<(u64, Vec<u64>)> {
        let system = LinearSystem::new(&self.button_matrix(), &self.joltage)?;
        let presses = system
            .solve_with(parameters)
            .with_context(|| format!("machine {}", self))?
            .ok_or_else(|| anyhow!("joltage requirements of {} cannot be met", self))?;
        log::debug!("{} needs presses {:?}", self, presses);
        Ok((presses.iter().sum(), presses))
    }
}
