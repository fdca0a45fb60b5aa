use anyhow::{Context, Error, Result, anyhow};
use std::{
    io::{self, BufRead},
    str::FromStr,
};

use crate::{line_reader::LineReader, optimisation_algorithms::linear_system::LinearSystem};

/**
 * A system of linear equations in text form, one equation per line:
 *
 * ```text
 * # comment
 * 1 0 2 = 7
 * 0 1 1 = 3
 * ```
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equations {
    pub coefficients: Vec<Vec<i64>>,
    pub targets: Vec<i64>,
}

impl Equations {
    pub fn import(reader: &mut dyn BufRead) -> Result<Self> {
        let mut lreader = LineReader::new(reader);
        let mut coefficients: Vec<Vec<i64>> = vec![];
        let mut targets = vec![];

        while let Some(line) = lreader.next_line()? {
            let line = line.to_string();
            let line_number = lreader.get_last_line_number();

            let (left, right) = line.split_once('=').ok_or_else(|| {
                anyhow!(
                    "line {} should be of the form `a_1 ... a_n = b`; found `{}`",
                    line_number,
                    line
                )
            })?;

            let row = left
                .split_whitespace()
                .map(|c| c.parse::<i64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| {
                    format!("failed to read coefficients at line {}; found `{}`", line_number, left)
                })?;
            let target = right.trim().parse::<i64>().with_context(|| {
                format!("failed to read target value at line {}; found `{}`", line_number, right)
            })?;

            if let Some(first) = coefficients.first() {
                if first.len() != row.len() {
                    return Err(anyhow!(
                        "line {} has {} coefficients, whereas earlier equations have {}",
                        line_number,
                        row.len(),
                        first.len()
                    ));
                }
            }

            coefficients.push(row);
            targets.push(target);
        }

        Ok(Self {
            coefficients,
            targets,
        })
    }

    pub fn get_number_of_equations(&self) -> usize {
        self.targets.len()
    }

    pub fn to_linear_system(&self) -> Result<LinearSystem> {
        LinearSystem::new(&self.coefficients, &self.targets)
    }
}

impl FromStr for Equations {
    type Err = Error;

    fn from_str(s: &str) -> std::prelude::v1::Result<Self, Self::Err> {
        let mut reader = io::Cursor::new(s);
        Self::import(&mut reader)
    }
}
