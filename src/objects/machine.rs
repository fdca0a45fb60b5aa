use anyhow::{Context, Error, Result, anyhow};
use std::{
    fmt::Display,
    io::{self, BufRead},
    str::FromStr,
};

use crate::line_reader::LineReader;

pub const MAX_COUNTERS: usize = 64;

/**
 * A factory machine, written as
 *
 * ```text
 * [.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
 * ```
 *
 * The square brackets hold the indicator light pattern to reach (`#` is on), each pair of parentheses a button with the
 * counters it affects, and the braces the joltage requirement of each counter. Light i corresponds to counter i.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Machine {
    /// Bit i is set if light i must be on.
    pub target: u64,

    /// Bit i of a button is set if the button affects counter i.
    pub buttons: Vec<u64>,

    pub joltage: Vec<i64>,
}

impl Machine {
    pub fn get_number_of_counters(&self) -> usize {
        self.joltage.len()
    }

    /// Reads one machine per line.
    pub fn import_all(reader: &mut dyn BufRead) -> Result<Vec<Self>> {
        let mut lreader = LineReader::new(reader);
        let mut result = vec![];
        while let Some(line) = lreader.next_line()? {
            let machine = line.parse::<Machine>();
            result.push(machine.with_context(|| {
                format!(
                    "failed to read machine at line {}: `{}`",
                    lreader.get_last_line_number(),
                    lreader.get_last_line()
                )
            })?);
        }
        Ok(result)
    }

    fn parse_lights(token: &str) -> Result<(u64, usize)> {
        let lights = token
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .ok_or_else(|| anyhow!("light pattern should be in square brackets; found `{}`", token))?;

        let number_of_lights = lights.chars().count();
        if number_of_lights > MAX_COUNTERS {
            return Err(anyhow!("more than {} lights are not supported", MAX_COUNTERS));
        }

        let mut target = 0;
        for (i, light) in lights.chars().enumerate() {
            match light {
                '#' => target |= 1 << i,
                '.' => {}
                _ => return Err(anyhow!("unknown light `{}` in `{}`", light, token)),
            }
        }
        Ok((target, number_of_lights))
    }

    fn parse_button(token: &str, counters: usize) -> Result<u64> {
        let indices = token
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .ok_or_else(|| anyhow!("button should be in parentheses; found `{}`", token))?;

        let mut button = 0;
        for index in indices.split(',') {
            let index = index
                .trim()
                .parse::<usize>()
                .with_context(|| format!("failed to read button `{}`", token))?;
            if index >= counters {
                return Err(anyhow!(
                    "button `{}` refers to counter {}, but there are only {} counters",
                    token,
                    index,
                    counters
                ));
            }
            button |= 1 << index;
        }
        Ok(button)
    }

    fn parse_joltage(token: &str) -> Result<Vec<i64>> {
        let values = token
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .ok_or_else(|| anyhow!("joltage requirements should be in braces; found `{}`", token))?;

        values
            .split(',')
            .map(|value| value.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("failed to read joltage requirements `{}`", token))
    }
}

impl FromStr for Machine {
    type Err = Error;

    fn from_str(s: &str) -> std::prelude::v1::Result<Self, Self::Err> {
        let tokens = s.split_whitespace().collect::<Vec<_>>();
        if tokens.len() < 2 {
            return Err(anyhow!("a machine needs a light pattern and joltage requirements; found `{}`", s));
        }

        let (target, lights) = Self::parse_lights(tokens[0])?;
        let joltage = Self::parse_joltage(tokens[tokens.len() - 1])?;
        if lights != joltage.len() {
            return Err(anyhow!(
                "{} lights but {} joltage requirements",
                lights,
                joltage.len()
            ));
        }

        let buttons = tokens[1..tokens.len() - 1]
            .iter()
            .map(|token| Self::parse_button(token, joltage.len()))
            .collect::<Result<Vec<_>>>()?;

        let result = Self {
            target,
            buttons,
            joltage,
        };
        log::trace!("{} -> {:?}", s.trim(), result);
        Ok(result)
    }
}

impl Display for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for i in 0..self.get_number_of_counters() {
            write!(f, "{}", if self.target >> i & 1 == 1 { '#' } else { '.' })?;
        }
        write!(f, "]")?;

        for button in &self.buttons {
            let indices = (0..MAX_COUNTERS)
                .filter(|i| button >> i & 1 == 1)
                .map(|i| i.to_string())
                .collect::<Vec<_>>();
            write!(f, " ({})", indices.join(","))?;
        }

        let joltage = self.joltage.iter().map(|j| j.to_string()).collect::<Vec<_>>();
        write!(f, " {{{}}}", joltage.join(","))
    }
}

pub fn parse_machines(s: &str) -> Result<Vec<Machine>> {
    let mut reader = io::Cursor::new(s);
    Machine::import_all(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::{Machine, parse_machines};

    #[test]
    fn machine_parse() {
        let machine = "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}"
            .parse::<Machine>()
            .unwrap();
        assert_eq!(machine.target, 0b0110);
        assert_eq!(machine.buttons, vec![0b1000, 0b1010, 0b0100, 0b1100, 0b0101, 0b0011]);
        assert_eq!(machine.joltage, vec![3, 5, 4, 7]);
        assert_eq!(machine.get_number_of_counters(), 4);
    }

    #[test]
    fn machine_display() {
        let line = "[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}";
        let machine = line.parse::<Machine>().unwrap();
        assert_eq!(machine.to_string(), line);
    }

    #[test]
    fn machine_errors() {
        assert!("[.#] (0) {1}".parse::<Machine>().is_err());
        assert!("[.#] (2) {1,2}".parse::<Machine>().is_err());
        assert!("[.#] () {1,2}".parse::<Machine>().is_err());
        assert!("[.x] (0) {1,2}".parse::<Machine>().is_err());
        assert!("(0) {1,2}".parse::<Machine>().is_err());
        assert!("[.#] (0) {1,a}".parse::<Machine>().is_err());
        assert!("[.#]".parse::<Machine>().is_err());
    }

    #[test]
    fn machine_import() {
        let machines = parse_machines("# sample\n[#] (0) {1}\n\n[.#] (1) (0,1) {0,2}\n").unwrap();
        assert_eq!(machines.len(), 2);
        assert_eq!(machines[1].buttons, vec![0b10, 0b11]);

        let err = parse_machines("[#] (0) {1}\n[#] (1) {1}\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2: `[#] (1) {1}`"));
    }
}
