use anyhow::{Context, Result, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches, value_parser};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use itertools::Itertools;
use log::LevelFilter;
use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::PathBuf,
    time::Duration,
};

use crate::{
    objects::{equations::Equations, machine::Machine},
    optimisation_algorithms::search_parameters::{FallbackBound, SearchParameters},
    techniques::button_presses::ButtonPresses,
};

pub const ARG_ID_FILE: &str = "FILE";
pub const ARG_ID_FALLBACK_BOUND: &str = "fallback-bound";
pub const ARG_ID_MAX_NODES: &str = "max-nodes";
pub const ARG_ID_TIME_LIMIT: &str = "time-limit";

pub fn build_cli() -> Command {
    let command = Command::new("intsolve")
        .about("Minimum-sum non-negative integer solutions of linear equation systems.")
        .subcommand_required(true)
        .arg(
            Arg::new(ARG_ID_FALLBACK_BOUND)
                .long(ARG_ID_FALLBACK_BOUND)
                .value_name("NUMBER")
                .help("Upper bound for free variables that no equation bounds. By default, it is derived from the system and at least 50000.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new(ARG_ID_MAX_NODES)
                .long(ARG_ID_MAX_NODES)
                .value_name("NUMBER")
                .help("Give up a search after visiting this many nodes.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new(ARG_ID_TIME_LIMIT)
                .long(ARG_ID_TIME_LIMIT)
                .value_name("SECONDS")
                .help("Give up a search after this many seconds.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .subcommand(
            Command::new("system")
                .about("Solve a system of equations given as lines `a_1 ... a_n = b`, minimising the sum of the variables.")
                .arg(file_argument("The file with the equations.")),
        )
        .subcommand(
            Command::new("machines")
                .about("Compute the fewest button presses of factory machines, for both the indicator lights and the joltage counters.")
                .arg(file_argument("The file with one machine per line.")),
        );
    Verbosity::<WarnLevel>::augment_args(command)
}

fn file_argument(help: &'static str) -> Arg {
    Arg::new(ARG_ID_FILE)
        .help(help)
        .required(true)
        .value_parser(value_parser!(PathBuf))
}

pub fn log_level(cli_matches: &ArgMatches) -> Result<LevelFilter> {
    let verbosity = Verbosity::<WarnLevel>::from_arg_matches(cli_matches)?;
    Ok(verbosity.log_level_filter())
}

pub fn search_parameters(cli_matches: &ArgMatches) -> SearchParameters {
    let mut parameters = SearchParameters::new();
    if let Some(bound) = cli_matches.get_one::<u64>(ARG_ID_FALLBACK_BOUND) {
        parameters = parameters.with_fallback_upper_bound(FallbackBound::Fixed(*bound));
    }
    if let Some(nodes) = cli_matches.get_one::<u64>(ARG_ID_MAX_NODES) {
        parameters = parameters.with_node_budget(*nodes);
    }
    if let Some(seconds) = cli_matches.get_one::<u64>(ARG_ID_TIME_LIMIT) {
        parameters = parameters.with_time_limit(Duration::from_secs(*seconds));
    }
    parameters
}

pub fn execute(cli_matches: &ArgMatches, output: &mut dyn Write) -> Result<()> {
    let (name, sub_matches) = cli_matches
        .subcommand()
        .ok_or_else(|| anyhow!("no command given"))?;
    let parameters = search_parameters(sub_matches);
    let path = sub_matches
        .get_one::<PathBuf>(ARG_ID_FILE)
        .ok_or_else(|| anyhow!("no file given"))?;
    let mut reader = BufReader::new(
        File::open(path).with_context(|| format!("opening {}", path.display()))?,
    );

    log::info!("{} {}", name, path.display());
    match name {
        "system" => solve_system(&mut reader, &parameters, output),
        "machines" => press_buttons(&mut reader, &parameters, output),
        _ => Err(anyhow!("unknown command `{}`", name)),
    }
    .with_context(|| format!("processing {}", path.display()))
}

pub fn solve_system(
    reader: &mut dyn BufRead,
    parameters: &SearchParameters,
    output: &mut dyn Write,
) -> Result<()> {
    let equations = Equations::import(reader).context("reading equations")?;
    let system = equations.to_linear_system()?;

    match system.solve_with(parameters)? {
        Some(solution) => {
            writeln!(output, "{}", solution.iter().join(" "))?;
            writeln!(output, "sum {}", solution.iter().sum::<u64>())?;
        }
        None => writeln!(output, "no solution")?,
    }
    Ok(())
}

pub fn press_buttons(
    reader: &mut dyn BufRead,
    parameters: &SearchParameters,
    output: &mut dyn Write,
) -> Result<()> {
    let machines = Machine::import_all(reader)?;

    let mut target_presses = 0;
    let mut joltage_presses = 0;
    for (i, machine) in machines.iter().enumerate() {
        target_presses += machine.presses_to_target()?.len();
        let (presses, _) = machine.presses_to_joltage(parameters)?;
        joltage_presses += presses;
        log::info!("machine {}: {} joltage presses", i + 1, presses);
    }

    writeln!(output, "fewest presses for the indicator lights {}", target_presses)?;
    writeln!(output, "fewest presses for the joltage counters {}", joltage_presses)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;
    use std::{io::Cursor, time::Duration};

    use crate::optimisation_algorithms::search_parameters::{FallbackBound, SearchParameters};

    use super::{build_cli, log_level, press_buttons, search_parameters, solve_system};

    fn run_system(input: &str) -> String {
        let mut output = vec![];
        solve_system(&mut Cursor::new(input), &SearchParameters::default(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn command_system() {
        assert_eq!(run_system("1 0 = 2\n0 1 = 3\n1 1 = 5\n"), "2 3\nsum 5\n");
        assert_eq!(run_system("2 = 3\n"), "no solution\n");
    }

    #[test]
    fn command_machines() {
        let input = "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";
        let mut output = vec![];
        press_buttons(&mut Cursor::new(input), &SearchParameters::default(), &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "fewest presses for the indicator lights 7\nfewest presses for the joltage counters 33\n"
        );
    }

    #[test]
    fn command_arguments() {
        let matches = build_cli()
            .try_get_matches_from([
                "intsolve",
                "-v",
                "system",
                "equations.txt",
                "--max-nodes",
                "10",
                "--time-limit",
                "3",
                "--fallback-bound",
                "7",
            ])
            .unwrap();
        assert_eq!(log_level(&matches).unwrap(), LevelFilter::Info);

        let (name, sub_matches) = matches.subcommand().unwrap();
        assert_eq!(name, "system");
        assert_eq!(
            search_parameters(sub_matches),
            SearchParameters::new()
                .with_fallback_upper_bound(FallbackBound::Fixed(7))
                .with_node_budget(10)
                .with_time_limit(Duration::from_secs(3))
        );

        assert!(build_cli().try_get_matches_from(["intsolve"]).is_err());
        assert!(build_cli().try_get_matches_from(["intsolve", "machines"]).is_err());
    }
}
