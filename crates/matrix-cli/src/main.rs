use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use matrix_cli::preferences::theme::system_prefers_dark;
use matrix_cli::preferences::{
    load_preferences_or_initial, preferences_path, save_preferences, Preferences, Theme,
};
use matrix_cli::solver::config::SolverConfig;
use matrix_cli::solver::render::{render_report, render_titled};
use matrix_cli::solver::session::Operand;
use matrix_engine::MatrixError;

/// Exit status for a user-correctable dimension mismatch.
const EXIT_DIMENSION_MISMATCH: i32 = 2;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MATRIX_SOLVER_LOG", "error,matrix=info"))
        .init();

    let matches = Command::new("matrix-solver")
        .version(clap::crate_version!())
        .author("Matrix Solver Developers")
        .about("\u{1F9EE} Matrix Solver - add, subtract and multiply small matrices")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("calculate")
                .about("Validate two matrices against an operation and print the result")
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON solver configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("operation")
                        .short('o')
                        .long("operation")
                        .help("Operation to perform. Overrides the operation in the configuration file.")
                        .value_parser(["add", "subtract", "multiply", "scalar"]),
                )
                .arg(
                    Arg::new("matrix_a")
                        .short('a')
                        .long("matrix-a")
                        .help("Cells of matrix A, rows separated by ';' and cells by ',' (e.g. \"1,2;3,4\")")
                        .allow_hyphen_values(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("matrix_b")
                        .short('b')
                        .long("matrix-b")
                        .help(
                            "Cells of matrix B. For scalar multiplication the first cell is the scalar.",
                        )
                        .allow_hyphen_values(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("a_file")
                        .long("a-file")
                        .help("Read matrix A from a header-less .csv or .tsv file")
                        .conflicts_with("matrix_a")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("b_file")
                        .long("b-file")
                        .help("Read matrix B from a header-less .csv or .tsv file")
                        .conflicts_with("matrix_b")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("shape_a")
                        .long("shape-a")
                        .help("Dimensions of matrix A as ROWSxCOLS (1-5 each). Defaults to the input's shape.")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("shape_b")
                        .long("shape-b")
                        .help("Dimensions of matrix B as ROWSxCOLS (1-5 each). Defaults to the input's shape.")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("show_inputs")
                        .long("show-inputs")
                        .help("Print both operands and the operation above the result.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("theme")
                .about("Show or change the saved light/dark theme")
                .arg(
                    Arg::new("prefs")
                        .long("prefs")
                        .global(true)
                        .help("Preferences file. Defaults to $MATRIX_SOLVER_PREFS or ~/.matrix-solver/preferences.json")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .subcommand(Command::new("show").about("Print the current theme"))
                .subcommand(Command::new("toggle").about("Switch between light and dark"))
                .subcommand(
                    Command::new("set").about("Save a specific theme").arg(
                        Arg::new("theme")
                            .help("Theme to save")
                            .required(true)
                            .value_parser(["light", "dark"]),
                    ),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("calculate", sub_m)) => handle_calculate(sub_m),
        Some(("theme", sub_m)) => handle_theme(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_calculate(matches: &ArgMatches) -> Result<()> {
    let config_path: Option<&PathBuf> = matches.get_one("config");
    match config_path {
        Some(path) => log::info!("[MatrixSolver::Calculate] Using config: {:?}", path),
        None => log::info!("[MatrixSolver::Calculate] No config provided; using defaults."),
    }

    let config = SolverConfig::from_arguments(config_path, matches)?;
    let mut session = config.build_session()?;
    let operation = session.operation();
    let (shape_a, shape_b) = (session.shape(Operand::A), session.shape(Operand::B));
    log::info!(
        "[MatrixSolver::Calculate] {} with A {}x{} and B {}x{}",
        operation,
        shape_a.0,
        shape_a.1,
        shape_b.0,
        shape_b.1
    );

    match session.calculate() {
        Ok(_) => {}
        Err(e @ MatrixError::DimensionMismatch { .. }) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_DIMENSION_MISMATCH);
        }
        Err(e) => {
            log::error!("Calculation failed: {:#}", e);
            return Err(e.into());
        }
    }

    if let Some(result) = session.result() {
        let text = if matches.get_flag("show_inputs") {
            render_report(
                operation,
                session.matrix(Operand::A),
                session.matrix(Operand::B),
                result,
            )
        } else {
            render_titled("Result", result)
        };
        println!("{}", text);
    }
    Ok(())
}

fn handle_theme(matches: &ArgMatches) -> Result<()> {
    let sub = matches.subcommand();
    let prefs_arg = sub
        .and_then(|(_, m)| m.get_one::<PathBuf>("prefs"))
        .or_else(|| matches.get_one::<PathBuf>("prefs"));
    let path = preferences_path(prefs_arg.map(PathBuf::as_path))?;

    let (prefs, changed) = match sub {
        None | Some(("show", _)) => (
            load_preferences_or_initial(&path, system_prefers_dark()),
            false,
        ),
        Some(("toggle", _)) => {
            let current = load_preferences_or_initial(&path, system_prefers_dark());
            let prefs = Preferences {
                theme: current.theme.toggled(),
            };
            (prefs, true)
        }
        // The saved value is overwritten, so a corrupt file must not block this.
        Some(("set", set_m)) => {
            let requested: &String = set_m
                .get_one("theme")
                .ok_or_else(|| anyhow::anyhow!("A theme is required"))?;
            let theme = requested.parse::<Theme>().map_err(anyhow::Error::msg)?;
            (Preferences { theme }, true)
        }
        _ => unreachable!(),
    };

    if changed {
        save_preferences(&path, &prefs)?;
        log::info!(
            "[MatrixSolver::Theme] Saved {} theme to {:?}",
            prefs.theme,
            path
        );
    }

    println!("Theme: {}", prefs.theme);
    println!("Toggle: {}", prefs.theme.toggle_label());
    Ok(())
}
