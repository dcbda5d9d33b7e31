use std::{
    collections::HashMap,
    fs,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use reckon::{
    Context, Evaluator, EvaluatorConfig, Number, NumericMode,
    interpreter::evaluator::core::DEFAULT_MAX_LENGTH,
};

mod repl;

/// reckon evaluates arithmetic expressions safely, in floating-point or
/// exact-decimal mode.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate in exact-decimal mode.
    #[arg(short, long)]
    decimal: bool,

    /// Value of `ans` for the expression.
    #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
    ans: Option<String>,

    /// Bind a variable. May be repeated.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, String)>,

    /// Evaluate a JSON array of batch items read from FILE and print the
    /// outcomes as JSON.
    #[arg(long, value_name = "FILE", conflicts_with = "expression")]
    batch: Option<PathBuf>,

    /// Maximum expression length in bytes; 0 disables the limit.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Treat `ans` as an ordinary name.
    #[arg(long)]
    no_ans: bool,

    /// Expression to evaluate (if not provided, reads lines from stdin).
    #[arg(allow_hyphen_values = true)]
    expression: Option<String>,
}

impl Args {
    const fn mode(&self) -> NumericMode {
        if self.decimal {
            NumericMode::Decimal
        } else {
            NumericMode::Float
        }
    }

    fn config(&self) -> EvaluatorConfig {
        EvaluatorConfig { allow_previous_result: !self.no_ans,
                          max_length: (self.max_length > 0).then_some(self.max_length),
                          ..EvaluatorConfig::default() }
    }
}

fn parse_binding(text: &str) -> Result<(String, String), String> {
    let (name, value) = text.split_once('=')
                            .ok_or_else(|| format!("expected NAME=VALUE, found '{text}'"))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    // RUST_LOG controls the level; warnings only by default.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter)
         .with_writer(io::stderr)
         .with_target(false)
         .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let mode = args.mode();
    let evaluator = Evaluator::with_config(args.config());

    let mut variables = HashMap::new();
    for (name, text) in &args.vars {
        match Number::parse(text, mode) {
            Ok(value) => {
                variables.insert(name.clone(), value);
            },
            Err(e) => {
                eprintln!("Invalid value for variable '{name}': {e}");
                return ExitCode::from(2);
            },
        }
    }
    let ans = match args.ans.as_deref().map(|text| Number::parse(text, mode)) {
        Some(Ok(value)) => Some(value),
        Some(Err(e)) => {
            eprintln!("Invalid value for ans: {e}");
            return ExitCode::from(2);
        },
        None => None,
    };

    if let Some(path) = &args.batch {
        return run_batch(&evaluator, path);
    }

    if let Some(expression) = &args.expression {
        let mut context = Context::new(mode).with_variables(&variables);
        if let Some(ans) = &ans {
            context = context.with_previous_result(ans);
        }
        return match evaluator.evaluate(expression, &context) {
            Ok(value) => {
                println!("{value}");
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("{}: {e}", e.kind());
                ExitCode::FAILURE
            },
        };
    }

    let mut session = repl::Session::new(evaluator, mode, variables, ans);
    let interactive = io::stdin().is_terminal();
    match session.run(io::stdin().lock(), io::stdout().lock(), interactive) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error reading input: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run_batch(evaluator: &Evaluator, path: &Path) -> ExitCode {
    let payload = match fs::read_to_string(path) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("Failed to read the batch file '{}': {e}", path.display());
            return ExitCode::from(2);
        },
    };

    let outcomes = match evaluator.evaluate_json(&payload) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        },
    };

    match serde_json::to_string_pretty(&outcomes) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Failed to write the outcomes: {e}");
            ExitCode::FAILURE
        },
    }
}
