use std::{
    collections::{BTreeMap, HashMap},
    io::{self, BufRead, Write},
};

use reckon::{
    Context, Evaluator, Number, NumericMode, PREVIOUS_RESULT,
    interpreter::{lexer::keyword_construct, registry::core::is_identifier},
};
use thiserror::Error;

/// Errors reported for one input line. None of them end the session.
#[derive(Debug, Error)]
pub enum ReplError {
    /// The expression failed to parse or evaluate.
    #[error("{kind}: {0}", kind = .0.kind())]
    Eval(#[from] reckon::Error),
    /// An assignment target that can never be referenced as a variable.
    #[error("'{0}' cannot be assigned.")]
    InvalidTarget(String),
    /// `mode` followed by something other than `float` or `decimal`.
    #[error("Unknown mode '{0}'; expected 'float' or 'decimal'.")]
    UnknownMode(String),
}

/// What a handled line produced.
#[derive(Debug, PartialEq)]
pub enum Reply {
    /// The value of an expression.
    Value(Number),
    /// The value bound by an assignment.
    Assigned(String, Number),
    /// Informational text.
    Message(String),
    /// A blank line or a comment.
    Nothing,
    /// The user asked to leave.
    Quit,
}

/// State carried between the lines of an interactive session.
///
/// The session owns the previous result and the variables; the evaluator only
/// borrows them for each line.
pub struct Session {
    evaluator: Evaluator,
    mode:      NumericMode,
    variables: HashMap<String, Number>,
    ans:       Option<Number>,
}

impl Session {
    pub const fn new(evaluator: Evaluator,
                     mode: NumericMode,
                     variables: HashMap<String, Number>,
                     ans: Option<Number>)
                     -> Self {
        Self { evaluator,
               mode,
               variables,
               ans }
    }

    /// Reads lines until end of input or `quit`, printing each reply.
    ///
    /// With `interactive` unset no prompt is written, so piped input yields one
    /// output line per expression.
    pub fn run(&mut self,
               input: impl BufRead,
               mut output: impl Write,
               interactive: bool)
               -> io::Result<()> {
        if interactive {
            writeln!(output, "reckon ({} mode). Type 'quit' to exit.", self.mode)?;
            write!(output, "> ")?;
            output.flush()?;
        }

        for line in input.lines() {
            match self.handle(&line?) {
                Ok(Reply::Quit) => break,
                Ok(Reply::Nothing) => {},
                Ok(Reply::Value(value)) => writeln!(output, "{value}")?,
                Ok(Reply::Assigned(name, value)) => writeln!(output, "{name} = {value}")?,
                Ok(Reply::Message(text)) => writeln!(output, "{text}")?,
                Err(e) => {
                    tracing::debug!(error = %e, "line rejected");
                    writeln!(output, "Error: {e}")?;
                },
            }
            if interactive {
                write!(output, "> ")?;
                output.flush()?;
            }
        }
        Ok(())
    }

    /// Handles one line of input.
    pub fn handle(&mut self, line: &str) -> Result<Reply, ReplError> {
        let line = line.trim();
        match line {
            "" => return Ok(Reply::Nothing),
            _ if line.starts_with('#') => return Ok(Reply::Nothing),
            "quit" | "exit" => return Ok(Reply::Quit),
            "vars" => return Ok(Reply::Message(self.describe_variables())),
            _ => {},
        }

        if let Some(mode) = line.strip_prefix("mode ") {
            self.mode = match mode.trim() {
                "float" => NumericMode::Float,
                "decimal" => NumericMode::Decimal,
                other => return Err(ReplError::UnknownMode(other.to_string())),
            };
            tracing::info!(mode = %self.mode, "switched numeric mode");
            return Ok(Reply::Message(format!("mode: {}", self.mode)));
        }

        if let Some((name, expression)) = split_assignment(line) {
            let reserved = self.tracks_ans() && name == PREVIOUS_RESULT;
            if reserved || keyword_construct(name).is_some() {
                return Err(ReplError::InvalidTarget(name.to_string()));
            }
            let value = self.evaluate(expression)?;
            self.variables.insert(name.to_string(), value.clone());
            self.ans = Some(value.clone());
            return Ok(Reply::Assigned(name.to_string(), value));
        }

        let value = self.evaluate(line)?;
        self.ans = Some(value.clone());
        Ok(Reply::Value(value))
    }

    fn evaluate(&self, expression: &str) -> Result<Number, reckon::Error> {
        let mut context = Context::new(self.mode).with_variables(&self.variables);
        if let Some(ans) = &self.ans {
            context = context.with_previous_result(ans);
        }
        self.evaluator.evaluate(expression, &context)
    }

    /// `false` when `ans` is an ordinary name for this evaluator.
    fn tracks_ans(&self) -> bool {
        self.evaluator.config().allow_previous_result
    }

    fn describe_variables(&self) -> String {
        let sorted = self.variables.iter().collect::<BTreeMap<_, _>>();
        let mut lines = sorted.into_iter()
                              .map(|(name, value)| format!("{name} = {value}"))
                              .collect::<Vec<_>>();
        if self.tracks_ans()
           && let Some(ans) = &self.ans
        {
            lines.push(format!("{PREVIOUS_RESULT} = {ans}"));
        }
        if lines.is_empty() {
            "no variables".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Splits `NAME = EXPR`. Lines such as `x == 1` or `f(x=1)` are left for the
/// evaluator, which rejects them.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let (name, expression) = line.split_once('=')?;
    let name = name.trim();
    if expression.starts_with('=') || !is_identifier(name) {
        return None;
    }
    Some((name, expression.trim()))
}

#[cfg(test)]
mod tests {
    use reckon::EvaluatorConfig;

    use super::*;

    fn session() -> Session {
        Session::new(Evaluator::new(), NumericMode::Float, HashMap::new(), None)
    }

    #[test]
    fn assignment_binds_variable_and_ans() {
        let mut s = session();
        assert_eq!(s.handle("x = 2 + 1").unwrap(),
                   Reply::Assigned("x".to_string(), Number::Integer(3)));
        assert_eq!(s.handle("x * ans").unwrap(), Reply::Value(Number::Integer(9)));
    }

    #[test]
    fn ans_cannot_be_assigned() {
        let mut s = session();
        assert!(matches!(s.handle("ans = 1"), Err(ReplError::InvalidTarget(_))));
    }

    #[test]
    fn ans_is_an_ordinary_name_when_disabled() {
        let config = EvaluatorConfig { allow_previous_result: false,
                                       ..EvaluatorConfig::default() };
        let mut s = Session::new(Evaluator::with_config(config),
                                 NumericMode::Float,
                                 HashMap::new(),
                                 None);
        assert_eq!(s.handle("ans = 4").unwrap(),
                   Reply::Assigned("ans".to_string(), Number::Integer(4)));
        assert_eq!(s.handle("ans * 2").unwrap(), Reply::Value(Number::Integer(8)));
        assert_eq!(s.handle("vars").unwrap(), Reply::Message("ans = 4".to_string()));
    }

    #[test]
    fn vars_lists_variables_then_ans() {
        let mut s = session();
        assert_eq!(s.handle("vars").unwrap(), Reply::Message("no variables".to_string()));
        s.handle("y = 2").unwrap();
        s.handle("x = 1").unwrap();
        assert_eq!(s.handle("vars").unwrap(),
                   Reply::Message("x = 1\ny = 2\nans = 1".to_string()));
    }

    #[test]
    fn comparison_is_not_an_assignment() {
        let mut s = session();
        assert!(matches!(s.handle("1 == 1"), Err(ReplError::Eval(_))));
    }

    #[test]
    fn mode_switch_changes_arithmetic() {
        let mut s = session();
        s.handle("mode decimal").unwrap();
        assert_eq!(s.handle("0.1 + 0.2").unwrap(),
                   Reply::Value("0.3".parse::<reckon::ExactDecimal>().unwrap().into()));
        assert!(s.handle("mode hex").is_err());
    }

    #[test]
    fn blank_lines_comments_and_quit() {
        let mut s = session();
        assert_eq!(s.handle("   ").unwrap(), Reply::Nothing);
        assert_eq!(s.handle("# note").unwrap(), Reply::Nothing);
        assert_eq!(s.handle("exit").unwrap(), Reply::Quit);
    }

    #[test]
    fn run_prints_one_line_per_expression() {
        let mut s = session();
        let mut out = Vec::new();
        s.run("2+3*4\nx = 5\nx ** 2\n1/0\nquit\n7\n".as_bytes(), &mut out, false)
         .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[..3], ["14", "x = 5", "25"]);
        assert!(lines[3].starts_with("Error: DivisionByZero"));
        assert_eq!(lines.len(), 4);
    }
}
