//! Positional command arguments.

use crate::command::error_policy::CommandError;

/// Argument tokens left after the command keyword is stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    tokens: Vec<String>,
}

impl Args {
    /// Trims `rest` and splits it on single spaces.
    ///
    /// Blank input yields no arguments. Consecutive spaces produce empty
    /// tokens, which field constructors then reject.
    pub fn parse(rest: &str) -> Self {
        let trimmed = rest.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        Self {
            tokens: trimmed.split(' ').map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns the argument at `position`.
    ///
    /// # Errors
    /// - `CommandError::MissingArgument` when fewer arguments were given.
    pub fn required(&self, position: usize) -> Result<&str, CommandError> {
        self.tokens
            .get(position)
            .map(String::as_str)
            .ok_or(CommandError::MissingArgument { position })
    }

    /// Joins every argument from `position` on with single spaces.
    pub fn rest_from(&self, position: usize) -> String {
        self.tokens
            .get(position..)
            .map(|rest| rest.join(" "))
            .unwrap_or_default()
    }

    /// Rejects argument lists longer than `accepted`.
    ///
    /// # Errors
    /// - `CommandError::TooManyArguments` when extra arguments were given.
    pub fn at_most(&self, accepted: usize) -> Result<(), CommandError> {
        if self.tokens.len() > accepted {
            return Err(CommandError::TooManyArguments {
                accepted,
                found: self.tokens.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use crate::command::error_policy::CommandError;

    #[test]
    fn blank_rest_has_no_arguments() {
        assert!(Args::parse("   ").is_empty());
    }

    #[test]
    fn splits_on_single_spaces() {
        let args = Args::parse(" ann  380501112233 ");
        assert_eq!(args.tokens(), ["ann", "", "380501112233"]);
    }

    #[test]
    fn required_and_arity_checks_report_positions() {
        let args = Args::parse("ann 380501112233");
        assert_eq!(args.required(1).unwrap(), "380501112233");
        assert!(matches!(
            args.required(2),
            Err(CommandError::MissingArgument { position: 2 })
        ));
        assert!(matches!(
            args.at_most(1),
            Err(CommandError::TooManyArguments {
                accepted: 1,
                found: 2
            })
        ));
        assert_eq!(args.rest_from(1), "380501112233");
        assert_eq!(args.rest_from(5), "");
    }
}
