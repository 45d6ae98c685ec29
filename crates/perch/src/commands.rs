//! Command-line parsing and dispatch.

use crate::config::SimulationConfig;
use crate::simulation;
use anyhow::{Result, anyhow, bail};
use css_values_units::{CssInput, RemBase, to_em, to_rem_all};

/// A parsed invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// `perch em <value>`
    Em(String),
    /// `perch rem [--base=<base>] <value>...`
    Rem { base: RemBase, values: Vec<String> },
    /// `perch simulate`
    Simulate,
}

/// Parse arguments (without the program name).
///
/// # Errors
/// Fails on a missing or unknown subcommand, or a subcommand without values.
pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        bail!("usage: perch <em|rem|simulate> [values...]");
    };
    match command.as_str() {
        "em" => {
            let value = args.next().ok_or_else(|| anyhow!("usage: perch em <value>"))?;
            Ok(Command::Em(value))
        }
        "rem" => {
            let mut base = RemBase::DEFAULT;
            let mut values = Vec::new();
            let mut pending_base = false;
            for arg in args {
                if pending_base {
                    base = RemBase::try_parse(&arg)?;
                    pending_base = false;
                } else if let Some(rest) = arg.strip_prefix("--base=") {
                    base = RemBase::try_parse(rest)?;
                } else if arg == "--base" {
                    pending_base = true;
                } else {
                    values.push(arg);
                }
            }
            if pending_base {
                bail!("`--base` needs a value");
            }
            if values.is_empty() {
                bail!("usage: perch rem [--base=<base>] <value>...");
            }
            Ok(Command::Rem { base, values })
        }
        "simulate" => Ok(Command::Simulate),
        other => Err(anyhow!("unknown command `{other}`")),
    }
}

/// Run a command and return the line to report.
///
/// # Errors
/// Propagates simulation and serialization failures.
pub fn execute(command: Command) -> Result<String> {
    match command {
        Command::Em(value) => Ok(to_em(value)),
        Command::Rem { base, values } => {
            Ok(to_rem_all(values.into_iter().map(CssInput::from), base))
        }
        Command::Simulate => {
            let config = SimulationConfig::from_env();
            let report = simulation::run(&config)?;
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| (*arg).to_owned()).collect()
    }

    #[test]
    fn parses_em() {
        assert_eq!(
            parse_args(args(&["em", "24px"])).unwrap(),
            Command::Em("24px".to_owned())
        );
    }

    #[test]
    fn parses_rem_with_base_forms() {
        let inline = parse_args(args(&["rem", "--base=62.5%", "8", "16px"])).unwrap();
        assert_eq!(
            inline,
            Command::Rem {
                base: RemBase::from_px(10.0),
                values: args(&["8", "16px"]),
            }
        );
        let split = parse_args(args(&["rem", "--base", "20px", "40"])).unwrap();
        assert_eq!(
            split,
            Command::Rem {
                base: RemBase::from_px(20.0),
                values: args(&["40"]),
            }
        );
    }

    #[test]
    fn rejects_bad_invocations() {
        assert!(parse_args(Vec::new()).is_err());
        assert!(parse_args(args(&["rem"])).is_err());
        assert!(parse_args(args(&["rem", "--base=2em", "8"])).is_err());
        assert!(parse_args(args(&["rem", "8", "--base"])).is_err());
        assert!(parse_args(args(&["px"])).is_err());
    }

    #[test]
    fn executes_conversions() {
        assert_eq!(execute(Command::Em("768".to_owned())).unwrap(), "48em");
        assert_eq!(
            execute(Command::Rem {
                base: RemBase::DEFAULT,
                values: args(&["0", "8px", "1.5rem"]),
            })
            .unwrap(),
            "0 0.5rem 1.5rem"
        );
    }
}
