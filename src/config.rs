//! Runtime configuration and command-line options
//!
//! [`Config`] holds the bounds every layer validates against. [`CliOptions`]
//! is parsed by hand from the process arguments; anything it does not set
//! falls back to [`Config::default`].

use crate::error::InputError;
use crate::input::ArrayShape;
use thiserror::Error;

/// Bounds on generated input arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    pub min_size: usize,
    pub max_size: usize,
    pub default_size: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        InputLimits {
            min_size: 5,
            max_size: 50,
            default_size: 20,
        }
    }
}

/// Bounds on the auto-advance interval, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedLimits {
    pub min_ms: u64,
    pub max_ms: u64,
    pub default_ms: u64,
    /// Increment used by the UI's faster/slower keys
    pub step_ms: u64,
}

impl Default for SpeedLimits {
    fn default() -> Self {
        SpeedLimits {
            min_ms: 50,
            max_ms: 2000,
            default_ms: 500,
            step_ms: 50,
        }
    }
}

impl SpeedLimits {
    pub fn contains(&self, ms: u64) -> bool {
        (self.min_ms..=self.max_ms).contains(&ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub input: InputLimits,
    pub speed: SpeedLimits,
    /// Longest input the materializer expands into a trace
    pub max_trace_input: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: InputLimits::default(),
            speed: SpeedLimits::default(),
            max_trace_input: 4096,
        }
    }
}

/// Options accepted on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub algorithm: String,
    pub size: Option<usize>,
    pub shape: ArrayShape,
    pub seed: Option<u64>,
    pub speed_ms: Option<u64>,
    pub target: Option<i64>,
    pub start: usize,
    pub json: bool,
    pub list: bool,
    pub help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        CliOptions {
            algorithm: String::from("bubble"),
            size: None,
            shape: ArrayShape::Random,
            seed: None,
            speed_ms: None,
            target: None,
            start: 0,
            json: false,
            list: false,
            help: false,
        }
    }
}

/// A malformed command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

pub const USAGE: &str = "\
Usage: algostep [OPTIONS]

Options:
  --algorithm <id>   Algorithm to trace (default: bubble, see --list)
  --size <n>         Input array size
  --shape <shape>    random | sorted | reversed | nearly-sorted
  --seed <u64>       Seed for input generation
  --speed <ms>       Auto-advance interval in milliseconds
  --target <n>       Search target (default: middle of the sorted input)
  --start <node>     Start node for graph traversals (default: 0)
  --json             Print the materialized trace as JSON and exit
  --list             List registered algorithms and exit
  --help             Show this message";

impl CliOptions {
    /// Parse options from an argument list (without the program name)
    pub fn parse<I, S>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            match arg {
                "--json" => options.json = true,
                "--list" => options.list = true,
                "--help" | "-h" => options.help = true,
                "--algorithm" | "-a" => options.algorithm = value_for(arg, args.next())?,
                "--size" | "-n" => options.size = Some(parse_value(arg, args.next())?),
                "--seed" => options.seed = Some(parse_value(arg, args.next())?),
                "--speed" => options.speed_ms = Some(parse_value(arg, args.next())?),
                "--target" => options.target = Some(parse_value(arg, args.next())?),
                "--start" => options.start = parse_value(arg, args.next())?,
                "--shape" => {
                    let raw = value_for(arg, args.next())?;
                    options.shape = raw.parse().map_err(|e: InputError| UsageError(e.to_string()))?;
                }
                other => return Err(UsageError(format!("unrecognized argument '{}'", other))),
            }
        }

        Ok(options)
    }
}

fn value_for<S: AsRef<str>>(flag: &str, value: Option<S>) -> Result<String, UsageError> {
    value
        .map(|v| v.as_ref().to_string())
        .ok_or_else(|| UsageError(format!("missing value for {}", flag)))
}

fn parse_value<T, S>(flag: &str, value: Option<S>) -> Result<T, UsageError>
where
    T: std::str::FromStr,
    S: AsRef<str>,
{
    let raw = value_for(flag, value)?;
    raw.parse()
        .map_err(|_| UsageError(format!("invalid value '{}' for {}", raw, flag)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_arguments() {
        let options = CliOptions::parse(Vec::<String>::new()).unwrap();
        assert_eq!(options, CliOptions::default());
        assert_eq!(options.algorithm, "bubble");
    }

    #[test]
    fn test_parses_all_flags() {
        let options = CliOptions::parse([
            "--algorithm",
            "binary-search",
            "--size",
            "12",
            "--shape",
            "nearly-sorted",
            "--seed",
            "7",
            "--speed",
            "250",
            "--target",
            "4",
            "--start",
            "2",
            "--json",
        ])
        .unwrap();

        assert_eq!(options.algorithm, "binary-search");
        assert_eq!(options.size, Some(12));
        assert_eq!(options.shape, ArrayShape::NearlySorted);
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.speed_ms, Some(250));
        assert_eq!(options.target, Some(4));
        assert_eq!(options.start, 2);
        assert!(options.json);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(CliOptions::parse(["--size"]).is_err());
        assert!(CliOptions::parse(["--size", "many"]).is_err());
        assert!(CliOptions::parse(["--shape", "zigzag"]).is_err());
        assert!(CliOptions::parse(["--frobnicate"]).is_err());
    }

    #[test]
    fn test_speed_limits() {
        let limits = SpeedLimits::default();
        assert!(limits.contains(50));
        assert!(limits.contains(2000));
        assert!(!limits.contains(49));
        assert!(!limits.contains(2001));
    }
}
