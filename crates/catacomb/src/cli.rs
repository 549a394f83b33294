//! # Command-Line Flags
//!
//! Simple hand-rolled parsing; the flag set is small and fixed.

use std::path::PathBuf;

use catacomb_procedural::{DoorRule, DungeonError, GeneratorConfig, ProbePolicy};
use thiserror::Error;

/// Help text printed for `--help`.
pub const USAGE: &str = "\
Usage: catacomb [SIZE] [OPTIONS]

Options:
  -s, --size <N>            Dungeon edge length (default: 5)
      --seed <SEED>         Fixed seed for a reproducible layout
  -c, --config <PATH>       TOML config file
      --probe <POLICY>      random | shuffle (default: random)
      --door-rule <RULE>    any-wall | facing (default: any-wall)
      --summary             Print a feature summary after the map
  -h, --help                Show this help";

/// Errors surfaced to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Flag given without its value.
    #[error("missing value for {0}")]
    MissingValue(String),

    /// Flag value could not be parsed.
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue {
        /// The flag.
        flag: String,
        /// What was given.
        value: String,
    },

    /// Unrecognised flag.
    #[error("unknown option {0}")]
    UnknownFlag(String),

    /// Error from the generator.
    #[error(transparent)]
    Dungeon(#[from] DungeonError),
}

/// Parsed command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostArgs {
    /// Edge length override.
    pub size: Option<i64>,
    /// Seed override.
    pub seed: Option<u64>,
    /// Config file to start from.
    pub config: Option<PathBuf>,
    /// Probe policy override.
    pub probe: Option<ProbePolicy>,
    /// Door rule override.
    pub door_rule: Option<DoorRule>,
    /// Print the feature summary.
    pub summary: bool,
    /// Print usage and exit.
    pub help: bool,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag: flag.to_owned(),
        value: value.to_owned(),
    })
}

impl HostArgs {
    /// Parses arguments, program name excluded.
    ///
    /// A bare integer is taken as the size.
    ///
    /// # Errors
    ///
    /// Returns a `CliError` for unknown flags, missing values or values that
    /// do not parse.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let flag = arg.as_str();
            let mut value = || args.next().ok_or_else(|| CliError::MissingValue(arg.clone()));
            match flag {
                "-s" | "--size" => parsed.size = Some(parse_value(flag, &value()?)?),
                "--seed" => parsed.seed = Some(parse_value(flag, &value()?)?),
                "-c" | "--config" => parsed.config = Some(PathBuf::from(value()?)),
                "--probe" => parsed.probe = Some(parse_value(flag, &value()?)?),
                "--door-rule" => parsed.door_rule = Some(parse_value(flag, &value()?)?),
                "--summary" => parsed.summary = true,
                "-h" | "--help" => parsed.help = true,
                bare if !bare.starts_with('-') || bare.parse::<i64>().is_ok() => {
                    parsed.size = Some(parse_value("SIZE", bare)?);
                }
                other => return Err(CliError::UnknownFlag(other.to_owned())),
            }
        }

        Ok(parsed)
    }

    /// Builds the generator config: file (or defaults), then flag overrides.
    ///
    /// # Errors
    ///
    /// Returns `Dungeon` if the file cannot be loaded or the result is invalid.
    pub fn to_config(&self) -> Result<GeneratorConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(probe) = self.probe {
            config.probe = probe;
        }
        if let Some(rule) = self.door_rule {
            config.door_rule = rule;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<HostArgs, CliError> {
        HostArgs::parse(args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn test_no_args_is_default() {
        assert_eq!(parse(&[]).unwrap(), HostArgs::default());
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "--size", "9", "--seed", "77", "-c", "dungeon.toml", "--probe", "shuffle",
            "--door-rule", "facing", "--summary",
        ])
        .unwrap();
        assert_eq!(args.size, Some(9));
        assert_eq!(args.seed, Some(77));
        assert_eq!(args.config, Some(PathBuf::from("dungeon.toml")));
        assert_eq!(args.probe, Some(ProbePolicy::Shuffle));
        assert_eq!(args.door_rule, Some(DoorRule::Facing));
        assert!(args.summary);
    }

    #[test]
    fn test_bare_integer_is_size() {
        assert_eq!(parse(&["12"]).unwrap().size, Some(12));
        assert_eq!(parse(&["-3"]).unwrap().size, Some(-3));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse(&["--size"]),
            Err(CliError::MissingValue("--size".into()))
        );
        assert_eq!(
            parse(&["--seed", "abc"]),
            Err(CliError::InvalidValue {
                flag: "--seed".into(),
                value: "abc".into()
            })
        );
        assert_eq!(parse(&["--loud"]), Err(CliError::UnknownFlag("--loud".into())));
        assert!(matches!(
            parse(&["--probe", "spiral"]),
            Err(CliError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&["--size", "3", "--seed", "1", "--door-rule", "facing"]).unwrap();
        let config = args.to_config().unwrap();
        assert_eq!(config.size, 3);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.door_rule, DoorRule::Facing);
        assert_eq!(config.probe, ProbePolicy::RandomProbe);
    }

    #[test]
    fn test_invalid_size_surfaces() {
        let args = parse(&["0"]).unwrap();
        assert_eq!(
            args.to_config(),
            Err(CliError::Dungeon(DungeonError::InvalidSize(0)))
        );
    }

    #[test]
    fn test_missing_config_file() {
        let args = parse(&["--config", "/nonexistent/catacomb.toml"]).unwrap();
        assert!(matches!(
            args.to_config(),
            Err(CliError::Dungeon(DungeonError::Io(_)))
        ));
    }
}
