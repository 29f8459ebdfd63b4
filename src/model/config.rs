use std::path::{Path, PathBuf};

use crate::model::{CliArgs, DirectiveSet};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Policy file `{path}` couldn't be read")]
    PolicyFileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Policy file `{path}` isn't a valid directive set")]
    PolicyFileParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("`--output` can only be used with a single input")]
    OutputConflict,
    #[error("stdin can't be rewritten in place")]
    InPlaceStdin,
}

#[derive(Debug, Eq, PartialEq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
    InPlace,
}

#[derive(Debug)]
pub struct Config {
    pub base_directives: DirectiveSet,
    pub hash_styles: bool,
    pub inputs: Vec<PathBuf>,
    pub log_level: log::LevelFilter,
    pub output: OutputTarget,
    pub policy_output: Option<PathBuf>,
}

impl TryFrom<CliArgs> for Config {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let output = match (args.output, args.in_place) {
            (Some(_), _) if args.inputs.len() > 1 => return Err(ConfigError::OutputConflict),
            (Some(path), _) => OutputTarget::File(path),
            (None, true) if args.inputs.iter().any(|input| is_stdin(input)) => {
                return Err(ConfigError::InPlaceStdin);
            }
            (None, true) => OutputTarget::InPlace,
            (None, false) => OutputTarget::Stdout,
        };
        let mut base_directives = match args.policy_file.as_deref() {
            Some(path) => read_policy_file(path)?,
            None => DirectiveSet::strict(),
        };

        base_directives.extend(args.directives);

        Ok(Self {
            base_directives,
            hash_styles: args.hash_styles,
            inputs: args.inputs,
            log_level: args.log_level,
            output,
            policy_output: args.policy_output,
        })
    }
}

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_policy_file(path: &Path) -> Result<DirectiveSet, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::PolicyFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::PolicyFileParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::{Config, ConfigError, OutputTarget};
    use crate::model::CliArgs;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        Config::try_from(CliArgs::try_parse_from(args).unwrap())
    }

    #[test]
    fn defaults_to_strict_policy() {
        let config = parse(&["strictcsp", "index.html"]).unwrap();

        assert_eq!(config.output, OutputTarget::Stdout);
        assert_eq!(
            config.base_directives.to_string(),
            "base-uri 'self';object-src 'none';script-src 'strict-dynamic';"
        );
        assert!(!config.hash_styles);
        assert_eq!(config.log_level, log::LevelFilter::Warn);
    }

    #[test]
    fn directives_override_base() {
        let config = parse(&[
            "strictcsp",
            "-d",
            "base-uri 'none'",
            "--directive",
            "img-src 'self' data:",
            "index.html",
        ])
        .unwrap();

        assert_eq!(
            config.base_directives.to_string(),
            "base-uri 'none';object-src 'none';script-src 'strict-dynamic';img-src 'self' data:;"
        );
    }

    #[test]
    fn policy_file_replaces_strict_set() {
        let mut policy_file = tempfile::NamedTempFile::new().unwrap();

        policy_file
            .write_all(br#"{"default-src":["'self'"],"style-src":["'self'","'unsafe-inline'"]}"#)
            .unwrap();

        let config = parse(&[
            "strictcsp",
            "-p",
            policy_file.path().to_str().unwrap(),
            "-i",
            "index.html",
        ])
        .unwrap();

        assert_eq!(config.output, OutputTarget::InPlace);
        assert_eq!(
            config.base_directives.to_string(),
            "default-src 'self';style-src 'self' 'unsafe-inline';"
        );
    }

    #[test]
    fn invalid_policy_file() {
        let mut policy_file = tempfile::NamedTempFile::new().unwrap();

        policy_file.write_all(br#"{"base-uri":"'self'"}"#).unwrap();

        assert!(matches!(
            parse(&["strictcsp", "-p", policy_file.path().to_str().unwrap(), "a.html"]),
            Err(ConfigError::PolicyFileParse { .. })
        ));
    }

    #[test]
    fn output_requires_single_input() {
        assert!(matches!(
            parse(&["strictcsp", "-o", "out.html", "a.html", "b.html"]),
            Err(ConfigError::OutputConflict)
        ));
        assert!(matches!(
            parse(&["strictcsp", "-i", "-"]),
            Err(ConfigError::InPlaceStdin)
        ));
    }
}
