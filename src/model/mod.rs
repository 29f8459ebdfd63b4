mod cli;
mod config;
mod directive_set;
mod hash_token;

pub use cli::Args as CliArgs;
pub use config::{Config, ConfigError, OutputTarget, is_stdin};
pub use directive_set::{
    Directive, DirectiveParseError, DirectiveSet, SCRIPT_SRC, SELF_SOURCE, STRICT_DYNAMIC,
    STYLE_SRC,
};
pub use hash_token::HashToken;
