use clap::Parser;

use crate::model::Directive;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// HTML documents to rewrite ("-" reads from stdin)
    #[clap(required = true)]
    pub inputs: Vec<std::path::PathBuf>,
    /// Write the rewritten document to this file instead of stdout
    #[clap(short, long, conflicts_with = "in_place")]
    pub output: Option<std::path::PathBuf>,
    /// Overwrite every input file with its rewritten document
    #[clap(short, long)]
    pub in_place: bool,
    /// JSON file with the base directive set, e.g. {"base-uri": ["'self'"]}
    #[clap(short, long, env = "STRICTCSP_POLICY_FILE")]
    pub policy_file: Option<std::path::PathBuf>,
    /// Directive to set on top of the base policy, e.g. "img-src 'self' data:"
    #[clap(short, long = "directive")]
    pub directives: Vec<Directive>,
    /// Also hash inline <style> elements and allow them through "style-src"
    #[clap(short = 's', long, env = "STRICTCSP_HASH_STYLES")]
    pub hash_styles: bool,
    /// Write every generated policy (one line per document) to this file
    #[clap(long)]
    pub policy_output: Option<std::path::PathBuf>,
    /// Log level to use
    #[clap(short = 'v', long, env = "STRICTCSP_LOG_LEVEL", default_value_t = log::LevelFilter::Warn)]
    pub log_level: log::LevelFilter,
}
