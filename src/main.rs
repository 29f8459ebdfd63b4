#![deny(
    clippy::correctness,
    clippy::style,
    keyword_idents,
    macro_use_extern_crate,
    non_ascii_idents,
    nonstandard_style,
    noop_method_call,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![warn(
    clippy::cargo,
    clippy::complexity,
    clippy::perf,
    clippy::suspicious,
    rust_2018_idioms,
    unused
)]
#![allow(clippy::multiple_crate_versions)]

mod runner;

fn main() {
    let config = get_config();

    init_logging(&config);
    log::debug!("{:?}", &config);

    if let Err(err) = runner::run(&config) {
        log_error_chain(&err);
        std::process::exit(1);
    }
}

fn get_config() -> strictcsp::model::Config {
    use clap::Parser;

    let args = strictcsp::model::CliArgs::parse();

    match strictcsp::model::Config::try_from(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(2);
        }
    }
}

/// Everything goes to stderr, stdout is reserved for the rewritten document.
fn init_logging(config: &strictcsp::model::Config) {
    if config.log_level != log::LevelFilter::Off {
        fern::Dispatch::new()
            .level(config.log_level)
            .format(|out, message, record| {
                out.finish(format_args!("[{}] {}", record.level(), message))
            })
            .chain(std::io::stderr())
            .apply()
            .expect("logging subscriber registration failed");
    } else {
        log::set_max_level(config.log_level);
    }
}

fn log_error_chain(err: &dyn std::error::Error) {
    log::error!("{}", err);

    let mut source = err.source();

    while let Some(cause) = source {
        log::error!("  caused by: {}", cause);
        source = cause.source();
    }
}
