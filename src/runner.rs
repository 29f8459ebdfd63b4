use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use strictcsp::{
    DocumentError, StrictCsp,
    model::{Config, OutputTarget, is_stdin},
};

#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("Couldn't read `{path}`")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Couldn't write `{path}`")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Couldn't rewrite `{path}`")]
    Document {
        path: PathBuf,
        source: DocumentError,
    },
}

pub fn run(config: &Config) -> Result<(), RunError> {
    let strict_csp =
        StrictCsp::new(config.base_directives.clone()).with_style_hashes(config.hash_styles);
    let mut policies = Vec::with_capacity(config.inputs.len());

    for input in &config.inputs {
        let html = read_input(input)?;
        let processed = strict_csp
            .apply(&html)
            .map_err(|source| RunError::Document {
                path: input.clone(),
                source,
            })?;

        match &config.output {
            OutputTarget::Stdout => write_output(Path::new("-"), &processed.html)?,
            OutputTarget::File(path) => write_output(path, &processed.html)?,
            OutputTarget::InPlace => write_output(input, &processed.html)?,
        }

        log::info!("'{}' => {}", input.display(), &processed.policy);
        policies.push(processed.policy);
    }

    if let Some(path) = config.policy_output.as_deref() {
        let mut contents = policies.join("\n");

        contents.push('\n');
        write_output(path, &contents)?;
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String, RunError> {
    let map_err = |source| RunError::Read {
        path: path.to_path_buf(),
        source,
    };

    if is_stdin(path) {
        let mut html = String::new();

        std::io::stdin().read_to_string(&mut html).map_err(map_err)?;

        Ok(html)
    } else {
        std::fs::read_to_string(path).map_err(map_err)
    }
}

fn write_output(path: &Path, contents: &str) -> Result<(), RunError> {
    let map_err = |source| RunError::Write {
        path: path.to_path_buf(),
        source,
    };

    if is_stdin(path) {
        let mut stdout = std::io::stdout().lock();

        stdout.write_all(contents.as_bytes()).map_err(map_err)?;
        stdout.flush().map_err(map_err)
    } else {
        std::fs::write(path, contents).map_err(map_err)
    }
}
