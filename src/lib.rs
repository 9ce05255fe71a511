//! Boundary Life (workspace facade crate).
//!
//! Re-exports the member crates under one name so binaries, integration
//! tests and benches can use `boundary_life::{core,engine,...}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use boundary_life_adapter as adapter;
pub use boundary_life_core as core;
pub use boundary_life_engine as engine;
pub use boundary_life_input as input;
pub use boundary_life_term as term;
pub use boundary_life_types as types;

/// Initialise `env_logger` with `default_filter` unless `RUST_LOG` is set.
///
/// When `log_path` is given, records are appended to that file instead of
/// stderr (the terminal host draws on stderr's terminal).
pub fn init_logging(default_filter: &str, log_path: Option<&str>) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    builder.format_timestamp_millis();

    if let Some(path) = log_path {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}
