use anyhow::Result;
use tracing_subscriber::EnvFilter;
use virtual_bank::{
    shell::{Shell, ShellConfig},
    storage::json_file::JsonFileStore,
};

/// Logs go to stderr, verbosity is controlled with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let shell = Shell {
        input: std::io::stdin().lock(),
        output: &mut std::io::stdout(),
        store: JsonFileStore,
        config: ShellConfig::default(),
    };
    shell.run()
}
