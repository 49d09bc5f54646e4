use std::str::FromStr;

use tracing::Level;

/// Install a compact fmt subscriber on stderr so stdout stays machine-readable.
pub fn init(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let level = Level::from_str(log_level)
        .map_err(|_| format!("invalid log level '{log_level}'"))?;

    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        // Module paths add nothing for a single binary
        .with_target(false)
        .with_max_level(level)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
