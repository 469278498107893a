//! Log output for the binary
//!
//! Everything goes to stderr so `--json` output on stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "ladder_solver=debug"
    } else {
        "ladder_solver=info"
    }
}

/// Install the global subscriber; `RUST_LOG` wins over `verbose`
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level() {
        assert_eq!(default_directive(false), "ladder_solver=info");
        assert_eq!(default_directive(true), "ladder_solver=debug");
    }
}
