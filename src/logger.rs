use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber for a command-line tool.
///
/// `verbose` lowers the fallback filter to `debug`; an explicit `RUST_LOG`
/// always wins. Span close events (with timings) are printed whenever the
/// effective filter admits debug output. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { DEFAULT_FILTER };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    let span_events = if debug_enabled(&env_filter.to_string()) {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}

fn debug_enabled(filter: &str) -> bool {
    filter.contains("debug") || filter.contains("trace")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_detection() {
        assert!(debug_enabled("debug"));
        assert!(debug_enabled("info,focal_plane_adjuster_rs::fitting=trace"));
        assert!(!debug_enabled("info"));
        assert!(!debug_enabled("warn"));
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
