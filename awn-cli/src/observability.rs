use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// filter. Logs go to stderr so report output on stdout stays clean.
pub fn init_observability(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(io::stderr)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .init();
    }
}
