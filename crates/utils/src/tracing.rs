// Copyright 2025 Irreducible Inc.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global subscriber printing events to stderr.
///
/// The filter is read from `RUST_LOG` and defaults to `warn`. Calling this more than once is
/// harmless: only the first call installs a subscriber.
pub fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.try_init();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_init_tracing_twice() {
		init_tracing();
		init_tracing();
		tracing::debug!("subscriber installed");
	}
}
