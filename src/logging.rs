use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

use crate::util::env::env_flag;

/// Chatty dependencies held at `warn` unless the filter names them itself.
const QUIET_TARGETS: [&str; 5] = ["sqlx", "hyper", "hyper_util", "reqwest", "html5ever"];

/// `base` plus a `=warn` directive for every quiet target it leaves out.
pub fn default_directives(base: &str) -> String {
    let named: Vec<&str> = base
        .split(',')
        .filter_map(|d| d.split('=').next())
        .map(str::trim)
        .collect();
    let mut directives = vec![base.trim().to_string()];
    directives.extend(
        QUIET_TARGETS
            .iter()
            .filter(|t| !named.contains(t))
            .map(|t| format!("{t}=warn")),
    );
    directives.retain(|d| !d.is_empty());
    directives.join(",")
}

/// Global fmt subscriber for both binaries. `RUST_LOG` wins over
/// `default_filter`; `LOG_COMPACT=1` switches to single-line output without
/// file/line locations.
pub fn init_tracing(default_filter: &str) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(default_filter)));
    let compact = env_flag("LOG_COMPACT", false);

    let builder = SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(!compact)
        .with_line_number(!compact)
        .with_file(!compact);
    let res = if compact {
        builder.compact().try_init()
    } else {
        builder.try_init()
    };
    res.map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_targets_are_appended_once() {
        let out = default_directives("info");
        assert_eq!(out, "info,sqlx=warn,hyper=warn,hyper_util=warn,reqwest=warn,html5ever=warn");
    }

    #[test]
    fn explicit_directives_are_left_alone() {
        let out = default_directives("debug,sqlx=info,reqwest=debug");
        assert!(out.starts_with("debug,sqlx=info,reqwest=debug"));
        assert!(!out.contains("sqlx=warn"));
        assert!(!out.contains("reqwest=warn"));
        assert!(out.contains("hyper=warn"));
    }
}
