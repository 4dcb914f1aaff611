use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 優先；否則依 verbose 決定層級
fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "lab_attendance=debug,info"
    } else {
        "lab_attendance=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn base_layer<S>() -> fmt::Layer<S> {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

/// Compact console output, or one JSON object per line when `json` is set.
pub fn init_logger(verbose: bool, json: bool) {
    let (compact, json) = if json {
        (None, Some(base_layer().json()))
    } else {
        (Some(base_layer().compact()), None)
    };

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(compact)
        .with(json)
        .init();
}
