//! Logging setup and structured diagnostics for the decoding layer.
//!
//! Library code only talks to the `log` facade. A binary or test that wants to
//! see the output calls [`init_logging`] once, which installs an `env_logger`
//! backend. `RUST_LOG` still overrides the level passed in.

use std::sync::Once;

use log::LevelFilter;

static INIT_LOGGER: Once = Once::new();

/// Installs the `env_logger` backend at `level`.
///
/// Only the first call has any effect. If another logger was installed first,
/// this silently does nothing.
pub fn init_logging(level: LevelFilter) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level);
        builder.parse_default_env();
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())
        });
        let _ = builder.try_init();
    });
}

/// Logs a structured key-value metric at `debug` level, only in debug builds.
///
/// ```ignore
/// log_metric!("event" = "decode_block", "encoding" = &encoding, "values" = &len);
/// ```
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            log::debug!("TSFILE_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(LevelFilter::Trace);
        init_logging(LevelFilter::Off);
        log_metric!("event" = "test", "value" = 1);
    }
}
