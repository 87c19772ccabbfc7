//! Logging setup.
//!
//! Installed once at process start. Lines are written to stderr as
//! `[<timestamp>][<LEVEL>] <target>: <message>`, with the level colorized
//! when stderr is a terminal. `RUST_LOG` can raise verbosity further.

use std::fmt;
use std::io::{self, IsTerminal};

use colored::{Color, Colorize};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Map a verbosity count to the base log level: 0=warn, 1=info, 2+=debug.
fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn level_color(level: Level) -> Color {
    match level {
        Level::TRACE | Level::DEBUG => Color::Cyan,
        Level::INFO => Color::Green,
        Level::WARN => Color::Yellow,
        Level::ERROR => Color::Red,
    }
}

struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let level = *meta.level();

        if writer.has_ansi_escapes() {
            let label = level.to_string().color(level_color(level));
            write!(writer, "[{timestamp}][{label}] {}: ", meta.target())?;
        } else {
            write!(writer, "[{timestamp}][{level}] {}: ", meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init(verbosity: u8) {
    let level = level_for_verbosity(verbosity);
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(io::stderr().is_terminal())
        .event_format(LineFormat)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(1), Level::INFO);
        assert_eq!(level_for_verbosity(2), Level::DEBUG);
        assert_eq!(level_for_verbosity(7), Level::DEBUG);
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(level_color(Level::DEBUG), Color::Cyan);
        assert_eq!(level_color(Level::INFO), Color::Green);
        assert_eq!(level_color(Level::WARN), Color::Yellow);
        assert_eq!(level_color(Level::ERROR), Color::Red);
    }
}
