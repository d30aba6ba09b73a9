use crate::errors::Result;
use fern::Dispatch;
use log::LevelFilter;

/// Maps the number of `-v` flags to a level filter.
pub fn level_from_occurrences(occurrences: u8) -> LevelFilter {
    match occurrences {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs a logger that writes to stderr, leaving stdout for the report.
pub fn init_logger(level: LevelFilter) -> Result<()> {
    Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    log::debug!("Logger initialized at level {level}");
    Ok(())
}
