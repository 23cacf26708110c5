use slog::{o, Discard, Drain, Logger};

pub use slog_async::Async;
pub use slog_term::TermDecorator;

/// Compact terminal logger, every record carries the `component` key.
pub fn new_logger(component: &str) -> Logger {
    let decorator = TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = Async::new(drain).build().fuse();

    Logger::root(drain, o!("component" => component.to_owned()))
}

/// A logger that drops every record, used in tests & examples.
pub fn discard_logger() -> Logger {
    Logger::root(Discard, o!())
}
