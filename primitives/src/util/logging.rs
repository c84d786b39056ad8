use slog::{o, Discard, Drain, Logger};

pub use slog_async::Async;
pub use slog_term::{FullFormat, TermDecorator};

/// Creates a [`Logger`] writing to the terminal through an [`Async`] drain.
///
/// Every record carries the `component` key, e.g. `component => escrow`.
pub fn new_logger(component: &'static str) -> Logger {
    let decorator = TermDecorator::new().stderr().build();
    let drain = FullFormat::new(decorator)
        .use_original_order()
        .build()
        .fuse();
    let drain = Async::new(drain).build().fuse();

    Logger::root(drain, o!("component" => component))
}

/// A [`Logger`] which drops every record, used in tests.
pub fn discard_logger() -> Logger {
    Logger::root(Discard, o!())
}

#[cfg(test)]
mod test {
    use super::*;
    use slog::info;

    #[test]
    fn loggers_accept_records() {
        let logger = new_logger("test").new(o!("channel" => "0x0 -> 0x1"));
        info!(&logger, "Opened channel"; "deposit" => 100);

        info!(&discard_logger(), "Dropped");
    }
}
