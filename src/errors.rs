use std::fmt::Display;

/// Swallow an error after reporting it through the `log` facade.
///
/// Every non-fatal failure in the service (poll, refresh, notify, token file reads)
/// goes through this trait so there is one place where swallowed errors surface.
pub trait LogError<T> {
    fn log_error(self, context: &str);
    fn log_error_ok(self, context: &str) -> Option<T>;
}

impl<T, E: Display> LogError<T> for std::result::Result<T, E> {
    fn log_error(self, context: &str) {
        if let Err(e) = self {
            log::error!("{context}: {e}");
        }
    }

    fn log_error_ok(self, context: &str) -> Option<T> {
        match self {
            Ok(t) => Some(t),
            Err(e) => {
                log::error!("{context}: {e}");
                None
            }
        }
    }
}
