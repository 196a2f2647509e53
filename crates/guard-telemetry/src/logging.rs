//! Structured log events.
//!
//! Every guard event carries:
//! - `component`: the emitting crate (`sg-03-monitor`, `sg-04-alerting`, ...)
//! - `severity`: `INFO` for status lines, `ALERT` for unauthorized networks
//! - `message`: the event text
//!
//! `ALERT` events are emitted at `WARN` level so they survive the default
//! filter.

/// Severity tag for routine status events.
pub const SEVERITY_INFO: &str = "INFO";

/// Severity tag for unauthorized-network events.
pub const SEVERITY_ALERT: &str = "ALERT";

/// Log a status event tagged with a component.
#[macro_export]
macro_rules! log_event {
    (info, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = $component,
            severity = $crate::logging::SEVERITY_INFO,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            component = $component,
            severity = $crate::logging::SEVERITY_INFO,
            $($($field)*,)?
            $msg
        )
    };

    (error, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            component = $component,
            severity = $crate::logging::SEVERITY_INFO,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            component = $component,
            severity = $crate::logging::SEVERITY_INFO,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an unauthorized-network alert.
#[macro_export]
macro_rules! log_alert {
    ($component:expr, $msg:expr, $identifier:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            component = $component,
            severity = $crate::logging::SEVERITY_ALERT,
            identifier = %$identifier,
            $($($field)*,)?
            $msg
        )
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand_without_subscriber() {
        crate::log_event!(info, "sg-test", "status line", items = 5);
        crate::log_event!(debug, "sg-test", "quiet line");
        crate::log_alert!("sg-test", "unauthorized network", "Rogue-AP");
    }
}
