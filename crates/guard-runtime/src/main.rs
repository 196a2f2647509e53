//! # SSID Guard
//!
//! Watches which network the host is associated with and raises an alert
//! whenever it is not on the whitelist.
//!
//! ## Runtime Layout
//!
//! ```text
//! ConnectionSupervisor ──link──→ NetworkMonitor ──channel(8)──→ AlertHandler
//!          │                          │                             │
//!          └──────────── pulse ───────┴──────────── pulse ──────────┘
//!                                     ▼
//!                                 Watchdog (8 s)
//!
//! control loop: stdin button ──200 ms──→ PolicyController ──→ Whitelist
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (from `SG_*` environment)
//! 2. Load and validate configuration
//! 3. Build components and populate the whitelist
//! 4. Start workers and the watchdog
//! 5. Sample the button until Ctrl+C

use std::sync::Arc;

use anyhow::{Context, Result};
use guard_runtime::adapters::StdinButton;
use guard_runtime::{GuardConfig, GuardPorts, GuardRuntime, COMPONENT};
use guard_telemetry::{init_telemetry, log_event, TelemetryConfig};

/// Load configuration from defaults and environment.
fn load_config() -> GuardConfig {
    let mut config = GuardConfig::default();
    config.apply_overrides(|key| std::env::var(key).ok());
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry_config = TelemetryConfig::from_env();
    let service_name = telemetry_config.service_name.clone();
    let _telemetry = init_telemetry(telemetry_config).context("Failed to initialize telemetry")?;

    log_event!(info, COMPONENT, "===========================================");
    log_event!(
        info,
        COMPONENT,
        "Guard starting",
        service = %service_name,
        version = env!("CARGO_PKG_VERSION")
    );
    log_event!(info, COMPONENT, "===========================================");

    let config = load_config();

    let button = Arc::new(StdinButton::new());
    // Detached: an open stdin must not keep the process alive after Ctrl+C
    let _reader = button
        .spawn_reader()
        .context("Failed to start button reader")?;
    let ports = GuardPorts::host(button);

    let mut runtime = GuardRuntime::start(config, ports)
        .await
        .context("Failed to start guard")?;

    log_event!(info, COMPONENT, "Guard is running. Press Enter to toggle policy, Ctrl+C to stop.");
    tokio::select! {
        _ = runtime.run_control_loop() => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
        }
    }

    runtime.shutdown();
    Ok(())
}
