//! # Adapter Implementations
//!
//! Host implementations of the component outbound ports.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  SimulatedNetwork → NetworkStatusProvider (sg-02-connection)  │
//! │  LogIndicator     → AlertIndicator        (sg-04-alerting)    │
//! │  StdinButton      → PolicyInput           (sg-05-policy)      │
//! │  ProcessRestart   → ResetHandler          (sg-06-watchdog)    │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod button;
pub mod indicator;
pub mod simulated_network;

use std::sync::Arc;

use sg_02_connection::NetworkStatusProvider;
use sg_04_alerting::AlertIndicator;
use sg_05_policy::PolicyInput;
use sg_06_watchdog::{ProcessRestart, ResetHandler};

pub use button::StdinButton;
pub use indicator::LogIndicator;
pub use simulated_network::SimulatedNetwork;

/// The outbound ports the runtime needs, bundled for the container.
#[derive(Clone)]
pub struct GuardPorts {
    pub network: Arc<dyn NetworkStatusProvider>,
    pub indicator: Arc<dyn AlertIndicator>,
    pub input: Arc<dyn PolicyInput>,
    pub reset: Arc<dyn ResetHandler>,
}

impl GuardPorts {
    /// Host adapters: simulated radio, log indicator, stdin button and a
    /// process-exit reset.
    pub fn host(button: Arc<StdinButton>) -> Self {
        Self {
            network: Arc::new(SimulatedNetwork::new()),
            indicator: Arc::new(LogIndicator::new()),
            input: button,
            reset: Arc::new(ProcessRestart::default()),
        }
    }
}
