pub mod error;
pub mod config;
pub mod request;
pub mod format;
pub mod view;
pub mod service;
pub mod client;

pub use client::QueryWidget;
pub use config::WidgetConfig;
pub use error::Error;
pub use format::format_answer;
pub use view::{MemoryView, View};

/*

solar-query: client for the solar certification analysis service.
One query box, one request at a time, answers laid out by shape
(solar-resource report, zoning text, or plain).

solar-query/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Widget interface types
│   ├── error.rs        # Error type, Display = panel text
│   ├── config.rs       # Base URL and endpoint paths
│   ├── request.rs      # /query wire types
│   ├── format.rs       # Answer and error panel markup
│   ├── view.rs         # Display surface trait + in-memory view
│   ├── service.rs      # HTTP calls (query, health probe)
│   └── client.rs       # QueryWidget task and event loop
└── tests/

*/

/// Install env_logger from RUST_LOG. Safe to call more than once.
pub fn init_logging()
{   let _ = env_logger::Builder::from_default_env()
      .format_timestamp_millis()
      .try_init();
}

/// WIDGET API INTERFACE:

// ===== SubmitQuery =====

pub type SubmitQueryReply = SubmitOutcome;
pub type SubmitQueryReplySender
  = tokio::sync::mpsc::UnboundedSender<SubmitQueryReply>;

pub struct SubmitQueryArgs
{   pub text: String
  , pub reply: SubmitQueryReplySender
}

// ===== CheckHealth =====

pub type CheckHealthReply = ConnectionStatus;
pub type CheckHealthReplySender
  = tokio::sync::mpsc::UnboundedSender<CheckHealthReply>;

pub struct CheckHealthArgs
{   pub reply: CheckHealthReplySender
}

// ===== IsInFlight =====

pub type IsInFlightReply = bool;
pub type IsInFlightReplySender
  = tokio::sync::mpsc::UnboundedSender<IsInFlightReply>;

pub struct IsInFlightArgs
{   pub reply: IsInFlightReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== WidgetHand (sender side) =====

pub struct WidgetHand
{   pub submit_query_tx
      : tokio::sync::mpsc::UnboundedSender<SubmitQueryArgs>
  , pub check_health_tx
      : tokio::sync::mpsc::UnboundedSender<CheckHealthArgs>
  , pub is_in_flight_tx
      : tokio::sync::mpsc::UnboundedSender<IsInFlightArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== WidgetFoot (receiver side) =====

pub struct WidgetFoot
{   pub submit_query_rx
      : tokio::sync::mpsc::UnboundedReceiver<SubmitQueryArgs>
  , pub check_health_rx
      : tokio::sync::mpsc::UnboundedReceiver<CheckHealthArgs>
  , pub is_in_flight_rx
      : tokio::sync::mpsc::UnboundedReceiver<IsInFlightArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}

/// WIDGET STRUCTURES:

/// What a submission ended in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome
{   /// Answer shown; carries the rendered markup
    Answered
    {   markup: String
    }
  , /// Error panel shown
    Failed(crate::error::Error)
  , /// A request was already in flight; nothing happened
    Ignored
}

/// Why the health probe failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthFailure
{   /// Service answered with a non-success status
    ApiError
  , /// Service could not be reached
    ConnectionFailed
}

/// Connectivity indicator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus
{   Connecting
  , Connected
  , Error(HealthFailure)
}

impl ConnectionStatus
{   /// CSS class of the indicator
    pub fn class(&self) -> &'static str
    {   match self
        {   ConnectionStatus::Connecting => "connecting"
          , ConnectionStatus::Connected => "connected"
          , ConnectionStatus::Error(_) => "error"
        }
    }

    /// Text next to the indicator
    pub fn label(&self) -> &'static str
    {   match self
        {   ConnectionStatus::Connecting => "Connecting..."
          , ConnectionStatus::Connected => "Connected"
          , ConnectionStatus::Error(HealthFailure::ApiError) => "API Error"
          , ConnectionStatus::Error(HealthFailure::ConnectionFailed) => {
              "Connection Failed"
            }
        }
    }
}
