pub mod command;
pub mod config;
pub mod error;
pub mod format;
pub mod kernel;
pub mod telemetry;

// Re-export specific items for convenient access
pub use command::Command;
pub use config::RecorderConfig;
pub use error::{CommandError, ConfigError, FormatError, RecorderError};
pub use kernel::host::{ActorRef, GameMode, LevelInfo, MapThing, PlayerRef, SimulationHost};
pub use kernel::session::RecorderState;
pub use kernel::time::{Tick, TICRATE};
pub use telemetry::StatsRecorder;
