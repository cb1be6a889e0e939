//! Stats telemetry.
//!
//! Read-only with respect to the simulation: the host pushes observations in
//! through `StatsRecorder`, and nothing here feeds back into gameplay.
//! Records carry table handles and integer positions only; player names live
//! in the player table.

pub mod buffer;
pub mod event;
pub mod identity;
pub mod kinds;
pub mod metrics;
pub mod recorder;

pub use buffer::{coalesce_policy, AppendOutcome, CoalescePolicy, EventBuffer, Occurrence};
pub use event::{EventKind, EventRecord, Handle, Vec3};
pub use kinds::{ItemKind, MeansOfDeath, Team, WeaponKind};
pub use metrics::{compute_snapshot, TelemetrySnapshot};
pub use recorder::StatsRecorder;
