//! Stick Arcade - fixed-tick simulation core for three arcade prototypes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, per-tick step)
//! - `driver`: Fixed-rate frame loop (input -> tick -> render -> wait)
//! - `platform`: Input and clock abstractions provided by the host
//! - `renderer`: Read-only render callback and scene building
//! - `settings` / `tuning` / `bindings`: Data-driven run configuration
//!
//! The three variants (team battle, ball breaker, two-player fighter) share
//! one [`sim::tick`] step; the variant only selects which capability tables
//! the step consults.

pub mod bindings;
pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use bindings::{Bindings, Control};
pub use driver::{FrameDriver, RunSummary};
pub use error::ConfigError;
pub use settings::RunSettings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Default simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Health fraction above which an entity draws in its "healthy" tier
    pub const HEALTHY_FRACTION: f32 = 0.6;
    /// Health fraction above which an entity draws in its "worn" tier
    pub const WORN_FRACTION: f32 = 0.3;

    /// Ticks a transient notice stays on screen (2 seconds)
    pub const NOTICE_TICKS: u32 = 2 * TICK_RATE;
}
