//! LED strip animations.
//!
//! [`AnimationEngine`] holds the lighting mode, the selected animation and
//! the phase counters, and renders frames into a [`PixelBuffer`]. The
//! lighting task ([`task::run_lighting`]) owns the engine and the strip;
//! everything else steers it through a [`LightingHandle`].
//!
//! # Example
//!
//! ```
//! use schoolbag_core::{AnimationType, LightingMode};
//! use schoolbag_lighting::{AnimationEngine, EngineConfig};
//!
//! let mut engine = AnimationEngine::new(EngineConfig::default().with_pixel_count(8));
//! engine.set_mode(LightingMode::Automatic);
//! engine.set_animation(AnimationType::Rainbow);
//!
//! engine.put_on();
//! assert!(engine.tick());
//! assert!(!engine.buffer().is_blank());
//!
//! engine.put_down();
//! assert!(engine.buffer().is_blank());
//! ```

pub mod buffer;
pub mod command;
pub mod engine;
pub mod task;
pub mod wheel;

pub use buffer::PixelBuffer;
pub use command::{LightingCommand, LightingHandle};
pub use engine::{AnimationEngine, EngineConfig};
pub use task::run_lighting;
pub use wheel::wheel;
