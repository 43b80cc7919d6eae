//! Push button and strap sensors.
//!
//! Both inputs are sampled at a fixed rate and reduced to discrete events
//! for the lighting task: the button to short and long presses, the two
//! strap sensors to put-on and put-down transitions.

pub mod button;
pub mod presence;
pub mod task;

pub use button::{ButtonClassifier, ButtonConfig, ButtonEvent};
pub use presence::{PresenceConfig, PresenceDetector, PresenceEvent};
pub use task::{run_button, run_presence};
