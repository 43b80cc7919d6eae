//! Mode and animation state machine.
//!
//! The engine decides whether the strip is lit from the mode and the two
//! latched inputs (`worn`, `manual_on`), and renders the selected animation
//! from three phase counters:
//!
//! | counter        | modulus      | used by                 |
//! |----------------|--------------|-------------------------|
//! | `color_phase`  | 256          | rainbow, cycle          |
//! | `pixel_phase`  | pixel count  | wipe                    |
//! | `toggle_phase` | 3            | chase, alert            |
//!
//! Every counter advances on every tick, before the animation runs.

use crate::buffer::PixelBuffer;
use crate::command::LightingCommand;
use crate::wheel::wheel;
use schoolbag_core::constants::{CHASE_SPACING, CONSTANT_WHITE_LEVEL, DEFAULT_PIXEL_COUNT, WHEEL_SIZE};
use schoolbag_core::{AnimationType, LightingMode};
use schoolbag_hardware::Rgb;

/// Strip geometry and fixed colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub pixel_count: usize,

    /// Channel level of the constant animation's dim white.
    pub constant_level: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pixel_count: DEFAULT_PIXEL_COUNT,
            constant_level: CONSTANT_WHITE_LEVEL,
        }
    }
}

impl EngineConfig {
    pub fn with_pixel_count(mut self, pixel_count: usize) -> Self {
        self.pixel_count = pixel_count;
        self
    }

    pub fn with_constant_level(mut self, level: u8) -> Self {
        self.constant_level = level;
        self
    }
}

/// Lighting state machine over a [`PixelBuffer`].
///
/// Every mutating method returns `true` when the buffer changed and has to
/// be flushed to the strip.
#[derive(Debug, Clone)]
pub struct AnimationEngine {
    config: EngineConfig,
    buffer: PixelBuffer,
    mode: LightingMode,
    animation: AnimationType,
    color_phase: u8,
    pixel_phase: usize,
    toggle_phase: usize,
    worn: bool,
    manual_on: bool,
}

impl AnimationEngine {
    /// A dark engine in `Off` mode with the default animation.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            buffer: PixelBuffer::new(config.pixel_count),
            mode: LightingMode::default(),
            animation: AnimationType::default(),
            color_phase: 0,
            pixel_phase: 0,
            toggle_phase: 0,
            worn: false,
            manual_on: false,
        }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn mode(&self) -> LightingMode {
        self.mode
    }

    pub fn animation(&self) -> AnimationType {
        self.animation
    }

    pub fn is_worn(&self) -> bool {
        self.worn
    }

    pub fn is_manual_on(&self) -> bool {
        self.manual_on
    }

    pub fn color_phase(&self) -> u8 {
        self.color_phase
    }

    pub fn pixel_phase(&self) -> usize {
        self.pixel_phase
    }

    pub fn toggle_phase(&self) -> usize {
        self.toggle_phase
    }

    /// Whether the current mode lets the animation run.
    pub fn is_active(&self) -> bool {
        match self.mode {
            LightingMode::Off => false,
            LightingMode::Manual => self.manual_on,
            LightingMode::Automatic => self.worn,
        }
    }

    /// Whether the next tick has a second, exit frame.
    pub fn needs_exit(&self) -> bool {
        self.is_active() && self.animation.has_exit()
    }

    pub fn set_mode(&mut self, mode: LightingMode) -> bool {
        self.mode = mode;
        self.settle()
    }

    /// Select an animation. Switching clears leftovers of the previous one.
    pub fn set_animation(&mut self, animation: AnimationType) -> bool {
        if animation == self.animation {
            return false;
        }
        self.animation = animation;
        self.blank()
    }

    /// Advance to the next animation in cycling order.
    pub fn next_animation(&mut self) -> bool {
        self.set_animation(self.animation.next())
    }

    /// The bag was put on. Drawing starts with the next tick.
    pub fn put_on(&mut self) -> bool {
        self.worn = true;
        false
    }

    /// The bag was put down; blanks at once in automatic mode.
    pub fn put_down(&mut self) -> bool {
        self.worn = false;
        self.settle()
    }

    /// Flip the manual on/off latch; blanks at once when it turns the
    /// strip off.
    pub fn toggle_lighting(&mut self) -> bool {
        self.manual_on = !self.manual_on;
        self.settle()
    }

    pub fn apply(&mut self, command: LightingCommand) -> bool {
        match command {
            LightingCommand::PutOn => self.put_on(),
            LightingCommand::PutDown => self.put_down(),
            LightingCommand::ToggleLighting => self.toggle_lighting(),
            LightingCommand::NextAnimation => self.next_animation(),
            LightingCommand::SetMode(mode) => self.set_mode(mode),
            LightingCommand::SetAnimation(animation) => self.set_animation(animation),
        }
    }

    /// Turn every pixel off.
    pub fn blank(&mut self) -> bool {
        if self.buffer.is_blank() {
            return false;
        }
        self.buffer.fill(Rgb::BLACK);
        true
    }

    /// Render one frame: advance the phases, then run the animation's
    /// entry step. Inactive engines only blank.
    pub fn tick(&mut self) -> bool {
        if !self.is_active() {
            return self.blank();
        }
        let count = self.buffer.len();
        if count == 0 {
            return false;
        }

        self.color_phase = self.color_phase.wrapping_add(1);
        self.pixel_phase = (self.pixel_phase + 1) % count;
        self.toggle_phase = (self.toggle_phase + 1) % CHASE_SPACING;

        match self.animation {
            AnimationType::Constant => self.constant(),
            AnimationType::Rainbow => self.rainbow(),
            AnimationType::Cycle => self.cycle(),
            AnimationType::Wipe => self.wipe(),
            AnimationType::Chase => self.chase(Rgb::WHITE),
            AnimationType::Alert => self.alert(),
        }
    }

    /// Run the exit step of the current animation, one interval after
    /// [`tick`](Self::tick). Only the chase has one.
    pub fn tick_exit(&mut self) -> bool {
        if !self.needs_exit() {
            return false;
        }
        match self.animation {
            AnimationType::Chase => self.chase(Rgb::BLACK),
            _ => false,
        }
    }

    fn constant(&mut self) -> bool {
        let dim_white = Rgb::gray(self.config.constant_level);
        if self.buffer.is_uniform(dim_white) {
            return false;
        }
        self.buffer.fill(dim_white);
        true
    }

    fn rainbow(&mut self) -> bool {
        for index in 0..self.buffer.len() {
            let pos = (index + usize::from(self.color_phase)) % WHEEL_SIZE;
            self.buffer.set(index, wheel(pos as u8));
        }
        true
    }

    fn cycle(&mut self) -> bool {
        let count = self.buffer.len();
        for index in 0..count {
            let pos = (index * WHEEL_SIZE / count + usize::from(self.color_phase)) % WHEEL_SIZE;
            self.buffer.set(index, wheel(pos as u8));
        }
        true
    }

    fn wipe(&mut self) -> bool {
        let count = self.buffer.len();
        let previous = (self.pixel_phase + count - 1) % count;
        self.buffer.set(previous, Rgb::BLACK);
        self.buffer.set(self.pixel_phase, Rgb::WHITE);
        true
    }

    fn chase(&mut self, color: Rgb) -> bool {
        for index in (self.toggle_phase..self.buffer.len()).step_by(CHASE_SPACING) {
            self.buffer.set(index, color);
        }
        true
    }

    fn alert(&mut self) -> bool {
        if self.toggle_phase != 0 {
            return false;
        }
        if self.buffer.is_uniform(Rgb::RED) {
            self.buffer.fill(Rgb::BLACK);
        } else {
            self.buffer.fill(Rgb::RED);
        }
        true
    }

    fn settle(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.blank()
    }
}
