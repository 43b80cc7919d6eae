//! Mock LED strip.
//!
//! Pixel writes land in a private frame buffer; [`show`](LedStrip::show)
//! copies it to the shared "shown" buffer visible through the handle, the
//! way a real strip only changes on latch.

use crate::{HardwareError, Result, traits::LedStrip, types::Rgb};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct Shown {
    pixels: Vec<Rgb>,
    show_count: u64,
    disconnected: bool,
}

fn lock(shown: &Mutex<Shown>) -> MutexGuard<'_, Shown> {
    shown.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock addressable LED strip.
#[derive(Debug)]
pub struct MockLedStrip {
    frame: Vec<Rgb>,
    shown: Arc<Mutex<Shown>>,
    name: String,
}

impl MockLedStrip {
    /// Create a dark strip of `pixel_count` pixels.
    pub fn new(pixel_count: usize) -> (Self, MockLedStripHandle) {
        let shown = Arc::new(Mutex::new(Shown {
            pixels: vec![Rgb::BLACK; pixel_count],
            show_count: 0,
            disconnected: false,
        }));

        let strip = Self {
            frame: vec![Rgb::BLACK; pixel_count],
            shown: Arc::clone(&shown),
            name: "Mock LED Strip".to_string(),
        };

        (strip, MockLedStripHandle { shown })
    }
}

impl LedStrip for MockLedStrip {
    fn pixel_count(&self) -> usize {
        self.frame.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<()> {
        let count = self.frame.len();
        let pixel = self
            .frame
            .get_mut(index)
            .ok_or_else(|| HardwareError::pixel_out_of_range(index, count))?;
        *pixel = color;
        Ok(())
    }

    fn pixel(&self, index: usize) -> Result<Rgb> {
        self.frame
            .get(index)
            .copied()
            .ok_or_else(|| HardwareError::pixel_out_of_range(index, self.frame.len()))
    }

    async fn show(&mut self) -> Result<()> {
        let mut shown = lock(&self.shown);
        if shown.disconnected {
            return Err(HardwareError::disconnected(self.name.clone()));
        }
        shown.pixels.clone_from(&self.frame);
        shown.show_count += 1;
        Ok(())
    }
}

/// Observer for a [`MockLedStrip`].
#[derive(Debug, Clone)]
pub struct MockLedStripHandle {
    shown: Arc<Mutex<Shown>>,
}

impl MockLedStripHandle {
    /// Pixels as of the last `show`.
    pub fn pixels(&self) -> Vec<Rgb> {
        lock(&self.shown).pixels.clone()
    }

    /// One pixel as of the last `show`.
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        lock(&self.shown).pixels.get(index).copied()
    }

    /// Number of completed `show` calls.
    pub fn show_count(&self) -> u64 {
        lock(&self.shown).show_count
    }

    /// Whether every shown pixel is off.
    pub fn is_blank(&self) -> bool {
        lock(&self.shown).pixels.iter().all(Rgb::is_black)
    }

    /// Make further `show` calls fail.
    pub fn disconnect(&self) {
        lock(&self.shown).disconnected = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_invisible_until_show() {
        let (mut strip, handle) = MockLedStrip::new(4);

        strip.set_pixel(2, Rgb::RED).unwrap();
        assert_eq!(strip.pixel(2).unwrap(), Rgb::RED);
        assert!(handle.is_blank());

        strip.show().await.unwrap();
        assert_eq!(handle.pixel(2), Some(Rgb::RED));
        assert_eq!(handle.show_count(), 1);
        assert!(!handle.is_blank());
    }

    #[test]
    fn test_out_of_range() {
        let (mut strip, _handle) = MockLedStrip::new(3);

        assert_eq!(strip.pixel_count(), 3);
        assert!(matches!(
            strip.set_pixel(3, Rgb::WHITE),
            Err(HardwareError::PixelOutOfRange { index: 3, count: 3 })
        ));
        assert!(strip.pixel(7).is_err());
    }

    #[tokio::test]
    async fn test_disconnect() {
        let (mut strip, handle) = MockLedStrip::new(1);
        handle.disconnect();

        assert!(strip.show().await.unwrap_err().is_fatal());
    }
}
