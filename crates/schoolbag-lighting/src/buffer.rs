//! Frame buffer for the strip.

use schoolbag_hardware::{HardwareError, LedStrip, Rgb};

/// Ordered pixel colors, written to a strip as one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// A dark buffer of `len` pixels.
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![Rgb::BLACK; len],
        }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Set one pixel; out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Whether every pixel has `color`.
    pub fn is_uniform(&self, color: Rgb) -> bool {
        self.pixels.iter().all(|pixel| *pixel == color)
    }

    pub fn is_blank(&self) -> bool {
        self.is_uniform(Rgb::BLACK)
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Copy the buffer into the strip's frame buffer. The strip still needs
    /// a `show` to display it.
    ///
    /// # Errors
    /// Returns the first pixel write error.
    pub fn write_to<S: LedStrip>(&self, strip: &mut S) -> Result<(), HardwareError> {
        for (index, color) in self.pixels.iter().enumerate() {
            strip.set_pixel(index, *color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolbag_hardware::mock::MockLedStrip;

    #[test]
    fn test_new_buffer_is_blank() {
        let buffer = PixelBuffer::new(4);
        assert_eq!(buffer.len(), 4);
        assert!(buffer.is_blank());
    }

    #[test]
    fn test_set_ignores_out_of_range() {
        let mut buffer = PixelBuffer::new(2);
        buffer.set(1, Rgb::RED);
        buffer.set(2, Rgb::RED);

        assert_eq!(buffer.as_slice(), &[Rgb::BLACK, Rgb::RED]);
        assert_eq!(buffer.get(2), None);
    }

    #[test]
    fn test_uniform() {
        let mut buffer = PixelBuffer::new(3);
        buffer.fill(Rgb::gray(50));
        assert!(buffer.is_uniform(Rgb::gray(50)));

        buffer.set(0, Rgb::WHITE);
        assert!(!buffer.is_uniform(Rgb::gray(50)));
    }

    #[test]
    fn test_write_to_strip() {
        let (mut strip, _handle) = MockLedStrip::new(3);
        let mut buffer = PixelBuffer::new(3);
        buffer.set(2, Rgb::WHITE);

        buffer.write_to(&mut strip).unwrap();
        assert_eq!(strip.pixel(2).unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_write_to_shorter_strip_fails() {
        let (mut strip, _handle) = MockLedStrip::new(2);
        let buffer = PixelBuffer::new(3);

        assert!(matches!(
            buffer.write_to(&mut strip),
            Err(HardwareError::PixelOutOfRange { index: 2, count: 2 })
        ));
    }
}
