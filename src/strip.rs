//! Light strip abstraction
//!
//! Owns the cell colors of a strip with a fixed number of cells and pushes
//! them to an [`OutputDriver`] on [`LightStrip::present`]. Presenting costs
//! wall-clock time proportional to the strip length, so callers only present
//! when something actually changed.

use smart_leds::SmartLedsWrite;

use crate::OutputDriver;
use crate::bounds::{CellRange, OutOfBounds, bounded};
use crate::color::{OFF, Rgb};
use crate::math8::scale8;

/// Strip of `N` addressable cells
pub struct LightStrip<D: OutputDriver, const N: usize> {
    driver: D,
    cells: [Rgb; N],
    output: [Rgb; N],
    brightness: u8,
}

impl<D: OutputDriver, const N: usize> LightStrip<D, N> {
    /// Create a dark strip
    ///
    /// `brightness` (0-255) scales every present; the logical cell colors are
    /// kept unscaled.
    pub fn new(driver: D, brightness: u8) -> Self {
        Self {
            driver,
            cells: [OFF; N],
            output: [OFF; N],
            brightness,
        }
    }

    /// Number of cells
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Current (unscaled) cell colors
    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }

    /// Number of cells that are not off
    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell != OFF).count()
    }

    /// Set every cell in `range` to `color`
    ///
    /// Nothing is written to the hardware until [`Self::present`].
    pub fn set_range(&mut self, range: CellRange, color: Rgb) -> Result<(), OutOfBounds> {
        bounded(&mut self.cells, range)?.fill(color);
        Ok(())
    }

    /// Set every cell to `color`
    pub fn fill(&mut self, color: Rgb) {
        self.cells.fill(color);
    }

    /// Flush cell colors to the hardware
    pub fn present(&mut self) {
        if self.brightness == 255 {
            self.driver.write(&self.cells);
            return;
        }

        for (out, cell) in self.output.iter_mut().zip(self.cells.iter()) {
            *out = Rgb {
                r: scale8(cell.r, self.brightness),
                g: scale8(cell.g, self.brightness),
                b: scale8(cell.b, self.brightness),
            };
        }
        self.driver.write(&self.output);
    }

    /// Switch the strip power rail
    pub fn set_enabled(&mut self, enabled: bool) {
        self.driver.set_enabled(enabled);
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

/// [`OutputDriver`] over any `smart-leds` writer (WS2812 and friends)
///
/// A failed write drops that frame; the next present retries with fresh
/// colors. Failures are counted so the caller can notice a dead strip.
pub struct SmartLedsOutput<W> {
    writer: W,
    failed_writes: u32,
}

impl<W> SmartLedsOutput<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            failed_writes: 0,
        }
    }

    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Number of frames the writer rejected so far
    pub const fn failed_writes(&self) -> u32 {
        self.failed_writes
    }
}

impl<W: SmartLedsWrite<Color = Rgb>> OutputDriver for SmartLedsOutput<W> {
    fn write(&mut self, colors: &[Rgb]) {
        if self.writer.write(colors.iter().copied()).is_err() {
            self.failed_writes = self.failed_writes.saturating_add(1);
            crate::log!(
                "[SmartLedsOutput.write] strip write failed ({} so far)",
                self.failed_writes
            );
        }
    }
}
