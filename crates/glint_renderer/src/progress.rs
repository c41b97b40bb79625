//! Render progress reporting.
//!
//! Purely observational: the renderer never reads anything back.

/// Receives a notification after every finished scanline.
///
/// Scanlines may finish on several threads at once.
pub trait Progress: Sync {
    /// A scanline finished; `remaining` scanlines are still to go.
    fn scanline_done(&self, remaining: u32);

    /// Every scanline has been written to the sink.
    fn finished(&self) {}
}

/// Reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn scanline_done(&self, _remaining: u32) {}
}

/// Reports through the `log` facade.
///
/// Every scanline is logged at debug level; info level gets a line each time
/// another tenth of the image is done.
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    total: u32,
}

impl LogProgress {
    pub fn new(total_scanlines: u32) -> Self {
        Self {
            total: total_scanlines.max(1),
        }
    }

    fn percent_done(&self, remaining: u32) -> u32 {
        (self.total.saturating_sub(remaining)) * 100 / self.total
    }
}

impl Progress for LogProgress {
    fn scanline_done(&self, remaining: u32) {
        log::debug!("Scanlines remaining: {}", remaining);

        let done = self.percent_done(remaining);
        let before = self.percent_done(remaining + 1);
        if done / 10 != before / 10 {
            log::info!("{}% done", done / 10 * 10);
        }
    }

    fn finished(&self) {
        log::info!("Done.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_done() {
        let progress = LogProgress::new(200);
        assert_eq!(progress.percent_done(200), 0);
        assert_eq!(progress.percent_done(100), 50);
        assert_eq!(progress.percent_done(0), 100);
    }

    #[test]
    fn test_zero_total_does_not_divide_by_zero() {
        let progress = LogProgress::new(0);
        assert_eq!(progress.percent_done(0), 100);
        progress.scanline_done(0);
    }
}
