//! Off-screen text measurement.

use ratatui::text::Line;

/// Measures how wide a word renders, without drawing it.
pub trait Measure {
    /// Rendered width of `text`, or `None` if no layout is available yet.
    fn measure(&self, text: &str) -> Option<f32>;
}

impl<F> Measure for F
where
    F: Fn(&str) -> Option<f32>,
{
    fn measure(&self, text: &str) -> Option<f32> {
        self(text)
    }
}

/// Measures words in terminal cells.
///
/// Returns `None` until the host reports that a layout pass has happened,
/// mirroring a hidden element that has not been laid out yet.
#[derive(Debug, Clone, Default)]
pub struct CellMeasurer {
    laid_out: bool,
}

impl CellMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the terminal has been drawn at least once.
    pub fn mark_laid_out(&mut self) {
        self.laid_out = true;
    }
}

impl Measure for CellMeasurer {
    fn measure(&self, text: &str) -> Option<f32> {
        self.laid_out.then(|| Line::from(text).width() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_before_layout() {
        let mut measurer = CellMeasurer::new();
        assert_eq!(measurer.measure("wonder"), None);
        measurer.mark_laid_out();
        assert_eq!(measurer.measure("wonder"), Some(6.0));
    }

    #[test]
    fn test_wide_glyphs_count_double() {
        let mut measurer = CellMeasurer::new();
        measurer.mark_laid_out();
        assert_eq!(measurer.measure("創造"), Some(4.0));
    }

    #[test]
    fn test_closure_measurer() {
        let fixed = |_: &str| Some(12.5);
        assert_eq!(fixed.measure("anything"), Some(12.5));
    }
}
