//! Terminal rendering of a text cycle.

use nebula_core::{ColorTheme, Pose};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::cycle::TextCycle;
use crate::measure::Measure;

/// Pixels of offset that move the word by one row.
const PIXELS_PER_ROW: f32 = 20.0;

/// Blur at or above which the word is drawn dimmed.
const BLUR_DIM_THRESHOLD: f32 = 4.0;

/// Draws the word currently on screen inside its animated container.
///
/// The word rests on the middle row of the area and is clipped to the
/// container width, so the area should be as wide as
/// [`CycleView::container_cells`].
#[derive(Debug)]
pub struct CycleView<'a, M> {
    cycle: &'a TextCycle<M>,
    theme: ColorTheme,
    opacity: f32,
}

impl<'a, M: Measure> CycleView<'a, M> {
    pub fn new(cycle: &'a TextCycle<M>, theme: ColorTheme) -> Self {
        Self {
            cycle,
            theme,
            opacity: 1.0,
        }
    }

    /// Fades the whole view, on top of the word's own pose.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Columns the container occupies this frame.
    ///
    /// Uses the spring width once measured, and the natural width of the
    /// displayed word while sizing is still automatic.
    pub fn container_cells(&self) -> u16 {
        match self.cycle.container_width() {
            Some(width) => width.max(0.0).ceil() as u16,
            None => Line::from(self.cycle.layer().content.as_str()).width() as u16,
        }
    }

    fn style_for(&self, pose: &Pose) -> Style {
        let mut style = Style::new()
            .fg(self.theme.faded(pose.opacity * self.opacity))
            .add_modifier(Modifier::BOLD);
        if pose.blur >= BLUR_DIM_THRESHOLD {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}

impl<M: Measure> Widget for CycleView<'_, M> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let layer = self.cycle.layer();
        if layer.pose.is_transparent() || self.opacity <= 0.0 {
            return;
        }

        let rest = (area.height / 2) as i32;
        let row = rest + (layer.pose.offset_y / PIXELS_PER_ROW).round() as i32;
        if row < 0 || row >= area.height as i32 {
            return;
        }

        let mut lines: Vec<Line> = (0..row).map(|_| Line::raw("")).collect();
        lines.push(Line::styled(layer.content.as_str(), self.style_for(&layer.pose)));
        Paragraph::new(lines).render(area, buf);
    }
}
