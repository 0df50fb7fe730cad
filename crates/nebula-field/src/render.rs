//! Drawing the point field into a frame.

use nebula_core::ColorTheme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::animator::FieldAnimator;
use crate::chars::FIELD_CHARS;
use crate::projection::Camera;

/// Point size the glyph ramp is calibrated for.
const REFERENCE_SIZE: f32 = 0.002;

/// Presentation settings for the field. None of these affect the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStyle {
    pub theme: ColorTheme,
    /// Point size; larger points fill the glyph ramp sooner.
    pub size: f32,
    /// Fixed roll of the whole field about the view axis, in radians.
    pub tilt: f32,
    pub camera: Camera,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            theme: ColorTheme::default(),
            size: REFERENCE_SIZE,
            tilt: std::f32::consts::FRAC_PI_4,
            camera: Camera::default(),
        }
    }
}

/// Per-cell accumulation of projected points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DensityCell {
    pub hits: u16,
    /// Depth of the closest point in the cell.
    pub nearest: f32,
}

/// Projected field for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    width: u16,
    height: u16,
    cells: Vec<DensityCell>,
}

impl DensityGrid {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![DensityCell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&DensityCell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row as usize * self.width as usize + col as usize)
    }

    /// Total number of points that landed on the grid.
    pub fn total_hits(&self) -> usize {
        self.cells.iter().map(|c| c.hits as usize).sum()
    }

    fn record(&mut self, col: u16, row: u16, depth: f32) {
        let idx = row as usize * self.width as usize + col as usize;
        if let Some(cell) = self.cells.get_mut(idx) {
            if cell.hits == 0 || depth < cell.nearest {
                cell.nearest = depth;
            }
            cell.hits = cell.hits.saturating_add(1);
        }
    }
}

/// Project the animator's cloud at its current orientation onto a grid.
pub fn rasterize(
    animator: &FieldAnimator,
    style: &FieldStyle,
    width: u16,
    height: u16,
) -> DensityGrid {
    let mut grid = DensityGrid::new(width, height);
    let orientation = animator.orientation();
    for hit in style
        .camera
        .project_all(animator.cloud().points(), orientation, style.tilt, width, height)
    {
        grid.record(hit.col, hit.row, hit.depth);
    }
    grid
}

/// Render the field into `area` of the frame.
pub fn render(frame: &mut Frame, area: Rect, animator: &FieldAnimator, style: &FieldStyle) {
    let grid = rasterize(animator, style, area.width, area.height);
    let size_scale = (style.size / REFERENCE_SIZE).clamp(0.25, 4.0);

    let lines: Vec<Line> = (0..grid.height())
        .map(|row| {
            let spans: Vec<Span> = (0..grid.width())
                .map(|col| match grid.get(col, row) {
                    Some(cell) if cell.hits > 0 => render_cell(cell, style.theme, size_scale),
                    _ => Span::raw(" "),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_cell(cell: &DensityCell, theme: ColorTheme, size_scale: f32) -> Span<'static> {
    let weight = cell.hits as f32 * size_scale;
    let idx = match weight {
        w if w < 1.5 => 0,
        w if w < 3.0 => 1,
        w if w < 5.0 => 2,
        _ => 3,
    };
    let ch = FIELD_CHARS[idx.min(FIELD_CHARS.len() - 1)];

    // Nearer points read brighter; the far side of the sphere fades out.
    let intensity = (1.4 - cell.nearest * 0.5).clamp(0.2, 1.0);
    Span::styled(ch.to_string(), Style::new().fg(theme.faded(intensity)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::DriftRate;
    use crate::cloud::PointCloud;
    use nebula_core::Tick;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn animator(count: usize) -> FieldAnimator {
        let mut rng = StdRng::seed_from_u64(11);
        let cloud = PointCloud::in_sphere_with(count, 1.2, &mut rng).unwrap();
        FieldAnimator::new(cloud, DriftRate::default())
    }

    #[test]
    fn test_hits_bounded_by_point_count() {
        let a = animator(5000);
        let grid = rasterize(&a, &FieldStyle::default(), 120, 40);
        assert!(grid.total_hits() > 0);
        assert!(grid.total_hits() <= 5000);
    }

    #[test]
    fn test_grid_changes_as_field_drifts() {
        let mut a = animator(5000);
        let style = FieldStyle::default();
        let before = rasterize(&a, &style, 120, 40);
        a.tick(Duration::from_secs(30));
        let after = rasterize(&a, &style, 120, 40);
        assert_ne!(before, after);
    }

    #[test]
    fn test_nearest_depth_kept() {
        let mut grid = DensityGrid::new(4, 4);
        grid.record(1, 1, 0.8);
        grid.record(1, 1, 0.3);
        grid.record(1, 1, 0.9);
        let cell = grid.get(1, 1).unwrap();
        assert_eq!(cell.hits, 3);
        assert_eq!(cell.nearest, 0.3);
        assert!(grid.get(4, 0).is_none());
    }

    #[test]
    fn test_dense_cells_use_heavier_glyphs() {
        let sparse = render_cell(&DensityCell { hits: 1, nearest: 1.0 }, ColorTheme::Violet, 1.0);
        let dense = render_cell(&DensityCell { hits: 9, nearest: 1.0 }, ColorTheme::Violet, 1.0);
        assert_eq!(sparse.content, "·");
        assert_eq!(dense.content, "✦");
    }
}
