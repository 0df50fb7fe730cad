//! Rotation and perspective projection onto the terminal grid.

use crate::animator::Orientation;
use crate::cloud::Point;

type Matrix = [[f32; 3]; 3];

fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

fn rotation_x(angle: f32) -> Matrix {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

fn rotation_y(angle: f32) -> Matrix {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

fn rotation_z(angle: f32) -> Matrix {
    let (s, c) = angle.sin_cos();
    [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
}

/// Combined field rotation: the fixed roll about Z, then the animated
/// orientation in XYZ order.
fn field_rotation(orientation: Orientation, tilt: f32) -> Matrix {
    let animated = multiply(
        &rotation_x(orientation.about_x as f32),
        &rotation_y(orientation.about_y as f32),
    );
    multiply(&rotation_z(tilt), &animated)
}

/// A point landed on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub col: u16,
    pub row: u16,
    /// Distance in front of the camera.
    pub depth: f32,
}

/// Perspective camera on the +Z axis looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f32,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    /// Height of a terminal cell relative to its width.
    pub cell_aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance: 1.0,
            fov_y: 75.0,
            near: 0.1,
            cell_aspect: 2.0,
        }
    }
}

impl Camera {
    /// Project every point for one frame.
    ///
    /// The rotation is built once from the orientation snapshot, so every
    /// point in the frame sees the same orientation.
    pub fn project_all<'a>(
        &'a self,
        points: &'a [Point],
        orientation: Orientation,
        tilt: f32,
        width: u16,
        height: u16,
    ) -> impl Iterator<Item = Projected> + 'a {
        let rotation = field_rotation(orientation, tilt);
        points
            .iter()
            .filter_map(move |p| self.project(&rotation, *p, width, height))
    }

    fn project(&self, m: &Matrix, p: Point, width: u16, height: u16) -> Option<Projected> {
        if width == 0 || height == 0 {
            return None;
        }

        let x = m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z;
        let y = m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z;
        let z = m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z;

        let depth = self.distance - z;
        if depth < self.near {
            return None;
        }

        let focal = 1.0 / (self.fov_y.to_radians() / 2.0).tan();
        let aspect = width as f32 / (height as f32 * self.cell_aspect);
        let ndc_x = x * focal / aspect / depth;
        let ndc_y = y * focal / depth;
        if !(-1.0..1.0).contains(&ndc_x) || !(-1.0..1.0).contains(&ndc_y) {
            return None;
        }

        let col = ((ndc_x + 1.0) / 2.0 * width as f32) as u16;
        let row = ((1.0 - ndc_y) / 2.0 * height as f32) as u16;
        Some(Projected {
            col: col.min(width - 1),
            row: row.min(height - 1),
            depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: Orientation = Orientation {
        about_x: 0.0,
        about_y: 0.0,
    };

    #[test]
    fn test_origin_lands_in_center() {
        let camera = Camera::default();
        let hits: Vec<_> = camera
            .project_all(&[Point::new(0.0, 0.0, 0.0)], IDENTITY, 0.0, 80, 24)
            .collect();
        assert_eq!(
            hits,
            vec![Projected {
                col: 40,
                row: 12,
                depth: 1.0
            }]
        );
    }

    #[test]
    fn test_points_behind_camera_culled() {
        let camera = Camera::default();
        let behind = [Point::new(0.0, 0.0, 0.95), Point::new(0.1, 0.1, 1.1)];
        assert_eq!(
            camera.project_all(&behind, IDENTITY, 0.0, 80, 24).count(),
            0
        );
    }

    #[test]
    fn test_positive_y_is_up() {
        let camera = Camera::default();
        let hit = camera
            .project_all(&[Point::new(0.0, 0.2, 0.0)], IDENTITY, 0.0, 80, 24)
            .next()
            .unwrap();
        assert!(hit.row < 12);
    }

    #[test]
    fn test_tilt_rolls_about_view_axis() {
        let camera = Camera::default();
        let p = [Point::new(0.2, 0.0, 0.0)];
        let flat = camera.project_all(&p, IDENTITY, 0.0, 80, 24).next().unwrap();
        let rolled = camera
            .project_all(&p, IDENTITY, std::f32::consts::FRAC_PI_2, 80, 24)
            .next()
            .unwrap();
        assert!(flat.col > 40 && flat.row == 12);
        assert!(rolled.col.abs_diff(40) <= 1 && rolled.row < 12);
        assert!((flat.depth - rolled.depth).abs() < 1e-6);
    }

    #[test]
    fn test_empty_grid_projects_nothing() {
        let camera = Camera::default();
        let p = [Point::new(0.0, 0.0, 0.0)];
        assert_eq!(camera.project_all(&p, IDENTITY, 0.0, 0, 24).count(), 0);
    }
}
