//! Mesh quality statistics and the relaxation energy.

// Cell counts don't overflow f64 mantissas in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::{Point2, Triangle2};

use crate::params::WeightingPolicy;

/// Cell quality summary.
///
/// Quality is the radius ratio `2 r / R`, 1 for an equilateral cell and 0 for
/// a degenerate one. Angles are in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QualityStats {
    /// Worst cell quality.
    pub min_quality: f64,
    /// Mean cell quality.
    pub avg_quality: f64,
    /// Best cell quality.
    pub max_quality: f64,
    /// Smallest interior angle.
    pub min_angle: f64,
    /// Largest interior angle.
    pub max_angle: f64,
    /// Number of cells measured.
    pub cell_count: usize,
}

impl QualityStats {
    /// Measure every cell.
    ///
    /// Cells referencing missing vertices are skipped.
    #[must_use]
    pub fn compute(vertices: &[Point2<f64>], cells: &[[u32; 3]]) -> Self {
        let mut stats = Self {
            min_quality: f64::INFINITY,
            max_quality: f64::NEG_INFINITY,
            min_angle: f64::INFINITY,
            max_angle: f64::NEG_INFINITY,
            ..Self::default()
        };
        let mut quality_sum = 0.0;

        for tri in triangles(vertices, cells) {
            let quality = tri.quality();
            quality_sum += quality;
            stats.min_quality = stats.min_quality.min(quality);
            stats.max_quality = stats.max_quality.max(quality);
            for angle in tri.angles() {
                let degrees = angle.to_degrees();
                stats.min_angle = stats.min_angle.min(degrees);
                stats.max_angle = stats.max_angle.max(degrees);
            }
            stats.cell_count += 1;
        }

        if stats.cell_count == 0 {
            return Self::default();
        }
        stats.avg_quality = quality_sum / stats.cell_count as f64;
        stats
    }
}

impl std::fmt::Display for QualityStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "quality min {:.5} avg {:.5} max {:.5}, angles {:.2}° to {:.2}°",
            self.min_quality, self.avg_quality, self.max_quality, self.min_angle, self.max_angle
        )
    }
}

/// Relaxation energy `1/3 Σ_i |x_i|² ω_i - Σ_T ∫_T |x|² ρ`.
///
/// With area weighting `ω_i` is the area of the cells around vertex `i` and
/// `ρ = 1`; with uniform weighting `ω_i` counts those cells and `ρ = 1/|T|`.
/// Both relaxation schemes decrease this quantity.
#[must_use]
pub fn energy(vertices: &[Point2<f64>], cells: &[[u32; 3]], weighting: WeightingPolicy) -> f64 {
    let mut omega = vec![0.0_f64; vertices.len()];
    let mut integral = 0.0;

    for (nodes, tri) in cells.iter().zip(triangles(vertices, cells)) {
        let area = tri.area();
        let (weight, density) = match weighting {
            WeightingPolicy::AreaWeighted => (area, 1.0),
            WeightingPolicy::Uniform => (1.0, if area > 0.0 { area.recip() } else { 0.0 }),
        };
        for &node in nodes {
            if let Some(w) = omega.get_mut(node as usize) {
                *w += weight;
            }
        }

        // Exact for quadratics: |T|/12 (Σ|v|² + |Σv|²)
        let corners = [tri.v0.coords, tri.v1.coords, tri.v2.coords];
        let sum_sq: f64 = corners.iter().map(|c| c.norm_squared()).sum();
        let sq_sum = (corners[0] + corners[1] + corners[2]).norm_squared();
        integral += density * area / 12.0 * (sum_sq + sq_sum);
    }

    let vertex_term: f64 = vertices
        .iter()
        .zip(&omega)
        .map(|(x, w)| x.coords.norm_squared() * w)
        .sum();

    vertex_term / 3.0 - integral
}

fn triangles<'a>(
    vertices: &'a [Point2<f64>],
    cells: &'a [[u32; 3]],
) -> impl Iterator<Item = Triangle2> + 'a {
    cells.iter().filter_map(move |&[a, b, c]| {
        Some(Triangle2::new(
            *vertices.get(a as usize)?,
            *vertices.get(b as usize)?,
            *vertices.get(c as usize)?,
        ))
    })
}
