//! Scatter per-cell reference points onto vertices and average them.

use mesh_types::{Point2, Vector2};

use crate::error::{RelaxError, RelaxResult};
use crate::params::WeightingPolicy;

/// Weighted average of the reference points of every vertex's incident cells.
///
/// `areas` holds the unsigned cell areas and is only read for
/// [`WeightingPolicy::AreaWeighted`].
///
/// # Errors
///
/// Returns [`RelaxError::IsolatedVertex`] for a vertex with zero accumulated
/// weight.
pub fn aggregate(
    cells: &[[u32; 3]],
    reference: &[Point2<f64>],
    areas: &[f64],
    vertex_count: usize,
    weighting: WeightingPolicy,
) -> RelaxResult<Vec<Point2<f64>>> {
    let mut weighted_sum = vec![Vector2::zeros(); vertex_count];
    let mut omega = vec![0.0_f64; vertex_count];

    for (cell, (nodes, point)) in cells.iter().zip(reference).enumerate() {
        let weight = match weighting {
            WeightingPolicy::Uniform => 1.0,
            WeightingPolicy::AreaWeighted => areas.get(cell).copied().unwrap_or(0.0),
        };
        let scaled = point.coords * weight;
        for &node in nodes {
            let i = node as usize;
            if let (Some(sum), Some(w)) = (weighted_sum.get_mut(i), omega.get_mut(i)) {
                *sum += scaled;
                *w += weight;
            }
        }
    }

    weighted_sum
        .into_iter()
        .zip(omega)
        .enumerate()
        .map(|(i, (sum, w))| {
            if w > 0.0 {
                Ok(Point2::from(sum / w))
            } else {
                Err(RelaxError::IsolatedVertex(
                    u32::try_from(i).unwrap_or(u32::MAX),
                ))
            }
        })
        .collect()
}

/// First vertex that no cell references.
pub(crate) fn find_isolated_vertex(cells: &[[u32; 3]], vertex_count: usize) -> Option<u32> {
    let mut referenced = vec![false; vertex_count];
    for &node in cells.iter().flatten() {
        if let Some(flag) = referenced.get_mut(node as usize) {
            *flag = true;
        }
    }
    referenced
        .iter()
        .position(|&r| !r)
        .map(|i| u32::try_from(i).unwrap_or(u32::MAX))
}
