use crate::domain::model::PlanetarySystem;
use crate::utils::error::{PlotError, Result};
use std::f64::consts::PI;

/// Angular placement of one boundary and its control variables.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySector {
    /// Centre angle of the boundary, also where its label sits.
    pub center: f64,
    pub width: f64,
    /// Angular width of each control variable bar.
    pub variable_width: f64,
    pub variable_angles: Vec<f64>,
    /// Light separators between neighbouring variables of this boundary.
    pub inner_separators: Vec<f64>,
    /// Separator between this boundary and the next one.
    pub separator: f64,
}

/// Partition of the full circle among boundaries and their variables.
///
/// Every boundary gets the same share `2π/n`; a gap of `π/(10n)` is kept free
/// so that neighbouring boundaries never touch.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialLayout {
    pub sector_width: f64,
    pub gap: f64,
    pub sectors: Vec<BoundarySector>,
}

impl RadialLayout {
    pub fn for_system(system: &PlanetarySystem) -> Result<Self> {
        let counts: Vec<usize> = system.boundaries().iter().map(|b| b.len()).collect();
        Self::compute(&counts)
    }

    pub fn compute(variable_counts: &[usize]) -> Result<Self> {
        let n_pb = variable_counts.len();
        if n_pb == 0 {
            return Err(PlotError::EmptyGroup {
                entity: "PlanetarySystem",
                name: "layout".to_string(),
            });
        }

        let n = n_pb as f64;
        let gap = PI / (10.0 * n);
        let width = (2.0 * PI) / n - gap;

        let mut sectors = Vec::with_capacity(n_pb);
        for (i, &nb_cat) in variable_counts.iter().enumerate() {
            if nb_cat == 0 {
                return Err(PlotError::EmptyGroup {
                    entity: "Boundary",
                    name: format!("#{}", i),
                });
            }

            let center = 2.0 * PI * i as f64 / n;
            let w = width / nb_cat as f64;
            let t_start = center - ((nb_cat - 1) as f64 * w) / 2.0;

            let variable_angles = (0..nb_cat).map(|j| t_start + j as f64 * w).collect();
            let inner_separators = (0..nb_cat - 1)
                .map(|j| t_start + w / 2.0 + j as f64 * w)
                .collect();

            sectors.push(BoundarySector {
                center,
                width,
                variable_width: w,
                variable_angles,
                inner_separators,
                separator: PI / n + 2.0 * PI * i as f64 / n,
            });
        }

        Ok(Self {
            sector_width: width,
            gap,
            sectors,
        })
    }
}
