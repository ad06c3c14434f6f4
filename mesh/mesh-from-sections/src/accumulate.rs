//! Assemble section grids into a single quad mesh.
//!
//! Sections are processed in order. Each grid's first vertex index (its
//! base) is the length of the vertex buffer just before the grid is
//! appended, and the grid's faces are offset by that base.

use nalgebra::Point3;
use rayon::prelude::*;
use section_curves::CurveHandle;
use tracing::{debug, info, warn};

use crate::error::{SectionError, SectionResult};
use crate::faces::quad_faces;
use crate::grid::{CurveSection, GridParams, build_grid};
use crate::quad_mesh::QuadMesh;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do when a section fails to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FailurePolicy {
    /// Stop at the first failing section and return its error.
    #[default]
    Abort,

    /// Log the failure, leave the section out of the mesh and continue.
    SkipSection,
}

/// Parameters for [`build_mesh`] and [`MeshBuilder`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshParams {
    /// Grid settings applied to every section.
    pub grid: GridParams,

    /// Build section grids on the rayon thread pool.
    ///
    /// Grids are still appended in section order, so the output is identical
    /// to a serial build.
    pub parallel: bool,

    /// Handling of sections that fail to build.
    pub failure_policy: FailurePolicy,
}

impl MeshParams {
    /// Create params with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid parameters.
    #[must_use]
    pub fn with_grid(mut self, grid: GridParams) -> Self {
        self.grid = grid;
        self
    }

    /// Set the grid resolution.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: usize) -> Self {
        self.grid.resolution = resolution;
        self
    }

    /// Enable or disable parallel grid building.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the failure policy.
    #[must_use]
    pub const fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// A section left out of the mesh under [`FailurePolicy::SkipSection`].
#[derive(Debug)]
pub struct SkippedSection {
    /// Position of the section in the input.
    pub index: usize,
    /// Why it failed.
    pub error: SectionError,
}

/// Result of building a mesh from sections.
#[derive(Debug)]
pub struct MeshBuildReport {
    /// The assembled mesh.
    pub mesh: QuadMesh,

    /// Base vertex index of every section that made it into the mesh.
    pub bases: Vec<u32>,

    /// Sections that failed and were skipped.
    pub skipped: Vec<SkippedSection>,
}

impl MeshBuildReport {
    /// Number of sections in the mesh.
    #[must_use]
    pub fn sections_built(&self) -> usize {
        self.bases.len()
    }

    /// Check if every section was built.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Incremental mesh assembly.
///
/// # Example
///
/// ```
/// use mesh_from_sections::{CurveSection, MeshBuilder, MeshParams};
/// use section_curves::{lerp_point, ParametricCurve};
/// use nalgebra::Point3;
///
/// let line = |a: Point3<f64>, b: Point3<f64>| ParametricCurve::new(move |t| lerp_point(a, b, t));
/// let section = CurveSection::new(
///     line(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)),
///     line(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)),
///     line(Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0)),
///     line(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
/// );
///
/// let mut builder = MeshBuilder::new(MeshParams::default());
/// assert_eq!(builder.add_section(&section)?, 0);
/// assert_eq!(builder.add_section(&section)?, 225);
///
/// let report = builder.finish();
/// assert_eq!(report.mesh.vertex_count(), 450);
/// assert_eq!(report.mesh.face_count(), 392);
/// # Ok::<(), mesh_from_sections::SectionError>(())
/// ```
#[derive(Debug)]
pub struct MeshBuilder {
    params: MeshParams,
    mesh: QuadMesh,
    bases: Vec<u32>,
    skipped: Vec<SkippedSection>,
    processed: usize,
}

impl MeshBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new(params: MeshParams) -> Self {
        Self {
            params,
            mesh: QuadMesh::new(),
            bases: Vec::new(),
            skipped: Vec::new(),
            processed: 0,
        }
    }

    /// The parameters in use.
    #[must_use]
    pub const fn params(&self) -> &MeshParams {
        &self.params
    }

    /// The mesh assembled so far.
    #[must_use]
    pub const fn mesh(&self) -> &QuadMesh {
        &self.mesh
    }

    /// Build one section and append it. Returns its base vertex index.
    ///
    /// The failure policy does not apply here; errors are always returned
    /// and the mesh is left unchanged.
    ///
    /// # Errors
    ///
    /// Any error from [`build_grid`], or [`SectionError::IndexOverflow`] if
    /// the grid would not be addressable with `u32` indices.
    pub fn add_section<H: CurveHandle>(&mut self, section: &CurveSection<H>) -> SectionResult<u32> {
        self.processed += 1;
        let grid = build_grid(section, &self.params.grid)?;
        self.append_grid(grid)
    }

    /// Build and append a batch of sections, honoring the failure policy.
    ///
    /// Section indices in [`SkippedSection`] count every section offered to
    /// this builder, across calls.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Abort`], the first failing section's error.
    /// Sections before it have already been appended. Index overflow always
    /// aborts.
    pub fn add_sections<H>(&mut self, sections: &[CurveSection<H>]) -> SectionResult<()>
    where
        H: CurveHandle + Sync,
    {
        let grid_params = &self.params.grid;
        let grids: Vec<SectionResult<Vec<Point3<f64>>>> = if self.params.parallel {
            sections
                .par_iter()
                .map(|section| build_grid(section, grid_params))
                .collect()
        } else {
            // Serial aborts before building the remaining sections
            let mut grids = Vec::with_capacity(sections.len());
            for section in sections {
                let grid = build_grid(section, grid_params);
                let failed = grid.is_err();
                grids.push(grid);
                if failed && self.params.failure_policy == FailurePolicy::Abort {
                    break;
                }
            }
            grids
        };

        for grid in grids {
            let index = self.processed;
            self.processed += 1;

            match (grid, self.params.failure_policy) {
                (Ok(grid), _) => {
                    self.append_grid(grid)?;
                }
                (Err(error), FailurePolicy::Abort) => return Err(error),
                (Err(error), FailurePolicy::SkipSection) => {
                    warn!(index, %error, "Skipping section");
                    self.skipped.push(SkippedSection { index, error });
                }
            }
        }

        Ok(())
    }

    /// Finish and return the mesh with its build report.
    #[must_use]
    pub fn finish(self) -> MeshBuildReport {
        info!(
            sections = self.bases.len(),
            skipped = self.skipped.len(),
            vertices = self.mesh.vertex_count(),
            faces = self.mesh.face_count(),
            "Built section mesh"
        );

        MeshBuildReport {
            mesh: self.mesh,
            bases: self.bases,
            skipped: self.skipped,
        }
    }

    fn append_grid(&mut self, grid: Vec<Point3<f64>>) -> SectionResult<u32> {
        let start = self.mesh.vertices.len();
        let end = start + grid.len();

        // Highest index the new faces will reference must fit in u32
        let last = end.saturating_sub(1);
        u32::try_from(last).map_err(|_| SectionError::IndexOverflow(last))?;
        let base = u32::try_from(start).map_err(|_| SectionError::IndexOverflow(start))?;

        self.mesh.vertices.extend(grid);
        self.mesh
            .faces
            .extend(quad_faces(base, self.params.grid.resolution));
        self.bases.push(base);

        debug!(base, vertices = end - start, "Appended section grid");
        Ok(base)
    }
}

/// Build a quad mesh from a list of sections.
///
/// # Errors
///
/// See [`MeshBuilder::add_sections`]. Under [`FailurePolicy::Abort`] no mesh
/// is produced if any section fails.
pub fn build_mesh<H>(sections: &[CurveSection<H>], params: &MeshParams) -> SectionResult<MeshBuildReport>
where
    H: CurveHandle + Sync,
{
    let mut builder = MeshBuilder::new(params.clone());
    builder.add_sections(sections)?;
    Ok(builder.finish())
}
