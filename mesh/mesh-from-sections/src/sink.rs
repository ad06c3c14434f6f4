//! Publishing meshes by name.

use hashbrown::HashMap;
use tracing::debug;

use crate::accumulate::{MeshBuildReport, MeshBuilder, MeshParams};
use crate::error::{SectionError, SectionResult};
use crate::quad_mesh::QuadMesh;
use crate::source::{CurveSource, SectionSpec};

/// Destination for generated meshes, such as a scene.
pub trait MeshSink {
    /// Store `mesh` under `name`, deleting any mesh already stored there.
    ///
    /// Returns `true` if an existing mesh was replaced.
    ///
    /// # Errors
    ///
    /// Implementations return [`SectionError::InvalidMeshName`] for an empty
    /// name and may report any other storage failure.
    fn replace_mesh(&mut self, name: &str, mesh: QuadMesh) -> SectionResult<bool>;
}

/// In-memory [`MeshSink`].
#[derive(Debug, Clone, Default)]
pub struct MeshStore {
    meshes: HashMap<String, QuadMesh>,
}

impl MeshStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The mesh stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QuadMesh> {
        self.meshes.get(name)
    }

    /// Check if a mesh is stored under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.meshes.contains_key(name)
    }

    /// Number of stored meshes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl MeshSink for MeshStore {
    fn replace_mesh(&mut self, name: &str, mesh: QuadMesh) -> SectionResult<bool> {
        if name.is_empty() {
            return Err(SectionError::InvalidMeshName);
        }

        let replaced = self.meshes.remove(name).is_some();
        debug!(name, replaced, vertices = mesh.vertex_count(), "Storing mesh");
        self.meshes.insert(name.to_string(), mesh);
        Ok(replaced)
    }
}

impl<K: MeshSink + ?Sized> MeshSink for &mut K {
    fn replace_mesh(&mut self, name: &str, mesh: QuadMesh) -> SectionResult<bool> {
        (**self).replace_mesh(name, mesh)
    }
}

/// Resolve `specs` from `source`, build their mesh and publish it to `sink`
/// under `mesh_name`.
///
/// Every spec is resolved before any grid is built, so a missing curve name
/// fails the run regardless of the failure policy. Nothing is published if
/// the run fails.
///
/// # Errors
///
/// - [`SectionError::InvalidMeshName`] if `mesh_name` is empty
/// - [`SectionError::UnknownCurve`] for a missing curve
/// - any error from [`MeshBuilder::add_sections`] or the sink
///
/// # Example
///
/// ```
/// use mesh_from_sections::{
///     run_sections, CurveLibrary, MeshParams, MeshStore, SectionSpec,
/// };
/// use section_curves::{BezierPoint, CurveObject, Point3, Spline};
///
/// let straight = |name: &str, a: Point3<f64>, b: Point3<f64>| {
///     CurveObject::new(name, vec![Spline::bezier(vec![BezierPoint::sharp(a), BezierPoint::sharp(b)])])
/// };
///
/// let library: CurveLibrary = [
///     straight("Left", Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)),
///     straight("Right", Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)),
///     straight("Top", Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0)),
///     straight("Bottom", Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
/// ]
/// .into_iter()
/// .collect();
///
/// let specs = [SectionSpec::new("Left", "Right", "Top", "Bottom")];
/// let mut store = MeshStore::new();
///
/// let report = run_sections(&library, &specs, &mut store, "Patch", &MeshParams::default())?;
/// assert_eq!(report.mesh.face_count(), 196);
/// assert_eq!(store.get("Patch").map(|m| m.vertex_count()), Some(225));
/// # Ok::<(), mesh_from_sections::SectionError>(())
/// ```
pub fn run_sections<S, K>(
    source: &S,
    specs: &[SectionSpec],
    sink: &mut K,
    mesh_name: &str,
    params: &MeshParams,
) -> SectionResult<MeshBuildReport>
where
    S: CurveSource + ?Sized,
    K: MeshSink + ?Sized,
{
    if mesh_name.is_empty() {
        return Err(SectionError::InvalidMeshName);
    }

    let sections = specs
        .iter()
        .map(|spec| spec.resolve(source))
        .collect::<SectionResult<Vec<_>>>()?;

    let mut builder = MeshBuilder::new(params.clone());
    builder.add_sections(&sections)?;
    let report = builder.finish();

    sink.replace_mesh(mesh_name, report.mesh.clone())?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulate::FailurePolicy;
    use section_curves::{BezierPoint, CurveObject, Point3, Spline};

    fn straight(name: &str, from: Point3<f64>, to: Point3<f64>) -> CurveObject {
        CurveObject::new(
            name,
            vec![Spline::bezier(vec![BezierPoint::sharp(from), BezierPoint::sharp(to)])],
        )
    }

    fn library() -> crate::source::CurveLibrary {
        [
            straight("L", Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)),
            straight("R", Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)),
            straight("T", Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0)),
            straight("B", Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
            straight("Below", Point3::new(0.0, -1.0, 0.0), Point3::new(1.0, -1.0, 0.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_replace_semantics() {
        let mut store = MeshStore::new();
        let mut mesh = QuadMesh::new();
        mesh.vertices.push(Point3::origin());

        assert!(!store.replace_mesh("Mesh", QuadMesh::new()).unwrap());
        assert!(store.replace_mesh("Mesh", mesh.clone()).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Mesh"), Some(&mesh));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut store = MeshStore::new();
        let err = store.replace_mesh("", QuadMesh::new()).unwrap_err();
        assert!(matches!(err, SectionError::InvalidMeshName));
        assert!(store.is_empty());
    }

    #[test]
    fn test_run_publishes_and_replaces() {
        let library = library();
        let specs = vec![SectionSpec::new("L", "R", "T", "B"); 2];
        let mut store = MeshStore::new();
        let params = MeshParams::default().with_resolution(4);

        let report = run_sections(&library, &specs, &mut store, "Out", &params).unwrap();
        assert_eq!(report.bases, vec![0, 16]);
        assert_eq!(store.get("Out"), Some(&report.mesh));

        // A second run replaces the first
        let report = run_sections(&library, &specs[..1], &mut store, "Out", &params).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Out").map(QuadMesh::vertex_count), Some(16));
        assert_eq!(report.mesh.face_count(), 9);
    }

    #[test]
    fn test_run_failure_publishes_nothing() {
        let library = library();
        let specs = vec![SectionSpec::new("L", "R", "T", "B"), SectionSpec::new("L", "R", "Missing", "B")];
        let mut store = MeshStore::new();

        let err = run_sections(&library, &specs, &mut store, "Out", &MeshParams::default()).unwrap_err();
        assert!(matches!(err, SectionError::UnknownCurve(ref name) if name == "Missing"));
        assert!(!store.contains("Out"));

        let err = run_sections(&library, &specs[..1], &mut store, "", &MeshParams::default()).unwrap_err();
        assert!(matches!(err, SectionError::InvalidMeshName));
    }

    #[test]
    fn test_run_skips_failing_sections() {
        let library = library();
        let specs = vec![SectionSpec::new("L", "R", "Below", "B"), SectionSpec::new("L", "R", "T", "B")];
        let mut store = MeshStore::new();
        let params = MeshParams::default()
            .with_resolution(3)
            .with_failure_policy(FailurePolicy::SkipSection);

        let report = run_sections(&library, &specs, &mut store, "Out", &params).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].index, 0);
        assert_eq!(store.get("Out").map(QuadMesh::face_count), Some(4));
    }
}
