//! Quad face indexing for structured point grids.

/// Grid resolution used by [`faces_for_15x15`].
pub const DEFAULT_RESOLUTION: usize = 15;

/// Quad faces over a `resolution × resolution` grid stored x-outer, y-inner
/// starting at vertex `base`.
///
/// Cell `(i, j)` with `i, j ∈ [0, resolution - 1)` yields
/// `[tl, tr, br, bl]` where `tl = base + i·resolution + j`, `tr = tl + 1`,
/// `bl = tl + resolution` and `br = bl + 1`. A resolution below 2 has no
/// cells and yields no faces.
///
/// Index arithmetic wraps on `u32` overflow rather than panicking, and a
/// resolution that does not fit in `u32` yields no faces. Callers that build
/// large meshes check the vertex count first.
///
/// # Example
///
/// ```
/// use mesh_from_sections::quad_faces;
///
/// let faces = quad_faces(4, 3);
/// assert_eq!(faces.len(), 4);
/// assert_eq!(faces[0], [4, 5, 8, 7]);
/// assert_eq!(faces[3], [8, 9, 12, 11]);
/// ```
#[must_use]
pub fn quad_faces(base: u32, resolution: usize) -> Vec<[u32; 4]> {
    if resolution < 2 {
        return Vec::new();
    }

    let Ok(res) = u32::try_from(resolution) else {
        return Vec::new();
    };

    let cells = resolution - 1;
    let mut faces = Vec::with_capacity(cells.saturating_mul(cells));
    for i in 0..res - 1 {
        for j in 0..res - 1 {
            let tl = base.wrapping_add(i.wrapping_mul(res).wrapping_add(j));
            let tr = tl.wrapping_add(1);
            let bl = tl.wrapping_add(res);
            let br = bl.wrapping_add(1);
            faces.push([tl, tr, br, bl]);
        }
    }
    faces
}

/// The 196 quads of a 15×15 grid starting at vertex `base`.
#[must_use]
pub fn faces_for_15x15(base: u32) -> Vec<[u32; 4]> {
    quad_faces(base, DEFAULT_RESOLUTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faces_for_15x15() {
        let faces = faces_for_15x15(0);
        assert_eq!(faces.len(), 196);
        assert_eq!(faces[0], [0, 1, 16, 15]);
        assert_eq!(faces[195], [208, 209, 224, 223]);

        for face in &faces {
            assert!(face.iter().all(|&v| v < 225));
        }
    }

    #[test]
    fn test_base_offset() {
        let shifted = faces_for_15x15(225);
        let plain = faces_for_15x15(0);
        for (s, p) in shifted.iter().zip(&plain) {
            for k in 0..4 {
                assert_eq!(s[k], p[k] + 225);
            }
        }
    }

    #[test]
    fn test_small_resolutions() {
        assert!(quad_faces(0, 0).is_empty());
        assert!(quad_faces(10, 1).is_empty());
        assert_eq!(quad_faces(10, 2), vec![[10, 11, 13, 12]]);
    }

    #[test]
    fn test_faces_share_edges() {
        // Neighbouring cells in the same column share their vertical edge
        let faces = quad_faces(0, 4);
        let a = faces[0];
        let b = faces[1];
        assert_eq!(a[1], b[0]);
        assert_eq!(a[2], b[3]);
    }

    #[test]
    fn test_indices_wrap_at_u32_max() {
        let faces = quad_faces(u32::MAX - 1, 2);
        assert_eq!(faces, vec![[u32::MAX - 1, u32::MAX, 1, 0]]);

        let faces = quad_faces(u32::MAX - 3, 3);
        assert_eq!(faces.len(), 4);
        assert_eq!(faces[0], [u32::MAX - 3, u32::MAX - 2, 0, u32::MAX]);
        assert_eq!(faces[2], [u32::MAX, 0, 3, 2]);
        assert_eq!(faces[3], [0, 1, 4, 3]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_resolution_beyond_u32_has_no_faces() {
        let resolution = usize::try_from(u64::from(u32::MAX) + 1).unwrap();
        assert!(quad_faces(0, resolution).is_empty());
    }
}
