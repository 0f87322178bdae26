//! Import parameters.

use crate::error::{IoError, IoResult};
use crate::header::StlHeader;

/// How the imported mesh gets its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshNaming {
    /// Use the file's base name without extension.
    #[default]
    FileStem,
    /// Use the name after `solid` on the ASCII header line.
    ///
    /// Falls back to the file stem for binary files or an empty solid name.
    SolidName,
}

impl MeshNaming {
    /// Pick the mesh name for a file with the given header and stem.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_stl::{MeshNaming, StlHeader};
    ///
    /// let header = StlHeader::Ascii { solid_name: "cube".to_string() };
    /// assert_eq!(MeshNaming::FileStem.resolve(&header, Some("part")).as_deref(), Some("part"));
    /// assert_eq!(MeshNaming::SolidName.resolve(&header, Some("part")).as_deref(), Some("cube"));
    /// ```
    #[must_use]
    pub fn resolve(self, header: &StlHeader, file_stem: Option<&str>) -> Option<String> {
        let stem = file_stem.map(str::to_owned);
        match self {
            Self::FileStem => stem,
            Self::SolidName => match header.solid_name() {
                Some(name) if !name.is_empty() => Some(name.to_owned()),
                _ => stem,
            },
        }
    }
}

/// Vertex identity policy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DedupPolicy {
    /// Merge vertices only when their canonical keys are identical: the raw
    /// 12 coordinate bytes for binary files, the trimmed line text for ASCII.
    #[default]
    Exact,
    /// Run the exact pass, then merge neighbours in sorted order whose
    /// largest per-axis difference is at most `epsilon`.
    ///
    /// See [`weld_sorted`](crate::weld_sorted).
    SortedWeld {
        /// Per-axis merge tolerance in mesh units.
        epsilon: f32,
    },
}

/// Parameters for STL import.
///
/// # Example
///
/// ```
/// use mesh_stl::{DedupPolicy, ImportParams, MeshNaming};
///
/// // Defaults: exact dedup, mesh named after the file
/// let params = ImportParams::default();
/// assert_eq!(params.dedup, DedupPolicy::Exact);
/// assert_eq!(params.naming, MeshNaming::FileStem);
///
/// // Tolerance welding, named after the ASCII solid
/// let params = ImportParams::welded(1e-4).with_naming(MeshNaming::SolidName);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImportParams {
    /// How the mesh is named.
    pub naming: MeshNaming,

    /// How vertices are deduplicated.
    pub dedup: DedupPolicy,
}

impl ImportParams {
    /// Exact-key dedup only.
    #[must_use]
    pub const fn exact() -> Self {
        Self {
            naming: MeshNaming::FileStem,
            dedup: DedupPolicy::Exact,
        }
    }

    /// Exact dedup followed by a sorted weld with the given tolerance.
    #[must_use]
    pub const fn welded(epsilon: f32) -> Self {
        Self {
            naming: MeshNaming::FileStem,
            dedup: DedupPolicy::SortedWeld { epsilon },
        }
    }

    /// Set the naming policy.
    #[must_use]
    pub const fn with_naming(mut self, naming: MeshNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Set the dedup policy.
    #[must_use]
    pub const fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }

    /// Check that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParams` if a weld tolerance is negative or NaN.
    pub fn validate(&self) -> IoResult<()> {
        if let DedupPolicy::SortedWeld { epsilon } = self.dedup {
            validate_epsilon(epsilon)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_epsilon(epsilon: f32) -> IoResult<()> {
    if epsilon.is_nan() || epsilon < 0.0 {
        return Err(IoError::invalid_params(format!(
            "weld epsilon must be non-negative, got {epsilon}"
        )));
    }
    Ok(())
}
