use std::path::PathBuf;

/// Errors raised while setting up or running a search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load reference image {path:?}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("chromosome has {actual} genes, layout requires {expected}")]
    ChromosomeLength { expected: usize, actual: usize },
    #[error("gene {index} is {value}, genes must lie in [0, 1]")]
    GeneOutOfRange { index: usize, value: f64 },
    #[error("polygon count must be non-zero")]
    NoPolygons,
    #[error("polygons need at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("tabu list capacity must be non-zero")]
    ZeroTabuCapacity,
    #[error("image is {width}x{height}, structural similarity needs at least {min}x{min}")]
    ImageTooSmall { width: u32, height: u32, min: u32 },
    #[error("image is {actual:?}, reference is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("structural similarity failed: {0}")]
    Compare(#[from] image_compare::CompareError),
    #[error("failed to write snapshot {path:?}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
