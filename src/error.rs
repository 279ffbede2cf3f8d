use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read body table: {0}")]
    Io(#[from] std::io::Error),
    #[error("body table line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("body table is empty")]
    EmptyTable,
    #[error("body `{0}` is defined more than once")]
    DuplicateBody(String),
    #[error("no body named `{0}`")]
    UnknownBody(String),
    #[error("body `{name}` has invalid {field}: {value}")]
    InvalidParameter {
        name: String,
        field: &'static str,
        value: f64,
    },
    #[error("invalid {name}: {value}")]
    InvalidTimeParameter { name: &'static str, value: f64 },
    #[error("satellite chain through `{0}` loops back on itself")]
    SatelliteCycle(String),
    #[error("an orbit path needs at least 3 segments, got {0}")]
    TooFewSegments(usize),
    #[error("could not allocate {0} orbit-path vertices")]
    OrbitPathAllocation(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
