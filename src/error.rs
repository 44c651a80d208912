use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjError {
    #[error("Unknown projection: {0}")]
    UnknownName(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Projection used before initialize()")]
    NotInitialized,

    #[error("Iteration did not converge: {0}")]
    NoConvergence(&'static str),

    #[error("Coordinate outside projection domain")]
    OutsideDomain,

    #[error("{0} does not support an inverse")]
    InverseUnsupported(&'static str),
}
