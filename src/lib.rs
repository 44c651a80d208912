pub mod error;
pub mod line;
pub mod proj;
pub mod projector;
pub mod registry;

pub use error::ProjError;
pub use line::MapLine;
pub use proj::Projection;
pub use projector::LineProjector;
