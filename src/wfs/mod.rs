pub mod conversion;
pub mod geometry;
pub mod projector;
