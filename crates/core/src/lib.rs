pub mod detection;
pub mod geometry;
pub mod landmarks;
pub mod pipeline;
pub mod shared;
