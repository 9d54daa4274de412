pub mod landmark_frame;
pub mod landmark_source;
