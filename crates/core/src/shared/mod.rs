pub mod constants;
pub mod landmark_set;
pub mod point;
