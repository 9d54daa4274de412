pub mod aspect_ratio;
pub mod face_ratios;
pub mod landmark_scheme;
