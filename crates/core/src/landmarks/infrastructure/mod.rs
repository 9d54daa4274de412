pub mod jsonl_landmark_reader;
pub mod prefetching_landmark_source;
