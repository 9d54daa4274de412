pub mod debounce_counter;
pub mod event_detector;
pub mod thresholds;
