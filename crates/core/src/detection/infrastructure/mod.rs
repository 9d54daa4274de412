pub mod thresholds_file;
