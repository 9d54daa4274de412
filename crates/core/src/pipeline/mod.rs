pub mod frame_rate_meter;
pub mod frame_report;
pub mod monitor_logger;
pub mod monitor_session;
pub mod monitor_use_case;
