/// Landmark count of the refined face-mesh scheme the default indices refer to.
pub const FACE_MESH_LANDMARKS: usize = 468;

/// Left eye: outer corner, two upper lid points, inner corner, two lower lid points.
pub const LEFT_EYE_POINTS: [usize; 6] = [33, 160, 158, 133, 153, 144];
pub const RIGHT_EYE_POINTS: [usize; 6] = [362, 385, 387, 263, 373, 380];

/// Mouth: left corner, three upper points, right corner, three lower points.
pub const MOUTH_POINTS: [usize; 8] = [61, 84, 17, 314, 405, 320, 307, 375];

pub const DEFAULT_EYE_THRESHOLD: f64 = 0.25;
pub const DEFAULT_EYE_CONSEC_FRAMES: u32 = 2;
pub const DEFAULT_MOUTH_THRESHOLD: f64 = 0.6;
pub const DEFAULT_MOUTH_CONSEC_FRAMES: u32 = 10;
pub const DEFAULT_DROWSY_BLINK_THRESHOLD: u32 = 15;
pub const DEFAULT_DROWSY_YAWN_THRESHOLD: u32 = 3;

/// Frames averaged by the rolling frame-rate meter (~1 second at 30 fps).
pub const FRAME_RATE_WINDOW: usize = 30;

/// Items buffered between a prefetching reader thread and the detector.
pub const PREFETCH_CAPACITY: usize = 8;

/// How long closing a prefetching source waits for its reader thread to
/// hand the inner source back before detaching it.
pub const PREFETCH_SHUTDOWN_GRACE_MS: u64 = 500;
