/// Application-wide configuration.
pub const TOTAL_LEVELS: u32 = 10;
/// Grid shape: 20x10 = 200 pieces per level.
pub const ROWS: usize = 10;
pub const COLS: usize = 20;
/// Single localStorage key holding the progress record.
pub const SAVE_KEY: &str = "jigsawProgress_v1";
/// Level images are named `img<level>.<ext>`.
pub const IMAGE_EXT: &str = "jpg";
/// Quiet window for coalescing resize notifications (ms).
pub const RESIZE_DEBOUNCE_MS: i32 = 120;
