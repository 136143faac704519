use super::MAX_PATH;

/// Buffer bounds for every text-producing step of a capture.
///
/// All capacities include one slot for a terminator, so a capacity of `n`
/// retains at most `n - 1` units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// UTF-16 units handed to the window text reader.
    pub title_capacity: usize,
    /// Bytes of the UTF-8 title kept after conversion.
    pub title_utf8_capacity: usize,
    /// UTF-16 units for the process image path query.
    pub image_path_capacity: usize,
    /// Bytes of the executable base name kept.
    pub app_name_capacity: usize,
    pub escaped_title_capacity: usize,
    pub escaped_app_name_capacity: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            title_capacity: 1024,
            title_utf8_capacity: 4096,
            image_path_capacity: MAX_PATH,
            app_name_capacity: MAX_PATH,
            escaped_title_capacity: 8192,
            escaped_app_name_capacity: MAX_PATH * 2,
        }
    }
}
