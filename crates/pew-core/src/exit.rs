//! Process exit statuses, following common shell conventions.

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const NOT_EXECUTABLE: i32 = 126;
pub const NOT_FOUND: i32 = 127;
pub const INTERRUPTED: i32 = 130;
