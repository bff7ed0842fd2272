pub const SUCCESS: i32 = 0;
pub const RUN_ERROR: i32 = 1;
pub const CONFIG_ERROR: i32 = 2;
