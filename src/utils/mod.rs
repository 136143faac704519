#[cfg(target_os = "windows")]
pub mod process;
pub mod window;
