pub mod encode;

use crate::config::Limits;
use anyhow::{Result, bail};
use encode::{truncate_to_capacity, write_record};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// What the user is looking at: the foreground window's title and the
/// executable name of the process that owns it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowContext {
    #[serde(rename = "appName")]
    pub app_name: String,

    #[serde(rename = "windowTitle")]
    pub window_title: String,
}

/// The OS queries a capture is built from.
///
/// None of these report errors. Lookups that can fail return `None` and the
/// capture folds that into an empty field.
pub trait WindowSystem {
    type Window: Copy;

    fn foreground_window(&self) -> Option<Self::Window>;

    /// Title text, reading at most `capacity - 1` UTF-16 units.
    fn window_title(&self, window: Self::Window, capacity: usize) -> String;

    fn window_process_id(&self, window: Self::Window) -> Option<u32>;

    /// Full image path of `pid`, queried with limited-information access.
    fn process_image_path(&self, pid: u32, capacity: usize) -> Option<String>;
}

/// Queries the foreground window once. Fails only when there is none.
pub fn capture(system: &impl WindowSystem, limits: &Limits) -> Result<WindowContext> {
    let Some(window) = system.foreground_window() else {
        bail!("No foreground window");
    };

    let title = system.window_title(window, limits.title_capacity);
    let window_title = truncate_to_capacity(&title, limits.title_utf8_capacity).to_string();
    trace!("Foreground window title: {window_title:?}");

    let app_name = match system.window_process_id(window).filter(|&pid| pid != 0) {
        Some(pid) => match system.process_image_path(pid, limits.image_path_capacity) {
            Some(path) => {
                trace!("Process {pid} image path: {path:?}");
                truncate_to_capacity(executable_name(&path), limits.app_name_capacity).to_string()
            }
            None => {
                debug!("Image path of process {pid} unavailable, leaving appName empty");
                String::new()
            }
        },
        None => {
            debug!("Foreground window has no owning process, leaving appName empty");
            String::new()
        }
    };

    Ok(WindowContext {
        app_name,
        window_title,
    })
}

/// Captures the foreground window and writes its record to `out`.
pub fn run<W: Write>(system: &impl WindowSystem, limits: &Limits, out: &mut W) -> Result<()> {
    let context = capture(system, limits)?;
    write_record(out, &context, limits)
}

/// Final segment of an image path, or the whole path when it has no separator.
pub fn executable_name(path: &str) -> &str {
    path.rsplit(['\\', '/']).next().unwrap_or(path)
}

/// Decodes a UTF-16 buffer up to its first NUL. Unpaired surrogates become U+FFFD.
pub fn decode_wide(units: &[u16]) -> String {
    let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
    String::from_utf16_lossy(&units[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakeSystem {
        foreground: bool,
        title: String,
        pid: Option<u32>,
        image_path: Option<String>,
        image_queries: Cell<usize>,
        title_capacity: Cell<usize>,
    }

    impl WindowSystem for FakeSystem {
        type Window = u32;

        fn foreground_window(&self) -> Option<u32> {
            self.foreground.then_some(0x1234)
        }

        fn window_title(&self, window: u32, capacity: usize) -> String {
            assert_eq!(window, 0x1234);
            self.title_capacity.set(capacity);
            self.title.clone()
        }

        fn window_process_id(&self, _window: u32) -> Option<u32> {
            self.pid
        }

        fn process_image_path(&self, _pid: u32, _capacity: usize) -> Option<String> {
            self.image_queries.set(self.image_queries.get() + 1);
            self.image_path.clone()
        }
    }

    fn code_window() -> FakeSystem {
        FakeSystem {
            foreground: true,
            title: "main.rs — crate — Visual Studio Code".to_string(),
            pid: Some(4242),
            image_path: Some(r"C:\Users\dev\AppData\Local\Programs\Microsoft VS Code\Code.exe".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_capture_foreground_window() {
        let system = code_window();
        let context = capture(&system, &Limits::default()).unwrap();
        assert_eq!(context.app_name, "Code.exe");
        assert_eq!(context.window_title, "main.rs — crate — Visual Studio Code");
        assert_eq!(system.title_capacity.get(), 1024);
        assert_eq!(system.image_queries.get(), 1);
    }

    #[test]
    fn test_capture_without_foreground_window_fails() {
        let system = FakeSystem::default();
        let err = capture(&system, &Limits::default()).unwrap_err();
        assert_eq!(err.to_string(), "No foreground window");

        let mut out = Vec::new();
        assert!(run(&system, &Limits::default(), &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_capture_with_denied_image_query_leaves_app_name_empty() {
        let system = FakeSystem {
            image_path: None,
            ..code_window()
        };
        let mut out = Vec::new();
        run(&system, &Limits::default(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"appName\":\"\",\"windowTitle\":\"main.rs — crate — Visual Studio Code\"}\n"
        );
    }

    #[test]
    fn test_capture_without_owning_process_skips_image_query() {
        for pid in [None, Some(0)] {
            let system = FakeSystem { pid, ..code_window() };
            let context = capture(&system, &Limits::default()).unwrap();
            assert_eq!(context.app_name, "");
            assert_eq!(system.image_queries.get(), 0);
        }
    }

    #[test]
    fn test_capture_untitled_window() {
        let system = FakeSystem {
            title: String::new(),
            ..code_window()
        };
        let context = capture(&system, &Limits::default()).unwrap();
        assert_eq!(context.window_title, "");
        assert_eq!(context.app_name, "Code.exe");
    }

    #[test]
    fn test_capture_bounds_fields() {
        let limits = Limits {
            title_utf8_capacity: 6,
            app_name_capacity: 5,
            ..Limits::default()
        };
        let system = code_window();
        let context = capture(&system, &limits).unwrap();
        assert_eq!(context.window_title, "main.");
        assert_eq!(context.app_name, "Code");
    }

    #[test]
    fn test_executable_name() {
        assert_eq!(executable_name(r"C:\Windows\explorer.exe"), "explorer.exe");
        assert_eq!(executable_name(r"\\?\C:\Tools\app.exe"), "app.exe");
        assert_eq!(executable_name("C:/Tools/app.exe"), "app.exe");
        assert_eq!(executable_name("app.exe"), "app.exe");
        assert_eq!(executable_name(r"C:\Tools\"), "");
        assert_eq!(executable_name(""), "");
    }

    #[test]
    fn test_decode_wide() {
        let units: Vec<u16> = "Notepad — ünï 🦀".encode_utf16().collect();
        assert_eq!(decode_wide(&units), "Notepad — ünï 🦀");

        let mut padded: Vec<u16> = "abc".encode_utf16().collect();
        padded.extend([0, 0x41, 0x42]);
        assert_eq!(decode_wide(&padded), "abc");

        assert_eq!(decode_wide(&[]), "");
    }

    #[test]
    fn test_decode_wide_replaces_unpaired_surrogates() {
        // lone high surrogate, then a lone low surrogate
        let units: [u16; 5] = [0x61, 0xD83E, 0x62, 0xDD80, 0x63];
        assert_eq!(decode_wide(&units), "a\u{FFFD}b\u{FFFD}c");

        let context = WindowContext {
            app_name: String::new(),
            window_title: decode_wide(&units),
        };
        let mut out = Vec::new();
        write_record(&mut out, &context, &Limits::default()).unwrap();
        let parsed: WindowContext = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, context);
    }
}
