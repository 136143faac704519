use crate::context::WindowSystem;

/// The interactive desktop of the current session.
pub struct DesktopWindows;

#[cfg(target_os = "windows")]
mod win32 {
    use super::{DesktopWindows, WindowSystem};
    use crate::context::decode_wide;
    use crate::utils::process::ProcessHandle;
    use log::debug;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{
        GetForegroundWindow, GetWindowTextW, GetWindowThreadProcessId,
    };

    impl WindowSystem for DesktopWindows {
        type Window = HWND;

        fn foreground_window(&self) -> Option<HWND> {
            let hwnd = unsafe { GetForegroundWindow() };
            if hwnd.0.is_null() { None } else { Some(hwnd) }
        }

        fn window_title(&self, window: HWND, capacity: usize) -> String {
            let mut title_buf = vec![0u16; capacity];
            let title_len = unsafe { GetWindowTextW(window, &mut title_buf) };
            let title_len = usize::try_from(title_len).unwrap_or(0).min(title_buf.len());
            decode_wide(&title_buf[..title_len])
        }

        fn window_process_id(&self, window: HWND) -> Option<u32> {
            let mut process_id: u32 = 0;
            unsafe {
                GetWindowThreadProcessId(window, Some(&mut process_id as *mut u32));
            }
            (process_id != 0).then_some(process_id)
        }

        fn process_image_path(&self, pid: u32, capacity: usize) -> Option<String> {
            let process = match ProcessHandle::open_limited(pid) {
                Ok(process) => process,
                Err(e) => {
                    debug!("OpenProcess({pid}) failed: {e}");
                    return None;
                }
            };
            match process.image_path(capacity) {
                Ok(path) => Some(path),
                Err(e) => {
                    debug!("QueryFullProcessImageNameW({pid}) failed: {e}");
                    None
                }
            }
        }
    }
}

// Other platforms have no notion of a foreground window here; every capture reports none.
#[cfg(not(target_os = "windows"))]
impl WindowSystem for DesktopWindows {
    type Window = ();

    fn foreground_window(&self) -> Option<()> {
        log::debug!("Foreground window lookup is only implemented on Windows");
        None
    }

    fn window_title(&self, _window: (), _capacity: usize) -> String {
        String::new()
    }

    fn window_process_id(&self, _window: ()) -> Option<u32> {
        None
    }

    fn process_image_path(&self, _pid: u32, _capacity: usize) -> Option<String> {
        None
    }
}

#[cfg(all(test, not(target_os = "windows")))]
mod tests {
    use super::*;
    use crate::config::Limits;
    use crate::context::run;

    #[test]
    fn test_desktop_without_window_manager_emits_nothing() {
        let mut out = Vec::new();
        let err = run(&DesktopWindows, &Limits::default(), &mut out).unwrap_err();
        assert_eq!(err.to_string(), "No foreground window");
        assert!(out.is_empty());
    }
}
