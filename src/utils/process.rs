use crate::context::decode_wide;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
    QueryFullProcessImageNameW,
};
use windows::core::PWSTR;

/// A process handle opened with `PROCESS_QUERY_LIMITED_INFORMATION`.
///
/// Closed on drop.
pub struct ProcessHandle {
    handle: HANDLE,
}

impl ProcessHandle {
    pub fn open_limited(pid: u32) -> windows::core::Result<Self> {
        let handle = unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid)? };
        Ok(Self { handle })
    }

    /// Full Win32 path of the process executable, reading at most `capacity` UTF-16 units.
    pub fn image_path(&self, capacity: usize) -> windows::core::Result<String> {
        let mut exe_path = vec![0u16; capacity.max(1)];
        let mut size = u32::try_from(exe_path.len()).unwrap_or(u32::MAX);
        unsafe {
            QueryFullProcessImageNameW(
                self.handle,
                PROCESS_NAME_WIN32,
                PWSTR(exe_path.as_mut_ptr()),
                &mut size,
            )?;
        }
        let len = usize::try_from(size).unwrap_or(0).min(exe_path.len());
        Ok(decode_wide(&exe_path[..len]))
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}
