//! Live Process Memory Source
//!
//! Memory source implementation for reading from a running game, natively on
//! Windows or under Wine on Linux.

use process_memory::{CopyAddress, ProcessHandle, PutAddress, TryIntoProcessHandle};
use sysinfo::System;
use tracing::{debug, info};
use winmine::{Error, MemorySource, Result};

/// An attached game process
pub struct WinmineProcess {
    pub pid: u32,
    pub handle: ProcessHandle,
    /// Load address of the game executable
    pub base_address: usize,
}

// SAFETY: process handles are process-wide and can be used from any thread.
unsafe impl Send for WinmineProcess {}
unsafe impl Sync for WinmineProcess {}

impl MemorySource for WinmineProcess {
    fn read_bytes(&self, address: usize, size: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; size];
        self.handle
            .copy_address(address, &mut buffer)
            .map_err(|e| Error::MemoryRead {
                address,
                size,
                reason: e.to_string(),
            })?;
        Ok(buffer)
    }

    fn write_bytes(&self, address: usize, data: &[u8]) -> Result<()> {
        self.handle
            .put_address(address, data)
            .map_err(|e| Error::MemoryWrite {
                address,
                size: data.len(),
                reason: e.to_string(),
            })
    }
}

impl WinmineProcess {
    /// Attach to the running game by executable name
    pub fn attach(name: &str) -> Result<Self> {
        let pid = find_process(name)?;
        let handle = (pid as process_memory::Pid)
            .try_into_process_handle()
            .map_err(|e| {
                Error::ProcessUnavailable(format!("Failed to open process {}: {}", pid, e))
            })?;
        let base_address = module_base(pid, name)?;

        info!("Attached to {} (PID {}, base {:#x})", name, pid, base_address);
        Ok(Self {
            pid,
            handle,
            base_address,
        })
    }

    pub fn info(&self) -> String {
        format!("PID: {}\nBase: {:#x}", self.pid, self.base_address)
    }
}

/// Find the game process by name or command line
pub fn find_process(name: &str) -> Result<u32> {
    let mut system = System::new_all();
    system.refresh_all();

    let wanted = name.to_ascii_lowercase();
    let mut candidates: Vec<(u32, u64)> = system
        .processes()
        .values()
        .filter(|process| {
            let by_name = process.name().to_string_lossy().to_ascii_lowercase() == wanted;
            // Wine processes often carry the Windows path in argv[0]
            let by_cmd = process.cmd().first().is_some_and(|arg| {
                arg.to_string_lossy()
                    .to_ascii_lowercase()
                    .replace('\\', "/")
                    .ends_with(&wanted)
            });
            by_name || by_cmd
        })
        .map(|process| (process.pid().as_u32(), process.memory()))
        .collect();

    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.dedup_by(|a, b| a.0 == b.0);

    match candidates.first() {
        Some((pid, _)) => {
            debug!("Found {} as PID {}", name, pid);
            Ok(*pid)
        }
        None => Err(Error::ProcessUnavailable(format!(
            "{} is not running",
            name
        ))),
    }
}

/// Load address of module `name` inside process `pid`
#[cfg(windows)]
pub fn module_base(pid: u32, name: &str) -> Result<usize> {
    use std::mem;
    use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
    use winapi::um::tlhelp32::{
        CreateToolhelp32Snapshot, Module32FirstW, Module32NextW, MODULEENTRY32W,
        TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32,
    };

    unsafe {
        let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid);
        if snapshot == INVALID_HANDLE_VALUE {
            return Err(Error::ProcessUnavailable(format!(
                "Cannot list modules of process {}",
                pid
            )));
        }

        let mut entry: MODULEENTRY32W = mem::zeroed();
        entry.dwSize = mem::size_of::<MODULEENTRY32W>() as u32;

        let mut found = None;
        let mut more = Module32FirstW(snapshot, &mut entry);
        while more != 0 {
            let len = entry
                .szModule
                .iter()
                .position(|&c| c == 0)
                .unwrap_or(entry.szModule.len());
            let module = String::from_utf16_lossy(&entry.szModule[..len]);
            if module.eq_ignore_ascii_case(name) {
                found = Some(entry.modBaseAddr as usize);
                break;
            }
            more = Module32NextW(snapshot, &mut entry);
        }
        CloseHandle(snapshot);

        found.ok_or_else(|| {
            Error::ProcessUnavailable(format!("Module {} not found in process {}", name, pid))
        })
    }
}

/// Load address of module `name` inside process `pid`
#[cfg(not(windows))]
pub fn module_base(pid: u32, name: &str) -> Result<usize> {
    let maps_path = format!("/proc/{}/maps", pid);
    let maps = std::fs::read_to_string(&maps_path).map_err(|e| {
        Error::ProcessUnavailable(format!("Failed to read {}: {}", maps_path, e))
    })?;

    module_base_from_maps(&maps, name).ok_or_else(|| {
        Error::ProcessUnavailable(format!("Module {} not mapped in process {}", name, pid))
    })
}

/// Lowest mapping of a file called `name` in /proc/pid/maps text
#[cfg_attr(windows, allow(dead_code))]
fn module_base_from_maps(maps: &str, name: &str) -> Option<usize> {
    maps.lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let range = parts.next()?;
            // perms, offset, dev, inode, then the path (which may contain spaces)
            let path = parts.skip(4).collect::<Vec<_>>().join(" ");
            let file = path.rsplit('/').next()?;
            if !file.eq_ignore_ascii_case(name) {
                return None;
            }
            let start = range.split('-').next()?;
            usize::from_str_radix(start, 16).ok()
        })
        .min()
}
