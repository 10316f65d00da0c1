//! Win32 backend
//!
//! Window lookup, GDI drawing on the window DC, posted mouse messages and a
//! `WH_MOUSE_LL` hook that reports left-button releases.

use std::ffi::OsStr;
use std::iter;
use std::mem;
use std::os::windows::ffi::OsStrExt;
use std::ptr::{null, null_mut};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::thread;

use tracing::debug;
use winapi::ctypes::c_int;
use winapi::shared::minwindef::{LPARAM, LRESULT, TRUE, WPARAM};
use winapi::shared::windef::{HBRUSH, HDC, HGDIOBJ, HPEN, HWND, RECT};
use winapi::um::libloaderapi::GetModuleHandleW;
use winapi::um::wingdi::{
    CreatePen, CreateSolidBrush, DeleteObject, Rectangle, SelectObject, PS_SOLID, RGB,
};
use winapi::um::winuser::{
    CallNextHookEx, DispatchMessageW, FindWindowW, GetMessageW, GetWindowDC, GetWindowRect,
    InvalidateRgn, ReleaseDC, SendMessageW, SetWindowsHookExW, TranslateMessage,
    UnhookWindowsHookEx, UpdateWindow, HC_ACTION, MSG, MSLLHOOKSTRUCT, WH_MOUSE_LL,
    WM_LBUTTONDOWN, WM_LBUTTONUP, WM_RBUTTONDOWN, WM_RBUTTONUP,
};
use winmine::{Canvas, Error, InputInjector, MouseButton, Point, Rect, Result, Rgb};

fn wide(text: &str) -> Vec<u16> {
    OsStr::new(text).encode_wide().chain(iter::once(0)).collect()
}

/// A top-level window found by its caption
#[derive(Debug, Clone)]
pub struct Window {
    hwnd: usize,
    title: String,
}

impl Window {
    pub fn find(title: &str) -> Result<Option<Window>> {
        let caption = wide(title);
        let hwnd = unsafe { FindWindowW(null(), caption.as_ptr()) };
        if hwnd.is_null() {
            return Ok(None);
        }

        debug!("Window {:?} is {:p}", title, hwnd);
        Ok(Some(Window {
            hwnd: hwnd as usize,
            title: title.to_string(),
        }))
    }

    fn hwnd(&self) -> HWND {
        self.hwnd as HWND
    }

    /// Top-left corner of the window rectangle in screen coordinates
    pub fn origin(&self) -> Result<Point> {
        let mut rect: RECT = unsafe { mem::zeroed() };
        if unsafe { GetWindowRect(self.hwnd(), &mut rect) } == 0 {
            return Err(Error::WindowNotFound(self.title.clone()));
        }
        Ok(Point::new(rect.left, rect.top))
    }

    pub fn canvas(&self) -> Result<GdiCanvas> {
        GdiCanvas::new(self.hwnd())
    }

    pub fn input(&self) -> MessageInput {
        MessageInput { hwnd: self.hwnd }
    }
}

/// Pen and brush for one overlay color
struct Tool {
    color: Rgb,
    pen: HPEN,
    brush: HBRUSH,
}

/// Drawing on the window DC
///
/// The DC and one pen/brush pair per palette color are created here and
/// released in `Drop`.
pub struct GdiCanvas {
    hwnd: HWND,
    hdc: HDC,
    tools: Vec<Tool>,
}

// SAFETY: the window DC and GDI objects are only touched behind the session
// mutex, never from two threads at once.
unsafe impl Send for GdiCanvas {}

impl GdiCanvas {
    fn new(hwnd: HWND) -> Result<Self> {
        let hdc = unsafe { GetWindowDC(hwnd) };
        if hdc.is_null() {
            return Err(Error::Platform("GetWindowDC failed".to_string()));
        }

        let tools = Rgb::PALETTE
            .iter()
            .map(|&color| {
                let Rgb(r, g, b) = color;
                let (pen, brush) = unsafe {
                    (
                        CreatePen(PS_SOLID as c_int, 1, RGB(r, g, b)),
                        CreateSolidBrush(RGB(r, g, b)),
                    )
                };
                Tool { color, pen, brush }
            })
            .collect();

        Ok(Self { hwnd, hdc, tools })
    }
}

impl Canvas for GdiCanvas {
    fn refresh(&mut self) -> Result<()> {
        unsafe {
            InvalidateRgn(self.hwnd, null_mut(), TRUE);
            UpdateWindow(self.hwnd);
        }
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.color == color)
            .ok_or_else(|| Error::Platform(format!("No pen for {:?}", color)))?;

        let drawn = unsafe {
            let old_pen = SelectObject(self.hdc, tool.pen as HGDIOBJ);
            let old_brush = SelectObject(self.hdc, tool.brush as HGDIOBJ);
            let drawn = Rectangle(self.hdc, rect.left(), rect.top(), rect.right(), rect.bottom());
            SelectObject(self.hdc, old_brush);
            SelectObject(self.hdc, old_pen);
            drawn
        };

        if drawn == 0 {
            return Err(Error::Platform(format!("Rectangle failed at {:?}", rect)));
        }
        Ok(())
    }
}

impl Drop for GdiCanvas {
    fn drop(&mut self) {
        unsafe {
            for tool in &self.tools {
                DeleteObject(tool.pen as HGDIOBJ);
                DeleteObject(tool.brush as HGDIOBJ);
            }
            ReleaseDC(self.hwnd, self.hdc);
        }
    }
}

/// Mouse input sent straight to the window's message queue
pub struct MessageInput {
    hwnd: usize,
}

impl MessageInput {
    fn send(&self, message: u32, at: Point) {
        unsafe {
            SendMessageW(self.hwnd as HWND, message, 0, at.to_lparam() as LPARAM);
        }
    }
}

impl InputInjector for MessageInput {
    fn button_down(&mut self, at: Point, button: MouseButton) -> Result<()> {
        let message = match button {
            MouseButton::Left => WM_LBUTTONDOWN,
            MouseButton::Right => WM_RBUTTONDOWN,
        };
        self.send(message, at);
        Ok(())
    }

    fn button_up(&mut self, at: Point, button: MouseButton) -> Result<()> {
        let message = match button {
            MouseButton::Left => WM_LBUTTONUP,
            MouseButton::Right => WM_RBUTTONUP,
        };
        self.send(message, at);
        Ok(())
    }
}

/// Current subscriber for left-button releases (single slot)
static RELEASES: Mutex<Option<Sender<Point>>> = Mutex::new(None);
static HOOK: OnceLock<std::result::Result<(), String>> = OnceLock::new();

fn releases() -> MutexGuard<'static, Option<Sender<Point>>> {
    RELEASES.lock().unwrap_or_else(|e| e.into_inner())
}

/// Receive screen positions of every left-button release
///
/// Installs the hook on first use. A new subscription replaces the previous
/// one, whose receiver then ends.
pub fn subscribe_releases() -> Result<Receiver<Point>> {
    if let Err(e) = HOOK.get_or_init(install_hook) {
        return Err(Error::Platform(e.clone()));
    }

    let (tx, rx) = mpsc::channel();
    *releases() = Some(tx);
    Ok(rx)
}

pub fn unsubscribe_releases() {
    *releases() = None;
}

fn install_hook() -> std::result::Result<(), String> {
    let (ready_tx, ready_rx) = mpsc::sync_channel(1);

    thread::Builder::new()
        .name("mouse-hook".to_string())
        .spawn(move || unsafe {
            let module = GetModuleHandleW(null());
            let hook = SetWindowsHookExW(WH_MOUSE_LL, Some(low_level_mouse), module, 0);
            if hook.is_null() {
                let _ = ready_tx.send(Err("SetWindowsHookExW failed".to_string()));
                return;
            }
            let _ = ready_tx.send(Ok(()));

            // Low-level hooks are delivered through this thread's message loop
            let mut msg: MSG = mem::zeroed();
            while GetMessageW(&mut msg, null_mut(), 0, 0) > 0 {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
            UnhookWindowsHookEx(hook);
        })
        .map_err(|e| format!("Failed to start mouse hook thread: {}", e))?;

    ready_rx
        .recv()
        .map_err(|e| format!("Mouse hook thread exited: {}", e))?
}

unsafe extern "system" fn low_level_mouse(code: c_int, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION && wparam == WM_LBUTTONUP as WPARAM {
        let info = &*(lparam as *const MSLLHOOKSTRUCT);
        if let Some(tx) = releases().as_ref() {
            let _ = tx.send(Point::new(info.pt.x, info.pt.y));
        }
    }
    CallNextHookEx(null_mut(), code, wparam, lparam)
}
