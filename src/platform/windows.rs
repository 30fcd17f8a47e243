//! Win32 message box binding
use windows::core::HSTRING;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MESSAGEBOX_STYLE};

/// Show `MessageBoxW` with no owner window and return the pressed button id
pub fn message_box(text: &str, title: &str, style: u32) -> i32 {
    let text = HSTRING::from(text);
    let title = HSTRING::from(title);

    let result = unsafe { MessageBoxW(HWND::default(), &text, &title, MESSAGEBOX_STYLE(style)) };
    result.0
}
