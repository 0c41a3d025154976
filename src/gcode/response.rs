//! Responses sent back to the host.

use core::fmt::{self, Write};

use heapless::String;

use crate::driver::Temperatures;

/// Result of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Nothing to send; the command only queued motion.
    None,
    /// Plain `ok`.
    Ok,
    /// A status line such as `ok T:205 B:60`.
    Status(String<48>),
}

impl Response {
    /// Temperature report in the `ok T:<hotend> B:<bed>` format.
    ///
    /// Unavailable readings keep their sentinel value.
    pub fn temperature(t: Temperatures) -> Self {
        let mut line = String::new();
        // "ok T:-2147483648 B:-2147483648" is 30 chars, always fits
        let written = write!(line, "ok T:{} B:{}", t.hotend, t.bed).is_ok();
        debug_assert!(written);
        Response::Status(line)
    }

    /// Text to send, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Response::None => None,
            Response::Ok => Some("ok"),
            Response::Status(s) => Some(s.as_str()),
        }
    }

    /// True when nothing is sent.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Response::None)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or(""))
    }
}
