//! ANSI palette for typelib dumps.
//!
//! - Section: `[header]`, `[directory]` and friends
//! - Name: entry and member names
//! - Dim: offsets, sizes, flags
//! - Reset: back to default

/// ANSI color palette for dump output.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub section: &'static str,
    pub name: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        section: "\x1b[34m",
        name: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        section: "",
        name: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.section.is_empty()
    }
}
