use std::fmt;

/// Declared support for the asynchronous and reactive execution styles.
///
/// Capabilities are advisory: a selection layer filters providers by them,
/// but nothing in the operation call path checks the flags. Invoking an
/// unsupported style is a caller error this layer does not detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    supports_async: bool,
    supports_reactive: bool,
}

impl Capabilities {
    /// No advanced execution styles; blocking only.
    pub const fn none() -> Self {
        Self {
            supports_async: false,
            supports_reactive: false,
        }
    }

    /// Future-based operations only.
    pub const fn on_async() -> Self {
        Self {
            supports_async: true,
            supports_reactive: false,
        }
    }

    /// Reactive operations only.
    pub const fn on_reactive() -> Self {
        Self {
            supports_async: false,
            supports_reactive: true,
        }
    }

    /// Both future-based and reactive operations.
    pub const fn both() -> Self {
        Self {
            supports_async: true,
            supports_reactive: true,
        }
    }

    pub const fn supports_async(&self) -> bool {
        self.supports_async
    }

    pub const fn supports_reactive(&self) -> bool {
        self.supports_reactive
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "async={}, reactive={}",
            self.supports_async, self.supports_reactive
        )
    }
}
