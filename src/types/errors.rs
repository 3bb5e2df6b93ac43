use std::fmt;

// === GatewayError ===

/// Failures reported by the host's tab/window/group primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The host has no tab-group support.
    CapabilityAbsent,
    /// The host does not know the addressed tab, window or group.
    NotFound(String),
    /// The host rejected the request.
    Rejected(String),
    /// No reply arrived within the configured number of milliseconds.
    Timeout(u64),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::CapabilityAbsent => write!(f, "Tab groups are not supported by the host"),
            GatewayError::NotFound(what) => write!(f, "Host object not found: {}", what),
            GatewayError::Rejected(msg) => write!(f, "Host rejected request: {}", msg),
            GatewayError::Timeout(ms) => write!(f, "Host did not reply within {} ms", ms),
        }
    }
}

impl std::error::Error for GatewayError {}

// === SelectionError ===

/// Errors raised by the selection cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// No row is highlighted, or the highlight points past the displayed rows.
    NoSelection,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NoSelection => write!(f, "No tab is highlighted"),
        }
    }
}

impl std::error::Error for SelectionError {}

// === SettingsError ===

/// Errors related to loading extension settings.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading settings.
    IoError(String),
    /// Failed to deserialize settings.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === SessionError ===

/// Errors surfaced by the popup session to its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// A host call failed; local state was left as last confirmed.
    Gateway(GatewayError),
    /// Enter was pressed with nothing highlighted.
    Selection(SelectionError),
    /// An action arrived before `start()` completed.
    NotStarted,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Gateway(err) => write!(f, "Gateway failure: {}", err),
            SessionError::Selection(err) => write!(f, "Selection failure: {}", err),
            SessionError::NotStarted => write!(f, "Session has not been started"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Gateway(err) => Some(err),
            SessionError::Selection(err) => Some(err),
            SessionError::NotStarted => None,
        }
    }
}

impl From<GatewayError> for SessionError {
    fn from(err: GatewayError) -> Self {
        SessionError::Gateway(err)
    }
}

impl From<SelectionError> for SessionError {
    fn from(err: SelectionError) -> Self {
        SessionError::Selection(err)
    }
}
