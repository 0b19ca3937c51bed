use std::fmt;

use super::geom::GeomError;

pub type Result<T> = std::result::Result<T, UiError>;

#[derive(Debug)]
pub enum UiError {
    /// The renderer has no render method registered for the class.
    NoRenderMethod { class: String },
    /// The skin has no element for the class.
    NoThemeEntry { class: String, skin: String },
    /// The class declares both ABOVE_BACKGROUND and BELOW_FOREGROUND.
    ConflictingRenderLayers { class: String },
    /// `pop_clip_rect` without a matching push.
    UnbalancedClip,
    /// The id does not refer to a live control.
    UnknownControl,
    /// The control's state is not the type the caller expected.
    ClassMismatch { expected: &'static str, found: &'static str },
    NotAContainer { class: String },
    DuplicateName { name: String },
    UnknownChannel { class: String, channel: String },
    InvalidRange { minimum: i32, maximum: i32 },
    Geometry(GeomError),
    Skin(String),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::NoRenderMethod { class } => write!(f, "no render method for class {class}"),
            UiError::NoThemeEntry { class, skin } => {
                write!(f, "skin {skin} has no entry for class {class}")
            }
            UiError::ConflictingRenderLayers { class } => write!(
                f,
                "class {class} declares both ABOVE_BACKGROUND and BELOW_FOREGROUND"
            ),
            UiError::UnbalancedClip => write!(f, "clip rect popped without a matching push"),
            UiError::UnknownControl => write!(f, "control no longer exists"),
            UiError::ClassMismatch { expected, found } => {
                write!(f, "expected a {expected} control, found {found}")
            }
            UiError::NotAContainer { class } => write!(f, "{class} cannot own children"),
            UiError::DuplicateName { name } => write!(f, "a sibling is already named {name}"),
            UiError::UnknownChannel { class, channel } => {
                write!(f, "{class} has no {channel} event")
            }
            UiError::InvalidRange { minimum, maximum } => {
                write!(f, "minimum {minimum} is above maximum {maximum}")
            }
            UiError::Geometry(e) => write!(f, "{e}"),
            UiError::Skin(msg) => write!(f, "invalid skin: {msg}"),
            UiError::Json(e) => write!(f, "json: {e}"),
            UiError::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for UiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UiError::Geometry(e) => Some(e),
            UiError::Json(e) => Some(e),
            UiError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeomError> for UiError {
    fn from(e: GeomError) -> Self {
        UiError::Geometry(e)
    }
}

impl From<serde_json::Error> for UiError {
    fn from(e: serde_json::Error) -> Self {
        UiError::Json(e)
    }
}

impl From<std::io::Error> for UiError {
    fn from(e: std::io::Error) -> Self {
        UiError::Io(e)
    }
}
