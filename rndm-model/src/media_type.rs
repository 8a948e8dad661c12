use std::fmt::Display;
use std::fmt::Formatter;

/// Simple enum for the three loggable media categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaType {
    /// Movie or TV media type
    Movie = 0,
    /// Book media type
    Book = 1,
    /// Music album media type
    Music = 2,
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Movie => write!(f, "movie"),
            MediaType::Book => write!(f, "book"),
            MediaType::Music => write!(f, "music"),
        }
    }
}

impl From<i16> for MediaType {
    fn from(value: i16) -> Self {
        match value {
            0 => MediaType::Movie,
            1 => MediaType::Book,
            2 => MediaType::Music,
            _ => panic!("Invalid media type"),
        }
    }
}

impl From<MediaType> for i16 {
    fn from(value: MediaType) -> Self {
        value as i16
    }
}
