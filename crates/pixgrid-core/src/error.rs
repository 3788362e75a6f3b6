use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid grid dimensions {width}x{height}: width and height must be positive integers")]
    InvalidDimension { width: String, height: String },

    #[error("Grid of {width}x{height} pixels exceeds the limit of {limit} pixels")]
    TooLarge {
        width: usize,
        height: usize,
        limit: usize,
    },

    #[error("Pixel ({col}, {row}) is outside the {width}x{height} grid")]
    OutOfBounds {
        col: i64,
        row: i64,
        width: usize,
        height: usize,
    },
}

impl GridError {
    pub fn invalid_dimension(width: impl ToString, height: impl ToString) -> Self {
        GridError::InvalidDimension {
            width: width.to_string(),
            height: height.to_string(),
        }
    }
}
