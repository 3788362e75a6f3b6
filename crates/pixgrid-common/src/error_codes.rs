pub const INVALID_DIMENSION: i32 = -32101;
pub const OUT_OF_BOUNDS: i32 = -32102;
pub const UNINITIALIZED: i32 = -32103;
pub const MALFORMED_COMMAND: i32 = -32104;

pub const STORAGE_WRITE: i32 = -32110;
pub const SCRIPT_READ: i32 = -32111;

pub const GENERIC_ERROR: i32 = -32000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidInput,
    External,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidInput => "invalid_input",
            ErrorCategory::External => "external",
            ErrorCategory::Internal => "internal",
        }
    }

    /// UNIX sysexits.h exit code for errors in this category.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::InvalidInput => 64, // EX_USAGE
            ErrorCategory::External => 74,     // EX_IOERR
            ErrorCategory::Internal => 70,     // EX_SOFTWARE
        }
    }
}

impl std::str::FromStr for ErrorCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalid_input" => Ok(ErrorCategory::InvalidInput),
            "external" => Ok(ErrorCategory::External),
            "internal" => Ok(ErrorCategory::Internal),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn category_for_code(code: i32) -> ErrorCategory {
    match code {
        INVALID_DIMENSION | OUT_OF_BOUNDS | UNINITIALIZED | MALFORMED_COMMAND => {
            ErrorCategory::InvalidInput
        }
        STORAGE_WRITE | SCRIPT_READ => ErrorCategory::External,
        _ => ErrorCategory::Internal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_for_code_invalid_input() {
        for code in [INVALID_DIMENSION, OUT_OF_BOUNDS, UNINITIALIZED, MALFORMED_COMMAND] {
            assert_eq!(category_for_code(code), ErrorCategory::InvalidInput);
        }
    }

    #[test]
    fn test_category_for_code_external() {
        assert_eq!(category_for_code(STORAGE_WRITE), ErrorCategory::External);
        assert_eq!(category_for_code(SCRIPT_READ), ErrorCategory::External);
    }

    #[test]
    fn test_category_for_unknown_code_is_internal() {
        assert_eq!(category_for_code(GENERIC_ERROR), ErrorCategory::Internal);
        assert_eq!(category_for_code(12345), ErrorCategory::Internal);
    }

    #[test]
    fn test_category_round_trips_through_str() {
        for category in [
            ErrorCategory::InvalidInput,
            ErrorCategory::External,
            ErrorCategory::Internal,
        ] {
            assert_eq!(category.as_str().parse::<ErrorCategory>(), Ok(category));
            assert_eq!(category.to_string(), category.as_str());
        }
        assert!("bogus".parse::<ErrorCategory>().is_err());
    }

    #[test]
    fn test_exit_codes_follow_sysexits() {
        assert_eq!(ErrorCategory::InvalidInput.exit_code(), 64);
        assert_eq!(ErrorCategory::External.exit_code(), 74);
        assert_eq!(ErrorCategory::Internal.exit_code(), 70);
    }
}
