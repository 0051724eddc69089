//! Utility modules

pub mod file_validation;

pub use file_validation::{
    is_likely_binary, read_source_file, validate_file_for_opening, FileOpenError, MAX_FILE_SIZE,
};
