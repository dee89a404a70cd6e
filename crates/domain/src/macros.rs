//! Macro for implementing Display and FromStr for status enums
//!
//! Used by `SessionState` so its log/persisted form is a single lowercase
//! token.
//!
//! # Example
//!
//! ```rust
//! use presensi_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum UploadStatus {
//!     Staged,
//!     Submitted,
//! }
//!
//! impl_domain_status_conversions!(UploadStatus {
//!     Staged => "staged",
//!     Submitted => "submitted",
//! });
//! ```

/// Implements Display and FromStr traits for status enums
///
/// - Display writes the lowercase token
/// - FromStr parses case-insensitively and reports the enum name on failure
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
