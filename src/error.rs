//! Error types for autowiring.

use std::fmt;

/// Autowiring errors
///
/// Represents the conditions that can occur while resolving references,
/// assigning properties, or installing parameter advice.
///
/// # Examples
///
/// ```rust
/// use ferrous_autowire::AutowireError;
///
/// let unresolved = AutowireError::Unresolved("logger".to_string());
/// let missing = AutowireError::MissingMember("greet".to_string());
/// let not_method = AutowireError::NotAMethod("port".to_string());
///
/// // All errors implement Display
/// println!("Error: {}", unresolved);
/// assert_eq!(missing.to_string(), "Member not found: greet");
/// assert_eq!(not_method.to_string(), "Member is not a method: port");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutowireError {
    /// No reference is known under this name
    Unresolved(String),
    /// The resolver knows the name but failed to produce a value
    Resolver {
        /// Reference name that was being resolved
        name: String,
        /// Resolver-supplied failure message
        message: String,
    },
    /// The component has no member with this name
    MissingMember(String),
    /// The member exists but does not hold a method
    NotAMethod(String),
    /// A configure outcome was dropped before a task was handed over
    Abandoned,
}

impl AutowireError {
    /// Reference name the failure is about, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            AutowireError::Unresolved(name)
            | AutowireError::MissingMember(name)
            | AutowireError::NotAMethod(name) => Some(name),
            AutowireError::Resolver { name, .. } => Some(name),
            AutowireError::Abandoned => None,
        }
    }
}

impl fmt::Display for AutowireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutowireError::Unresolved(name) => write!(f, "Reference not resolved: {}", name),
            AutowireError::Resolver { name, message } => {
                write!(f, "Resolver failed for {}: {}", name, message)
            }
            AutowireError::MissingMember(name) => write!(f, "Member not found: {}", name),
            AutowireError::NotAMethod(name) => write!(f, "Member is not a method: {}", name),
            AutowireError::Abandoned => write!(f, "Configure outcome dropped without a task"),
        }
    }
}

impl std::error::Error for AutowireError {}

/// Result type for autowiring operations
///
/// # Examples
///
/// ```rust
/// use ferrous_autowire::{AutowireError, AutowireResult};
///
/// fn lookup(name: &str) -> AutowireResult<u32> {
///     match name {
///         "port" => Ok(8080),
///         other => Err(AutowireError::Unresolved(other.to_string())),
///     }
/// }
///
/// assert_eq!(lookup("port"), Ok(8080));
/// assert!(lookup("host").is_err());
/// ```
pub type AutowireResult<T> = Result<T, AutowireError>;
