/// Convenience result type used across the crate.
pub type MinimalResult<T> = Result<T, MinimalError>;

/// Top-level error taxonomy used by drawing and pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum MinimalError {
    /// Invalid construction input (division counts, waypoint lists, indices).
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown keyword for an axis, translate op, traversal or at-end mode.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A field that is not animatable on the targeted shape kind.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// Arithmetic that has no defined result, such as dividing by zero.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// An operation applied to the wrong kind of content.
    #[error("type error: {0}")]
    Type(String),

    /// Rasterizer or surface failures.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing settings and store metadata.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MinimalError {
    /// Build a [`MinimalError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MinimalError::InvalidArgument`] value naming the accepted keywords.
    pub fn invalid_argument(got: &str, accepted: &[&str]) -> Self {
        Self::InvalidArgument(format!(
            "'{got}' not recognized; accepts: {}",
            quoted_list(accepted)
        ))
    }

    /// Build a [`MinimalError::InvalidAttribute`] value listing the allowed fields.
    pub fn invalid_attribute(got: &str, allowed: &[&str]) -> Self {
        Self::InvalidAttribute(format!(
            "'{got}' is not transformable; allowed: {}",
            quoted_list(allowed)
        ))
    }

    /// Build a [`MinimalError::Arithmetic`] value.
    pub fn arithmetic(msg: impl Into<String>) -> Self {
        Self::Arithmetic(msg.into())
    }

    /// Build a [`MinimalError::Type`] value.
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::Type(msg.into())
    }

    /// Build a [`MinimalError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MinimalError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

fn quoted_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|s| format!("'{s}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
