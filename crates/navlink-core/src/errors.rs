use navlink_core_types::EntityKey;
use thiserror::Error;

/// Result type alias using NavLinkError
pub type Result<T> = std::result::Result<T, NavLinkError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    InvalidProperty,
    NotFound,

    // Tracking
    NotTracked,
    AlreadyTracked,
    Deleted,

    // Relationship
    DuplicateLink,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidProperty => "ERR_INVALID_PROPERTY",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::NotTracked => "ERR_NOT_TRACKED",
            ExErrorKind::AlreadyTracked => "ERR_ALREADY_TRACKED",
            ExErrorKind::Deleted => "ERR_DELETED",
            ExErrorKind::DuplicateLink => "ERR_DUPLICATE_LINK",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus the relationship
/// context (owner/item keys, navigation property) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_key: Option<EntityKey>,
    related_key: Option<EntityKey>,
    property: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_key: None,
            related_key: None,
            property: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the primary entity key (the link source for relationship errors)
    pub fn with_entity_key(mut self, key: EntityKey) -> Self {
        self.entity_key = Some(key);
        self
    }

    /// Add the related entity key (the link target)
    pub fn with_related_key(mut self, key: EntityKey) -> Self {
        self.related_key = Some(key);
        self
    }

    /// Add navigation property context
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the primary entity key, if any
    pub fn entity_key(&self) -> Option<&EntityKey> {
        self.entity_key.as_ref()
    }

    /// Get the related entity key, if any
    pub fn related_key(&self) -> Option<&EntityKey> {
        self.related_key.as_ref()
    }

    /// Get the navigation property, if any
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.entity_key {
            write!(f, " (entity_key: {})", key)?;
        }
        if let Some(property) = &self.property {
            write!(f, " (property: {})", property)?;
        }
        if let Some(key) = &self.related_key {
            write!(f, " (related_key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for tracking-context operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavLinkError {
    /// Entity has no descriptor in the context
    #[error("Entity not tracked: {entity_key}")]
    EntityNotTracked { entity_key: EntityKey },

    /// Entity already has a descriptor in the context
    #[error("Entity already tracked: {entity_key}")]
    EntityAlreadyTracked { entity_key: EntityKey },

    /// Entity is marked deleted and cannot take part in new links
    #[error("Entity is marked deleted: {entity_key}")]
    EntityDeleted { entity_key: EntityKey },

    /// Navigation property name is not usable
    #[error("Invalid navigation property: {reason}")]
    InvalidProperty { reason: String },

    /// A live link already exists between the two entities
    #[error("Duplicate link: {source_key}.{property} -> {target_key}")]
    DuplicateLink {
        source_key: EntityKey,
        property: String,
        target_key: EntityKey,
    },
}

/// Conversion from NavLinkError to ExError
impl From<NavLinkError> for ExError {
    fn from(err: NavLinkError) -> Self {
        match err {
            NavLinkError::EntityNotTracked { entity_key } => ExError::new(ExErrorKind::NotTracked)
                .with_entity_key(entity_key)
                .with_message("Entity not tracked"),

            NavLinkError::EntityAlreadyTracked { entity_key } => {
                ExError::new(ExErrorKind::AlreadyTracked)
                    .with_entity_key(entity_key)
                    .with_message("Entity already tracked")
            }

            NavLinkError::EntityDeleted { entity_key } => ExError::new(ExErrorKind::Deleted)
                .with_entity_key(entity_key)
                .with_message("Entity is marked deleted"),

            NavLinkError::InvalidProperty { reason } => {
                ExError::new(ExErrorKind::InvalidProperty).with_message(reason)
            }

            NavLinkError::DuplicateLink {
                source_key,
                property,
                target_key,
            } => ExError::new(ExErrorKind::DuplicateLink)
                .with_entity_key(source_key)
                .with_property(property)
                .with_related_key(target_key)
                .with_message("Link already exists"),
        }
    }
}
