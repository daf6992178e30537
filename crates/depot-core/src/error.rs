use thiserror::Error as ThisError;

///
/// StoreError
///
/// Root error for every entity-store operation.
/// All failure surfaces — path resolution, builder misuse, capability
/// mismatch, backend protocol — converge here so callers can branch on kind.
///

#[derive(Clone, Debug, ThisError)]
pub enum StoreError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Support(#[from] SupportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("no {entity} entity matched the query")]
    EntityNotFound { entity: &'static str },

    #[error("codec failure for entity {entity}: {message}")]
    Codec {
        entity: &'static str,
        message: String,
    },
}

impl StoreError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EntityNotFound { .. } | Self::Protocol(ProtocolError::NotFound { .. })
        )
    }
}

///
/// PathError
///
/// Failures while resolving or writing through a property path.
/// `NotDeclared` carries the dotted path accumulated up to the failing
/// segment; `Get` is distinct and means the metadata exists but no value
/// could be read at runtime.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("property '{path}' is not declared on entity {entity}")]
    NotDeclared { entity: &'static str, path: String },

    #[error("property '{path}' is declared but no value could be read")]
    Get { path: String },

    #[error("property '{path}' cannot be written through a resolved path")]
    Set { path: String },

    #[error("collection relation '{path}' carries no element type metadata")]
    GenericMetadataNotFound { path: String },
}

///
/// BuildError
///
/// Builder misuse detected before a command is produced.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum BuildError {
    #[error("no {entity} entity attached; call attach(..) before building")]
    EntityNotAttached { entity: &'static str },

    #[error("no {entity} collection attached; call attach(..) before building")]
    CollectionNotAttached { entity: &'static str },
}

///
/// SupportError
///
/// Capability mismatch: a provider or interpreter received a command or
/// expression it cannot handle.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SupportError {
    #[error("command {command} is not supported by provider {provider}")]
    Command {
        command: &'static str,
        provider: &'static str,
    },

    #[error("expression {expression} is not supported by {visitor}")]
    Expression {
        expression: &'static str,
        visitor: &'static str,
    },
}

///
/// ProtocolError
///
/// Backend-protocol failures raised by remote providers. Each variant
/// carries the target href and the HTTP status that produced it.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ProtocolError {
    #[error("resource not found: {href} (status {status})")]
    NotFound { href: String, status: u16 },

    #[error("access forbidden: {href} (status {status})")]
    Forbidden { href: String, status: u16 },

    #[error("conflicting resource state: {href} (status {status})")]
    Conflict { href: String, status: u16 },

    #[error("transport failure for {href}: {message}")]
    Transport { href: String, message: String },

    #[error("request failed: {href} (status {status})")]
    Other { href: String, status: u16 },
}

impl ProtocolError {
    /// Classify a non-success HTTP status against the href that produced it.
    #[must_use]
    pub fn from_status(href: impl Into<String>, status: u16) -> Self {
        let href = href.into();
        match status {
            404 => Self::NotFound { href, status },
            403 => Self::Forbidden { href, status },
            409 => Self::Conflict { href, status },
            _ => Self::Other { href, status },
        }
    }
}

///
/// TESTS
///
