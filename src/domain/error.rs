use thiserror::Error;

/// Errors raised by the cache driver, its configs and the export engine
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("No server pairs provided: config={config}")]
    NoServerPairsProvided { config: String },

    #[error("No connection: {message}")]
    NoConnection { message: String },

    #[error("Invalid object for key creation: {message}")]
    InvalidObjectForKeyCreation { message: String },

    #[error("Storable object required: {message}")]
    StorableObjectRequired { message: String },

    #[error("Operation not supported: {operation}")]
    OperationNotSupported { operation: String },

    #[error("No fields found on storable object: {type_name}")]
    NoFieldsFound { type_name: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Import error: {message}")]
    Import { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache client error: {message}")]
    Client { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type CacheResult<T> = Result<T, CacheError>;

impl CacheError {
    pub fn no_server_pairs(config: impl Into<String>) -> Self {
        Self::NoServerPairsProvided {
            config: config.into(),
        }
    }

    pub fn no_connection(message: impl Into<String>) -> Self {
        Self::NoConnection {
            message: message.into(),
        }
    }

    pub fn invalid_object_for_key(message: impl Into<String>) -> Self {
        Self::InvalidObjectForKeyCreation {
            message: message.into(),
        }
    }

    pub fn storable_object_required(message: impl Into<String>) -> Self {
        Self::StorableObjectRequired {
            message: message.into(),
        }
    }

    pub fn not_supported(operation: impl Into<String>) -> Self {
        Self::OperationNotSupported {
            operation: operation.into(),
        }
    }

    pub fn no_fields(type_name: impl Into<String>) -> Self {
        Self::NoFieldsFound {
            type_name: type_name.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
        }
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
