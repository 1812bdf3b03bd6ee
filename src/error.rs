use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    // Configuration errors
    #[error("Failed to load config file '{path}': {source}")]
    ConfigLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {message}")]
    ConfigValidation { message: String },

    // Roster errors
    #[error("Permission denied: {message}")]
    Forbidden { message: String },

    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    #[error("{roster} is full ({max})")]
    CapacityExceeded { roster: &'static str, max: usize },

    #[error("User is already a facilitator")]
    AlreadyFacilitator,

    #[error("User is not registered")]
    NotRegistered,

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // Discord errors
    #[error("Discord API error: {message}")]
    Discord { message: String },

    // Generic errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BotError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        BotError::Forbidden {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        BotError::InvalidInput {
            message: message.into(),
        }
    }

    /// Short text shown privately to the user whose action failed.
    pub fn user_message(&self) -> String {
        match self {
            BotError::Forbidden { message } => format!("❌ {}", message),
            BotError::SessionNotFound { .. } => {
                "❌ This sign-up sheet was not found or has been deleted".to_string()
            }
            BotError::CapacityExceeded { roster, .. } => format!("❌ {} is full", roster),
            BotError::AlreadyFacilitator => {
                "❌ You are already a facilitator for this sheet".to_string()
            }
            BotError::NotRegistered => "❌ You are not signed up for this sheet".to_string(),
            BotError::InvalidInput { message } => format!("❌ {}", message),
            _ => "❌ Something went wrong, please try again later".to_string(),
        }
    }
}

impl From<serenity::Error> for BotError {
    fn from(err: serenity::Error) -> Self {
        BotError::Discord {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        BotError::Internal {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

use poise::serenity_prelude as serenity;
