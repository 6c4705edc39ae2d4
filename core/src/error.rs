use crate::types::{ItemId, Money, ResidentId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown item '{item_id}'")]
    UnknownItem { item_id: ItemId },

    #[error("Not enough money: need {needed}, have {available}")]
    InsufficientFunds { needed: Money, available: Money },

    #[error("Select a resident first")]
    NoResidentSelected,

    #[error("No resident with id '{resident_id}'")]
    NoResident { resident_id: ResidentId },

    #[error("{name} is asleep")]
    ResidentAsleep { name: String },

    #[error("No '{item_id}' in inventory")]
    NoItem { item_id: ItemId },

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Resident name must not be empty")]
    InvalidName,

    #[error("No saved game found")]
    NoSave,

    #[error("Invalid save data: {0}")]
    InvalidFormat(String),

    #[error("Storage failure: {0}")]
    StorageFailure(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
