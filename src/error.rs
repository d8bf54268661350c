//! Error kinds surfaced by the ticket flow. `Display` text is what the visitor sees.

use thiserror::Error;

/// A submit attempt was refused before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Sorry, tickets are no longer available. Maximum attendance has been reached.")]
    SoldOut,
    #[error("Please fill in your name and email.")]
    MissingContact,
    #[error("Please select between 1 and {max} tickets.")]
    QuantityOutOfRange { max: u32 },
    #[error("Please upload your payment receipt screenshot.")]
    MissingReceipt,
    #[error("Please select how you would like to receive your confirmation.")]
    MissingConfirmation,
    /// An earlier attempt has not finished yet. Not shown to the visitor.
    #[error("A submission is already in progress.")]
    InFlight,
}

/// An uploaded receipt was refused or could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptError {
    #[error("Image too large. Please upload an image smaller than 5MB.")]
    TooLarge,
    #[error("Please choose an image file for your receipt.")]
    NotAnImage,
    #[error("Could not read the selected image: {0}")]
    Decode(String),
}

/// The submission could not be dispatched.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Could not encode submission: {0}")]
    Encode(#[from] serde_json::Error),
}
