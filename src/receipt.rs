//! Payment receipt staging: size/type checks, decode bookkeeping and preview sync.
//!
//! Decoding happens off the call stack (a file read), so `accept` only hands out a
//! [`PendingDecode`]; the cache is updated when `complete` is called with the
//! decoded payload. Every accept/clear bumps an epoch and completions carrying an
//! older epoch are dropped, so a slow read can never resurrect a removed image.

use crate::cache::{FormCache, ReceiptImage};
use crate::config::MAX_RECEIPT_BYTES;
use crate::error::ReceiptError;
use crate::surface::FormSurface;

/// Declared properties of a selected file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceiptMeta {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl ReceiptMeta {
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// How a file reached the upload control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiptEntry {
    Picker,
    Drop,
}

/// Refuse files that are not images or exceed the size ceiling.
pub fn check(meta: &ReceiptMeta) -> Result<(), ReceiptError> {
    if !meta.is_image() {
        return Err(ReceiptError::NotAnImage);
    }
    if meta.size > MAX_RECEIPT_BYTES {
        return Err(ReceiptError::TooLarge);
    }
    Ok(())
}

/// Whether a refusal should be shown to the visitor. Non-image drops are ignored quietly.
pub fn should_alert(err: &ReceiptError, entry: ReceiptEntry) -> bool {
    !matches!((err, entry), (ReceiptError::NotAnImage, ReceiptEntry::Drop))
}

/// Ticket for one in-flight decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDecode {
    epoch: u64,
    meta: ReceiptMeta,
}

impl PendingDecode {
    pub fn meta(&self) -> &ReceiptMeta {
        &self.meta
    }
}

#[derive(Debug, Default)]
pub struct ReceiptSlot {
    epoch: u64,
}

impl ReceiptSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `meta` and start a decode. Nothing changes on refusal.
    pub fn accept(&mut self, meta: ReceiptMeta) -> Result<PendingDecode, ReceiptError> {
        check(&meta)?;
        self.epoch += 1;
        Ok(PendingDecode { epoch: self.epoch, meta })
    }

    /// Store a decoded payload. Returns false if the decode went stale.
    pub fn complete<S: FormSurface>(
        &mut self,
        pending: PendingDecode,
        data_url: String,
        cache: &mut FormCache,
        surface: &mut S,
    ) -> bool {
        if pending.epoch != self.epoch {
            return false;
        }
        surface.show_receipt(&data_url);
        cache.set_receipt(ReceiptImage {
            data_url,
            file_name: pending.meta.name,
            file_type: pending.meta.mime,
        });
        true
    }

    /// Wipe the staged image whatever state it is in.
    pub fn clear<S: FormSurface>(&mut self, cache: &mut FormCache, surface: &mut S) {
        self.epoch += 1;
        cache.clear_receipt();
        surface.clear_receipt();
    }
}
