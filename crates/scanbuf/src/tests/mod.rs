#[cfg(feature = "serde")]
mod serde_cursors;
pub(crate) mod sources;
