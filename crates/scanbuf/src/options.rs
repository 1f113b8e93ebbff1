/// Granularity of growing-buffer reads and capacity steps (8 KiB).
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Default ceiling for a growing buffer (64 MiB).
pub const DEFAULT_MAX_CAPACITY: usize = 64 * 1024 * 1024;

/// Configuration for [`GrowingReader`](crate::GrowingReader) and
/// [`GrowingScanner`](crate::GrowingScanner).
///
/// # Examples
///
/// ```rust
/// use scanbuf::{GrowOptions, GrowingReader};
///
/// let options = GrowOptions {
///     max_capacity: 1024 * 1024,
///     ..Default::default()
/// };
/// let reader = GrowingReader::with_options(&b"a\nb\n"[..], b'\n', options);
/// assert_eq!(reader.options().max_capacity, 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowOptions {
    /// Capacity reserved up front.
    ///
    /// # Default
    ///
    /// [`CHUNK_SIZE`]
    pub initial_capacity: usize,

    /// Largest window the buffer may hold before a read fails with
    /// [`ReadError::CapacityExceeded`](crate::ReadError::CapacityExceeded).
    ///
    /// Raised to `initial_capacity` if set below it.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_CAPACITY`]
    pub max_capacity: usize,

    /// Bytes requested from the source per fill. Zero is treated as one.
    ///
    /// # Default
    ///
    /// [`CHUNK_SIZE`]
    pub read_size: usize,
}

impl Default for GrowOptions {
    fn default() -> Self {
        Self {
            initial_capacity: CHUNK_SIZE,
            max_capacity: DEFAULT_MAX_CAPACITY,
            read_size: CHUNK_SIZE,
        }
    }
}

impl GrowOptions {
    /// Applies the documented adjustments.
    #[must_use]
    pub(crate) fn normalized(self) -> Self {
        Self {
            initial_capacity: self.initial_capacity,
            max_capacity: self.max_capacity.max(self.initial_capacity),
            read_size: self.read_size.max(1),
        }
    }
}
