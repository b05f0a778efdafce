pub type CaptureId = u32;
pub type EngineSlot = usize;

/// `(offset, length)` of a substring within a match subject.
pub type ByteSpan = (usize, usize);
