use std::ops::Range;

/// A half-open span `[start, end)` of the buffer a value was decoded from.
///
/// Offsets are only meaningful against that same buffer. Anything that needs
/// the bytes past the lifetime of the buffer must copy them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRegion {
    start: usize,
    end: usize,
}

impl ByteRegion {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "region start {start} is past end {end}");
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Borrow the bytes this region covers.
    ///
    /// Panics if the region does not lie within `buffer`; a region produced by
    /// the decoder always lies within the buffer it decoded.
    pub fn slice<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.range()]
    }
}
