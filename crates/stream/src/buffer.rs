//! Fixed-capacity byte buffer shared by both stream directions.
//!
//! `pos <= len <= capacity` holds at all times. Read streams use
//! `data[pos..len]` as the unread window; write streams keep `pos == len`
//! and treat `data[..len]` as pending output.

use std::collections::TryReserveError;

use crate::error::StreamError;

#[derive(Debug)]
pub(crate) struct StreamBuffer {
    data: Box<[u8]>,
    len: usize,
    pos: usize,
    touched: bool,
}

impl StreamBuffer {
    /// Allocates a zeroed buffer, reporting allocation failure instead of aborting.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, StreamError> {
        if capacity == 0 {
            return Err(StreamError::ZeroCapacity);
        }
        let data = allocate(capacity)?;
        Ok(Self {
            data,
            len: 0,
            pos: 0,
            touched: false,
        })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.data.len()
    }

    /// `true` when every valid byte has been consumed.
    pub(crate) const fn is_drained(&self) -> bool {
        self.pos == self.len
    }

    /// `true` until the first fill or the first accepted write.
    pub(crate) const fn is_pristine(&self) -> bool {
        !self.touched && self.pos == 0 && self.len == 0
    }

    /// Swaps in a fresh buffer of `capacity` bytes. Contents are not migrated.
    pub(crate) fn replace(&mut self, capacity: usize) -> Result<(), StreamError> {
        *self = Self::with_capacity(capacity)?;
        Ok(())
    }

    // ---- read side ----

    /// Whole backing storage, for a transport fill. Must be followed by [`Self::set_filled`].
    pub(crate) fn storage_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(crate) fn set_filled(&mut self, filled: usize) {
        debug_assert!(filled <= self.data.len());
        self.len = filled.min(self.data.len());
        self.pos = 0;
        self.touched = true;
    }

    pub(crate) fn unread(&self) -> &[u8] {
        &self.data[self.pos..self.len]
    }

    pub(crate) fn consume(&mut self, amount: usize) {
        debug_assert!(amount <= self.len - self.pos);
        self.pos = (self.pos + amount).min(self.len);
    }

    pub(crate) fn next_byte(&mut self) -> Option<u8> {
        let byte = self.unread().first().copied()?;
        self.pos += 1;
        Some(byte)
    }

    pub(crate) fn previous_byte(&self) -> Option<u8> {
        self.pos.checked_sub(1).map(|index| self.data[index])
    }

    pub(crate) fn rewind_one(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    // ---- write side ----

    /// Copies as much of `src` as fits and returns the number of bytes accepted.
    pub(crate) fn append(&mut self, src: &[u8]) -> usize {
        let accepted = src.len().min(self.data.len() - self.len);
        self.data[self.len..self.len + accepted].copy_from_slice(&src[..accepted]);
        self.len += accepted;
        self.pos = self.len;
        self.touched |= accepted > 0;
        accepted
    }

    pub(crate) fn pending(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Empties the buffer after a drain.
    pub(crate) fn clear(&mut self) {
        self.len = 0;
        self.pos = 0;
    }
}

fn allocate(capacity: usize) -> Result<Box<[u8]>, TryReserveError> {
    let mut data = Vec::new();
    data.try_reserve_exact(capacity)?;
    data.resize(capacity, 0);
    Ok(data.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            StreamBuffer::with_capacity(0),
            Err(StreamError::ZeroCapacity)
        ));
    }

    #[test]
    fn impossible_allocation_is_reported() {
        assert!(matches!(
            StreamBuffer::with_capacity(usize::MAX),
            Err(StreamError::Allocation(_))
        ));
    }

    #[test]
    fn append_stops_at_capacity() {
        let mut buffer = StreamBuffer::with_capacity(4).unwrap();
        assert_eq!(buffer.append(&[1, 2, 3]), 3);
        assert_eq!(buffer.append(&[4, 5, 6]), 1);
        assert!(buffer.is_full());
        assert_eq!(buffer.pending(), &[1, 2, 3, 4]);
        buffer.clear();
        assert!(buffer.is_empty());
        assert!(!buffer.is_pristine());
    }

    #[test]
    fn read_window_tracks_consumption() {
        let mut buffer = StreamBuffer::with_capacity(8).unwrap();
        buffer.storage_mut()[..3].copy_from_slice(b"abc");
        buffer.set_filled(3);
        assert_eq!(buffer.unread(), b"abc");
        assert_eq!(buffer.previous_byte(), None);
        assert_eq!(buffer.next_byte(), Some(b'a'));
        assert_eq!(buffer.previous_byte(), Some(b'a'));
        buffer.rewind_one();
        assert_eq!(buffer.unread(), b"abc");
        buffer.consume(3);
        assert!(buffer.is_drained());
        assert_eq!(buffer.next_byte(), None);
    }

    #[test]
    fn empty_fill_still_marks_buffer_used() {
        let mut buffer = StreamBuffer::with_capacity(8).unwrap();
        assert!(buffer.is_pristine());
        buffer.set_filled(0);
        assert!(!buffer.is_pristine());
    }

    #[test]
    fn replace_resets_state() {
        let mut buffer = StreamBuffer::with_capacity(2).unwrap();
        buffer.append(b"x");
        buffer.replace(16).unwrap();
        assert_eq!(buffer.capacity(), 16);
        assert!(buffer.is_pristine());
    }
}
