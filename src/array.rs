//! Growable contiguous array over explicitly managed storage.
//!
//! Provides [`DynamicArray`], a sequence whose live elements occupy the prefix
//! `[0, len)` of a single raw storage block.  Elements are written into their slot
//! when inserted and dropped in place when removed; slots past `len` are never read.
//! When the block is full it is replaced by one of `capacity * 2 + 1` slots (or
//! [`DynamicArray::DEFAULT_CAPACITY`] when there was none) and every element is
//! relocated in index order.  Capacity never shrinks.
//!
//! Because it `Deref`s to `[T]`, all standard slice methods are available without
//! conversion.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem::{self, ManuallyDrop};
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr;
use core::slice;

use crate::cursor::{Cursor, CursorMut, ReverseCursor, ReverseCursorMut};
use crate::raw::{RawBuffer, capacity_overflow};

/// A growable array that owns one contiguous block of storage.
///
/// Out-of-range indices passed to [`insert`](Self::insert),
/// [`remove`](Self::remove), [`element_at`](Self::element_at) or `[]` are
/// precondition violations and panic; they are never clamped.  Use
/// [`get`](Self::get) for a checked lookup.
pub struct DynamicArray<T> {
    len: usize,
    buf: RawBuffer<T>,
}

impl<T> DynamicArray<T> {
    /// Capacity used by [`new`](Self::new), by [`with_capacity(0)`](Self::with_capacity)
    /// and by the first growth of an unallocated array.
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Creates an empty array with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY) slots.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty array with exactly `capacity` slots.
    ///
    /// A request for zero slots falls back to
    /// [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            Self::DEFAULT_CAPACITY
        } else {
            capacity
        };
        Self {
            len: 0,
            buf: RawBuffer::allocate(capacity),
        }
    }

    /// Creates an empty array that owns no storage (capacity 0).
    ///
    /// This is the state a [`take`](Self::take) leaves behind.  The first insertion
    /// allocates [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY) slots.
    pub const fn unallocated() -> Self {
        Self {
            len: 0,
            buf: RawBuffer::dangling(),
        }
    }

    // --- Inspection ---

    /// Returns the number of live elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots, live or not.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the element at `index`, or `None` past the end.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            // SAFETY: slots below len are initialized.
            unsafe { Some(&*self.buf.as_ptr().add(index)) }
        } else {
            None
        }
    }

    /// Mutable counterpart of [`get`](Self::get).
    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            // SAFETY: slots below len are initialized.
            unsafe { Some(&mut *self.buf.as_mut_ptr().add(index)) }
        } else {
            None
        }
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    #[track_caller]
    pub fn element_at(&self, index: usize) -> &T {
        match self.get(index) {
            Some(item) => item,
            None => index_out_of_bounds(index, self.len),
        }
    }

    /// Returns the element at `index` for in-place mutation.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    #[track_caller]
    pub fn element_at_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(item) => item,
            None => index_out_of_bounds(index, len),
        }
    }

    /// Views the live elements as a slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) are initialized; the pointer is non-null and aligned
        // even for an unallocated buffer.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, with exclusive access through &mut self.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    // --- Modification ---

    /// Appends `value` and returns the index it landed at (`len - 1`).
    #[inline]
    pub fn push(&mut self, value: T) -> usize {
        self.grow_for_one_more();
        let index = self.len;
        // SAFETY: grow_for_one_more guarantees index < capacity, and the slot is vacant.
        unsafe { ptr::write(self.buf.as_mut_ptr().add(index), value) };
        self.len = index + 1;
        index
    }

    /// Inserts `value` at `index`, shifting `[index, len)` one slot toward the end.
    /// Returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );

        self.grow_for_one_more();
        // SAFETY: capacity > len after growing, so the tail fits one slot further
        // down.  The shifted range is moved bitwise, leaving `index` vacant.
        unsafe {
            let slot = self.buf.as_mut_ptr().add(index);
            if index < len {
                ptr::copy(slot, slot.add(1), len - index);
            }
            ptr::write(slot, value);
        }
        self.len = len + 1;
        index
    }

    /// Drops the element at `index` and closes the gap, preserving the order of
    /// the remaining elements.  Capacity is unchanged.
    ///
    /// The element is dropped only once the array is consistent again, so a
    /// panicking destructor still leaves `len - 1` elements in order.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn remove(&mut self, index: usize) {
        drop(self.take_at(index));
    }

    /// Like [`remove`](Self::remove), but hands the element back instead of
    /// dropping it.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn take_at(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );

        // SAFETY: index < len, so the slot is live.  After the read it is vacant and
        // the tail is moved down over it.
        unsafe {
            let slot = self.buf.as_mut_ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Removes the last element and returns it, or `None` if the array is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: the slot at the old last index is live and now outside len.
            unsafe { Some(ptr::read(self.buf.as_ptr().add(self.len))) }
        }
    }

    /// Drops every element past `len`, in index order.  Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        // SAFETY: [len, self.len) are live.  len is lowered first so a panicking
        // destructor cannot cause a second drop of the same slots.
        unsafe {
            let tail =
                ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr().add(len), self.len - len);
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element; the storage is kept for reuse.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Ensures room for at least `additional` more elements, growing by the usual
    /// `capacity * 2 + 1` policy until the request fits.
    pub fn reserve(&mut self, additional: usize) {
        let required = match self.len.checked_add(additional) {
            Some(required) => required,
            None => capacity_overflow(),
        };
        let mut capacity = self.capacity();
        if required <= capacity {
            return;
        }
        while capacity < required {
            capacity = Self::next_capacity(capacity);
        }
        self.relocate(capacity);
    }

    // --- Ownership ---

    /// Exchanges storage, length and capacity with `other`.  No element is touched.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves the whole contents out, leaving `self` empty with no storage.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::unallocated())
    }

    /// Replaces the contents of `self` with `other`.
    ///
    /// The previous contents are swapped into `other` and dropped with it.
    pub fn assign(&mut self, other: Self) {
        let mut temp = other;
        self.swap(&mut temp);
    }

    /// Replaces the contents of `self` with a copy of `source`.
    ///
    /// The copy is built completely before anything is swapped, so a panicking
    /// `clone` leaves `self` untouched.
    pub fn assign_from(&mut self, source: &Self)
    where
        T: Clone,
    {
        let mut temp = source.clone();
        self.swap(&mut temp);
    }

    // --- Cursors ---

    /// A read-only forward cursor starting at index 0.
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice())
    }

    /// A read-only reverse cursor starting at the last element.
    pub fn reverse_cursor(&self) -> ReverseCursor<'_, T> {
        ReverseCursor::new(self.as_slice())
    }

    /// A forward cursor that can overwrite the elements it visits.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.as_mut_slice())
    }

    /// A reverse cursor that can overwrite the elements it visits.
    pub fn reverse_cursor_mut(&mut self) -> ReverseCursorMut<'_, T> {
        ReverseCursorMut::new(self.as_mut_slice())
    }

    // --- Internal Helpers ---

    #[inline(always)]
    fn grow_for_one_more(&mut self) {
        if self.len == self.capacity() {
            self.relocate(Self::next_capacity(self.capacity()));
        }
    }

    fn next_capacity(capacity: usize) -> usize {
        if capacity == 0 {
            return Self::DEFAULT_CAPACITY;
        }
        match capacity.checked_mul(2).and_then(|doubled| doubled.checked_add(1)) {
            Some(next) => next,
            None => capacity_overflow(),
        }
    }

    /// Moves every live element into a fresh block of `capacity` slots and
    /// releases the old block.
    #[inline(never)]
    fn relocate(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len);
        let mut fresh = RawBuffer::allocate(capacity);
        // SAFETY: the blocks are distinct and fresh holds at least len slots.  After
        // the copy the old slots are dead and are released without being dropped.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), fresh.as_mut_ptr(), self.len);
        }
        mem::swap(&mut self.buf, &mut fresh);
    }
}

// --- Extended Functionality (Clone) ---

impl<T: Clone> DynamicArray<T> {
    /// Clones and appends every element of `other`.
    pub fn extend_from_slice(&mut self, other: &[T]) {
        self.reserve(other.len());
        for item in other {
            self.push(item.clone());
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn index_out_of_bounds(index: usize, len: usize) -> ! {
    panic!("index out of bounds: the len is {len} but the index is {index}");
}

// --- Trait Implementations ---

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: [0, len) are live and dropped exactly once here; the block itself
        // is released by the RawBuffer field afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_mut_ptr(),
                self.len,
            ));
        }
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Copies every live element into a new block of the same capacity.
    fn clone(&self) -> Self {
        let mut out = Self {
            len: 0,
            buf: RawBuffer::allocate(self.capacity()),
        };
        for item in self.iter() {
            // SAFETY: out has the source's capacity, which is >= self.len.  len is
            // bumped after each write so a panicking clone drops only the copies made.
            unsafe { ptr::write(out.buf.as_mut_ptr().add(out.len), item.clone()) };
            out.len += 1;
        }
        out
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for DynamicArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for DynamicArray<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynamicArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq> PartialEq<std::vec::Vec<T>> for DynamicArray<T> {
    fn eq(&self, other: &std::vec::Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: PartialOrd> PartialOrd for DynamicArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for DynamicArray<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;
    #[inline(always)]
    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        self.element_at(index)
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    #[inline(always)]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.element_at_mut(index)
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> std::borrow::Borrow<[T]> for DynamicArray<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> std::borrow::BorrowMut<[T]> for DynamicArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for &item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = DynamicArray::new();
        array.extend(iter);
        array
    }
}

impl<T> From<std::vec::Vec<T>> for DynamicArray<T> {
    fn from(vec: std::vec::Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(items: &[T]) -> Self {
        let mut array = DynamicArray::with_capacity(items.len());
        array.extend_from_slice(items);
        array
    }
}

/// Owning iterator returned by [`DynamicArray::into_iter`].
///
/// Elements not yet yielded are dropped with the iterator, then the block is freed.
pub struct IntoIter<T> {
    buf: RawBuffer<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [start, end) are live and not yet handed out.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so ownership of the block and of the
        // live prefix passes to the iterator alone.
        let buf = unsafe { ptr::read(&this.buf) };
        IntoIter {
            buf,
            start: 0,
            end: this.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            // SAFETY: the slot is live; start moves past it so it is read only once.
            let val = unsafe { ptr::read(self.buf.as_ptr().add(self.start)) };
            self.start += 1;
            Some(val)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            // SAFETY: the slot is live; end moved below it so it is read only once.
            Some(unsafe { ptr::read(self.buf.as_ptr().add(self.end)) })
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: [start, end) were never yielded and are still live.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_mut_ptr().add(self.start),
                self.end - self.start,
            ));
        }
    }
}
