//! Uninitialized slot storage backing [`DynamicArray`](crate::DynamicArray).
//!
//! [`RawBuffer`] owns a single heap block of `capacity` slots and nothing else: it
//! never reads, writes or drops elements, and it does not know how many slots are
//! live.  Tracking the initialized prefix is the caller's job.  Dropping a
//! `RawBuffer` releases the block exactly once.
//!
//! Zero-sized types and zero capacities never touch the allocator; they use a
//! dangling, well-aligned pointer instead.

use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use std::alloc::{self, Layout};

pub struct RawBuffer<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

// SAFETY: RawBuffer uniquely owns its block, like Box<[MaybeUninit<T>]>.
unsafe impl<T: Send> Send for RawBuffer<T> {}
// SAFETY: shared access to a RawBuffer only hands out raw pointers.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// A buffer with no storage at all.
    pub const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates `capacity` uninitialized slots.
    ///
    /// # Panics
    /// Panics with "capacity overflow" if the block size does not fit in `isize`.
    /// Aborts through [`alloc::handle_alloc_error`] if the allocator fails.
    pub fn allocate(capacity: usize) -> Self {
        if capacity == 0 {
            return Self::dangling();
        }
        if Self::IS_ZST {
            return Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            };
        }

        let layout = Self::layout_for(capacity);
        // SAFETY: layout has a non-zero size since T is not zero-sized and capacity > 0.
        let raw = unsafe { alloc::alloc(layout) } as *mut T;
        let Some(ptr) = NonNull::new(raw) else {
            alloc::handle_alloc_error(layout);
        };

        Self {
            ptr,
            capacity,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns `true` if this buffer owns an allocation.
    #[inline(always)]
    pub fn is_allocated(&self) -> bool {
        !Self::IS_ZST && self.capacity != 0
    }

    fn layout_for(capacity: usize) -> Layout {
        match Layout::array::<T>(capacity) {
            Ok(layout) => layout,
            Err(_) => capacity_overflow(),
        }
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if self.is_allocated() {
            let layout = Self::layout_for(self.capacity);
            // SAFETY: the block was allocated in `allocate` with this exact layout
            // and is released only here.
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }
}

#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_dangling_has_no_storage() {
        let buf: RawBuffer<u64> = RawBuffer::dangling();
        assert_eq!(buf.capacity(), 0);
        assert!(!buf.is_allocated());
    }

    #[test]
    fn test_raw_allocate_zero_is_dangling() {
        let buf: RawBuffer<String> = RawBuffer::allocate(0);
        assert_eq!(buf.capacity(), 0);
        assert!(!buf.is_allocated());
    }

    #[test]
    fn test_raw_allocate_and_write_slots() {
        let mut buf: RawBuffer<u32> = RawBuffer::allocate(8);
        assert_eq!(buf.capacity(), 8);
        assert!(buf.is_allocated());
        assert_eq!(buf.as_ptr() as usize % mem::align_of::<u32>(), 0);
        unsafe {
            for i in 0..8 {
                buf.as_mut_ptr().add(i).write(i as u32 * 3);
            }
            assert_eq!(*buf.as_ptr().add(7), 21);
        }
    }

    #[test]
    fn test_raw_zst_never_allocates() {
        let buf: RawBuffer<()> = RawBuffer::allocate(1000);
        assert_eq!(buf.capacity(), 1000);
        assert!(!buf.is_allocated());
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_raw_layout_overflow_panics() {
        let _buf: RawBuffer<u64> = RawBuffer::allocate(usize::MAX);
    }
}
