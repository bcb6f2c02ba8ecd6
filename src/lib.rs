//! # Dyn Array
//!
//! A growable, contiguous array built directly on raw storage, with explicit control
//! over when elements are written, relocated and dropped.
//!
//! This crate provides [`DynamicArray`] together with forward and reverse cursors for
//! traversal.
//!
//! ## Key Features
//!
//! * **Single Block:** All elements live in one heap block; slots past `len` stay
//!   uninitialized and are never read.
//! * **Predictable Growth:** A full array grows to `capacity * 2 + 1` slots (an
//!   unallocated one to [`DynamicArray::DEFAULT_CAPACITY`]). Capacity never shrinks.
//! * **Copy-and-Swap Assignment:** [`DynamicArray::assign`] and
//!   [`DynamicArray::assign_from`] build the new contents first and swap them in, so
//!   a panicking `Clone` leaves the target untouched.
//! * **Loud Preconditions:** Out-of-range indices panic instead of clamping.
//! * **Two Cursor Flavours:** [`Cursor`] and [`ReverseCursor`] read through a shared
//!   borrow; [`CursorMut`] and [`ReverseCursorMut`] can also overwrite elements.
//!
//! ## Examples
//!
//! ### Positional insertion and removal
//!
//! ```rust
//! use dyn_array::DynamicArray;
//!
//! let mut arr: DynamicArray<i32> = DynamicArray::new();
//! assert_eq!(arr.capacity(), 4);
//!
//! for i in 0..5 {
//!     arr.push(i * 10);
//! }
//! // Fifth push outgrew the default block: 4 * 2 + 1.
//! assert_eq!(arr.capacity(), 9);
//!
//! arr.remove(2);
//! assert_eq!(arr, [0, 10, 30, 40]);
//!
//! assert_eq!(arr.insert(1, 5), 1);
//! assert_eq!(arr, [0, 5, 10, 30, 40]);
//! ```
//!
//! ### Ownership transfer
//!
//! ```rust
//! use dyn_array::DynamicArray;
//!
//! let mut a = DynamicArray::from([1, 2, 3]);
//! let copy = a.clone();
//!
//! let b = a.take();
//! assert_eq!(b, copy);
//! assert!(a.is_empty());
//! assert_eq!(a.capacity(), 0);
//! ```
//!
//! ### Cursors
//!
//! ```rust
//! use dyn_array::DynamicArray;
//!
//! let mut arr = DynamicArray::from([10, 20, 30]);
//! let mut cursor = arr.reverse_cursor_mut();
//! cursor.set(300);
//! cursor.advance();
//! assert_eq!(*cursor.get(), 20);
//! assert_eq!(arr, [10, 20, 300]);
//! ```

// --- Module Declarations ---

pub mod array;
pub mod cursor;
mod raw;

// --- Re-exports ---

pub use array::{DynamicArray, IntoIter};
pub use cursor::{Cursor, CursorMut, ReverseCursor, ReverseCursorMut};
