//! Position-based traversal over a [`DynamicArray`](crate::DynamicArray).
//!
//! A cursor always points at an element: it starts on the first (forward) or last
//! (reverse) element and `advance` stops on the final one rather than running off
//! the end.  The usual loop reads the current element, checks `has_next`, and only
//! then advances:
//!
//! ```rust
//! use dyn_array::DynamicArray;
//!
//! let arr = DynamicArray::from([10, 20, 30]);
//! let mut seen = Vec::new();
//! let mut cursor = arr.cursor();
//! loop {
//!     seen.push(*cursor.get());
//!     if !cursor.has_next() {
//!         break;
//!     }
//!     cursor.advance();
//! }
//! assert_eq!(seen, [10, 20, 30]);
//! ```
//!
//! [`Cursor`] and [`ReverseCursor`] only read and can be created from a shared
//! borrow.  [`CursorMut`] and [`ReverseCursorMut`] can also overwrite the current
//! element and hold an exclusive borrow.  Either way the array cannot be resized or
//! reallocated while a cursor is alive.

// --- Read-only Cursors ---

/// Forward read-only cursor, created by
/// [`DynamicArray::cursor`](crate::DynamicArray::cursor).
#[derive(Debug)]
pub struct Cursor<'a, T> {
    items: &'a [T],
    position: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(items: &'a [T]) -> Self {
        Self { items, position: 0 }
    }

    /// The element under the cursor.  The reference outlives the cursor.
    ///
    /// # Panics
    /// Panics if the array was empty when the cursor was created.
    #[track_caller]
    pub fn get(&self) -> &'a T {
        match self.items.get(self.position) {
            Some(item) => item,
            None => empty_cursor(),
        }
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.position + 1 < self.items.len()
    }

    /// Moves to the next element.  Does nothing on the last one.
    #[inline]
    pub fn advance(&mut self) {
        if self.has_next() {
            self.position += 1;
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of elements the array held when the cursor was created.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            position: self.position,
        }
    }
}

/// Reverse read-only cursor, created by
/// [`DynamicArray::reverse_cursor`](crate::DynamicArray::reverse_cursor).
#[derive(Debug)]
pub struct ReverseCursor<'a, T> {
    items: &'a [T],
    position: usize,
}

impl<'a, T> ReverseCursor<'a, T> {
    pub(crate) fn new(items: &'a [T]) -> Self {
        let position = items.len().saturating_sub(1);
        Self { items, position }
    }

    /// # Panics
    /// Panics if the array was empty when the cursor was created.
    #[track_caller]
    pub fn get(&self) -> &'a T {
        match self.items.get(self.position) {
            Some(item) => item,
            None => empty_cursor(),
        }
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.position > 0
    }

    /// Moves to the previous element.  Does nothing on the first one.
    #[inline]
    pub fn advance(&mut self) {
        if self.has_next() {
            self.position -= 1;
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Clone for ReverseCursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            position: self.position,
        }
    }
}

// --- Writing Cursors ---

/// Forward cursor that can overwrite elements, created by
/// [`DynamicArray::cursor_mut`](crate::DynamicArray::cursor_mut).
pub struct CursorMut<'a, T> {
    items: &'a mut [T],
    position: usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(items: &'a mut [T]) -> Self {
        Self { items, position: 0 }
    }

    /// The element under the cursor.
    ///
    /// # Panics
    /// Panics if the array was empty when the cursor was created.
    #[track_caller]
    pub fn get(&self) -> &T {
        match self.items.get(self.position) {
            Some(item) => item,
            None => empty_cursor(),
        }
    }

    #[track_caller]
    pub fn get_mut(&mut self) -> &mut T {
        match self.items.get_mut(self.position) {
            Some(item) => item,
            None => empty_cursor(),
        }
    }

    /// Overwrites the element under the cursor; the old value is dropped.
    #[track_caller]
    pub fn set(&mut self, value: T) {
        *self.get_mut() = value;
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.position + 1 < self.items.len()
    }

    /// Moves to the next element.  Does nothing on the last one.
    #[inline]
    pub fn advance(&mut self) {
        if self.has_next() {
            self.position += 1;
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Reverse cursor that can overwrite elements, created by
/// [`DynamicArray::reverse_cursor_mut`](crate::DynamicArray::reverse_cursor_mut).
pub struct ReverseCursorMut<'a, T> {
    items: &'a mut [T],
    position: usize,
}

impl<'a, T> ReverseCursorMut<'a, T> {
    pub(crate) fn new(items: &'a mut [T]) -> Self {
        let position = items.len().saturating_sub(1);
        Self { items, position }
    }

    /// The element under the cursor.
    ///
    /// # Panics
    /// Panics if the array was empty when the cursor was created.
    #[track_caller]
    pub fn get(&self) -> &T {
        match self.items.get(self.position) {
            Some(item) => item,
            None => empty_cursor(),
        }
    }

    #[track_caller]
    pub fn get_mut(&mut self) -> &mut T {
        match self.items.get_mut(self.position) {
            Some(item) => item,
            None => empty_cursor(),
        }
    }

    #[track_caller]
    pub fn set(&mut self, value: T) {
        *self.get_mut() = value;
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.position > 0
    }

    /// Moves to the previous element.  Does nothing on the first one.
    #[inline]
    pub fn advance(&mut self) {
        if self.has_next() {
            self.position -= 1;
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn empty_cursor() -> ! {
    panic!("cursor over an empty array has no current element");
}

#[cfg(test)]
mod tests {
    use crate::DynamicArray;

    fn tens() -> DynamicArray<i32> {
        (1..=5).map(|i| i * 10).collect()
    }

    fn walk_forward(arr: &DynamicArray<i32>) -> Vec<i32> {
        let mut cursor = arr.cursor();
        let mut seen = Vec::new();
        if cursor.is_empty() {
            return seen;
        }
        loop {
            seen.push(*cursor.get());
            if !cursor.has_next() {
                break;
            }
            cursor.advance();
        }
        seen
    }

    fn walk_backward(arr: &DynamicArray<i32>) -> Vec<i32> {
        let mut cursor = arr.reverse_cursor();
        let mut seen = Vec::new();
        if cursor.is_empty() {
            return seen;
        }
        loop {
            seen.push(*cursor.get());
            if !cursor.has_next() {
                break;
            }
            cursor.advance();
        }
        seen
    }

    #[test]
    fn test_cursor_forward_order() {
        let arr = tens();
        assert_eq!(walk_forward(&arr), vec![10, 20, 30, 40, 50]);

        let mut cursor = arr.cursor();
        for _ in 0..4 {
            cursor.advance();
        }
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.len(), 5);
    }

    #[test]
    fn test_cursor_reverse_order() {
        let arr = tens();
        assert_eq!(walk_backward(&arr), vec![50, 40, 30, 20, 10]);
        assert_eq!(arr.reverse_cursor().position(), 4);
    }

    #[test]
    fn test_cursor_shared_borrow_allows_several_readers() {
        let arr = tens();
        let shared = &arr;
        let mut forward = shared.cursor();
        let mut reverse = shared.reverse_cursor();
        forward.advance();
        reverse.advance();
        let snapshot = forward.clone();
        forward.advance();
        assert_eq!(*snapshot.get(), 20);
        assert_eq!(*forward.get(), 30);
        assert_eq!(*reverse.get(), 40);
        assert_eq!(shared.len(), 5);
    }

    #[test]
    fn test_cursor_read_only_get_outlives_cursor() {
        let arr = tens();
        let third = {
            let mut cursor = arr.cursor();
            cursor.advance();
            cursor.advance();
            cursor.get()
        };
        assert_eq!(*third, 30);
    }

    #[test]
    fn test_cursor_has_next_false_only_at_last() {
        let arr = tens();
        let mut cursor = arr.cursor();
        for _ in 0..4 {
            assert!(cursor.has_next());
            cursor.advance();
        }
        assert!(!cursor.has_next());
        assert_eq!(*cursor.get(), 50);
    }

    #[test]
    fn test_cursor_advance_at_boundary_is_noop() {
        let mut arr = tens();
        let mut forward = arr.cursor();
        for _ in 0..20 {
            forward.advance();
        }
        assert_eq!(*forward.get(), 50);

        let mut reverse = arr.reverse_cursor();
        for _ in 0..20 {
            reverse.advance();
        }
        assert_eq!(*reverse.get(), 10);

        let mut forward_mut = arr.cursor_mut();
        for _ in 0..20 {
            forward_mut.advance();
        }
        assert_eq!(forward_mut.position(), 4);

        let mut reverse_mut = arr.reverse_cursor_mut();
        for _ in 0..20 {
            reverse_mut.advance();
        }
        assert_eq!(reverse_mut.position(), 0);
    }

    #[test]
    fn test_cursor_mut_set_writes_through() {
        let mut arr = tens();
        arr.cursor_mut().set(999);
        assert_eq!(arr[0], 999);

        let mut reverse = arr.reverse_cursor_mut();
        reverse.advance();
        reverse.set(-1);
        *reverse.get_mut() -= 1;
        assert_eq!(*reverse.get(), -2);
        assert_eq!(arr, [999, 20, 30, -2, 50]);
    }

    #[test]
    fn test_cursor_mut_full_walk() {
        let mut arr = tens();
        let mut cursor = arr.cursor_mut();
        loop {
            *cursor.get_mut() += 1;
            if !cursor.has_next() {
                break;
            }
            cursor.advance();
        }
        assert_eq!(cursor.len(), 5);
        assert_eq!(arr, [11, 21, 31, 41, 51]);
    }

    #[test]
    fn test_cursor_strings() {
        let mut arr: DynamicArray<String> = ["iterator", "test", "for", "strings"]
            .into_iter()
            .map(String::from)
            .collect();

        let mut cursor = arr.cursor();
        assert_eq!(cursor.get(), "iterator");
        cursor.advance();
        assert_eq!(cursor.get(), "test");
        cursor.advance();
        assert_eq!(cursor.get(), "for");
        cursor.advance();
        assert_eq!(cursor.get(), "strings");
        assert!(!cursor.has_next());

        arr.cursor_mut().set("modified".to_string());
        assert_eq!(arr[0], "modified");

        let mut cursor = arr.cursor();
        let mut count = 0;
        loop {
            count += 1;
            if !cursor.has_next() {
                break;
            }
            cursor.advance();
        }
        assert_eq!(count, 4);
    }

    #[test]
    fn test_cursor_single_element() {
        let arr = DynamicArray::from([7]);
        assert!(!arr.cursor().has_next());
        assert!(!arr.reverse_cursor().has_next());
        assert_eq!(*arr.reverse_cursor().get(), 7);
    }

    #[test]
    fn test_cursor_empty_reports_no_next() {
        let mut arr: DynamicArray<i32> = DynamicArray::new();
        assert!(walk_forward(&arr).is_empty());
        assert!(walk_backward(&arr).is_empty());

        let mut cursor = arr.cursor();
        assert!(cursor.is_empty());
        assert!(!cursor.has_next());
        cursor.advance();
        assert_eq!(cursor.position(), 0);

        let reverse = arr.reverse_cursor_mut();
        assert!(reverse.is_empty());
        assert!(!reverse.has_next());
    }

    #[test]
    #[should_panic(expected = "cursor over an empty array has no current element")]
    fn test_cursor_empty_get_panics() {
        let arr: DynamicArray<i32> = DynamicArray::new();
        let cursor = arr.cursor();
        let _ = cursor.get();
    }

    #[test]
    #[should_panic(expected = "cursor over an empty array has no current element")]
    fn test_cursor_reverse_empty_set_panics() {
        let mut arr: DynamicArray<i32> = DynamicArray::unallocated();
        arr.reverse_cursor_mut().set(1);
    }
}
