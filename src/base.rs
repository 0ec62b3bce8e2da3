/// The scalar key stored in the heap when no other type is requested
pub type HeapValue = i64;

/// Identity of a node, minted once at insertion
pub type NodeId = u64;

/// Position in the heap backing sequence
pub type HeapIndex = usize;

/// Index of the parent of a (non-root) node
#[inline]
pub fn parent(index: HeapIndex) -> HeapIndex {
    debug_assert!(index > 0, "the root has no parent");
    (index - 1) / 2
}

#[inline]
pub fn left_child(index: HeapIndex) -> HeapIndex {
    2 * index + 1
}

#[inline]
pub fn right_child(index: HeapIndex) -> HeapIndex {
    2 * index + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_arithmetic() {
        assert_eq!(left_child(0), 1);
        assert_eq!(right_child(0), 2);
        assert_eq!(parent(1), 0);
        assert_eq!(parent(2), 0);
        assert_eq!(parent(5), 2);
        assert_eq!(parent(6), 2);
        for i in 0..64 {
            assert_eq!(parent(left_child(i)), i);
            assert_eq!(parent(right_child(i)), i);
        }
    }
}
