//! Property-based tests for catalog pagination and viewport density

use m3_client::CatalogConfig;
use m3_client::catalog::{Paginator, ViewportClassifier, clamp_page, page, total_pages};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn items_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(any::<u32>(), 0..200)
}

fn page_size_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![Just(10usize), Just(12usize), 1usize..50]
}

fn width_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![0u32..4000, Just(767u32), Just(768u32)]
}

// =============================================================================
// PAGE SLICING
// =============================================================================

mod page_properties {
    use super::*;

    proptest! {
        /// Concatenating every page gives back the whole sequence
        #[test]
        fn pages_partition_sequence(items in items_strategy(), size in page_size_strategy()) {
            let total = total_pages(items.len(), size);
            let mut joined = Vec::with_capacity(items.len());
            for n in 1..=total {
                let slice = page(&items, n as i64, size);
                prop_assert!(slice.len() <= size);
                joined.extend_from_slice(slice);
            }
            prop_assert_eq!(joined, items);
        }

        /// Total is never zero and covers every item
        #[test]
        fn total_pages_bounds(len in 0usize..1000, size in page_size_strategy()) {
            let total = total_pages(len, size);
            prop_assert!(total >= 1);
            prop_assert!(total * size >= len);
            prop_assert!(len == 0 || (total - 1) * size < len);
        }

        /// Any requested page lands on the clamped one
        #[test]
        fn out_of_range_requests_clamp(
            items in items_strategy(),
            size in page_size_strategy(),
            n in any::<i64>(),
        ) {
            let total = total_pages(items.len(), size);
            let clamped = clamp_page(n, total);
            prop_assert!((1..=total).contains(&clamped));
            prop_assert_eq!(page(&items, n, size), page(&items, clamped as i64, size));
        }
    }
}

// =============================================================================
// PAGINATOR STATE
// =============================================================================

mod paginator_properties {
    use super::*;

    proptest! {
        /// Navigation and density changes keep the current page in range
        #[test]
        fn current_page_stays_in_range(
            len in 0usize..300,
            sizes in prop::collection::vec(page_size_strategy(), 1..6),
            jumps in prop::collection::vec(any::<i64>(), 1..6),
        ) {
            let mut paginator = Paginator::new(sizes[0]);
            paginator.reset(len);
            for (size, n) in sizes.iter().zip(jumps.iter()) {
                paginator.go_to(*n);
                paginator.set_page_size(*size);
                let current = paginator.current_page();
                prop_assert!(current >= 1 && current <= paginator.total_pages());
                prop_assert!(paginator.range().len() <= paginator.page_size());
            }
        }

        /// Walking forward from page 1 visits every page exactly once
        #[test]
        fn next_walks_every_page(len in 0usize..300, size in page_size_strategy()) {
            let mut paginator = Paginator::new(size);
            paginator.reset(len);
            let mut visited = vec![paginator.current_page()];
            while paginator.has_next() {
                visited.push(paginator.next());
            }
            let expected: Vec<usize> = (1..=paginator.total_pages()).collect();
            prop_assert_eq!(visited, expected);
        }
    }
}

// =============================================================================
// VIEWPORT DENSITY
// =============================================================================

mod viewport_properties {
    use super::*;

    proptest! {
        /// Classification depends on the width alone
        #[test]
        fn classification_is_stable(widths in prop::collection::vec(width_strategy(), 1..20), probe in width_strategy()) {
            let mut classifier = ViewportClassifier::new(CatalogConfig::default());
            let before = classifier.page_size(probe);
            for w in widths {
                classifier.observe(w);
            }
            prop_assert_eq!(classifier.page_size(probe), before);
            prop_assert_eq!(before, if probe < 768 { 10 } else { 12 });
        }
    }
}
