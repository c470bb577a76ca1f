//! Property tests for coordinates and destination sets.

use chess_core::{Square, SquareSet};
use proptest::prelude::*;
use std::collections::BTreeSet;

proptest! {
    #[test]
    fn square_set_behaves_like_a_set(ops in prop::collection::vec((any::<bool>(), 0u8..64), 0..100)) {
        let mut set = SquareSet::EMPTY;
        let mut model = BTreeSet::new();
        for (add, index) in ops {
            let sq = Square::from_index(index).unwrap();
            if add {
                set.insert(sq);
                model.insert(index);
            } else {
                set.remove(sq);
                model.remove(&index);
            }
        }
        prop_assert_eq!(set.len(), model.len());
        let listed: Vec<u8> = set.iter().map(Square::index).collect();
        let expected: Vec<u8> = model.into_iter().collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn offsets_stay_on_the_board(index in 0u8..64, df in -8i8..=8, dr in -8i8..=8) {
        let sq = Square::from_index(index).unwrap();
        match sq.offset(df, dr) {
            Some(target) => {
                prop_assert_eq!(target.file() as i8, sq.file() as i8 + df);
                prop_assert_eq!(target.rank() as i8, sq.rank() as i8 + dr);
            }
            None => prop_assert!(!Square::in_bounds(sq.file() as i8 + df, sq.rank() as i8 + dr)),
        }
    }
}
