//! Best-third placement: map four qualified thirds onto slots A..D under pool-origin rules.

use crate::models::{QualifiedTeam, ThirdPlaceAssignment, ThirdPlaceSlot};

/// All orderings of `items`, in insertion order:
/// fix the first item, permute the rest, then insert the first item at every
/// position of each sub-permutation (outer loop over sub-permutations).
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let Some((first, rest)) = items.split_first() else {
        return vec![Vec::new()];
    };
    let mut out = Vec::new();
    for sub in permutations(rest) {
        for i in 0..=sub.len() {
            let mut perm = Vec::with_capacity(sub.len() + 1);
            perm.extend_from_slice(&sub[..i]);
            perm.push(first.clone());
            perm.extend_from_slice(&sub[i..]);
            out.push(perm);
        }
    }
    out
}

fn satisfies(perm: &[QualifiedTeam]) -> bool {
    perm.len() == ThirdPlaceSlot::ALL.len()
        && ThirdPlaceSlot::ALL
            .iter()
            .zip(perm)
            .all(|(slot, team)| slot.accepts(team.pool_id))
}

/// Assign the qualified thirds to slots A, B, C, D.
///
/// Returns the first permutation (in `permutations` order) where every slot's
/// team comes from an allowed pool. If none exists the teams are placed in
/// input order and the assignment is marked `relaxed`.
pub fn solve_third_place_assignment(best_thirds: &[QualifiedTeam]) -> ThirdPlaceAssignment {
    if let Some(perm) = permutations(best_thirds).into_iter().find(|p| satisfies(p)) {
        return ThirdPlaceAssignment {
            slots: perm,
            relaxed: false,
        };
    }
    log::warn!(
        "No best-third placement satisfies the pool rules for [{}]; using input order",
        best_thirds
            .iter()
            .map(|t| format!("{} ({})", t.id(), t.pool_id))
            .collect::<Vec<_>>()
            .join(", ")
    );
    ThirdPlaceAssignment {
        slots: best_thirds.to_vec(),
        relaxed: true,
    }
}
