use std::collections::HashSet;
use std::hash::Hash;

/// Number of ids present in both sets.
///
/// Both sets hold accepted friends only; callers remove the two users being
/// compared before calling.
pub fn mutual_count<T>(a: &HashSet<T>, b: &HashSet<T>) -> usize
where
    T: Eq + Hash,
{
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|id| large.contains(*id)).count()
}
