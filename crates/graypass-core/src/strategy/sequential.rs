//! Single-threaded baseline: one pass over indices `0..len` in order.

use crate::pixel::Pixel;
use crate::rule::apply_rule;

/// Visit every item in index order on the calling thread.
///
/// Returns the number of visits for which `visit` returned `true`.
pub fn drive<T, F>(items: &mut [T], mut visit: F) -> usize
where
    F: FnMut(usize, &mut T) -> bool,
{
    let mut hits = 0;
    for (index, item) in items.iter_mut().enumerate() {
        if visit(index, item) {
            hits += 1;
        }
    }
    hits
}

/// Apply the grayscale rule to every pixel, returning how many changed.
pub fn apply(pixels: &mut [Pixel]) -> usize {
    drive(pixels, |_, pixel| apply_rule(pixel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visits_in_order() {
        let mut items = vec![0usize; 5];
        let mut order = Vec::new();
        drive(&mut items, |index, item| {
            order.push(index);
            *item += 1;
            false
        });

        assert_eq!(order, vec![0, 1, 2, 3, 4]);
        assert_eq!(items, vec![1; 5]);
    }

    #[test]
    fn test_counts_hits() {
        let mut items: Vec<usize> = (0..10).collect();
        let hits = drive(&mut items, |_, item| *item % 2 == 0);
        assert_eq!(hits, 5);
    }

    #[test]
    fn test_apply_scenario() {
        let mut pixels = vec![Pixel::new(10, 10, 10), Pixel::new(100, 50, 25)];
        assert_eq!(apply(&mut pixels), 1);
        assert_eq!(pixels, vec![Pixel::new(10, 10, 10), Pixel::gray(58)]);
    }
}
