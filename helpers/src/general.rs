#[derive(Debug, Clone, Copy)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// argsort returns the indices that would sort an array. The sort is stable, i.e. equal elements
/// keep their original relative order.
pub fn argsort<T: Ord>(x: &[T], order: SortOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..x.len()).collect();
    match order {
        SortOrder::Ascending => indices.sort_by(|&a, &b| x[a].cmp(&x[b])),
        SortOrder::Descending => indices.sort_by(|&a, &b| x[b].cmp(&x[a])),
    }
    indices
}

/// count_less returns the number of elements in x that are strictly less than threshold. If x is
/// sorted ascending, the scan stops at the first element that is not less.
pub fn count_less<T: PartialOrd + Copy>(x: &[T], threshold: T, x_is_sorted: bool) -> usize {
    if x_is_sorted {
        x.iter().take_while(|&&val| val < threshold).count()
    } else {
        x.iter().filter(|&&val| val < threshold).count()
    }
}

/// is_sorted_ascending checks whether x is monotonically non-decreasing.
pub fn is_sorted_ascending<T: PartialOrd>(x: &[T]) -> bool {
    x.windows(2).all(|w| w[0] <= w[1])
}

/// s_to_ms converts a time in seconds to whole milliseconds (rounded). Non-finite inputs yield
/// None.
pub fn s_to_ms(t_s: f64) -> Option<i64> {
    if !t_s.is_finite() {
        return None;
    }
    Some((t_s * 1000.0).round() as i64)
}

/// ms_to_s converts milliseconds to seconds.
pub fn ms_to_s(t_ms: i64) -> f64 {
    t_ms as f64 / 1000.0
}
