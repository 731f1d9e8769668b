/// `⌊value / width⌋` clamped into `0..count`.
pub(crate) fn floor_index(value: f64, width: f64, count: usize) -> usize {
    let idx = (value / width).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(count - 1)
    }
}
