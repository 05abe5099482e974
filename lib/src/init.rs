use ca_rules1d::State;
use rand::Rng;

/// A row of zeros, with the center cell set to `value`.
///
/// The center of a row of even width is the cell right of the middle.
///
/// ```rust
/// # use ca1d_lib::init_simple;
/// assert_eq!(init_simple(5, 1), vec![0, 0, 1, 0, 0]);
/// assert_eq!(init_simple(4, 2), vec![0, 0, 2, 0]);
/// ```
pub fn init_simple(width: usize, value: State) -> Vec<State> {
    let mut row = vec![0; width];
    if let Some(center) = row.get_mut(width / 2) {
        *center = value;
    }
    row
}

/// A row of cells chosen uniformly at random in `0..states`.
///
/// # Panics
///
/// Panics if `states` is zero.
pub fn init_random<R: Rng + ?Sized>(width: usize, states: State, rng: &mut R) -> Vec<State> {
    (0..width).map(|_| rng.gen_range(0..states)).collect()
}
