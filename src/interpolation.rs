//! Lagrange-polynomial interpolation over tabulated data, and an ordered
//! binary search with insertion-point semantics.
//!
//! These are the numeric workhorses behind the ephemeris table lookup: the
//! table picks a window of rows bracketing the requested date with
//! [`binary_search`] and evaluates each position column with [`interpolate`].

/// Interpolate column `y_col` as a function of column `x_col` using a
/// Lagrange polynomial through rows `row_min..=row_max` of `data`.
///
/// For best numerical behavior the window width generally stays between 1
/// (linear) and 7 samples. A degenerate window (`row_min == row_max`)
/// returns that row's y-value directly.
///
/// No bounds validation is performed here; supplying a valid, in-range
/// window is the caller's contract.
///
/// Arguments
/// ---------
/// * `data`: table of numeric rows, each at least `max(x_col, y_col) + 1` wide
/// * `x_value`: abscissa at which to evaluate the interpolant
/// * `row_min`: first sample row (inclusive)
/// * `row_max`: last sample row (inclusive)
/// * `x_col`: column holding the independent variable
/// * `y_col`: column holding the dependent variable
///
/// Return
/// ------
/// * The interpolated value of `y = f(x_value)`.
pub fn interpolate<R: AsRef<[f64]>>(
    data: &[R],
    x_value: f64,
    row_min: usize,
    row_max: usize,
    x_col: usize,
    y_col: usize,
) -> f64 {
    if row_min == row_max {
        return data[row_min].as_ref()[y_col];
    }

    let mut sum = 0.0;
    for j in row_min..=row_max {
        let row_j = data[j].as_ref();
        let mut prod = 1.0;
        for k in row_min..=row_max {
            if k == j {
                continue;
            }
            let row_k = data[k].as_ref();
            prod *= (x_value - row_k[x_col]) / (row_j[x_col] - row_k[x_col]);
        }
        sum += prod * row_j[y_col];
    }

    sum
}

/// Binary search over an ascending sequence, with two's-complement
/// insertion-point semantics.
///
/// Returns the non-negative index of an exact match, or the bitwise
/// complement of the insertion point (`-(insertion) - 1`) when no exact
/// match exists, so callers recover the insertion point with `!`.
/// For `[10, 20, 30]`: searching 20 yields `1`; searching 12 yields `-2`
/// (and `!-2 == 1`).
///
/// One quirk: a value above every entry returns `data.len()` directly,
/// un-complemented, so a non-negative result is only an exact match when
/// it is also `< data.len()`. Callers that clamp to the table's range
/// beforehand never observe this.
///
/// Arguments
/// ---------
/// * `data`: ascending sequence (ordering is the caller's contract)
/// * `value`: the value searched for
/// * `comparer`: three-way comparison between an item and `value`,
///   negative/zero/positive like a subtraction
pub fn binary_search<T>(data: &[T], value: f64, comparer: impl Fn(&T, f64) -> f64) -> isize {
    let mut left: isize = 0;
    let mut right: isize = data.len() as isize;

    while left <= right {
        let middle = (left + right) / 2;
        if middle == data.len() as isize {
            return middle;
        }
        let comparison = comparer(&data[middle as usize], value);
        if comparison < 0.0 {
            left = middle + 1;
        } else if comparison > 0.0 {
            right = middle - 1;
        } else {
            return middle;
        }
    }

    !left
}

#[cfg(test)]
mod interpolation_test {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    // y = f(x) = x^2
    const SQUARES: [[f64; 2]; 7] = [
        [0., 0.],
        [1., 1.],
        [2., 4.],
        [3., 9.],
        [4., 16.],
        [5., 25.],
        [6., 36.],
    ];

    #[rstest]
    #[case(3.0, 9.0)]
    #[case(2.5, 6.25)]
    fn test_simple_interpolation(#[case] x: f64, #[case] expected: f64) {
        let y = interpolate(&SQUARES, x, 1, 4, 0, 1);
        assert_relative_eq!(y, expected, epsilon = 1e-12);
    }

    #[rstest]
    #[case(-5.0, -1667.0)]
    #[case(-3.0, -261.0)]
    #[case(0.0, 3.0)]
    #[case(3.0, -75.0)]
    #[case(5.0, -877.0)]
    #[case(-2.5, -138.25)]
    #[case(0.01, 3.03990298)]
    #[case(3.9, -281.3412)]
    fn test_tenth_order_window_on_quartic(#[case] x: f64, #[case] expected: f64) {
        // y = f(x) = -2x^4 + 3x^3 - x^2 + 4x + 3
        let data = [
            [-5., -1667.],
            [-4., -733.],
            [-3., -261.],
            [-2., -65.],
            [-1., -7.],
            [0., 3.],
            [1., 7.],
            [2., -1.],
            [3., -75.],
            [4., -317.],
            [5., -877.],
        ];
        let y = interpolate(&data, x, 0, data.len() - 1, 0, 1);
        assert_relative_eq!(y, expected, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1.0, 1.0)]
    #[case(2.0, 4.0)]
    #[case(0.5, 0.25)]
    fn test_window_at_table_start(#[case] x: f64, #[case] expected: f64) {
        let y = interpolate(&SQUARES, x, 0, 2, 0, 1);
        assert_relative_eq!(y, expected, epsilon = 1e-12);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.5, 0.5)]
    #[case(1.5, 1.5)]
    fn test_linear_window(#[case] x: f64, #[case] expected: f64) {
        let y = interpolate(&SQUARES, x, 0, 1, 0, 1);
        assert_relative_eq!(y, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_window_returns_row_value() {
        assert_eq!(interpolate(&SQUARES, 123.0, 3, 3, 0, 1), 9.0);
    }

    #[test]
    fn test_binary_search_exact_match() {
        let data = [10.0, 20.0, 30.0];
        assert_eq!(binary_search(&data, 20.0, |a, b| a - b), 1);
        assert_eq!(binary_search(&data, 10.0, |a, b| a - b), 0);
        assert_eq!(binary_search(&data, 30.0, |a, b| a - b), 2);
    }

    #[test]
    fn test_binary_search_insertion_point() {
        let data = [10.0, 20.0, 30.0];
        let idx = binary_search(&data, 12.0, |a, b| a - b);
        assert_eq!(idx, -2);
        assert_eq!(!idx, 1);

        let before_all = binary_search(&data, 5.0, |a, b| a - b);
        assert_eq!(!before_all, 0);
    }

    #[test]
    fn test_binary_search_above_all_entries() {
        // A value past the last entry comes back as the length itself,
        // not complemented.
        let data = [10.0, 20.0, 30.0];
        assert_eq!(binary_search(&data, 40.0, |a, b| a - b), 3);
    }

    #[test]
    fn test_binary_search_row_comparer() {
        let rows = [[2458849.0, 1.0], [2458879.0, 2.0], [2458909.0, 3.0]];
        let idx = binary_search(&rows, 2458879.0, |row, jd| row[0] - jd);
        assert_eq!(idx, 1);

        let idx = binary_search(&rows, 2458890.0, |row, jd| row[0] - jd);
        assert_eq!(!idx, 2);
    }
}
