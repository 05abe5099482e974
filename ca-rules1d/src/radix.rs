//! Conversions between integers and fixed-width digit sequences.
//!
//! Digits are always ordered from the most significant to the least
//! significant. Bases from 2 to 36 are supported, so that every digit can be
//! written as a single character `0-9` or `A-Z`.

use crate::RuleError;

/// The smallest supported base.
pub const MIN_BASE: u8 = 2;

/// The largest supported base.
pub const MAX_BASE: u8 = 36;

/// Check that a base is in `MIN_BASE..=MAX_BASE`.
pub const fn check_base(base: u8) -> Result<(), RuleError> {
    if base < MIN_BASE || base > MAX_BASE {
        Err(RuleError::UnsupportedBase(base as u32))
    } else {
        Ok(())
    }
}

/// Convert a sequence of digits in the given base to an integer.
///
/// An empty sequence is `0`.
///
/// # Errors
///
/// Returns an error if the base is unsupported, if some digit is not smaller
/// than the base, or if the value does not fit in a `u128`.
///
/// # Examples
///
/// ```rust
/// # use ca_rules1d::radix::digits_to_int;
/// assert_eq!(digits_to_int(&[1, 0, 1], 2).unwrap(), 5);
/// assert_eq!(digits_to_int(&[1, 0, 0, 1, 2, 1, 0], 3).unwrap(), 777);
/// assert_eq!(digits_to_int(&[], 2).unwrap(), 0);
/// ```
pub fn digits_to_int(digits: &[u8], base: u8) -> Result<u128, RuleError> {
    check_base(base)?;

    digits.iter().try_fold(0u128, |total, &digit| {
        if digit >= base {
            return Err(RuleError::InvalidDigit { digit, base });
        }
        total
            .checked_mul(base as u128)
            .and_then(|total| total.checked_add(digit as u128))
            .ok_or(RuleError::Overflow)
    })
}

/// Convert an integer to a sequence of exactly `width` digits in the given
/// base, padded with zeros on the left.
///
/// # Errors
///
/// Returns [`RuleError::OutOfRange`] if the number needs more than `width`
/// digits. Nothing is truncated.
///
/// # Examples
///
/// ```rust
/// # use ca_rules1d::radix::int_to_digits;
/// assert_eq!(int_to_digits(5, 4, 2).unwrap(), vec![0, 1, 0, 1]);
/// assert!(int_to_digits(16, 4, 2).is_err());
/// ```
pub fn int_to_digits(number: u128, width: usize, base: u8) -> Result<Vec<u8>, RuleError> {
    check_base(base)?;

    let mut digits = vec![0; width];
    let mut rest = number;

    for digit in digits.iter_mut().rev() {
        if rest == 0 {
            break;
        }
        *digit = (rest % base as u128) as u8;
        rest /= base as u128;
    }

    if rest != 0 {
        return Err(RuleError::OutOfRange { number, width });
    }

    Ok(digits)
}

/// The character of a single digit: `0-9`, then `A-Z`.
///
/// Returns [`None`] if `digit` is not smaller than [`MAX_BASE`].
pub fn digit_char(digit: u8) -> Option<char> {
    char::from_digit(digit as u32, MAX_BASE as u32).map(|c| c.to_ascii_uppercase())
}

/// The string form of a neighborhood, one character per cell.
///
/// This is the key used by [`RuleTable`](crate::RuleTable). For automata with
/// at most 10 states it is the plain concatenation of the decimal digits, e.g.
/// `[1, 0, 1]` becomes `"101"`.
///
/// # Errors
///
/// Returns [`RuleError::InvalidDigit`] if some cell is not smaller than
/// [`MAX_BASE`].
pub fn neighborhood_key(cells: &[u8]) -> Result<String, RuleError> {
    cells
        .iter()
        .map(|&digit| {
            digit_char(digit).ok_or(RuleError::InvalidDigit {
                digit,
                base: MAX_BASE,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_to_int() {
        assert_eq!(digits_to_int(&[], 2), Ok(0));
        assert_eq!(digits_to_int(&[0, 0, 0], 2), Ok(0));
        assert_eq!(digits_to_int(&[1, 1, 1], 2), Ok(7));
        assert_eq!(digits_to_int(&[1, 1, 1, 1, 1, 1, 1, 0], 2), Ok(254));
        assert_eq!(digits_to_int(&[35, 35], 36), Ok(36 * 36 - 1));

        assert_eq!(
            digits_to_int(&[1, 2], 2),
            Err(RuleError::InvalidDigit { digit: 2, base: 2 })
        );
        assert_eq!(digits_to_int(&[1; 129], 2), Err(RuleError::Overflow));
        assert_eq!(digits_to_int(&[1; 128], 2), Ok(u128::MAX));
    }

    #[test]
    fn test_int_to_digits() {
        assert_eq!(int_to_digits(0, 3, 2), Ok(vec![0, 0, 0]));
        assert_eq!(int_to_digits(0, 0, 2), Ok(vec![]));
        assert_eq!(int_to_digits(254, 8, 2), Ok(vec![1, 1, 1, 1, 1, 1, 1, 0]));
        assert_eq!(int_to_digits(777, 7, 3), Ok(vec![1, 0, 0, 1, 2, 1, 0]));
        assert_eq!(int_to_digits(777, 9, 3), Ok(vec![0, 0, 1, 0, 0, 1, 2, 1, 0]));

        assert_eq!(
            int_to_digits(2187, 7, 3),
            Err(RuleError::OutOfRange {
                number: 2187,
                width: 7
            })
        );
        assert!(int_to_digits(1, 0, 2).is_err());
    }

    #[test]
    fn test_round_trip() {
        for base in [2, 3, 5, 36] {
            for width in 0..4 {
                let count = (base as u128).pow(width as u32);
                for value in 0..count {
                    let digits = int_to_digits(value, width, base).unwrap();
                    assert_eq!(digits.len(), width);
                    assert_eq!(digits_to_int(&digits, base), Ok(value));
                }
            }
        }
    }

    #[test]
    fn test_unsupported_base() {
        assert_eq!(digits_to_int(&[0], 1), Err(RuleError::UnsupportedBase(1)));
        assert_eq!(int_to_digits(0, 1, 37), Err(RuleError::UnsupportedBase(37)));
    }

    #[test]
    fn test_digit_char() {
        assert_eq!(digit_char(0), Some('0'));
        assert_eq!(digit_char(9), Some('9'));
        assert_eq!(digit_char(10), Some('A'));
        assert_eq!(digit_char(35), Some('Z'));
        assert_eq!(digit_char(36), None);
        assert_eq!(digit_char(u8::MAX), None);
    }

    #[test]
    fn test_neighborhood_key() {
        assert_eq!(neighborhood_key(&[1, 0, 1]).unwrap(), "101");
        assert_eq!(neighborhood_key(&[10, 35, 0]).unwrap(), "AZ0");
        assert_eq!(neighborhood_key(&[]).unwrap(), "");
        assert!(neighborhood_key(&[36]).is_err());
    }
}
