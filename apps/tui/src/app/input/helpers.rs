pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Maps `1`-`9` to the first nine navbar slots and `0` to the tenth.
pub fn digit_to_nav_slot(ch: char) -> Option<usize> {
    match ch.to_digit(10)? {
        0 => Some(9),
        d => usize::try_from(d - 1).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_stays_in_bounds() {
        assert_eq!(wrap_increment(2, 3), 0);
        assert_eq!(wrap_decrement(0, 3), 2);
        assert_eq!(wrap_increment(5, 0), 0);
        assert_eq!(wrap_decrement(0, 0), 0);
    }

    #[test]
    fn digits_map_to_navbar_slots() {
        assert_eq!(digit_to_nav_slot('1'), Some(0));
        assert_eq!(digit_to_nav_slot('9'), Some(8));
        assert_eq!(digit_to_nav_slot('0'), Some(9));
        assert_eq!(digit_to_nav_slot('x'), None);
    }
}
