use subtle::ConstantTimeEq;

/// Compare two byte slices without exiting early on the first difference.
///
/// Lengths are not secret and are compared first. This is the only equality
/// check used for signatures and passwords.
#[must_use]
pub fn equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_inputs_match() {
        assert!(equal(b"", b""));
        assert!(equal(b"signature", b"signature"));
    }

    #[test]
    fn length_mismatch_is_unequal() {
        assert!(!equal(b"abc", b"abcd"));
        assert!(!equal(b"", b"a"));
    }

    #[test]
    fn any_differing_byte_is_unequal() {
        let reference = [0x5a_u8; 32];
        for index in 0..reference.len() {
            let mut other = reference;
            other[index] ^= 0x01;
            assert!(!equal(&reference, &other), "difference at {index} not detected");
        }
    }
}
