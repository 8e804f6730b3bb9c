//! `skip_serializing_if` helpers referenced by generated serde attributes.
//!
//! Optional fields hold their host type's zero value when absent; these
//! predicates keep such fields out of serialized output, mirroring the
//! decode-side `default` attribute.

pub fn is_zero_i32(value: &i32) -> bool {
    *value == 0
}

pub fn is_zero_i64(value: &i64) -> bool {
    *value == 0
}

pub fn is_zero_f32(value: &f32) -> bool {
    *value == 0.0
}

pub fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

pub fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_predicates() {
        assert!(is_zero_i64(&0));
        assert!(!is_zero_i64(&7));
        assert!(is_zero_f64(&0.0));
        assert!(!is_zero_f64(&0.5));
        assert!(is_false(&false));
        assert!(!is_false(&true));
    }
}
