//! Access code generation and normalisation.
//!
//! Access codes are short uppercase alphanumeric strings handed to a
//! customer out of band. The code itself (not the row id) is the key every
//! progress lookup uses.

use rand::Rng;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of symbols in a generated access code.
pub const CODE_LENGTH: usize = 8;

/// Symbols an access code is drawn from (36 symbols, uniform).
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// How many fresh codes to try when an insert collides with an existing one.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Maximum length accepted for customer name and phone fields.
pub const MAX_CUSTOMER_FIELD_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a new random access code of [`CODE_LENGTH`] symbols.
pub fn generate_access_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            char::from(CODE_ALPHABET[idx])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Normalisation & validation
// ---------------------------------------------------------------------------

/// Normalise user-entered code text: trim surrounding whitespace, uppercase.
///
/// Lookups are exact-match, so every caller must go through this first.
pub fn normalize_code(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Whether `code` has the shape of a generated code (length and alphabet).
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

/// Trim the customer fields of a new code and reject blanks.
///
/// Returns the trimmed `(name, phone)` pair.
pub fn validate_customer(name: &str, phone: &str) -> Result<(String, String), CoreError> {
    let name = name.trim();
    let phone = phone.trim();

    if name.is_empty() || phone.is_empty() {
        return Err(CoreError::Validation("Please fill in all fields".into()));
    }
    if name.chars().count() > MAX_CUSTOMER_FIELD_LENGTH
        || phone.chars().count() > MAX_CUSTOMER_FIELD_LENGTH
    {
        return Err(CoreError::Validation(format!(
            "Customer fields must be at most {MAX_CUSTOMER_FIELD_LENGTH} characters"
        )));
    }

    Ok((name.to_string(), phone.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_code_is_well_formed() {
        for _ in 0..100 {
            let code = generate_access_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(is_well_formed(&code), "bad code: {code}");
        }
    }

    #[test]
    fn generated_codes_vary() {
        let a = generate_access_code();
        let b = generate_access_code();
        let c = generate_access_code();
        // 36^8 possibilities; three identical draws would mean a broken RNG.
        assert!(!(a == b && b == c));
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_code("  ab12cd34 \n"), "AB12CD34");
        assert_eq!(normalize_code("AB12CD34"), "AB12CD34");
    }

    #[test]
    fn well_formed_rejects_lowercase_and_wrong_length() {
        assert!(is_well_formed("AB12CD34"));
        assert!(!is_well_formed("ab12cd34"));
        assert!(!is_well_formed("AB12CD3"));
        assert!(!is_well_formed("AB12CD345"));
        assert!(!is_well_formed("AB12-D34"));
    }

    #[test]
    fn validate_customer_trims_fields() {
        let (name, phone) = validate_customer("  Jane Doe ", " 555-0100 ").unwrap();
        assert_eq!(name, "Jane Doe");
        assert_eq!(phone, "555-0100");
    }

    #[test]
    fn validate_customer_rejects_blank_fields() {
        assert!(validate_customer("   ", "555").is_err());
        assert!(validate_customer("Jane", "").is_err());
    }

    #[test]
    fn validate_customer_rejects_oversized_fields() {
        let long = "x".repeat(MAX_CUSTOMER_FIELD_LENGTH + 1);
        assert!(validate_customer(&long, "555").is_err());
    }
}
