//! Human-like string generators backed by the `fake` crate.

use fake::faker::internet::en::{Password, SafeEmail, Username};
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::Rng;

/// Number of author names stored per product.
pub const AUTHORS_PER_PRODUCT: usize = 2;

pub fn generate_username<R: Rng>(rng: &mut R) -> String {
    Username().fake_with_rng(rng)
}

pub fn generate_email<R: Rng>(rng: &mut R) -> String {
    SafeEmail().fake_with_rng(rng)
}

pub fn generate_password<R: Rng>(rng: &mut R) -> String {
    Password(8..20).fake_with_rng(rng)
}

/// A single word, used as product name.
pub fn generate_word<R: Rng>(rng: &mut R) -> String {
    Word().fake_with_rng(rng)
}

/// Author names joined with `", "`.
pub fn generate_authors<R: Rng>(rng: &mut R) -> String {
    (0..AUTHORS_PER_PRODUCT)
        .map(|_| Name().fake_with_rng::<String, _>(rng))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_strings_are_plausible() {
        let mut rng = StdRng::seed_from_u64(11);

        assert!(!generate_username(&mut rng).is_empty());
        assert!(generate_email(&mut rng).contains('@'));
        let password = generate_password(&mut rng);
        assert!((8..20).contains(&password.chars().count()));
        assert!(!generate_word(&mut rng).is_empty());
    }

    #[test]
    fn test_authors_joined() {
        let mut rng = StdRng::seed_from_u64(11);
        let authors = generate_authors(&mut rng);
        assert_eq!(authors.split(", ").count(), AUTHORS_PER_PRODUCT);
    }
}
