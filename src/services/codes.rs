use rand::seq::SliceRandom;
use rand::Rng;

pub const SHARE_CODE_PREFIX: &str = "RSHARE";

/// 33 symbols; 0, O and I are excluded as visually ambiguous.
const CODE_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZ";

const PASSWORD_WORDS: [&str; 15] = [
    "Thunder", "Storm", "Crystal", "Phoenix", "Dragon", "Shadow", "Blaze", "Frost",
    "Lightning", "Mystic", "Cosmic", "Nebula", "Quantum", "Cipher", "Matrix",
];

const PASSWORD_SYMBOLS: [char; 8] = ['!', '@', '#', '$', '%', '&', '*', '+'];

fn random_group(rng: &mut impl Rng) -> String {
    (0..4)
        .map(|_| *CODE_ALPHABET.choose(rng).unwrap_or(&b'A') as char)
        .collect()
}

/// Produce a share code `RSHARE-AAAA-BBBB`. A pure lookup key with no
/// cryptographic role; uniqueness is enforced by the relay, not here.
pub fn generate_share_code() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}-{}-{}",
        SHARE_CODE_PREFIX,
        random_group(&mut rng),
        random_group(&mut rng)
    )
}

/// Syntactic check only; never consults a store.
pub fn validate_share_code(code: &str) -> bool {
    let mut parts = code.split('-');
    let (Some(prefix), Some(a), Some(b), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    prefix == SHARE_CODE_PREFIX
        && a.len() == 4
        && b.len() == 4
        && a.bytes().chain(b.bytes()).all(|c| CODE_ALPHABET.contains(&c))
}

/// Two distinct words, a symbol, a two-digit number. Memorability is traded
/// for raw entropy; strength is carried by the key-derivation iterations.
pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    let word1 = PASSWORD_WORDS.choose(&mut rng).unwrap_or(&"Thunder");
    let mut word2 = PASSWORD_WORDS.choose(&mut rng).unwrap_or(&"Storm");
    while word2 == word1 {
        word2 = PASSWORD_WORDS.choose(&mut rng).unwrap_or(&"Storm");
    }
    let symbol = PASSWORD_SYMBOLS.choose(&mut rng).unwrap_or(&'!');
    let number = rng.gen_range(10..=99);
    format!("{}{}{}{}", word1, symbol, word2, number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_always_validate() {
        for _ in 0..200 {
            let code = generate_share_code();
            assert!(validate_share_code(&code), "rejected {}", code);
        }
    }

    #[test]
    fn validate_rejects_bad_shapes() {
        assert!(!validate_share_code(""));
        assert!(!validate_share_code("RSHARE-ABCD"));
        assert!(!validate_share_code("RSHARE-ABCDE-FGHJ"));
        assert!(!validate_share_code("RSHARE-ABC-DEFG"));
        assert!(!validate_share_code("SHARED-ABCD-EFGH"));
        assert!(!validate_share_code("rshare-ABCD-EFGH"));
    }

    #[test]
    fn validate_rejects_excluded_characters() {
        assert!(!validate_share_code("RSHARE-AB0D-EFGH"));
        assert!(!validate_share_code("RSHARE-ABOD-EFGH"));
        assert!(!validate_share_code("RSHARE-ABID-EFGH"));
        assert!(validate_share_code("RSHARE-AB1D-EFGH"));
    }

    #[test]
    fn alphabet_has_33_symbols() {
        assert_eq!(CODE_ALPHABET.len(), 33);
        assert!(!CODE_ALPHABET.contains(&b'0'));
        assert!(!CODE_ALPHABET.contains(&b'O'));
        assert!(!CODE_ALPHABET.contains(&b'I'));
    }

    #[test]
    fn password_shape_holds() {
        for _ in 0..50 {
            let pw = generate_password();
            let symbol_at = pw
                .find(|c| PASSWORD_SYMBOLS.contains(&c))
                .expect("password contains a symbol");
            let (word1, rest) = pw.split_at(symbol_at);
            let rest = &rest[1..];
            let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();
            let word2 = &rest[..rest.len() - digits.len()];
            assert!(PASSWORD_WORDS.contains(&word1));
            assert!(PASSWORD_WORDS.contains(&word2));
            assert_ne!(word1, word2);
            let n: u32 = digits.parse().unwrap();
            assert!((10..=99).contains(&n));
        }
    }
}
