pub mod password;
pub mod url_validator;
pub mod validators;

/// 短码字符集：数字 + 小写 + 大写，共 62 个
pub const SHORT_CODE_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 每个字符独立均匀抽取，允许重复
    iter::repeat_with(|| {
        SHORT_CODE_ALPHABET[rand::random_range(0..SHORT_CODE_ALPHABET.len())] as char
    })
    .take(length)
    .collect()
}

/// 检查字符串是否是合法短码（指定长度，仅字母数字）
pub fn is_valid_short_code(code: &str, length: usize) -> bool {
    code.len() == length && code.bytes().all(|b| SHORT_CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_code_length_and_alphabet() {
        for _ in 0..1000 {
            let code = generate_random_code(3);
            assert_eq!(code.len(), 3);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_random_code_is_not_constant() {
        let codes: std::collections::HashSet<String> =
            (0..200).map(|_| generate_random_code(3)).collect();
        assert!(codes.len() > 100);
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let unique: std::collections::HashSet<u8> = SHORT_CODE_ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_is_valid_short_code() {
        assert!(is_valid_short_code("aZ9", 3));
        assert!(is_valid_short_code("000", 3));
        assert!(!is_valid_short_code("ab", 3));
        assert!(!is_valid_short_code("abcd", 3));
        assert!(!is_valid_short_code("a-b", 3));
        assert!(!is_valid_short_code("é1", 3));
    }
}
