use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijkmnpqrstuvwxyz";
const DIGITS: &[u8] = b"23456789";

/// 生成临时密码，保证同时包含大写、小写和数字，去掉易混淆字符
pub fn generate_temp_password(len: usize) -> String {
    let len = len.max(8);
    let mut rng = rand::rng();
    let pool: Vec<u8> = [UPPER, LOWER, DIGITS].concat();

    let mut chars: Vec<u8> = [UPPER, LOWER, DIGITS]
        .iter()
        .filter_map(|set| set.choose(&mut rng).copied())
        .collect();
    while chars.len() < len {
        chars.push(pool[rng.random_range(0..pool.len())]);
    }
    chars.shuffle(&mut rng);

    chars.into_iter().map(char::from).collect()
}

/// 发票号：`INV-YYYYMMDD-XXXXXX`
pub fn generate_invoice_number(date: chrono::NaiveDate) -> String {
    let mut rng = rand::rng();
    let alphabet: Vec<u8> = [UPPER, DIGITS].concat();
    let suffix: String = (0..6)
        .map(|_| char::from(alphabet[rng.random_range(0..alphabet.len())]))
        .collect();
    format!("INV-{}-{suffix}", date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password;

    #[test]
    fn test_temp_password_satisfies_policy() {
        for _ in 0..50 {
            let password = generate_temp_password(12);
            assert_eq!(password.len(), 12);
            assert!(validate_password(&password).is_ok(), "{password}");
        }
    }

    #[test]
    fn test_invoice_number_format() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let invoice = generate_invoice_number(date);
        assert!(invoice.starts_with("INV-20250309-"));
        assert_eq!(invoice.len(), "INV-20250309-".len() + 6);
    }
}
