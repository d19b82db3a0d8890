//! Timestamp keys identifying meeting folders.
//!
//! A key is the folder name itself: six underscore-separated numeric
//! fields, `YYYY_MM_DD_HH_MM_SS`. Zero-padded fields make the keys
//! lexicographically sortable in chronological order, so listings can
//! sort on the raw string.

use std::fmt;
use std::str::FromStr;

use super::StoreError;

/// Identifier of one meeting record. Immutable once created; the folder
/// name is the sole identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeetingKey(String);

impl MeetingKey {
    /// Key for the current wall-clock second.
    pub fn now() -> Self {
        Self(chrono::Local::now().format("%Y_%m_%d_%H_%M_%S").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display label `DD/MM/YYYY HH:MM:SS`, rebuilt from the raw fields.
    pub fn label(&self) -> String {
        let parts: Vec<&str> = self.0.split('_').collect();
        let (year, month, day, hour, min, sec) = (
            parts[0], parts[1], parts[2], parts[3], parts[4], parts[5],
        );
        format!("{day}/{month}/{year} {hour}:{min}:{sec}")
    }
}

impl FromStr for MeetingKey {
    type Err = StoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = name.split('_').collect();
        let valid = parts.len() == 6
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));

        if !valid {
            return Err(StoreError::MalformedKey(name.to_string()));
        }

        Ok(Self(name.to_string()))
    }
}

impl fmt::Display for MeetingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_key() {
        let key: MeetingKey = "2024_01_15_09_30_00".parse().unwrap();
        assert_eq!(key.as_str(), "2024_01_15_09_30_00");
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert!("2024_01_15_09_30".parse::<MeetingKey>().is_err());
        assert!("2024_01_15_09_30_00_99".parse::<MeetingKey>().is_err());
        assert!("".parse::<MeetingKey>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric_fields() {
        assert!("2024_01_15_09_30_xx".parse::<MeetingKey>().is_err());
        assert!("notes_01_15_09_30_00".parse::<MeetingKey>().is_err());
        assert!("2024_01_15_09_30_".parse::<MeetingKey>().is_err());
    }

    #[test]
    fn test_generated_key_round_trips() {
        let key = MeetingKey::now();
        let reparsed: MeetingKey = key.as_str().parse().unwrap();
        assert_eq!(key, reparsed);
    }

    #[test]
    fn test_label_format() {
        let key: MeetingKey = "2024_01_15_09_30_00".parse().unwrap();
        assert_eq!(key.label(), "15/01/2024 09:30:00");
    }

    #[test]
    fn test_keys_order_chronologically() {
        let earlier: MeetingKey = "2024_01_15_09_30_00".parse().unwrap();
        let later: MeetingKey = "2024_01_15_10_00_00".parse().unwrap();
        let next_year: MeetingKey = "2025_01_01_00_00_00".parse().unwrap();

        assert!(earlier < later);
        assert!(later < next_year);
    }
}
