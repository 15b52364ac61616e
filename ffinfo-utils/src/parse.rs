/// Minimum number of digits in a player UID.
pub const MIN_UID_LEN: usize = 6;

/// A UID is ASCII digits only, at least [`MIN_UID_LEN`] long.
pub fn is_valid_uid(raw: &str) -> bool {
    raw.len() >= MIN_UID_LEN && raw.bytes().all(|byte| byte.is_ascii_digit())
}

/// Parse a channel mention (`<#123>`) or a bare channel id.
pub fn parse_channel_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<u64>() {
        return Some(id);
    }

    raw.strip_prefix("<#")
        .and_then(|rest| rest.strip_suffix('>'))
        .and_then(|id| id.parse::<u64>().ok())
}

/// Parse a comma separated list of ids, skipping blanks and junk.
pub fn parse_id_list(raw: &str) -> Vec<u64> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| entry.parse::<u64>().ok())
        .collect()
}

/// Parse a compact duration token like `30s`, `10m`, `2h`, `1d`, or plain seconds.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
    let bytes = compact.as_bytes();
    let mut cursor = 0;
    let mut total_seconds = 0_u64;
    let mut saw_unit_segment = false;

    while cursor < bytes.len() {
        let number_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }

        if number_start == cursor {
            return None;
        }

        let number = compact[number_start..cursor].parse::<u64>().ok()?;

        let saw_unit = cursor < bytes.len();
        let multiplier = if saw_unit {
            let unit = bytes[cursor] as char;
            cursor += 1;

            match unit.to_ascii_lowercase() {
                's' => 1_u64,
                'm' => 60_u64,
                'h' => 60_u64 * 60,
                'd' => 60_u64 * 60 * 24,
                _ => return None,
            }
        } else {
            1_u64
        };

        if !saw_unit && saw_unit_segment {
            return None;
        }

        saw_unit_segment = saw_unit_segment || saw_unit;
        total_seconds = total_seconds.checked_add(number.checked_mul(multiplier)?)?;
    }

    Some(total_seconds)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_uid, parse_channel_id, parse_duration_seconds, parse_id_list};

    #[test]
    fn uid_must_be_six_or_more_digits() {
        assert!(is_valid_uid("123456"));
        assert!(is_valid_uid("1234567890123"));
        assert!(!is_valid_uid("12345"));
        assert!(!is_valid_uid("12345a"));
        assert!(!is_valid_uid(" 123456"));
        assert!(!is_valid_uid("١٢٣٤٥٦"));
        assert!(!is_valid_uid(""));
    }

    #[test]
    fn channel_ids_from_mentions_and_raw() {
        assert_eq!(parse_channel_id("123"), Some(123));
        assert_eq!(parse_channel_id(" <#456> "), Some(456));
        assert_eq!(parse_channel_id("<@456>"), None);
        assert_eq!(parse_channel_id("general"), None);
    }

    #[test]
    fn id_lists_skip_junk() {
        assert_eq!(parse_id_list("1, 2,,x, 3 "), vec![1, 2, 3]);
        assert!(parse_id_list("").is_empty());
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration_seconds("45"), Some(45));
        assert_eq!(parse_duration_seconds("0"), Some(0));
        assert_eq!(parse_duration_seconds("2m"), Some(120));
        assert_eq!(parse_duration_seconds("1m 30s"), Some(90));
        assert_eq!(parse_duration_seconds("1h"), Some(3600));
        assert_eq!(parse_duration_seconds("1m30"), None);
        assert_eq!(parse_duration_seconds("5x"), None);
        assert_eq!(parse_duration_seconds(""), None);
    }
}
