//! Pure helpers a renderer uses to present tasks. None of them fail: absent
//! input gives an empty string or `false`.

use crate::domain::task::Priority;
use chrono::{DateTime, Utc};

/// Up to two uppercase initials from the space-separated words of `name`
pub fn initials(name: Option<&str>) -> String {
    let Some(name) = name else {
        return String::new();
    };

    name.split(' ')
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// True when `due` is strictly before `now`
pub fn is_overdue(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    due.is_some_and(|due| now > due)
}

pub fn is_overdue_now(due: Option<DateTime<Utc>>) -> bool {
    is_overdue(due, Utc::now())
}

/// Short numeric date, e.g. `3/7/2025`
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_default()
}

/// Card border class for a priority
pub fn priority_class(priority: Option<Priority>) -> &'static str {
    match priority {
        Some(Priority::Low) => "border-l-4 border-blue-400",
        Some(Priority::Medium) => "border-l-4 border-yellow-400",
        Some(Priority::High) => "border-l-4 border-orange-400",
        Some(Priority::Urgent) => "border-l-4 border-red-500",
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_initials() {
        assert_eq!(initials(Some("Ada Lovelace")), "AL");
        assert_eq!(initials(Some("vikas")), "V");
        assert_eq!(initials(Some("Mary Ann Evans")), "MA");
        assert_eq!(initials(Some("")), "");
        assert_eq!(initials(None), "");
    }

    #[test]
    fn test_initials_skip_empty_words() {
        assert_eq!(initials(Some("  bob  smith")), "BS");
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();

        assert!(is_overdue(Some(now - Duration::days(1)), now));
        assert!(!is_overdue(Some(now + Duration::days(1)), now));
        assert!(!is_overdue(Some(now), now));
        assert!(!is_overdue(None, now));
        assert!(!is_overdue_now(None));
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2025, 3, 7, 15, 30, 0).unwrap();

        assert_eq!(format_date(Some(date)), "3/7/2025");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_priority_class() {
        assert_eq!(priority_class(Some(Priority::Low)), "border-l-4 border-blue-400");
        assert_eq!(priority_class(Some(Priority::Urgent)), "border-l-4 border-red-500");
        assert_eq!(priority_class(None), "");
    }
}
