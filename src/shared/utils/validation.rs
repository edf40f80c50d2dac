use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

use crate::shared::errors::AppError;

pub const MAX_STAR_RATING: u8 = 5;
pub const MAX_REVIEW_LENGTH: usize = 5000;
pub const MAX_PAGE_SIZE: usize = 100;

fn group_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Letters (including accented ones), digits, spaces and a few separators
        Regex::new(r"^[\p{L}0-9\s\-_'&.,!]+$").expect("group name pattern is valid")
    })
}

pub struct Validator;

impl Validator {
    /// A stored or submitted star value; 0 means "no rating"
    pub fn validate_star_rating(value: i64) -> Result<u8, AppError> {
        if !(0..=MAX_STAR_RATING as i64).contains(&value) {
            return Err(AppError::ValidationError(format!(
                "Rating must be between 0 and {}, got {}",
                MAX_STAR_RATING, value
            )));
        }
        Ok(value as u8)
    }

    pub fn validate_nickname(nickname: &str) -> Result<(), AppError> {
        let trimmed = nickname.trim();
        if trimmed.is_empty() {
            return Err(AppError::ValidationError(
                "Nickname cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > 50 {
            return Err(AppError::ValidationError(
                "Nickname too long (max 50 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_group_name(name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Group name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > 100 {
            return Err(AppError::ValidationError(
                "Group name too long (max 100 characters)".to_string(),
            ));
        }
        if !group_name_pattern().is_match(name) {
            return Err(AppError::ValidationError(
                "Group name contains invalid characters".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_review_text(text: &str) -> Result<(), AppError> {
        if text.chars().count() > MAX_REVIEW_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Review too long (max {} characters)",
                MAX_REVIEW_LENGTH
            )));
        }
        Ok(())
    }

    pub fn validate_page_size(num_items: usize) -> Result<(), AppError> {
        if num_items == 0 {
            return Err(AppError::ValidationError(
                "Page size must be positive".to_string(),
            ));
        }
        if num_items > MAX_PAGE_SIZE {
            return Err(AppError::ValidationError(format!(
                "Page size cannot exceed {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    /// Calendar date in `YYYY-MM-DD` form
    pub fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            AppError::ValidationError(format!("Date '{}' must be formatted as YYYY-MM-DD", date))
        })
    }

    /// Wall-clock start time in `HH:MM` form
    pub fn parse_start_time(time: &str) -> Result<NaiveTime, AppError> {
        NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| {
            AppError::ValidationError(format!("Start time '{}' must be formatted as HH:MM", time))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_rating_bounds() {
        assert_eq!(Validator::validate_star_rating(0).unwrap(), 0);
        assert_eq!(Validator::validate_star_rating(5).unwrap(), 5);
        assert!(Validator::validate_star_rating(6).is_err());
        assert!(Validator::validate_star_rating(-1).is_err());
    }

    #[test]
    fn group_names_allow_accents_but_not_markup() {
        assert!(Validator::validate_group_name("Toneelvrienden Gent").is_ok());
        assert!(Validator::validate_group_name("Théâtre & co").is_ok());
        assert!(Validator::validate_group_name("   ").is_err());
        assert!(Validator::validate_group_name("<script>").is_err());
    }

    #[test]
    fn dates_and_times() {
        assert!(Validator::parse_date("2025-03-14").is_ok());
        assert!(Validator::parse_date("14/03/2025").is_err());
        assert!(Validator::parse_start_time("20:15").is_ok());
        assert!(Validator::parse_start_time("8pm").is_err());
    }

    #[test]
    fn page_size_limits() {
        assert!(Validator::validate_page_size(0).is_err());
        assert!(Validator::validate_page_size(20).is_ok());
        assert!(Validator::validate_page_size(101).is_err());
    }
}
