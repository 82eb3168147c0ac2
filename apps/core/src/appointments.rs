//! Appointment form handling.
//!
//! Validates a submitted form and formats the confirmation message.
//! Requests are not stored or scheduled anywhere.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::brain::knowledge::{KnowledgeBase, CLINIC_PHONE};
use crate::error::AppError;

/// A submitted appointment form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AppointmentRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 7, max = 32))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub department: String,
    pub date: NaiveDate,
    /// 24-hour "HH:MM", one of the bookable slots
    pub time: String,
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

impl AppointmentRequest {
    /// Check the form against the clinic tables and return the confirmation text
    pub fn confirm(&self, knowledge: &KnowledgeBase, today: NaiveDate) -> Result<String, AppError> {
        self.validate()?;

        if !knowledge.departments().contains(&self.department.as_str()) {
            return Err(AppError::Validation(format!(
                "Unknown department: {}",
                self.department
            )));
        }
        if !knowledge.time_slots().contains(&self.time.as_str()) {
            return Err(AppError::Validation(format!(
                "Time {} is not an available slot",
                self.time
            )));
        }
        if self.date < today {
            return Err(AppError::Validation(format!(
                "Date {} is in the past",
                self.date
            )));
        }

        Ok(format!(
            "✅ **Appointment Request Confirmed!**\n\n\
             **Patient:** {}\n\
             **Department:** {}\n\
             **Date:** {}\n\
             **Time:** {}\n\
             **Phone:** {}\n\n\
             We'll contact you within 24 hours to confirm your appointment. Please arrive 15 minutes early and bring your insurance card and ID.\n\n\
             **Need to cancel?** Call us at {} at least 24 hours in advance.",
            self.name,
            self.department,
            self.date.format("%A, %B %-d, %Y"),
            format_time(&self.time)?,
            self.phone,
            CLINIC_PHONE,
        ))
    }
}

/// Parses `name|phone|email|department|YYYY-MM-DD|HH:MM|reason`.
///
/// Email and reason may be left empty.
impl FromStr for AppointmentRequest {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split('|').map(str::trim).collect();
        if fields.len() < 6 {
            return Err(AppError::Validation(
                "Expected name|phone|email|department|YYYY-MM-DD|HH:MM|reason".to_string(),
            ));
        }

        let optional = |value: Option<&&str>| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        };

        Ok(Self {
            name: fields[0].to_string(),
            phone: fields[1].to_string(),
            email: optional(fields.get(2)),
            department: fields[3].to_string(),
            date: NaiveDate::parse_from_str(fields[4], "%Y-%m-%d")?,
            time: fields[5].to_string(),
            reason: optional(fields.get(6)),
        })
    }
}

/// "14:00" -> "2:00 PM"
pub fn format_time(time24: &str) -> Result<String, AppError> {
    let (hours, minutes) = time24
        .split_once(':')
        .ok_or_else(|| AppError::Validation(format!("Invalid time: {}", time24)))?;
    let hour: u32 = hours
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid hour in {}", time24)))?;
    if hour > 23 {
        return Err(AppError::Validation(format!("Invalid hour in {}", time24)));
    }

    let period = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    Ok(format!("{}:{} {}", hour12, minutes, period))
}
