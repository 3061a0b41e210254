//! Operating-hours editor: a week of open/close times, edited one day at a
//! time through scratch buffers that are only committed on save.

use shared::domain::DaySchedule;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::alert::Alert;

pub const MISSING_TIMES_MESSAGE: &str = "Por favor, preencha todos os horários";
pub const EMPTY_TIME_PLACEHOLDER: &str = "--:--";
pub const CLOSED_LABEL: &str = "Fechado";

const MAX_HOURS: u8 = 23;
const MAX_MINUTES: u8 = 59;

/// Normalizes a raw keystroke buffer while the user types.
///
/// Up to two digits are returned untouched. Past that the first two digits
/// become hours (clamped to 23) and the next one or two become minutes
/// (clamped to 59). Anything after the fourth digit is dropped.
pub fn format_time_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() <= 2 {
        return digits;
    }

    let hours = &digits[..2];
    let minutes = &digits[2..digits.len().min(4)];
    let hours = clamp_field(hours, MAX_HOURS);
    let minutes = clamp_field(minutes, MAX_MINUTES);
    format!("{hours}:{minutes}")
}

fn clamp_field(field: &str, max: u8) -> String {
    match field.parse::<u8>() {
        Ok(value) if value > max => format!("{max:02}"),
        _ => field.to_string(),
    }
}

/// Pads a partially typed time to `HH:MM`. Applied when an edit is saved.
pub fn format_time_display(value: &str) -> String {
    if value.contains(':') {
        let mut parts = value.split(':');
        let hours = parts.next().unwrap_or_default();
        let minutes = parts.next().unwrap_or_default();
        format!("{hours:0>2}:{minutes:0>2}")
    } else if value.chars().count() <= 2 {
        format!("{value:0>2}:00")
    } else {
        // format_time_input never yields more than two digits without a colon
        "00:00".to_string()
    }
}

pub fn display_time(time: &str) -> &str {
    if time.is_empty() {
        EMPTY_TIME_PLACEHOLDER
    } else {
        time
    }
}

pub fn default_week() -> Vec<DaySchedule> {
    vec![
        DaySchedule::new("Segunda-feira", "08:00", "18:00", true),
        DaySchedule::new("Terça-feira", "08:00", "18:00", true),
        DaySchedule::new("Quarta-feira", "08:00", "18:00", true),
        DaySchedule::new("Quinta-feira", "08:00", "18:00", true),
        DaySchedule::new("Sexta-feira", "08:00", "18:00", true),
        DaySchedule::new("Sábado", "09:00", "17:00", true),
        DaySchedule::new("Domingo", "10:00", "16:00", false),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("no day at index {0}")]
    UnknownDay(usize),
    #[error("{0} is closed; open it before editing its hours")]
    DayClosed(String),
    #[error("no time edit in progress")]
    NotEditing,
    #[error("Por favor, preencha todos os horários")]
    MissingTimes,
}

impl ScheduleError {
    pub fn to_alert(&self) -> Alert {
        Alert::error(self.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    Closed,
    Viewing,
    Editing,
}

/// Scratch fields of the edit modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEdit {
    pub day_index: usize,
    pub temp_open_time: String,
    pub temp_close_time: String,
}

#[derive(Debug, Clone)]
pub struct ScheduleEditor {
    schedules: Vec<DaySchedule>,
    editing: Option<TimeEdit>,
}

impl Default for ScheduleEditor {
    fn default() -> Self {
        Self::with_schedules(default_week())
    }
}

impl ScheduleEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedules(schedules: Vec<DaySchedule>) -> Self {
        Self {
            schedules,
            editing: None,
        }
    }

    pub fn schedules(&self) -> &[DaySchedule] {
        &self.schedules
    }

    pub fn editing(&self) -> Option<&TimeEdit> {
        self.editing.as_ref()
    }

    fn day(&self, index: usize) -> Result<&DaySchedule, ScheduleError> {
        self.schedules
            .get(index)
            .ok_or(ScheduleError::UnknownDay(index))
    }

    pub fn day_state(&self, index: usize) -> Result<DayState, ScheduleError> {
        let day = self.day(index)?;
        Ok(if !day.is_open {
            DayState::Closed
        } else if self.editing.as_ref().is_some_and(|e| e.day_index == index) {
            DayState::Editing
        } else {
            DayState::Viewing
        })
    }

    /// `"08:00 - 18:00"` for open days, `"Fechado"` otherwise.
    pub fn hours_label(&self, index: usize) -> Result<String, ScheduleError> {
        let day = self.day(index)?;
        if !day.is_open {
            return Ok(CLOSED_LABEL.to_string());
        }
        Ok(format!(
            "{} - {}",
            display_time(&day.open_time),
            display_time(&day.close_time)
        ))
    }

    /// Flips a day between open and closed. Stored times are kept so a
    /// reopened day shows its previous hours. Closing the day being edited
    /// drops the pending edit.
    pub fn toggle_day_status(&mut self, index: usize) -> Result<bool, ScheduleError> {
        let day = self
            .schedules
            .get_mut(index)
            .ok_or(ScheduleError::UnknownDay(index))?;
        day.is_open = !day.is_open;
        let is_open = day.is_open;
        debug!(day = %day.day, is_open, "schedule: day toggled");

        if !is_open && self.editing.as_ref().is_some_and(|e| e.day_index == index) {
            self.editing = None;
        }
        Ok(is_open)
    }

    pub fn open_edit_modal(&mut self, index: usize) -> Result<&TimeEdit, ScheduleError> {
        let day = self.day(index)?;
        if !day.is_open {
            return Err(ScheduleError::DayClosed(day.day.clone()));
        }
        let edit = TimeEdit {
            day_index: index,
            temp_open_time: day.open_time.clone(),
            temp_close_time: day.close_time.clone(),
        };
        Ok(self.editing.insert(edit))
    }

    pub fn handle_open_time_change(&mut self, raw: &str) -> Result<&str, ScheduleError> {
        let edit = self.editing.as_mut().ok_or(ScheduleError::NotEditing)?;
        edit.temp_open_time = format_time_input(raw);
        Ok(&edit.temp_open_time)
    }

    pub fn handle_close_time_change(&mut self, raw: &str) -> Result<&str, ScheduleError> {
        let edit = self.editing.as_mut().ok_or(ScheduleError::NotEditing)?;
        edit.temp_close_time = format_time_input(raw);
        Ok(&edit.temp_close_time)
    }

    /// Commits the scratch fields. With an empty field nothing changes and
    /// the modal stays open.
    pub fn save_time_changes(&mut self) -> Result<&DaySchedule, ScheduleError> {
        let edit = self.editing.as_ref().ok_or(ScheduleError::NotEditing)?;
        if edit.temp_open_time.is_empty() || edit.temp_close_time.is_empty() {
            warn!(day_index = edit.day_index, "schedule: save rejected, empty time");
            return Err(ScheduleError::MissingTimes);
        }

        let index = edit.day_index;
        let current = self.day(index)?;
        let updated = DaySchedule {
            open_time: format_time_display(&edit.temp_open_time),
            close_time: format_time_display(&edit.temp_close_time),
            ..current.clone()
        };
        info!(
            day = %updated.day,
            open = %updated.open_time,
            close = %updated.close_time,
            "schedule: hours saved"
        );
        self.schedules[index] = updated;
        self.editing = None;
        Ok(&self.schedules[index])
    }

    /// Discards the scratch fields. Returns whether an edit was open.
    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }
}

#[cfg(test)]
#[path = "tests/schedule_tests.rs"]
mod tests;
