//! Project-level properties read from the root property bag.

use crate::{
    file::convert,
    model::{ProjectDefaults, ScheduleFrom, TimeUnit, Timestamp},
    streams::{props, Props},
};

/// Project-wide settings from the generation-named root props stream.
///
/// Every field has a stock fallback, so a file whose root props stream is
/// missing or sparse still yields usable properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectProperties {
    /// Scheduling direction
    pub schedule_from: ScheduleFrom,
    /// Project start date
    pub start_date: Option<Timestamp>,
    /// Project finish date
    pub finish_date: Option<Timestamp>,
    /// Default unit for work amounts
    pub default_work_units: TimeUnit,
    /// Working-time defaults that scale raw duration values
    pub defaults: ProjectDefaults,
}

impl Default for ProjectProperties {
    fn default() -> ProjectProperties {
        ProjectProperties {
            schedule_from: ScheduleFrom::Start,
            start_date: None,
            finish_date: None,
            default_work_units: TimeUnit::Hours,
            defaults: ProjectDefaults::default(),
        }
    }
}

impl ProjectProperties {
    /// Create a `ProjectProperties` object from the root property bag
    ///
    /// Absent keys keep their stock values.
    ///
    /// # Arguments
    /// * 'props'   - The root property bag, if the stream was present
    #[must_use]
    pub fn from_props(props: Option<&Props<'_>>) -> ProjectProperties {
        let mut properties = ProjectProperties::default();
        let Some(props) = props else {
            return properties;
        };

        if let Some(code) = props.short(props::SCHEDULE_FROM) {
            properties.schedule_from = ScheduleFrom::from_code(code);
        }
        properties.start_date = props.timestamp(props::PROJECT_START_DATE);
        properties.finish_date = props.timestamp(props::PROJECT_FINISH_DATE);

        if let Some(units) = props.byte(props::WORK_UNITS).and_then(convert::work_units) {
            properties.default_work_units = units;
        }

        if let Some(code) = props.short(props::DURATION_UNITS) {
            properties.defaults.duration_units =
                convert::duration_units(code, TimeUnit::Days);
        }
        if let Some(minutes) = props.int(props::MINUTES_PER_DAY) {
            properties.defaults.minutes_per_day = minutes;
        }
        if let Some(minutes) = props.int(props::MINUTES_PER_WEEK) {
            properties.defaults.minutes_per_week = minutes;
        }
        if let Some(days) = props.int(props::DAYS_PER_MONTH) {
            properties.defaults.days_per_month = days;
        }

        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props_stream(items: &[(u32, Vec<u8>)]) -> Vec<u8> {
        let mut data = vec![0_u8; 16];
        data[12..14].copy_from_slice(&(items.len() as u16).to_le_bytes());
        for (key, value) in items {
            data.extend_from_slice(&(value.len() as i32).to_le_bytes());
            data.extend_from_slice(&(*key as i32).to_le_bytes());
            data.extend_from_slice(&0_i32.to_le_bytes());
            data.extend_from_slice(value);
            if value.len() % 2 != 0 {
                data.push(0);
            }
        }
        data
    }

    #[test]
    fn absent_stream_yields_stock_values() {
        let properties = ProjectProperties::from_props(None);

        assert_eq!(properties.schedule_from, ScheduleFrom::Start);
        assert_eq!(properties.default_work_units, TimeUnit::Hours);
        assert_eq!(properties.defaults, ProjectDefaults::default());
        assert!(properties.start_date.is_none());
    }

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let start: Vec<u8> = vec![
            0xEC, 0x13,     // time: 5100 tenths = 08:30
            0x33, 0x1D,     // days: 7475
        ];
        let data = props_stream(&[
            (props::SCHEDULE_FROM, 1_u16.to_le_bytes().to_vec()),
            (props::PROJECT_START_DATE, start),
            (props::DURATION_UNITS, 5_u16.to_le_bytes().to_vec()),
            (props::MINUTES_PER_DAY, 450_i32.to_le_bytes().to_vec()),
            (props::MINUTES_PER_WEEK, 2250_i32.to_le_bytes().to_vec()),
            (props::DAYS_PER_MONTH, 21_i32.to_le_bytes().to_vec()),
        ]);
        let props = Props::from(&data).unwrap();

        let properties = ProjectProperties::from_props(Some(&props));

        assert_eq!(properties.schedule_from, ScheduleFrom::Finish);
        assert_eq!(
            properties.start_date.unwrap().to_string(),
            "2004-06-18T08:30:00"
        );
        assert_eq!(properties.defaults.duration_units, TimeUnit::Hours);
        assert_eq!(properties.defaults.minutes_per_day, 450);
        assert_eq!(properties.defaults.minutes_per_week, 2250);
        assert_eq!(properties.defaults.days_per_month, 21);
    }
}
