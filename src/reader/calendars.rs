//! Calendar population.
//!
//! The calendar directory pairs a 12-byte index record per calendar with a
//! var-data blob holding the weekly pattern and the exception list. Index
//! record offsets differ between generations, see
//! [`GenerationConfig::calendar_layout`].

use crate::{
    file::{convert, file_names, StreamProvider},
    fieldmap::{CalendarLayout, GenerationConfig},
    model::DayType,
    project::{Calendar, CalendarDay, CalendarException, CalendarHours},
    reader::{read_at, DirectoryStreams},
    streams::{FixedData, FixedMeta, Var2Data, VarMeta},
    Result,
};

/// Metadata item size of the calendar fixed store.
const FIXED_META_ITEM_SIZE: usize = 10;
/// Size of one calendar index record.
const INDEX_RECORD_SIZE: usize = 12;

/// Size of one weekday block in the calendar data blob.
const DAY_BLOCK_SIZE: usize = 60;
/// Offset of the period start times within a day block.
const DAY_TIMES_OFFSET: usize = 8;
/// Offset of the period durations within a day block.
const DAY_DURATIONS_OFFSET: usize = 20;

/// Offset of the exception count in the calendar data blob.
const EXCEPTION_COUNT_OFFSET: usize = 420;
/// Size of one exception block, excluding its trailing name.
const EXCEPTION_BLOCK_SIZE: usize = 92;
/// Offset of the period start times within an exception block.
const EXCEPTION_TIMES_OFFSET: usize = 20;
/// Offset of the period durations within an exception block.
const EXCEPTION_DURATIONS_OFFSET: usize = 32;

/// A day or exception carries at most this many working periods.
const MAX_PERIODS: usize = 5;

/// Milliseconds per tenth of a minute.
const TENTH_MINUTE_MS: i64 = 6_000;

/// Read and populate the calendar directory
pub(crate) fn read(
    provider: &impl StreamProvider,
    config: &GenerationConfig,
) -> Result<Vec<Calendar>> {
    let streams = DirectoryStreams::load(provider, file_names::CALENDAR_DIR)?;

    let (Some(meta_data), Some(fixed_data)) = (&streams.fixed_meta, &streams.fixed_data) else {
        return Ok(Vec::new());
    };
    let meta = FixedMeta::from(meta_data, FIXED_META_ITEM_SIZE)?;
    let fixed = FixedData::from_meta(&meta, fixed_data, INDEX_RECORD_SIZE, INDEX_RECORD_SIZE);

    let var_meta = match &streams.var_meta {
        Some(data) => Some(VarMeta::from(data, config.var_meta_layout())?),
        None => None,
    };
    let var = match (&var_meta, &streams.var_data) {
        (Some(meta), Some(data)) => Some(Var2Data::from(meta, data)),
        _ => None,
    };

    let layout = config.calendar_layout();
    let mut calendars = Vec::new();

    for index in 0..fixed.item_count() {
        let Some(record) = fixed.item(index) else {
            continue;
        };
        if record.len() < INDEX_RECORD_SIZE {
            continue;
        }
        let Some(calendar) = build_calendar(record, &layout, var.as_ref()) else {
            continue;
        };
        calendars.push(calendar);
    }

    Ok(calendars)
}

fn build_calendar(
    record: &[u8],
    layout: &CalendarLayout,
    var: Option<&Var2Data<'_>>,
) -> Option<Calendar> {
    let unique_id = read_at::<u32>(record, layout.id_offset)?;
    if unique_id == 0 {
        return None;
    }
    let base_id = read_at::<i32>(record, layout.base_id_offset)?;
    let resource_id = read_at::<i32>(record, layout.resource_id_offset)?;

    let derived = base_id != 0 && base_id != -1 && base_id != unique_id as i32;
    let base_calendar_id = derived.then(|| base_id as u32);
    let resource_unique_id = (resource_id > 0).then(|| resource_id as u32);

    let name = var.and_then(|var| var.unicode_string(unique_id, layout.name_key));
    let data = var.and_then(|var| var.bytes(unique_id, layout.data_key));

    let (days, exceptions) = match data {
        Some(data) => (read_days(data, derived), read_exceptions(data)),
        None if derived => (follow_base_week(), Vec::new()),
        None => (Calendar::default_working_week(), Vec::new()),
    };

    Some(Calendar {
        unique_id,
        base_calendar_id,
        resource_unique_id,
        name,
        days,
        exceptions,
    })
}

/// A derived calendar week that defers every day to its base.
fn follow_base_week() -> Vec<CalendarDay> {
    Calendar::default_working_week()
        .into_iter()
        .map(|entry| CalendarDay {
            day: entry.day,
            day_type: DayType::Default,
            hours: Vec::new(),
        })
        .collect()
}

fn read_days(data: &[u8], derived: bool) -> Vec<CalendarDay> {
    let mut days = Vec::with_capacity(7);

    for (day_index, stock) in Calendar::default_working_week().into_iter().enumerate() {
        let day = stock.day;
        let Some(block) = data.get(day_index * DAY_BLOCK_SIZE..(day_index + 1) * DAY_BLOCK_SIZE)
        else {
            // Truncated blob; remaining days follow the fallback pattern
            days.push(fallback_day(stock, derived));
            continue;
        };

        let default_flag = read_at::<u16>(block, 0).unwrap_or(0);
        if default_flag != 0 {
            days.push(fallback_day(stock, derived));
            continue;
        }

        let hours = read_periods(
            block,
            DAY_TIMES_OFFSET,
            DAY_DURATIONS_OFFSET,
            read_at::<u16>(block, 2).unwrap_or(0) as usize,
        );
        let day_type = if hours.is_empty() {
            DayType::NonWorking
        } else {
            DayType::Working
        };
        days.push(CalendarDay {
            day,
            day_type,
            hours,
        });
    }

    days
}

/// A day flagged "default": base calendars use the stock pattern, derived
/// calendars defer to their base.
fn fallback_day(stock: CalendarDay, derived: bool) -> CalendarDay {
    if derived {
        CalendarDay {
            day: stock.day,
            day_type: DayType::Default,
            hours: Vec::new(),
        }
    } else {
        stock
    }
}

fn read_exceptions(data: &[u8]) -> Vec<CalendarException> {
    let Some(count) = read_at::<u16>(data, EXCEPTION_COUNT_OFFSET) else {
        return Vec::new();
    };

    let mut exceptions = Vec::new();
    let mut offset = EXCEPTION_COUNT_OFFSET + 2;

    for _ in 0..count {
        let Some(block) = data.get(offset..offset + EXCEPTION_BLOCK_SIZE) else {
            break;
        };

        let from_date = convert::date(block, 0);
        let to_date = convert::date(block, 2);
        let period_count = read_at::<u16>(block, 14).unwrap_or(0) as usize;
        let hours = read_periods(
            block,
            EXCEPTION_TIMES_OFFSET,
            EXCEPTION_DURATIONS_OFFSET,
            period_count,
        );

        // Name length is stored 4-byte aligned; the name follows the block
        let name_size = read_at::<u32>(block, 88).unwrap_or(0) as usize;
        let name = if name_size > 0 {
            data.get(offset + EXCEPTION_BLOCK_SIZE..)
                .map(|slice| convert::unicode_string(slice, 0))
                .filter(|name| !name.is_empty())
        } else {
            None
        };

        exceptions.push(CalendarException {
            from_date,
            to_date,
            name,
            hours,
        });

        offset += EXCEPTION_BLOCK_SIZE + name_size;
    }

    exceptions
}

fn read_periods(
    block: &[u8],
    times_offset: usize,
    durations_offset: usize,
    period_count: usize,
) -> Vec<CalendarHours> {
    let mut hours = Vec::new();
    for period in 0..period_count.min(MAX_PERIODS) {
        let Some(start) = convert::time_of_day_minutes(block, times_offset + period * 2) else {
            break;
        };
        let Some(raw) = read_at::<u32>(block, durations_offset + period * 4) else {
            break;
        };
        hours.push(CalendarHours::new(start, i64::from(raw) * TENTH_MINUTE_MS));
    }
    hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        file::{FileFormat, MemoryStreams},
        model::Day,
    };

    const MAGIC: u32 = 0xFADF_ADBA;

    fn fixed_meta_stream(offsets: &[i32]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC.to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&(offsets.len() as u32).to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        for offset in offsets {
            data.extend_from_slice(&0_u32.to_le_bytes());
            data.extend_from_slice(&offset.to_le_bytes());
            data.extend_from_slice(&0_u16.to_le_bytes());
        }
        data
    }

    fn var_meta_stream(entries: &[(u32, u32, u16)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC.to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        data.extend_from_slice(&[0_u8; 8]);
        data.extend_from_slice(&4096_u32.to_le_bytes());
        for (unique_id, offset, type_key) in entries {
            data.extend_from_slice(&unique_id.to_le_bytes());
            data.extend_from_slice(&offset.to_le_bytes());
            data.extend_from_slice(&type_key.to_le_bytes());
            data.extend_from_slice(&0_u16.to_le_bytes());
        }
        data
    }

    fn blob(value: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&(value.len() as i32).to_le_bytes());
        data.extend_from_slice(value);
        data
    }

    fn unicode(text: &str) -> Vec<u8> {
        let mut data = Vec::new();
        for unit in text.encode_utf16() {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        data.extend_from_slice(&[0x00, 0x00]);
        data
    }

    /// A calendar blob: Monday explicit 09:00-17:00, every other day flagged
    /// default, one named exception covering two days.
    fn calendar_blob() -> Vec<u8> {
        let mut data = vec![0_u8; EXCEPTION_COUNT_OFFSET + 2];

        for day_index in 0..7 {
            let offset = day_index * DAY_BLOCK_SIZE;
            if day_index == 1 {
                // Monday: one explicit period, 09:00 for 8 hours
                data[offset + 2..offset + 4].copy_from_slice(&1_u16.to_le_bytes());
                data[offset + 8..offset + 10].copy_from_slice(&5400_u16.to_le_bytes());
                data[offset + 20..offset + 24].copy_from_slice(&4800_u32.to_le_bytes());
            } else {
                data[offset..offset + 2].copy_from_slice(&1_u16.to_le_bytes());
            }
        }

        // One exception: days 7475..=7476, non-working, named
        data[EXCEPTION_COUNT_OFFSET..EXCEPTION_COUNT_OFFSET + 2]
            .copy_from_slice(&1_u16.to_le_bytes());
        let name = unicode("Plant shutdown");
        let mut block = vec![0_u8; EXCEPTION_BLOCK_SIZE];
        block[0..2].copy_from_slice(&7475_u16.to_le_bytes());
        block[2..4].copy_from_slice(&7476_u16.to_le_bytes());
        block[88..92].copy_from_slice(&(name.len() as u32).to_le_bytes());
        data.extend_from_slice(&block);
        data.extend_from_slice(&name);

        data
    }

    #[test]
    fn base_calendar_with_exception() {
        let dir = file_names::CALENDAR_DIR;
        let mut provider = MemoryStreams::new();

        // MPP9 layout: id at +0, base at +4, resource at +8
        let mut record = vec![0_u8; INDEX_RECORD_SIZE];
        record[0..4].copy_from_slice(&1_u32.to_le_bytes());
        record[4..8].copy_from_slice(&(-1_i32).to_le_bytes());
        record[8..12].copy_from_slice(&(-1_i32).to_le_bytes());

        provider.insert(Some(dir), file_names::FIXED_META, fixed_meta_stream(&[0]));
        provider.insert(Some(dir), file_names::FIXED_DATA, record);

        let name = unicode("Standard");
        let data = calendar_blob();
        let mut var_data = Vec::new();
        let name_offset = var_data.len() as u32;
        var_data.extend_from_slice(&blob(&name));
        let data_offset = var_data.len() as u32;
        var_data.extend_from_slice(&blob(&data));

        provider.insert(
            Some(dir),
            file_names::VAR_META,
            var_meta_stream(&[(1, name_offset, 1), (1, data_offset, 3)]),
        );
        provider.insert(Some(dir), file_names::VAR2_DATA, var_data);

        let config = GenerationConfig::new(FileFormat::Mpp9);
        let calendars = read(&provider, &config).unwrap();

        assert_eq!(calendars.len(), 1);
        let calendar = &calendars[0];
        assert_eq!(calendar.unique_id, 1);
        assert!(!calendar.is_derived());
        assert_eq!(calendar.name.as_deref(), Some("Standard"));

        // Monday explicit: 09:00 for 8 hours
        let monday = calendar.day(Day::Monday).unwrap();
        assert_eq!(monday.day_type, DayType::Working);
        assert_eq!(monday.hours.len(), 1);
        assert_eq!(monday.hours[0].start_minutes, 540);
        assert_eq!(monday.hours[0].end_minutes(), 1020);

        // Flagged days fall back to the stock pattern on a base calendar
        let sunday = calendar.day(Day::Sunday).unwrap();
        assert_eq!(sunday.day_type, DayType::NonWorking);
        let tuesday = calendar.day(Day::Tuesday).unwrap();
        assert_eq!(tuesday.day_type, DayType::Working);
        assert_eq!(tuesday.hours.len(), 2);

        assert_eq!(calendar.exceptions.len(), 1);
        let exception = &calendar.exceptions[0];
        assert!(!exception.is_working());
        assert_eq!(exception.name.as_deref(), Some("Plant shutdown"));
        assert_eq!(
            exception.from_date.unwrap().to_string(),
            "2004-06-18T00:00:00"
        );
        assert_eq!(
            exception.to_date.unwrap().to_string(),
            "2004-06-19T00:00:00"
        );
    }

    #[test]
    fn derived_calendar_defers_flagged_days() {
        let dir = file_names::CALENDAR_DIR;
        let mut provider = MemoryStreams::new();

        // Calendar 5 derives from calendar 1, owned by resource 2
        let mut record = vec![0_u8; INDEX_RECORD_SIZE];
        record[0..4].copy_from_slice(&5_u32.to_le_bytes());
        record[4..8].copy_from_slice(&1_i32.to_le_bytes());
        record[8..12].copy_from_slice(&2_i32.to_le_bytes());

        provider.insert(Some(dir), file_names::FIXED_META, fixed_meta_stream(&[0]));
        provider.insert(Some(dir), file_names::FIXED_DATA, record);

        let config = GenerationConfig::new(FileFormat::Mpp9);
        let calendars = read(&provider, &config).unwrap();

        assert_eq!(calendars.len(), 1);
        let calendar = &calendars[0];
        assert!(calendar.is_derived());
        assert_eq!(calendar.base_calendar_id, Some(1));
        assert_eq!(calendar.resource_unique_id, Some(2));
        assert!(calendar
            .days
            .iter()
            .all(|day| day.day_type == DayType::Default));
    }

    #[test]
    fn missing_directory_yields_no_calendars() {
        let provider = MemoryStreams::new();
        let config = GenerationConfig::new(FileFormat::Mpp14);

        assert!(read(&provider, &config).unwrap().is_empty());
    }
}
