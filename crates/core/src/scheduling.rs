//! Expansion of day/block descriptions into concrete appointment slots.
//!
//! Planning is split in two passes. [`validate_days`] parses and checks the
//! whole request, collecting every problem; only a fully valid request yields
//! [`DayPlan`]s, which [`expand_day`] turns into slots.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{
    program::Program,
    schedule::{Block, DayDescriptor},
};
use crate::parsing::{parse_date, parse_time_of_day};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPlan {
    Single(NaiveTime),
    Range { start: NaiveTime, end: NaiveTime },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub blocks: Vec<BlockPlan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Parses and checks every day and block against the program.
///
/// Returns all validation messages when anything is wrong.
pub fn validate_days(program: &Program, days: &[DayDescriptor]) -> Result<Vec<DayPlan>, Vec<String>> {
    let mut errors = Vec::new();

    if program.default_appointment_length <= 0 {
        errors.push(format!(
            "Program '{}' has no valid default appointment length",
            program.name
        ));
    }
    if days.is_empty() {
        errors.push("At least one day must be provided".to_string());
    }

    let mut plans = Vec::with_capacity(days.len());
    for (day_index, day) in days.iter().enumerate() {
        let day_label = format!("Day {}", day_index + 1);

        let date = match parse_date(&day.date) {
            Ok(date) => Some(date),
            Err(e) => {
                errors.push(format!("{}: {}", day_label, e));
                None
            }
        };
        if let Some(date) = date {
            if !program.is_held_on(date) {
                errors.push(format!(
                    "{}: {} is not one of the dates '{}' is held on",
                    day_label, date, program.name
                ));
            }
            if !slots_fit_after(date, program.slot_duration()) {
                errors.push(format!("{}: {} is outside the supported date range", day_label, date));
            }
        }

        let mut blocks = Vec::with_capacity(day.blocks.len());
        for (block_index, block) in day.blocks.iter().enumerate() {
            let block_label = format!("{}, block {}", day_label, block_index + 1);
            match validate_block(block) {
                Ok(plan) => blocks.push(plan),
                Err(block_errors) => errors.extend(
                    block_errors
                        .into_iter()
                        .map(|e| format!("{}: {}", block_label, e)),
                ),
            }
        }

        if let Some(date) = date {
            plans.push(DayPlan { date, blocks });
        }
    }

    if errors.is_empty() {
        Ok(plans)
    } else {
        Err(errors)
    }
}

/// A slot may start as late as the end of `date` and still needs room for
/// `duration` after it.
fn slots_fit_after(date: NaiveDate, duration: Duration) -> bool {
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::days(1))
        .and_then(|next_day| next_day.checked_add_signed(duration))
        .is_some()
}

fn validate_block(block: &Block) -> Result<BlockPlan, Vec<String>> {
    match block {
        Block::Single { start } => parse_time_of_day(start)
            .map(BlockPlan::Single)
            .map_err(|e| vec![e.to_string()]),
        Block::Range { start, end } => {
            let start = parse_time_of_day(start);
            let end = parse_time_of_day(end);
            match (start, end) {
                (Ok(start), Ok(end)) if end > start => Ok(BlockPlan::Range { start, end }),
                (Ok(start), Ok(end)) => Err(vec![format!(
                    "end time {} must be after start time {}",
                    end.format("%H:%M"),
                    start.format("%H:%M")
                )]),
                (start, end) => Err(start
                    .err()
                    .into_iter()
                    .chain(end.err())
                    .map(|e| e.to_string())
                    .collect()),
            }
        }
    }
}

/// Slots for one block.
///
/// Ranges are filled back to back while a whole slot still fits before the
/// end; a shorter remainder is dropped. Slots that would end past the last
/// representable datetime are not produced.
pub fn expand_block(date: NaiveDate, block: BlockPlan, duration: Duration) -> Vec<PlannedSlot> {
    if duration <= Duration::zero() {
        return Vec::new();
    }

    match block {
        BlockPlan::Single(start) => {
            let start = date.and_time(start);
            start
                .checked_add_signed(duration)
                .map(|end| PlannedSlot { start, end })
                .into_iter()
                .collect()
        }
        BlockPlan::Range { start, end } => {
            let end = date.and_time(end);
            let mut current = date.and_time(start);
            let mut slots = Vec::new();
            while let Some(next) = current.checked_add_signed(duration).filter(|next| *next <= end) {
                slots.push(PlannedSlot {
                    start: current,
                    end: next,
                });
                current = next;
            }
            slots
        }
    }
}

pub fn expand_day(day: &DayPlan, duration: Duration) -> Vec<PlannedSlot> {
    day.blocks
        .iter()
        .flat_map(|block| expand_block(day.date, *block, duration))
        .collect()
}
