use crate::types::{SchoolConfig, TimeSlot, TimeSlotId};

/// Derives the weekly slot grid from a `SchoolConfig`. No
/// periods are generated after lunch; this matches the source app and is a
/// deliberate, known restriction rather than an oversight here.
pub fn generate_slots(config: &SchoolConfig) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    let mut next_id: i64 = 1;

    for day in 0..config.days_per_week {
        let mut start = config.lesson_start_minutes;
        let mut period_index = 0u32;

        for _ in 0..config.periods_before_break {
            let end = start + config.lesson_duration_min;
            slots.push(TimeSlot {
                id: TimeSlotId(next_id),
                day_index: day,
                period_index,
                start_minutes: start,
                end_minutes: end,
            });
            next_id += 1;
            period_index += 1;
            start = end;
        }

        start += config.break_duration_min;

        for _ in 0..config.periods_after_break {
            let end = start + config.lesson_duration_min;
            slots.push(TimeSlot {
                id: TimeSlotId(next_id),
                day_index: day,
                period_index,
                start_minutes: start,
                end_minutes: end,
            });
            next_id += 1;
            period_index += 1;
            start = end;
        }

        // start += config.lunch_duration_min;
        // No periods are generated after lunch. Known quirk, preserved deliberately.
    }

    slots
}
