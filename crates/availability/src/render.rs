use std::collections::BTreeMap;

use booksync_core::models::AvailableSlot;

/// Renders available slots grouped by day, for inclusion in the
/// text-generation prompt.
///
/// Pure formatting: no slot generation or filtering happens here. The input
/// ordering (day-then-time) is preserved within each day.
pub fn render_slots_by_day(slots: &[AvailableSlot]) -> String {
    if slots.is_empty() {
        return "No available slots in the requested period.".to_string();
    }

    let mut by_date: BTreeMap<_, Vec<&str>> = BTreeMap::new();
    for slot in slots {
        by_date.entry(slot.date).or_default().push(&slot.local_time);
    }

    let mut out = String::from("**AVAILABLE TIME SLOTS:**\n");
    for (date, times) in &by_date {
        out.push_str(&format!("\n{date}: {}\n", times.join(", ")));
    }
    out.push_str("\n**IMPORTANT:** Only suggest times from this list.");
    out
}
