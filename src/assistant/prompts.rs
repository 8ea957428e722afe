//! System prompt assembly for the assistant gateway.

use crate::types::{Shift, Worker};
use crate::util::format_clock;

/// Reply protocol appended to every system prompt. The reload sentinel
/// here must stay in sync with [`super::widget::RELOAD_SENTINEL`].
const PROTOCOL: &str = "Apply the administrator's instruction to the schedule. \
When you have changed the schedule, reply with exactly OK and nothing else; \
that reply makes the app reload the day. For questions or anything you could \
not do, answer in one or two short sentences.";

/// Build the per-message system prompt: who is on the roster, what the
/// viewed day currently looks like, and the reply protocol.
pub fn build_system_prompt(date: &str, workers: &[Worker], shifts: &[Shift]) -> String {
    let mut sections = Vec::new();
    sections.push(format!(
        "You are the scheduling assistant for a small workforce team. \
         The administrator is viewing the schedule for {date}."
    ));
    sections.push(roster_block(workers));
    sections.push(schedule_block(date, shifts));
    sections.push(PROTOCOL.to_string());
    sections.join("\n\n")
}

fn roster_block(workers: &[Worker]) -> String {
    if workers.is_empty() {
        return "Roster: empty.".to_string();
    }
    let mut lines = vec!["Roster:".to_string()];
    for worker in workers {
        let mut line = format!("- {}", worker.name);
        if !worker.abilities.is_empty() {
            line.push_str(&format!(" ({})", worker.abilities.join(", ")));
        }
        line.push_str(&format!(", target {}h/week", worker.target_hours));
        if !worker.working_hours.is_empty() {
            line.push_str(&format!(", usually {}", worker.working_hours));
        }
        if !worker.pto.is_empty() {
            line.push_str(&format!(", PTO on {}", worker.pto.join(", ")));
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn schedule_block(date: &str, shifts: &[Shift]) -> String {
    if shifts.is_empty() {
        return format!("Schedule for {date}: no shifts yet.");
    }
    let mut lines = vec![format!("Schedule for {date}:")];
    for shift in shifts {
        let role = if shift.role.is_empty() {
            "shift"
        } else {
            shift.role.as_str()
        };
        let mut line = format!(
            "- {}: {} {}-{}",
            shift.name,
            role,
            format_clock(shift.start),
            format_clock(shift.end)
        );
        if let Some(notes) = shift.notes.as_deref().filter(|n| !n.is_empty()) {
            line.push_str(&format!(" ({notes})"));
        }
        lines.push(line);
    }
    lines.join("\n")
}
