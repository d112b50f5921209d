//! Plain-text rendering of status, feedback and admin listings.

use std::fmt::Write as _;

use seatlink_models::{AdminUserSummary, FeedbackKind, FeedbackMessage, StatusSnapshot, UserProfile};

/// Multi-line status block.
pub fn status(snapshot: &StatusSnapshot) -> String {
    let mut out = String::new();

    let session = if snapshot.is_configured() {
        if snapshot.session_id_preview.is_empty() {
            "bound".to_string()
        } else {
            format!("bound ({})", snapshot.session_id_preview)
        }
    } else {
        "not bound".to_string()
    };
    let _ = writeln!(out, "Session   {session}");

    let beacon = match snapshot.beacon_params() {
        Some(p) => format!("{} / {}", p.major, p.minor),
        None => "not set".to_string(),
    };
    let _ = writeln!(out, "Beacon    {beacon}");

    let auto = if snapshot.auto_checkin_enabled() { "on" } else { "off" };
    let _ = writeln!(out, "Auto      {auto}");

    if snapshot.last_checkin_is_never() {
        let _ = write!(out, "Last      {}", snapshot.checkin_date_label());
    } else {
        let mark = if snapshot.last_result_succeeded() { "ok" } else { "failed" };
        let _ = write!(
            out,
            "Last      {} {}  {} [{mark}]",
            snapshot.checkin_date_label(),
            snapshot.checkin_time_label(),
            snapshot.display_result_text()
        );
    }
    out
}

/// One-line feedback.
pub fn feedback(msg: &FeedbackMessage) -> String {
    match msg.kind {
        FeedbackKind::Success => format!("ok: {}", msg.text),
        FeedbackKind::Error => format!("error: {}", msg.text),
    }
}

/// `whoami` output.
pub fn profile(profile: &UserProfile) -> String {
    let role = if profile.is_admin { "admin" } else { "user" };
    format!("{} (id {}, {role})", profile.username, profile.id)
}

/// Admin user table.
pub fn users(users: &[AdminUserSummary]) -> String {
    let mut out = format!("{:>5}  {:<16} {:<10} {:<20} {}", "ID", "USER", "BOUND", "LAST", "STATUS");
    for u in users {
        let bound = if u.is_configured { "yes" } else { "no" };
        let _ = write!(
            out,
            "\n{:>5}  {:<16} {:<10} {:<20} {}",
            u.user_id, u.username, bound, u.last_checkin, u.status
        );
    }
    out
}
