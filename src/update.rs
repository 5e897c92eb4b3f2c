//! Update function for the Elm-style architecture
//!
//! All session state changes flow through `update`.

use crate::commands::Cmd;
use crate::messages::GridMsg;
use crate::session::GridSession;

#[cfg(debug_assertions)]
use crate::tracing::SessionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

/// Main update function
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(session: &mut GridSession, msg: GridMsg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(session, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(session, msg)
    }
}

fn update_inner(session: &mut GridSession, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::HostUpdate { text, revision } => session.handle_host_update(&text, revision),
        GridMsg::Save => session.save(),

        GridMsg::Edit(edit) => session.apply_edit(&edit),
        GridMsg::Undo => session.undo(),
        GridMsg::Redo => session.redo(),
        GridMsg::ClearHistory => {
            session.clear_history();
            None
        }

        GridMsg::SetIgnoreHeaderRow(ignore) => session.set_ignore_header_row(ignore),
        GridMsg::SetFilter { key, value } => session.set_filter(key, value),
        GridMsg::ClearFilter(key) => session.clear_filter(&key),
        GridMsg::ClearFilters => session.clear_filters(),
        GridMsg::SortBy { key, direction } => session.sort_by(key, direction),
        GridMsg::ClearSort => session.clear_sort(),
        GridMsg::CommitSort => session.commit_sort(),

        GridMsg::Search(query) => session.run_search(&query),
        GridMsg::SearchNext => session.search.handle_next_search(),
        GridMsg::SearchPrevious => session.search.handle_previous_search(),
        GridMsg::SearchClose => {
            session.search.handle_close();
            Some(Cmd::Redraw)
        }
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after session state and logs the diff.
#[cfg(debug_assertions)]
fn update_traced(session: &mut GridSession, msg: GridMsg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = SessionSnapshot::from_session(session);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(session, msg);

    let after = SessionSnapshot::from_session(session);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "grid", %diff, "state changed");
    }

    result
}

/// Display name for a message, without document payloads
#[cfg(debug_assertions)]
fn msg_type_name(msg: &GridMsg) -> String {
    match msg {
        GridMsg::HostUpdate { text, revision } => {
            format!("HostUpdate(rev {}, {} bytes)", revision, text.len())
        }
        GridMsg::Edit(edit) => format!("Edit({})", edit.label()),
        other => format!("{:?}", other),
    }
}
