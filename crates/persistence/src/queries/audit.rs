// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use school_aid_audit::{Action, Actor, AuditEvent, EntityKind, EntityRef, StateSnapshot};

use crate::convert::parse_timestamp;
use crate::data_models::{ActionData, ActorData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    entity_kind: String,
    entity_id: i64,
    actor_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    created_at: String,
}

fn event_from_row(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;
    let kind: EntityKind = row
        .entity_kind
        .parse()
        .map_err(|e| PersistenceError::ReconstructionError(format!("{e}")))?;

    let mut event: AuditEvent = AuditEvent::new(
        Actor::new(actor_data.account_id, actor_data.role),
        Action::new(action_data.name, action_data.details),
        EntityRef {
            kind,
            id: row.entity_id,
        },
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
        parse_timestamp(&row.created_at)?,
    );
    event.event_id = Some(row.event_id);
    Ok(event)
}

/// Lists the audit history of one entity, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn list_events_for_entity(
    conn: &mut SqliteConnection,
    entity: EntityRef,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::entity_kind.eq(entity.kind.as_str()))
        .filter(audit_events::entity_id.eq(entity.id))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_events_for_entity: {e}")))?;

    rows.into_iter().map(event_from_row).collect()
}
