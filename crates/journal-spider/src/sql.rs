//////////////////////////////////////////////////////////////////
// sample tasks
//////////////////////////////////////////////////////////////////

/// `journal.sample_tasks` holds every task produced by the calendars, unique on `uid`.
pub(crate) static CREATE_SAMPLE_TASKS: &'static str = "
    CREATE SCHEMA IF NOT EXISTS journal;

    CREATE TABLE IF NOT EXISTS journal.sample_tasks (
        id                BIGSERIAL PRIMARY KEY,
        created_at        TIMESTAMPTZ NOT NULL,
        updated_at        TIMESTAMPTZ NOT NULL,
        metadata          TEXT NOT NULL,
        raw               TEXT NOT NULL,
        name              TEXT NOT NULL,
        uid               TEXT NOT NULL UNIQUE,
        available_before  TIMESTAMPTZ,
        due_date          VARCHAR(10) NOT NULL,
        due_time          VARCHAR(5) NOT NULL,
        pending           BOOLEAN NOT NULL,
        refreshable       BOOLEAN NOT NULL,
        time_zone         TEXT NOT NULL
    );
";

/// Insert or update a task by `uid`; `created_at` survives updates.
///
/// `xmax = 0` only holds for a freshly inserted tuple, so the second column reports whether the
/// row is new.
pub(crate) static UPSERT_SAMPLE_TASK: &'static str = "
    INSERT INTO journal.sample_tasks (
        created_at,
        updated_at,
        metadata,
        raw,
        name,
        uid,
        available_before,
        due_date,
        due_time,
        pending,
        refreshable,
        time_zone
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
    ON CONFLICT (uid) DO UPDATE SET
        updated_at = EXCLUDED.updated_at,
        metadata = EXCLUDED.metadata,
        raw = EXCLUDED.raw,
        name = EXCLUDED.name,
        available_before = EXCLUDED.available_before,
        due_date = EXCLUDED.due_date,
        due_time = EXCLUDED.due_time,
        pending = EXCLUDED.pending,
        refreshable = EXCLUDED.refreshable,
        time_zone = EXCLUDED.time_zone
    RETURNING id, (xmax = 0) AS inserted
";

pub(crate) static SELECT_SAMPLE_TASK: &'static str = "
    SELECT id, created_at, updated_at, metadata, raw, name, uid, available_before,
           due_date, due_time, pending, refreshable, time_zone
    FROM journal.sample_tasks
    WHERE uid = $1
";
