use crate::compare::EqualityOracle;
use crate::config::SyncOptions;
use crate::error::Error;
use crate::scanner::DirectoryEntry;

/// What to do with one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Replicate the evaluated entry onto the other tree.
    Copy,
    /// Replicate the counterpart onto the evaluated entry's tree.
    CopyDestination,
    /// Remove the evaluated entry.
    Delete,
    NoOp,
}

/// Which tree an evaluated entry lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Destination,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Source => Side::Destination,
            Side::Destination => Side::Source,
        }
    }
}

/// History mutation that goes with a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryChange {
    Keep,
    Record,
    Forget,
}

/// Input of [`resolve`]: one entry, the same-named entry on the other tree if any,
/// and whether the source-side path has history.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation<'a> {
    pub side: Side,
    pub entry: &'a DirectoryEntry,
    pub counterpart: Option<&'a DirectoryEntry>,
    pub has_history: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub side: Side,
    pub decision: Decision,
    pub history: HistoryChange,
    /// Copy the entry's directory mtime onto the counterpart.
    pub sync_directory_attributes: bool,
}

/// Resolve the decision for one entry.
///
/// The rules are the same whichever side the entry is on; the caller maps the
/// result back onto concrete source and target paths using `side`.
pub fn resolve(
    eval: Evaluation<'_>,
    oracle: &EqualityOracle,
    options: &SyncOptions,
) -> Result<Resolution, Error> {
    let outcome = |decision, history, sync_directory_attributes| Resolution {
        side: eval.side,
        decision,
        history,
        sync_directory_attributes,
    };

    let Some(counterpart) = eval.counterpart else {
        // Seen before but gone on the other side: it was deleted there.
        if eval.has_history {
            return Ok(outcome(Decision::Delete, HistoryChange::Forget, false));
        }
        // Never seen: it was added on this side.
        return Ok(outcome(Decision::Copy, HistoryChange::Record, false));
    };

    let history = if eval.has_history {
        HistoryChange::Keep
    } else {
        HistoryChange::Record
    };

    if eval.entry.kind != counterpart.kind {
        return Err(Error::KindMismatch(eval.entry.path.clone()));
    }

    if eval.entry.is_dir() {
        let sync_attributes =
            !options.ignore_directory_attributes && eval.entry.modified != counterpart.modified;
        return Ok(outcome(Decision::NoOp, history, sync_attributes));
    }

    if oracle.equal(eval.entry, counterpart)? {
        return Ok(outcome(Decision::NoOp, history, false));
    }

    // Ties go to the counterpart.
    let decision = if eval.entry.modified > counterpart.modified {
        Decision::Copy
    } else {
        Decision::CopyDestination
    };
    Ok(outcome(decision, history, false))
}
