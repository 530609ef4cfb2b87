use crate::cli;
use crate::config::Config;
use crate::confirm::confirm_delete;
use crate::datastore::Connector;
use crate::env::clear_emulator_host;
use crate::error::{SnippetError, StoreError};
use crate::snippet::SnippetId;
use std::ffi::OsStr;
use std::io::{self, BufRead, Write};
use tokio::time::{timeout_at, Instant};

/// The terminals a user sees.
pub struct Console<R, O, E> {
    pub input: R,
    pub out: O,
    pub err: E,
}

/// How a run ended without error. All of these exit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Deleted,
    Missing,
    Aborted,
}

/// Resolve `target`, confirm with the operator, and delete the snippet.
pub async fn execute<C, R, O, E>(
    target: &OsStr,
    config: &Config,
    connector: &C,
    console: &mut Console<R, O, E>,
) -> Result<Outcome, SnippetError>
where
    C: Connector + ?Sized,
    R: BufRead,
    O: Write,
    E: Write,
{
    let id = SnippetId::parse_os(target)?;

    if !confirm_delete(id.as_str(), &mut console.input, &mut console.out)? {
        writeln!(console.out, "Aborting ...")?;
        return Ok(Outcome::Aborted);
    }

    let credentials = connector.check_credentials()?;
    clear_emulator_host()?;

    let deadline = Instant::now() + config.deadline;
    let store = match timeout_at(deadline, connector.connect(credentials)).await {
        Ok(Ok(store)) => store,
        Ok(Err(e)) => return Err(SnippetError::Connect(e)),
        Err(_) => return Err(SnippetError::Connect(StoreError::DeadlineExceeded)),
    };

    let key = id.key();
    match timeout_at(deadline, store.get(&key)).await {
        Ok(Ok(())) => tracing::debug!(id = %id, "snippet found"),
        Ok(Err(StoreError::NoSuchEntity)) => {
            writeln!(console.err, "Snippet with ID {:?} does not exist", id.as_str())?;
            return Ok(Outcome::Missing);
        }
        // Anything short of a definite "missing" still goes on to the delete.
        Ok(Err(e)) => tracing::debug!(id = %id, error = %e, "lookup failed"),
        Err(_) => tracing::debug!(id = %id, "lookup hit the deadline"),
    }

    writeln!(console.out, "Deleting snippet {:?} ...", id.as_str())?;
    let deleted = if Instant::now() >= deadline {
        Err(StoreError::DeadlineExceeded)
    } else {
        match timeout_at(deadline, store.delete(&key)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::DeadlineExceeded),
        }
    };
    deleted.map_err(|source| SnippetError::Delete {
        id: id.to_string(),
        source,
    })?;

    writeln!(console.out, "Snippet with ID {:?} deleted", id.as_str())?;
    Ok(Outcome::Deleted)
}

/// Print `error` the way the operator should see it.
pub fn report<W: Write>(error: &SnippetError, stderr: &mut W) -> io::Result<()> {
    match error {
        SnippetError::EmptyId => writeln!(stderr, "{}", cli::usage())?,
        SnippetError::InvalidId(_) | SnippetError::NonUtf8Id(_) => {
            writeln!(stderr, "{}", cli::usage())?;
            writeln!(stderr, "{}", error)?;
        }
        _ => writeln!(stderr, "{}", error)?,
    }

    for line in error.hint_lines() {
        writeln!(stderr, "{}", line)?;
    }
    Ok(())
}

/// Run the whole removal and return the process exit status.
pub async fn run<C, R, O, E>(
    target: &OsStr,
    config: &Config,
    connector: &C,
    console: &mut Console<R, O, E>,
) -> i32
where
    C: Connector + ?Sized,
    R: BufRead,
    O: Write,
    E: Write,
{
    match execute(target, config, connector, console).await {
        Ok(outcome) => {
            tracing::debug!(?outcome, "done");
            0
        }
        Err(error) => {
            if let Err(e) = report(&error, &mut console.err) {
                tracing::warn!(error = %e, "failed to write error report");
            }
            error.exit_code()
        }
    }
}
