//! `git status` long-format parsing.
//!
//! Classifies the human-readable output of `git status` into a handful of
//! [`ConditionFlags`] and extracts the checked-out reference. Lines are
//! matched by literal, case-sensitive prefixes taken from git's English
//! phrasing; this is narrow on purpose and is not a grammar for the whole
//! status format. Callers must run git with `LC_ALL=C`.

use bitflags::bitflags;

use super::error::ParseFailure;

const FATAL: &str = "fatal";
const ON_BRANCH: &str = "On branch ";
const HEAD_DETACHED_AT: &str = "HEAD detached at ";
const NOTHING_TO_COMMIT: &str = "nothing to commit";
const NOT_STAGED: &str = "Changes not staged for commit";
const UNTRACKED: &str = "Untracked files";
const TO_BE_COMMITTED: &str = "Changes to be committed";
const UNMERGED: &str = "Unmerged paths";
const DELETED_ENTRY: &str = "deleted:";

bitflags! {
    /// Independent facts about a working tree, each set by one line of
    /// status output.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConditionFlags: u8 {
        /// Nothing to commit. Never combined with the content flags.
        const CLEAN = 1 << 0;
        /// Unstaged changes to tracked files.
        const MODIFIED = 1 << 1;
        const UNTRACKED = 1 << 2;
        const STAGED = 1 << 3;
        /// An unstaged change is a deletion.
        const DELETED = 1 << 4;
        /// Unmerged paths (merge or rebase conflict).
        const CONFLICT = 1 << 5;
        const HEAD_DETACHED = 1 << 6;
        /// Output could not be read as a status report.
        const FATAL = 1 << 7;
    }
}

/// Reference name plus condition flags for one `git status` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryStatus {
    reference: String,
    flags: ConditionFlags,
}

impl RepositoryStatus {
    /// Branch name, or abbreviated commit id when HEAD is detached.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn flags(&self) -> ConditionFlags {
        self.flags
    }

    pub fn is_detached(&self) -> bool {
        self.flags.contains(ConditionFlags::HEAD_DETACHED)
    }
}

/// Where the scanner is in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Looking for the branch/HEAD line.
    Reference,
    /// Classifying section headers; `unstaged` is true inside
    /// "Changes not staged for commit".
    Conditions { unstaged: bool },
    /// Saw "nothing to commit"; only `fatal` lines matter now.
    Clean,
}

/// Parse `git status` output (stdout and stderr combined).
///
/// Fails when any line starts with `fatal`, wherever it appears, or when no
/// reference line is found. Unrecognized lines are skipped.
pub fn parse(text: &str) -> Result<RepositoryStatus, ParseFailure> {
    let mut reference: Option<String> = None;
    let mut flags = ConditionFlags::empty();
    let mut scan = Scan::Reference;

    for line in text.lines() {
        if line.starts_with(FATAL) {
            return Err(ParseFailure::FatalStatus {
                line: line.to_string(),
            });
        }

        scan = match scan {
            Scan::Reference => match match_reference(line) {
                Some((name, detached)) => {
                    reference = Some(name.to_string());
                    flags.set(ConditionFlags::HEAD_DETACHED, detached);
                    Scan::Conditions { unstaged: false }
                }
                None => Scan::Reference,
            },
            Scan::Conditions { unstaged } => classify_line(line, unstaged, &mut flags),
            Scan::Clean => Scan::Clean,
        };
    }

    let reference = reference.ok_or(ParseFailure::NoReferenceFound)?;
    Ok(RepositoryStatus { reference, flags })
}

/// Match `On branch <name>` or `HEAD detached at <rev>`; the bool is true
/// for the detached form.
fn match_reference(line: &str) -> Option<(&str, bool)> {
    let (rest, detached) = if let Some(rest) = line.strip_prefix(ON_BRANCH) {
        (rest, false)
    } else if let Some(rest) = line.strip_prefix(HEAD_DETACHED_AT) {
        (rest, true)
    } else {
        return None;
    };
    rest.split_whitespace().next().map(|token| (token, detached))
}

fn classify_line(line: &str, unstaged: bool, flags: &mut ConditionFlags) -> Scan {
    if line.starts_with(NOTHING_TO_COMMIT) {
        *flags |= ConditionFlags::CLEAN;
        return Scan::Clean;
    }

    let header = [
        (NOT_STAGED, ConditionFlags::MODIFIED),
        (UNTRACKED, ConditionFlags::UNTRACKED),
        (TO_BE_COMMITTED, ConditionFlags::STAGED),
        (UNMERGED, ConditionFlags::CONFLICT),
    ]
    .into_iter()
    .find(|(prefix, _)| line.starts_with(prefix));

    if let Some((prefix, flag)) = header {
        *flags |= flag;
        return Scan::Conditions {
            unstaged: prefix == NOT_STAGED,
        };
    }

    if unstaged && line.trim_start().starts_with(DELETED_ENTRY) {
        *flags |= ConditionFlags::DELETED;
    }
    Scan::Conditions { unstaged }
}
