//! Manual backport instructions.

use crate::git::validate_branch_name;
use std::fmt::Write;

/// Details of a failed backport, rendered into the recovery comment.
#[derive(Debug, Clone)]
pub struct FailureReport<'a> {
    /// Target base branch.
    pub base: &'a str,

    /// Head branch the backport was (or would have been) pushed to.
    pub head: &'a str,

    /// Merge commit to cherry-pick.
    pub merge_commit: &'a str,

    /// Error that stopped the automated backport.
    pub error: &'a str,

    /// Link to the workflow run, when known.
    pub run_url: Option<&'a str>,
}

/// Renders the comment posted on the source pull request.
///
/// Manual commands are only included when both branch names are valid git
/// branches; otherwise they could not be pasted into a shell safely.
#[must_use]
pub fn render_failure_comment(report: &FailureReport<'_>) -> String {
    let FailureReport {
        base,
        head,
        merge_commit,
        error,
        run_url,
    } = report;
    let worktree = format!(".worktrees/{head}");

    let mut comment = format!("The backport to `{base}` failed");
    if let Some(run_url) = run_url {
        let _ = write!(comment, " ([workflow run]({run_url}))");
    }
    comment.push_str(":\n\n```\n");
    comment.push_str(error.trim_end());
    comment.push_str("\n```\n\n");

    if validate_branch_name(base).is_err() || validate_branch_name(head).is_err() {
        let _ = writeln!(
            comment,
            "`{base}` or `{head}` is not a valid branch name, so no manual \
             commands are provided. Fix the label or the head branch template \
             and apply the label again."
        );
        return comment;
    }

    let _ = write!(
        comment,
        "To backport manually, run these commands in your terminal:\n\n\
         ```bash\n\
         # Fetch latest updates from GitHub\n\
         git fetch origin {base}\n\
         # Create a new working tree\n\
         git worktree add --detach {worktree} origin/{base}\n\
         # Navigate to the new working tree\n\
         cd {worktree}\n\
         # Create a new branch\n\
         git switch --create {head}\n\
         # Cherry-pick the merged commit of this pull request; if it conflicts,\n\
         # resolve the conflicts, `git add` the files and run `git cherry-pick --continue`\n\
         git cherry-pick -x {merge_commit}\n\
         # Push it to GitHub\n\
         git push --set-upstream origin {head}\n\
         # Go back to the original working tree\n\
         cd -\n\
         # Delete the working tree\n\
         git worktree remove {worktree}\n\
         ```\n\n\
         Then, create a pull request where the `base` branch is `{base}` and the \
         `compare`/`head` branch is `{head}`.\n"
    );

    comment
}
