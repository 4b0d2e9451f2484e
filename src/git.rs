use anyhow::{Context, Result};
use git2::{BranchType, Commit, IndexAddOption, Repository, Signature};
use std::path::Path;

const COMMITTER_NAME: &str = "appforge";
const COMMITTER_EMAIL: &str = "appforge@localhost";

pub fn init_repository(path: &Path) -> Result<Repository> {
    Repository::init(path)
        .with_context(|| format!("failed to initialize git repository in {}", path.display()))
}

/// Stage everything and commit. Works both for the first commit and for
/// re-runs against a repository that already has a HEAD.
pub fn commit_all(repo: &Repository, message: &str) -> Result<()> {
    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.write()?;

    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    let sig = Signature::now(COMMITTER_NAME, COMMITTER_EMAIL)?;

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .context("failed to create commit")?;
    Ok(())
}

/// Create the branch if it does not exist yet and make it the checked-out
/// HEAD.
pub fn switch_to_branch(repo: &Repository, name: &str) -> Result<()> {
    if repo.find_branch(name, BranchType::Local).is_err() {
        let head = repo.head()?.peel_to_commit()?;
        repo.branch(name, &head, false)?;
    }
    repo.set_head(&format!("refs/heads/{name}"))?;
    repo.checkout_head(None)?;
    Ok(())
}
