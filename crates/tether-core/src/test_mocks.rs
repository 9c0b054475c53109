//! Mock implementation of `GitOps` for testing.
//!
//! Read queries are answered from maps filled in with the `with_*`
//! builders. Porcelain calls are appended to `calls` so tests can assert on
//! ordering, and can be made to fail with [`MockGitOps::failing`].

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tether_git::{Error as GitError, GitOps, ObjectKind, Oid, Result as GitResult};

/// Mock implementation of `GitOps` for testing.
pub struct MockGitOps {
    pub root: PathBuf,
    pub current_branch: RefCell<Option<String>>,
    pub head_hash: String,
    pub symbolic: HashMap<String, String>,
    pub hashes: HashMap<String, String>,
    pub objects: HashMap<String, ObjectKind>,
    pub commits: HashMap<String, Oid>,
    pub merge_base: Option<Oid>,
    pub upstreams: HashMap<String, String>,
    pub branch_remotes: HashMap<String, String>,
    pub remote_urls: HashMap<String, String>,
    pub dirty: bool,
    pub failing: HashSet<&'static str>,
    pub calls: RefCell<Vec<String>>,
}

impl MockGitOps {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            current_branch: RefCell::new(None),
            head_hash: "0000000000000000000000000000000000000000".to_string(),
            symbolic: HashMap::new(),
            hashes: HashMap::new(),
            objects: HashMap::new(),
            commits: HashMap::new(),
            merge_base: None,
            upstreams: HashMap::new(),
            branch_remotes: HashMap::new(),
            remote_urls: HashMap::new(),
            dirty: false,
            failing: HashSet::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_current_branch(self, name: &str) -> Self {
        *self.current_branch.borrow_mut() = Some(name.to_string());
        self
    }

    pub fn with_detached_head(mut self, hash: &str) -> Self {
        *self.current_branch.borrow_mut() = None;
        self.head_hash = hash.to_string();
        self
    }

    pub fn with_symbolic(mut self, rev: &str, name: &str) -> Self {
        self.symbolic.insert(rev.to_string(), name.to_string());
        self
    }

    pub fn with_hash(mut self, rev: &str, hash: &str) -> Self {
        self.hashes.insert(rev.to_string(), hash.to_string());
        self
    }

    pub fn with_object(mut self, spec: &str, kind: ObjectKind) -> Self {
        self.objects.insert(spec.to_string(), kind);
        self
    }

    pub fn with_commit(mut self, name: &str, oid: Oid) -> Self {
        self.commits.insert(name.to_string(), oid);
        self
    }

    pub fn with_merge_base(mut self, oid: Oid) -> Self {
        self.merge_base = Some(oid);
        self
    }

    pub fn with_upstream(mut self, branch: &str, upstream: &str) -> Self {
        self.upstreams
            .insert(branch.to_string(), upstream.to_string());
        self
    }

    pub fn with_branch_remote(mut self, branch: &str, remote: &str) -> Self {
        self.branch_remotes
            .insert(branch.to_string(), remote.to_string());
        self
    }

    pub fn with_remote(mut self, name: &str, url: &str) -> Self {
        self.remote_urls.insert(name.to_string(), url.to_string());
        self
    }

    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    /// Make the porcelain operation with this name (`fetch`, `stash push`,
    /// `stash pop`, `checkout`, `merge`, `rebase`) exit with status 1.
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, operation: &'static str, args: &str) -> GitResult<()> {
        let command = if args.is_empty() {
            operation.to_string()
        } else {
            format!("{operation} {args}")
        };
        self.calls.borrow_mut().push(command.clone());

        if self.failing.contains(operation) {
            return Err(GitError::CommandFailed {
                command,
                code: Some(1),
            });
        }
        Ok(())
    }
}

impl GitOps for MockGitOps {
    fn workdir(&self) -> Option<&Path> {
        Some(&self.root)
    }

    fn prefix_of(&self, dir: &Path) -> GitResult<String> {
        let root = self.root.canonicalize()?;
        let dir = dir.canonicalize()?;
        let relative = dir
            .strip_prefix(&root)
            .map_err(|_| GitError::OutsideRepository(dir.clone()))?;

        Ok(relative
            .components()
            .map(|c| format!("{}/", c.as_os_str().to_string_lossy()))
            .collect())
    }

    fn current_branch(&self) -> GitResult<Option<String>> {
        Ok(self.current_branch.borrow().clone())
    }

    fn head_ref(&self) -> GitResult<String> {
        Ok(self
            .current_branch
            .borrow()
            .clone()
            .unwrap_or_else(|| self.head_hash.clone()))
    }

    fn symbolic_name(&self, rev: &str) -> GitResult<Option<String>> {
        if let Some(name) = self.symbolic.get(rev) {
            return Ok(Some(name.clone()));
        }
        if self.hashes.contains_key(rev) {
            return Ok(None);
        }
        Err(GitError::UnknownRevision(rev.to_string()))
    }

    fn resolve_commitish(&self, rev: &str) -> GitResult<String> {
        self.hashes
            .get(rev)
            .cloned()
            .ok_or_else(|| GitError::UnknownRevision(rev.to_string()))
    }

    fn object_kind(&self, spec: &str) -> GitResult<ObjectKind> {
        self.objects
            .get(spec)
            .copied()
            .ok_or_else(|| GitError::ObjectNotFound(spec.to_string()))
    }

    fn ref_commit(&self, name: &str) -> GitResult<Oid> {
        self.commits
            .get(name)
            .copied()
            .ok_or_else(|| GitError::UnknownRevision(name.to_string()))
    }

    fn merge_base(&self, one: Oid, _two: Oid) -> GitResult<Oid> {
        Ok(self.merge_base.unwrap_or(one))
    }

    fn upstream_of(&self, branch: &str) -> GitResult<Option<String>> {
        Ok(self.upstreams.get(branch).cloned())
    }

    fn branch_remote(&self, branch: &str) -> Option<String> {
        self.branch_remotes.get(branch).cloned()
    }

    fn remote_url(&self, name: &str) -> GitResult<String> {
        self.remote_urls
            .get(name)
            .cloned()
            .ok_or_else(|| GitError::RemoteNotFound(name.to_string()))
    }

    fn is_dirty(&self) -> GitResult<bool> {
        Ok(self.dirty)
    }

    fn fetch_prune(&self) -> GitResult<()> {
        self.record("fetch", "--prune")
    }

    fn stash_push(&self, _message: &str) -> GitResult<()> {
        self.record("stash push", "")
    }

    fn stash_pop(&self) -> GitResult<()> {
        self.record("stash pop", "")
    }

    fn switch(&self, target: &str) -> GitResult<()> {
        self.record("checkout", target)?;
        *self.current_branch.borrow_mut() = (target != self.head_hash).then(|| target.to_string());
        Ok(())
    }

    fn merge(&self, target: &str) -> GitResult<()> {
        self.record("merge", target)
    }

    fn rebase(&self, target: &str) -> GitResult<()> {
        self.record("rebase", target)
    }
}
