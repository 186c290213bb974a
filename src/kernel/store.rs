use super::editor::{TabError, TabId};
use super::history::NewEntry;
use super::import::{import_directory, ImportReport};
use super::language::LanguageId;
use super::runner::{CodeRunner, RunnerRegistry};
use super::seed;
use super::services::ports::directory::DirectoryHandle;
use super::{Action, Effect, StoreError, WorkspaceState};
use crate::models::{path, VfsError};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
    /// Path the action produced or acted on, when there is one.
    pub path: Option<String>,
    pub tab: Option<TabId>,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: true,
            ..Self::default()
        }
    }

    fn with_path(mut self, path: String) -> Self {
        self.path = Some(path);
        self
    }

    fn with_tab(mut self, tab: TabId) -> Self {
        self.tab = Some(tab);
        self
    }
}

/// Single owner of the workspace. Applies a tree operation first and then
/// brings tabs in line with it; the tree itself never knows about tabs.
pub struct Store {
    state: WorkspaceState,
    runner: Box<dyn CodeRunner + Send + Sync>,
    user_id: String,
}

impl Store {
    pub fn new(state: WorkspaceState) -> Self {
        Self {
            state,
            runner: Box::new(RunnerRegistry::with_builtins()),
            user_id: "local".to_string(),
        }
    }

    pub fn with_runner(mut self, runner: impl CodeRunner + Send + Sync + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn dispatch(&mut self, action: Action) -> Result<DispatchResult, StoreError> {
        self.dispatch_inner(action)
            .inspect_err(|e| tracing::debug!(error = %e, "action rejected"))
    }

    fn dispatch_inner(&mut self, action: Action) -> Result<DispatchResult, StoreError> {
        match action {
            Action::CreateFile {
                parent,
                name,
                content,
            } => {
                let path = self.state.tree.create_file(&parent, &name, content)?;
                Ok(DispatchResult::changed(vec![Effect::PersistWorkspace]).with_path(path))
            }
            Action::CreateDirectory { parent, name } => {
                let path = self.state.tree.create_directory(&parent, &name)?;
                Ok(DispatchResult::changed(vec![Effect::PersistWorkspace]).with_path(path))
            }
            Action::DeleteNode { path } => {
                let removed = self.state.tree.delete_node(&path)?;
                let mut effects = vec![Effect::PersistWorkspace];
                if self.state.tabs.mark_removed(&removed) > 0 {
                    effects.push(Effect::PersistEditor);
                }
                Ok(DispatchResult::changed(effects).with_path(removed))
            }
            Action::RenameNode { path, new_name } => {
                let old = self.canonical(&path);
                let new = self.state.tree.rename_node(&path, &new_name)?;
                if new == old {
                    return Ok(DispatchResult::unchanged().with_path(new));
                }
                Ok(self.after_relocation(&old, new))
            }
            Action::MoveNode { source, target_dir } => {
                let old = self.canonical(&source);
                let new = self.state.tree.move_node(&source, &target_dir)?;
                Ok(self.after_relocation(&old, new))
            }
            Action::UpdateFileContent { path, content } => {
                if !self.state.tree.update_file_content(&path, content) {
                    return Ok(DispatchResult::unchanged());
                }
                Ok(DispatchResult::changed(vec![Effect::PersistWorkspace]).with_path(path))
            }
            Action::CopyToClipboard { path, op } => {
                self.state.tree.copy_to_clipboard(&path, op)?;
                let canonical = self.canonical(&path);
                Ok(DispatchResult::changed(vec![Effect::PersistWorkspace]).with_path(canonical))
            }
            Action::Paste { target_dir } => self.paste(&target_dir),
            Action::ClearClipboard => {
                if !self.state.tree.clear_clipboard() {
                    return Ok(DispatchResult::unchanged());
                }
                Ok(DispatchResult::changed(vec![Effect::PersistWorkspace]))
            }
            Action::Select { path } => {
                if !self.state.tree.select(path.as_deref()) {
                    return Ok(DispatchResult::unchanged());
                }
                let result = DispatchResult::changed(vec![Effect::PersistWorkspace]);
                Ok(match path {
                    Some(path) => result.with_path(path),
                    None => result,
                })
            }
            Action::OpenFile { path } => {
                let node = self
                    .state
                    .tree
                    .lookup(&path)
                    .ok_or_else(|| VfsError::NotFound(path.clone()))?;
                let Some(content) = node.content() else {
                    return Err(StoreError::NotAFile(path));
                };
                let canonical = node.path();
                let id = self.state.tabs.open_file(&canonical, content, Some(node.id()));
                Ok(DispatchResult::changed(vec![Effect::PersistEditor])
                    .with_path(canonical)
                    .with_tab(id))
            }
            Action::CloseTab { id } => {
                self.state.tabs.close_tab(id)?;
                Ok(DispatchResult::changed(vec![Effect::PersistEditor]).with_tab(id))
            }
            Action::SetActiveTab { id } => {
                if !self.state.tabs.set_active(id)? {
                    return Ok(DispatchResult::unchanged().with_tab(id));
                }
                Ok(DispatchResult::changed(vec![Effect::PersistEditor]).with_tab(id))
            }
            Action::EditTab { id, content } => {
                if !self.state.tabs.update_content(id, &content)? {
                    return Ok(DispatchResult::unchanged().with_tab(id));
                }
                Ok(DispatchResult::changed(vec![Effect::PersistEditor]).with_tab(id))
            }
            Action::SetCursor {
                id,
                line_number,
                column,
            } => {
                if !self.state.tabs.set_cursor(id, line_number, column)? {
                    return Ok(DispatchResult::unchanged().with_tab(id));
                }
                Ok(DispatchResult::changed(vec![Effect::PersistEditor]).with_tab(id))
            }
            Action::SaveTab { id, recreate } => self.save_tab(id, recreate),
            Action::RunFile { path } => self.run_file(&path),
            Action::ClearHistory => {
                if self.state.history.clear_for_user(&self.user_id) == 0 {
                    return Ok(DispatchResult::unchanged());
                }
                Ok(DispatchResult::changed(vec![Effect::PersistHistory]))
            }
            Action::ResetWorkspace { seed } => {
                self.state.tree.replace_root(seed::initial_tree(seed));
                self.state.tabs.mark_all_removed();
                Ok(DispatchResult::changed(vec![
                    Effect::PersistWorkspace,
                    Effect::PersistEditor,
                ])
                .with_path(path::ROOT.to_string()))
            }
        }
    }

    /// Replaces the tree with the contents of `handle`. Every open tab is
    /// flagged removed afterwards since none of its paths is trustworthy.
    pub async fn import<H: DirectoryHandle>(
        &mut self,
        handle: H,
    ) -> Result<(DispatchResult, ImportReport), StoreError> {
        let report = import_directory(&mut self.state.tree, handle).await?;
        self.state.tabs.mark_all_removed();
        let result = DispatchResult::changed(vec![Effect::PersistWorkspace, Effect::PersistEditor])
            .with_path(path::ROOT.to_string());
        Ok((result, report))
    }

    fn canonical(&self, path: &str) -> String {
        self.state
            .tree
            .lookup(path)
            .map(|node| node.path())
            .unwrap_or_else(|| path.to_string())
    }

    fn after_relocation(&mut self, old: &str, new: String) -> DispatchResult {
        let mut effects = vec![Effect::PersistWorkspace];
        if self.state.tabs.rebind(old, &new) > 0 {
            effects.push(Effect::PersistEditor);
        }
        DispatchResult::changed(effects).with_path(new)
    }

    fn paste(&mut self, target_dir: &str) -> Result<DispatchResult, StoreError> {
        let cut_source = self
            .state
            .tree
            .clipboard()
            .filter(|entry| entry.is_cut())
            .and_then(|entry| {
                let path = self.state.tree.path_of(entry.source_id)?;
                Some((entry.source_id, path))
            });

        let pasted = self.state.tree.paste(target_dir)?;

        let mut effects = vec![Effect::PersistWorkspace];
        if let Some((uid, source_path)) = cut_source {
            if self.state.tree.path_of(uid).is_none()
                && self.state.tabs.mark_removed(&source_path) > 0
            {
                effects.push(Effect::PersistEditor);
            }
        }
        Ok(DispatchResult::changed(effects).with_path(pasted))
    }

    fn save_tab(&mut self, id: TabId, recreate: bool) -> Result<DispatchResult, StoreError> {
        let (path, content) = match self.state.tabs.save_request(id) {
            Ok(request) => request,
            Err(TabError::FileGone { path }) if recreate => {
                let content = self
                    .state
                    .tabs
                    .tab(id)
                    .map(|t| t.content.clone())
                    .unwrap_or_default();
                return self.recreate(id, &path, content);
            }
            Err(e) => return Err(e.into()),
        };

        let is_file = self.state.tree.lookup(&path).is_some_and(|n| n.is_file());
        if !is_file {
            if recreate {
                return self.recreate(id, &path, content);
            }
            return Err(TabError::FileGone { path }.into());
        }

        self.state.tree.update_file_content(&path, content);
        self.state.tabs.mark_saved(id)?;
        Ok(
            DispatchResult::changed(vec![Effect::PersistWorkspace, Effect::PersistEditor])
                .with_path(path)
                .with_tab(id),
        )
    }

    /// Writes a removed tab back into the tree, creating missing parent
    /// directories. A file already sitting at the path is overwritten.
    fn recreate(
        &mut self,
        id: TabId,
        file_path: &str,
        content: String,
    ) -> Result<DispatchResult, StoreError> {
        let parent = path::parent_of(file_path).unwrap_or(path::ROOT);
        let name = path::basename(file_path);

        let created = match self.state.tree.lookup(file_path) {
            Some(node) if node.is_file() => {
                self.state.tree.update_file_content(file_path, content);
                file_path.to_string()
            }
            Some(_) => {
                return Err(VfsError::NameCollision {
                    dir: parent.to_string(),
                    name: name.to_string(),
                }
                .into())
            }
            None => {
                self.ensure_directories(parent)?;
                self.state.tree.create_file(parent, name, content)?
            }
        };

        let uid = self.state.tree.lookup(&created).map(|n| n.id());
        self.state.tabs.mark_restored(id, uid)?;
        self.state.tabs.mark_saved(id)?;
        tracing::info!(path = %created, tab = id.raw(), "file recreated from tab");

        Ok(
            DispatchResult::changed(vec![Effect::PersistWorkspace, Effect::PersistEditor])
                .with_path(created)
                .with_tab(id),
        )
    }

    fn ensure_directories(&mut self, dir: &str) -> Result<(), VfsError> {
        // a file in the way must fail before anything is created
        let mut current = path::ROOT.to_string();
        let mut missing = Vec::new();
        for segment in path::segments(dir) {
            let next = path::join(&current, segment);
            match self.state.tree.lookup(&next) {
                Some(node) if node.is_dir() => {}
                Some(_) => return Err(VfsError::ParentNotFound(next)),
                None => missing.push((current.clone(), segment.to_string())),
            }
            current = next;
        }

        for (parent, name) in missing {
            self.state.tree.create_directory(&parent, &name)?;
        }
        Ok(())
    }

    fn run_file(&mut self, file_path: &str) -> Result<DispatchResult, StoreError> {
        let node = self
            .state
            .tree
            .lookup(file_path)
            .ok_or_else(|| VfsError::NotFound(file_path.to_string()))?;
        let Some(content) = node.content() else {
            return Err(StoreError::NotAFile(file_path.to_string()));
        };
        let canonical = node.path();
        let file_name = node.name().to_string();
        let content = content.to_string();
        let language = LanguageId::from_name(&file_name).language_id();

        let output = self.runner.execute(&content, language)?;
        self.state.history.add_entry(NewEntry {
            user_id: self.user_id.clone(),
            file_path: canonical.clone(),
            file_name,
            language: language.to_string(),
            content,
            output: output.clone(),
            created_at: None,
        });
        tracing::debug!(path = %canonical, language, "file run");

        Ok(
            DispatchResult::changed(vec![Effect::PersistHistory, Effect::ShowOutput(output)])
                .with_path(canonical),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
