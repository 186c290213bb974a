#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PersistWorkspace,
    PersistEditor,
    PersistHistory,
    ShowOutput(String),
}
