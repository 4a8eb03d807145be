// What a level asks the stage manager to do after a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneResult {
    Continue,
    SwitchToLevel { name: String },
    ReturnToMenu,
}
