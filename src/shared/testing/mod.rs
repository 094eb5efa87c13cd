mod fakes;
mod git_repo;

pub use fakes::{Prompt, RecordingUi, ScriptedRunner};
pub use git_repo::TestRepo;
