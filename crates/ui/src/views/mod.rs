mod mind_map;
mod question_answer;
mod quiz;
mod state;
mod study;
mod uploader;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use mind_map::MindMapView;
pub use question_answer::QuestionAnswerView;
pub use quiz::QuizView;
pub use state::ViewError;
pub use study::StudyView;
pub use uploader::{UploaderForm, parse_path_list};
