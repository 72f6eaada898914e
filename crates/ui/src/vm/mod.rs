mod markdown_vm;
mod mind_map_vm;
mod quiz_vm;
mod time_fmt;

pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use mind_map_vm::{MAX_MIND_MAP_DEPTH, MindMapNodeVm, build_mind_map_vm};
pub use quiz_vm::{QuizOptionVm, QuizScreen, QuizVm};
pub use time_fmt::generated_caption;
