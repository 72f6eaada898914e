mod concept;
mod quiz;
mod session;

pub use concept::{ConceptNode, MindMapPayload};
pub use quiz::{AnswerOutcome, QuestionRecord, QuizError, QuizProgress, QuizSession};
pub use session::{
    ActiveView, ActiveViewDescriptor, MindMapArtifact, Operation, OperationFailure,
    OperationOutput, PendingOperation, QaExchange, QaReply, QuizArtifact, Session, SessionError,
    PLACEHOLDER_PROMPT, STATUS_ANSWERED, STATUS_ASKING, STATUS_GENERATING_MIND_MAP,
    STATUS_GENERATING_QUIZ, STATUS_MIND_MAP_READY, STATUS_PROCESSED, STATUS_PROCESSING,
    STATUS_QUIZ_READY,
};
