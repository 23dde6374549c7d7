/// List payload families that arrive wrapped in response envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Videos,
    Quizzes,
}

impl ListKind {
    pub fn name(&self) -> &'static str {
        match self {
            ListKind::Videos => "videos",
            ListKind::Quizzes => "quizzes",
        }
    }

    /// Wire key of the sequence-valued payload field.
    pub fn plural_key(&self) -> &'static str {
        match self {
            ListKind::Videos => "videos",
            ListKind::Quizzes => "quizzes",
        }
    }

    /// Wire key of the single-entity field, consulted only when no sequence is present.
    pub fn singular_key(&self) -> &'static str {
        match self {
            ListKind::Videos => "video",
            ListKind::Quizzes => "quiz",
        }
    }
}
