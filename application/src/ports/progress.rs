//! Progress notification port
//!
//! Defines the interface for reporting progress through the translation
//! pipeline.

/// Stage of the translation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStage {
    Validating,
    Composing,
    AwaitingCompletion,
    Parsing,
}

impl TranslationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationStage::Validating => "validating",
            TranslationStage::Composing => "composing",
            TranslationStage::AwaitingCompletion => "awaiting completion",
            TranslationStage::Parsing => "parsing",
        }
    }
}

/// Callback for progress updates during a translation
///
/// Implementations live in the presentation layer (console spinner, etc.)
pub trait TranslationProgressNotifier: Send + Sync {
    /// Called when a pipeline stage starts
    fn on_stage(&self, stage: TranslationStage);

    /// Called before a retry; `attempt` is the attempt about to start
    fn on_retry(&self, _attempt: u32, _status: u16) {}

    /// Called once the pipeline has produced its result
    fn on_finished(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl TranslationProgressNotifier for NoProgress {
    fn on_stage(&self, _stage: TranslationStage) {}
}
