//! Progress reporting for a translation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use polyglot_application::{TranslationProgressNotifier, TranslationStage};
use std::time::Duration;

/// Spinner on stderr that follows the pipeline stages
pub struct ProgressReporter {
    spinner: ProgressBar,
}

impl ProgressReporter {
    pub fn new(source_language: &str, target_language: &str) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix(format!("{} → {}", source_language, target_language));
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn stage_display_name(stage: TranslationStage) -> &'static str {
        match stage {
            TranslationStage::Validating => "Validating request...",
            TranslationStage::Composing => "Composing prompt...",
            TranslationStage::AwaitingCompletion => "Waiting for the model...",
            TranslationStage::Parsing => "Parsing reply...",
        }
    }
}

impl TranslationProgressNotifier for ProgressReporter {
    fn on_stage(&self, stage: TranslationStage) {
        self.spinner.set_message(Self::stage_display_name(stage));
    }

    fn on_retry(&self, attempt: u32, status: u16) {
        self.spinner.set_message(format!(
            "{} (status {}), attempt {}...",
            "Retrying".yellow(),
            status,
            attempt
        ));
    }

    fn on_finished(&self, success: bool) {
        if success {
            self.spinner.finish_with_message("done".green().to_string());
        } else {
            self.spinner.finish_with_message("failed".red().to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI), one line per stage on stderr
pub struct SimpleProgress;

impl TranslationProgressNotifier for SimpleProgress {
    fn on_stage(&self, stage: TranslationStage) {
        eprintln!("{} {}", "->".cyan(), stage.as_str());
    }

    fn on_retry(&self, attempt: u32, status: u16) {
        eprintln!("  {} status {}, attempt {}", "retry".yellow(), status, attempt);
    }

    fn on_finished(&self, success: bool) {
        if success {
            eprintln!("  {} done", "v".green());
        } else {
            eprintln!("  {} failed", "x".red());
        }
    }
}
