//! Mock Answer Source for Testing
//!
//! Plays back scripted answers, optionally after a delay.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;
use songquiz::session::AnswerSource;

/// Answer source that returns predetermined answers
pub struct MockAnswers {
    /// Queue of (delay before answering, answer)
    script: VecDeque<(Duration, String)>,
    /// Keep the turn open forever once the script runs out
    hang_when_done: bool,
}

impl MockAnswers {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            script: answers
                .iter()
                .map(|a| (Duration::ZERO, a.to_string()))
                .collect(),
            hang_when_done: false,
        }
    }

    /// Each answer arrives after its delay
    pub fn delayed(answers: &[(u64, &str)]) -> Self {
        Self {
            script: answers
                .iter()
                .map(|(ms, a)| (Duration::from_millis(*ms), a.to_string()))
                .collect(),
            hang_when_done: false,
        }
    }

    /// A player who never says anything
    pub fn silent() -> Self {
        Self {
            script: VecDeque::new(),
            hang_when_done: true,
        }
    }

    /// Scripted answers not yet handed out
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[async_trait]
impl AnswerSource for MockAnswers {
    async fn next_answer(&mut self) -> Option<String> {
        match self.script.pop_front() {
            Some((delay, answer)) => {
                tokio::time::sleep(delay).await;
                Some(answer)
            }
            None if self.hang_when_done => {
                std::future::pending::<()>().await;
                None
            }
            None => None,
        }
    }
}
