//! Single-threaded aggregation of harvested outcomes into the two
//! reporting lists. Runs only after the dispatcher has collected every
//! result, so no synchronization is needed.

use crate::dispatcher::TaskResult;
use crate::model::Outcome;

#[derive(Debug, Default)]
pub struct RunReport {
    successes: Vec<String>,
    failures: Vec<String>,
}

impl RunReport {
    pub fn aggregate(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        let mut report = RunReport::default();
        for outcome in outcomes {
            if outcome.succeeded {
                report.successes.push(outcome.message);
            } else {
                report.failures.push(outcome.message);
            }
        }
        report
    }

    pub fn from_results(results: Vec<TaskResult>) -> Self {
        Self::aggregate(results.into_iter().map(TaskResult::into_outcome))
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn print_successes(&self) {
        if self.successes.is_empty() {
            return;
        }
        println!("Following jobs submitted successfully, status:");
        for message in &self.successes {
            println!("{message}");
        }
    }

    pub fn print_failures(&self) {
        if self.failures.is_empty() {
            return;
        }
        println!("Following jobs failed: ");
        for message in &self.failures {
            println!("{message}");
        }
    }
}
