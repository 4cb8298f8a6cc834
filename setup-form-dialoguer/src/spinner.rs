//! Progress spinner for blocking work between prompts.

use std::thread;
use std::time::Duration;

use console::{Term, style};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(80);

/// Animates a title on stderr while a closure runs on a worker thread.
///
/// Nothing is drawn when stderr is not a terminal. The line is cleared before
/// `run` returns, so the next prompt starts on a clean line.
#[derive(Debug, Clone)]
pub struct Spinner {
    title: String,
    colored: bool,
}

impl Spinner {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            colored: true,
        }
    }

    /// Draw frames without colour.
    pub fn plain(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Run `work` to completion and return its result.
    ///
    /// A panic in `work` is resumed on the calling thread.
    pub fn run<T, F>(&self, work: F) -> T
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        let term = Term::stderr();
        let animate = term.is_term();

        thread::scope(|scope| {
            let worker = scope.spawn(work);

            let mut frame = 0usize;
            while !worker.is_finished() {
                if animate {
                    self.draw(&term, frame);
                }
                frame += 1;
                thread::sleep(TICK);
            }
            if animate && frame > 0 {
                let _ = term.clear_line();
            }

            match worker.join() {
                Ok(value) => value,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        })
    }

    fn draw(&self, term: &Term, frame: usize) {
        let glyph = FRAMES[frame % FRAMES.len()];
        let line = if self.colored {
            format!("{} {}", style(glyph).for_stderr().color256(218), self.title)
        } else {
            format!("{glyph} {}", self.title)
        };
        let _ = term.clear_line();
        let _ = term.write_str(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_the_work_result() {
        let spinner = Spinner::new("Loading...");
        let value = spinner.run(|| {
            thread::sleep(Duration::from_millis(20));
            21 * 2
        });
        assert_eq!(value, 42);
    }

    #[test]
    fn borrows_from_the_caller() {
        let servers = vec!["home".to_string(), "work".to_string()];
        let count = Spinner::new("Logging in...").plain().run(|| servers.len());
        assert_eq!(count, 2);
        assert_eq!(servers.len(), 2);
    }

    #[test]
    fn propagates_errors_as_values() {
        let result: Result<(), String> =
            Spinner::new("Loading...").run(|| Err("no such file".to_string()));
        assert_eq!(result.unwrap_err(), "no such file");
    }

    #[test]
    #[should_panic(expected = "worker exploded")]
    fn resumes_worker_panics() {
        Spinner::new("Loading...").run(|| -> u8 { panic!("worker exploded") });
    }
}
